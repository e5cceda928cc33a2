use crate::components::ui::{CardItem, CardList};
use crate::models::Note;
use leptos::prelude::*;

/// Trims note bodies to a preview length without splitting characters.
pub(crate) fn preview(content: &str, max_chars: usize) -> String {
    let content = content.trim();
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let cut: String = content.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

#[component]
pub fn NoteList(notes: Vec<Note>) -> impl IntoView {
    view! {
        <CardList>
            {notes
                .into_iter()
                .map(|n| {
                    let href = format!("/notes/{}", urlencoding::encode(&n.id));
                    view! {
                        <CardItem>
                            <a
                                href=href
                                class="flex w-full flex-col gap-2 rounded-md border border-border bg-background px-3 py-3 transition-colors hover:bg-surface-hover"
                            >
                                <div class="flex items-start justify-between gap-2">
                                    <div class="truncate text-sm font-medium">{n.title}</div>
                                    <span class="shrink-0 rounded-full border px-2 py-0.5 text-[10px] text-muted-foreground">
                                        {n.tag.to_string()}
                                    </span>
                                </div>
                                <p class="text-xs text-muted-foreground">{preview(&n.content, 140)}</p>
                            </a>
                        </CardItem>
                    }
                })
                .collect_view()}
        </CardList>
    }
}
