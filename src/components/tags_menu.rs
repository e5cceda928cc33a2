use crate::filter::filter_path;
use crate::models::NoteTag;
use leptos::prelude::*;

fn link_class(active: bool) -> &'static str {
    if active {
        "block rounded-md bg-accent px-3 py-1.5 text-sm font-medium text-accent-foreground"
    } else {
        "block rounded-md px-3 py-1.5 text-sm text-muted-foreground hover:bg-surface-hover"
    }
}

/// Sidebar with one link per tag plus "All notes".
#[component]
pub fn TagsMenu(#[prop(into)] active: Signal<Option<NoteTag>>) -> impl IntoView {
    let entries: Vec<(Option<NoteTag>, String)> = std::iter::once((None, "All notes".to_string()))
        .chain(NoteTag::all().into_iter().map(|t| (Some(t), t.to_string())))
        .collect();

    view! {
        <nav aria-label="Tags" class="flex flex-col gap-1">
            {entries
                .into_iter()
                .map(|(tag, label)| {
                    view! {
                        <a
                            href=filter_path(tag)
                            class=move || link_class(active.get() == tag)
                            aria-current=move || (active.get() == tag).then_some("page")
                        >
                            {label}
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}
