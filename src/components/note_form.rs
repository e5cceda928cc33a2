use crate::components::ui::{
    bind_to, Button, ButtonVariant, ErrorAlert, Input, Label, NativeSelect, Spinner, Textarea,
};
use crate::models::{NewNote, NoteTag};
use crate::state::AppContext;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::str::FromStr;

/// Builds a [`NewNote`] from raw field values.
pub(crate) fn build_new_note(title: &str, content: &str, tag: &str) -> Result<NewNote, String> {
    let tag = NoteTag::from_str(tag).map_err(|_| format!("Unknown tag: {tag}"))?;
    let note = NewNote {
        title: title.trim().to_string(),
        content: content.trim().to_string(),
        tag,
    };
    note.validate()?;
    Ok(note)
}

/// Create-note form. Invalidates the listing cache on success and closes
/// itself through `on_close`.
#[component]
pub fn NoteForm(on_close: Callback<()>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let title: RwSignal<String> = RwSignal::new(String::new());
    let content: RwSignal<String> = RwSignal::new(String::new());
    let tag: RwSignal<String> = RwSignal::new(NoteTag::Todo.to_string());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting: RwSignal<bool> = RwSignal::new(false);

    let tag_options: Vec<String> = NoteTag::all().into_iter().map(|t| t.to_string()).collect();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let note = match build_new_note(
            &title.get_untracked(),
            &content.get_untracked(),
            &tag.get_untracked(),
        ) {
            Ok(n) => n,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };

        submitting.set(true);
        error.set(None);

        let api_client = app_state.0.api_client.clone();
        let notes_query = app_state.0.notes_query.clone();
        let notifier = app_state.0.notifier;

        spawn_local(async move {
            match api_client.create_note(&note).await {
                Ok(created) => {
                    tracing::info!(id = %created.id, "note created");
                    notes_query.invalidate(|_| true);
                    notifier.success("Note created");
                    on_close.run(());
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            // The form is usually unmounted by now.
            let _ = submitting.try_set(false);
        });
    };

    view! {
        <form class="flex flex-col gap-4" on:submit=on_submit>
            <div class="flex flex-col gap-2">
                <Label html_for="note-title">"Title"</Label>
                <Input id="note-title" name="title" bind_value=title on_change=bind_to(title) required=true />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="note-content">"Content"</Label>
                <Textarea id="note-content" name="content" bind_value=content />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="note-tag">"Tag"</Label>
                <NativeSelect id="note-tag" name="tag" options=tag_options bind_value=tag />
            </div>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || error.get().map(|e| view! { <ErrorAlert message=e /> })}
            </Show>

            <div class="flex items-center justify-end gap-2">
                <Button
                    variant=ButtonVariant::Outline
                    attr:r#type="button"
                    attr:disabled=move || submitting.get()
                    on:click=move |_| on_close.run(())
                >
                    "Cancel"
                </Button>
                <Button attr:r#type="submit" attr:disabled=move || submitting.get()>
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || submitting.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {move || if submitting.get() { "Creating..." } else { "Create note" }}
                    </span>
                </Button>
            </div>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_new_note_trims_and_parses_tag() {
        let n = build_new_note("  Groceries ", " milk ", "Shopping").expect("valid note");
        assert_eq!(n.title, "Groceries");
        assert_eq!(n.content, "milk");
        assert_eq!(n.tag, NoteTag::Shopping);
    }

    #[test]
    fn test_build_new_note_rejects_bad_input() {
        assert!(build_new_note("ok title", "", "Nope").is_err());
        assert!(build_new_note("ab", "", "Todo").is_err());
    }
}
