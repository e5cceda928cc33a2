mod filtered_notes;
mod note_details;
mod notes_client;

pub use filtered_notes::FilteredNotesPage;
pub use note_details::NoteDetailsPage;
pub use notes_client::NotesClient;

use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="px-4 py-8 text-xs text-muted-foreground">
            "Not found. "
            <a href=crate::filter::filter_path(None) class="underline">"Go to notes"</a>
        </div>
    }
}
