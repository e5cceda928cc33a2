use crate::filter::filter_path;
use crate::query::hydration::register_snapshot_source;
use crate::pages::{FilteredNotesPage, NoteDetailsPage, NotFound};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    register_snapshot_source(state.notes_query.clone());
    provide_context(AppContext(state));

    // Router hooks in the pages need the <Router> context.
    view! {
        <Router>
            <Routes fallback=NotFound>
                <Route path=path!("") view=move || view! { <Redirect path=filter_path(None) /> } />
                <Route path=path!("notes/filter") view=FilteredNotesPage />
                <Route path=path!("notes/filter/*slug") view=FilteredNotesPage />
                <Route path=path!("notes/:id") view=NoteDetailsPage />
            </Routes>
        </Router>
    }
}
