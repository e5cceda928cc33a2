use super::NotesClient;
use crate::components::TagsMenu;
use crate::filter::{first_segment, resolve_tag};
use crate::query::hydration::take_document_snapshot;
use crate::query::NotesKey;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct FilterRouteParams {
    pub slug: Option<String>,
}

/// `/notes/filter/*slug`: resolves the tag, warms the cache and hands over to
/// the client view.
#[component]
pub fn FilteredNotesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let params = use_params::<FilterRouteParams>();

    let tag = Memo::new(move |_| {
        let slug = params.get().ok().and_then(|p| p.slug).unwrap_or_default();
        resolve_tag(first_segment(&slug))
    });

    // Before the first query so hydrated keys are not fetched again.
    if let Some(snapshot) = take_document_snapshot() {
        app_state.0.notes_query.hydrate(snapshot);
    }

    let notes_query = app_state.0.notes_query.clone();
    Effect::new(move |_| {
        let key = NotesKey::first_page(tag.get());
        tracing::debug!(?key, "prefetching first page");
        notes_query.prefetch(key);
    });

    view! {
        <div class="mx-auto flex min-h-screen w-full max-w-6xl gap-6 px-4 py-6">
            <aside class="hidden w-48 shrink-0 md:block">
                <TagsMenu active=tag />
            </aside>
            <main class="min-w-0 flex-1">
                <NotesClient tag=tag />
            </main>
        </div>
    }
}
