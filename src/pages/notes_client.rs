use crate::components::hooks::use_debounced;
use crate::components::ui::{Button, ErrorAlert};
use crate::components::{
    Modal, MonkeyLoader, NoteForm, NoteList, Pagination, SearchBox, Toaster,
};
use crate::models::NoteTag;
use crate::query::use_query;
use crate::state::{list_visible, pagination_visible, AppContext, NotesView};
use crate::storage::load_search;
use leptos::prelude::*;

/// Listing view: search, pagination, create modal and the notes themselves.
#[component]
pub fn NotesClient(#[prop(into)] tag: Signal<Option<NoteTag>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let config = app_state.0.config.clone();
    let storage = app_state.0.storage.clone();
    let notifier = app_state.0.notifier;

    let initial_search = load_search(storage.as_ref(), &config.search_storage_key);
    let view_state: RwSignal<NotesView> =
        RwSignal::new(NotesView::new(tag.get_untracked(), initial_search));

    Effect::new(move |_| {
        let t = tag.get();
        if view_state.with_untracked(|v| v.tag() != t) {
            view_state.update(|v| {
                v.set_tag(t);
            });
        }
    });

    let search_input = Signal::derive(move || view_state.with(|v| v.search_input().to_string()));
    let debounced = use_debounced(search_input, config.debounce_ms);
    Effect::new(move |_| {
        let settled = debounced.get();
        if view_state.with_untracked(|v| v.debounced_search() != settled) {
            tracing::debug!(search = %settled, "search settled");
            view_state.update(|v| v.apply_debounced(settled));
        }
    });

    let key = Memo::new(move |_| view_state.with(|v| v.query_key()));
    let query = use_query(app_state.0.notes_query.clone(), key.into());

    Effect::new(move |_| {
        let shown = query.data.get();
        let notify = view_state
            .try_update_untracked(|v| v.should_notify_empty(shown.as_ref()))
            .unwrap_or(false);
        if notify {
            notifier.blank("No notes found", "🔍");
        }
    });

    let total_pages = Memo::new(move |_| {
        query
            .data
            .with(|d| d.as_ref().map(|r| r.data.total_pages).unwrap_or(0))
    });
    let current_page = Signal::derive(move || view_state.with(|v| v.page()));
    let is_form_open = Memo::new(move |_| view_state.with(|v| v.is_form_modal_open()));

    let storage_key = config.search_storage_key.clone();
    let on_search = Callback::new(move |value: String| {
        view_state.update(|v| v.set_search_input(value, storage.as_ref(), &storage_key));
    });
    let on_page_change = Callback::new(move |p: u32| view_state.update(|v| v.set_page(p)));
    let close_form = Callback::new(move |_: ()| view_state.update(|v| v.close_form()));

    view! {
        <div class="flex flex-col gap-4">
            <header class="flex flex-wrap items-center justify-between gap-3">
                <SearchBox value=search_input on_change=on_search />

                <Show when=move || pagination_visible(total_pages.get()) fallback=|| ().into_view()>
                    <Pagination
                        total_pages=total_pages
                        current_page=current_page
                        on_page_change=on_page_change
                    />
                </Show>

                <Button on:click=move |_| view_state.update(|v| v.open_form())>
                    "Create note +"
                </Button>
            </header>

            {move || {
                let data = query.data.get();
                match (data, query.error.get()) {
                    (None, Some(e)) => {
                        view! { <ErrorAlert message=format!("Could not fetch the list of notes. {e}") /> }
                            .into_any()
                    }
                    (Some(r), _) if list_visible(&r.data) => {
                        view! { <NoteList notes=r.data.notes /> }.into_any()
                    }
                    _ => ().into_any(),
                }
            }}

            <Show when=move || is_form_open.get() fallback=|| ().into_view()>
                <Modal on_close=close_form title="New note">
                    <NoteForm on_close=close_form />
                </Modal>
            </Show>

            <MonkeyLoader show=query.is_fetching duration_ms=config.loader_min_ms />
            <Toaster />
        </div>
    }
}
