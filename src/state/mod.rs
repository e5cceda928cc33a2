pub(crate) mod notes_view;

pub(crate) use notes_view::{list_visible, pagination_visible, NotesView};

use crate::api::ApiClient;
use crate::config::{EnvConfig, NotesConfig};
use crate::query::{note_query_fn, notes_query_fn, NoteQueryClient, NotesQueryClient};
use crate::storage::{default_storage, SharedStorage};
use crate::toast::Notifier;

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: ApiClient,
    pub config: NotesConfig,

    /// Listing cache keyed by `["notes", page, search, tag]`.
    pub notes_query: NotesQueryClient,
    pub note_query: NoteQueryClient,

    pub storage: SharedStorage,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new() -> Self {
        let env = EnvConfig::new();
        let config = NotesConfig::from_env();
        let api_client = ApiClient::from_env(&env);

        tracing::info!(api_url = %env.api_url, per_page = config.per_page, "notes app starting");

        Self::with_parts(api_client, config, default_storage())
    }

    pub fn with_parts(api_client: ApiClient, config: NotesConfig, storage: SharedStorage) -> Self {
        let notes_query = NotesQueryClient::new(
            config.stale_ms,
            notes_query_fn(api_client.clone(), config.per_page),
        );
        let note_query = NoteQueryClient::new(config.stale_ms, note_query_fn(api_client.clone()));
        let notifier = Notifier::new(config.toast_ms);

        Self {
            api_client,
            config,
            notes_query,
            note_query,
            storage,
            notifier,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
