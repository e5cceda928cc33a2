pub(crate) mod cache;
pub(crate) mod client;
pub(crate) mod hydration;
pub(crate) mod key;

pub(crate) use cache::Resolved;
pub(crate) use client::{use_query, QueryClient, QueryFn, QueryFuture, QueryHandle};
pub(crate) use key::{NoteKey, NotesKey};

use crate::api::{ApiClient, FetchNotesParams};
use crate::models::{Note, NotesPage};
use std::sync::Arc;

pub(crate) type NotesQueryClient = QueryClient<NotesKey, NotesPage>;
pub(crate) type NoteQueryClient = QueryClient<NoteKey, Note>;

/// Request parameters for a listing key. An empty search is not sent.
pub(crate) fn notes_params(key: &NotesKey, per_page: u32) -> FetchNotesParams {
    FetchNotesParams {
        page: key.page,
        per_page,
        search: Some(key.search.clone()).filter(|s| !s.is_empty()),
        tag: key.tag,
    }
}

pub(crate) fn notes_query_fn(api: ApiClient, per_page: u32) -> QueryFn<NotesKey, NotesPage> {
    Arc::new(move |key: NotesKey| -> QueryFuture<NotesPage> {
        let api = api.clone();
        let params = notes_params(&key, per_page);
        Box::pin(async move { api.fetch_notes(&params).await })
    })
}

pub(crate) fn note_query_fn(api: ApiClient) -> QueryFn<NoteKey, Note> {
    Arc::new(move |key: NoteKey| -> QueryFuture<Note> {
        let api = api.clone();
        Box::pin(async move { api.fetch_note_by_id(&key.id).await })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteTag;

    #[test]
    fn test_notes_params_from_key() {
        let p = notes_params(&NotesKey::new(3, "", Some(NoteTag::Todo)), 10);
        assert_eq!(p.page, 3);
        assert_eq!(p.per_page, 10);
        assert_eq!(p.search, None);
        assert_eq!(p.tag, Some(NoteTag::Todo));

        let p = notes_params(&NotesKey::new(1, "lunch", None), 10);
        assert_eq!(p.search.as_deref(), Some("lunch"));
        assert_eq!(p.tag, None);
    }
}
