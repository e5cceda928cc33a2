use crate::models::{NoteTag, NotesPage};
use crate::query::{NotesKey, Resolved};
use crate::storage::{save_search, KeyValueStorage};

/// UI state of the filtered notes listing.
///
/// `page` always returns to 1 when the tag or the search text changes, so a
/// stale page number never survives a filter change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NotesView {
    page: u32,
    search_input: String,
    debounced_search: String,
    tag: Option<NoteTag>,
    is_form_modal_open: bool,
    last_empty_notice: Option<(String, u64)>,
}

impl NotesView {
    pub fn new(tag: Option<NoteTag>, initial_search: String) -> Self {
        Self {
            page: 1,
            debounced_search: initial_search.clone(),
            search_input: initial_search,
            tag,
            is_form_modal_open: false,
            last_empty_notice: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn debounced_search(&self) -> &str {
        &self.debounced_search
    }

    pub fn tag(&self) -> Option<NoteTag> {
        self.tag
    }

    pub fn is_form_modal_open(&self) -> bool {
        self.is_form_modal_open
    }

    /// Returns whether the tag actually changed.
    pub fn set_tag(&mut self, tag: Option<NoteTag>) -> bool {
        if self.tag == tag {
            return false;
        }
        self.tag = tag;
        self.page = 1;
        true
    }

    /// Raw keystroke input; persisted best-effort under `storage_key`.
    pub fn set_search_input(
        &mut self,
        value: String,
        storage: &dyn KeyValueStorage,
        storage_key: &str,
    ) {
        save_search(storage, storage_key, &value);
        self.search_input = value;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Settled search text from the debouncer.
    pub fn apply_debounced(&mut self, value: String) {
        self.debounced_search = value;
    }

    pub fn open_form(&mut self) {
        self.is_form_modal_open = true;
    }

    pub fn close_form(&mut self) {
        self.is_form_modal_open = false;
    }

    pub fn query_key(&self) -> NotesKey {
        NotesKey::new(self.page, self.debounced_search.clone(), self.tag)
    }

    /// Whether the "No notes found" notice should fire for this result.
    ///
    /// Fires once per distinct (debounced search, data version) pair, only
    /// for a non-empty search and only for data that belongs to the current
    /// key (placeholder data is skipped).
    pub fn should_notify_empty(&mut self, shown: Option<&Resolved<NotesPage>>) -> bool {
        let Some(shown) = shown else {
            return false;
        };
        if self.debounced_search.is_empty() || shown.is_placeholder || !shown.data.is_empty() {
            return false;
        }

        let pair = (self.debounced_search.clone(), shown.data_version);
        if self.last_empty_notice.as_ref() == Some(&pair) {
            return false;
        }
        self.last_empty_notice = Some(pair);
        true
    }
}

pub(crate) fn pagination_visible(total_pages: u32) -> bool {
    total_pages > 1
}

pub(crate) fn list_visible(page: &NotesPage) -> bool {
    !page.notes.is_empty()
}
