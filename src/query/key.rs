use crate::models::NoteTag;
use serde::{Deserialize, Serialize};

pub(crate) const NOTES_ENTITY: &str = "notes";
pub(crate) const NOTE_ENTITY: &str = "note";

/// Identity of one listing query: `["notes", page, search, tag]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(into = "NotesKeyRepr", try_from = "NotesKeyRepr")]
pub(crate) struct NotesKey {
    pub page: u32,
    pub search: String,
    pub tag: Option<NoteTag>,
}

impl NotesKey {
    pub(crate) fn new(page: u32, search: impl Into<String>, tag: Option<NoteTag>) -> Self {
        Self {
            page,
            search: search.into(),
            tag,
        }
    }

    /// Key of the first unfiltered-by-search page for a tag.
    pub(crate) fn first_page(tag: Option<NoteTag>) -> Self {
        Self::new(1, "", tag)
    }
}

#[derive(Serialize, Deserialize)]
struct NotesKeyRepr(String, u32, String, Option<NoteTag>);

impl From<NotesKey> for NotesKeyRepr {
    fn from(k: NotesKey) -> Self {
        NotesKeyRepr(NOTES_ENTITY.to_string(), k.page, k.search, k.tag)
    }
}

impl TryFrom<NotesKeyRepr> for NotesKey {
    type Error = String;

    fn try_from(r: NotesKeyRepr) -> Result<Self, Self::Error> {
        if r.0 != NOTES_ENTITY {
            return Err(format!("expected entity '{NOTES_ENTITY}', got '{}'", r.0));
        }
        Ok(NotesKey::new(r.1, r.2, r.3))
    }
}

/// Identity of one note-details query: `["note", id]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(into = "NoteKeyRepr", try_from = "NoteKeyRepr")]
pub(crate) struct NoteKey {
    pub id: String,
}

#[derive(Serialize, Deserialize)]
struct NoteKeyRepr(String, String);

impl From<NoteKey> for NoteKeyRepr {
    fn from(k: NoteKey) -> Self {
        NoteKeyRepr(NOTE_ENTITY.to_string(), k.id)
    }
}

impl TryFrom<NoteKeyRepr> for NoteKey {
    type Error = String;

    fn try_from(r: NoteKeyRepr) -> Result<Self, Self::Error> {
        if r.0 != NOTE_ENTITY {
            return Err(format!("expected entity '{NOTE_ENTITY}', got '{}'", r.0));
        }
        Ok(NoteKey { id: r.1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_key_serializes_as_tuple() {
        let k = NotesKey::new(2, "lunch", Some(NoteTag::Meeting));
        let v = serde_json::to_value(&k).expect("should serialize");
        assert_eq!(v, serde_json::json!(["notes", 2, "lunch", "Meeting"]));

        let k = NotesKey::first_page(None);
        let v = serde_json::to_value(&k).expect("should serialize");
        assert_eq!(v, serde_json::json!(["notes", 1, "", null]));
    }

    #[test]
    fn test_notes_key_rejects_other_entity() {
        let parsed = serde_json::from_value::<NotesKey>(serde_json::json!(["note", 1, "", null]));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_equal_tuples_are_equal_keys() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(NotesKey::new(1, "", Some(NoteTag::Work)));
        set.insert(NotesKey::new(1, "", Some(NoteTag::Work)));
        set.insert(NotesKey::new(1, "", None));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_note_key_contract() {
        let k: NoteKey =
            serde_json::from_value(serde_json::json!(["note", "abc"])).expect("should parse");
        assert_eq!(k.id, "abc");
    }
}
