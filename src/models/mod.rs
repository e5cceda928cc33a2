use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Category label attached to a note. Also the list filter.
///
/// The wire form is the capitalized name (`"Meeting"`); parsing is
/// ASCII-case-insensitive so URL segments like `meeting` resolve too.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub(crate) enum NoteTag {
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    pub(crate) fn all() -> Vec<NoteTag> {
        NoteTag::iter().collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// One page of the filtered listing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotesPage {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub total_pages: u32,
}

impl NotesPage {
    pub(crate) fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

pub(crate) const TITLE_MIN_LEN: usize = 3;
pub(crate) const TITLE_MAX_LEN: usize = 50;
pub(crate) const CONTENT_MAX_LEN: usize = 500;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NewNote {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl NewNote {
    /// Returns a user-facing message for the first violated field rule.
    pub(crate) fn validate(&self) -> Result<(), String> {
        let title_len = self.title.trim().chars().count();
        if title_len < TITLE_MIN_LEN {
            return Err(format!("Title must be at least {TITLE_MIN_LEN} characters"));
        }
        if title_len > TITLE_MAX_LEN {
            return Err(format!("Title must be at most {TITLE_MAX_LEN} characters"));
        }
        if self.content.chars().count() > CONTENT_MAX_LEN {
            return Err(format!(
                "Content must be at most {CONTENT_MAX_LEN} characters"
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_note_tag_parses_case_insensitively() {
        assert_eq!(NoteTag::from_str("meeting").ok(), Some(NoteTag::Meeting));
        assert_eq!(NoteTag::from_str("Meeting").ok(), Some(NoteTag::Meeting));
        assert_eq!(NoteTag::from_str("SHOPPING").ok(), Some(NoteTag::Shopping));
        assert!(NoteTag::from_str("bogus-tag").is_err());
    }

    #[test]
    fn test_note_tag_wire_form_is_capitalized() {
        let v = serde_json::to_value(NoteTag::Todo).expect("should serialize");
        assert_eq!(v, "Todo");
        assert_eq!(NoteTag::Work.to_string(), "Work");
        assert_eq!(NoteTag::all().len(), 5);
    }

    #[test]
    fn test_notes_page_contract_deserialize() {
        let json = r#"{
            "notes": [{
                "id": "n1",
                "title": "Standup",
                "content": "notes",
                "tag": "Meeting",
                "createdAt": "2025-01-01T00:00:00Z",
                "updatedAt": "2025-01-02T00:00:00Z"
            }],
            "totalPages": 3
        }"#;
        let page: NotesPage = serde_json::from_str(json).expect("page should parse");
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.notes[0].tag, NoteTag::Meeting);
        assert_eq!(page.notes[0].updated_at, "2025-01-02T00:00:00Z");
    }

    #[test]
    fn test_new_note_validation() {
        let mut n = NewNote {
            title: "ab".to_string(),
            content: String::new(),
            tag: NoteTag::Todo,
        };
        assert!(n.validate().is_err());

        n.title = "Buy milk".to_string();
        assert!(n.validate().is_ok());

        n.content = "x".repeat(CONTENT_MAX_LEN + 1);
        assert!(n.validate().is_err());
    }
}
