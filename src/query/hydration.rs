use super::cache::DehydratedState;
use crate::models::NotesPage;
use crate::query::key::NotesKey;
use crate::query::NotesQueryClient;
use std::cell::RefCell;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

/// Id of the `<script type="application/json">` element carrying a
/// prerendered cache snapshot.
pub(crate) const STATE_SCRIPT_ID: &str = "__NOTES_STATE__";

pub(crate) type NotesSnapshot = DehydratedState<NotesKey, NotesPage>;

pub(crate) fn parse_snapshot(json: &str) -> Option<NotesSnapshot> {
    let json = json.trim();
    if json.is_empty() {
        return None;
    }
    match serde_json::from_str(json) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed cache snapshot");
            None
        }
    }
}

thread_local! {
    static SNAPSHOT_SOURCE: RefCell<Option<NotesQueryClient>> = const { RefCell::new(None) };
}

/// Registers the listing cache that [`notes_state_script`] exports.
pub(crate) fn register_snapshot_source(client: NotesQueryClient) {
    SNAPSHOT_SOURCE.with(|s| *s.borrow_mut() = Some(client));
}

/// Script tag carrying the current listing cache, or `None` before the app
/// has mounted. A prerender step calls this once the page has settled and
/// embeds the result in the served HTML.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen(js_name = notesStateScript))]
pub fn notes_state_script() -> Option<String> {
    let state = SNAPSHOT_SOURCE.with(|s| s.borrow().as_ref().and_then(|c| c.dehydrate()))?;
    Some(render_state_script(&state))
}

/// Renders the snapshot as an inline script so it can be embedded in the
/// served HTML. `</` is escaped so note text cannot close the tag.
pub(crate) fn render_state_script(state: &NotesSnapshot) -> String {
    let json = serde_json::to_string(state)
        .unwrap_or_else(|_| r#"{"queries":[]}"#.to_string())
        .replace("</", "<\\/");
    format!(r#"<script id="{STATE_SCRIPT_ID}" type="application/json">{json}</script>"#)
}

/// Reads and removes the snapshot embedded in the current document.
///
/// Removing it makes the handoff one-shot: a client-side navigation back to
/// the page goes through the cache instead of replaying old data.
pub(crate) fn take_document_snapshot() -> Option<NotesSnapshot> {
    let document = web_sys::window()?.document()?;
    let el = document.get_element_by_id(STATE_SCRIPT_ID)?;
    let text = el.text_content().unwrap_or_default();
    el.remove();
    parse_snapshot(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Note, NoteTag};
    use crate::query::cache::DehydratedQuery;

    fn snapshot_with(content: &str) -> NotesSnapshot {
        DehydratedState {
            queries: vec![DehydratedQuery {
                key: NotesKey::first_page(Some(NoteTag::Meeting)),
                data: NotesPage {
                    notes: vec![Note {
                        id: "1".to_string(),
                        title: "Standup".to_string(),
                        content: content.to_string(),
                        tag: NoteTag::Meeting,
                        created_at: String::new(),
                        updated_at: String::new(),
                    }],
                    total_pages: 1,
                },
                updated_ms: 42,
            }],
        }
    }

    #[test]
    fn test_state_script_escapes_closing_tags() {
        let html = render_state_script(&snapshot_with("</script><b>"));
        assert!(html.starts_with(r#"<script id="__NOTES_STATE__""#));
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_state_script_body_parses_back() {
        let state = snapshot_with("</script>");
        let html = render_state_script(&state);
        let start = html.find('>').expect("open tag") + 1;
        let end = html.rfind("</script>").expect("close tag");
        let parsed = parse_snapshot(&html[start..end]).expect("should parse");
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_exported_script_reflects_registered_cache() {
        use crate::query::QueryFuture;
        use leptos::prelude::Owner;
        use std::sync::Arc;

        Owner::new().with(|| {
            let client = NotesQueryClient::new(
                60_000,
                Arc::new(|_key: NotesKey| -> QueryFuture<NotesPage> {
                    Box::pin(async { Ok(NotesPage::default()) })
                }),
            );
            client.hydrate_at(snapshot_with("standup notes"), 100);
            register_snapshot_source(client);

            let html = notes_state_script().expect("registered cache");
            let start = html.find('>').expect("open tag") + 1;
            let end = html.rfind("</script>").expect("close tag");
            let parsed = parse_snapshot(&html[start..end]).expect("should parse");
            assert_eq!(parsed.queries.len(), 1);
            assert_eq!(parsed.queries[0].data.notes[0].content, "standup notes");
        });
    }

    #[test]
    fn test_parse_snapshot_rejects_garbage() {
        assert!(parse_snapshot("").is_none());
        assert!(parse_snapshot("{not json").is_none());
    }
}
