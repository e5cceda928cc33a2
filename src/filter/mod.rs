use crate::models::NoteTag;
use std::str::FromStr;

pub(crate) const FILTER_PREFIX: &str = "/notes/filter";
pub(crate) const ALL_SEGMENT: &str = "all";

/// Resolves the first path segment after `/notes/filter` into a tag filter.
///
/// Absent, `all`, and unknown values all mean "no tag". Unknown values are
/// dropped silently instead of producing a not-found page.
pub(crate) fn resolve_tag(segment: Option<&str>) -> Option<NoteTag> {
    let raw = segment.map(str::trim).filter(|s| !s.is_empty())?;
    if raw == ALL_SEGMENT {
        return None;
    }
    NoteTag::from_str(raw).ok()
}

/// First segment of a wildcard capture such as `Meeting/extra`.
pub(crate) fn first_segment(slug: &str) -> Option<&str> {
    slug.split('/').find(|s| !s.is_empty())
}

pub(crate) fn filter_path(tag: Option<NoteTag>) -> String {
    match tag {
        Some(t) => format!("{FILTER_PREFIX}/{t}"),
        None => format!("{FILTER_PREFIX}/{ALL_SEGMENT}"),
    }
}
