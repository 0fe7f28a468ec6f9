//! Inert placeholder markers embedded in annotated markup.
//!
//! A pending marker wraps the original blank:
//! `<span data-ph="<id>" data-len="<n>">.....</span>`.
//! A resolved marker wraps the substituted content:
//! `<span data-ph="<id>" data-resolved="1">Acme Ltd</span>`.
//!
//! Marker bodies are inserted verbatim. The merge rejects values containing
//! `</span>`, so a body never ends early.

use std::sync::LazyLock;

use lts_model::PlaceholderId;
use regex::Regex;

pub(crate) const CLOSE: &str = "</span>";

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)<span data-ph="(?P<id>[0-9a-f]+-[0-9]+)"(?: data-len="(?P<len>[0-9]+)")?(?P<resolved> data-resolved="1")?>(?P<body>.*?)</span>"#,
    )
    .expect("Invalid marker regex")
});

/// Whether a marker still awaits a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    Pending,
    Resolved,
}

/// A marker located in annotated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub id: PlaceholderId,
    pub state: MarkerState,
    /// Effective blank length, present on pending markers.
    pub length: Option<usize>,
    /// Original blank (pending) or substituted content (resolved).
    pub body: String,
    /// Byte range of the whole marker in the annotated text.
    pub start: usize,
    pub end: usize,
}

/// Renders a pending marker around `blank`.
pub fn pending(id: &PlaceholderId, length: usize, blank: &str) -> String {
    format!(r#"<span data-ph="{id}" data-len="{length}">{blank}{CLOSE}"#)
}

/// Renders a resolved marker around `content`.
pub fn resolved(id: &PlaceholderId, content: &str) -> String {
    format!(r#"<span data-ph="{id}" data-resolved="1">{content}{CLOSE}"#)
}

/// Locates every well-formed marker in `annotated`, in document order.
pub fn parse(annotated: &str) -> Vec<Marker> {
    MARKER
        .captures_iter(annotated)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let raw_id = caps.name("id")?.as_str();
            let id = match raw_id.parse::<PlaceholderId>() {
                Ok(id) => id,
                Err(error) => {
                    tracing::warn!(%error, "ignoring malformed placeholder marker");
                    return None;
                }
            };
            Some(Marker {
                id,
                state: if caps.name("resolved").is_some() {
                    MarkerState::Resolved
                } else {
                    MarkerState::Pending
                },
                length: caps.name("len").and_then(|m| m.as_str().parse().ok()),
                body: caps.name("body").map_or_else(String::new, |m| m.as_str().to_string()),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Replaces every marker with its body, yielding marker-free text.
pub fn strip(annotated: &str) -> String {
    MARKER.replace_all(annotated, "$body").into_owned()
}

/// True when `text` contains at least one marker.
pub fn contains_markers(text: &str) -> bool {
    MARKER.is_match(text)
}
