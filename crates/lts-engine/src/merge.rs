//! Substitution of values and variable tokens into annotated text.
//!
//! Replacements are keyed by marker id or by an exact span, never by
//! searching for text, so applying them cannot corrupt later offsets.
//! Every replacement is resolved against the input first, then the output is
//! rebuilt in a single left-to-right pass; the result does not depend on the
//! order replacements are given in.
//!
//! A substituted marker stays in the output as a resolved marker. Applying
//! the same replacements again is then a no-op for that marker, while an id
//! that is not in the text at all is reported as stale.

use std::collections::HashMap;

use lts_model::{PlaceholderId, VariableName, VariableSuggestion};

use crate::error::{EngineError, Result};
use crate::mapping::Binding;
use crate::markers::{self, Marker, MarkerState};
use crate::tokens::extract_variables;

/// What a replacement puts in place of its target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Literal text.
    Value(String),
    /// A `{{name}}` token.
    Variable(VariableName),
}

impl Content {
    pub fn value(text: impl Into<String>) -> Self {
        Self::Value(text.into())
    }

    /// A variable token; fails when `name` is not a valid variable name.
    pub fn variable(name: impl Into<String>) -> Result<Self> {
        Ok(Self::Variable(VariableName::new(name)?))
    }

    fn render(&self) -> Result<String> {
        match self {
            Self::Value(text) if text.contains(markers::CLOSE) => {
                Err(EngineError::MarkupInValue {
                    value: text.clone(),
                })
            }
            Self::Value(text) => Ok(text.clone()),
            Self::Variable(name) => Ok(name.token()),
        }
    }
}

/// One accepted substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Replace the pending marker with this id.
    Marker { id: PlaceholderId, content: Content },
    /// Replace the byte span `start..end`, which must still read `expected`.
    Span {
        start: usize,
        end: usize,
        expected: String,
        content: Content,
    },
}

/// How bindings are substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeMode {
    /// Literal computed values.
    #[default]
    Fill,
    /// `{{variable}}` tokens named after the bound fields.
    Templatize,
}

/// Result of a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutput {
    /// Annotated text with resolved markers.
    pub text: String,
    /// Variable names present in `text`, de-duplicated in first-seen order.
    pub variable_names: Vec<String>,
}

impl MergeOutput {
    /// `text` with every marker unwrapped, for rendering.
    pub fn plain_text(&self) -> String {
        markers::strip(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

/// Applies `replacements` to `annotated`.
///
/// # Errors
///
/// - [`EngineError::MarkupInValue`] when a value contains a marker close tag
/// - [`EngineError::StaleMarker`] when a marker id is not in the text
/// - [`EngineError::SpanMismatch`] when a span no longer reads as expected
/// - [`EngineError::OverlappingReplacement`] when two targets intersect, or
///   a span cuts into a marker
pub fn apply(annotated: &str, replacements: &[Replacement]) -> Result<MergeOutput> {
    let found = markers::parse(annotated);
    let by_id: HashMap<&PlaceholderId, &Marker> =
        found.iter().map(|marker| (&marker.id, marker)).collect();

    let mut edits = Vec::with_capacity(replacements.len());
    let mut skipped = 0usize;
    for replacement in replacements {
        match replacement {
            Replacement::Marker { id, content } => {
                let marker = by_id
                    .get(id)
                    .ok_or_else(|| EngineError::StaleMarker { id: id.clone() })?;
                if marker.state == MarkerState::Resolved {
                    skipped += 1;
                    continue;
                }
                edits.push(Edit {
                    start: marker.start,
                    end: marker.end,
                    text: markers::resolved(id, &content.render()?),
                });
            }
            Replacement::Span {
                start,
                end,
                expected,
                content,
            } => {
                let actual = annotated.get(*start..*end).unwrap_or_default();
                if start > end || actual != expected {
                    return Err(EngineError::SpanMismatch {
                        start: *start,
                        expected: expected.clone(),
                        found: actual.to_string(),
                    });
                }
                if let Some(marker) = found
                    .iter()
                    .find(|marker| *start < marker.end && marker.start < *end)
                {
                    return Err(EngineError::OverlappingReplacement {
                        first: (marker.start, marker.end),
                        second: (*start, *end),
                    });
                }
                edits.push(Edit {
                    start: *start,
                    end: *end,
                    text: content.render()?,
                });
            }
        }
    }

    edits.sort();
    edits.dedup();
    for pair in edits.windows(2) {
        if pair[0].end > pair[1].start || pair[0].start == pair[1].start {
            return Err(EngineError::OverlappingReplacement {
                first: (pair[0].start, pair[0].end),
                second: (pair[1].start, pair[1].end),
            });
        }
    }

    let mut text = String::with_capacity(annotated.len());
    let mut cursor = 0;
    for edit in &edits {
        text.push_str(&annotated[cursor..edit.start]);
        text.push_str(&edit.text);
        cursor = edit.end;
    }
    text.push_str(&annotated[cursor..]);

    tracing::debug!(applied = edits.len(), skipped, "merged replacements");

    let variable_names = extract_variables(&text);
    Ok(MergeOutput {
        text,
        variable_names,
    })
}

/// Substitutes every binding into its marker.
pub fn apply_bindings(annotated: &str, bindings: &[Binding], mode: MergeMode) -> Result<MergeOutput> {
    let replacements = bindings
        .iter()
        .map(|binding| {
            let content = match mode {
                MergeMode::Fill => Content::value(binding.value.clone()),
                MergeMode::Templatize => Content::variable(binding.variable_name())?,
            };
            Ok(Replacement::Marker {
                id: binding.placeholder.clone(),
                content,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    apply(annotated, &replacements)
}

/// Replaces each accepted suggestion's span with its variable token.
pub fn apply_suggestions(annotated: &str, accepted: &[VariableSuggestion]) -> Result<MergeOutput> {
    let replacements = accepted
        .iter()
        .map(|suggestion| {
            Ok(Replacement::Span {
                start: suggestion.start,
                end: suggestion.end,
                expected: suggestion.original_text.clone(),
                content: Content::variable(suggestion.variable_name.clone())?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    apply(annotated, &replacements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::tag;

    #[test]
    fn marker_replacement_keeps_a_resolved_marker() {
        let doc = tag("Tenant: ..... pays");
        let id = doc.placeholders[0].id.clone();
        let out = apply(
            &doc.annotated_text,
            &[Replacement::Marker {
                id: id.clone(),
                content: Content::value("Jane Byrne"),
            }],
        )
        .unwrap();
        assert_eq!(out.plain_text(), "Tenant: Jane Byrne pays");
        assert_eq!(out.text, format!("Tenant: {} pays", markers::resolved(&id, "Jane Byrne")));
        assert!(out.variable_names.is_empty());
    }

    #[test]
    fn values_with_marker_markup_are_rejected() {
        let doc = tag("Tenant: ..... pays");
        let id = doc.placeholders[0].id.clone();
        let err = apply(
            &doc.annotated_text,
            &[Replacement::Marker {
                id,
                content: Content::value("Acme </span> Ltd"),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::MarkupInValue { ref value } if value == "Acme </span> Ltd"));
        assert!(err.is_recoverable());

        let err = apply(
            "Rent is EUR 100",
            &[Replacement::Span {
                start: 8,
                end: 15,
                expected: "EUR 100".to_string(),
                content: Content::value("</span>"),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::MarkupInValue { .. }));
    }

    #[test]
    fn empty_replacement_list_is_identity() {
        let doc = tag("A ..... B");
        let out = apply(&doc.annotated_text, &[]).unwrap();
        assert_eq!(out.text, doc.annotated_text);
    }

    #[test]
    fn span_must_match_expected_text() {
        let err = apply(
            "Rent is EUR 100",
            &[Replacement::Span {
                start: 8,
                end: 15,
                expected: "EUR 200".to_string(),
                content: Content::variable("rent").unwrap(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::SpanMismatch { start: 8, .. }));

        let err = apply(
            "short",
            &[Replacement::Span {
                start: 2,
                end: 40,
                expected: "ort".to_string(),
                content: Content::value("x"),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::SpanMismatch { .. }));
    }

    #[test]
    fn span_into_a_marker_is_rejected() {
        let doc = tag("Ref ..... end");
        let start = doc.annotated_text.find("....").unwrap();
        let err = apply(
            &doc.annotated_text,
            &[Replacement::Span {
                start,
                end: start + 4,
                expected: "....".to_string(),
                content: Content::value("x"),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::OverlappingReplacement { .. }));
    }

    #[test]
    fn conflicting_replacements_for_one_marker_are_rejected() {
        let doc = tag("X .....");
        let id = doc.placeholders[0].id.clone();
        let replacements = [
            Replacement::Marker {
                id: id.clone(),
                content: Content::value("a"),
            },
            Replacement::Marker {
                id: id.clone(),
                content: Content::value("b"),
            },
        ];
        assert!(matches!(
            apply(&doc.annotated_text, &replacements),
            Err(EngineError::OverlappingReplacement { .. })
        ));

        let same = [replacements[0].clone(), replacements[0].clone()];
        assert!(apply(&doc.annotated_text, &same).is_ok());
    }

    #[test]
    fn invalid_variable_names_are_rejected() {
        assert!(matches!(
            Content::variable("2nd rent"),
            Err(EngineError::Model(_))
        ));
    }
}
