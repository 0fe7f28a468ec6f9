//! Suggestion engine.
//!
//! Analyzes a document in one pass: tags blanks, classifies the family and
//! proposes variables for recognizable values in the filled-in text.
//! Suggestion spans index the annotated text so accepted suggestions can be
//! merged directly.

mod confidence;
mod naming;
mod recognizers;

use lts_model::{DocumentAnalysis, VariableSuggestion};

use crate::classify::classify;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::mapping::MappingRegistry;
use crate::scan::Claims;
use crate::tag::{TaggedDocument, tag};
use crate::utils::context_preview;

pub use confidence::{ConfidenceLevel, ConfidenceThresholds};

use naming::{LABEL_MATCH_BOOST, NameAllocator, Vocabulary, base_name, preceding_label};
use recognizers::Recognizer;

/// Proposes variables for values found in document text.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    config: EngineConfig,
    vocabulary: Vocabulary,
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SuggestionEngine {
    /// Creates an engine naming variables after the built-in field vocabulary.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registry(config, MappingRegistry::builtin())
    }

    /// Creates an engine naming variables after `registry`'s named fields.
    pub fn with_registry(config: EngineConfig, registry: &MappingRegistry) -> Self {
        Self {
            config,
            vocabulary: Vocabulary::new(registry.vocabulary()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Confidence band of a suggestion under the configured thresholds.
    pub fn level(&self, suggestion: &VariableSuggestion) -> ConfidenceLevel {
        self.config.thresholds.categorize(suggestion.confidence)
    }

    /// Tags, classifies and suggests over `text`.
    ///
    /// Fails with [`EngineError::EmptyDocument`] on blank input; a document
    /// with nothing to report is a successful, empty analysis.
    pub fn analyze(&self, text: &str) -> Result<DocumentAnalysis> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyDocument);
        }
        let doc = tag(text);
        let family = classify(&doc.source_text);
        let suggestions = self.suggest(&doc);

        tracing::debug!(
            placeholders = doc.placeholders.len(),
            suggestions = suggestions.len(),
            family = ?family,
            "analyzed document"
        );

        Ok(DocumentAnalysis {
            annotated_text: doc.annotated_text,
            family,
            placeholders: doc.placeholders,
            suggestions,
        })
    }

    /// Suggestions for the filled-in text of a tagged document, in
    /// document order. Blank regions are never suggested.
    pub fn suggest(&self, doc: &TaggedDocument) -> Vec<VariableSuggestion> {
        let text = doc.source_text.as_str();
        let window = self.config.effective_context_window();

        let mut claims = Claims::default();
        for range in doc.blank_ranges() {
            claims.claim(range);
        }

        let mut hits = Vec::new();
        for recognizer in Recognizer::PRECEDENCE {
            let found: Vec<_> = claims
                .find_unclaimed(text, recognizer.regex(), |_, _| true)
                .into_iter()
                .filter_map(|range| recognizer.refine(text, range))
                .collect();
            for range in found {
                tracing::trace!(recognizer = ?recognizer, start = range.start, end = range.end, "value recognized");
                claims.claim(range.clone());
                hits.push((recognizer, range));
            }
        }
        hits.sort_by_key(|(_, range)| range.start);

        let mut names = NameAllocator::default();
        let mut suggestions = Vec::with_capacity(hits.len());
        let mut label_floor = 0;
        for (recognizer, range) in hits {
            let region_start = label_floor.max(window_start(text, range.start, window));
            let label = preceding_label(&text[region_start..range.start]);
            label_floor = range.end;

            let category = recognizer.category();
            let (base, label_match) = base_name(label.as_deref(), &self.vocabulary, category);
            let original_text = text[range.clone()].to_string();

            let mut confidence = recognizer.confidence();
            let mut reason = recognizer.reason().to_string();
            match (&label, &label_match) {
                (Some(label), Some(found)) => {
                    confidence = (confidence * LABEL_MATCH_BOOST).min(1.0);
                    reason.push_str(&format!("; label '{label}' matches field {}", found.key));
                }
                (Some(label), None) => reason.push_str(&format!("; labelled '{label}'")),
                _ => {}
            }
            if confidence < self.config.min_confidence {
                continue;
            }

            let start = doc.annotated_offset(range.start);
            suggestions.push(VariableSuggestion {
                variable_name: names.allocate(&base, &original_text),
                category,
                confidence,
                reason,
                context_preview: context_preview(text, range.start, range.end, window),
                start,
                end: start + original_text.len(),
                original_text,
            });
        }
        suggestions
    }
}

/// Byte offset `window` characters before `offset`.
fn window_start(text: &str, offset: usize, window: usize) -> usize {
    text[..offset]
        .char_indices()
        .rev()
        .nth(window.saturating_sub(1))
        .map_or(0, |(idx, _)| idx)
}
