//! Suggestion and analysis output types.

use serde::{Deserialize, Serialize};

use crate::family::TemplateFamily;
use crate::placeholder::{Category, Placeholder};

/// A proposed variable for a value recognized in already-filled text.
///
/// Suggestions are advisory until the caller accepts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSuggestion {
    pub original_text: String,
    pub variable_name: String,
    pub category: Category,
    /// Heuristic score in `[0, 1]`.
    pub confidence: f32,
    pub reason: String,
    pub context_preview: String,
    /// Byte span of `original_text` in the analyzed text.
    pub start: usize,
    pub end: usize,
}

/// Result of one analysis pass over one document buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// The input with every blank wrapped in a placeholder marker.
    pub annotated_text: String,
    pub family: Option<TemplateFamily>,
    pub placeholders: Vec<Placeholder>,
    pub suggestions: Vec<VariableSuggestion>,
}

impl DocumentAnalysis {
    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty() && self.suggestions.is_empty()
    }
}
