//! Engine configuration.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::mapping::DEFAULT_CURRENCY;
use crate::suggest::ConfidenceThresholds;

/// Upper bound on the context preview window, in characters per side.
pub const MAX_CONTEXT_WINDOW: usize = 200;

/// Tunables shared by the suggestion engine and the field mapper.
///
/// Every field has a default, so a partial TOML file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Characters of context on each side of a suggestion preview.
    pub context_window: usize,
    /// Suggestions scoring below this are dropped.
    pub min_confidence: f32,
    /// Presentation bands for suggestion confidence.
    pub thresholds: ConfidenceThresholds,
    /// Currency suffix when the data record has no `currency` value.
    pub currency: String,
    /// Fixed evaluation date for `today` rules; local today when unset.
    pub today: Option<NaiveDate>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            context_window: 40,
            min_confidence: 0.0,
            thresholds: ConfidenceThresholds::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            today: None,
        }
    }
}

impl EngineConfig {
    /// The context window, capped at [`MAX_CONTEXT_WINDOW`].
    pub fn effective_context_window(&self) -> usize {
        self.context_window.min(MAX_CONTEXT_WINDOW)
    }

    pub fn evaluation_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
