//! Confidence banding for suggestions.
//!
//! Scores are heuristic. Bands drive presentation only; filtering uses
//! `min_confidence` from the engine configuration.

use serde::{Deserialize, Serialize};

/// Confidence level categories for suggestion quality.
///
/// - `High`: values whose shape is unambiguous (valid dates, currency amounts)
/// - `Medium`: plausible matches that should be reviewed
/// - `Low`: weak matches requiring manual confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Returns a human-readable description of the confidence level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
        }
    }
}

/// Boundaries between confidence levels.
///
/// - At or above `high`: [`ConfidenceLevel::High`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - Below `medium`: [`ConfidenceLevel::Low`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    /// Minimum confidence for high-quality matches (default: 0.80).
    pub high: f32,
    /// Minimum confidence for medium-quality matches (default: 0.60).
    pub medium: f32,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.8,
            medium: 0.6,
        }
    }
}

impl ConfidenceThresholds {
    /// Categorizes a confidence score into a confidence level.
    #[must_use]
    pub fn categorize(&self, confidence: f32) -> ConfidenceLevel {
        if confidence >= self.high {
            ConfidenceLevel::High
        } else if confidence >= self.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}
