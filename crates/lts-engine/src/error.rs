//! Unified error type for the engine.
//!
//! Only input errors and caller-state corruption surface here. Missing data
//! and unrecognized documents are reported as data (bracketed labels,
//! `None` families, missing-field lists), never as errors.

use lts_model::{ModelError, PlaceholderId};
use thiserror::Error;

/// Errors raised by engine operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    // =========================================================================
    // INPUT ERRORS
    // =========================================================================
    /// Analysis was asked to run over empty or whitespace-only text.
    #[error("Document text is empty")]
    EmptyDocument,

    /// A substituted value contains the marker close tag.
    #[error("Value {value:?} contains marker markup")]
    MarkupInValue {
        /// The rejected value.
        value: String,
    },

    // =========================================================================
    // CORRUPTION
    // =========================================================================
    /// A replacement names a marker that the annotated text does not contain.
    #[error("Placeholder marker '{id}' not found in the annotated text")]
    StaleMarker {
        /// The id the caller referenced.
        id: PlaceholderId,
    },

    /// A span replacement no longer matches the text it was computed for.
    #[error("Text at offset {start} is {found:?}, expected {expected:?}")]
    SpanMismatch {
        /// Byte offset of the span.
        start: usize,
        /// Text the caller expected at the span.
        expected: String,
        /// Text actually present (empty when out of bounds).
        found: String,
    },

    /// Two replacements target intersecting regions.
    #[error("Replacements overlap at bytes {first:?} and {second:?}")]
    OverlappingReplacement {
        /// Byte range of the earlier replacement.
        first: (usize, usize),
        /// Byte range of the later replacement.
        second: (usize, usize),
    },

    // =========================================================================
    // CONFIGURATION
    // =========================================================================
    /// A field mapping table violates the registry invariants.
    #[error("Invalid mapping registry: {message}")]
    InvalidRegistry {
        /// Description of the violation.
        message: String,
    },

    // =========================================================================
    // WRAPPED ERRORS
    // =========================================================================
    /// Invalid model value (family key, variable name, id).
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Malformed JSON configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub(crate) fn invalid_registry(message: impl Into<String>) -> Self {
        Self::InvalidRegistry {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable (user can fix input and retry).
    ///
    /// Corruption errors mean the caller's annotated text and ids are out of
    /// sync; the caller must re-tag before retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::EmptyDocument
                | Self::MarkupInValue { .. }
                | Self::InvalidRegistry { .. }
                | Self::Model(_)
                | Self::Json(_)
        )
    }

    /// Get a user-friendly suggestion for fixing this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::EmptyDocument => Some("Provide document text containing at least one word."),
            Self::MarkupInValue { .. } => {
                Some("Remove `</span>` from the value before substituting it.")
            }
            Self::StaleMarker { .. } => {
                Some("Re-analyze the document and rebuild bindings from the new placeholders.")
            }
            Self::SpanMismatch { .. } => {
                Some("The text changed since it was analyzed; run the analysis again.")
            }
            Self::OverlappingReplacement { .. } => {
                Some("Accept only one suggestion or binding per region of text.")
            }
            Self::InvalidRegistry { .. } => {
                Some("Field orders must start at 1 and increase strictly within each family.")
            }
            _ => None,
        }
    }
}
