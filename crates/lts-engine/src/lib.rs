//! Placeholder detection, classification and variable substitution for
//! legal document templates.
//!
//! - **Scanning** (`scan`): blank-indicator runs (dots, ellipses, underscores, dashes)
//! - **Tagging** (`tag`): inert, uniquely identified markers around each blank
//! - **Classification** (`classify`): keyword signatures to template families
//! - **Mapping** (`mapping`): ordered per-family field tables and value rules
//! - **Suggestions** (`suggest`): variables proposed for values in filled text
//! - **Merging** (`merge`): id- and span-keyed substitution of values or `{{tokens}}`
//! - **Validation** (`validate`): unfilled placeholders and unmapped variables
//!
//! # Error Handling
//!
//! All fallible operations return the unified [`EngineError`]. Missing data
//! and unrecognized documents are not errors; they show up as bracketed
//! labels, `None` families and missing-field lists.
//!
//! # Example
//!
//! ```
//! use lts_engine::{DataRecord, FieldMapper, MergeMode, apply_bindings, classify, tag, validate};
//!
//! let doc = tag("AGREEMENT TO LEASE. Landlord: ..........");
//! let family = classify(&doc.source_text);
//! let record = DataRecord::new().with("landlordName", "Acme Ltd");
//!
//! let mut placeholders = doc.placeholders.clone();
//! let mapper = FieldMapper::default();
//! let bindings = mapper.fill_placeholders(&mut placeholders, family, &record);
//! let merged = apply_bindings(&doc.annotated_text, &bindings, MergeMode::Fill)?;
//!
//! assert_eq!(merged.plain_text(), "AGREEMENT TO LEASE. Landlord: Acme Ltd");
//! assert!(validate(&placeholders).is_valid);
//! # Ok::<(), lts_engine::EngineError>(())
//! ```

#![deny(unsafe_code)]

pub mod classify;
pub mod config;
pub mod error;
pub mod mapping;
pub mod markers;
pub mod merge;
pub mod scan;
pub mod suggest;
pub mod tag;
pub mod tokens;
pub mod utils;
pub mod validate;

// Re-export unified error type
pub use error::{EngineError, Result};

// Re-export the data model
pub use lts_model::{
    Category, DataRecord, DateStyle, DocumentAnalysis, FieldMapping, FieldRef, Placeholder,
    PlaceholderId, ScanId, TemplateFamily, ValidationResult, ValueRule, VariableName,
    VariableSuggestion,
};

pub use classify::{classify, classify_all};
pub use config::EngineConfig;
pub use mapping::{Binding, FieldMapper, MappingRegistry};
pub use merge::{Content, MergeMode, MergeOutput, Replacement, apply, apply_bindings, apply_suggestions};
pub use scan::{BlankKind, BlankMatch, scan};
pub use suggest::{ConfidenceLevel, ConfidenceThresholds, SuggestionEngine};
pub use tag::{TaggedDocument, tag};
pub use tokens::extract_variables;
pub use validate::{validate, validate_family, validate_variables};

/// Analyzes `text` with the default configuration and built-in tables.
pub fn analyze(text: &str) -> Result<DocumentAnalysis> {
    SuggestionEngine::default().analyze(text)
}
