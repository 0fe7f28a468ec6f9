//! Data model for Legal Template Studio.
//!
//! Plain, serializable types shared by the engine and its callers:
//! placeholders and their ids, template families, field mapping
//! descriptors, data records, suggestions and validation results.

#![deny(unsafe_code)]

pub mod error;
pub mod family;
pub mod mapping;
pub mod placeholder;
pub mod record;
pub mod suggestion;
pub mod validation;
pub mod variable;

pub use error::{ModelError, Result};
pub use family::TemplateFamily;
pub use mapping::{DateStyle, FieldMapping, FieldRef, ValueRule};
pub use placeholder::{Category, Placeholder, PlaceholderId, ScanId};
pub use record::DataRecord;
pub use suggestion::{DocumentAnalysis, VariableSuggestion};
pub use validation::ValidationResult;
pub use variable::VariableName;
