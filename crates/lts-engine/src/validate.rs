//! Completeness checks before document generation.

use std::collections::HashSet;

use lts_model::{DataRecord, Placeholder, TemplateFamily, ValidationResult};

use crate::mapping::MappingRegistry;
use crate::tokens::extract_variables;

/// Valid iff every placeholder is filled with a non-blank value.
///
/// `missing_fields` lists the descriptions of the others in document order.
pub fn validate(placeholders: &[Placeholder]) -> ValidationResult {
    let missing_fields: Vec<String> = placeholders
        .iter()
        .filter(|placeholder| !placeholder.is_complete())
        .map(|placeholder| placeholder.description.clone())
        .collect();
    ValidationResult {
        is_valid: missing_fields.is_empty(),
        missing_fields,
        ..ValidationResult::default()
    }
}

/// Checks that every `{{name}}` token in `text` has a non-blank value.
pub fn validate_variables(text: &str, values: &DataRecord) -> ValidationResult {
    let found_variables = extract_variables(text);
    let unmapped_variables: Vec<String> = found_variables
        .iter()
        .filter(|name| !values.contains(name))
        .cloned()
        .collect();
    ValidationResult {
        is_valid: unmapped_variables.is_empty(),
        missing_fields: Vec::new(),
        found_variables,
        unmapped_variables,
    }
}

/// Like [`validate`], also reporting `family` fields that no placeholder
/// reaches because the document has fewer blanks than the table.
pub fn validate_family(
    placeholders: &[Placeholder],
    family: TemplateFamily,
    registry: &MappingRegistry,
) -> ValidationResult {
    let mut result = validate(placeholders);
    let orders: HashSet<u32> = placeholders.iter().map(|placeholder| placeholder.order).collect();
    let unreached: Vec<String> = registry
        .table(family)
        .iter()
        .filter(|mapping| !orders.contains(&mapping.order))
        .map(|mapping| format!("{} (no matching blank)", mapping.description))
        .collect();
    if !unreached.is_empty() {
        tracing::warn!(
            family = %family,
            unreached = unreached.len(),
            "document has fewer blanks than the family table"
        );
        result.missing_fields.extend(unreached);
        result.is_valid = false;
    }
    result
}
