use serde::{Deserialize, Serialize};

/// Outcome of a completeness check before document generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Descriptions of unfilled placeholders, in document order.
    pub missing_fields: Vec<String>,
    /// `{{name}}` tokens found in the text, in first-seen order.
    pub found_variables: Vec<String>,
    /// Found tokens with no value available.
    pub unmapped_variables: Vec<String>,
}

impl ValidationResult {
    pub fn missing_count(&self) -> usize {
        self.missing_fields.len() + self.unmapped_variables.len()
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        if self.is_valid {
            return "all fields filled".to_string();
        }
        let mut parts = Vec::new();
        if !self.missing_fields.is_empty() {
            parts.push(format!("{} unfilled placeholder(s)", self.missing_fields.len()));
        }
        if !self.unmapped_variables.is_empty() {
            parts.push(format!(
                "{} variable(s) without a value",
                self.unmapped_variables.len()
            ));
        }
        parts.join(", ")
    }
}
