use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Name usable inside a `{{...}}` variable token.
///
/// Must start with a letter or `_` and contain only ASCII letters, digits,
/// `_` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariableName(String);

impl VariableName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        let mut chars = trimmed.chars();
        let valid_start = chars
            .next()
            .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_');
        let valid_rest = chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.');
        if !valid_start || !valid_rest {
            return Err(ModelError::InvalidVariableName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `{{name}}` token form.
    pub fn token(&self) -> String {
        format!("{{{{{}}}}}", self.0)
    }
}

impl fmt::Display for VariableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for VariableName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<VariableName> for String {
    fn from(name: VariableName) -> Self {
        name.0
    }
}
