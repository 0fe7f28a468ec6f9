//! Placeholder records produced by the tagger.
//!
//! A placeholder is a detected blank region in document markup. Its identity
//! is tied to the tag pass that produced it: [`PlaceholderId`] pairs the
//! fingerprint of the scanned text with the placeholder's document order, so
//! ids are deterministic for a given text and detectably stale for any other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Semantic category of a placeholder or suggestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Date,
    Name,
    Amount,
    Location,
    Reference,
    Address,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Date,
        Category::Name,
        Category::Amount,
        Category::Location,
        Category::Reference,
        Category::Address,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Name => "name",
            Self::Amount => "amount",
            Self::Location => "location",
            Self::Reference => "reference",
            Self::Address => "address",
            Self::Other => "other",
        }
    }

    /// Variable name used when nothing better is known about a value.
    pub fn default_variable_name(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Name => "party_name",
            Self::Amount => "amount",
            Self::Location => "location",
            Self::Reference => "reference",
            Self::Address => "address",
            Self::Other => "value",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fingerprint of the text a tag pass ran over.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScanId(String);

impl ScanId {
    /// Wraps an already computed fingerprint (lowercase hex).
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        if value.is_empty() || !value.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(ModelError::InvalidPlaceholderId(value));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a placeholder within one tag pass.
///
/// Rendered as `<scan>-<index>`; `index` is the 1-based document order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceholderId {
    scan: ScanId,
    index: u32,
}

impl PlaceholderId {
    pub fn new(scan: ScanId, index: u32) -> Self {
        Self { scan, index }
    }

    pub fn scan(&self) -> &ScanId {
        &self.scan
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.scan, self.index)
    }
}

impl FromStr for PlaceholderId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ModelError::InvalidPlaceholderId(s.to_string());
        let (scan, index) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let index: u32 = index.parse().map_err(|_| invalid())?;
        if index == 0 {
            return Err(invalid());
        }
        let scan = ScanId::new(scan).map_err(|_| invalid())?;
        Ok(Self { scan, index })
    }
}

impl TryFrom<String> for PlaceholderId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PlaceholderId> for String {
    fn from(id: PlaceholderId) -> Self {
        id.to_string()
    }
}

/// A detected blank region in a document buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: PlaceholderId,
    /// Byte offset of the blank in the un-annotated source text.
    pub position: usize,
    /// Effective blank length, clamped to `[3, 50]`.
    pub length: usize,
    pub original_text: String,
    /// 1-based document order.
    pub order: u32,
    pub category: Category,
    pub description: String,
    pub value: String,
    pub filled: bool,
}

impl Placeholder {
    /// True when the placeholder carries a usable value.
    pub fn is_complete(&self) -> bool {
        self.filled && !self.value.trim().is_empty()
    }
}
