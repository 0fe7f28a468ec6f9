//! Field mapping descriptors.
//!
//! A template family owns an ordered sequence of [`FieldMapping`]s. The
//! placeholder at document order `k` binds to the mapping with `order == k`.
//! Value computation is described by [`ValueRule`] so tables can be loaded
//! from configuration as well as declared in code.

use serde::{Deserialize, Serialize};

use crate::placeholder::Category;

/// Where a mapped value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRef {
    /// A key of the caller's data record.
    Named(String),
    /// A value derived by the rule rather than read directly.
    Calculated,
}

impl FieldRef {
    pub fn named(key: impl Into<String>) -> Self {
        Self::Named(key.into())
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Named(key) => Some(key),
            Self::Calculated => None,
        }
    }
}

/// Output style for date values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStyle {
    /// `16th day of October 2026`
    #[default]
    Deed,
    /// `16 October 2026`
    Long,
    /// `2026-10-16`
    Iso,
}

/// Pure computation of a mapped value from a data record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum ValueRule {
    /// The record value for `key`.
    Lookup { key: String },
    /// Non-empty values for `keys`, joined by `separator`.
    Join { keys: Vec<String>, separator: String },
    /// The evaluation date.
    Today {
        #[serde(default)]
        style: DateStyle,
    },
    /// A date held in the record, reformatted.
    Date {
        key: String,
        #[serde(default)]
        style: DateStyle,
    },
    /// A numeric amount with thousands separators and currency suffix.
    Currency { key: String },
    /// Annual rent for `year` of the term, escalated yearly by `rentEscalation` percent.
    YearlyRent { year: u32 },
    /// Fixed text.
    Literal { text: String },
}

impl ValueRule {
    pub fn lookup(key: impl Into<String>) -> Self {
        Self::Lookup { key: key.into() }
    }

    pub fn date(key: impl Into<String>, style: DateStyle) -> Self {
        Self::Date {
            key: key.into(),
            style,
        }
    }

    pub fn currency(key: impl Into<String>) -> Self {
        Self::Currency { key: key.into() }
    }

    pub fn join(keys: &[&str], separator: &str) -> Self {
        Self::Join {
            keys: keys.iter().map(|key| (*key).to_string()).collect(),
            separator: separator.to_string(),
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal { text: text.into() }
    }
}

/// One entry of a family's ordered field table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// 1-based position the entry binds to.
    pub order: u32,
    /// Text the blank usually sits next to; diagnostics only.
    #[serde(default)]
    pub pattern: String,
    pub description: String,
    pub field: FieldRef,
    pub rule: ValueRule,
    #[serde(default)]
    pub category: Category,
}

impl FieldMapping {
    /// Bracketed label shown when the value cannot be computed.
    pub fn missing_label(&self) -> String {
        format!("[{}]", self.description)
    }
}
