//! Registry of per-family field mapping tables.
//!
//! The built-in registry is cached using [`OnceLock`]. Additional or
//! overriding tables can be loaded from JSON and layered over it with
//! [`MappingRegistry::merged_with`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use lts_model::{Category, FieldMapping, TemplateFamily};

use crate::error::{EngineError, Result};

use super::builtin::build_builtin_tables;

static BUILTIN_REGISTRY: OnceLock<MappingRegistry> = OnceLock::new();

/// Immutable ordered field tables keyed by template family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingRegistry {
    tables: BTreeMap<TemplateFamily, Vec<FieldMapping>>,
}

impl MappingRegistry {
    /// A registry with no tables; every placeholder binds synthetically.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in tables for every known family.
    pub fn builtin() -> &'static MappingRegistry {
        BUILTIN_REGISTRY.get_or_init(|| Self {
            tables: build_builtin_tables(),
        })
    }

    /// Adds or replaces the table for `family`.
    ///
    /// Orders must start at 1 or above and strictly increase.
    pub fn insert(&mut self, family: TemplateFamily, table: Vec<FieldMapping>) -> Result<()> {
        validate_table(family, &table)?;
        if self.tables.insert(family, table).is_some() {
            tracing::debug!(family = %family, "replaced field mapping table");
        }
        Ok(())
    }

    /// Parses tables from a JSON object keyed by family key:
    ///
    /// ```json
    /// { "licence-agreement": [ { "order": 1, "description": "...", ... } ] }
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<FieldMapping>> = serde_json::from_str(json)?;
        let mut registry = Self::empty();
        for (key, table) in raw {
            let family: TemplateFamily = key.parse()?;
            registry.insert(family, table)?;
        }
        Ok(registry)
    }

    /// A copy of `self` with every table of `overrides` layered on top.
    #[must_use]
    pub fn merged_with(&self, overrides: &MappingRegistry) -> Self {
        let mut merged = self.clone();
        for (family, table) in &overrides.tables {
            merged.tables.insert(*family, table.clone());
        }
        merged
    }

    /// The table for `family`, empty when none is registered.
    pub fn table(&self, family: TemplateFamily) -> &[FieldMapping] {
        self.tables.get(&family).map_or(&[], Vec::as_slice)
    }

    /// The entry with `order` in the table for `family`.
    pub fn mapping(&self, family: TemplateFamily, order: u32) -> Option<&FieldMapping> {
        let table = self.table(family);
        table
            .binary_search_by_key(&order, |mapping| mapping.order)
            .ok()
            .map(|idx| &table[idx])
    }

    /// Families with a registered table, in priority order.
    pub fn families(&self) -> impl Iterator<Item = TemplateFamily> + '_ {
        self.tables.keys().copied()
    }

    /// Every named data field referenced by any table with the category of
    /// the blanks it fills, sorted.
    pub fn vocabulary(&self) -> Vec<(String, Category)> {
        let keys: BTreeSet<(&str, Category)> = self
            .tables
            .values()
            .flatten()
            .filter_map(|mapping| Some((mapping.field.key()?, mapping.category)))
            .collect();
        keys.into_iter()
            .map(|(key, category)| (key.to_string(), category))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Checks the strict ordering invariant of one family table.
pub(crate) fn validate_table(family: TemplateFamily, table: &[FieldMapping]) -> Result<()> {
    let mut previous = 0;
    for mapping in table {
        if mapping.order <= previous {
            return Err(EngineError::invalid_registry(format!(
                "{family}: order {} follows {previous}; orders must start at 1 and strictly increase",
                mapping.order
            )));
        }
        if mapping.description.trim().is_empty() {
            return Err(EngineError::invalid_registry(format!(
                "{family}: order {} has an empty description",
                mapping.order
            )));
        }
        previous = mapping.order;
    }
    Ok(())
}
