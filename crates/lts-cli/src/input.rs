//! Loading documents, case data, configuration and mapping tables from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use lts_engine::{DataRecord, EngineConfig, MappingRegistry};

pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read document {}", path.display()))
}

/// Reads a flat JSON object of case data.
pub fn load_record(path: &Path) -> Result<DataRecord> {
    let raw = fs::read_to_string(path).with_context(|| format!("read data {}", path.display()))?;
    parse_record(&raw).with_context(|| format!("parse data {}", path.display()))
}

/// Parses a flat JSON object into a [`DataRecord`].
///
/// Numbers and booleans keep their JSON spelling; `null` entries are
/// dropped. Nested arrays and objects are rejected.
pub fn parse_record(raw: &str) -> Result<DataRecord> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(entries) = value else {
        bail!("case data must be a JSON object");
    };
    let mut record = DataRecord::new();
    for (key, value) in entries {
        match value {
            Value::Null => {}
            Value::String(text) => {
                record.insert(key, text);
            }
            Value::Number(number) => {
                record.insert(key, number.to_string());
            }
            Value::Bool(flag) => {
                record.insert(key, flag.to_string());
            }
            Value::Array(_) | Value::Object(_) => {
                bail!("field `{key}` must be a string, number or boolean");
            }
        }
    }
    Ok(record)
}

/// Reads a TOML engine configuration, or the defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parse config {}", path.display()))
}

/// The built-in tables, with any tables from `path` layered on top.
pub fn load_registry(path: Option<&Path>) -> Result<MappingRegistry> {
    let builtin = MappingRegistry::builtin();
    let Some(path) = path else {
        return Ok(builtin.clone());
    };
    let raw =
        fs::read_to_string(path).with_context(|| format!("read mappings {}", path.display()))?;
    let overrides = MappingRegistry::from_json(&raw)
        .with_context(|| format!("load mappings {}", path.display()))?;
    tracing::info!(
        families = overrides.len(),
        path = %path.display(),
        "loaded mapping overrides"
    );
    Ok(builtin.merged_with(&overrides))
}
