//! Integration tests for loading case data, configuration and mappings.

use std::fs;
use std::path::PathBuf;

use lts_cli::input::{load_config, load_record, load_registry, parse_record};
use lts_engine::{MappingRegistry, TemplateFamily};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn numbers_and_booleans_become_strings() {
    let record = parse_record(
        r#"{"landlordName": "Acme Ltd", "monthlyRent": 1000, "rentEscalation": 2.5, "break": true, "notes": null}"#,
    )
    .unwrap();
    assert_eq!(record.get("landlordName"), Some("Acme Ltd"));
    assert_eq!(record.get("monthlyRent"), Some("1000"));
    assert_eq!(record.get("rentEscalation"), Some("2.5"));
    assert_eq!(record.get("break"), Some("true"));
    assert!(!record.contains("notes"));
    assert_eq!(record.len(), 4);
}

#[test]
fn nested_values_are_rejected() {
    let err = parse_record(r#"{"parties": ["a", "b"]}"#).unwrap_err();
    assert!(err.to_string().contains("parties"));
    assert!(parse_record("[1, 2]").is_err());
}

#[test]
fn record_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "case.json", r#"{"tenantName": "Jane Murphy"}"#);
    let record = load_record(&path).unwrap();
    assert_eq!(record.get("tenantName"), Some("Jane Murphy"));

    let missing = dir.path().join("absent.json");
    let err = load_record(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn partial_toml_config() {
    let dir = TempDir::new().unwrap();
    let toml = "min_confidence = 0.5\ncurrency = \"GBP\"\ntoday = \"2026-10-16\"\n\n[thresholds]\nhigh = 0.9\n";
    let path = write_file(&dir, "lts.toml", toml);
    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.min_confidence, 0.5);
    assert_eq!(config.currency, "GBP");
    assert_eq!(config.context_window, 40);
    assert_eq!(config.thresholds.high, 0.9);
    assert_eq!(config.thresholds.medium, 0.6);
    assert_eq!(
        config.today.map(|date| date.to_string()).as_deref(),
        Some("2026-10-16")
    );

    assert_eq!(load_config(None).unwrap().currency, "EUR");
}

#[test]
fn mapping_overrides_replace_one_family() {
    let dir = TempDir::new().unwrap();
    let json = r#"{
        "deed-of-guarantee": [
            {"order": 1, "pattern": "", "description": "Guarantor", "field": {"named": "guarantorName"}, "rule": {"rule": "lookup", "key": "guarantorName"}, "category": "name"}
        ]
    }"#;
    let path = write_file(&dir, "mappings.json", json);
    let registry = load_registry(Some(&path)).unwrap();

    let builtin = MappingRegistry::builtin();
    assert_eq!(registry.table(TemplateFamily::DeedOfGuarantee).len(), 1);
    assert_eq!(
        registry.table(TemplateFamily::AgreementToLease),
        builtin.table(TemplateFamily::AgreementToLease)
    );
}

#[test]
fn invalid_mapping_orders_are_rejected() {
    let dir = TempDir::new().unwrap();
    let json = r#"{
        "licence-agreement": [
            {"order": 2, "pattern": "", "description": "B", "field": "calculated", "rule": {"rule": "literal", "text": "x"}, "category": "other"},
            {"order": 1, "pattern": "", "description": "A", "field": "calculated", "rule": {"rule": "literal", "text": "y"}, "category": "other"}
        ]
    }"#;
    let path = write_file(&dir, "mappings.json", json);
    assert!(load_registry(Some(&path)).is_err());
}
