use lts_model::{
    Category, DataRecord, DateStyle, FieldMapping, FieldRef, ModelError, TemplateFamily,
    ValueRule, VariableName,
};

#[test]
fn family_parses_from_key_and_loose_spellings() {
    assert_eq!(
        "agreement-to-lease".parse::<TemplateFamily>().unwrap(),
        TemplateFamily::AgreementToLease
    );
    assert_eq!(
        "Licence Agreement".parse::<TemplateFamily>().unwrap(),
        TemplateFamily::LicenceAgreement
    );
    assert_eq!(
        "deed_of_guarantee".parse::<TemplateFamily>().unwrap(),
        TemplateFamily::DeedOfGuarantee
    );
    assert_eq!(
        "lease".parse::<TemplateFamily>(),
        Err(ModelError::UnknownFamily("lease".to_string()))
    );
}

#[test]
fn family_serializes_as_key() {
    let json = serde_json::to_string(&TemplateFamily::PeppercornLease).unwrap();
    assert_eq!(json, "\"peppercorn-lease\"");
    for family in TemplateFamily::ALL {
        assert_eq!(family.to_string(), family.key());
    }
}

#[test]
fn field_mapping_deserializes_from_config_json() {
    let json = r#"{
        "order": 3,
        "pattern": "commencing on",
        "description": "Commencement Date",
        "field": {"named": "commencementDate"},
        "rule": {"rule": "date", "key": "commencementDate", "style": "long"},
        "category": "date"
    }"#;
    let mapping: FieldMapping = serde_json::from_str(json).unwrap();
    assert_eq!(mapping.order, 3);
    assert_eq!(mapping.field, FieldRef::named("commencementDate"));
    assert_eq!(
        mapping.rule,
        ValueRule::date("commencementDate", DateStyle::Long)
    );
    assert_eq!(mapping.category, Category::Date);
    assert_eq!(mapping.missing_label(), "[Commencement Date]");
}

#[test]
fn calculated_field_and_defaults_deserialize() {
    let json = r#"{
        "order": 1,
        "description": "Year 2 Rent",
        "field": "calculated",
        "rule": {"rule": "yearly_rent", "year": 2}
    }"#;
    let mapping: FieldMapping = serde_json::from_str(json).unwrap();
    assert_eq!(mapping.field, FieldRef::Calculated);
    assert_eq!(mapping.rule, ValueRule::YearlyRent { year: 2 });
    assert_eq!(mapping.category, Category::Other);
    assert!(mapping.pattern.is_empty());
}

#[test]
fn record_deserializes_from_flat_object() {
    let record: DataRecord =
        serde_json::from_str(r#"{"landlordName": "Acme Ltd", "monthlyRent": "1000"}"#).unwrap();
    assert_eq!(record.len(), 2);
    assert_eq!(record.get("monthlyRent"), Some("1000"));
}

#[test]
fn variable_name_validation() {
    assert_eq!(VariableName::new("landlord_name").unwrap().token(), "{{landlord_name}}");
    assert!(VariableName::new("tenant.address").is_ok());
    assert!(VariableName::new("1st_party").is_err());
    assert!(VariableName::new("has space").is_err());
    assert!(VariableName::new("").is_err());
}
