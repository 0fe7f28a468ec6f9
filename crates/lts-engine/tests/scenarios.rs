//! End-to-end scenarios: tag, classify, bind, validate.

use chrono::{Local, NaiveDate};

use lts_engine::mapping::rules::format_date;
use lts_engine::{
    DataRecord, DateStyle, FieldMapper, MappingRegistry, TemplateFamily, classify, tag, validate,
};

fn make_mapper() -> FieldMapper<'static> {
    FieldMapper::new(MappingRegistry::builtin())
}

#[test]
fn landlord_name_and_execution_date_are_bound_in_order() {
    let doc = tag("Landlord: ……………………………, dated this day of 20…");
    assert_eq!(doc.placeholders.len(), 2);
    assert_eq!(doc.placeholders[1].original_text, "…");

    let record = DataRecord::new().with("landlordName", "Acme Ltd");
    let bindings = make_mapper().bind(
        &doc.placeholders,
        Some(TemplateFamily::AgreementToLease),
        &record,
    );

    assert_eq!(bindings[0].order, 1);
    assert_eq!(bindings[0].value, "Acme Ltd");
    assert!(!bindings[0].missing);

    let today = format_date(Local::now().date_naive(), DateStyle::Deed);
    assert_eq!(bindings[1].order, 2);
    assert_eq!(bindings[1].value, today);
    assert!(bindings[1].value.contains(" day of "));
}

#[test]
fn pinned_evaluation_date() {
    let doc = tag("Landlord: ……………………………, dated this day of 20…");
    let bindings = make_mapper()
        .with_today(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
        .bind(
            &doc.placeholders,
            Some(TemplateFamily::AgreementToLease),
            &DataRecord::new(),
        );
    assert_eq!(bindings[0].value, "[Landlord Name]");
    assert!(bindings[0].missing);
    assert_eq!(bindings[1].value, "16th day of October 2026");
}

#[test]
fn unrecognized_document_gets_synthetic_bindings() {
    let dots = ".".repeat(10);
    let text = format!(
        "The party of {dots} agrees with {dots} on {dots} at {dots} for {dots}."
    );
    let doc = tag(&text);
    assert_eq!(doc.placeholders.len(), 5);

    let family = classify(&doc.source_text);
    assert_eq!(family, None);

    let bindings = make_mapper().bind(&doc.placeholders, family, &DataRecord::new());
    assert_eq!(bindings.len(), 5);
    for (idx, binding) in bindings.iter().enumerate() {
        let k = idx + 1;
        assert_eq!(binding.description, format!("Placeholder {k}"));
        assert_eq!(binding.value, format!("[Placeholder {k}]"));
        assert!(binding.missing);
        assert!(!binding.is_mapped());
    }
}

#[test]
fn year_three_rent_is_compounded() {
    let doc = tag(&"Rent ..... ".repeat(14));
    let record = DataRecord::new()
        .with("monthlyRent", "1000")
        .with("rentEscalation", "5");
    let bindings = make_mapper().bind(
        &doc.placeholders,
        Some(TemplateFamily::AgreementToLease),
        &record,
    );
    let year_three = bindings
        .iter()
        .find(|binding| binding.description == "Year 3 Rent")
        .unwrap();
    // round(1000 * 12 * 1.05^2) = 13230
    assert_eq!(year_three.value, "13,230 EUR");
    assert!(!year_three.missing);

    let year_one = bindings
        .iter()
        .find(|binding| binding.description == "Year 1 Rent")
        .unwrap();
    assert_eq!(year_one.value, "12,000 EUR");
}

#[test]
fn rent_schedule_without_data_is_labelled() {
    let doc = tag(&"Rent ..... ".repeat(14));
    let bindings = make_mapper().bind(
        &doc.placeholders,
        Some(TemplateFamily::AgreementToLease),
        &DataRecord::new().with("monthlyRent", "1000"),
    );
    let year_two = &bindings[10];
    assert_eq!(year_two.description, "Year 2 Rent");
    assert_eq!(year_two.value, "[Year 2 Rent]");
    assert!(year_two.missing);
}

#[test]
fn one_unfilled_placeholder_invalidates() {
    let mut doc = tag("A ..... B ..... C .....");
    for (idx, placeholder) in doc.placeholders.iter_mut().enumerate() {
        if idx != 1 {
            placeholder.value = format!("value {idx}");
            placeholder.filled = true;
        }
    }
    let result = validate(&doc.placeholders);
    assert!(!result.is_valid);
    assert_eq!(result.missing_fields, vec!["Placeholder 2"]);
}

#[test]
fn fill_then_validate_reports_missing_fields_in_order() {
    let mut doc = tag("Licence Agreement. Licensor: ..... dated ..... of ..... Licensee: .....");
    let family = classify(&doc.source_text);
    assert_eq!(family, Some(TemplateFamily::LicenceAgreement));

    let record = DataRecord::new().with("licensorName", "Harbour Estates DAC");
    make_mapper().fill_placeholders(&mut doc.placeholders, family, &record);
    let result = validate(&doc.placeholders);
    assert_eq!(result.missing_fields, vec!["Licensor Address", "Licensee Name"]);
}
