//! Built-in field tables, one per template family.
//!
//! Each table lists the blanks of the family's standard template in
//! document order.

use std::collections::BTreeMap;

use lts_model::{Category, DateStyle, FieldMapping, FieldRef, TemplateFamily, ValueRule};

pub(super) fn build_builtin_tables() -> BTreeMap<TemplateFamily, Vec<FieldMapping>> {
    BTreeMap::from([
        (TemplateFamily::AgreementToLease, agreement_to_lease()),
        (TemplateFamily::LicenceAgreement, licence_agreement()),
        (TemplateFamily::PeppercornLease, peppercorn_lease()),
        (TemplateFamily::RentReviewMemorandum, rent_review_memorandum()),
        (TemplateFamily::DeedOfGuarantee, deed_of_guarantee()),
    ])
}

fn named(
    order: u32,
    pattern: &str,
    description: &str,
    key: &str,
    rule: ValueRule,
    category: Category,
) -> FieldMapping {
    FieldMapping {
        order,
        pattern: pattern.to_string(),
        description: description.to_string(),
        field: FieldRef::named(key),
        rule,
        category,
    }
}

fn lookup(order: u32, pattern: &str, description: &str, key: &str, category: Category) -> FieldMapping {
    named(order, pattern, description, key, ValueRule::lookup(key), category)
}

fn calculated(order: u32, pattern: &str, description: &str, rule: ValueRule, category: Category) -> FieldMapping {
    FieldMapping {
        order,
        pattern: pattern.to_string(),
        description: description.to_string(),
        field: FieldRef::Calculated,
        rule,
        category,
    }
}

fn execution_date(order: u32) -> FieldMapping {
    calculated(
        order,
        "dated this",
        "Date of Agreement",
        ValueRule::Today {
            style: DateStyle::Deed,
        },
        Category::Date,
    )
}

fn premises(order: u32) -> FieldMapping {
    named(
        order,
        "the premises known as",
        "Premises Address",
        "premisesAddress",
        ValueRule::join(&["premisesAddress", "premisesCity"], ", "),
        Category::Address,
    )
}

fn agreement_to_lease() -> Vec<FieldMapping> {
    let mut table = vec![
        lookup(1, "Landlord:", "Landlord Name", "landlordName", Category::Name),
        execution_date(2),
        lookup(3, "of", "Landlord Address", "landlordAddress", Category::Address),
        lookup(4, "Tenant:", "Tenant Name", "tenantName", Category::Name),
        lookup(5, "of", "Tenant Address", "tenantAddress", Category::Address),
        premises(6),
        lookup(7, "for a term of", "Term (Years)", "termYears", Category::Other),
        named(
            8,
            "commencing on",
            "Commencement Date",
            "commencementDate",
            ValueRule::date("commencementDate", DateStyle::Long),
            Category::Date,
        ),
        named(
            9,
            "monthly rent of",
            "Monthly Rent",
            "monthlyRent",
            ValueRule::currency("monthlyRent"),
            Category::Amount,
        ),
    ];
    table.extend((1..=5).map(|year| {
        calculated(
            9 + year,
            &format!("Year {year}:"),
            &format!("Year {year} Rent"),
            ValueRule::YearlyRent { year },
            Category::Amount,
        )
    }));
    table.push(named(
        15,
        "security deposit of",
        "Security Deposit",
        "securityDeposit",
        ValueRule::currency("securityDeposit"),
        Category::Amount,
    ));
    table.push(named(
        16,
        "break date",
        "Break Date",
        "breakDate",
        ValueRule::date("breakDate", DateStyle::Deed),
        Category::Date,
    ));
    table
}

fn licence_agreement() -> Vec<FieldMapping> {
    vec![
        lookup(1, "Licensor:", "Licensor Name", "licensorName", Category::Name),
        execution_date(2),
        lookup(3, "of", "Licensor Address", "licensorAddress", Category::Address),
        lookup(4, "Licensee:", "Licensee Name", "licenseeName", Category::Name),
        lookup(5, "of", "Licensee Address", "licenseeAddress", Category::Address),
        premises(6),
        named(
            7,
            "from",
            "Licence Start Date",
            "commencementDate",
            ValueRule::date("commencementDate", DateStyle::Long),
            Category::Date,
        ),
        lookup(8, "for a period of", "Licence Period", "licencePeriod", Category::Other),
        named(
            9,
            "licence fee of",
            "Licence Fee",
            "licenceFee",
            ValueRule::currency("licenceFee"),
            Category::Amount,
        ),
        named(
            10,
            "deposit of",
            "Security Deposit",
            "securityDeposit",
            ValueRule::currency("securityDeposit"),
            Category::Amount,
        ),
    ]
}

fn peppercorn_lease() -> Vec<FieldMapping> {
    vec![
        execution_date(1),
        lookup(2, "between", "Landlord Name", "landlordName", Category::Name),
        lookup(3, "of", "Landlord Address", "landlordAddress", Category::Address),
        lookup(4, "and", "Tenant Name", "tenantName", Category::Name),
        lookup(5, "of", "Tenant Address", "tenantAddress", Category::Address),
        premises(6),
        lookup(7, "for a term of", "Term (Years)", "termYears", Category::Other),
        named(
            8,
            "from and including",
            "Term Start Date",
            "commencementDate",
            ValueRule::date("commencementDate", DateStyle::Deed),
            Category::Date,
        ),
        calculated(
            9,
            "yielding and paying",
            "Rent",
            ValueRule::literal("one peppercorn (if demanded)"),
            Category::Amount,
        ),
    ]
}

fn rent_review_memorandum() -> Vec<FieldMapping> {
    vec![
        execution_date(1),
        lookup(2, "Landlord:", "Landlord Name", "landlordName", Category::Name),
        lookup(3, "Tenant:", "Tenant Name", "tenantName", Category::Name),
        premises(4),
        named(
            5,
            "lease dated",
            "Lease Date",
            "leaseDate",
            ValueRule::date("leaseDate", DateStyle::Long),
            Category::Date,
        ),
        named(
            6,
            "review date",
            "Review Date",
            "reviewDate",
            ValueRule::date("reviewDate", DateStyle::Long),
            Category::Date,
        ),
        named(
            7,
            "revised rent of",
            "Revised Annual Rent",
            "reviewedRent",
            ValueRule::currency("reviewedRent"),
            Category::Amount,
        ),
    ]
}

fn deed_of_guarantee() -> Vec<FieldMapping> {
    vec![
        execution_date(1),
        lookup(2, "Guarantor:", "Guarantor Name", "guarantorName", Category::Name),
        lookup(3, "of", "Guarantor Address", "guarantorAddress", Category::Address),
        lookup(4, "Landlord:", "Landlord Name", "landlordName", Category::Name),
        lookup(5, "Tenant:", "Tenant Name", "tenantName", Category::Name),
        premises(6),
        named(
            7,
            "lease dated",
            "Lease Date",
            "leaseDate",
            ValueRule::date("leaseDate", DateStyle::Long),
            Category::Date,
        ),
        named(
            8,
            "not exceeding",
            "Guarantee Limit",
            "guaranteeLimit",
            ValueRule::currency("guaranteeLimit"),
            Category::Amount,
        ),
    ]
}
