//! Value rule evaluation.
//!
//! Every rule is a pure function of the data record and an evaluation
//! context. `None` means a source value is missing; the caller renders the
//! mapping's bracketed label instead.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use lts_model::{DataRecord, DateStyle, ValueRule};
use regex::Regex;

use crate::utils::format_thousands;

/// Record key holding the monthly base rent.
pub const MONTHLY_RENT_KEY: &str = "monthlyRent";
/// Record key holding the yearly escalation percentage.
pub const RENT_ESCALATION_KEY: &str = "rentEscalation";
/// Record key overriding the currency suffix.
pub const CURRENCY_KEY: &str = "currency";

static ORDINAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<day>\d{1,2})(?:st|nd|rd|th)\b").expect("Invalid ordinal suffix regex")
});

/// Digits with optional `,` thousands groups and up to two decimals.
pub(crate) const AMOUNT: &str = r"(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d{1,2})?";

static AMOUNT_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:[€£$]|EUR|GBP|USD)?[ \t]*(?P<amount>-?{AMOUNT})[ \t]*(?:%|[€£]|EUR|GBP|USD)?$"
    ))
    .expect("Invalid amount regex")
});

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d.%m.%Y", "%d %B %Y", "%B %d, %Y"];

/// Inputs to rule evaluation that do not come from the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalContext {
    /// Date used by [`ValueRule::Today`].
    pub today: NaiveDate,
    /// Currency suffix used when the record has no `currency` value.
    pub currency: String,
}

impl EvalContext {
    fn currency<'a>(&'a self, record: &'a DataRecord) -> &'a str {
        record.get(CURRENCY_KEY).unwrap_or(&self.currency)
    }
}

/// Computes the value of `rule`, or `None` when required data is missing.
pub fn evaluate(rule: &ValueRule, record: &DataRecord, context: &EvalContext) -> Option<String> {
    match rule {
        ValueRule::Lookup { key } => record.get(key).map(str::to_string),
        ValueRule::Join { keys, separator } => {
            let parts: Vec<&str> = keys.iter().filter_map(|key| record.get(key)).collect();
            (!parts.is_empty()).then(|| parts.join(separator))
        }
        ValueRule::Today { style } => Some(format_date(context.today, *style)),
        ValueRule::Date { key, style } => {
            let raw = record.get(key)?;
            Some(match parse_date(raw) {
                Some(date) => format_date(date, *style),
                None => {
                    tracing::debug!(key = %key, "date value not recognized, passing through");
                    raw.to_string()
                }
            })
        }
        ValueRule::Currency { key } => {
            let amount = parse_amount(record.get(key)?)?;
            Some(format_currency(amount, context.currency(record)))
        }
        ValueRule::YearlyRent { year } => {
            let rent = yearly_rent(record, *year)?;
            Some(format!("{} {}", format_thousands(rent), context.currency(record)))
        }
        ValueRule::Literal { text } => Some(text.clone()),
    }
}

/// Annual rent for `year` of the term:
/// `round(monthlyRent * 12 * (1 + rentEscalation / 100)^(year - 1))`.
///
/// Year 1 does not need an escalation rate.
pub fn yearly_rent(record: &DataRecord, year: u32) -> Option<i64> {
    if year == 0 {
        return None;
    }
    let monthly = parse_amount(record.get(MONTHLY_RENT_KEY)?)?;
    let escalation = match record.get(RENT_ESCALATION_KEY) {
        Some(raw) => parse_amount(raw)?,
        None if year == 1 => 0.0,
        None => return None,
    };
    let exponent = i32::try_from(year - 1).ok()?;
    let rent = (monthly * 12.0 * (1.0 + escalation / 100.0).powi(exponent)).round();
    rent.is_finite().then_some(rent as i64)
}

/// Parses a date in any accepted input format.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = ORDINAL_SUFFIX
        .replace_all(raw.trim(), "$day")
        .replace(" day of ", " ");
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
}

/// Formats `date` in `style`.
pub fn format_date(date: NaiveDate, style: DateStyle) -> String {
    match style {
        DateStyle::Deed => format!("{} day of {}", ordinal(date.day()), date.format("%B %Y")),
        DateStyle::Long => date.format("%-d %B %Y").to_string(),
        DateStyle::Iso => date.format("%Y-%m-%d").to_string(),
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `12th`, `13th`, `21st`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Parses a single amount: an optional currency symbol or code, digits with
/// optional `,` thousands groups and up to two decimals, then an optional
/// `%` or currency suffix. Anything else is `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let caps = AMOUNT_VALUE.captures(raw.trim())?;
    let digits = caps.name("amount")?.as_str().replace(',', "");
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// `1,500 EUR`, or `1,500.50 EUR` when the amount has a fractional part.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = format_thousands(cents / 100);
    let fraction = (cents % 100).abs();
    if fraction == 0 {
        format!("{whole} {currency}")
    } else {
        format!("{whole}.{fraction:02} {currency}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> EvalContext {
        EvalContext {
            today: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn ordinals() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 31].map(ordinal).into();
        assert_eq!(
            rendered,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd", "31st"]
        );
    }

    #[test]
    fn date_styles() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(format_date(date, DateStyle::Deed), "16th day of October 2026");
        assert_eq!(format_date(date, DateStyle::Long), "16 October 2026");
        assert_eq!(format_date(date, DateStyle::Iso), "2026-10-16");
    }

    #[test]
    fn parses_accepted_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 1);
        assert_eq!(parse_date("2025-03-01"), expected);
        assert_eq!(parse_date("01/03/2025"), expected);
        assert_eq!(parse_date("01.03.2025"), expected);
        assert_eq!(parse_date("1st March 2025"), expected);
        assert_eq!(parse_date("March 1, 2025"), expected);
        assert_eq!(parse_date("1st day of March 2025"), expected);
        assert_eq!(parse_date("next spring"), None);
    }

    #[test]
    fn yearly_rent_compounds() {
        let record = DataRecord::new()
            .with(MONTHLY_RENT_KEY, "1000")
            .with(RENT_ESCALATION_KEY, "5");
        assert_eq!(yearly_rent(&record, 1), Some(12_000));
        assert_eq!(yearly_rent(&record, 2), Some(12_600));
        assert_eq!(yearly_rent(&record, 3), Some(13_230));
        assert_eq!(yearly_rent(&record, 0), None);
    }

    #[test]
    fn yearly_rent_without_escalation() {
        let record = DataRecord::new().with(MONTHLY_RENT_KEY, "€2,500");
        assert_eq!(yearly_rent(&record, 1), Some(30_000));
        assert_eq!(yearly_rent(&record, 2), None);
        assert_eq!(yearly_rent(&DataRecord::new(), 1), None);
    }

    #[test]
    fn yearly_rent_rejects_descriptive_amounts() {
        let prose = DataRecord::new().with(MONTHLY_RENT_KEY, "1000 per month for 12 months");
        assert_eq!(yearly_rent(&prose, 1), None);

        let european = DataRecord::new().with(MONTHLY_RENT_KEY, "€1.500,00");
        assert_eq!(yearly_rent(&european, 1), None);
    }

    #[test]
    fn rules_degrade_to_none_when_data_is_missing() {
        let record = DataRecord::new().with("tenantName", "Jane Byrne");
        let ctx = context();
        assert_eq!(
            evaluate(&ValueRule::lookup("tenantName"), &record, &ctx).as_deref(),
            Some("Jane Byrne")
        );
        assert_eq!(evaluate(&ValueRule::lookup("landlordName"), &record, &ctx), None);
        assert_eq!(evaluate(&ValueRule::currency("deposit"), &record, &ctx), None);
        assert_eq!(evaluate(&ValueRule::join(&["a", "b"], ", "), &record, &ctx), None);
    }

    #[test]
    fn join_skips_missing_parts() {
        let record = DataRecord::new()
            .with("street", "12 Main Street")
            .with("city", "Dublin 2");
        let rule = ValueRule::join(&["street", "unit", "city"], ", ");
        assert_eq!(
            evaluate(&rule, &record, &context()).as_deref(),
            Some("12 Main Street, Dublin 2")
        );
    }

    #[test]
    fn date_rule_reformats_or_passes_through() {
        let ctx = context();
        let rule = ValueRule::date("start", DateStyle::Long);
        let record = DataRecord::new().with("start", "01/03/2025");
        assert_eq!(evaluate(&rule, &record, &ctx).as_deref(), Some("1 March 2025"));
        let record = DataRecord::new().with("start", "on completion");
        assert_eq!(evaluate(&rule, &record, &ctx).as_deref(), Some("on completion"));
        assert_eq!(
            evaluate(&ValueRule::Today { style: DateStyle::Deed }, &record, &ctx).as_deref(),
            Some("16th day of October 2026")
        );
    }

    #[test]
    fn currency_uses_record_override() {
        let ctx = context();
        let record = DataRecord::new().with("deposit", "4500");
        assert_eq!(
            evaluate(&ValueRule::currency("deposit"), &record, &ctx).as_deref(),
            Some("4,500 EUR")
        );
        let record = record.with(CURRENCY_KEY, "GBP");
        assert_eq!(
            evaluate(&ValueRule::currency("deposit"), &record, &ctx).as_deref(),
            Some("4,500 GBP")
        );
        assert_eq!(format_currency(1234.5, "EUR"), "1,234.50 EUR");
    }

    #[test]
    fn amount_parsing() {
        assert_eq!(parse_amount("1,000"), Some(1000.0));
        assert_eq!(parse_amount("EUR 12,500.75"), Some(12500.75));
        assert_eq!(parse_amount("5%"), Some(5.0));
        assert_eq!(parse_amount("n/a"), None);
        assert_eq!(parse_amount(" €2,500.50 "), Some(2500.5));
        assert_eq!(parse_amount("1,500 EUR"), Some(1500.0));
        assert_eq!(parse_amount("-3"), Some(-3.0));
        assert_eq!(parse_amount("1000 per month for 12 months"), None);
        assert_eq!(parse_amount("€1.500,00"), None);
        assert_eq!(parse_amount("12-2024"), None);
    }
}
