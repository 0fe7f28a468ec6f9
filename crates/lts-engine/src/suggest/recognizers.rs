//! Value recognizers for already-filled text.
//!
//! Recognizers run in [`Recognizer::PRECEDENCE`] order over the regions
//! not yet claimed by a blank or an earlier recognizer.

use std::ops::Range;
use std::sync::LazyLock;

use chrono::NaiveDate;
use lts_model::Category;
use regex::Regex;

use crate::mapping::rules::{AMOUNT, parse_date};

const MONTHS: &str =
    "(?:January|February|March|April|May|June|July|August|September|October|November|December)";

static ISO_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").expect("Invalid ISO date regex")
});
static LONG_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b\d{{1,2}}(?:st|nd|rd|th)?(?:[ \t]+day[ \t]+of)?[ \t]+{MONTHS}[ \t]+\d{{4}}\b|\b{MONTHS}[ \t]+\d{{1,2}}(?:st|nd|rd|th)?,[ \t]*\d{{4}}\b"
    ))
    .expect("Invalid long date regex")
});
static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b|\b\d{1,2}\.\d{1,2}\.\d{4}\b")
        .expect("Invalid numeric date regex")
});
static CURRENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"[€£$][ \t]?{AMOUNT}|\b(?:EUR|GBP|USD)[ \t]?{AMOUNT}|\b{AMOUNT}[ \t]?(?:EUR|GBP|USD)\b|\b{AMOUNT}[ \t]?[€£]"
    ))
    .expect("Invalid currency regex")
});
static COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:[A-Z][A-Za-z0-9&'\-]*[ \t]+){1,5}(?:Ltd|LTD|Limited|LIMITED|PLC|plc|DAC|LLP|Inc)\b",
    )
    .expect("Invalid company regex")
});
static POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b[A-Z]{1,2}\d[A-Z\d]?[ \t]?\d[A-Z]{2}\b|\b[AC-FHKNPRTV-Y]\d{2}[ \t]?[AC-FHKNPRTV-Y\d]{4}\b",
    )
    .expect("Invalid postcode regex")
});
static STREET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b\d{1,4}[A-Za-z]?[ \t]+(?:[A-Z][A-Za-z'\-]+[ \t]+){1,3}(?:Street|St|Road|Rd|Avenue|Ave|Lane|Place|Square|Terrace|Drive|Court|Quay|Park|Way|Row|Crescent|Close|Gardens)\b",
    )
    .expect("Invalid street regex")
});
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z]{2,5}(?:[-/]\d{2,})+\b").expect("Invalid reference regex")
});
static PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:['\-][A-Z]?[a-z]+)?(?:[ \t]+[A-Z][a-z]+(?:['\-][A-Z]?[a-z]+)?){1,3}\b")
        .expect("Invalid person name regex")
});
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3,}\b").expect("Invalid number regex"));

/// Capitalized words that open clauses or name roles rather than people.
const NAME_STOPWORDS: &[&str] = &[
    "A", "An", "And", "Annex", "Article", "As", "At", "Between", "By", "Clause", "Company",
    "Date", "Dated", "Deed", "Delivered", "For", "From", "Guarantee", "Guarantor", "In",
    "Landlord", "Lease", "Licence", "Licensee", "License", "Licensor", "Memorandum", "Of", "On",
    "Part", "Premises", "Rent", "Review", "Schedule", "Section", "Sealed", "Signed", "Tenant",
    "Term", "That", "The", "These", "This", "Those", "To", "Whereas", "Witness", "Year", "Years",
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday",
    "Saturday", "Sunday",
];

/// One recognizer of the suggestion pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Recognizer {
    IsoDate,
    LongDate,
    NumericDate,
    Currency,
    Company,
    Postcode,
    Street,
    Reference,
    Person,
    Number,
}

impl Recognizer {
    /// Recognizers in the order they claim text.
    pub(crate) const PRECEDENCE: [Recognizer; 10] = [
        Recognizer::IsoDate,
        Recognizer::LongDate,
        Recognizer::NumericDate,
        Recognizer::Currency,
        Recognizer::Company,
        Recognizer::Postcode,
        Recognizer::Street,
        Recognizer::Reference,
        Recognizer::Person,
        Recognizer::Number,
    ];

    pub(crate) fn regex(&self) -> &'static Regex {
        match self {
            Self::IsoDate => &ISO_DATE,
            Self::LongDate => &LONG_DATE,
            Self::NumericDate => &NUMERIC_DATE,
            Self::Currency => &CURRENCY,
            Self::Company => &COMPANY,
            Self::Postcode => &POSTCODE,
            Self::Street => &STREET,
            Self::Reference => &REFERENCE,
            Self::Person => &PERSON,
            Self::Number => &NUMBER,
        }
    }

    pub(crate) fn category(&self) -> Category {
        match self {
            Self::IsoDate | Self::LongDate | Self::NumericDate => Category::Date,
            Self::Currency | Self::Number => Category::Amount,
            Self::Company | Self::Person => Category::Name,
            Self::Postcode | Self::Street => Category::Address,
            Self::Reference => Category::Reference,
        }
    }

    /// Base confidence before label matching.
    pub(crate) fn confidence(&self) -> f32 {
        match self {
            Self::IsoDate => 0.95,
            Self::LongDate => 0.90,
            Self::NumericDate => 0.80,
            Self::Currency | Self::Company => 0.85,
            Self::Postcode => 0.75,
            Self::Street | Self::Reference => 0.70,
            Self::Person => 0.60,
            Self::Number => 0.40,
        }
    }

    pub(crate) fn reason(&self) -> &'static str {
        match self {
            Self::IsoDate => "ISO 8601 calendar date",
            Self::LongDate => "written-out date",
            Self::NumericDate => "day/month/year date",
            Self::Currency => "amount with a currency marker",
            Self::Company => "company name with a legal suffix",
            Self::Postcode => "postcode or Eircode",
            Self::Street => "street address",
            Self::Reference => "reference code",
            Self::Person => "capitalized words resembling a person's name",
            Self::Number => "number of three or more digits",
        }
    }

    /// Validates a regex hit and narrows it where needed.
    pub(crate) fn refine(&self, text: &str, range: Range<usize>) -> Option<Range<usize>> {
        let matched = &text[range.clone()];
        match self {
            Self::IsoDate => NaiveDate::parse_from_str(matched, "%Y-%m-%d")
                .ok()
                .map(|_| range),
            Self::LongDate | Self::NumericDate => parse_date(matched).map(|_| range),
            Self::Person => trim_stopwords(matched).map(|inner| {
                range.start + inner.start..range.start + inner.end
            }),
            _ => Some(range),
        }
    }
}

/// Drops leading and trailing stopwords; rejects the hit when fewer than two
/// words remain or a stopword sits inside the name.
fn trim_stopwords(matched: &str) -> Option<Range<usize>> {
    let mut words = Vec::new();
    let mut offset = 0;
    for part in matched.split([' ', '\t']) {
        if !part.is_empty() {
            words.push((offset, part));
        }
        offset += part.len() + 1;
    }

    let first = words.iter().position(|(_, word)| !is_stopword(word))?;
    let last = words.iter().rposition(|(_, word)| !is_stopword(word))?;
    let kept = &words[first..=last];
    if kept.len() < 2 || kept.iter().any(|(_, word)| is_stopword(word)) {
        return None;
    }
    let (start, _) = kept[0];
    let (last_start, last_word) = kept[kept.len() - 1];
    Some(start..last_start + last_word.len())
}

fn is_stopword(word: &str) -> bool {
    NAME_STOPWORDS.contains(&word)
}
