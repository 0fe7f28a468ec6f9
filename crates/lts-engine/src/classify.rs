//! Keyword-signature template classification.
//!
//! Families are tested in [`TemplateFamily::ALL`] order and the first family
//! with a signature present wins. Documents quoting another family's title in
//! boilerplate can therefore be misclassified; [`classify_all`] exposes every
//! match so callers can flag the ambiguity.

use lts_model::TemplateFamily;

/// Signature phrases per family, lowercase with single spaces.
const SIGNATURES: &[(TemplateFamily, &[&str])] = &[
    (
        TemplateFamily::AgreementToLease,
        &["agreement to lease", "agreement for lease"],
    ),
    (
        TemplateFamily::LicenceAgreement,
        &["licence agreement", "license agreement", "licence to occupy"],
    ),
    (
        TemplateFamily::PeppercornLease,
        &["peppercorn", "lease at a nominal rent"],
    ),
    (
        TemplateFamily::RentReviewMemorandum,
        &["rent review memorandum", "memorandum of rent review"],
    ),
    (
        TemplateFamily::DeedOfGuarantee,
        &["deed of guarantee", "guarantee and indemnity"],
    ),
];

/// Signature phrases recognized for `family`.
pub fn signatures(family: TemplateFamily) -> &'static [&'static str] {
    SIGNATURES
        .iter()
        .find(|(candidate, _)| *candidate == family)
        .map_or(&[], |(_, phrases)| phrases)
}

/// First family whose signature appears in `text`, if any.
pub fn classify(text: &str) -> Option<TemplateFamily> {
    let haystack = prepare(text);
    let family = SIGNATURES
        .iter()
        .find(|(_, phrases)| phrases.iter().any(|phrase| haystack.contains(phrase)))
        .map(|(family, _)| *family);
    tracing::debug!(family = ?family, "classified document");
    family
}

/// Every family with a signature present, in priority order, paired with
/// the phrase that matched first.
pub fn classify_all(text: &str) -> Vec<(TemplateFamily, &'static str)> {
    let haystack = prepare(text);
    let matches: Vec<_> = SIGNATURES
        .iter()
        .filter_map(|(family, phrases)| {
            phrases
                .iter()
                .find(|phrase| haystack.contains(*phrase))
                .map(|phrase| (*family, *phrase))
        })
        .collect();
    if matches.len() > 1 {
        tracing::debug!(count = matches.len(), "multiple family signatures present");
    }
    matches
}

fn prepare(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_each_family() {
        assert_eq!(
            classify("THIS AGREEMENT TO LEASE is made"),
            Some(TemplateFamily::AgreementToLease)
        );
        assert_eq!(
            classify("Licence\n  Agreement between"),
            Some(TemplateFamily::LicenceAgreement)
        );
        assert_eq!(
            classify("at a rent of one peppercorn"),
            Some(TemplateFamily::PeppercornLease)
        );
        assert_eq!(
            classify("Rent Review Memorandum"),
            Some(TemplateFamily::RentReviewMemorandum)
        );
        assert_eq!(
            classify("this Deed of Guarantee"),
            Some(TemplateFamily::DeedOfGuarantee)
        );
    }

    #[test]
    fn unknown_text_is_none() {
        assert_eq!(classify("Minutes of the board meeting"), None);
        assert!(classify_all("").is_empty());
    }

    #[test]
    fn first_match_wins_and_all_matches_are_reported() {
        let text = "This Licence Agreement refers to a lease at a peppercorn rent.";
        assert_eq!(classify(text), Some(TemplateFamily::LicenceAgreement));
        assert_eq!(
            classify_all(text),
            vec![
                (TemplateFamily::LicenceAgreement, "licence agreement"),
                (TemplateFamily::PeppercornLease, "peppercorn"),
            ]
        );
    }

    #[test]
    fn every_family_has_signatures() {
        for family in TemplateFamily::ALL {
            assert!(!signatures(family).is_empty(), "{family} has no signatures");
        }
    }
}
