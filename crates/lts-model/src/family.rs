use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A recognized category of legal document with its own field table.
///
/// The declaration order is the classifier's priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateFamily {
    AgreementToLease,
    LicenceAgreement,
    PeppercornLease,
    RentReviewMemorandum,
    DeedOfGuarantee,
}

impl TemplateFamily {
    pub const ALL: [TemplateFamily; 5] = [
        TemplateFamily::AgreementToLease,
        TemplateFamily::LicenceAgreement,
        TemplateFamily::PeppercornLease,
        TemplateFamily::RentReviewMemorandum,
        TemplateFamily::DeedOfGuarantee,
    ];

    /// Stable identifier, e.g. `agreement-to-lease`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::AgreementToLease => "agreement-to-lease",
            Self::LicenceAgreement => "licence-agreement",
            Self::PeppercornLease => "peppercorn-lease",
            Self::RentReviewMemorandum => "rent-review-memorandum",
            Self::DeedOfGuarantee => "deed-of-guarantee",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AgreementToLease => "Agreement to Lease",
            Self::LicenceAgreement => "Licence Agreement",
            Self::PeppercornLease => "Lease at a Peppercorn Rent",
            Self::RentReviewMemorandum => "Rent Review Memorandum",
            Self::DeedOfGuarantee => "Deed of Guarantee",
        }
    }
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TemplateFamily {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|family| family.key() == wanted)
            .ok_or_else(|| ModelError::UnknownFamily(s.to_string()))
    }
}
