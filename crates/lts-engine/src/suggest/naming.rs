//! Variable naming for suggestions.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use lts_model::Category;
use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;
use regex::Regex;

use crate::utils::{normalize_text, to_snake_case};

/// Minimum Jaro-Winkler similarity for a label to adopt a vocabulary key.
pub(crate) const LABEL_MATCH_MIN: f64 = 0.85;
/// Boost applied when a label matches a known field.
pub(crate) const LABEL_MATCH_BOOST: f32 = 1.05;
const MAX_LABEL_WORDS: usize = 4;

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<label>[A-Za-z](?:[A-Za-z0-9'&/ \t]*[A-Za-z])?)[ \t]*:").expect("Invalid label regex")
});

/// Known data field keys with their normalized forms and categories.
#[derive(Debug, Clone, Default)]
pub(crate) struct Vocabulary {
    entries: Vec<(String, String, Category)>,
}

/// A vocabulary key adopted for a label.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LabelMatch {
    pub key: String,
    pub similarity: f64,
}

impl Vocabulary {
    pub(crate) fn new(keys: impl IntoIterator<Item = (String, Category)>) -> Self {
        Self {
            entries: keys
                .into_iter()
                .map(|(key, category)| {
                    let normalized = normalize_text(&key);
                    (key, normalized, category)
                })
                .collect(),
        }
    }

    /// Best vocabulary key of `category` for `label`, if similar enough.
    pub(crate) fn best_match(&self, label: &str, category: Category) -> Option<LabelMatch> {
        let wanted = normalize_text(label);
        if wanted.is_empty() {
            return None;
        }
        let mut best: Option<LabelMatch> = None;
        let candidates = self
            .entries
            .iter()
            .filter(|(_, _, entry_category)| *entry_category == category);
        for (key, normalized, _) in candidates {
            let similarity = jaro_similarity(wanted.chars(), normalized.chars());
            if similarity >= LABEL_MATCH_MIN
                && best.as_ref().is_none_or(|current| similarity > current.similarity)
            {
                best = Some(LabelMatch {
                    key: key.clone(),
                    similarity,
                });
            }
        }
        best
    }
}

/// The last `Label:` in `region`, limited to its final few words.
pub(crate) fn preceding_label(region: &str) -> Option<String> {
    let label = LABEL
        .captures_iter(region)
        .filter_map(|caps| caps.name("label"))
        .last()?
        .as_str();
    let words: Vec<&str> = label.split_whitespace().collect();
    let start = words.len().saturating_sub(MAX_LABEL_WORDS);
    let trimmed = words[start..].join(" ");
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Base name for a hit: vocabulary key of the same category, snake_cased
/// label, or category default.
pub(crate) fn base_name(
    label: Option<&str>,
    vocabulary: &Vocabulary,
    category: Category,
) -> (String, Option<LabelMatch>) {
    if let Some(label) = label {
        if let Some(found) = vocabulary.best_match(label, category) {
            let name = to_snake_case(&found.key).unwrap_or_else(|| found.key.clone());
            return (name, Some(found));
        }
        if let Some(name) = to_snake_case(label) {
            return (name, None);
        }
    }
    (category.default_variable_name().to_string(), None)
}

/// Hands out unique names: the same text keeps its name, distinct texts
/// sharing a base get `_2`, `_3`, ...
#[derive(Debug, Default)]
pub(crate) struct NameAllocator {
    by_text: HashMap<(String, String), String>,
    taken: HashSet<String>,
}

impl NameAllocator {
    pub(crate) fn allocate(&mut self, base: &str, text: &str) -> String {
        let key = (base.to_string(), text.to_string());
        if let Some(name) = self.by_text.get(&key) {
            return name.clone();
        }
        let mut name = base.to_string();
        let mut suffix = 1;
        while self.taken.contains(&name) {
            suffix += 1;
            name = format!("{base}_{suffix}");
        }
        self.taken.insert(name.clone());
        self.by_text.insert(key, name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_vocabulary() -> Vocabulary {
        Vocabulary::new([
            ("landlordName".to_string(), Category::Name),
            ("landlordAddress".to_string(), Category::Address),
            ("tenantName".to_string(), Category::Name),
            ("commencementDate".to_string(), Category::Date),
        ])
    }

    #[test]
    fn finds_nearest_label() {
        assert_eq!(preceding_label("Landlord: ").as_deref(), Some("Landlord"));
        assert_eq!(
            preceding_label("Parties. Name: x. The Tenant Name : ").as_deref(),
            Some("The Tenant Name")
        );
        assert_eq!(preceding_label("no label here "), None);
        assert_eq!(preceding_label("at 10:30 "), None);
    }

    #[test]
    fn label_matches_vocabulary() {
        let vocabulary = make_vocabulary();
        let found = vocabulary.best_match("Landlord", Category::Name).unwrap();
        assert_eq!(found.key, "landlordName");
        assert!(vocabulary.best_match("Witness", Category::Name).is_none());
    }

    #[test]
    fn label_match_requires_same_category() {
        let vocabulary = make_vocabulary();
        assert!(vocabulary.best_match("Landlord", Category::Amount).is_none());
        assert!(vocabulary.best_match("Commencement", Category::Name).is_none());
        assert_eq!(
            vocabulary
                .best_match("Commencement", Category::Date)
                .map(|found| found.key)
                .as_deref(),
            Some("commencementDate")
        );
        assert_eq!(
            base_name(Some("Landlord"), &vocabulary, Category::Reference),
            ("landlord".to_string(), None)
        );
    }

    #[test]
    fn base_name_fallbacks() {
        let vocabulary = make_vocabulary();
        assert_eq!(
            base_name(Some("Tenant Name"), &vocabulary, Category::Name).0,
            "tenant_name"
        );
        assert_eq!(
            base_name(Some("Rent Payable"), &vocabulary, Category::Amount),
            ("rent_payable".to_string(), None)
        );
        assert_eq!(base_name(None, &vocabulary, Category::Date).0, "date");
    }

    #[test]
    fn allocator_suffixes_distinct_texts() {
        let mut names = NameAllocator::default();
        assert_eq!(names.allocate("date", "1 March 2025"), "date");
        assert_eq!(names.allocate("date", "2 March 2025"), "date_2");
        assert_eq!(names.allocate("date", "1 March 2025"), "date");
        assert_eq!(names.allocate("date", "3 March 2025"), "date_3");
    }
}
