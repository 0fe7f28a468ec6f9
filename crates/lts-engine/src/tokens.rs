//! `{{variable}}` token extraction.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}").expect("Invalid variable token regex")
});

/// Variable names of every `{{name}}` token in `text`, de-duplicated in
/// first-seen order.
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TOKEN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_seen_order_without_duplicates() {
        let text = "{{tenant_name}} pays {{ rent }} to {{landlord.name}}; {{tenant_name}} again {{1bad}}";
        assert_eq!(
            extract_variables(text),
            vec!["tenant_name", "rent", "landlord.name"]
        );
    }
}
