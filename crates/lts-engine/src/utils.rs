//! Text helpers shared by the engine components.

/// Normalizes text for comparison by lowercasing and replacing separators with spaces.
pub fn normalize_text(raw: &str) -> String {
    split_camel(raw)
        .to_lowercase()
        .replace(['_', '-', '.', '/', '\\', ':', '(', ')'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Converts a label or camelCase key into a snake_case variable name.
///
/// Returns `None` when nothing alphanumeric remains. A leading digit gets a
/// `v_` prefix so the result is always a valid variable name.
pub fn to_snake_case(raw: &str) -> Option<String> {
    let words: Vec<String> = split_camel(raw)
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    if words.is_empty() {
        return None;
    }
    let joined = words.join("_");
    if joined.starts_with(|ch: char| ch.is_ascii_digit()) {
        Some(format!("v_{joined}"))
    } else {
        Some(joined)
    }
}

fn split_camel(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for ch in raw.trim().chars() {
        if prev_lower && ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
    }
    out
}

/// Formats an integer with comma thousands separators.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Builds a single-line preview of `text[start..end]` with up to `window`
/// characters of context on each side. Truncation is marked with `...`.
pub fn context_preview(text: &str, start: usize, end: usize, window: usize) -> String {
    let before: Vec<char> = text[..start].chars().rev().take(window + 1).collect();
    let after: Vec<char> = text[end..].chars().take(window + 1).collect();

    let mut preview = String::new();
    if before.len() > window {
        preview.push_str("...");
    }
    preview.extend(before.iter().take(window).rev());
    preview.push_str(&text[start..end]);
    preview.extend(after.iter().take(window));
    if after.len() > window {
        preview.push_str("...");
    }
    preview
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_from_keys_and_labels() {
        assert_eq!(to_snake_case("landlordName").as_deref(), Some("landlord_name"));
        assert_eq!(to_snake_case("Year 3 Rent").as_deref(), Some("year_3_rent"));
        assert_eq!(to_snake_case("Tenant's Address").as_deref(), Some("tenant_s_address"));
        assert_eq!(to_snake_case("3rd Party").as_deref(), Some("v_3rd_party"));
        assert_eq!(to_snake_case(" .. "), None);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(13230), "13,230");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-4500), "-4,500");
    }

    #[test]
    fn preview_marks_truncation() {
        let text = "The rent payable is EUR 12,000 per annum.";
        let start = text.find("EUR").unwrap();
        let end = start + "EUR 12,000".len();
        assert_eq!(
            context_preview(text, start, end, 8),
            "...able is EUR 12,000 per ann..."
        );
        assert_eq!(context_preview(text, start, end, 100), text);
    }

    #[test]
    fn normalize_splits_camel_and_separators() {
        assert_eq!(normalize_text("landlordName"), "landlord name");
        assert_eq!(normalize_text("Tenant_Address:"), "tenant address");
    }
}
