//! Blank-indicator pattern matching.
//!
//! Pattern classes run in a fixed precedence order. Each class only searches
//! the gaps left unclaimed by earlier classes, so a region claimed once is
//! opaque to every later class (first match wins, no double counting).
//!
//! Offsets are byte offsets into the scanned text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Minimum effective blank length.
pub const MIN_BLANK_LENGTH: usize = 3;
/// Maximum effective blank length; longer runs are clamped.
pub const MAX_BLANK_LENGTH: usize = 50;

const INDICATOR: &str = r"[._…\-–—]";

static DOTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{3,}").expect("Invalid dots regex"));
static ELLIPSIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"…+").expect("Invalid ellipsis regex"));
static UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{3,}").expect("Invalid underscore regex"));
static DASHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\-–—]{3,}").expect("Invalid dash regex"));
static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"[\[(][ \t]*{INDICATOR}(?:[ \t]*{INDICATOR})*[ \t]*[\])]"
    ))
    .expect("Invalid bracketed regex")
});
static SPACED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{INDICATOR}(?:[ \t]*{INDICATOR}){{2,}}")).expect("Invalid spaced regex")
});

/// Blank-indicator pattern class, declared in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankKind {
    /// `.....`
    Dots,
    /// `………` (or a short run not glued to a word)
    Ellipsis,
    /// `_____`
    Underscores,
    /// `-----`, `–––`
    Dashes,
    /// `[..]`, `( _ _ )`
    Bracketed,
    /// `. . . .`, `_ _ _`, `._._`
    Spaced,
}

impl BlankKind {
    /// All classes in the order they claim text.
    pub const PRECEDENCE: [BlankKind; 6] = [
        BlankKind::Dots,
        BlankKind::Ellipsis,
        BlankKind::Underscores,
        BlankKind::Dashes,
        BlankKind::Bracketed,
        BlankKind::Spaced,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            Self::Dots => &DOTS,
            Self::Ellipsis => &ELLIPSIS,
            Self::Underscores => &UNDERSCORES,
            Self::Dashes => &DASHES,
            Self::Bracketed => &BRACKETED,
            Self::Spaced => &SPACED,
        }
    }

    /// Post-match filter for conditions the regex engine cannot express.
    fn accepts(&self, text: &str, start: usize, end: usize) -> bool {
        let matched = &text[start..end];
        match self {
            // One ellipsis reads as three dots; short runs count unless they
            // trail a word, as in "and so on…".
            Self::Ellipsis => {
                matched.chars().count() >= MIN_BLANK_LENGTH
                    || !text[..start]
                        .chars()
                        .next_back()
                        .is_some_and(char::is_alphabetic)
            }
            Self::Bracketed => matches!(
                (matched.chars().next(), matched.chars().next_back()),
                (Some('['), Some(']')) | (Some('('), Some(')'))
            ),
            _ => true,
        }
    }
}

/// One blank region found by [`scan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlankMatch {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: BlankKind,
    /// Effective length: indicator characters (an ellipsis counts three),
    /// clamped to `[MIN_BLANK_LENGTH, MAX_BLANK_LENGTH]`.
    pub length: usize,
}

/// Finds every blank-indicator run in `text`, ordered by start offset.
pub fn scan(text: &str) -> Vec<BlankMatch> {
    let mut claims = Claims::default();
    let mut matches = Vec::new();

    for kind in BlankKind::PRECEDENCE {
        let found = claims.find_unclaimed(text, kind.regex(), |start, end| {
            kind.accepts(text, start, end)
        });
        for range in found {
            tracing::trace!(kind = ?kind, start = range.start, end = range.end, "blank matched");
            matches.push(BlankMatch {
                text: text[range.clone()].to_string(),
                start: range.start,
                end: range.end,
                kind,
                length: effective_length(&text[range.clone()]),
            });
            claims.claim(range);
        }
    }

    matches.sort_by_key(|m| m.start);
    matches
}

/// Counts indicator characters and clamps the result.
pub fn effective_length(matched: &str) -> usize {
    let raw: usize = matched
        .chars()
        .map(|ch| match ch {
            '…' => 3,
            '.' | '_' | '-' | '–' | '—' => 1,
            _ => 0,
        })
        .sum();
    raw.clamp(MIN_BLANK_LENGTH, MAX_BLANK_LENGTH)
}

/// Byte ranges already taken by an earlier, higher-priority pattern.
#[derive(Debug, Clone, Default)]
pub(crate) struct Claims {
    ranges: Vec<Range<usize>>,
}

impl Claims {
    pub(crate) fn claim(&mut self, range: Range<usize>) {
        let idx = self.ranges.partition_point(|r| r.start < range.start);
        self.ranges.insert(idx, range);
    }

    /// Unclaimed byte ranges of a text of length `len`.
    pub(crate) fn gaps(&self, len: usize) -> Vec<Range<usize>> {
        let mut gaps = Vec::with_capacity(self.ranges.len() + 1);
        let mut cursor = 0;
        for range in &self.ranges {
            if range.start > cursor {
                gaps.push(cursor..range.start);
            }
            cursor = cursor.max(range.end);
        }
        if cursor < len {
            gaps.push(cursor..len);
        }
        gaps
    }

    /// Runs `regex` over each gap separately and returns accepted matches
    /// as absolute ranges. Matches never cross a claimed region.
    pub(crate) fn find_unclaimed(
        &self,
        text: &str,
        regex: &Regex,
        mut accept: impl FnMut(usize, usize) -> bool,
    ) -> Vec<Range<usize>> {
        let mut found = Vec::new();
        for gap in self.gaps(text.len()) {
            let segment = &text[gap.clone()];
            for m in regex.find_iter(segment) {
                let start = gap.start + m.start();
                let end = gap.start + m.end();
                if accept(start, end) {
                    found.push(start..end);
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(BlankKind, String)> {
        scan(text).into_iter().map(|m| (m.kind, m.text)).collect()
    }

    #[test]
    fn finds_each_basic_class() {
        let found = kinds("Name: ..... Sign: _____ Date: ----- Ref: ………");
        assert_eq!(
            found,
            vec![
                (BlankKind::Dots, ".....".to_string()),
                (BlankKind::Underscores, "_____".to_string()),
                (BlankKind::Dashes, "-----".to_string()),
                (BlankKind::Ellipsis, "………".to_string()),
            ]
        );
    }

    #[test]
    fn short_runs_are_ignored() {
        assert!(scan("e.g. a well-known -- and .. or __").is_empty());
    }

    #[test]
    fn short_ellipsis_after_digit_is_a_blank() {
        let found = scan("dated this day of 20…");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "…");
        assert_eq!(found[0].length, 3);
    }

    #[test]
    fn short_ellipsis_trailing_a_word_is_prose() {
        assert!(scan("and so on…").is_empty());
    }

    #[test]
    fn bracketed_short_runs_and_spaced_runs() {
        let found = kinds("Unit [..] of ( _ ) at . . . . and [. . .]");
        assert_eq!(
            found,
            vec![
                (BlankKind::Bracketed, "[..]".to_string()),
                (BlankKind::Bracketed, "( _ )".to_string()),
                (BlankKind::Spaced, ". . . .".to_string()),
                (BlankKind::Bracketed, "[. . .]".to_string()),
            ]
        );
    }

    #[test]
    fn earlier_class_wins_inside_brackets() {
        let found = kinds("[.........]");
        assert_eq!(found, vec![(BlankKind::Dots, ".........".to_string())]);
    }

    #[test]
    fn mismatched_brackets_are_not_bracketed_blanks() {
        assert!(scan("see [..) here").is_empty());
    }

    #[test]
    fn spaced_run_counts_only_indicators() {
        let found = scan("at . . . . . here");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].length, 5);
    }

    #[test]
    fn length_is_clamped() {
        let long = ".".repeat(120);
        let found = scan(&long);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].length, MAX_BLANK_LENGTH);
        assert_eq!(found[0].end - found[0].start, 120);
        assert_eq!(effective_length("[..]"), MIN_BLANK_LENGTH);
        assert_eq!(effective_length("…………………………"), 30);
    }

    #[test]
    fn offsets_are_byte_offsets_in_order() {
        let text = "Café …… und ___";
        let found = scan(text);
        assert_eq!(found.len(), 2);
        assert_eq!(&text[found[0].start..found[0].end], "……");
        assert_eq!(&text[found[1].start..found[1].end], "___");
        assert!(found[0].start < found[1].start);
    }

    #[test]
    fn claims_report_gaps_between_ranges() {
        let mut claims = Claims::default();
        claims.claim(5..8);
        claims.claim(0..2);
        assert_eq!(claims.gaps(10), vec![2..5, 8..10]);
    }
}
