//! Placeholder tagging.
//!
//! Wraps every blank found by the pattern matcher in an inert marker and
//! builds the ordered placeholder list. Tagging is idempotent: existing
//! markers are unwrapped before scanning, and ids depend only on the
//! un-annotated text.

use lts_model::{Category, Placeholder, PlaceholderId, ScanId};
use sha2::{Digest, Sha256};

use crate::markers;
use crate::scan::{BlankMatch, scan};

/// Bytes of the SHA-256 digest kept in a [`ScanId`].
const FINGERPRINT_BYTES: usize = 8;

/// Output of one tag pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedDocument {
    /// Marker-free text the pass scanned.
    pub source_text: String,
    /// `source_text` with every blank wrapped in a pending marker.
    pub annotated_text: String,
    pub placeholders: Vec<Placeholder>,
    pub scan_id: ScanId,
    /// Source position and marker overhead of each placeholder.
    shifts: Vec<Shift>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shift {
    /// Source offset of the blank.
    at: usize,
    /// Source offset just past the blank.
    until: usize,
    /// Length of the opening tag.
    open: usize,
    /// Bytes the whole marker adds.
    total: usize,
}

impl TaggedDocument {
    /// Translates a byte offset in `source_text` to `annotated_text`.
    ///
    /// Offsets inside a blank land inside the corresponding marker body.
    pub fn annotated_offset(&self, source_offset: usize) -> usize {
        let mut offset = source_offset;
        for shift in &self.shifts {
            if shift.until <= source_offset {
                offset += shift.total;
            } else if shift.at <= source_offset {
                offset += shift.open;
            } else {
                break;
            }
        }
        offset
    }

    /// Source byte ranges covered by blanks.
    pub fn blank_ranges(&self) -> impl Iterator<Item = std::ops::Range<usize>> + '_ {
        self.shifts.iter().map(|shift| shift.at..shift.until)
    }
}

/// Fingerprint of marker-free text.
pub fn fingerprint(text: &str) -> ScanId {
    let digest = Sha256::digest(text.as_bytes());
    ScanId::new(hex::encode(&digest[..FINGERPRINT_BYTES])).expect("hex digest is a valid scan id")
}

/// Tags every blank in `text`.
///
/// `text` may already be annotated; markers are unwrapped first so the
/// result matches tagging the plain text.
pub fn tag(text: &str) -> TaggedDocument {
    let source_text = if markers::contains_markers(text) {
        markers::strip(text)
    } else {
        text.to_string()
    };
    let scan_id = fingerprint(&source_text);
    let blanks = scan(&source_text);

    let mut annotated_text = String::with_capacity(source_text.len() + blanks.len() * 48);
    let mut placeholders = Vec::with_capacity(blanks.len());
    let mut shifts = Vec::with_capacity(blanks.len());
    let mut cursor = 0;

    for (idx, blank) in blanks.iter().enumerate() {
        let order = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        let id = PlaceholderId::new(scan_id.clone(), order);
        let marker = markers::pending(&id, blank.length, &blank.text);
        let total = marker.len() - blank.text.len();

        annotated_text.push_str(&source_text[cursor..blank.start]);
        annotated_text.push_str(&marker);
        cursor = blank.end;

        shifts.push(Shift {
            at: blank.start,
            until: blank.end,
            open: total - markers::CLOSE.len(),
            total,
        });
        placeholders.push(placeholder(id, order, blank));
    }
    annotated_text.push_str(&source_text[cursor..]);

    tracing::debug!(
        scan_id = %scan_id,
        placeholders = placeholders.len(),
        "tagged document"
    );

    TaggedDocument {
        source_text,
        annotated_text,
        placeholders,
        scan_id,
        shifts,
    }
}

fn placeholder(id: PlaceholderId, order: u32, blank: &BlankMatch) -> Placeholder {
    Placeholder {
        id,
        position: blank.start,
        length: blank.length,
        original_text: blank.text.clone(),
        order,
        category: Category::Other,
        description: format!("Placeholder {order}"),
        value: String::new(),
        filled: false,
    }
}
