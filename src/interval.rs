//! The Interval type: a labeled span of text with position metadata.

use serde::{Deserialize, Serialize};

/// A labeled span: a half-open byte range into the session text, plus the
/// substring it covered when it was created.
///
/// ## Byte Offsets
///
/// `start` and `end` are byte offsets into the session text, not character
/// indices. This matches Rust's string slicing semantics:
///
/// ```rust
/// use spanmark::Interval;
///
/// let text = "Hello, world!";
/// let span = Interval::new("world", 7, 12);
///
/// // The offsets let you recover the original position
/// assert_eq!(&text[span.start..span.end], "world");
/// ```
///
/// ## Captured Text
///
/// `text` is stored redundantly, not re-derived from the session text. The
/// host observes the mapping through the value channel, where each span must
/// be self-describing:
///
/// ```json
/// {"start": 7, "end": 12, "label": "world"}
/// ```
///
/// The wire field is named `label` (it carries the labeled substring), which
/// is what annotation hosts expect to read back.
///
/// ## Invariant
///
/// `start < end` always — a zero-length span is meaningless and is never
/// stored. [`Interval::new`] asserts this in debug builds; host-supplied
/// spans go through [`Interval::try_new`] instead, because a widget cannot
/// trust its init payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Byte offset where this span starts in the session text.
    pub start: usize,
    /// Byte offset where this span ends (exclusive) in the session text.
    pub end: usize,
    /// The covered substring, captured at creation time.
    #[serde(rename = "label")]
    pub text: String,
}

impl Interval {
    /// Create a new interval.
    ///
    /// Debug-asserts `start < end`; producing an empty or inverted span is a
    /// defect in the caller, not a runtime condition.
    #[must_use]
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        debug_assert!(start < end, "empty interval {start}..{end}");
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Create an interval from untrusted offsets, capturing the substring
    /// from `source`.
    ///
    /// Returns `None` when the span is inverted, out of bounds, or splits a
    /// character. Used to validate host-supplied initial labels.
    #[must_use]
    pub fn try_new(source: &str, start: usize, end: usize) -> Option<Self> {
        if start >= end || end > source.len() {
            return None;
        }
        let text = source.get(start..end)?;
        Some(Self::new(text, start, end))
    }

    /// The length of this span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The byte range of this span in the session text.
    #[must_use]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Whether this span intersects the half-open range `[start, end)`.
    ///
    /// This single test covers every overlap shape: containment in either
    /// direction, and partial overlap from either side.
    #[must_use]
    pub fn intersects(&self, start: usize, end: usize) -> bool {
        start < self.end && end > self.start
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{} {:?}", self.start, self.end, self.text)
    }
}
