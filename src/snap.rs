//! Selection boundary snapping.
//!
//! Raw selection offsets come from a UI collaborator that counts characters
//! across rendered text nodes. Users rarely select cleanly: a drag often
//! starts mid-word or releases one character early. Snapping widens the raw
//! range outward until both edges sit on a space, an ASCII punctuation
//! character, or the edge of the text:
//!
//! ```text
//! Text:       The cat, sat.
//! Raw:            [a]          (5..6, mid-word)
//! Snapped:       [cat]         (4..7, whole word)
//! ```
//!
//! Snapping only ever widens. A selection bounded by whitespace or
//! punctuation is left alone, and the walk can never cross a boundary
//! character the selection did not already contain — so a word-sized
//! selection never grows into its neighbors.
//!
//! The boundary set is fixed ASCII punctuation plus the space character.
//! Broader word-boundary rules (UAX #29 and friends) are deliberately out:
//! the snapped range must be predictable to the user watching the highlight.

/// Characters that terminate the outward walk, besides the space.
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Whether a character stops the outward walk.
fn is_break(c: char) -> bool {
    c == ' ' || PUNCTUATION.contains(c)
}

/// Clamp raw offsets into the text and align them to char boundaries.
///
/// Out-of-range or swapped offsets mean the selection collaborator
/// miscounted; that is logged as a bug upstream, never a failure here.
pub(crate) fn clamp_selection(text: &str, raw_start: usize, raw_end: usize) -> (usize, usize) {
    let len = text.len();
    let mut start = raw_start;
    let mut end = raw_end;

    if start > len || end > len {
        log::warn!("selection {raw_start}..{raw_end} exceeds text length {len}, clamping");
        start = start.min(len);
        end = end.min(len);
    }
    if start > end {
        log::warn!("selection {raw_start}..{raw_end} is inverted, reordering");
        std::mem::swap(&mut start, &mut end);
    }
    // Align inward-pointing offsets outward to char boundaries.
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    while !text.is_char_boundary(end) {
        end += 1;
    }
    (start, end)
}

/// Widen a raw selection outward to the nearest space/punctuation boundary.
///
/// ## Example
///
/// ```rust
/// use spanmark::snap_selection;
///
/// // Mid-word selection grows to the whole word
/// assert_eq!(snap_selection("The cat, sat.", 5, 6), (4, 7));
///
/// // No boundary until the string edges: the whole text is taken
/// assert_eq!(snap_selection("cats", 1, 2), (0, 4));
///
/// // Already bounded by a space and a comma: unchanged
/// assert_eq!(snap_selection("The cat, sat.", 4, 7), (4, 7));
/// ```
#[must_use]
pub fn snap_selection(text: &str, raw_start: usize, raw_end: usize) -> (usize, usize) {
    let (mut start, mut end) = clamp_selection(text, raw_start, raw_end);

    // Walk left while the char before the start is not a boundary.
    while let Some(c) = text[..start].chars().next_back() {
        if is_break(c) {
            break;
        }
        start -= c.len_utf8();
    }
    // Walk right while the char at the end is not a boundary.
    while let Some(c) = text[end..].chars().next() {
        if is_break(c) {
            break;
        }
        end += c.len_utf8();
    }
    (start, end)
}
