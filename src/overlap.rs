//! Overlap detection between a candidate range and stored intervals.
//!
//! This is what turns a selection gesture into a toggle: selecting over
//! already-labeled text removes labels, selecting over clean text adds one.
//!
//! ## One Predicate, Four Shapes
//!
//! Two half-open ranges `[s, e)` and `[ls, le)` overlap in four apparent
//! ways:
//!
//! ```text
//! candidate   [------)          [--)        [-----)        [-----)
//! stored        [--)          [------)          [-----)  [-----)
//!             contains        contained     left partial  right partial
//! ```
//!
//! All four collapse into the single intersection test
//! `s < le && e > ls`, which is what [`Interval::intersects`] implements.
//! The enumerated shapes survive as regression tests below.
//!
//! Touching ranges do not overlap: `[0, 5)` and `[5, 9)` share only a
//! boundary, and selecting one must never toggle the other.

use crate::Interval;

/// Whether `[start, end)` intersects any interval in the list.
///
/// ## Example
///
/// ```rust
/// use spanmark::{overlaps, Interval};
///
/// let stored = vec![Interval::new("cat", 4, 7)];
/// assert!(overlaps(5, 9, &stored));
/// assert!(!overlaps(7, 9, &stored)); // touching is not overlapping
/// ```
#[must_use]
pub fn overlaps(start: usize, end: usize, intervals: &[Interval]) -> bool {
    intervals.iter().any(|iv| iv.intersects(start, end))
}

/// Drop every interval that intersects `[start, end)`.
///
/// A single selection can sweep away several stored spans at once; that is
/// the toggle rule, not an accident (a second selection over a labeled
/// region clears everything it touches).
#[must_use]
pub fn remove_overlapping(start: usize, end: usize, intervals: Vec<Interval>) -> Vec<Interval> {
    intervals
        .into_iter()
        .filter(|iv| !iv.intersects(start, end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: usize, end: usize) -> Interval {
        Interval::new("x", start, end)
    }

    // The four enumerated overlap shapes, verified against the single
    // intersection predicate.

    #[test]
    fn test_candidate_contains_stored() {
        assert!(overlaps(0, 10, &[iv(3, 6)]));
    }

    #[test]
    fn test_candidate_contained_in_stored() {
        assert!(overlaps(3, 6, &[iv(0, 10)]));
    }

    #[test]
    fn test_left_partial_overlap() {
        // s <= ls < e <= le
        assert!(overlaps(0, 5, &[iv(3, 8)]));
    }

    #[test]
    fn test_right_partial_overlap() {
        // s >= ls, s < le <= e
        assert!(overlaps(5, 10, &[iv(3, 8)]));
    }

    #[test]
    fn test_identical_ranges_overlap() {
        assert!(overlaps(3, 8, &[iv(3, 8)]));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        assert!(!overlaps(0, 5, &[iv(5, 9)]));
        assert!(!overlaps(5, 9, &[iv(0, 5)]));
    }

    #[test]
    fn test_disjoint_ranges_do_not_overlap() {
        assert!(!overlaps(0, 3, &[iv(7, 9)]));
    }

    #[test]
    fn test_empty_list_never_overlaps() {
        assert!(!overlaps(0, 100, &[]));
    }

    #[test]
    fn test_remove_overlapping_strips_several() {
        let stored = vec![iv(0, 4), iv(5, 8), iv(10, 14), iv(20, 24)];
        let kept = remove_overlapping(2, 12, stored);
        assert_eq!(kept, vec![iv(20, 24)]);
    }

    #[test]
    fn test_remove_overlapping_keeps_touching() {
        let stored = vec![iv(0, 5), iv(5, 9)];
        let kept = remove_overlapping(0, 5, stored);
        assert_eq!(kept, vec![iv(5, 9)]);
    }
}
