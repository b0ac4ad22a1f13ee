//! Segmentation rendering: from labeled intervals to a flat display sequence.
//!
//! A renderer cannot draw overlapping spans directly — the text is one
//! linear run. Both modes here reduce the store to an ordered list of
//! [`Segment`]s that cover the text exactly once, each tagged with at most
//! one category.
//!
//! ## Single-Category Mode
//!
//! Only the selected category is shown. Its intervals are sorted by start
//! and walked left to right, alternating unlabeled gaps and labeled runs:
//!
//! ```text
//! Text:      The cat sat on the mat
//! Intervals:     [cat]       [the]
//! Segments:  |The |cat| sat on |the| mat|
//!             none  C    none    C   none
//! ```
//!
//! ## All-Categories Mode (Sweep Line)
//!
//! Every interval from every category is flattened into start/end events
//! and swept left to right with a LIFO stack of open intervals. Between
//! consecutive event positions one segment is emitted, tagged with the
//! stack's top — the most recently opened, still-open interval. So when
//! spans overlap, the innermost one wins visually:
//!
//! ```text
//! X: [0────────10)
//! Y:      [5────────15)
//!
//! Events:   0:start X   5:start Y   10:end X   15:end Y
//! Segments: [0,5) X   [5,10) Y   [10,15) Y
//! ```
//!
//! At equal positions end events sort before start events, so a span ending
//! exactly where another begins never produces a phantom one-position
//! overlap. End events remove their own interval from the stack by
//! identity — not by popping — because improperly nested intervals can
//! close in any order.

use crate::store::{LabelMap, LabelStore};
use crate::Interval;

/// One run of display text: a contiguous byte range and the category shown
/// over it, if any.
///
/// The segment list produced for a store partitions `[0, text.len())`:
/// concatenating the ranges in order reconstructs the text with no gaps and
/// no overlaps.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Segment {
    /// Byte offset where this run starts.
    pub start: usize,
    /// Byte offset where this run ends (exclusive).
    pub end: usize,
    /// The topmost category covering this run, or `None` for plain text.
    pub label: Option<String>,
}

impl Segment {
    /// The text this segment covers.
    #[must_use]
    pub fn slice<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start..self.end]
    }
}

/// Render the store into its display segments.
///
/// Dispatches on the store's display mode and applies the selection repair
/// rule: an unset selection falls back to the first category, a selection
/// pointing at a removed category falls back to the last one, and an empty
/// mapping renders the whole text as a single unlabeled run.
#[must_use]
pub fn segments(store: &LabelStore) -> Vec<Segment> {
    let text = store.text();
    let labels = store.labels();

    if labels.is_empty() {
        return unlabeled_whole(text);
    }
    if store.show_all() {
        return sweep(text, labels);
    }

    let key = match store.selected_label() {
        Some(sel) if labels.contains_key(sel) => Some(sel),
        // Selection points at a removed category: last key wins.
        Some(_) => labels.keys().next_back().map(String::as_str),
        // Nothing selected yet: first key wins.
        None => labels.keys().next().map(String::as_str),
    };
    match key {
        Some(key) => single(text, &labels[key], key),
        None => unlabeled_whole(text),
    }
}

/// The whole text as one unlabeled segment (none at all for empty text).
fn unlabeled_whole(text: &str) -> Vec<Segment> {
    if text.is_empty() {
        return vec![];
    }
    vec![Segment {
        start: 0,
        end: text.len(),
        label: None,
    }]
}

/// Single-category walk: gap, labeled run, gap, labeled run, trailing gap.
///
/// Overlapping intervals within one category are not merged; they emit
/// consecutive labeled segments with no gap between them, which is fine
/// because both carry the same category.
fn single(text: &str, intervals: &[Interval], label: &str) -> Vec<Segment> {
    let mut sorted: Vec<&Interval> = intervals.iter().collect();
    sorted.sort_by_key(|iv| iv.start); // stable: ties keep insertion order

    let mut out = Vec::with_capacity(sorted.len() * 2 + 1);
    let mut cursor = 0;
    for iv in sorted {
        if cursor < iv.start {
            out.push(Segment {
                start: cursor,
                end: iv.start,
                label: None,
            });
        }
        out.push(Segment {
            start: iv.start,
            end: iv.end,
            label: Some(label.to_string()),
        });
        cursor = cursor.max(iv.end);
    }
    if cursor < text.len() {
        out.push(Segment {
            start: cursor,
            end: text.len(),
            label: None,
        });
    }
    out
}

/// A sweep-line event: one interval opening or closing.
struct Event {
    pos: usize,
    is_end: bool,
    /// Index into the flattened interval list; identifies the interval.
    tag: usize,
}

/// All-categories sweep line over the flattened, category-tagged intervals.
fn sweep(text: &str, labels: &LabelMap) -> Vec<Segment> {
    let mut tagged: Vec<(&str, &Interval)> = Vec::new();
    for (name, spans) in labels {
        for iv in spans {
            tagged.push((name.as_str(), iv));
        }
    }
    tagged.sort_by_key(|(_, iv)| iv.start);

    let mut events = Vec::with_capacity(tagged.len() * 2);
    for (tag, (_, iv)) in tagged.iter().enumerate() {
        events.push(Event {
            pos: iv.start,
            is_end: false,
            tag,
        });
        events.push(Event {
            pos: iv.end,
            is_end: true,
            tag,
        });
    }
    // Position ascending; at equal positions, ends before starts.
    events.sort_by(|a, b| a.pos.cmp(&b.pos).then_with(|| b.is_end.cmp(&a.is_end)));

    let mut out = Vec::new();
    let mut active: Vec<usize> = Vec::new();
    let mut cursor = 0;

    for ev in &events {
        if cursor < ev.pos {
            out.push(Segment {
                start: cursor,
                end: ev.pos,
                label: active.last().map(|&t| tagged[t].0.to_string()),
            });
            cursor = ev.pos;
        }
        if ev.is_end {
            // Removal by identity: the closing interval may not be on top
            // when spans are improperly nested.
            if let Some(i) = active.iter().position(|&t| t == ev.tag) {
                active.remove(i);
            }
        } else {
            active.push(ev.tag);
        }
    }
    // Every interval closed at its own end event.
    debug_assert!(active.is_empty(), "interval open past its own end event");

    if cursor < text.len() {
        out.push(Segment {
            start: cursor,
            end: text.len(),
            label: active.last().map(|&t| tagged[t].0.to_string()),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InitArgs;

    fn store(text: &str, labels: &[(&str, &[(usize, usize)])], show_all: bool) -> LabelStore {
        let mut map = LabelMap::new();
        for (name, spans) in labels {
            let spans = spans
                .iter()
                .map(|&(s, e)| Interval::new(&text[s..e], s, e))
                .collect();
            map.insert((*name).to_string(), spans);
        }
        LabelStore::new(InitArgs {
            text: text.to_string(),
            labels: map,
            in_snake_case: false,
            allow_new_labels: true,
            show_all_labels: Some(show_all),
        })
        .unwrap()
    }

    fn ranges(segments: &[Segment]) -> Vec<(usize, usize, Option<&str>)> {
        segments
            .iter()
            .map(|s| (s.start, s.end, s.label.as_deref()))
            .collect()
    }

    #[test]
    fn test_innermost_wins() {
        let text = "0123456789ABCDEF";
        let s = store(text, &[("X", &[(0, 10)]), ("Y", &[(5, 15)])], true);
        assert_eq!(
            ranges(&segments(&s)),
            vec![
                (0, 5, Some("X")),
                (5, 10, Some("Y")),
                (10, 15, Some("Y")),
                (15, 16, None),
            ]
        );
    }

    #[test]
    fn test_adjacent_spans_no_phantom_overlap() {
        // X ends exactly where Y begins; the end-before-start tie break
        // keeps the boundary clean.
        let text = "aaaaabbbb";
        let s = store(text, &[("X", &[(0, 5)]), ("Y", &[(5, 9)])], true);
        assert_eq!(
            ranges(&segments(&s)),
            vec![(0, 5, Some("X")), (5, 9, Some("Y"))]
        );
    }

    #[test]
    fn test_improper_nesting_closes_by_identity() {
        // X opens first and closes while Y (opened inside it) is still on
        // the stack; Y must survive the removal.
        let text = "abcdefghijklmnop";
        let s = store(text, &[("X", &[(0, 8)]), ("Y", &[(4, 12)])], true);
        assert_eq!(
            ranges(&segments(&s)),
            vec![
                (0, 4, Some("X")),
                (4, 8, Some("Y")),
                (8, 12, Some("Y")),
                (12, 16, None),
            ]
        );
    }

    #[test]
    fn test_nested_spans_inner_then_outer_resumes() {
        let text = "abcdefghijkl";
        let s = store(text, &[("X", &[(0, 12)]), ("Y", &[(4, 8)])], true);
        assert_eq!(
            ranges(&segments(&s)),
            vec![(0, 4, Some("X")), (4, 8, Some("Y")), (8, 12, Some("X"))]
        );
    }

    #[test]
    fn test_sweep_partitions_text() {
        let text = "The quick brown fox jumps over the lazy dog.";
        let s = store(
            text,
            &[
                ("animal", &[(4, 19), (35, 43)]),
                ("speed", &[(4, 9), (20, 25)]),
            ],
            true,
        );
        let segs = segments(&s);
        let mut cursor = 0;
        for seg in &segs {
            assert_eq!(seg.start, cursor, "gap or overlap at {cursor}");
            assert!(seg.start < seg.end);
            cursor = seg.end;
        }
        assert_eq!(cursor, text.len());
    }

    #[test]
    fn test_single_mode_walk() {
        let text = "The cat sat on the mat";
        let s = store(text, &[("noun", &[(4, 7), (19, 22)])], false);
        assert_eq!(
            ranges(&segments(&s)),
            vec![
                (0, 4, None),
                (4, 7, Some("noun")),
                (7, 19, None),
                (19, 22, Some("noun")),
            ]
        );
    }

    #[test]
    fn test_single_mode_ignores_other_categories() {
        let text = "The cat sat";
        let mut s = store(text, &[("noun", &[(4, 7)]), ("verb", &[(8, 11)])], false);
        s.select_label("noun");
        let segs = segments(&s);
        assert!(segs.iter().all(|seg| seg.label.as_deref() != Some("verb")));
    }

    #[test]
    fn test_single_mode_unsorted_intervals() {
        let text = "one two three four";
        let s = store(text, &[("w", &[(8, 13), (0, 3)])], false);
        assert_eq!(
            ranges(&segments(&s)),
            vec![
                (0, 3, Some("w")),
                (3, 8, None),
                (8, 13, Some("w")),
                (13, 18, None),
            ]
        );
    }

    #[test]
    fn test_single_mode_same_category_overlap_keeps_both() {
        let text = "abcdefghij";
        let s = store(text, &[("w", &[(0, 6), (4, 9)])], false);
        assert_eq!(
            ranges(&segments(&s)),
            vec![(0, 6, Some("w")), (4, 9, Some("w")), (9, 10, None)]
        );
    }

    #[test]
    fn test_unset_selection_falls_back_to_first_category() {
        let text = "The cat sat";
        let s = store(text, &[("noun", &[(4, 7)]), ("verb", &[(8, 11)])], false);
        let segs = segments(&s);
        assert!(segs.iter().any(|seg| seg.label.as_deref() == Some("noun")));
    }

    #[test]
    fn test_removed_selection_falls_back_to_last_category() {
        let text = "The cat sat";
        let mut s = store(text, &[("noun", &[(4, 7)]), ("verb", &[(8, 11)])], false);
        s.select_label("gone");
        let segs = segments(&s);
        assert!(segs.iter().any(|seg| seg.label.as_deref() == Some("verb")));
    }

    #[test]
    fn test_empty_mapping_renders_plain_text() {
        let s = store("Just text", &[], false);
        assert_eq!(ranges(&segments(&s)), vec![(0, 9, None)]);
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        let s = store("", &[], true);
        assert!(segments(&s).is_empty());
    }

    #[test]
    fn test_segment_slice() {
        let text = "The cat sat";
        let s = store(text, &[("noun", &[(4, 7)])], false);
        let segs = segments(&s);
        assert_eq!(segs[1].slice(text), "cat");
    }
}
