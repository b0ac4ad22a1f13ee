//! # spanmark
//!
//! The interval engine behind an interactive span-labeling widget.
//!
//! ## The Problem
//!
//! A user drags across a fixed text and assigns the selection to a named
//! category ("label"). Repeat that a few dozen times across a handful of
//! categories and three hard problems appear, none of them UI chrome:
//!
//! - A raw selection lands wherever the mouse went up — mid-word, half a
//!   token, trailing comma included. It has to be snapped to something a
//!   human would call a span.
//! - Selecting over already-labeled text must mean *remove*, not
//!   *add-a-duplicate*. That requires a correct overlap test, and overlap
//!   has more edge cases than it looks like it should.
//! - Spans from different categories overlap freely, but text renders as
//!   one linear run. Some total order of non-overlapping display segments
//!   has to be computed from the overlapping mess, every time anything
//!   changes.
//!
//! spanmark is exactly that core: snapping, overlap toggling, a label
//! store, sweep-line segmentation, and snake_case normalization of the
//! mapping emitted to the host. No DOM, no rendering, no transport — a
//! host feeds in flat byte offsets and receives segments and mappings back.
//!
//! ## Quick Start
//!
//! ```rust
//! use spanmark::{LabelStore, NullSink};
//!
//! let mut store = LabelStore::from_json(
//!     r#"{"text": "John lives in Berlin.", "labels": {}}"#,
//! ).unwrap();
//! let mut sink = NullSink;
//!
//! store.add_label("Person", &mut sink);
//! store.toggle_span(1, 2, &mut sink);   // sloppy drag inside "John"
//!
//! let spans = &store.labels()["Person"];
//! assert_eq!(spans[0].text, "John");    // snapped to the whole word
//!
//! store.toggle_span(0, 4, &mut sink);   // select it again: toggle off
//! assert!(store.labels()["Person"].is_empty());
//! ```
//!
//! ## Rendering
//!
//! [`LabelStore::segments`] flattens the current state into an ordered,
//! gap-free sequence of [`Segment`]s covering the whole text, each tagged
//! with at most one category. With every category visible, overlaps are
//! resolved by a sweep line: the most recently opened span wins.
//!
//! ```text
//! Person: [John]          [Berlin]
//! Place:        [lives in Berlin]
//!
//! Segments: |John| |lives in |Berlin|.|
//!            Pers.    Place    Pers.
//! ```
//!
//! ## The Host Channel
//!
//! Every mutation emits the full mapping through a [`ValueSink`] — the
//! widget's value channel to its host process. Emission is synchronous and
//! fire-and-forget; the host coalesces, last call wins. Implement the trait
//! over whatever transport the embedding provides, or use [`NullSink`] when
//! there is no host to notify.

mod error;
mod interval;
mod normalize;
mod overlap;
mod render;
mod snap;
mod store;

pub use error::{Error, Result};
pub use interval::Interval;
pub use normalize::{normalize_keys, snake_case};
pub use overlap::{overlaps, remove_overlapping};
pub use render::Segment;
pub use snap::snap_selection;
pub use store::{to_value, InitArgs, LabelMap, LabelStore};

/// The widget's value channel to its host.
///
/// The store calls [`ValueSink::emit`] with the full (optionally
/// snake_cased) mapping after every mutation and on every explicit
/// re-emission. Implementations must not block: delivery is
/// fire-and-forget and the host is expected to keep only the latest value.
///
/// ```rust
/// use spanmark::{LabelMap, ValueSink};
///
/// struct JsonChannel {
///     last: Option<String>,
/// }
///
/// impl ValueSink for JsonChannel {
///     fn emit(&mut self, labels: &LabelMap) {
///         self.last = spanmark::to_value(labels).ok().map(|v| v.to_string());
///     }
/// }
/// ```
pub trait ValueSink {
    /// Receive the current mapping. Called in mutation order.
    fn emit(&mut self, labels: &LabelMap);
}

/// A sink that discards every emission, for hosts that only poll the store.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ValueSink for NullSink {
    fn emit(&mut self, _labels: &LabelMap) {}
}
