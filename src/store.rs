//! The label store: one widget session's state and its operations.
//!
//! A session is a fixed text plus a mapping of category name → labeled
//! spans, a selected category, and a couple of display flags. Every
//! mutation here is synchronous and total: it either updates the store and
//! emits the new mapping to the host's [`ValueSink`], or it is a no-op.
//! Nothing in this module blocks, retries, or errors once the store exists;
//! only construction from host-supplied data can fail.
//!
//! ## Flow
//!
//! ```text
//! raw selection offsets
//!        │
//!        ▼
//!   snap_selection ──► overlaps? ──► add or strip intervals
//!                                          │
//!                                          ▼
//!                              emit(sink)      segments()
//!                          (host observes)   (display recompute)
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::normalize::normalize_keys;
use crate::overlap::{overlaps, remove_overlapping};
use crate::render::{self, Segment};
use crate::snap::{clamp_selection, snap_selection};
use crate::{Interval, ValueSink};

/// Category name → labeled spans, in insertion order.
///
/// Insertion order is load-bearing: the selection repair rule falls back to
/// the first or last category, and hosts see keys in the order the user
/// created them.
pub type LabelMap = IndexMap<String, Vec<Interval>>;

/// Serialize a mapping into the JSON value shipped over the host channel.
///
/// # Errors
///
/// Returns [`Error::Payload`] if serialization fails.
pub fn to_value(labels: &LabelMap) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(labels)?)
}

/// Initial arguments from the host, received once per mount.
///
/// Mirrors the widget's init payload:
///
/// ```json
/// {
///   "text": "John lives in Berlin.",
///   "labels": {"Person": [{"start": 0, "end": 4, "label": "John"}]},
///   "in_snake_case": true,
///   "allow_new_labels": false
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct InitArgs {
    /// The session text, immutable until the next wholesale replacement.
    pub text: String,
    /// Initial category → spans mapping.
    #[serde(default)]
    pub labels: LabelMap,
    /// Whether emitted keys are rewritten to `snake_case`.
    #[serde(default)]
    pub in_snake_case: bool,
    /// Whether the user may add and remove categories.
    #[serde(default = "default_true")]
    pub allow_new_labels: bool,
    /// Initial display mode; absent keeps single-category display.
    #[serde(default)]
    pub show_all_labels: Option<bool>,
}

fn default_true() -> bool {
    true
}

/// One labeling session: the text, its labeled spans, and display state.
///
/// ## Example
///
/// ```rust
/// use spanmark::{InitArgs, LabelMap, LabelStore, NullSink};
///
/// let mut store = LabelStore::new(InitArgs {
///     text: "The cat sat".into(),
///     labels: LabelMap::new(),
///     in_snake_case: false,
///     allow_new_labels: true,
///     show_all_labels: None,
/// })
/// .unwrap();
///
/// let mut sink = NullSink;
/// store.add_label("Animal", &mut sink);
/// store.toggle_span(5, 6, &mut sink); // mid-"cat" drag
///
/// assert_eq!(store.labels()["Animal"][0].text, "cat");
/// ```
#[derive(Debug, Clone)]
pub struct LabelStore {
    text: String,
    labels: LabelMap,
    selected: Option<String>,
    show_all: bool,
    snake_case: bool,
    allow_new_labels: bool,
}

impl LabelStore {
    /// Build a store from init arguments, validating every initial span.
    ///
    /// # Errors
    ///
    /// Returns an error if any initial span is inverted, out of bounds, or
    /// splits a character. This is the one place untrusted data enters;
    /// everything after construction maintains the invariants itself.
    pub fn new(args: InitArgs) -> Result<Self> {
        validate(&args.text, &args.labels)?;
        Ok(Self {
            text: args.text,
            labels: args.labels,
            selected: None,
            show_all: args.show_all_labels.unwrap_or(false),
            snake_case: args.in_snake_case,
            allow_new_labels: args.allow_new_labels,
        })
    }

    /// Build a store from a raw JSON init payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Payload`] for malformed JSON, or any validation
    /// error from [`LabelStore::new`].
    pub fn from_json(payload: &str) -> Result<Self> {
        Self::new(serde_json::from_str(payload)?)
    }

    /// The session text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The current mapping, un-normalized (display names as typed).
    #[must_use]
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// The currently selected category, if any.
    ///
    /// May name a category that has since been removed; rendering repairs
    /// that, selection routing treats it as nothing selected.
    #[must_use]
    pub fn selected_label(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Whether all categories render simultaneously.
    #[must_use]
    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Switch between all-categories and single-category display.
    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    /// Wholesale state replacement from a host update event.
    ///
    /// The store is re-synthesized, not diffed: the host resends text and
    /// labels and the store takes them as given (after validation). The
    /// selected category carries over. `show_all` is only updated when the
    /// host sent it. Emits the new mapping.
    ///
    /// # Errors
    ///
    /// Returns a validation error and leaves the store untouched if any
    /// incoming span is invalid.
    pub fn set_text_and_labels(
        &mut self,
        text: String,
        labels: LabelMap,
        in_snake_case: bool,
        show_all: Option<bool>,
        sink: &mut dyn ValueSink,
    ) -> Result<()> {
        validate(&text, &labels)?;
        self.text = text;
        self.labels = labels;
        self.snake_case = in_snake_case;
        if let Some(show_all) = show_all {
            self.show_all = show_all;
        }
        self.emit(sink);
        Ok(())
    }

    /// Add a category and select it.
    ///
    /// The name is trimmed first. No-op when the trimmed name is empty or
    /// the host disallowed new labels. Adding a name that already exists
    /// resets it to an empty span list.
    pub fn add_label(&mut self, name: &str, sink: &mut dyn ValueSink) {
        if !self.allow_new_labels {
            log::debug!("add_label {name:?} ignored: new labels disallowed by host");
            return;
        }
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        self.labels.insert(trimmed.to_string(), Vec::new());
        self.selected = Some(trimmed.to_string());
        self.emit(sink);
    }

    /// Remove a category.
    ///
    /// No-op when the host disallowed new labels (the same policy flag
    /// governs add and remove) or the category does not exist. The selected
    /// category is deliberately not repaired here — rendering falls back on
    /// its own.
    pub fn remove_label(&mut self, name: &str, sink: &mut dyn ValueSink) {
        if !self.allow_new_labels {
            log::debug!("remove_label {name:?} ignored: new labels disallowed by host");
            return;
        }
        if self.labels.shift_remove(name).is_some() {
            self.emit(sink);
        }
    }

    /// Select the category that new selections are routed to.
    pub fn select_label(&mut self, name: &str) {
        self.selected = Some(name.to_string());
    }

    /// The selection entry point: toggle a labeled span under the raw
    /// selection offsets.
    ///
    /// The raw range is clamped and snapped outward to word boundaries. If
    /// the snapped range overlaps any stored span of the selected category,
    /// every overlapping span is removed; otherwise a new span is added.
    /// No-op when nothing (or a removed category) is selected, or the raw
    /// selection covers only whitespace. Emits after any mutation.
    pub fn toggle_span(&mut self, raw_start: usize, raw_end: usize, sink: &mut dyn ValueSink) {
        let Some(selected) = self.selected.clone() else {
            log::debug!("toggle_span ignored: no label selected");
            return;
        };
        if !self.labels.contains_key(&selected) {
            log::debug!("toggle_span ignored: selected label {selected:?} was removed");
            return;
        }

        let (raw_start, raw_end) = clamp_selection(&self.text, raw_start, raw_end);
        if self.text[raw_start..raw_end].trim().is_empty() {
            return;
        }
        let (start, end) = snap_selection(&self.text, raw_start, raw_end);

        let snippet = &self.text[start..end];
        if let Some(spans) = self.labels.get_mut(&selected) {
            if overlaps(start, end, spans) {
                *spans = remove_overlapping(start, end, std::mem::take(spans));
            } else {
                spans.push(Interval::new(snippet, start, end));
            }
        }
        self.emit(sink);
    }

    /// Send the current mapping to the host, keys normalized when the
    /// session asked for snake_case.
    ///
    /// Called by every mutating operation; call it directly for a pure
    /// re-render, since the channel is the single source of truth the host
    /// observes. Fire-and-forget: the sink must not block.
    pub fn emit(&self, sink: &mut dyn ValueSink) {
        sink.emit(&normalize_keys(&self.labels, self.snake_case));
    }

    /// Recompute the display segments for the current state.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        render::segments(self)
    }
}

/// Check every span of a host-supplied mapping against the text.
fn validate(text: &str, labels: &LabelMap) -> Result<()> {
    for (name, spans) in labels {
        for iv in spans {
            if iv.start >= iv.end {
                return Err(Error::InvertedSpan {
                    label: name.clone(),
                    start: iv.start,
                    end: iv.end,
                });
            }
            if iv.end > text.len() {
                return Err(Error::SpanOutOfBounds {
                    label: name.clone(),
                    start: iv.start,
                    end: iv.end,
                    len: text.len(),
                });
            }
            if !text.is_char_boundary(iv.start) || !text.is_char_boundary(iv.end) {
                return Err(Error::SpanSplitsChar {
                    label: name.clone(),
                    start: iv.start,
                    end: iv.end,
                });
            }
        }
    }
    Ok(())
}
