//! Error types for spanmark.
//!
//! Errors only occur at the host boundary: a malformed init payload, or
//! initial labels whose spans don't fit the text. Interactive operations
//! (selection toggling, adding/removing labels) never fail — invalid input
//! is a logged no-op, because a labeling widget has no error UI to show.

/// Errors that can occur while building a store from host-supplied data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The init payload or an emitted value could not be (de)serialized.
    #[error("value channel payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// An initial span has `start >= end`.
    #[error("label {label:?}: span {start}..{end} is inverted (start must be < end)")]
    InvertedSpan {
        /// The category the span belongs to.
        label: String,
        /// Span start offset.
        start: usize,
        /// Span end offset.
        end: usize,
    },

    /// An initial span extends past the end of the text.
    #[error("label {label:?}: span {start}..{end} exceeds text length {len}")]
    SpanOutOfBounds {
        /// The category the span belongs to.
        label: String,
        /// Span start offset.
        start: usize,
        /// Span end offset.
        end: usize,
        /// Byte length of the session text.
        len: usize,
    },

    /// An initial span does not fall on character boundaries of the text.
    #[error("label {label:?}: span {start}..{end} splits a character")]
    SpanSplitsChar {
        /// The category the span belongs to.
        label: String,
        /// Span start offset.
        start: usize,
        /// Span end offset.
        end: usize,
    },
}

/// Result type for spanmark operations.
pub type Result<T> = std::result::Result<T, Error>;
