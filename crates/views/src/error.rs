//! Error types for the views crate.
//!
//! Rule rejection is never an error: a rejected element is reported through
//! the return value of the call that tried to insert it (`false` or `None`).
//! The variants below cover the remaining misuse cases:
//! - building a view without a backing container or without a rule
//! - positional access outside the list bounds
//! - cursor mutation without a current element
//! - rule parameters that cannot describe a predicate

use thiserror::Error;

/// Errors that can occur while building or positionally addressing a view
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The builder was finished without a backing container
    #[error("Cannot build a filtered view without a backing container")]
    MissingBacking,

    /// The builder was finished without a rule
    #[error("Cannot build a filtered view without a rule")]
    MissingRule,

    /// A position fell outside the list
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A `[from, to)` range was inverted or ran past the end of the list
    #[error("Invalid range {from}..{to} for length {len}")]
    InvalidRange { from: usize, to: usize, len: usize },

    /// `set` or `remove` was called on a cursor that has no current element
    ///
    /// A cursor has a current element only right after `next` or `previous`,
    /// and loses it again on `add` or `remove`.
    #[error("Cursor has no current element")]
    NoCurrentElement,

    /// Rule parameters do not describe a usable predicate
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ViewError>;
