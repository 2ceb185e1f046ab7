//! Errors raised by cursors and bounded views.
//!
//! Absence is never an error: lookups such as `get` or `ceiling_key` return `None`.

use std::fmt;

/// A specialized `Result` for tree operations that can fail.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by fail-fast cursors and range-checked views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The cursor was advanced past the last element of its traversal.
    NoSuchElement,
    /// `remove` or `set_value` was called before any successful `next`, or twice
    /// without an intervening `next`.
    IllegalState,
    /// The backing tree was structurally modified by something other than this cursor.
    ConcurrentModification { expected: usize, found: usize },
    /// A range was requested whose lower bound is greater than its upper bound.
    InvalidRange,
    /// A key lies outside the range of the view it was given to.
    KeyOutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchElement => write!(f, "no more elements in traversal"),
            Self::IllegalState => write!(f, "no element to act on: call `next` first"),
            Self::ConcurrentModification { expected, found } => write!(
                f,
                "tree modified during traversal: expected modification count {expected}, found {found}"
            ),
            Self::InvalidRange => write!(f, "lower bound is greater than upper bound"),
            Self::KeyOutOfRange => write!(f, "key out of range"),
        }
    }
}

impl std::error::Error for Error {}
