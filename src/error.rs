//! Error types for sequences and cursors.
//!
//! Every fallible call in this crate returns [`SequenceResult`]. Errors are
//! raised by the call that pulls elements (a cursor advance or a terminal
//! operator) and propagate straight to its caller; no operator catches or
//! retries on the caller's behalf.

use thiserror::Error;

/// Errors raised while pulling elements from a sequence.
///
/// # Examples
///
/// ```rust
/// use lazyseq::{Sequence, SequenceError};
///
/// let empty: Sequence<i32> = Sequence::empty();
/// assert_eq!(
///     empty.first(),
///     Err(SequenceError::EmptySequence { operation: "first" })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// The operation needs at least one element and the source had none.
    #[error("{operation}: sequence contains no elements")]
    EmptySequence {
        /// The operator that required an element.
        operation: &'static str,
    },

    /// The source had elements, but none satisfied the predicate.
    #[error("{operation}: sequence contains no matching element")]
    NoMatchingElement {
        /// The operator that required a matching element.
        operation: &'static str,
    },

    /// The operation needs exactly one element and the source had more.
    #[error("{operation}: sequence contains more than one element")]
    MoreThanOneElement {
        /// The operator that required a single element.
        operation: &'static str,
    },

    /// A positional lookup ran past the end of the source.
    #[error("index {index} is out of range for a sequence of {length} elements")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The number of elements the source actually produced.
        length: usize,
    },

    /// Cursors never support reset. Request a fresh cursor instead.
    #[error("cursors cannot be reset; request a fresh cursor from the sequence")]
    ResetNotSupported,

    /// A sequence wrapping a single concrete cursor was iterated twice.
    #[error("cursor-backed sequence already consumed; it can be iterated only once")]
    AlreadyConsumed,

    /// A cursor reported a successful advance but had no current element.
    #[error("cursor has no current element after a successful advance")]
    CursorNotPositioned,

    /// A memoized factory panicked during its first evaluation.
    #[error("deferred factory panicked during evaluation")]
    Poisoned,
}

/// Result alias used across the crate.
pub type SequenceResult<T> = Result<T, SequenceError>;
