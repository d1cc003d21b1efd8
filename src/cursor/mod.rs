//! The cursor protocol.
//!
//! A [`Cursor`] is the stateful half of iteration: it walks one sequence,
//! one element at a time, for exactly one consumer. Sequences
//! ([`Sequence`](crate::Sequence)) are the stateless half and mint a fresh
//! cursor per request.
//!
//! # Lifecycle
//!
//! ```text
//!   open ──► try_advance ──true──► current ──┐
//!              ▲                              │
//!              └──────────────────────────────┘
//!              │
//!            false ──► (exhausted, stays false) ──► dispose
//! ```
//!
//! - [`Cursor::current`] is `Some` only directly after `try_advance`
//!   returned `Ok(true)`.
//! - Once exhausted, `try_advance` keeps returning `Ok(false)`.
//! - [`Cursor::dispose`] is idempotent and releases any sub-cursors.
//! - [`Cursor::reset`] is never supported.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::Sequence;
//!
//! let sequence = Sequence::from_vec(vec![1, 2]);
//! let mut cursor = sequence.cursor().unwrap();
//!
//! assert_eq!(cursor.current(), None);
//! assert!(cursor.try_advance().unwrap());
//! assert_eq!(cursor.current(), Some(&1));
//! assert!(cursor.try_advance().unwrap());
//! assert!(!cursor.try_advance().unwrap());
//! assert!(!cursor.try_advance().unwrap());
//! cursor.dispose();
//! ```

mod iter;
mod stock;

pub use iter::Iter;
pub use stock::{
    EmptyCursor, GenerateCursor, IteratorCursor, OnceCursor, RangeCursor, RepeatCursor,
    SliceCursor,
};

use crate::error::{SequenceError, SequenceResult};

/// A stateful, single-consumer position within a sequence.
pub trait Cursor {
    /// The element type.
    type Item;

    /// Moves to the next element and returns whether one exists.
    ///
    /// # Errors
    ///
    /// Propagates any error raised while producing the element, for
    /// example opening a sub-sequence that was already consumed.
    fn try_advance(&mut self) -> SequenceResult<bool>;

    /// Returns the element the cursor is positioned on.
    ///
    /// `None` before the first successful advance and after exhaustion.
    fn current(&self) -> Option<&Self::Item>;

    /// Releases held resources. Calling it more than once is harmless.
    fn dispose(&mut self) {}

    /// Cursors cannot be rewound.
    ///
    /// # Errors
    ///
    /// Always returns [`SequenceError::ResetNotSupported`].
    fn reset(&mut self) -> SequenceResult<()> {
        Err(SequenceError::ResetNotSupported)
    }

    /// Advances and returns the new current element, or `None` at the end.
    ///
    /// # Errors
    ///
    /// Propagates advance errors, and returns
    /// [`SequenceError::CursorNotPositioned`] if the cursor claims an
    /// element but exposes none.
    fn advance(&mut self) -> SequenceResult<Option<&Self::Item>> {
        if !self.try_advance()? {
            return Ok(None);
        }
        self.current()
            .map(Some)
            .ok_or(SequenceError::CursorNotPositioned)
    }
}

/// An owned, type-erased cursor.
pub type BoxCursor<T> = Box<dyn Cursor<Item = T>>;

/// Boxes a freshly built cursor as the result of a successful open.
///
/// Handy inside [`Source::open`](crate::Source::open) implementations and
/// [`Sequence::from_opener`](crate::Sequence::from_opener) closures.
#[inline]
pub fn opened<C>(cursor: C) -> SequenceResult<BoxCursor<C::Item>>
where
    C: Cursor + 'static,
{
    Ok(Box::new(cursor))
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    #[inline]
    fn try_advance(&mut self) -> SequenceResult<bool> {
        (**self).try_advance()
    }

    #[inline]
    fn current(&self) -> Option<&Self::Item> {
        (**self).current()
    }

    #[inline]
    fn dispose(&mut self) {
        (**self).dispose();
    }

    #[inline]
    fn reset(&mut self) -> SequenceResult<()> {
        (**self).reset()
    }
}
