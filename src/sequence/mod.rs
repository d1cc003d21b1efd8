//! Deferred, re-iterable sequences.
//!
//! A [`Sequence`] is a cheap-to-clone handle to a [`Source`], something that
//! can mint cursors. Sequences never hold iteration state; all of it lives
//! in the cursors they hand out. Building a sequence, or chaining operators
//! onto one, does no work. Work starts when a consumer requests a cursor
//! and advances it.
//!
//! # Construction Modes
//!
//! | Constructor | Factory runs | Replays |
//! |---|---|---|
//! | [`Sequence::memoized`] | once, on first cursor request | if the produced sequence does |
//! | [`Sequence::defer`] | on every cursor request | yes |
//! | [`Sequence::from_cursor`] | never, the cursor is given | no, second request fails |
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::Sequence;
//!
//! let numbers = Sequence::range(1, 10);
//! let even_squares = numbers
//!     .filter(|value| value % 2 == 0)
//!     .select(|value| value * value);
//!
//! assert_eq!(even_squares.to_vec().unwrap(), vec![4, 16, 36, 64, 100]);
//! // Sequences replay: a second pull starts from scratch.
//! assert_eq!(even_squares.count().unwrap(), 5);
//! ```

mod concat;
mod deferred;

pub use concat::Concat;

use std::fmt;
use std::iter::FromIterator;
use std::rc::Rc;

use crate::cursor::{
    BoxCursor, Cursor, EmptyCursor, GenerateCursor, Iter, OnceCursor, RangeCursor, RepeatCursor,
    SliceCursor, opened,
};
use crate::error::SequenceResult;

use concat::ConcatSource;
use deferred::{CursorSource, DeferredSource, MemoizedSource, OpenerSource};

/// Something that can open independent cursors over its elements.
///
/// Implement this to plug a custom producer into the operator library with
/// [`Sequence::from_source`].
pub trait Source {
    /// The element type.
    type Item;

    /// Opens a new cursor positioned before the first element.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot produce a cursor, for example
    /// a single-shot source that was already consumed.
    fn open(&self) -> SequenceResult<BoxCursor<Self::Item>>;
}

/// A lazy, possibly infinite, possibly re-iterable sequence of values.
///
/// Cloning a `Sequence` is O(1) and shares the underlying source.
///
/// # Thread Safety
///
/// `Sequence` is neither `Send` nor `Sync`. No cursor is safe for use from
/// more than one thread.
pub struct Sequence<T> {
    source: Rc<dyn Source<Item = T>>,
}

static_assertions::assert_not_impl_any!(Sequence<i32>: Send, Sync);

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
        }
    }
}

impl<T> fmt::Debug for Sequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Sequence")
            .field(&"<deferred>")
            .finish()
    }
}

// =============================================================================
// Core
// =============================================================================

impl<T: 'static> Sequence<T> {
    /// Wraps a custom [`Source`].
    pub fn from_source<S>(source: S) -> Self
    where
        S: Source<Item = T> + 'static,
    {
        Self {
            source: Rc::new(source),
        }
    }

    /// Builds a sequence from a function that opens a cursor.
    ///
    /// `opener` runs on every cursor request. This is the lowest-level
    /// constructor; the operators are built on it.
    pub fn from_opener<F>(opener: F) -> Self
    where
        F: Fn() -> SequenceResult<BoxCursor<T>> + 'static,
    {
        Self::from_source(OpenerSource::new(opener))
    }

    /// Opens a new cursor over this sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AlreadyConsumed`](crate::SequenceError::AlreadyConsumed)
    /// when a cursor-backed sequence is requested twice, and propagates
    /// errors from deferred factories.
    #[inline]
    pub fn cursor(&self) -> SequenceResult<BoxCursor<T>> {
        self.source.open()
    }

    /// Returns a standard iterator over this sequence.
    ///
    /// The cursor is opened lazily on the first `next`.
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.clone())
    }

    /// Pulls every element into a vector. The `ToArray` of LINQ.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised while pulling.
    pub fn to_vec(&self) -> SequenceResult<Vec<T>>
    where
        T: Clone,
    {
        self.iter().collect()
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<T: 'static> Sequence<T> {
    /// A sequence with no elements.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// assert!(Sequence::<i32>::empty().to_vec().unwrap().is_empty());
    /// ```
    pub fn empty() -> Self {
        Self::from_opener(|| opened(EmptyCursor::new()))
    }

    /// A sequence with exactly one element.
    pub fn once(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_opener(move || opened(OnceCursor::new(value.clone())))
    }

    /// A sequence over the elements of `items`.
    ///
    /// The buffer is shared by every cursor; nothing is copied per iteration.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_shared(Rc::from(items))
    }

    /// A sequence over an already shared buffer.
    pub fn from_shared(items: Rc<[T]>) -> Self {
        Self::from_opener(move || opened(SliceCursor::new(Rc::clone(&items))))
    }

    /// `value`, `count` times.
    pub fn repeat(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        Self::from_opener(move || opened(RepeatCursor::new(value.clone(), count)))
    }

    /// Unfolds a sequence from `seed`.
    ///
    /// Yields `seed`, then `step(&seed)`, and so on until `step` returns
    /// `None`. A step that never returns `None` gives an infinite sequence,
    /// which is fine as long as the consumer stops pulling.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let powers = Sequence::generate(1_u64, |value| Some(value * 2));
    /// assert_eq!(powers.take(5).to_vec().unwrap(), vec![1, 2, 4, 8, 16]);
    /// ```
    pub fn generate<F>(seed: T, step: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> Option<T> + 'static,
    {
        let step = Rc::new(step);
        Self::from_opener(move || opened(GenerateCursor::new(seed.clone(), Rc::clone(&step))))
    }

    /// A sequence whose producing factory runs at most once.
    ///
    /// `factory` runs on the first cursor request and its result is
    /// memoized. Each cursor request then opens a fresh cursor on that
    /// result, so replay works only if the produced sequence replays.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let calls = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&calls);
    /// let sequence = Sequence::memoized(move || {
    ///     counter.set(counter.get() + 1);
    ///     Sequence::from_vec(vec![1, 2, 3])
    /// });
    ///
    /// assert_eq!(calls.get(), 0);
    /// assert_eq!(sequence.to_vec().unwrap(), vec![1, 2, 3]);
    /// assert_eq!(sequence.to_vec().unwrap(), vec![1, 2, 3]);
    /// assert_eq!(calls.get(), 1);
    /// ```
    pub fn memoized<F>(factory: F) -> Self
    where
        F: FnOnce() -> Self + 'static,
    {
        Self::from_source(MemoizedSource::new(factory))
    }

    /// A sequence whose producing factory runs on every cursor request.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// let calls = Rc::new(Cell::new(0));
    /// let counter = Rc::clone(&calls);
    /// let sequence = Sequence::defer(move || {
    ///     counter.set(counter.get() + 1);
    ///     Ok(Sequence::once(counter.get()))
    /// });
    ///
    /// assert_eq!(sequence.to_vec().unwrap(), vec![1]);
    /// assert_eq!(sequence.to_vec().unwrap(), vec![2]);
    /// ```
    pub fn defer<F>(factory: F) -> Self
    where
        F: Fn() -> SequenceResult<Self> + 'static,
    {
        Self::from_source(DeferredSource::new(factory))
    }

    /// A single-shot sequence over a concrete cursor.
    ///
    /// Every cursor request is answered with the same cursor. The first
    /// request takes it; any later request fails with
    /// [`SequenceError::AlreadyConsumed`](crate::SequenceError::AlreadyConsumed).
    ///
    /// ```rust
    /// use lazyseq::{IteratorCursor, Sequence, SequenceError};
    ///
    /// let sequence = Sequence::from_cursor(IteratorCursor::new(1..=3));
    /// assert_eq!(sequence.to_vec().unwrap(), vec![1, 2, 3]);
    /// assert_eq!(sequence.to_vec(), Err(SequenceError::AlreadyConsumed));
    /// ```
    pub fn from_cursor<C>(cursor: C) -> Self
    where
        C: Cursor<Item = T> + 'static,
    {
        Self::from_boxed_cursor(Box::new(cursor))
    }

    /// Like [`Sequence::from_cursor`], for an already boxed cursor.
    pub fn from_boxed_cursor(cursor: BoxCursor<T>) -> Self {
        Self::from_source(CursorSource::new(cursor))
    }

    /// Concatenates `self` and `other` into one sequence.
    ///
    /// Both sources are shared, not copied. See [`Concat`] for the cursor
    /// behavior.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let joined = Sequence::from_vec(vec![1, 2]).concat(&Sequence::from_vec(vec![3]));
    /// assert_eq!(joined.to_vec().unwrap(), vec![1, 2, 3]);
    /// ```
    pub fn concat(&self, other: &Self) -> Self {
        Self::from_source(ConcatSource::new(self.clone(), other.clone()))
    }

    /// Appends one element after the last.
    pub fn append(&self, value: T) -> Self
    where
        T: Clone,
    {
        self.concat(&Self::once(value))
    }

    /// Prepends one element before the first.
    pub fn prepend(&self, value: T) -> Self
    where
        T: Clone,
    {
        Self::once(value).concat(self)
    }
}

impl Sequence<i32> {
    /// `count` consecutive integers starting at `start`.
    ///
    /// The sequence ends early rather than overflow past `i32::MAX`.
    pub fn range(start: i32, count: usize) -> Self {
        Self::from_opener(move || opened(RangeCursor::new(start, count)))
    }
}

impl<T: 'static> Default for Sequence<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: 'static> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: 'static> FromIterator<T> for Sequence<T> {
    /// Buffers the iterator so the resulting sequence replays.
    fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
        Self::from_vec(iterator.into_iter().collect())
    }
}

impl<T: Clone + 'static> IntoIterator for &Sequence<T> {
    type Item = SequenceResult<T>;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + 'static> IntoIterator for Sequence<T> {
    type Item = SequenceResult<T>;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self)
    }
}
