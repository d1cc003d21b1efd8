//! Sources behind the deferred constructors of [`Sequence`].

use std::cell::RefCell;

use super::{Sequence, Source};
use crate::control::Thunk;
use crate::cursor::BoxCursor;
use crate::error::{SequenceError, SequenceResult};

/// Opens a cursor by calling a function, every time.
pub(super) struct OpenerSource<F> {
    opener: F,
}

impl<F> OpenerSource<F> {
    pub(super) const fn new(opener: F) -> Self {
        Self { opener }
    }
}

impl<T, F> Source for OpenerSource<F>
where
    F: Fn() -> SequenceResult<BoxCursor<T>>,
{
    type Item = T;

    fn open(&self) -> SequenceResult<BoxCursor<T>> {
        (self.opener)()
    }
}

/// Runs a sequence factory at most once and opens cursors on its product.
pub(super) struct MemoizedSource<T> {
    sequence: Thunk<Sequence<T>>,
}

impl<T: 'static> MemoizedSource<T> {
    pub(super) fn new<F>(factory: F) -> Self
    where
        F: FnOnce() -> Sequence<T> + 'static,
    {
        Self {
            sequence: Thunk::new(factory),
        }
    }
}

impl<T: 'static> Source for MemoizedSource<T> {
    type Item = T;

    fn open(&self) -> SequenceResult<BoxCursor<T>> {
        let sequence = self.sequence.force()?.clone();
        sequence.cursor()
    }
}

/// Runs a sequence factory on every cursor request.
pub(super) struct DeferredSource<F> {
    factory: F,
}

impl<F> DeferredSource<F> {
    pub(super) const fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<T: 'static, F> Source for DeferredSource<F>
where
    F: Fn() -> SequenceResult<Sequence<T>>,
{
    type Item = T;

    fn open(&self) -> SequenceResult<BoxCursor<T>> {
        (self.factory)()?.cursor()
    }
}

/// Hands out one concrete cursor, once.
pub(super) struct CursorSource<T> {
    cursor: RefCell<Option<BoxCursor<T>>>,
}

impl<T> CursorSource<T> {
    pub(super) fn new(cursor: BoxCursor<T>) -> Self {
        Self {
            cursor: RefCell::new(Some(cursor)),
        }
    }
}

impl<T> Source for CursorSource<T> {
    type Item = T;

    fn open(&self) -> SequenceResult<BoxCursor<T>> {
        self.cursor.borrow_mut().take().ok_or_else(|| {
            tracing::debug!("cursor-backed sequence requested a second time");
            SequenceError::AlreadyConsumed
        })
    }
}
