//! Control structures for deferred evaluation.
//!
//! - [`Thunk`]: a single-assignment cell that runs its factory at most once.
//!
//! Memoized sequences ([`Sequence::memoized`](crate::Sequence::memoized))
//! are built on [`Thunk`].

mod thunk;

pub use thunk::Thunk;
