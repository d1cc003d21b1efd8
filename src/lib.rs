//! # lazyseq
//!
//! Lazy, re-iterable sequences with an explicit cursor protocol and a
//! LINQ-style operator library.
//!
//! ## Overview
//!
//! - **Cursors**: [`Cursor`] is the stateful walk over one sequence
//!   (`try_advance` / `current` / `dispose`; never `reset`).
//! - **Sequences**: [`Sequence`] is a stateless, cheap-to-clone handle that
//!   mints a fresh cursor per request. Nothing runs before a cursor is
//!   requested and advanced.
//! - **Concatenation**: [`Concat`] reuses its construction-time node as the
//!   first cursor and detaches fresh nodes for later requests.
//! - **Collections**: [`HashBucketSet`] for the set operators, [`Lookup`]
//!   and [`Grouping`] for grouping and joins.
//! - **Operators**: projection, filtering, slicing, set algebra, grouping,
//!   joins, ordering, element access and reductions, all as inherent
//!   methods on [`Sequence`].
//!
//! Everything here is single-threaded: sequences and cursors are neither
//! `Send` nor `Sync`.
//!
//! ## Feature Flags
//!
//! - `fxhash`: hash set-operator buckets with `rustc-hash`'s `FxHasher`
//! - `ahash`: hash set-operator buckets with `ahash`'s `AHasher`
//!
//! With neither, the standard library's `DefaultHasher` is used.
//!
//! ## Example
//!
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let naturals = Sequence::generate(1_u64, |value| Some(value + 1));
//! let first_squares = naturals
//!     .select(|value| value * value)
//!     .filter(|square| square % 2 == 1)
//!     .take(3);
//!
//! assert_eq!(first_squares.to_vec().unwrap(), vec![1, 9, 25]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the sequence type, the cursor trait and the error types.
///
/// # Usage
///
/// ```rust
/// use lazyseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::collections::{Grouping, Lookup};
    pub use crate::cursor::{BoxCursor, Cursor};
    pub use crate::error::{SequenceError, SequenceResult};
    pub use crate::sequence::{Sequence, Source};
}

pub mod collections;
pub mod control;
pub mod cursor;
pub mod error;
mod operators;
pub mod sequence;

pub use collections::{Grouping, HashBucketSet, Lookup};
pub use control::Thunk;
pub use cursor::{
    BoxCursor, Cursor, EmptyCursor, GenerateCursor, Iter, IteratorCursor, OnceCursor, RangeCursor,
    RepeatCursor, SliceCursor, opened,
};
pub use error::{SequenceError, SequenceResult};
pub use sequence::{Concat, Sequence, Source};
