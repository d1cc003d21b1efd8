//! The operator library.
//!
//! Every operator is an inherent method on [`Sequence`]. They fall in three
//! groups:
//!
//! - **Deferred** operators return a new `Sequence` and do nothing until a
//!   cursor over the result is advanced. They never pull more than one
//!   element ahead of the consumer: `select`, `filter`, `take`, `zip`,
//!   `select_many`, `distinct`, `union`, `except`, `intersect`, `join`,
//!   `group_join`, `concat` and friends.
//! - **Buffering** operators return a `Sequence` too, but must read their
//!   whole source once a cursor is requested: `reverse`, `order_by`,
//!   `group_by`.
//! - **Terminal** operators pull immediately and return a value or an
//!   error: `aggregate`, `fold`, `first`, `single`, `element_at`, `count`,
//!   `to_vec`, `to_lookup` and friends.
//!
//! Each deferred operator is a small cursor state machine over its source's
//! cursor. Opening one opens its source and reads nothing; `skip` and
//! `skip_while` drop their prefix on the first advance.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::Sequence;
//!
//! let orders = Sequence::from_vec(vec![("ann", 30), ("bob", 10), ("ann", 5)]);
//!
//! let totals = orders
//!     .group_by(|order| order.0)
//!     .select(|group| {
//!         let total: i32 = group.as_slice().iter().map(|order| order.1).sum();
//!         (*group.key().unwrap(), total)
//!     })
//!     .to_vec()
//!     .unwrap();
//!
//! assert_eq!(totals, vec![("ann", 35), ("bob", 10)]);
//! ```

mod aggregate;
mod element;
mod filtering;
mod grouping;
mod ordering;
mod projection;
mod set;

use crate::cursor::{BoxCursor, Cursor};
use crate::error::SequenceResult;
use crate::sequence::Sequence;

impl<T: 'static> Sequence<T> {
    /// Opens a cursor, runs `body` on it, and disposes it whatever the
    /// outcome.
    pub(crate) fn consume<R, F>(&self, body: F) -> SequenceResult<R>
    where
        F: FnOnce(&mut BoxCursor<T>) -> SequenceResult<R>,
    {
        let mut cursor = self.cursor()?;
        let outcome = body(&mut cursor);
        cursor.dispose();
        outcome
    }
}
