//! Two-source concatenation.
//!
//! [`Concat`] is both the node built by [`Sequence::concat`] and the cursor
//! it hands out. The node built at construction time is `Fresh`; the first
//! cursor request takes that very node and starts it. Every later request,
//! including one made while the first cursor is still live, detaches a new
//! node with independent sub-cursor state.
//!
//! ```text
//!  source:  Fresh(node) ──first open──► Issued ──open──► detach() ──► ...
//!
//!  cursor:  Pending ──start──► First ──first exhausted──► Second
//!                                │                          │
//!                                └───────── dispose ────────┴──► Done
//! ```
//!
//! The switch from `First` to `Second` never reverts.

use std::cell::RefCell;

use super::{Sequence, Source};
use crate::cursor::{BoxCursor, Cursor};
use crate::error::SequenceResult;

enum Phase<T> {
    /// Sub-cursors not opened yet.
    Pending,
    /// Reading from the first source; the second is already open.
    First {
        first: BoxCursor<T>,
        second: BoxCursor<T>,
    },
    /// The first source is exhausted and disposed.
    Second { second: BoxCursor<T> },
    /// Disposed.
    Done,
}

/// A cursor that reads one sequence to exhaustion, then another.
///
/// # Examples
///
/// ```rust
/// use lazyseq::{Concat, Cursor, Sequence};
///
/// let mut cursor = Concat::new(Sequence::from_vec(vec![1]), Sequence::from_vec(vec![2, 3]));
/// let mut seen = Vec::new();
/// while let Some(value) = cursor.advance().unwrap() {
///     seen.push(*value);
/// }
/// assert_eq!(seen, vec![1, 2, 3]);
/// ```
pub struct Concat<T> {
    first: Sequence<T>,
    second: Sequence<T>,
    phase: Phase<T>,
}

impl<T: 'static> Concat<T> {
    /// Creates an unstarted node over two shared sources.
    pub const fn new(first: Sequence<T>, second: Sequence<T>) -> Self {
        Self {
            first,
            second,
            phase: Phase::Pending,
        }
    }

    /// A new, unstarted node over the same two sources.
    pub fn detach(&self) -> Self {
        Self::new(self.first.clone(), self.second.clone())
    }

    /// Opens both sub-cursors. Does nothing if already started.
    fn start(&mut self) -> SequenceResult<()> {
        if matches!(self.phase, Phase::Pending) {
            let first = self.first.cursor()?;
            let second = match self.second.cursor() {
                Ok(second) => second,
                Err(error) => {
                    let mut first = first;
                    first.dispose();
                    return Err(error);
                }
            };
            self.phase = Phase::First { first, second };
        }
        Ok(())
    }

    /// Whether the node has moved on to the second source.
    pub const fn switched(&self) -> bool {
        matches!(self.phase, Phase::Second { .. })
    }
}

impl<T: 'static> Cursor for Concat<T> {
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.start()?;

        if let Phase::First { first, .. } = &mut self.phase {
            if first.try_advance()? {
                return Ok(true);
            }
            let Phase::First { mut first, second } =
                std::mem::replace(&mut self.phase, Phase::Done)
            else {
                unreachable!()
            };
            first.dispose();
            self.phase = Phase::Second { second };
        }

        match &mut self.phase {
            Phase::Second { second } => second.try_advance(),
            _ => Ok(false),
        }
    }

    fn current(&self) -> Option<&T> {
        match &self.phase {
            Phase::First { first, .. } => first.current(),
            Phase::Second { second } => second.current(),
            Phase::Pending | Phase::Done => None,
        }
    }

    fn dispose(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Done) {
            Phase::First {
                mut first,
                mut second,
            } => {
                first.dispose();
                second.dispose();
            }
            Phase::Second { mut second } => second.dispose(),
            Phase::Pending | Phase::Done => {}
        }
    }
}

/// Whether the construction-time node has been handed out.
enum NodeState<T> {
    Fresh(Concat<T>),
    Issued,
}

/// The [`Source`] behind [`Sequence::concat`].
///
/// `template` is never started; it only seeds detached nodes.
pub(super) struct ConcatSource<T> {
    template: Concat<T>,
    node: RefCell<NodeState<T>>,
}

impl<T: 'static> ConcatSource<T> {
    pub(super) fn new(first: Sequence<T>, second: Sequence<T>) -> Self {
        let template = Concat::new(first, second);
        let node = template.detach();
        Self {
            template,
            node: RefCell::new(NodeState::Fresh(node)),
        }
    }
}

impl<T: 'static> Source for ConcatSource<T> {
    type Item = T;

    fn open(&self) -> SequenceResult<BoxCursor<T>> {
        let mut node = match std::mem::replace(&mut *self.node.borrow_mut(), NodeState::Issued) {
            NodeState::Fresh(node) => node,
            NodeState::Issued => {
                tracing::trace!("concat node already issued, detaching a fresh one");
                self.template.detach()
            }
        };
        node.start()?;
        Ok(Box::new(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SequenceError;
    use rstest::rstest;

    #[rstest]
    fn test_concat_switches_once() {
        let mut cursor = Concat::new(Sequence::from_vec(vec![1]), Sequence::from_vec(vec![2]));
        assert!(!cursor.switched());
        assert_eq!(cursor.advance().unwrap(), Some(&1));
        assert!(!cursor.switched());
        assert_eq!(cursor.advance().unwrap(), Some(&2));
        assert!(cursor.switched());
        assert_eq!(cursor.advance().unwrap(), None);
        assert!(cursor.switched());
        assert_eq!(cursor.advance().unwrap(), None);
    }

    #[rstest]
    fn test_concat_with_empty_first() {
        let mut cursor = Concat::new(Sequence::empty(), Sequence::from_vec(vec!['z']));
        assert_eq!(cursor.advance().unwrap(), Some(&'z'));
        assert_eq!(cursor.advance().unwrap(), None);
    }

    #[rstest]
    fn test_detach_shares_sources_not_state() {
        let mut node = Concat::new(Sequence::from_vec(vec![1, 2]), Sequence::from_vec(vec![3]));
        assert_eq!(node.advance().unwrap(), Some(&1));

        let mut detached = node.detach();
        assert_eq!(detached.current(), None);
        assert_eq!(detached.advance().unwrap(), Some(&1));
        assert_eq!(node.advance().unwrap(), Some(&2));
    }

    #[rstest]
    fn test_source_reuses_fresh_node_then_detaches() {
        let source = ConcatSource::new(Sequence::from_vec(vec![1]), Sequence::from_vec(vec![2]));
        assert!(matches!(*source.node.borrow(), NodeState::Fresh(_)));

        let mut first = source.open().unwrap();
        assert!(matches!(*source.node.borrow(), NodeState::Issued));

        let mut second = source.open().unwrap();
        assert_eq!(first.advance().unwrap(), Some(&1));
        assert_eq!(second.advance().unwrap(), Some(&1));
        assert_eq!(first.advance().unwrap(), Some(&2));
        assert_eq!(second.advance().unwrap(), Some(&2));
    }

    #[rstest]
    fn test_dispose_is_idempotent() {
        let mut cursor = Concat::new(Sequence::from_vec(vec![1]), Sequence::from_vec(vec![2]));
        assert!(cursor.try_advance().unwrap());
        cursor.dispose();
        cursor.dispose();
        assert_eq!(cursor.current(), None);
        assert!(!cursor.try_advance().unwrap());
    }

    #[rstest]
    fn test_start_error_propagates() {
        let consumed: Sequence<i32> = Sequence::defer(|| Err(SequenceError::AlreadyConsumed));
        let mut cursor = Concat::new(Sequence::from_vec(vec![1]), consumed);
        assert_eq!(cursor.try_advance(), Err(SequenceError::AlreadyConsumed));
    }
}
