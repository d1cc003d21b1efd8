//! Set operators: `distinct`, `union`, `except` and `intersect`.
//!
//! All four walk their first source in order and ask a [`HashBucketSet`]
//! whether each element survives, so results keep source order and the
//! first occurrence of each value.

use std::hash::Hash;

use crate::collections::HashBucketSet;
use crate::cursor::{BoxCursor, Cursor, opened};
use crate::error::SequenceResult;
use crate::sequence::Sequence;

struct Distinct<T> {
    source: BoxCursor<T>,
    seen: HashBucketSet<T>,
}

impl<T: Hash + Eq + Clone> Cursor for Distinct<T> {
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        while let Some(item) = self.source.advance()? {
            if self.seen.add(item.clone()) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn current(&self) -> Option<&T> {
        self.source.current()
    }

    fn dispose(&mut self) {
        self.seen.clear();
        self.source.dispose();
    }
}

/// How the second source decides the fate of a first-source element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Membership {
    /// Kept if not in the second source, nor seen before.
    Except,
    /// Kept if in the second source; each match is used once.
    Intersect,
}

struct MembershipFilter<T: 'static> {
    source: BoxCursor<T>,
    /// The second source, until it is loaded into `set`.
    pending: Option<Sequence<T>>,
    set: HashBucketSet<T>,
    membership: Membership,
}

impl<T: Hash + Eq + Clone + 'static> MembershipFilter<T> {
    fn load(&mut self) -> SequenceResult<()> {
        let Some(other) = self.pending.take() else {
            return Ok(());
        };
        self.set = other.consume(|cursor| {
            let mut set = HashBucketSet::new();
            while let Some(item) = cursor.advance()? {
                set.add(item.clone());
            }
            Ok(set)
        })?;
        tracing::trace!(
            membership = ?self.membership,
            loaded = self.set.len(),
            "second source loaded"
        );
        Ok(())
    }
}

impl<T: Hash + Eq + Clone + 'static> Cursor for MembershipFilter<T> {
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.load()?;
        while let Some(item) = self.source.advance()? {
            let keep = match self.membership {
                Membership::Except => self.set.add(item.clone()),
                Membership::Intersect => self.set.remove(item),
            };
            if keep {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn current(&self) -> Option<&T> {
        self.source.current()
    }

    fn dispose(&mut self) {
        self.pending = None;
        self.set.clear();
        self.source.dispose();
    }
}

impl<T: Hash + Eq + Clone + 'static> Sequence<T> {
    /// Drops repeated values, keeping first occurrences in order.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let unique = Sequence::from_vec(vec![1, 2, 2, 3, 1]).distinct();
    /// assert_eq!(unique.to_vec().unwrap(), vec![1, 2, 3]);
    /// ```
    pub fn distinct(&self) -> Self {
        let source = self.clone();
        Self::from_opener(move || {
            opened(Distinct {
                source: source.cursor()?,
                seen: HashBucketSet::new(),
            })
        })
    }

    /// Distinct values of `self` followed by those of `other` not yet seen.
    pub fn union(&self, other: &Self) -> Self {
        self.concat(other).distinct()
    }

    /// Distinct values of `self` that do not occur in `other`.
    ///
    /// `other` is read in full on the first advance.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let left = Sequence::from_vec(vec![1, 2, 2, 3]);
    /// let right = Sequence::from_vec(vec![2]);
    /// assert_eq!(left.except(&right).to_vec().unwrap(), vec![1, 3]);
    /// ```
    pub fn except(&self, other: &Self) -> Self {
        self.membership_filter(other, Membership::Except)
    }

    /// Values of `self` that also occur in `other`, each at most once.
    ///
    /// `other` is read in full on the first advance.
    pub fn intersect(&self, other: &Self) -> Self {
        self.membership_filter(other, Membership::Intersect)
    }

    fn membership_filter(&self, other: &Self, membership: Membership) -> Self {
        let source = self.clone();
        let other = other.clone();
        Self::from_opener(move || {
            opened(MembershipFilter {
                source: source.cursor()?,
                pending: Some(other.clone()),
                set: HashBucketSet::new(),
                membership,
            })
        })
    }
}
