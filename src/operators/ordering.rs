//! Buffering operators: `reverse`, `order_by`, `order_by_descending`.
//!
//! These cannot stream. Each reads its whole source when a cursor is
//! requested and then serves the buffered result.

use std::cmp::Ordering;

use crate::cursor::Cursor;
use crate::sequence::Sequence;

impl<T: Clone + 'static> Sequence<T> {
    /// The elements in reverse order.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// assert_eq!(Sequence::range(1, 3).reverse().to_vec().unwrap(), vec![3, 2, 1]);
    /// ```
    pub fn reverse(&self) -> Self {
        let source = self.clone();
        Self::defer(move || {
            let mut buffer = source.to_vec()?;
            buffer.reverse();
            Ok(Self::from_vec(buffer))
        })
    }

    /// The elements sorted by key, ascending. The sort is stable.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let words = Sequence::from_vec(vec!["pear", "fig", "plum", "kiwi"]);
    /// let by_length = words.order_by(|word| word.len());
    /// assert_eq!(by_length.to_vec().unwrap(), vec!["fig", "pear", "plum", "kiwi"]);
    /// ```
    pub fn order_by<K, KeySelector>(&self, key_selector: KeySelector) -> Self
    where
        K: Ord + 'static,
        KeySelector: Fn(&T) -> K + 'static,
    {
        self.sorted_by_key(key_selector, Ordering::Less)
    }

    /// The elements sorted by key, descending. The sort is stable, so equal
    /// keys keep source order.
    pub fn order_by_descending<K, KeySelector>(&self, key_selector: KeySelector) -> Self
    where
        K: Ord + 'static,
        KeySelector: Fn(&T) -> K + 'static,
    {
        self.sorted_by_key(key_selector, Ordering::Greater)
    }

    /// Sorts so that a key comparing as `first` comes first.
    fn sorted_by_key<K, KeySelector>(&self, key_selector: KeySelector, first: Ordering) -> Self
    where
        K: Ord + 'static,
        KeySelector: Fn(&T) -> K + 'static,
    {
        let source = self.clone();
        Self::defer(move || {
            let mut keyed = source.consume(|cursor| {
                let mut keyed = Vec::new();
                while let Some(item) = cursor.advance()? {
                    keyed.push((key_selector(item), item.clone()));
                }
                Ok(keyed)
            })?;
            keyed.sort_by(|left, right| {
                let ordering = left.0.cmp(&right.0);
                if first == Ordering::Less {
                    ordering
                } else {
                    ordering.reverse()
                }
            });
            Ok(Self::from_vec(keyed.into_iter().map(|(_, item)| item).collect()))
        })
    }
}
