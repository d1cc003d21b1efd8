//! Read-only multi-map from key to an ordered group of values.
//!
//! A [`Lookup`] is built in a single pass over a source. Keys are optional:
//! elements whose key selector yields `None` land in a dedicated null-key
//! group, kept apart from the keyed index. Groups are reported in the order
//! their key first appeared, and each group keeps its elements in source
//! order.
//!
//! Asking for a missing key is not an error: [`Lookup::get`] returns an
//! empty sequence.
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::Sequence;
//!
//! let words = Sequence::from_vec(vec!["apple", "avocado", "banana"]);
//! let by_initial = words.to_lookup(|word| word.as_bytes()[0]).unwrap();
//!
//! assert_eq!(by_initial.count(), 2);
//! assert_eq!(
//!     by_initial.get(Some(&b'a')).to_vec().unwrap(),
//!     vec!["apple", "avocado"]
//! );
//! assert!(by_initial.get(Some(&b'z')).to_vec().unwrap().is_empty());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use crate::error::SequenceResult;
use crate::sequence::Sequence;

// =============================================================================
// Grouping
// =============================================================================

/// One key and the elements that share it.
pub struct Grouping<K, V> {
    key: Option<K>,
    elements: Rc<[V]>,
}

impl<K, V> Grouping<K, V> {
    /// The shared key, `None` for the null-key group.
    #[inline]
    pub const fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    /// Number of elements in the group.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Groups are never empty once built, but the accessor mirrors `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The elements as a slice, in source order.
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        &self.elements
    }
}

impl<K, V: 'static> Grouping<K, V> {
    /// The elements as a replayable sequence.
    pub fn elements(&self) -> Sequence<V> {
        Sequence::from_shared(Rc::clone(&self.elements))
    }
}

impl<K: Clone, V> Clone for Grouping<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            elements: Rc::clone(&self.elements),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Grouping<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Grouping")
            .field("key", &self.key)
            .field("elements", &&*self.elements)
            .finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Grouping<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.elements == other.elements
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// A read-only multi-map from optional key to group.
pub struct Lookup<K, V> {
    index: HashMap<K, usize>,
    null_group: Option<usize>,
    groupings: Rc<[Grouping<K, V>]>,
}

/// Groups under construction, before they are frozen into `Rc<[V]>`.
struct LookupBuilder<K, V> {
    index: HashMap<K, usize>,
    null_group: Option<usize>,
    groups: Vec<(Option<K>, Vec<V>)>,
}

impl<K: Hash + Eq + Clone, V> LookupBuilder<K, V> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            null_group: None,
            groups: Vec::new(),
        }
    }

    fn push(&mut self, key: Option<K>, value: V) {
        let slot = match key {
            None => self.null_slot(),
            Some(key) => self.keyed_slot(key),
        };
        self.groups[slot].1.push(value);
    }

    /// The null key cannot live in the keyed index, so it gets its own slot.
    fn null_slot(&mut self) -> usize {
        *self.null_group.get_or_insert_with(|| {
            self.groups.push((None, Vec::new()));
            self.groups.len() - 1
        })
    }

    fn keyed_slot(&mut self, key: K) -> usize {
        if let Some(&slot) = self.index.get(&key) {
            return slot;
        }
        let slot = self.groups.len();
        self.groups.push((Some(key.clone()), Vec::new()));
        self.index.insert(key, slot);
        slot
    }

    fn finish(self) -> Lookup<K, V> {
        let groupings: Rc<[Grouping<K, V>]> = self
            .groups
            .into_iter()
            .map(|(key, elements)| Grouping {
                key,
                elements: Rc::from(elements),
            })
            .collect();
        tracing::debug!(
            groups = groupings.len(),
            has_null_group = self.null_group.is_some(),
            "lookup built"
        );
        Lookup {
            index: self.index,
            null_group: self.null_group,
            groupings,
        }
    }
}

impl<K: Hash + Eq + Clone + 'static, V: 'static> Lookup<K, V> {
    /// Builds a lookup in one pass over `source`.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised while pulling `source`.
    pub fn build<T, KeySelector, ElementSelector>(
        source: &Sequence<T>,
        key_selector: KeySelector,
        element_selector: ElementSelector,
    ) -> SequenceResult<Self>
    where
        T: 'static,
        KeySelector: Fn(&T) -> Option<K>,
        ElementSelector: Fn(&T) -> V,
    {
        let mut builder = LookupBuilder::new();
        let mut cursor = source.cursor()?;
        let outcome = loop {
            match cursor.advance() {
                Ok(Some(item)) => builder.push(key_selector(item), element_selector(item)),
                Ok(None) => break Ok(()),
                Err(error) => break Err(error),
            }
        };
        cursor.dispose();
        outcome.map(|()| builder.finish())
    }
}

impl<K: Hash + Eq, V> Lookup<K, V> {
    /// Number of groups, counting the null-key group if present.
    #[inline]
    pub fn count(&self) -> usize {
        self.index.len() + usize::from(self.null_group.is_some())
    }

    /// Whether the lookup has no groups.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Whether a group exists for `key`. `None` asks about the null key.
    pub fn contains(&self, key: Option<&K>) -> bool {
        match key {
            None => self.null_group.is_some(),
            Some(key) => self.index.contains_key(key),
        }
    }

    /// The grouping for `key`, if any.
    pub fn grouping(&self, key: Option<&K>) -> Option<&Grouping<K, V>> {
        let slot = match key {
            None => self.null_group,
            Some(key) => self.index.get(key).copied(),
        }?;
        self.groupings.get(slot)
    }

    /// Iterates over the groupings in first-occurrence order.
    pub fn iter_groupings(&self) -> std::slice::Iter<'_, Grouping<K, V>> {
        self.groupings.iter()
    }
}

impl<K: Hash + Eq + 'static, V: 'static> Lookup<K, V> {
    /// The elements grouped under `key`, or an empty sequence.
    pub fn get(&self, key: Option<&K>) -> Sequence<V> {
        self.grouping(key)
            .map_or_else(Sequence::empty, Grouping::elements)
    }
}

impl<K: Clone + 'static, V: 'static> Lookup<K, V> {
    /// The groupings as a replayable sequence, in first-occurrence order.
    pub fn groupings(&self) -> Sequence<Grouping<K, V>> {
        Sequence::from_shared(Rc::clone(&self.groupings))
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Lookup<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.groupings.iter()).finish()
    }
}
