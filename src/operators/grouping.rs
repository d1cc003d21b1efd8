//! Grouping and joining: `to_lookup*`, `group_by*`, `join` and
//! `group_join`.
//!
//! `to_lookup` is terminal. The others are deferred: they build a
//! [`Lookup`] when a cursor is requested, and rebuild it for every new
//! cursor so that a replayed source is grouped afresh.

use std::hash::Hash;
use std::rc::Rc;

use crate::collections::{Grouping, Lookup};
use crate::error::SequenceResult;
use crate::sequence::Sequence;

// =============================================================================
// Lookups (terminal)
// =============================================================================

impl<T: 'static> Sequence<T> {
    /// Groups the elements by `key_selector` into a [`Lookup`].
    ///
    /// # Errors
    ///
    /// Propagates the first error raised while pulling the source.
    pub fn to_lookup<K, KeySelector>(
        &self,
        key_selector: KeySelector,
    ) -> SequenceResult<Lookup<K, T>>
    where
        T: Clone,
        K: Hash + Eq + Clone + 'static,
        KeySelector: Fn(&T) -> K,
    {
        Lookup::build(self, |item| Some(key_selector(item)), T::clone)
    }

    /// Groups projected elements by `key_selector` into a [`Lookup`].
    ///
    /// # Errors
    ///
    /// Propagates the first error raised while pulling the source.
    pub fn to_lookup_by<K, V, KeySelector, ElementSelector>(
        &self,
        key_selector: KeySelector,
        element_selector: ElementSelector,
    ) -> SequenceResult<Lookup<K, V>>
    where
        K: Hash + Eq + Clone + 'static,
        V: 'static,
        KeySelector: Fn(&T) -> K,
        ElementSelector: Fn(&T) -> V,
    {
        Lookup::build(self, |item| Some(key_selector(item)), element_selector)
    }

    /// Like [`Sequence::to_lookup`], with keys that may be absent.
    ///
    /// Elements whose key is `None` share the null-key group.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised while pulling the source.
    pub fn to_lookup_nullable<K, KeySelector>(
        &self,
        key_selector: KeySelector,
    ) -> SequenceResult<Lookup<K, T>>
    where
        T: Clone,
        K: Hash + Eq + Clone + 'static,
        KeySelector: Fn(&T) -> Option<K>,
    {
        Lookup::build(self, key_selector, T::clone)
    }
}

// =============================================================================
// Group By (deferred)
// =============================================================================

impl<T: 'static> Sequence<T> {
    /// Groups the elements by key, in order of first key occurrence.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let pairs = Sequence::from_vec(vec![("a", 1), ("b", 2), ("a", 3)]);
    /// let groups = pairs.group_by(|pair| pair.0).to_vec().unwrap();
    ///
    /// assert_eq!(groups.len(), 2);
    /// assert_eq!(groups[0].key(), Some(&"a"));
    /// assert_eq!(groups[0].as_slice(), &[("a", 1), ("a", 3)]);
    /// assert_eq!(groups[1].key(), Some(&"b"));
    /// ```
    pub fn group_by<K, KeySelector>(&self, key_selector: KeySelector) -> Sequence<Grouping<K, T>>
    where
        T: Clone,
        K: Hash + Eq + Clone + 'static,
        KeySelector: Fn(&T) -> K + 'static,
    {
        let source = self.clone();
        Sequence::defer(move || Ok(source.to_lookup(&key_selector)?.groupings()))
    }

    /// Groups projected elements by key.
    pub fn group_by_map<K, V, KeySelector, ElementSelector>(
        &self,
        key_selector: KeySelector,
        element_selector: ElementSelector,
    ) -> Sequence<Grouping<K, V>>
    where
        K: Hash + Eq + Clone + 'static,
        V: 'static,
        KeySelector: Fn(&T) -> K + 'static,
        ElementSelector: Fn(&T) -> V + 'static,
    {
        let source = self.clone();
        Sequence::defer(move || {
            Ok(source
                .to_lookup_by(&key_selector, &element_selector)?
                .groupings())
        })
    }

    /// Groups by a key that may be absent; `None` keys form one group.
    pub fn group_by_nullable<K, KeySelector>(
        &self,
        key_selector: KeySelector,
    ) -> Sequence<Grouping<K, T>>
    where
        T: Clone,
        K: Hash + Eq + Clone + 'static,
        KeySelector: Fn(&T) -> Option<K> + 'static,
    {
        let source = self.clone();
        Sequence::defer(move || Ok(source.to_lookup_nullable(&key_selector)?.groupings()))
    }
}

// =============================================================================
// Joins (deferred)
// =============================================================================

impl<T: Clone + 'static> Sequence<T> {
    /// Inner equi-join with `inner`.
    ///
    /// `inner` is grouped by key when a cursor is requested. The outer side
    /// is then streamed: for each outer element, `result_selector` runs
    /// once per matching inner element, in inner order.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let people = Sequence::from_vec(vec![(1, "ann"), (2, "bob")]);
    /// let pets = Sequence::from_vec(vec![(1, "cat"), (1, "fox"), (3, "owl")]);
    ///
    /// let owned = people.join(
    ///     &pets,
    ///     |person| person.0,
    ///     |pet| pet.0,
    ///     |person, pet| (person.1, pet.1),
    /// );
    /// assert_eq!(owned.to_vec().unwrap(), vec![("ann", "cat"), ("ann", "fox")]);
    /// ```
    pub fn join<I, K, R, OuterKey, InnerKey, ResultSelector>(
        &self,
        inner: &Sequence<I>,
        outer_key: OuterKey,
        inner_key: InnerKey,
        result_selector: ResultSelector,
    ) -> Sequence<R>
    where
        I: Clone + 'static,
        K: Hash + Eq + Clone + 'static,
        R: 'static,
        OuterKey: Fn(&T) -> K + 'static,
        InnerKey: Fn(&I) -> K + 'static,
        ResultSelector: Fn(&T, &I) -> R + 'static,
    {
        let outer = self.clone();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let result_selector = Rc::new(result_selector);
        Sequence::defer(move || {
            let lookup = Rc::new(inner.to_lookup(&inner_key)?);
            let outer_key = Rc::clone(&outer_key);
            let result_selector = Rc::clone(&result_selector);
            Ok(outer.select_many(move |outer_item| {
                let matches = lookup.get(Some(&outer_key(outer_item)));
                let outer_item = outer_item.clone();
                let result_selector = Rc::clone(&result_selector);
                matches.select(move |inner_item| result_selector(&outer_item, inner_item))
            }))
        })
    }

    /// Left group-join with `inner`.
    ///
    /// Every outer element is paired with the sequence of its matching
    /// inner elements, which is empty when nothing matches.
    pub fn group_join<I, K, R, OuterKey, InnerKey, ResultSelector>(
        &self,
        inner: &Sequence<I>,
        outer_key: OuterKey,
        inner_key: InnerKey,
        result_selector: ResultSelector,
    ) -> Sequence<R>
    where
        I: Clone + 'static,
        K: Hash + Eq + Clone + 'static,
        R: 'static,
        OuterKey: Fn(&T) -> K + 'static,
        InnerKey: Fn(&I) -> K + 'static,
        ResultSelector: Fn(&T, Sequence<I>) -> R + 'static,
    {
        let outer = self.clone();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let result_selector = Rc::new(result_selector);
        Sequence::defer(move || {
            let lookup = inner.to_lookup(&inner_key)?;
            let outer_key = Rc::clone(&outer_key);
            let result_selector = Rc::clone(&result_selector);
            Ok(outer.select(move |outer_item| {
                result_selector(outer_item, lookup.get(Some(&outer_key(outer_item))))
            }))
        })
    }
}
