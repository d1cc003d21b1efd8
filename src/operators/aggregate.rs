//! Terminal reductions: `aggregate`, `fold`, counting, quantifiers,
//! `sum`, `min`, `max` and `sequence_equal`.

use std::iter::Sum;

use crate::cursor::Cursor;
use crate::error::{SequenceError, SequenceResult};
use crate::sequence::Sequence;

// =============================================================================
// Folds
// =============================================================================

impl<T: 'static> Sequence<T> {
    /// Left fold from `seed`. An empty source yields `seed` unchanged.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let words = Sequence::from_vec(vec!["a", "b", "c"]);
    /// let joined = words.fold(String::new(), |mut text, word| {
    ///     text.push_str(word);
    ///     text
    /// });
    /// assert_eq!(joined.unwrap(), "abc");
    /// assert_eq!(Sequence::<i32>::empty().fold(42, |total, value| total + value), Ok(42));
    /// ```
    pub fn fold<A, F>(&self, seed: A, folder: F) -> SequenceResult<A>
    where
        F: Fn(A, &T) -> A,
    {
        self.consume(|cursor| {
            let mut accumulator = seed;
            while let Some(item) = cursor.advance()? {
                accumulator = folder(accumulator, item);
            }
            Ok(accumulator)
        })
    }

    /// [`Sequence::fold`] followed by a final projection of the
    /// accumulator.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn aggregate_with_result<A, R, F, ResultSelector>(
        &self,
        seed: A,
        folder: F,
        result_selector: ResultSelector,
    ) -> SequenceResult<R>
    where
        F: Fn(A, &T) -> A,
        ResultSelector: FnOnce(A) -> R,
    {
        self.fold(seed, folder).map(result_selector)
    }

    // =========================================================================
    // Counting and quantifiers
    // =========================================================================

    /// Number of elements. Reads the whole source.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn count(&self) -> SequenceResult<usize> {
        self.count_where(|_| true)
    }

    /// Number of elements satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn count_where<P>(&self, predicate: P) -> SequenceResult<usize>
    where
        P: Fn(&T) -> bool,
    {
        self.fold(0, |count, item| {
            if predicate(item) { count + 1 } else { count }
        })
    }

    /// Whether the sequence has any element. Pulls at most one.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn any(&self) -> SequenceResult<bool> {
        self.consume(|cursor| cursor.try_advance())
    }

    /// Whether some element satisfies `predicate`. Stops at the first
    /// match.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn any_where<P>(&self, predicate: P) -> SequenceResult<bool>
    where
        P: Fn(&T) -> bool,
    {
        self.consume(|cursor| {
            while let Some(item) = cursor.advance()? {
                if predicate(item) {
                    return Ok(true);
                }
            }
            Ok(false)
        })
    }

    /// Whether every element satisfies `predicate`. Vacuously true when
    /// empty; stops at the first failure.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn all<P>(&self, predicate: P) -> SequenceResult<bool>
    where
        P: Fn(&T) -> bool,
    {
        self.any_where(|item| !predicate(item)).map(|found| !found)
    }

    /// Whether some element equals `value`.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn contains(&self, value: &T) -> SequenceResult<bool>
    where
        T: PartialEq,
    {
        self.any_where(|item| item == value)
    }

    /// Whether both sequences hold equal elements in the same order.
    ///
    /// Stops at the first difference. Both cursors are disposed either way.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling either side.
    pub fn sequence_equal(&self, other: &Self) -> SequenceResult<bool>
    where
        T: PartialEq,
    {
        self.consume(|left| {
            other.consume(|right| loop {
                match (left.advance()?, right.advance()?) {
                    (None, None) => return Ok(true),
                    (Some(a), Some(b)) if a == b => {}
                    _ => return Ok(false),
                }
            })
        })
    }
}

// =============================================================================
// Reductions over values
// =============================================================================

impl<T: Clone + 'static> Sequence<T> {
    /// Folds the elements pairwise, seeding with the first one.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptySequence`] on an empty source.
    ///
    /// ```rust
    /// use lazyseq::{Sequence, SequenceError};
    ///
    /// assert_eq!(Sequence::range(1, 4).aggregate(|a, b| a * b), Ok(24));
    /// assert_eq!(
    ///     Sequence::<i32>::empty().aggregate(|a, b| a + b),
    ///     Err(SequenceError::EmptySequence { operation: "aggregate" })
    /// );
    /// ```
    pub fn aggregate<F>(&self, folder: F) -> SequenceResult<T>
    where
        F: Fn(&T, &T) -> T,
    {
        self.reduce("aggregate", folder)
    }

    /// Sum of the elements. Zero for an empty source.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn sum(&self) -> SequenceResult<T>
    where
        T: Sum<T>,
    {
        self.iter().sum()
    }

    /// The smallest element; the first of equals wins.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptySequence`] on an empty source.
    pub fn min(&self) -> SequenceResult<T>
    where
        T: Ord,
    {
        self.reduce("min", |best, item| {
            if item < best { item.clone() } else { best.clone() }
        })
    }

    /// The largest element; the first of equals wins.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptySequence`] on an empty source.
    pub fn max(&self) -> SequenceResult<T>
    where
        T: Ord,
    {
        self.reduce("max", |best, item| {
            if item > best { item.clone() } else { best.clone() }
        })
    }

    fn reduce<F>(&self, operation: &'static str, folder: F) -> SequenceResult<T>
    where
        F: Fn(&T, &T) -> T,
    {
        self.consume(|cursor| {
            let Some(first) = cursor.advance()? else {
                return Err(SequenceError::EmptySequence { operation });
            };
            let mut accumulator = first.clone();
            while let Some(item) = cursor.advance()? {
                accumulator = folder(&accumulator, item);
            }
            Ok(accumulator)
        })
    }
}
