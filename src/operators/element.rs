//! Element access: the `first`, `last`, `single` and `element_at`
//! families.
//!
//! The `_or_default` forms turn "nothing there" failures (empty source, no
//! match, index past the end) into `T::default()`. Any other error,
//! including [`SequenceError::MoreThanOneElement`], still propagates.

use crate::cursor::Cursor;
use crate::error::{SequenceError, SequenceResult};
use crate::sequence::Sequence;

/// Replaces an absence failure with the default value.
fn or_default<T: Default>(outcome: SequenceResult<T>) -> SequenceResult<T> {
    match outcome {
        Err(
            SequenceError::EmptySequence { .. }
            | SequenceError::NoMatchingElement { .. }
            | SequenceError::IndexOutOfRange { .. },
        ) => Ok(T::default()),
        other => other,
    }
}

impl<T: Clone + 'static> Sequence<T> {
    // =========================================================================
    // First
    // =========================================================================

    /// The first element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptySequence`] if there is none.
    ///
    /// ```rust
    /// use lazyseq::{Sequence, SequenceError};
    ///
    /// assert_eq!(Sequence::range(7, 3).first(), Ok(7));
    /// assert_eq!(
    ///     Sequence::<i32>::empty().first(),
    ///     Err(SequenceError::EmptySequence { operation: "first" })
    /// );
    /// ```
    pub fn first(&self) -> SequenceResult<T> {
        self.consume(|cursor| {
            cursor
                .advance()?
                .cloned()
                .ok_or(SequenceError::EmptySequence { operation: "first" })
        })
    }

    /// The first element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::NoMatchingElement`] if nothing matches.
    pub fn first_where<P>(&self, predicate: P) -> SequenceResult<T>
    where
        P: Fn(&T) -> bool,
    {
        self.consume(|cursor| {
            while let Some(item) = cursor.advance()? {
                if predicate(item) {
                    return Ok(item.clone());
                }
            }
            Err(SequenceError::NoMatchingElement {
                operation: "first_where",
            })
        })
    }

    /// The first element, or `T::default()` if there is none.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn first_or_default(&self) -> SequenceResult<T>
    where
        T: Default,
    {
        or_default(self.first())
    }

    /// The first match, or `T::default()` if nothing matches.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn first_where_or_default<P>(&self, predicate: P) -> SequenceResult<T>
    where
        T: Default,
        P: Fn(&T) -> bool,
    {
        or_default(self.first_where(predicate))
    }

    // =========================================================================
    // Last
    // =========================================================================

    /// The last element. Reads the whole source.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptySequence`] if there is none.
    pub fn last(&self) -> SequenceResult<T> {
        self.consume(|cursor| {
            let mut last = None;
            while let Some(item) = cursor.advance()? {
                last = Some(item.clone());
            }
            last.ok_or(SequenceError::EmptySequence { operation: "last" })
        })
    }

    /// The last element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::NoMatchingElement`] if nothing matches.
    pub fn last_where<P>(&self, predicate: P) -> SequenceResult<T>
    where
        P: Fn(&T) -> bool,
    {
        self.consume(|cursor| {
            let mut last = None;
            while let Some(item) = cursor.advance()? {
                if predicate(item) {
                    last = Some(item.clone());
                }
            }
            last.ok_or(SequenceError::NoMatchingElement {
                operation: "last_where",
            })
        })
    }

    /// The last element, or `T::default()` if there is none.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn last_or_default(&self) -> SequenceResult<T>
    where
        T: Default,
    {
        or_default(self.last())
    }

    /// The last match, or `T::default()` if nothing matches.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn last_where_or_default<P>(&self, predicate: P) -> SequenceResult<T>
    where
        T: Default,
        P: Fn(&T) -> bool,
    {
        or_default(self.last_where(predicate))
    }

    // =========================================================================
    // Single
    // =========================================================================

    /// The only element.
    ///
    /// Stops after the second element: it never reads further to find out
    /// how many there are.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptySequence`] if there is none and
    /// [`SequenceError::MoreThanOneElement`] if there are several.
    pub fn single(&self) -> SequenceResult<T> {
        self.consume(|cursor| {
            let Some(item) = cursor.advance()? else {
                return Err(SequenceError::EmptySequence { operation: "single" });
            };
            let single = item.clone();
            if cursor.try_advance()? {
                return Err(SequenceError::MoreThanOneElement { operation: "single" });
            }
            Ok(single)
        })
    }

    /// The only element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::NoMatchingElement`] if nothing matches and
    /// [`SequenceError::MoreThanOneElement`] on a second match.
    pub fn single_where<P>(&self, predicate: P) -> SequenceResult<T>
    where
        P: Fn(&T) -> bool,
    {
        self.consume(|cursor| {
            let mut found = None;
            while let Some(item) = cursor.advance()? {
                if !predicate(item) {
                    continue;
                }
                if found.is_some() {
                    return Err(SequenceError::MoreThanOneElement {
                        operation: "single_where",
                    });
                }
                found = Some(item.clone());
            }
            found.ok_or(SequenceError::NoMatchingElement {
                operation: "single_where",
            })
        })
    }

    /// The only element, or `T::default()` if there is none.
    ///
    /// # Errors
    ///
    /// Still [`SequenceError::MoreThanOneElement`] if there are several.
    ///
    /// ```rust
    /// use lazyseq::{Sequence, SequenceError};
    ///
    /// assert_eq!(Sequence::<u8>::empty().single_or_default(), Ok(0));
    /// assert_eq!(
    ///     Sequence::from_vec(vec![1, 2]).single_or_default(),
    ///     Err(SequenceError::MoreThanOneElement { operation: "single" })
    /// );
    /// ```
    pub fn single_or_default(&self) -> SequenceResult<T>
    where
        T: Default,
    {
        or_default(self.single())
    }

    /// The only match, or `T::default()` if nothing matches.
    ///
    /// # Errors
    ///
    /// Still [`SequenceError::MoreThanOneElement`] on a second match.
    pub fn single_where_or_default<P>(&self, predicate: P) -> SequenceResult<T>
    where
        T: Default,
        P: Fn(&T) -> bool,
    {
        or_default(self.single_where(predicate))
    }

    // =========================================================================
    // Element At
    // =========================================================================

    /// The element at zero-based `index`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::IndexOutOfRange`] past the end, reporting how many
    /// elements the source actually had.
    pub fn element_at(&self, index: usize) -> SequenceResult<T> {
        self.consume(|cursor| {
            let mut length = 0;
            while let Some(item) = cursor.advance()? {
                if length == index {
                    return Ok(item.clone());
                }
                length += 1;
            }
            Err(SequenceError::IndexOutOfRange { index, length })
        })
    }

    /// The element at `index`, or `T::default()` past the end.
    ///
    /// # Errors
    ///
    /// Propagates errors raised while pulling.
    pub fn element_at_or_default(&self, index: usize) -> SequenceResult<T>
    where
        T: Default,
    {
        or_default(self.element_at(index))
    }
}
