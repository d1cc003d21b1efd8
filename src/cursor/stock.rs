//! Cursors over in-memory and generated values.

use std::iter::Fuse;
use std::marker::PhantomData;
use std::rc::Rc;

use super::Cursor;
use crate::error::SequenceResult;

// =============================================================================
// EmptyCursor
// =============================================================================

/// A cursor that is exhausted from the start.
pub struct EmptyCursor<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> EmptyCursor<T> {
    /// Creates an empty cursor.
    #[inline]
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for EmptyCursor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cursor for EmptyCursor<T> {
    type Item = T;

    #[inline]
    fn try_advance(&mut self) -> SequenceResult<bool> {
        Ok(false)
    }

    #[inline]
    fn current(&self) -> Option<&T> {
        None
    }
}

// =============================================================================
// OnceCursor
// =============================================================================

/// A cursor over exactly one element.
pub struct OnceCursor<T> {
    value: T,
    state: OnceState,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OnceState {
    Before,
    On,
    After,
}

impl<T> OnceCursor<T> {
    /// Creates a cursor yielding `value` once.
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            state: OnceState::Before,
        }
    }
}

impl<T> Cursor for OnceCursor<T> {
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.state = match self.state {
            OnceState::Before => OnceState::On,
            OnceState::On | OnceState::After => OnceState::After,
        };
        Ok(self.state == OnceState::On)
    }

    fn current(&self) -> Option<&T> {
        (self.state == OnceState::On).then_some(&self.value)
    }
}

// =============================================================================
// SliceCursor
// =============================================================================

/// A cursor over a shared, immutable buffer.
///
/// Many cursors can walk the same `Rc<[T]>` independently.
pub struct SliceCursor<T> {
    items: Rc<[T]>,
    next: usize,
    positioned: bool,
}

impl<T> SliceCursor<T> {
    /// Creates a cursor positioned before the first element of `items`.
    #[inline]
    pub const fn new(items: Rc<[T]>) -> Self {
        Self {
            items,
            next: 0,
            positioned: false,
        }
    }
}

impl<T> Cursor for SliceCursor<T> {
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        if self.next < self.items.len() {
            self.next += 1;
            self.positioned = true;
        } else {
            self.positioned = false;
        }
        Ok(self.positioned)
    }

    fn current(&self) -> Option<&T> {
        if self.positioned {
            self.items.get(self.next - 1)
        } else {
            None
        }
    }
}

// =============================================================================
// RangeCursor
// =============================================================================

/// A cursor over consecutive integers.
///
/// Stops early instead of overflowing past `i32::MAX`.
pub struct RangeCursor {
    next: Option<i32>,
    remaining: usize,
    current: Option<i32>,
}

impl RangeCursor {
    /// Creates a cursor over `count` integers starting at `start`.
    #[inline]
    pub const fn new(start: i32, count: usize) -> Self {
        Self {
            next: Some(start),
            remaining: count,
            current: None,
        }
    }
}

impl Cursor for RangeCursor {
    type Item = i32;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.current = match self.next {
            Some(value) if self.remaining > 0 => {
                self.remaining -= 1;
                self.next = value.checked_add(1);
                Some(value)
            }
            _ => None,
        };
        Ok(self.current.is_some())
    }

    fn current(&self) -> Option<&i32> {
        self.current.as_ref()
    }
}

// =============================================================================
// RepeatCursor
// =============================================================================

/// A cursor yielding one value a fixed number of times.
pub struct RepeatCursor<T> {
    value: T,
    remaining: usize,
    positioned: bool,
}

impl<T> RepeatCursor<T> {
    /// Creates a cursor yielding `value` `count` times.
    #[inline]
    pub const fn new(value: T, count: usize) -> Self {
        Self {
            value,
            remaining: count,
            positioned: false,
        }
    }
}

impl<T> Cursor for RepeatCursor<T> {
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.positioned = self.remaining > 0;
        if self.positioned {
            self.remaining -= 1;
        }
        Ok(self.positioned)
    }

    fn current(&self) -> Option<&T> {
        self.positioned.then_some(&self.value)
    }
}

// =============================================================================
// GenerateCursor
// =============================================================================

/// A cursor that unfolds values from a seed.
///
/// Yields the seed, then `step(seed)`, then `step(step(seed))`, until
/// `step` returns `None`. If it never does, the cursor is infinite.
pub struct GenerateCursor<T, F> {
    seed: Option<T>,
    current: Option<T>,
    step: Rc<F>,
}

impl<T, F> GenerateCursor<T, F>
where
    F: Fn(&T) -> Option<T>,
{
    /// Creates a generator starting at `seed`.
    #[inline]
    pub const fn new(seed: T, step: Rc<F>) -> Self {
        Self {
            seed: Some(seed),
            current: None,
            step,
        }
    }
}

impl<T, F> Cursor for GenerateCursor<T, F>
where
    F: Fn(&T) -> Option<T>,
{
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.current = match (self.seed.take(), self.current.take()) {
            (Some(seed), _) => Some(seed),
            (None, Some(previous)) => (self.step)(&previous),
            (None, None) => None,
        };
        Ok(self.current.is_some())
    }

    fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }
}

// =============================================================================
// IteratorCursor
// =============================================================================

/// Adapts a standard iterator to the cursor protocol.
///
/// The iterator can only be walked once, so this cursor is usually wrapped
/// with [`Sequence::from_cursor`](crate::Sequence::from_cursor). The
/// iterator is fused, so once it returns `None` the cursor stays exhausted.
pub struct IteratorCursor<I: Iterator> {
    iterator: Fuse<I>,
    current: Option<I::Item>,
}

impl<I: Iterator> IteratorCursor<I> {
    /// Wraps `iterator`.
    #[inline]
    pub fn new(iterator: I) -> Self {
        Self {
            iterator: iterator.fuse(),
            current: None,
        }
    }
}

impl<I: Iterator> Cursor for IteratorCursor<I> {
    type Item = I::Item;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.current = self.iterator.next();
        Ok(self.current.is_some())
    }

    fn current(&self) -> Option<&I::Item> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn drain<C: Cursor>(cursor: &mut C) -> Vec<C::Item>
    where
        C::Item: Clone,
    {
        let mut items = Vec::new();
        while let Some(item) = cursor.advance().unwrap() {
            items.push(item.clone());
        }
        items
    }

    #[rstest]
    fn test_empty_cursor_stays_exhausted() {
        let mut cursor = EmptyCursor::<i32>::new();
        assert!(!cursor.try_advance().unwrap());
        assert!(!cursor.try_advance().unwrap());
        assert_eq!(cursor.current(), None);
    }

    #[rstest]
    fn test_once_cursor_yields_single_value() {
        let mut cursor = OnceCursor::new("only");
        assert_eq!(cursor.current(), None);
        assert_eq!(drain(&mut cursor), vec!["only"]);
        assert!(!cursor.try_advance().unwrap());
        assert_eq!(cursor.current(), None);
    }

    #[rstest]
    fn test_slice_cursor_walks_in_order() {
        let mut cursor = SliceCursor::new(Rc::from(vec![3, 1, 2]));
        assert_eq!(drain(&mut cursor), vec![3, 1, 2]);
        assert_eq!(cursor.current(), None);
    }

    #[rstest]
    fn test_slice_cursors_are_independent() {
        let items: Rc<[i32]> = Rc::from(vec![1, 2, 3]);
        let mut first = SliceCursor::new(Rc::clone(&items));
        let mut second = SliceCursor::new(Rc::clone(&items));

        assert_eq!(first.advance().unwrap(), Some(&1));
        assert_eq!(first.advance().unwrap(), Some(&2));
        assert_eq!(second.advance().unwrap(), Some(&1));
        assert_eq!(first.current(), Some(&2));
    }

    #[rstest]
    #[case(0, 3, vec![0, 1, 2])]
    #[case(-2, 4, vec![-2, -1, 0, 1])]
    #[case(5, 0, vec![])]
    #[case(i32::MAX - 1, 5, vec![i32::MAX - 1, i32::MAX])]
    fn test_range_cursor(#[case] start: i32, #[case] count: usize, #[case] expected: Vec<i32>) {
        let mut cursor = RangeCursor::new(start, count);
        assert_eq!(drain(&mut cursor), expected);
        assert!(!cursor.try_advance().unwrap());
    }

    #[rstest]
    fn test_repeat_cursor() {
        let mut cursor = RepeatCursor::new('x', 3);
        assert_eq!(drain(&mut cursor), vec!['x', 'x', 'x']);
        assert_eq!(cursor.current(), None);
    }

    #[rstest]
    fn test_generate_cursor_stops_on_none() {
        let step = Rc::new(|value: &u32| (*value < 16).then(|| value * 2));
        let mut cursor = GenerateCursor::new(1, step);
        assert_eq!(drain(&mut cursor), vec![1, 2, 4, 8, 16]);
        assert!(!cursor.try_advance().unwrap());
    }

    #[rstest]
    fn test_iterator_cursor_adapts_std_iterator() {
        let mut cursor = IteratorCursor::new("abc".chars());
        assert_eq!(drain(&mut cursor), vec!['a', 'b', 'c']);
    }

    /// Yields `Some` on even calls and `None` on odd ones, forever.
    struct Flickering {
        calls: u32,
    }

    impl Iterator for Flickering {
        type Item = u32;

        fn next(&mut self) -> Option<u32> {
            self.calls += 1;
            (self.calls % 2 == 1).then_some(self.calls)
        }
    }

    #[rstest]
    fn test_iterator_cursor_stays_exhausted_over_unfused_iterator() {
        let mut cursor = IteratorCursor::new(Flickering { calls: 0 });
        assert_eq!(cursor.advance().unwrap(), Some(&1));
        assert!(!cursor.try_advance().unwrap());
        assert!(!cursor.try_advance().unwrap());
        assert!(!cursor.try_advance().unwrap());
        assert_eq!(cursor.current(), None);
    }
}
