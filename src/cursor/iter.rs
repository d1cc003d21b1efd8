//! Bridge from sequences to `std::iter::Iterator`.

use super::{BoxCursor, Cursor};
use crate::error::SequenceResult;
use crate::sequence::Sequence;

enum IterState<T> {
    Unopened(Sequence<T>),
    Open(BoxCursor<T>),
    Finished,
}

/// A standard iterator over a [`Sequence`].
///
/// The cursor is opened on the first call to `next`, so creating the
/// iterator does no work. Items are cloned out of the cursor. After an
/// error the iterator is fused and yields `None`. Dropping the iterator,
/// even half-way, disposes the cursor.
///
/// # Examples
///
/// ```rust
/// use lazyseq::Sequence;
///
/// let sequence = Sequence::from_vec(vec![1, 2, 3]);
/// let doubled: Vec<i32> = sequence
///     .iter()
///     .map(|item| item.map(|value| value * 2))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub struct Iter<T> {
    state: IterState<T>,
}

impl<T> Iter<T> {
    pub(crate) const fn new(sequence: Sequence<T>) -> Self {
        Self {
            state: IterState::Unopened(sequence),
        }
    }

    fn finish(&mut self) {
        if let IterState::Open(cursor) = &mut self.state {
            cursor.dispose();
        }
        self.state = IterState::Finished;
    }
}

impl<T: Clone + 'static> Iterator for Iter<T> {
    type Item = SequenceResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let IterState::Unopened(sequence) = &self.state {
            match sequence.cursor() {
                Ok(cursor) => self.state = IterState::Open(cursor),
                Err(error) => {
                    self.state = IterState::Finished;
                    return Some(Err(error));
                }
            }
        }

        let IterState::Open(cursor) = &mut self.state else {
            return None;
        };

        match cursor.advance() {
            Ok(Some(item)) => Some(Ok(item.clone())),
            Ok(None) => {
                self.finish();
                None
            }
            Err(error) => {
                self.finish();
                Some(Err(error))
            }
        }
    }
}

impl<T> Drop for Iter<T> {
    fn drop(&mut self) {
        self.finish();
    }
}

impl<T: Clone + 'static> std::iter::FusedIterator for Iter<T> {}
