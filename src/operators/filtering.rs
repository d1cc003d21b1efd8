//! Filtering and slicing: `filter`, `filter_indexed`, `take`, `take_while`,
//! `skip`, `skip_while` and `default_if_empty`.

use std::rc::Rc;

use crate::cursor::{BoxCursor, Cursor, opened};
use crate::error::SequenceResult;
use crate::sequence::Sequence;

// =============================================================================
// Cursors
// =============================================================================

struct Filter<T, P> {
    source: BoxCursor<T>,
    predicate: Rc<P>,
}

impl<T, P> Cursor for Filter<T, P>
where
    P: Fn(&T) -> bool,
{
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        while let Some(item) = self.source.advance()? {
            if (self.predicate)(item) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn current(&self) -> Option<&T> {
        self.source.current()
    }

    fn dispose(&mut self) {
        self.source.dispose();
    }
}

struct FilterIndexed<T, P> {
    source: BoxCursor<T>,
    predicate: Rc<P>,
    index: usize,
}

impl<T, P> Cursor for FilterIndexed<T, P>
where
    P: Fn(&T, usize) -> bool,
{
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        while let Some(item) = self.source.advance()? {
            let index = self.index;
            self.index += 1;
            if (self.predicate)(item, index) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn current(&self) -> Option<&T> {
        self.source.current()
    }

    fn dispose(&mut self) {
        self.source.dispose();
    }
}

struct Take<T> {
    source: BoxCursor<T>,
    remaining: usize,
    positioned: bool,
}

impl<T> Cursor for Take<T> {
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        // Element `count + 1` is never pulled from the source.
        if self.remaining == 0 {
            self.positioned = false;
            return Ok(false);
        }
        self.remaining -= 1;
        self.positioned = self.source.try_advance()?;
        if !self.positioned {
            self.remaining = 0;
        }
        Ok(self.positioned)
    }

    fn current(&self) -> Option<&T> {
        if self.positioned {
            self.source.current()
        } else {
            None
        }
    }

    fn dispose(&mut self) {
        self.positioned = false;
        self.source.dispose();
    }
}

struct TakeWhile<T, P> {
    source: BoxCursor<T>,
    predicate: Rc<P>,
    done: bool,
}

impl<T, P> Cursor for TakeWhile<T, P>
where
    P: Fn(&T) -> bool,
{
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        if self.done {
            return Ok(false);
        }
        let accepted = match self.source.advance()? {
            Some(item) => (self.predicate)(item),
            None => false,
        };
        self.done = !accepted;
        Ok(accepted)
    }

    fn current(&self) -> Option<&T> {
        if self.done {
            None
        } else {
            self.source.current()
        }
    }

    fn dispose(&mut self) {
        self.done = true;
        self.source.dispose();
    }
}

struct Skip<T> {
    source: BoxCursor<T>,
    remaining: usize,
}

impl<T> Cursor for Skip<T> {
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        // The prefix is dropped on the first advance, not when the cursor opens.
        while self.remaining > 0 {
            self.remaining -= 1;
            if !self.source.try_advance()? {
                self.remaining = 0;
                return Ok(false);
            }
        }
        self.source.try_advance()
    }

    fn current(&self) -> Option<&T> {
        if self.remaining == 0 {
            self.source.current()
        } else {
            None
        }
    }

    fn dispose(&mut self) {
        self.remaining = 0;
        self.source.dispose();
    }
}

struct SkipWhile<T, P> {
    source: BoxCursor<T>,
    predicate: Rc<P>,
    skipping: bool,
}

impl<T, P> Cursor for SkipWhile<T, P>
where
    P: Fn(&T) -> bool,
{
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        if !self.skipping {
            return self.source.try_advance();
        }
        while let Some(item) = self.source.advance()? {
            if !(self.predicate)(item) {
                self.skipping = false;
                return Ok(true);
            }
        }
        self.skipping = false;
        Ok(false)
    }

    fn current(&self) -> Option<&T> {
        if self.skipping {
            None
        } else {
            self.source.current()
        }
    }

    fn dispose(&mut self) {
        self.skipping = false;
        self.source.dispose();
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FallbackPhase {
    Start,
    Source,
    Fallback,
    Done,
}

struct DefaultIfEmpty<T> {
    source: BoxCursor<T>,
    fallback: T,
    phase: FallbackPhase,
}

impl<T> Cursor for DefaultIfEmpty<T> {
    type Item = T;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        match self.phase {
            FallbackPhase::Start => {
                self.phase = if self.source.try_advance()? {
                    FallbackPhase::Source
                } else {
                    FallbackPhase::Fallback
                };
                Ok(true)
            }
            FallbackPhase::Source => {
                if self.source.try_advance()? {
                    return Ok(true);
                }
                self.phase = FallbackPhase::Done;
                Ok(false)
            }
            FallbackPhase::Fallback | FallbackPhase::Done => {
                self.phase = FallbackPhase::Done;
                Ok(false)
            }
        }
    }

    fn current(&self) -> Option<&T> {
        match self.phase {
            FallbackPhase::Source => self.source.current(),
            FallbackPhase::Fallback => Some(&self.fallback),
            FallbackPhase::Start | FallbackPhase::Done => None,
        }
    }

    fn dispose(&mut self) {
        self.phase = FallbackPhase::Done;
        self.source.dispose();
    }
}

// =============================================================================
// Operators
// =============================================================================

impl<T: 'static> Sequence<T> {
    /// Keeps the elements satisfying `predicate`. The `Where` of LINQ.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let odd = Sequence::range(1, 6).filter(|value| value % 2 == 1);
    /// assert_eq!(odd.to_vec().unwrap(), vec![1, 3, 5]);
    /// ```
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Self::from_opener(move || {
            opened(Filter {
                source: source.cursor()?,
                predicate: Rc::clone(&predicate),
            })
        })
    }

    /// Keeps the elements whose value and source position satisfy
    /// `predicate`.
    pub fn filter_indexed<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T, usize) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Self::from_opener(move || {
            opened(FilterIndexed {
                source: source.cursor()?,
                predicate: Rc::clone(&predicate),
                index: 0,
            })
        })
    }

    /// The first `count` elements.
    ///
    /// Safe on infinite sources: the element after the last one taken is
    /// never produced.
    pub fn take(&self, count: usize) -> Self {
        let source = self.clone();
        Self::from_opener(move || {
            opened(Take {
                source: source.cursor()?,
                remaining: count,
                positioned: false,
            })
        })
    }

    /// Elements up to, not including, the first one failing `predicate`.
    pub fn take_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Self::from_opener(move || {
            opened(TakeWhile {
                source: source.cursor()?,
                predicate: Rc::clone(&predicate),
                done: false,
            })
        })
    }

    /// Every element after the first `count`.
    ///
    /// The skipped prefix is pulled on the first advance, so opening a
    /// cursor reads nothing.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let tail = Sequence::range(1, 5).skip(3);
    /// assert_eq!(tail.to_vec().unwrap(), vec![4, 5]);
    /// assert_eq!(tail.to_vec().unwrap(), vec![4, 5]);
    /// ```
    pub fn skip(&self, count: usize) -> Self {
        let source = self.clone();
        Self::from_opener(move || {
            opened(Skip {
                source: source.cursor()?,
                remaining: count,
            })
        })
    }

    /// Every element from the first one failing `predicate` onwards.
    ///
    /// The predicate is not consulted again once an element has failed it.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let rest = Sequence::from_vec(vec![1, 2, 5, 1]).skip_while(|value| *value < 3);
    /// assert_eq!(rest.to_vec().unwrap(), vec![5, 1]);
    /// ```
    pub fn skip_while<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Self::from_opener(move || {
            opened(SkipWhile {
                source: source.cursor()?,
                predicate: Rc::clone(&predicate),
                skipping: true,
            })
        })
    }

    /// The source, or the single element `fallback` if the source is
    /// empty.
    pub fn default_if_empty(&self, fallback: T) -> Self
    where
        T: Clone,
    {
        let source = self.clone();
        Self::from_opener(move || {
            opened(DefaultIfEmpty {
                source: source.cursor()?,
                fallback: fallback.clone(),
                phase: FallbackPhase::Start,
            })
        })
    }
}
