//! Projection operators: `select`, `select_indexed`, `select_many`, `zip`,
//! `zip_with` and `scan`.

use std::rc::Rc;

use crate::cursor::{BoxCursor, Cursor, opened};
use crate::error::SequenceResult;
use crate::sequence::Sequence;

// =============================================================================
// Cursors
// =============================================================================

struct Select<T, U, F> {
    source: BoxCursor<T>,
    selector: Rc<F>,
    current: Option<U>,
}

impl<T, U, F> Cursor for Select<T, U, F>
where
    F: Fn(&T) -> U,
{
    type Item = U;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.current = self.source.advance()?.map(|item| (self.selector)(item));
        Ok(self.current.is_some())
    }

    fn current(&self) -> Option<&U> {
        self.current.as_ref()
    }

    fn dispose(&mut self) {
        self.current = None;
        self.source.dispose();
    }
}

struct SelectIndexed<T, U, F> {
    source: BoxCursor<T>,
    selector: Rc<F>,
    index: usize,
    current: Option<U>,
}

impl<T, U, F> Cursor for SelectIndexed<T, U, F>
where
    F: Fn(&T, usize) -> U,
{
    type Item = U;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.current = match self.source.advance()? {
            Some(item) => {
                let value = (self.selector)(item, self.index);
                self.index += 1;
                Some(value)
            }
            None => None,
        };
        Ok(self.current.is_some())
    }

    fn current(&self) -> Option<&U> {
        self.current.as_ref()
    }

    fn dispose(&mut self) {
        self.current = None;
        self.source.dispose();
    }
}

struct SelectMany<T, U, F> {
    source: BoxCursor<T>,
    selector: Rc<F>,
    inner: Option<BoxCursor<U>>,
}

impl<T, U: 'static, F> Cursor for SelectMany<T, U, F>
where
    F: Fn(&T) -> Sequence<U>,
{
    type Item = U;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        loop {
            if let Some(inner) = &mut self.inner {
                if inner.try_advance()? {
                    return Ok(true);
                }
                inner.dispose();
                self.inner = None;
            }
            let Some(item) = self.source.advance()? else {
                return Ok(false);
            };
            let inner = (self.selector)(item);
            self.inner = Some(inner.cursor()?);
        }
    }

    fn current(&self) -> Option<&U> {
        self.inner.as_ref().and_then(|inner| inner.current())
    }

    fn dispose(&mut self) {
        if let Some(mut inner) = self.inner.take() {
            inner.dispose();
        }
        self.source.dispose();
    }
}

struct Zip<A, B, V, F> {
    first: BoxCursor<A>,
    second: BoxCursor<B>,
    selector: Rc<F>,
    current: Option<V>,
}

impl<A, B, V, F> Cursor for Zip<A, B, V, F>
where
    F: Fn(&A, &B) -> V,
{
    type Item = V;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.current = None;
        // The second source is not pulled once the first runs dry.
        let Some(left) = self.first.advance()? else {
            return Ok(false);
        };
        let Some(right) = self.second.advance()? else {
            return Ok(false);
        };
        self.current = Some((self.selector)(left, right));
        Ok(true)
    }

    fn current(&self) -> Option<&V> {
        self.current.as_ref()
    }

    fn dispose(&mut self) {
        self.current = None;
        self.first.dispose();
        self.second.dispose();
    }
}

struct Scan<T, A, F> {
    source: BoxCursor<T>,
    accumulator: Rc<F>,
    state: A,
    positioned: bool,
}

impl<T, A, F> Cursor for Scan<T, A, F>
where
    F: Fn(&A, &T) -> A,
{
    type Item = A;

    fn try_advance(&mut self) -> SequenceResult<bool> {
        self.positioned = match self.source.advance()? {
            Some(item) => {
                self.state = (self.accumulator)(&self.state, item);
                true
            }
            None => false,
        };
        Ok(self.positioned)
    }

    fn current(&self) -> Option<&A> {
        self.positioned.then_some(&self.state)
    }

    fn dispose(&mut self) {
        self.positioned = false;
        self.source.dispose();
    }
}

// =============================================================================
// Operators
// =============================================================================

impl<T: 'static> Sequence<T> {
    /// Maps each element through `selector`.
    ///
    /// `selector` runs exactly once per element, when that element is
    /// pulled, never earlier.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let lengths = Sequence::from_vec(vec!["a", "bcd", "ef"]).select(|word| word.len());
    /// assert_eq!(lengths.to_vec().unwrap(), vec![1, 3, 2]);
    /// ```
    pub fn select<U, F>(&self, selector: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(&T) -> U + 'static,
    {
        let source = self.clone();
        let selector = Rc::new(selector);
        Sequence::from_opener(move || {
            opened(Select {
                source: source.cursor()?,
                selector: Rc::clone(&selector),
                current: None,
            })
        })
    }

    /// Maps each element and its zero-based position through `selector`.
    pub fn select_indexed<U, F>(&self, selector: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(&T, usize) -> U + 'static,
    {
        let source = self.clone();
        let selector = Rc::new(selector);
        Sequence::from_opener(move || {
            opened(SelectIndexed {
                source: source.cursor()?,
                selector: Rc::clone(&selector),
                index: 0,
                current: None,
            })
        })
    }

    /// Maps each element to a sequence and flattens the results in order.
    ///
    /// Each inner sequence is opened only once the previous one is
    /// exhausted, and disposed as soon as it is.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let expanded = Sequence::from_vec(vec![1, 2, 3])
    ///     .select_many(|count| Sequence::repeat(*count, *count as usize));
    /// assert_eq!(expanded.to_vec().unwrap(), vec![1, 2, 2, 3, 3, 3]);
    /// ```
    pub fn select_many<U, F>(&self, selector: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(&T) -> Sequence<U> + 'static,
    {
        let source = self.clone();
        let selector = Rc::new(selector);
        Sequence::from_opener(move || {
            opened(SelectMany {
                source: source.cursor()?,
                selector: Rc::clone(&selector),
                inner: None,
            })
        })
    }

    /// Pairs elements positionally and combines each pair with `selector`.
    ///
    /// Stops at the end of the shorter source.
    pub fn zip_with<B, V, F>(&self, other: &Sequence<B>, selector: F) -> Sequence<V>
    where
        B: 'static,
        V: 'static,
        F: Fn(&T, &B) -> V + 'static,
    {
        let first = self.clone();
        let second = other.clone();
        let selector = Rc::new(selector);
        Sequence::from_opener(move || {
            let first = first.cursor()?;
            let second = match second.cursor() {
                Ok(second) => second,
                Err(error) => {
                    let mut first = first;
                    first.dispose();
                    return Err(error);
                }
            };
            opened(Zip {
                first,
                second,
                selector: Rc::clone(&selector),
                current: None,
            })
        })
    }

    /// Pairs elements positionally into tuples.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let letters = Sequence::from_vec(vec!['a', 'b', 'c']);
    /// let pairs = Sequence::range(1, 2).zip(&letters);
    /// assert_eq!(pairs.to_vec().unwrap(), vec![(1, 'a'), (2, 'b')]);
    /// ```
    pub fn zip<B>(&self, other: &Sequence<B>) -> Sequence<(T, B)>
    where
        T: Clone,
        B: Clone + 'static,
    {
        self.zip_with(other, |left, right| (left.clone(), right.clone()))
    }

    /// Running accumulation: yields every intermediate accumulator value.
    ///
    /// ```rust
    /// use lazyseq::Sequence;
    ///
    /// let running = Sequence::range(1, 4).scan(0, |total, value| total + value);
    /// assert_eq!(running.to_vec().unwrap(), vec![1, 3, 6, 10]);
    /// ```
    pub fn scan<A, F>(&self, seed: A, accumulator: F) -> Sequence<A>
    where
        A: Clone + 'static,
        F: Fn(&A, &T) -> A + 'static,
    {
        let source = self.clone();
        let accumulator = Rc::new(accumulator);
        Sequence::from_opener(move || {
            opened(Scan {
                source: source.cursor()?,
                accumulator: Rc::clone(&accumulator),
                state: seed.clone(),
                positioned: false,
            })
        })
    }
}
