//! Single-assignment deferred cell.
//!
//! [`Thunk`] holds either an unevaluated factory or the value that factory
//! produced. The factory runs at most once, on the first [`Thunk::force`].
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::control::Thunk;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let calls = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&calls);
//! let thunk = Thunk::new(move || {
//!     counter.set(counter.get() + 1);
//!     42
//! });
//!
//! assert_eq!(calls.get(), 0);
//! assert_eq!(*thunk.force().unwrap(), 42);
//! assert_eq!(*thunk.force().unwrap(), 42);
//! assert_eq!(calls.get(), 1);
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;

use crate::error::{SequenceError, SequenceResult};

/// The internal state of a [`Thunk`].
enum ThunkState<T> {
    /// The factory has not run yet.
    Pending(Box<dyn FnOnce() -> T>),
    /// The factory ran and produced this value.
    Forced(T),
    /// The factory is running, or panicked while running.
    Poisoned,
}

/// A lazily evaluated value with memoization.
///
/// Unlike `std::cell::LazyCell`, the factory is a boxed `FnOnce` so thunks
/// with different factories share one type, and a poisoned thunk reports
/// [`SequenceError::Poisoned`] instead of panicking again.
///
/// # Thread Safety
///
/// Not thread-safe. Sequences in this crate are single-threaded.
pub struct Thunk<T> {
    state: RefCell<ThunkState<T>>,
}

impl<T> Thunk<T> {
    /// Creates a thunk that will run `factory` on first force.
    #[inline]
    pub fn new<F>(factory: F) -> Self
    where
        F: FnOnce() -> T + 'static,
    {
        Self {
            state: RefCell::new(ThunkState::Pending(Box::new(factory))),
        }
    }

    /// Creates a thunk that is already forced.
    ///
    /// ```rust
    /// use lazyseq::control::Thunk;
    ///
    /// let thunk = Thunk::from_value("ready");
    /// assert!(thunk.is_forced());
    /// ```
    #[inline]
    pub fn from_value(value: T) -> Self {
        Self {
            state: RefCell::new(ThunkState::Forced(value)),
        }
    }

    /// Forces evaluation and returns a reference to the memoized value.
    ///
    /// The borrow on the internal cell is released while the factory runs,
    /// so a factory that forces its own thunk observes
    /// [`SequenceError::Poisoned`] rather than a borrow panic.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Poisoned`] if the factory panicked on an
    /// earlier force, or is re-entrantly forcing this thunk.
    pub fn force(&self) -> SequenceResult<Ref<'_, T>> {
        let factory = {
            let mut state = self.state.borrow_mut();
            // Stays Poisoned if the factory unwinds.
            match std::mem::replace(&mut *state, ThunkState::Poisoned) {
                ThunkState::Pending(factory) => Some(factory),
                ThunkState::Forced(value) => {
                    *state = ThunkState::Forced(value);
                    None
                }
                ThunkState::Poisoned => {
                    tracing::debug!("forced a poisoned thunk");
                    return Err(SequenceError::Poisoned);
                }
            }
        };

        if let Some(factory) = factory {
            let value = factory();
            *self.state.borrow_mut() = ThunkState::Forced(value);
            tracing::trace!("thunk forced");
        }

        Ref::filter_map(self.state.borrow(), |state| match state {
            ThunkState::Forced(value) => Some(value),
            _ => None,
        })
        .map_err(|_| SequenceError::Poisoned)
    }

    /// Returns the value if the thunk was already forced, without forcing it.
    pub fn get(&self) -> Option<Ref<'_, T>> {
        Ref::filter_map(self.state.borrow(), |state| match state {
            ThunkState::Forced(value) => Some(value),
            _ => None,
        })
        .ok()
    }

    /// Returns whether the factory has run to completion.
    #[inline]
    pub fn is_forced(&self) -> bool {
        matches!(&*self.state.borrow(), ThunkState::Forced(_))
    }

    /// Returns whether the factory panicked.
    #[inline]
    pub fn is_poisoned(&self) -> bool {
        matches!(&*self.state.borrow(), ThunkState::Poisoned)
    }

    /// Consumes the thunk, forcing it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::Poisoned`] if the factory panicked earlier.
    pub fn into_inner(self) -> SequenceResult<T> {
        match self.state.into_inner() {
            ThunkState::Forced(value) => Ok(value),
            ThunkState::Pending(factory) => Ok(factory()),
            ThunkState::Poisoned => Err(SequenceError::Poisoned),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Thunk<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.borrow() {
            ThunkState::Forced(value) => formatter.debug_tuple("Thunk").field(value).finish(),
            ThunkState::Pending(_) => formatter.debug_tuple("Thunk").field(&"<pending>").finish(),
            ThunkState::Poisoned => formatter.debug_tuple("Thunk").field(&"<poisoned>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;

    #[rstest]
    fn test_thunk_is_pending_until_forced() {
        let thunk = Thunk::new(|| 42);
        assert!(!thunk.is_forced());
        assert!(thunk.get().is_none());
    }

    #[rstest]
    fn test_thunk_force_memoizes() {
        let call_count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&call_count);
        let thunk = Thunk::new(move || {
            counter.set(counter.get() + 1);
            vec![1, 2, 3]
        });

        assert_eq!(*thunk.force().unwrap(), vec![1, 2, 3]);
        assert_eq!(*thunk.force().unwrap(), vec![1, 2, 3]);
        assert_eq!(call_count.get(), 1);
        assert!(thunk.is_forced());
    }

    #[rstest]
    fn test_thunk_from_value_never_runs_factory() {
        let thunk = Thunk::from_value(7);
        assert_eq!(*thunk.force().unwrap(), 7);
        assert_eq!(thunk.into_inner(), Ok(7));
    }

    #[rstest]
    fn test_thunk_panicking_factory_poisons() {
        let thunk: Thunk<i32> = Thunk::new(|| panic!("factory failed"));

        let outcome = catch_unwind(AssertUnwindSafe(|| thunk.force().map(|value| *value)));
        assert!(outcome.is_err());
        assert!(thunk.is_poisoned());
        assert_eq!(thunk.force().err(), Some(SequenceError::Poisoned));
    }

    #[rstest]
    fn test_thunk_into_inner_forces_pending() {
        let thunk = Thunk::new(|| String::from("late"));
        assert_eq!(thunk.into_inner(), Ok(String::from("late")));
    }

    #[rstest]
    fn test_thunk_debug_shows_state() {
        let thunk = Thunk::new(|| 1);
        assert_eq!(format!("{thunk:?}"), "Thunk(\"<pending>\")");
        let _ = thunk.force();
        assert_eq!(format!("{thunk:?}"), "Thunk(1)");
    }
}
