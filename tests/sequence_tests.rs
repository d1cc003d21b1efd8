//! Integration tests for sequence construction modes and the cursor
//! protocol.
//!
//! Tests cover:
//! - Memoized, deferred and single-shot construction
//! - Independent cursors over one sequence
//! - Exhaustion and reset behavior
//! - The standard iterator bridge

use lazyseq::{Cursor, IteratorCursor, Sequence, SequenceError};
use rstest::rstest;
use std::cell::Cell;
use std::rc::Rc;

// =============================================================================
// Construction Modes
// =============================================================================

#[rstest]
fn memoized_factory_runs_once_across_clones() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let sequence = Sequence::memoized(move || {
        counter.set(counter.get() + 1);
        Sequence::range(1, 3)
    });
    let copy = sequence.clone();

    assert_eq!(sequence.to_vec().unwrap(), vec![1, 2, 3]);
    assert_eq!(copy.to_vec().unwrap(), vec![1, 2, 3]);
    assert_eq!(calls.get(), 1);
}

#[rstest]
fn memoized_factory_is_not_run_by_operator_chaining() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let sequence = Sequence::memoized(move || {
        counter.set(counter.get() + 1);
        Sequence::from_vec(vec![1, 2])
    });

    let chained = sequence.select(|value| value + 1).filter(|value| *value > 0);
    assert_eq!(calls.get(), 0);
    assert_eq!(chained.to_vec().unwrap(), vec![2, 3]);
    assert_eq!(calls.get(), 1);
}

#[rstest]
fn single_shot_sequence_fails_on_second_iteration() {
    let sequence = Sequence::from_cursor(IteratorCursor::new(vec![1, 2, 3].into_iter()));

    assert_eq!(sequence.to_vec().unwrap(), vec![1, 2, 3]);
    assert_eq!(sequence.to_vec(), Err(SequenceError::AlreadyConsumed));
}

#[rstest]
fn single_shot_error_surfaces_through_operators() {
    let sequence = Sequence::from_cursor(IteratorCursor::new(0..3));
    let doubled = sequence.select(|value| value * 2);

    assert_eq!(doubled.count(), Ok(3));
    assert_eq!(doubled.count(), Err(SequenceError::AlreadyConsumed));
}

#[rstest]
fn memoized_panic_poisons_sequence() {
    let sequence: Sequence<i32> = Sequence::memoized(|| panic!("factory failed"));

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sequence.cursor()));
    assert!(outcome.is_err());
    assert!(matches!(sequence.cursor(), Err(SequenceError::Poisoned)));
}

// =============================================================================
// Cursor Protocol
// =============================================================================

#[rstest]
#[case(Sequence::empty())]
#[case(Sequence::from_vec(vec![1]))]
#[case(Sequence::range(0, 4).filter(|value| value % 2 == 0))]
#[case(Sequence::from_vec(vec![1, 2]).concat(&Sequence::from_vec(vec![3])))]
fn exhausted_cursor_keeps_returning_false(#[case] sequence: Sequence<i32>) {
    let mut cursor = sequence.cursor().unwrap();
    while cursor.try_advance().unwrap() {}

    for _ in 0..3 {
        assert!(!cursor.try_advance().unwrap());
        assert_eq!(cursor.current(), None);
    }
    cursor.dispose();
    cursor.dispose();
}

#[rstest]
fn reset_is_rejected_on_operator_cursors() {
    let mut cursor = Sequence::range(1, 3).select(|value| value * 10).cursor().unwrap();
    assert_eq!(cursor.advance().unwrap(), Some(&10));
    assert_eq!(cursor.reset(), Err(SequenceError::ResetNotSupported));
}

#[rstest]
fn operator_cursors_are_independent() {
    let squares = Sequence::range(1, 5).select(|value| value * value);
    let mut first = squares.cursor().unwrap();
    let mut second = squares.cursor().unwrap();

    assert_eq!(first.advance().unwrap(), Some(&1));
    assert_eq!(first.advance().unwrap(), Some(&4));
    assert_eq!(second.advance().unwrap(), Some(&1));
    assert_eq!(first.advance().unwrap(), Some(&9));
}

// =============================================================================
// Iterator Bridge
// =============================================================================

#[rstest]
fn iterator_bridge_works_with_std_adapters() {
    let sequence = Sequence::from_vec(vec!["a", "bb", "ccc"]);
    let lengths: Result<Vec<usize>, _> = sequence.iter().map(|word| word.map(str::len)).collect();
    assert_eq!(lengths.unwrap(), vec![1, 2, 3]);
}

#[rstest]
fn iterator_bridge_fuses_after_error() {
    let failing: Sequence<i32> = Sequence::from_vec(vec![1, 2])
        .select_many(|_| Sequence::defer(|| Err(SequenceError::AlreadyConsumed)));
    let mut iterator = failing.iter();

    assert_eq!(iterator.next(), Some(Err(SequenceError::AlreadyConsumed)));
    assert_eq!(iterator.next(), None);
}

#[rstest]
fn from_iterator_buffers_for_replay() {
    let sequence: Sequence<char> = "xyz".chars().collect();
    assert_eq!(sequence.to_vec().unwrap(), vec!['x', 'y', 'z']);
    assert_eq!(sequence.count(), Ok(3));
}
