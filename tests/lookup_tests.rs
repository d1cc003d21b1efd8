//! Integration tests for lookups, grouping and joins.
//!
//! Tests cover:
//! - Group order and element order
//! - The null-key group
//! - Missing keys
//! - join / group_join over lookups

use lazyseq::{Grouping, Lookup, Sequence};
use rstest::rstest;

fn pairs() -> Sequence<(&'static str, i32)> {
    Sequence::from_vec(vec![("a", 1), ("b", 2), ("a", 3)])
}

// =============================================================================
// Lookup
// =============================================================================

#[rstest]
fn group_by_collects_in_first_occurrence_order() {
    let groups = pairs().group_by_map(|pair| pair.0, |pair| pair.1).to_vec().unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key(), Some(&"a"));
    assert_eq!(groups[0].elements().to_vec().unwrap(), vec![1, 3]);
    assert_eq!(groups[1].key(), Some(&"b"));
    assert_eq!(groups[1].elements().to_vec().unwrap(), vec![2]);
}

#[rstest]
fn to_lookup_counts_null_group_once() {
    let names = Sequence::from_vec(vec![Some("x"), None, Some("y"), None, Some("x")]);
    let lookup = names.to_lookup_nullable(|name| *name).unwrap();

    assert_eq!(lookup.count(), 3);
    assert!(lookup.contains(None));
    assert_eq!(lookup.get(None).count(), Ok(2));
    assert_eq!(lookup.get(Some(&"x")).count(), Ok(2));
}

#[rstest]
#[case(Some(&"missing"))]
#[case(None)]
fn missing_key_yields_empty_sequence(#[case] key: Option<&&'static str>) {
    let lookup = pairs().to_lookup(|pair| pair.0).unwrap();
    assert!(!lookup.contains(key));
    assert!(lookup.get(key).to_vec().unwrap().is_empty());
}

#[rstest]
fn lookup_build_with_explicit_selectors() {
    let lookup: Lookup<bool, i32> = Lookup::build(
        &Sequence::range(1, 6),
        |value| Some(value % 2 == 0),
        |value| value * 100,
    )
    .unwrap();

    assert_eq!(lookup.get(Some(&true)).to_vec().unwrap(), vec![200, 400, 600]);
    let keys: Vec<_> = lookup.iter_groupings().map(|group| group.key().copied()).collect();
    assert_eq!(keys, vec![Some(false), Some(true)]);
}

#[rstest]
fn groupings_sequence_replays() {
    let lookup = pairs().to_lookup(|pair| pair.0).unwrap();
    let groupings = lookup.groupings();

    let sizes: Vec<usize> = groupings.select(Grouping::len).to_vec().unwrap();
    assert_eq!(sizes, vec![2, 1]);
    assert_eq!(groupings.count(), Ok(2));
}

// =============================================================================
// Joins
// =============================================================================

#[rstest]
fn join_pairs_matches_in_inner_order() {
    let customers = Sequence::from_vec(vec![(1, "ann"), (2, "bob"), (3, "cy")]);
    let orders = Sequence::from_vec(vec![(2, 40), (1, 10), (2, 15)]);

    let joined = customers.join(
        &orders,
        |customer| customer.0,
        |order| order.0,
        |customer, order| (customer.1, order.1),
    );
    assert_eq!(
        joined.to_vec().unwrap(),
        vec![("ann", 10), ("bob", 40), ("bob", 15)]
    );
}

#[rstest]
fn group_join_keeps_every_outer_element() {
    let customers = Sequence::from_vec(vec![(1, "ann"), (2, "bob"), (3, "cy")]);
    let orders = Sequence::from_vec(vec![(2, 40), (1, 10), (2, 15)]);

    let totals = customers.group_join(
        &orders,
        |customer| customer.0,
        |order| order.0,
        |customer, matches| (customer.1, matches.fold(0, |total, order| total + order.1).unwrap()),
    );
    assert_eq!(
        totals.to_vec().unwrap(),
        vec![("ann", 10), ("bob", 55), ("cy", 0)]
    );
}

#[rstest]
fn join_reads_inner_per_cursor() {
    let inner = Sequence::from_vec(vec![1, 1]);
    let joined = Sequence::from_vec(vec![1]).join(&inner, |v| *v, |v| *v, |a, b| a + b);
    assert_eq!(joined.to_vec().unwrap(), vec![2, 2]);
    assert_eq!(joined.to_vec().unwrap(), vec![2, 2]);
}
