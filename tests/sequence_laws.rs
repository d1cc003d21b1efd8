//! Property-based tests for the operator laws.
//!
//! Each law compares a sequence pipeline with the equivalent computation on
//! a plain `Vec`:
//!
//! 1. **Select**: `select(f)` yields `f(x)` for every `x`, in order
//! 2. **Concat**: `concat(s, t)` yields `s` then `t`
//! 3. **Take / Skip**: `take(n).concat(skip(n)) == s`
//! 4. **Distinct**: first occurrences, in order, no repeats
//! 5. **Except / Intersect**: membership against the second source
//! 6. **Group By**: flattening the groups is a permutation of the source
//! 7. **Replay**: iterating twice gives the same elements

use lazyseq::Sequence;
use proptest::prelude::*;
use std::collections::HashSet;

fn first_occurrences(values: &[i16]) -> Vec<i16> {
    let mut seen = HashSet::new();
    values.iter().copied().filter(|value| seen.insert(*value)).collect()
}

proptest! {
    #[test]
    fn prop_select_maps_in_order(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let mapped = Sequence::from_vec(values.clone()).select(|value| value.wrapping_mul(3));
        let expected: Vec<i32> = values.iter().map(|value| value.wrapping_mul(3)).collect();
        prop_assert_eq!(mapped.to_vec().unwrap(), expected);
    }

    #[test]
    fn prop_concat_appends(
        left in prop::collection::vec(any::<u8>(), 0..32),
        right in prop::collection::vec(any::<u8>(), 0..32)
    ) {
        let joined = Sequence::from_vec(left.clone()).concat(&Sequence::from_vec(right.clone()));
        let expected: Vec<u8> = left.into_iter().chain(right).collect();
        prop_assert_eq!(joined.to_vec().unwrap(), expected);
    }

    #[test]
    fn prop_concat_is_associative(
        a in prop::collection::vec(any::<u8>(), 0..16),
        b in prop::collection::vec(any::<u8>(), 0..16),
        c in prop::collection::vec(any::<u8>(), 0..16)
    ) {
        let (a, b, c) = (Sequence::from_vec(a), Sequence::from_vec(b), Sequence::from_vec(c));
        let left = a.concat(&b).concat(&c);
        let right = a.concat(&b.concat(&c));
        prop_assert!(left.sequence_equal(&right).unwrap());
    }

    #[test]
    fn prop_take_then_skip_restores(
        values in prop::collection::vec(any::<i32>(), 0..64),
        count in 0_usize..80
    ) {
        let sequence = Sequence::from_vec(values.clone());
        let rebuilt = sequence.take(count).concat(&sequence.skip(count));
        prop_assert_eq!(rebuilt.to_vec().unwrap(), values);
    }

    #[test]
    fn prop_take_while_skip_while_partition(
        values in prop::collection::vec(0_i32..10, 0..64),
        limit in 0_i32..10
    ) {
        let sequence = Sequence::from_vec(values.clone());
        let head = sequence.take_while(move |value| *value < limit);
        let tail = sequence.skip_while(move |value| *value < limit);
        prop_assert_eq!(head.concat(&tail).to_vec().unwrap(), values);
    }

    #[test]
    fn prop_distinct_keeps_first_occurrences(values in prop::collection::vec(-8_i16..8, 0..64)) {
        let unique = Sequence::from_vec(values.clone()).distinct();
        prop_assert_eq!(unique.to_vec().unwrap(), first_occurrences(&values));
    }

    #[test]
    fn prop_except_matches_filter_of_distinct(
        left in prop::collection::vec(-8_i16..8, 0..48),
        right in prop::collection::vec(-8_i16..8, 0..16)
    ) {
        let removed: HashSet<i16> = right.iter().copied().collect();
        let expected: Vec<i16> = first_occurrences(&left)
            .into_iter()
            .filter(|value| !removed.contains(value))
            .collect();
        let actual = Sequence::from_vec(left).except(&Sequence::from_vec(right));
        prop_assert_eq!(actual.to_vec().unwrap(), expected);
    }

    #[test]
    fn prop_intersect_matches_filter_of_distinct(
        left in prop::collection::vec(-8_i16..8, 0..48),
        right in prop::collection::vec(-8_i16..8, 0..16)
    ) {
        let kept: HashSet<i16> = right.iter().copied().collect();
        let expected: Vec<i16> = first_occurrences(&left)
            .into_iter()
            .filter(|value| kept.contains(value))
            .collect();
        let actual = Sequence::from_vec(left).intersect(&Sequence::from_vec(right));
        prop_assert_eq!(actual.to_vec().unwrap(), expected);
    }

    #[test]
    fn prop_group_by_partitions_source(values in prop::collection::vec(0_u8..20, 0..64)) {
        let groups = Sequence::from_vec(values.clone())
            .group_by(|value| value % 3)
            .to_vec()
            .unwrap();

        let mut flattened: Vec<u8> = groups
            .iter()
            .flat_map(|group| group.as_slice().to_vec())
            .collect();
        let mut sorted = values.clone();
        flattened.sort_unstable();
        sorted.sort_unstable();
        prop_assert_eq!(flattened, sorted);

        for group in &groups {
            let key = *group.key().unwrap();
            prop_assert!(group.as_slice().iter().all(|value| value % 3 == key));
        }
    }

    #[test]
    fn prop_order_by_matches_stable_sort(
        values in prop::collection::vec((0_u8..4, any::<u8>()), 0..48)
    ) {
        let ordered = Sequence::from_vec(values.clone()).order_by(|pair| pair.0);
        let mut expected = values;
        expected.sort_by_key(|pair| pair.0);
        prop_assert_eq!(ordered.to_vec().unwrap(), expected);
    }

    #[test]
    fn prop_replay_is_stable(values in prop::collection::vec(any::<i64>(), 0..32)) {
        let pipeline = Sequence::from_vec(values)
            .filter(|value| value % 2 == 0)
            .select(|value| value / 2);
        prop_assert_eq!(pipeline.to_vec().unwrap(), pipeline.to_vec().unwrap());
    }

    #[test]
    fn prop_count_and_sum_agree_with_vec(values in prop::collection::vec(-1000_i64..1000, 0..64)) {
        let sequence = Sequence::from_vec(values.clone());
        prop_assert_eq!(sequence.count().unwrap(), values.len());
        prop_assert_eq!(sequence.sum().unwrap(), values.iter().sum::<i64>());
    }
}
