//! Collections used by the set and grouping operators.
//!
//! - [`HashBucketSet`]: membership by hash bucket, for `distinct`, `union`,
//!   `except` and `intersect`.
//! - [`Lookup`] / [`Grouping`]: read-only multi-map, for `group_by`,
//!   `to_lookup`, `join` and `group_join`.

mod bucket_set;
mod lookup;

pub use bucket_set::{HashBucketSet, bucket_code};
pub use lookup::{Grouping, Lookup};
