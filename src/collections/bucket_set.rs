//! Hash-bucketed set backing the set operators.
//!
//! [`HashBucketSet`] indexes values by a non-negative 31-bit bucket code
//! derived from their hash. Most buckets hold a single value inline; values
//! whose codes collide are chained in the same bucket and told apart by
//! `Eq`, so two distinct values never conflate.
//!
//! The hasher is picked at compile time:
//!
//! | Feature | Hasher |
//! |---|---|
//! | `fxhash` | `rustc_hash::FxHasher` |
//! | `ahash` | `ahash::AHasher` |
//! | neither | `std::collections::hash_map::DefaultHasher` |
//!
//! # Examples
//!
//! ```rust
//! use lazyseq::collections::HashBucketSet;
//!
//! let mut set = HashBucketSet::new();
//! assert!(set.add("alpha"));
//! assert!(!set.add("alpha"));
//! assert!(set.contains(&"alpha"));
//! assert!(set.remove(&"alpha"));
//! assert!(set.is_empty());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use smallvec::SmallVec;

/// Values sharing one bucket code. One inline slot covers the common case.
type Bucket<T> = SmallVec<[T; 1]>;

/// Mask that clears the sign bit of a 32-bit hash code.
const BUCKET_MASK: u32 = 0x7FFF_FFFF;

#[cfg(feature = "fxhash")]
fn new_hasher() -> impl Hasher {
    rustc_hash::FxHasher::default()
}

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
fn new_hasher() -> impl Hasher {
    ahash::AHasher::default()
}

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
fn new_hasher() -> impl Hasher {
    std::collections::hash_map::DefaultHasher::new()
}

/// Computes the non-negative bucket code of a value.
///
/// The 64-bit hash is folded to 32 bits and the sign bit is cleared, so
/// codes always fit in `0..=i32::MAX`.
pub fn bucket_code<T: Hash + ?Sized>(value: &T) -> u32 {
    let mut hasher = new_hasher();
    value.hash(&mut hasher);
    let hash = hasher.finish();
    #[allow(clippy::cast_possible_truncation)]
    let folded = (hash ^ (hash >> 32)) as u32;
    folded & BUCKET_MASK
}

/// A mutable set keyed by hash bucket.
///
/// Insertion order is not tracked; the set operators walk their sources in
/// order and only ask the set membership questions.
#[derive(Clone)]
pub struct HashBucketSet<T> {
    buckets: HashMap<u32, Bucket<T>>,
    length: usize,
}

impl<T> HashBucketSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buckets: HashMap::new(),
            length: 0,
        }
    }

    /// Number of values held.
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Whether the set holds no values.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.length = 0;
    }

    /// Iterates over the values in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.values().flat_map(|bucket| bucket.iter())
    }
}

impl<T: Hash + Eq> HashBucketSet<T> {
    /// Adds `value` unless an equal value is already present.
    ///
    /// Returns `true` if the set changed.
    pub fn add(&mut self, value: T) -> bool {
        let code = bucket_code(&value);
        self.add_with_code(code, value)
    }

    /// Removes the value equal to `value`.
    ///
    /// Returns `true` if a value was removed.
    pub fn remove(&mut self, value: &T) -> bool {
        let code = bucket_code(value);
        let Some(bucket) = self.buckets.get_mut(&code) else {
            return false;
        };
        let Some(position) = bucket.iter().position(|stored| stored == value) else {
            return false;
        };
        bucket.swap_remove(position);
        if bucket.is_empty() {
            self.buckets.remove(&code);
        }
        self.length -= 1;
        true
    }

    /// Whether a value equal to `value` is present.
    pub fn contains(&self, value: &T) -> bool {
        self.buckets
            .get(&bucket_code(value))
            .is_some_and(|bucket| bucket.iter().any(|stored| stored == value))
    }

    fn add_with_code(&mut self, code: u32, value: T) -> bool {
        let bucket = self.buckets.entry(code).or_default();
        if bucket.iter().any(|stored| *stored == value) {
            return false;
        }
        if !bucket.is_empty() {
            tracing::trace!(code, "bucket code collision, chaining");
        }
        bucket.push(value);
        self.length += 1;
        true
    }
}

impl<T> Default for HashBucketSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq> FromIterator<T> for HashBucketSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
        let mut set = Self::new();
        for value in iterator {
            set.add(value);
        }
        set
    }
}

impl<T: Hash + Eq> Extend<T> for HashBucketSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iterator: I) {
        for value in iterator {
            self.add(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for HashBucketSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}
