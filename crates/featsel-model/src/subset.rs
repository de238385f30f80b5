// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Feature Subsets
//!
//! `FeatureSubset` is the state the selection engine moves through: a set of
//! unique `FeatureIndex` values. It is backed by a `FixedBitSet` so membership
//! tests, insertion and removal are O(1) and iteration is in ascending index
//! order, which is what makes candidate tie-breaking deterministic.
//!
//! Equality and hashing are defined by membership only. Two subsets holding the
//! same indices compare equal and hash identically even when their backing
//! bitsets were allocated with different capacities, so subsets can be used
//! directly as keys of a visited-state set or an evaluation cache.
//!
//! The bitset grows on demand. Callers that know the universe size up front
//! should use `with_capacity` or `full` to avoid reallocation in hot loops.

use crate::index::FeatureIndex;
use fixedbitset::FixedBitSet;
use std::hash::{Hash, Hasher};

/// A set of feature indices with membership-based equality.
#[derive(Clone, Default)]
pub struct FeatureSubset {
    bits: FixedBitSet,
    len: usize,
}

impl FeatureSubset {
    /// Creates an empty subset.
    #[inline]
    pub fn new() -> Self {
        Self {
            bits: FixedBitSet::new(),
            len: 0,
        }
    }

    /// Creates an empty subset able to hold indices `0..capacity` without growing.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
            len: 0,
        }
    }

    /// Creates the subset `{0, 1, ..., num_features - 1}`.
    #[inline]
    pub fn full(num_features: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(num_features);
        bits.insert_range(..);
        Self {
            bits,
            len: num_features,
        }
    }

    /// Returns the number of features in the subset.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the subset holds no features.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of indices the subset can hold without growing.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Returns `true` if `feature` is a member.
    #[inline]
    pub fn contains(&self, feature: FeatureIndex) -> bool {
        self.bits.contains(feature.get())
    }

    /// Adds `feature`. Returns `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, feature: FeatureIndex) -> bool {
        let index = feature.get();
        if index >= self.bits.len() {
            self.bits.grow(index + 1);
        }
        let was_present = self.bits.put(index);
        if !was_present {
            self.len += 1;
        }
        !was_present
    }

    /// Removes `feature`. Returns `true` if it was present.
    #[inline]
    pub fn remove(&mut self, feature: FeatureIndex) -> bool {
        let index = feature.get();
        if !self.bits.contains(index) {
            return false;
        }
        self.bits.set(index, false);
        self.len -= 1;

        debug_assert!(
            self.len == self.bits.count_ones(..),
            "called `FeatureSubset::remove` and the cached length drifted: cached {} but counted {}",
            self.len,
            self.bits.count_ones(..)
        );

        true
    }

    /// Removes every feature, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.bits.clear();
        self.len = 0;
    }

    /// Returns a copy of this subset with `feature` added.
    #[inline]
    pub fn with(&self, feature: FeatureIndex) -> Self {
        let mut next = self.clone();
        next.insert(feature);
        next
    }

    /// Returns a copy of this subset with `feature` removed.
    #[inline]
    pub fn without(&self, feature: FeatureIndex) -> Self {
        let mut next = self.clone();
        next.remove(feature);
        next
    }

    /// Iterates the members in ascending index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = FeatureIndex> + '_ {
        self.bits.ones().map(FeatureIndex::new)
    }

    /// Returns the smallest member, if any.
    #[inline]
    pub fn first(&self) -> Option<FeatureIndex> {
        self.iter().next()
    }

    /// Returns `true` if no index is a member of both subsets.
    pub fn is_disjoint(&self, other: &FeatureSubset) -> bool {
        let (small, large) = if self.len <= other.len {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().all(|f| !large.contains(f))
    }

    /// Returns `true` if every member of `self` is also a member of `other`.
    pub fn is_subset(&self, other: &FeatureSubset) -> bool {
        self.len <= other.len && self.iter().all(|f| other.contains(f))
    }

    /// Returns the members as raw `usize` indices in ascending order.
    pub fn to_indices(&self) -> Vec<usize> {
        self.bits.ones().collect()
    }
}

impl PartialEq for FeatureSubset {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.bits.ones().eq(other.bits.ones())
    }
}

impl Eq for FeatureSubset {}

impl Hash for FeatureSubset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Capacity must not leak into the hash; only members do.
        self.len.hash(state);
        for index in self.bits.ones() {
            index.hash(state);
        }
    }
}

impl FromIterator<FeatureIndex> for FeatureSubset {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = FeatureIndex>,
    {
        let mut subset = FeatureSubset::new();
        subset.extend(iter);
        subset
    }
}

impl FromIterator<usize> for FeatureSubset {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        iter.into_iter().map(FeatureIndex::new).collect()
    }
}

impl Extend<FeatureIndex> for FeatureSubset {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = FeatureIndex>,
    {
        for feature in iter {
            self.insert(feature);
        }
    }
}

impl std::fmt::Debug for FeatureSubset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.bits.ones()).finish()
    }
}

impl std::fmt::Display for FeatureSubset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, index) in self.bits.ones().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn fi(i: usize) -> FeatureIndex {
        FeatureIndex::new(i)
    }

    fn hash_of(s: &FeatureSubset) -> u64 {
        let mut h = DefaultHasher::new();
        s.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_insert_remove_and_len() {
        let mut s = FeatureSubset::new();
        assert!(s.is_empty());
        assert!(s.insert(fi(3)));
        assert!(!s.insert(fi(3)));
        assert!(s.insert(fi(0)));
        assert_eq!(s.len(), 2);
        assert!(s.contains(fi(3)));
        assert!(!s.contains(fi(1)));
        assert!(!s.contains(fi(100)));

        assert!(s.remove(fi(3)));
        assert!(!s.remove(fi(3)));
        assert!(!s.remove(fi(42)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_full_contains_every_index() {
        let s = FeatureSubset::full(4);
        assert_eq!(s.len(), 4);
        assert_eq!(s.to_indices(), vec![0, 1, 2, 3]);
        assert!(FeatureSubset::full(0).is_empty());
    }

    #[test]
    fn test_iteration_is_ascending() {
        let s: FeatureSubset = [5usize, 1, 3, 0].into_iter().collect();
        assert_eq!(s.to_indices(), vec![0, 1, 3, 5]);
        assert_eq!(s.first(), Some(fi(0)));
    }

    #[test]
    fn test_equality_and_hash_ignore_capacity() {
        let mut a = FeatureSubset::with_capacity(64);
        a.insert(fi(1));
        a.insert(fi(3));
        let b: FeatureSubset = [3usize, 1].into_iter().collect();

        assert_ne!(a.capacity(), b.capacity());
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));

        let c: FeatureSubset = [1usize].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_with_and_without_do_not_alias() {
        let base: FeatureSubset = [1usize, 2].into_iter().collect();
        let added = base.with(fi(0));
        let removed = base.without(fi(2));

        assert_eq!(base.to_indices(), vec![1, 2]);
        assert_eq!(added.to_indices(), vec![0, 1, 2]);
        assert_eq!(removed.to_indices(), vec![1]);
    }

    #[test]
    fn test_disjoint_and_subset() {
        let a: FeatureSubset = [0usize, 2].into_iter().collect();
        let b: FeatureSubset = [1usize, 3].into_iter().collect();
        let c: FeatureSubset = [0usize, 1, 2].into_iter().collect();

        assert!(a.is_disjoint(&b));
        assert!(!a.is_disjoint(&c));
        assert!(a.is_subset(&c));
        assert!(!c.is_subset(&a));
        assert!(FeatureSubset::new().is_subset(&a));
    }

    #[test]
    fn test_display() {
        let s: FeatureSubset = [3usize, 1].into_iter().collect();
        assert_eq!(format!("{}", s), "{1, 3}");
        assert_eq!(format!("{}", FeatureSubset::new()), "{}");
    }
}
