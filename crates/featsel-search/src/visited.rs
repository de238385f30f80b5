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

//! Visited-state guard for the floating variants.
//!
//! Floating search adds and removes features, so it can come back to a subset
//! it has already settled on and oscillate forever. `VisitedStates` remembers
//! every settled subset of one run. Conditioning never re-enters one of them,
//! and an outer step only does when every available move leads back into the
//! set. The set lives for the whole run and is never reset between outer
//! iterations.

use featsel_model::subset::FeatureSubset;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct VisitedStates {
    states: FxHashSet<FeatureSubset>,
}

impl VisitedStates {
    #[inline]
    pub fn new() -> Self {
        Self {
            states: FxHashSet::default(),
        }
    }

    /// Creates a tracker that already contains the starting subset.
    #[inline]
    pub fn with_initial(initial: &FeatureSubset) -> Self {
        let mut visited = Self::new();
        visited.insert(initial);
        visited
    }

    /// Records a copy of `subset`. Returns `false` if it was already visited.
    #[inline]
    pub fn insert(&mut self, subset: &FeatureSubset) -> bool {
        if self.states.contains(subset) {
            return false;
        }
        self.states.insert(subset.clone())
    }

    #[inline]
    pub fn contains(&self, subset: &FeatureSubset) -> bool {
        self.states.contains(subset)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureSubset> {
        self.states.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(indices: &[usize]) -> FeatureSubset {
        indices.iter().copied().collect()
    }

    #[test]
    fn test_membership_ignores_insertion_order() {
        let mut visited = VisitedStates::with_initial(&subset(&[]));
        assert!(visited.insert(&subset(&[3, 1])));
        assert!(visited.contains(&subset(&[1, 3])));
        assert!(!visited.insert(&subset(&[1, 3])));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_stored_copy_is_independent() {
        let mut working = subset(&[0, 2]);
        let mut visited = VisitedStates::new();
        visited.insert(&working);

        working.insert(1usize.into());
        assert!(!visited.contains(&working));
        assert!(visited.contains(&subset(&[0, 2])));
    }
}
