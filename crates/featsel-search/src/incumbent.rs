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

//! # Incumbent (Best-So-Far Holder)
//!
//! Holds the best `Selection` seen during one run. A candidate replaces the
//! incumbent only if
//!
//! - its score is strictly greater, or
//! - its score is equal and it selects fewer features.
//!
//! An equal-or-worse candidate never overwrites the incumbent, so the recorded
//! score sequence is non-decreasing and the recorded size at equal score never
//! grows. When a size cap is set, larger subsets are ineligible no matter how
//! well they score.
//!
//! `offer` takes `&mut self` and copies the subset only when it is installed.

use featsel_core::num::score::{ScoreNumeric, is_improvement, is_tie};
use featsel_model::{selection::Selection, subset::FeatureSubset};

#[derive(Debug, Clone)]
pub struct Incumbent<S> {
    best: Option<Selection<S>>,
    max_features: Option<usize>,
    updates: u64,
}

impl<S> Default for Incumbent<S> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<S> Incumbent<S> {
    /// Creates an empty incumbent, optionally capped at `max_features`.
    #[inline]
    pub fn new(max_features: Option<usize>) -> Self {
        Self {
            best: None,
            max_features,
            updates: 0,
        }
    }

    #[inline]
    pub fn max_features(&self) -> Option<usize> {
        self.max_features
    }

    /// Returns `true` if `subset` respects the size cap.
    #[inline]
    pub fn is_eligible(&self, subset: &FeatureSubset) -> bool {
        self.max_features.is_none_or(|cap| subset.len() <= cap)
    }

    /// Returns the current best selection, if any.
    #[inline]
    pub fn best(&self) -> Option<&Selection<S>> {
        self.best.as_ref()
    }

    /// Returns how many times the incumbent was replaced.
    #[inline]
    pub fn updates(&self) -> u64 {
        self.updates
    }

    #[inline]
    pub fn into_best(self) -> Option<Selection<S>> {
        self.best
    }
}

impl<S> Incumbent<S>
where
    S: ScoreNumeric,
{
    /// Returns the score of the current best selection, if any.
    #[inline]
    pub fn score(&self) -> Option<S> {
        self.best.as_ref().map(Selection::score)
    }

    /// Offers a scored subset. Returns `true` if it became the new incumbent.
    pub fn offer(&mut self, subset: &FeatureSubset, score: S) -> bool {
        if !self.is_eligible(subset) {
            return false;
        }

        let replace = match &self.best {
            None => true,
            Some(current) => {
                is_improvement(&score, &current.score())
                    || (is_tie(&score, &current.score()) && subset.len() < current.num_features())
            }
        };

        if replace {
            self.best = Some(Selection::new(subset.clone(), score));
            self.updates = self.updates.saturating_add(1);
        }

        replace
    }
}

impl<S> std::fmt::Display for Incumbent<S>
where
    S: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.best {
            Some(best) => write!(f, "Incumbent({})", best),
            None => write!(f, "Incumbent(none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(indices: &[usize]) -> FeatureSubset {
        indices.iter().copied().collect()
    }

    #[test]
    fn test_initial_state() {
        let inc: Incumbent<f64> = Incumbent::new(None);
        assert!(inc.best().is_none());
        assert_eq!(inc.score(), None);
        assert_eq!(inc.updates(), 0);
        assert_eq!(inc.to_string(), "Incumbent(none)");
    }

    #[test]
    fn test_strictly_better_replaces() {
        let mut inc = Incumbent::new(None);
        assert!(inc.offer(&subset(&[0, 1]), 0.5));
        assert!(inc.offer(&subset(&[0, 1, 2]), 0.75));
        assert_eq!(inc.score(), Some(0.75));
        assert_eq!(inc.updates(), 2);
    }

    #[test]
    fn test_equal_score_prefers_smaller_subset() {
        let mut inc = Incumbent::new(None);
        assert!(inc.offer(&subset(&[0, 1, 3]), 1.0));
        assert!(!inc.offer(&subset(&[0, 1, 2]), 1.0));
        assert!(inc.offer(&subset(&[1, 3]), 1.0));
        assert!(!inc.offer(&subset(&[0, 1, 2, 3]), 1.0));
        assert_eq!(inc.best().unwrap().subset(), &subset(&[1, 3]));
    }

    #[test]
    fn test_worse_never_replaces() {
        let mut inc = Incumbent::new(None);
        inc.offer(&subset(&[1, 3]), 1.0);
        assert!(!inc.offer(&subset(&[1]), 0.5));
        assert_eq!(inc.score(), Some(1.0));
    }

    #[test]
    fn test_size_cap_makes_large_subsets_ineligible() {
        let mut inc = Incumbent::new(Some(1));
        assert!(!inc.offer(&subset(&[1, 3]), 1.0));
        assert!(inc.best().is_none());
        assert!(inc.offer(&subset(&[1]), 0.5));
        assert!(!inc.offer(&subset(&[0, 1]), 0.9));
        assert_eq!(inc.best().unwrap().subset(), &subset(&[1]));
    }

    #[test]
    fn test_comparable_score_replaces_nan() {
        let mut inc = Incumbent::new(None);
        assert!(inc.offer(&subset(&[0]), f64::NAN));
        assert!(inc.offer(&subset(&[0, 1]), 0.1));
        assert!(!inc.offer(&subset(&[2]), f64::NAN));
        assert_eq!(inc.score(), Some(0.1));
    }
}
