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

use crate::subset::FeatureSubset;

/// A feature subset together with the objective score it achieved.
///
/// This is the value the selection engine reports as its best-so-far and
/// returns as the result of a run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Selection<S> {
    subset: FeatureSubset,
    score: S,
}

impl<S> Selection<S> {
    /// Constructs a new `Selection`.
    #[inline]
    pub fn new(subset: FeatureSubset, score: S) -> Self {
        Self { subset, score }
    }

    /// Returns the selected features.
    #[inline]
    pub fn subset(&self) -> &FeatureSubset {
        &self.subset
    }

    /// Returns the objective score of the selected features.
    #[inline]
    pub fn score(&self) -> S
    where
        S: Copy,
    {
        self.score
    }

    /// Returns the number of selected features.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.subset.len()
    }

    /// Splits the selection into its subset and score.
    #[inline]
    pub fn into_parts(self) -> (FeatureSubset, S) {
        (self.subset, self.score)
    }
}

impl<S> std::fmt::Display for Selection<S>
where
    S: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Selection(score: {}, features: {})", self.score, self.subset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_and_display() {
        let subset: FeatureSubset = [2usize, 0].into_iter().collect();
        let selection = Selection::new(subset.clone(), 0.5);

        assert_eq!(selection.subset(), &subset);
        assert_eq!(selection.score(), 0.5);
        assert_eq!(selection.num_features(), 2);
        assert_eq!(
            format!("{}", selection),
            "Selection(score: 0.5, features: {0, 2})"
        );

        let (s, score) = selection.into_parts();
        assert_eq!(s, subset);
        assert_eq!(score, 0.5);
    }
}
