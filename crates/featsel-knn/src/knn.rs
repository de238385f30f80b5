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

//! # k-Nearest-Neighbour Objective
//!
//! Scores a feature subset by the accuracy of a k-NN classifier that only
//! looks at the selected columns. Every validation instance is classified by
//! a majority vote of its `k` nearest training instances under the Manhattan
//! distance; the score is the percentage classified correctly.
//!
//! Neighbours are ranked by a stable sort on distance, so equidistant training
//! instances keep their order in the training set. The vote walks the
//! neighbours nearest first and the first label to reach the highest count
//! wins, which makes the classifier deterministic for a fixed split.

use featsel_model::{
    dataset::{Dataset, Instance},
    split::DataSplit,
    subset::FeatureSubset,
};
use featsel_search::objective::ObjectiveFunction;
use rustc_hash::FxHashMap;

/// Number of neighbours consulted when none is configured.
pub const DEFAULT_K: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KnnError {
    #[error("cannot classify without training instances")]
    EmptyTraining,
    #[error("the {0} split has no instances to classify")]
    EmptyEvaluation(&'static str),
    #[error("feature {index} is out of range for data with {num_features} features")]
    FeatureOutOfRange { index: usize, num_features: usize },
    #[error("k must be at least 1")]
    ZeroNeighbours,
}

/// A k-NN classifier over a train/validation/test split.
#[derive(Debug, Clone, Copy)]
pub struct KnnObjective<'a> {
    split: &'a DataSplit,
    k: usize,
}

impl<'a> KnnObjective<'a> {
    /// Creates an objective with `DEFAULT_K` neighbours.
    #[inline]
    pub fn new(split: &'a DataSplit) -> Self {
        Self {
            split,
            k: DEFAULT_K,
        }
    }

    /// Sets the number of neighbours.
    pub fn with_k(mut self, k: usize) -> Result<Self, KnnError> {
        if k == 0 {
            return Err(KnnError::ZeroNeighbours);
        }
        self.k = k;
        Ok(self)
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn split(&self) -> &'a DataSplit {
        self.split
    }

    /// Accuracy on the validation split, in percent.
    #[inline]
    pub fn validation_accuracy(&self, subset: &FeatureSubset) -> Result<f64, KnnError> {
        self.accuracy(self.split.validation(), "validation", subset)
    }

    /// Accuracy on the held-out testing split, in percent.
    #[inline]
    pub fn test_accuracy(&self, subset: &FeatureSubset) -> Result<f64, KnnError> {
        self.accuracy(self.split.testing(), "testing", subset)
    }

    /// Predicts the label of `instance` from its nearest training instances.
    pub fn classify(&self, instance: &Instance, subset: &FeatureSubset) -> Result<&'a str, KnnError> {
        let training = self.split.training();
        if training.is_empty() {
            return Err(KnnError::EmptyTraining);
        }
        self.check_subset(subset)?;
        Ok(self.vote(instance, subset))
    }

    fn accuracy(
        &self,
        evaluation: &Dataset,
        role: &'static str,
        subset: &FeatureSubset,
    ) -> Result<f64, KnnError> {
        if self.split.training().is_empty() {
            return Err(KnnError::EmptyTraining);
        }
        if evaluation.is_empty() {
            return Err(KnnError::EmptyEvaluation(role));
        }
        self.check_subset(subset)?;

        let correct = evaluation
            .instances()
            .iter()
            .filter(|instance| self.vote(instance, subset) == instance.label())
            .count();
        let accuracy = 100.0 * correct as f64 / evaluation.num_instances() as f64;

        tracing::trace!(
            subset = %subset,
            role,
            correct,
            total = evaluation.num_instances(),
            accuracy,
            "evaluated subset"
        );
        Ok(accuracy)
    }

    fn check_subset(&self, subset: &FeatureSubset) -> Result<(), KnnError> {
        let num_features = self.split.training().num_features();
        match subset.iter().find(|f| f.get() >= num_features) {
            Some(f) => Err(KnnError::FeatureOutOfRange {
                index: f.get(),
                num_features,
            }),
            None => Ok(()),
        }
    }

    /// Majority label among the `k` nearest training instances.
    /// Training data must be non-empty.
    fn vote(&self, instance: &Instance, subset: &FeatureSubset) -> &'a str {
        let training = self.split.training().instances();

        let mut neighbours: Vec<(f64, &'a str)> = training
            .iter()
            .map(|other| (instance.distance_to(other, subset), other.label()))
            .collect();
        neighbours.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        let mut winner = neighbours[0].1;
        let mut max_count = 0;
        for &(_, label) in neighbours.iter().take(self.k) {
            let count = counts.entry(label).or_insert(0);
            *count += 1;
            if *count > max_count {
                max_count = *count;
                winner = label;
            }
        }
        winner
    }
}

impl ObjectiveFunction<f64> for KnnObjective<'_> {
    type Error = KnnError;

    fn name(&self) -> &str {
        "k-NN"
    }

    #[inline]
    fn feature_count(&self) -> usize {
        self.split.training().num_features()
    }

    fn all_feature_indices(&self) -> FeatureSubset {
        if self.split.training().is_empty() {
            return FeatureSubset::new();
        }
        FeatureSubset::full(self.feature_count())
    }

    #[inline]
    fn score(&self, subset: &FeatureSubset) -> Result<f64, Self::Error> {
        self.validation_accuracy(subset)
    }
}
