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

//! Deterministic training, validation and testing splits.
//!
//! Wrapper selection scores each candidate subset on held-out data. Three
//! roles are kept apart:
//!
//! - training: the model is fitted on it,
//! - validation: the objective score of a subset is measured on it,
//! - testing: only used once, after the search, to report how the chosen
//!   subset generalises.
//!
//! Instances are shuffled with a seeded `StdRng` before splitting, so a given
//! seed always produces the same partition.

use crate::dataset::{Dataset, Instance};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SPLIT_SEED: u64 = 123;

/// Errors raised while partitioning datasets.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SplitError {
    /// Ratios must lie in `[0, 1]` and sum to at most `1`.
    #[error("invalid split ratios: training {training}, validation {validation}")]
    InvalidRatios { training: f64, validation: f64 },
    /// Training and testing data do not share a feature layout.
    #[error("training data has {training} features but testing data has {testing}")]
    LayoutMismatch { training: usize, testing: usize },
}

/// Fractions of the shuffled data assigned to training and validation.
/// Whatever is left goes to testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRatios {
    training: f64,
    validation: f64,
}

impl SplitRatios {
    /// 60:20:20 split of a single file.
    pub const SINGLE_FILE: SplitRatios = SplitRatios {
        training: 0.6,
        validation: 0.2,
    };

    /// 80:20 split of a training file when testing data is supplied separately.
    pub const WITH_TESTING_FILE: SplitRatios = SplitRatios {
        training: 0.8,
        validation: 0.2,
    };

    /// Creates validated ratios.
    pub fn new(training: f64, validation: f64) -> Result<Self, SplitError> {
        let valid = (0.0..=1.0).contains(&training)
            && (0.0..=1.0).contains(&validation)
            && training + validation <= 1.0 + f64::EPSILON;
        if !valid {
            return Err(SplitError::InvalidRatios {
                training,
                validation,
            });
        }
        Ok(Self {
            training,
            validation,
        })
    }

    #[inline]
    pub fn training(&self) -> f64 {
        self.training
    }

    #[inline]
    pub fn validation(&self) -> f64 {
        self.validation
    }

    /// Returns `(training, validation)` instance counts for `n` instances.
    fn counts(&self, n: usize) -> (usize, usize) {
        let training = ((n as f64) * self.training).round() as usize;
        let training = training.min(n);
        let validation = ((n as f64) * self.validation).round() as usize;
        let validation = validation.min(n - training);
        (training, validation)
    }
}

/// The three data roles used by a wrapper objective.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSplit {
    training: Dataset,
    validation: Dataset,
    testing: Dataset,
}

impl DataSplit {
    /// Shuffles `dataset` and cuts it into training, validation and testing.
    pub fn from_single(dataset: &Dataset, ratios: SplitRatios, seed: u64) -> Self {
        let mut instances: Vec<Instance> = dataset.instances().to_vec();
        let mut rng = StdRng::seed_from_u64(seed);
        instances.shuffle(&mut rng);

        let (num_training, num_validation) = ratios.counts(instances.len());
        let testing = instances.split_off(num_training + num_validation);
        let validation = instances.split_off(num_training);
        let training = instances;

        tracing::debug!(
            training = training.len(),
            validation = validation.len(),
            testing = testing.len(),
            seed,
            "split dataset"
        );

        Self {
            training: dataset.with_instances(training),
            validation: dataset.with_instances(validation),
            testing: dataset.with_instances(testing),
        }
    }

    /// Shuffles `training` into training and validation; `testing` is kept whole.
    ///
    /// Any testing share left over by `ratios` is discarded.
    pub fn from_pair(
        training: &Dataset,
        testing: Dataset,
        ratios: SplitRatios,
        seed: u64,
    ) -> Result<Self, SplitError> {
        if training.num_features() != testing.num_features() {
            return Err(SplitError::LayoutMismatch {
                training: training.num_features(),
                testing: testing.num_features(),
            });
        }

        let mut instances: Vec<Instance> = training.instances().to_vec();
        let mut rng = StdRng::seed_from_u64(seed);
        instances.shuffle(&mut rng);

        let (num_training, num_validation) = ratios.counts(instances.len());
        instances.truncate(num_training + num_validation);
        let validation = instances.split_off(num_training);

        Ok(Self {
            training: training.with_instances(instances),
            validation: training.with_instances(validation),
            testing,
        })
    }

    /// Creates a split from already partitioned data.
    pub fn from_parts(training: Dataset, validation: Dataset, testing: Dataset) -> Self {
        Self {
            training,
            validation,
            testing,
        }
    }

    #[inline]
    pub fn training(&self) -> &Dataset {
        &self.training
    }

    #[inline]
    pub fn validation(&self) -> &Dataset {
        &self.validation
    }

    #[inline]
    pub fn testing(&self) -> &Dataset {
        &self.testing
    }

    /// Mutable access to all three parts, in training, validation, testing order.
    #[inline]
    pub fn parts_mut(&mut self) -> (&mut Dataset, &mut Dataset, &mut Dataset) {
        (&mut self.training, &mut self.validation, &mut self.testing)
    }

    /// Consumes the split.
    #[inline]
    pub fn into_parts(self) -> (Dataset, Dataset, Dataset) {
        (self.training, self.validation, self.testing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Dataset {
        Dataset::new(
            None,
            vec!["v".into()],
            (0..n)
                .map(|i| Instance::new(vec![i as f64], format!("c{}", i % 2)))
                .collect(),
        )
        .unwrap()
    }

    fn values(ds: &Dataset) -> Vec<f64> {
        ds.instances().iter().map(|i| i.features()[0]).collect()
    }

    #[test]
    fn test_single_split_sizes() {
        let split = DataSplit::from_single(&numbered(10), SplitRatios::SINGLE_FILE, 1);
        assert_eq!(split.training().num_instances(), 6);
        assert_eq!(split.validation().num_instances(), 2);
        assert_eq!(split.testing().num_instances(), 2);
    }

    #[test]
    fn test_single_split_is_a_partition() {
        let split = DataSplit::from_single(&numbered(25), SplitRatios::SINGLE_FILE, 7);
        let mut all: Vec<f64> = values(split.training());
        all.extend(values(split.validation()));
        all.extend(values(split.testing()));
        all.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(all, (0..25).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_same_seed_same_split() {
        let a = DataSplit::from_single(&numbered(30), SplitRatios::SINGLE_FILE, 123);
        let b = DataSplit::from_single(&numbered(30), SplitRatios::SINGLE_FILE, 123);
        assert_eq!(a, b);
    }

    #[test]
    fn test_pair_split_keeps_testing_whole() {
        let split = DataSplit::from_pair(
            &numbered(10),
            numbered(4),
            SplitRatios::WITH_TESTING_FILE,
            DEFAULT_SPLIT_SEED,
        )
        .unwrap();
        assert_eq!(split.training().num_instances(), 8);
        assert_eq!(split.validation().num_instances(), 2);
        assert_eq!(values(split.testing()), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_pair_split_rejects_layout_mismatch() {
        let wide = Dataset::new(
            None,
            vec!["a".into(), "b".into()],
            vec![Instance::new(vec![0.0, 1.0], "x")],
        )
        .unwrap();
        let err = DataSplit::from_pair(&numbered(3), wide, SplitRatios::WITH_TESTING_FILE, 0)
            .unwrap_err();
        assert_eq!(
            err,
            SplitError::LayoutMismatch {
                training: 1,
                testing: 2
            }
        );
    }

    #[test]
    fn test_ratio_validation() {
        assert!(SplitRatios::new(0.7, 0.3).is_ok());
        assert!(SplitRatios::new(0.9, 0.3).is_err());
        assert!(SplitRatios::new(-0.1, 0.3).is_err());
    }

    #[test]
    fn test_empty_dataset_splits_into_empty_parts() {
        let split = DataSplit::from_single(&numbered(0), SplitRatios::SINGLE_FILE, 0);
        assert!(split.training().is_empty());
        assert!(split.validation().is_empty());
        assert!(split.testing().is_empty());
    }
}
