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

//! Min-max scaling of feature columns.
//!
//! Distance based objectives are dominated by whichever column has the widest
//! range unless features are brought onto a common scale. `MinMaxScaler` maps
//! each column to `[0, 1]` using the minimum and maximum observed on the data it
//! was fitted on. Fit on the training split only and apply the same scaler to
//! validation and testing data; values outside the fitted range fall outside
//! `[0, 1]`. A column that is constant in the fitted data maps to `0`.

use crate::dataset::Dataset;

#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    mins: Vec<f64>,
    maxs: Vec<f64>,
}

impl MinMaxScaler {
    /// Records per-column minimum and maximum of `dataset`.
    ///
    /// Fitting on an empty dataset yields a scaler that maps everything to `0`.
    pub fn fit(dataset: &Dataset) -> Self {
        let n = dataset.num_features();
        let mut mins = vec![f64::INFINITY; n];
        let mut maxs = vec![f64::NEG_INFINITY; n];

        for instance in dataset.instances() {
            for (column, &value) in instance.features().iter().enumerate() {
                if value < mins[column] {
                    mins[column] = value;
                }
                if value > maxs[column] {
                    maxs[column] = value;
                }
            }
        }

        Self { mins, maxs }
    }

    /// Returns the number of columns the scaler was fitted on.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.mins.len()
    }

    /// Scales a single value of `column`.
    #[inline]
    pub fn scale(&self, column: usize, value: f64) -> f64 {
        let (min, max) = (self.mins[column], self.maxs[column]);
        let range = max - min;
        if !range.is_finite() || range == 0.0 {
            return 0.0;
        }
        (value - min) / range
    }

    /// Rescales every instance of `dataset` in place.
    ///
    /// # Panics
    ///
    /// Panics if `dataset` has a different number of features than the scaler.
    pub fn transform(&self, dataset: &mut Dataset) {
        assert_eq!(
            dataset.num_features(),
            self.num_features(),
            "called `MinMaxScaler::transform` with a dataset of {} features but the scaler was fitted on {}",
            dataset.num_features(),
            self.num_features()
        );

        for instance in dataset.instances_mut() {
            for (column, value) in instance.features_mut().iter_mut().enumerate() {
                *value = self.scale(column, *value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Instance;

    fn ds(rows: Vec<Vec<f64>>) -> Dataset {
        let n = rows.first().map(|r| r.len()).unwrap_or(0);
        Dataset::new(
            None,
            (0..n).map(|i| format!("f{i}")).collect(),
            rows.into_iter().map(|r| Instance::new(r, "c")).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_scales_to_unit_interval() {
        let mut training = ds(vec![vec![0.0, 10.0], vec![5.0, 20.0], vec![10.0, 30.0]]);
        let scaler = MinMaxScaler::fit(&training);
        scaler.transform(&mut training);

        let col0: Vec<f64> = training.instances().iter().map(|i| i.features()[0]).collect();
        let col1: Vec<f64> = training.instances().iter().map(|i| i.features()[1]).collect();
        assert_eq!(col0, vec![0.0, 0.5, 1.0]);
        assert_eq!(col1, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_uses_training_range_for_other_splits() {
        let training = ds(vec![vec![0.0], vec![10.0]]);
        let mut testing = ds(vec![vec![20.0]]);
        MinMaxScaler::fit(&training).transform(&mut testing);
        assert_eq!(testing.instances()[0].features(), &[2.0]);
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let mut training = ds(vec![vec![3.0], vec![3.0]]);
        MinMaxScaler::fit(&training).transform(&mut training);
        assert!(training.instances().iter().all(|i| i.features()[0] == 0.0));
    }
}
