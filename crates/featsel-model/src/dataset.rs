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

//! Tabular datasets for wrapper feature selection.
//!
//! A `Dataset` is a list of `Instance`s sharing one attribute layout. The class
//! label is stored beside the feature vector rather than inside it, so the
//! feature universe `0..num_features` never contains the label column and no
//! index has to be reserved for it.
//!
//! Datasets are plain owned data. The selection engine never sees them; they
//! are consumed by objective backends (for example the k-NN evaluator), which
//! treat them as read-only once the search starts.

use crate::{
    index::{FeatureIndex, InstanceIndex},
    subset::FeatureSubset,
};

/// Errors raised while building or reshaping a `Dataset`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    /// An instance does not have the same number of features as the dataset.
    #[error("instance {instance} has {found} features but the dataset declares {expected}")]
    FeatureCountMismatch {
        instance: usize,
        expected: usize,
        found: usize,
    },
    /// A feature index does not address a column of the dataset.
    #[error("feature {index} is out of range for a dataset with {num_features} features")]
    FeatureOutOfRange { index: usize, num_features: usize },
}

/// One labelled example.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    features: Vec<f64>,
    label: String,
}

impl Instance {
    /// Creates a new instance.
    #[inline]
    pub fn new<L>(features: Vec<f64>, label: L) -> Self
    where
        L: Into<String>,
    {
        Self {
            features,
            label: label.into(),
        }
    }

    /// Returns all feature values.
    #[inline]
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Returns the value of a single feature.
    ///
    /// # Panics
    ///
    /// Panics if `feature` is out of bounds.
    #[inline]
    pub fn feature(&self, feature: FeatureIndex) -> f64 {
        let index = feature.get();
        debug_assert!(
            index < self.features.len(),
            "called `Instance::feature` with feature index out of bounds: the len is {} but the index is {}",
            self.features.len(),
            index
        );

        self.features[index]
    }

    /// Returns the number of features.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.features.len()
    }

    /// Returns the class label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Manhattan distance to `other`, restricted to the features in `subset`.
    ///
    /// An empty subset puts every pair of instances at distance zero.
    #[inline]
    pub fn distance_to(&self, other: &Instance, subset: &FeatureSubset) -> f64 {
        subset
            .iter()
            .map(|f| (self.feature(f) - other.feature(f)).abs())
            .sum()
    }

    #[inline]
    pub(crate) fn features_mut(&mut self) -> &mut [f64] {
        &mut self.features
    }

    #[inline]
    fn remove_feature(&mut self, index: usize) {
        self.features.remove(index);
    }
}

/// A collection of instances with a shared feature layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    relation: Option<String>,
    feature_names: Vec<String>,
    instances: Vec<Instance>,
}

impl Dataset {
    /// Creates a dataset and checks that every instance matches `feature_names`.
    pub fn new(
        relation: Option<String>,
        feature_names: Vec<String>,
        instances: Vec<Instance>,
    ) -> Result<Self, DatasetError> {
        let expected = feature_names.len();
        if let Some((instance, found)) = instances
            .iter()
            .enumerate()
            .find(|(_, inst)| inst.num_features() != expected)
            .map(|(i, inst)| (i, inst.num_features()))
        {
            return Err(DatasetError::FeatureCountMismatch {
                instance,
                expected,
                found,
            });
        }

        Ok(Self {
            relation,
            feature_names,
            instances,
        })
    }

    /// Creates a dataset with the same layout but a different set of instances.
    pub(crate) fn with_instances(&self, instances: Vec<Instance>) -> Self {
        Self {
            relation: self.relation.clone(),
            feature_names: self.feature_names.clone(),
            instances,
        }
    }

    /// Returns the relation name, if the source declared one.
    #[inline]
    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    /// Returns the number of feature columns (the label is not counted).
    #[inline]
    pub fn num_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Returns the number of instances.
    #[inline]
    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if the dataset holds no instances.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Returns all instances.
    #[inline]
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    #[inline]
    pub(crate) fn instances_mut(&mut self) -> &mut [Instance] {
        &mut self.instances
    }

    /// Returns a single instance.
    ///
    /// # Panics
    ///
    /// Panics if `instance` is out of bounds.
    #[inline]
    pub fn instance(&self, instance: InstanceIndex) -> &Instance {
        &self.instances[instance.get()]
    }

    /// Returns the name of a feature column.
    #[inline]
    pub fn feature_name(&self, feature: FeatureIndex) -> Option<&str> {
        self.feature_names.get(feature.get()).map(String::as_str)
    }

    /// Returns all feature column names.
    #[inline]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Returns the feature universe.
    ///
    /// A dataset without instances has nothing to learn from and yields the
    /// empty universe.
    #[inline]
    pub fn all_feature_indices(&self) -> FeatureSubset {
        if self.instances.is_empty() {
            return FeatureSubset::new();
        }
        FeatureSubset::full(self.num_features())
    }

    /// Drops a feature column from every instance.
    ///
    /// Later columns shift down by one. This is a setup step (removing a column
    /// that leaks the label, for example) and must happen before a search.
    pub fn remove_attribute(&mut self, feature: FeatureIndex) -> Result<(), DatasetError> {
        let index = feature.get();
        if index >= self.num_features() {
            return Err(DatasetError::FeatureOutOfRange {
                index,
                num_features: self.num_features(),
            });
        }

        self.feature_names.remove(index);
        for instance in &mut self.instances {
            instance.remove_feature(index);
        }

        tracing::debug!(
            feature = index,
            remaining = self.num_features(),
            "removed attribute"
        );

        Ok(())
    }

    /// Returns the distinct class labels in order of first appearance.
    pub fn class_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for instance in &self.instances {
            if !labels.contains(&instance.label()) {
                labels.push(instance.label());
            }
        }
        labels
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dataset(relation: {}, features: {}, instances: {})",
            self.relation.as_deref().unwrap_or("<unnamed>"),
            self.num_features(),
            self.num_instances()
        )
    }
}
