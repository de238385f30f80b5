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

use crate::algorithm::{Direction, SelectionAlgorithm};
use featsel_search::{criteria::StoppingCriteria, error::ConfigurationError};

/// Consecutive non-improving outer iterations tolerated by default.
pub const MAX_ITERATIONS_WITHOUT_PROGRESS: usize = 5;

/// What a run does: the strategy, when it stops, and an optional size cap on
/// the reported selection.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    algorithm: SelectionAlgorithm,
    criteria: StoppingCriteria,
    max_features: Option<usize>,
}

impl SelectionConfig {
    /// Starts a builder for `algorithm`.
    #[inline]
    pub fn builder(algorithm: SelectionAlgorithm) -> SelectionConfigBuilder {
        SelectionConfigBuilder::new(algorithm)
    }

    /// Convergence-bounded run with the default budget and no size cap.
    #[inline]
    pub fn convergence(algorithm: SelectionAlgorithm) -> Self {
        Self {
            algorithm,
            criteria: StoppingCriteria::convergence(MAX_ITERATIONS_WITHOUT_PROGRESS),
            max_features: None,
        }
    }

    /// Size-bounded run reporting at most `max_features` features.
    ///
    /// Forward variants stop once `max_features` are selected. Backward
    /// variants keep removing while above `max_features` and keep going below
    /// it while the score improves within the default budget.
    #[inline]
    pub fn at_most(algorithm: SelectionAlgorithm, max_features: usize) -> Self {
        let criteria = match algorithm.direction() {
            Direction::Forward => StoppingCriteria::forward_size(max_features),
            Direction::Backward => StoppingCriteria::backward_with_budget(
                max_features,
                MAX_ITERATIONS_WITHOUT_PROGRESS,
            ),
        };

        Self {
            algorithm,
            criteria,
            max_features: Some(max_features),
        }
    }

    #[inline]
    pub fn algorithm(&self) -> SelectionAlgorithm {
        self.algorithm
    }

    #[inline]
    pub fn criteria(&self) -> &StoppingCriteria {
        &self.criteria
    }

    #[inline]
    pub fn max_features(&self) -> Option<usize> {
        self.max_features
    }

    /// Checks that a run with this configuration can make progress.
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.criteria.validate()
    }
}

impl std::fmt::Display for SelectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SelectionConfig(algorithm: {}, continue while: {}, max_features: ",
            self.algorithm, self.criteria
        )?;
        match self.max_features {
            Some(m) => write!(f, "{})", m),
            None => write!(f, "none)"),
        }
    }
}

/// Builder for `SelectionConfig`.
#[derive(Debug, Clone)]
pub struct SelectionConfigBuilder {
    algorithm: SelectionAlgorithm,
    criteria: Option<StoppingCriteria>,
    max_features: Option<usize>,
}

impl SelectionConfigBuilder {
    /// Creates a builder with default convergence criteria and no size cap.
    #[inline]
    pub fn new(algorithm: SelectionAlgorithm) -> Self {
        Self {
            algorithm,
            criteria: None,
            max_features: None,
        }
    }

    /// Sets the stopping criteria.
    #[inline]
    pub fn criteria(mut self, criteria: StoppingCriteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Caps the size of the reported selection.
    #[inline]
    pub fn max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Sets or clears the size cap.
    #[inline]
    pub fn max_features_opt(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    /// Validates and builds the `SelectionConfig`.
    pub fn build(self) -> Result<SelectionConfig, ConfigurationError> {
        let config = SelectionConfig {
            algorithm: self.algorithm,
            criteria: self
                .criteria
                .unwrap_or_else(|| StoppingCriteria::convergence(MAX_ITERATIONS_WITHOUT_PROGRESS)),
            max_features: self.max_features,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SelectionConfig::builder(SelectionAlgorithm::Sffs)
            .build()
            .unwrap();
        assert_eq!(config.algorithm(), SelectionAlgorithm::Sffs);
        assert_eq!(config.max_features(), None);
        assert!(config.criteria().should_continue(4, 100));
        assert!(!config.criteria().should_continue(5, 0));
    }

    #[test]
    fn test_builder_rejects_zero_budget() {
        let err = SelectionConfig::builder(SelectionAlgorithm::Sfs)
            .criteria(StoppingCriteria::convergence(0))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::ZeroProgressBudget);
    }

    #[test]
    fn test_at_most_composes_by_direction() {
        let forward = SelectionConfig::at_most(SelectionAlgorithm::Sfs, 2);
        assert_eq!(forward.max_features(), Some(2));
        assert!(forward.criteria().should_continue(100, 1));
        assert!(!forward.criteria().should_continue(0, 2));

        let backward = SelectionConfig::at_most(SelectionAlgorithm::Sbs, 2);
        assert!(backward.criteria().should_continue(100, 3));
        assert!(backward.criteria().should_continue(0, 1));
        assert!(!backward.criteria().should_continue(5, 2));
    }

    #[test]
    fn test_display() {
        let config = SelectionConfig::at_most(SelectionAlgorithm::Sbs, 3);
        assert_eq!(
            config.to_string(),
            "SelectionConfig(algorithm: SBS, continue while: (size > 3 or progress < 5), max_features: 3)"
        );
    }
}
