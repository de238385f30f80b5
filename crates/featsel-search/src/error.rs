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

/// A configuration that would make a run meaningless or unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A convergence bound of zero never lets the search take a step.
    #[error("the progress budget must be at least 1")]
    ZeroProgressBudget,
}

/// The error type returned by a selection run.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError<E>
where
    E: std::error::Error + 'static,
{
    /// The objective function failed. The run is aborted and no best-so-far
    /// update is made for the failed evaluation.
    #[error("objective function failed: {0}")]
    Objective(#[source] E),
    /// The run was refused before any evaluation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
}

impl<E> SelectionError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns `true` if the objective function caused the failure.
    #[inline]
    pub fn is_objective(&self) -> bool {
        matches!(self, SelectionError::Objective(_))
    }

    /// Returns the objective error, if that is what failed.
    #[inline]
    pub fn into_objective(self) -> Option<E> {
        match self {
            SelectionError::Objective(e) => Some(e),
            SelectionError::InvalidConfiguration(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("model training failed")]
    struct TrainingFailed;

    #[test]
    fn test_objective_error_keeps_source() {
        let err: SelectionError<TrainingFailed> = SelectionError::Objective(TrainingFailed);
        assert!(err.is_objective());
        assert_eq!(err.to_string(), "objective function failed: model training failed");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.into_objective(), Some(TrainingFailed));
    }

    #[test]
    fn test_configuration_error_converts() {
        let err: SelectionError<TrainingFailed> = ConfigurationError::ZeroProgressBudget.into();
        assert!(!err.is_objective());
        assert_eq!(
            err.to_string(),
            "invalid configuration: the progress budget must be at least 1"
        );
    }
}
