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

use crate::{
    algorithm::SelectionAlgorithm,
    config::SelectionConfig,
    engine::{SelectionResult, SequentialSelectionEngine},
};
use featsel_core::num::score::ScoreNumeric;
use featsel_search::{
    criteria::StoppingCriteria,
    monitor::{no_op::NoOperationMonitor, selection_monitor::SelectionMonitor},
    objective::ObjectiveFunction,
};

/// Entry points shared by the four sequential strategies.
///
/// Implementors only name their algorithm and hand out the objective; the
/// entry points build a `SelectionConfig` and run the engine.
pub trait SelectionStrategy<S, O>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
{
    const ALGORITHM: SelectionAlgorithm;

    /// Returns the objective the strategy scores subsets with.
    fn objective(&self) -> &O;

    /// Runs until the score stops improving for the default number of
    /// iterations. No size cap.
    fn select(&self) -> SelectionResult<S, O::Error> {
        SequentialSelectionEngine::new(SelectionConfig::convergence(Self::ALGORITHM))
            .select(self.objective())
    }

    /// Returns the best selection of at most `max_features` features.
    fn select_at_most(&self, max_features: usize) -> SelectionResult<S, O::Error> {
        SequentialSelectionEngine::new(SelectionConfig::at_most(Self::ALGORITHM, max_features))
            .select(self.objective())
    }

    /// Runs with arbitrary criteria and an optional size cap.
    fn select_with(
        &self,
        criteria: StoppingCriteria,
        max_features: Option<usize>,
    ) -> SelectionResult<S, O::Error> {
        self.select_with_monitor(criteria, max_features, NoOperationMonitor::new())
    }

    /// Runs with arbitrary criteria, reporting events to `monitor`.
    fn select_with_monitor<M>(
        &self,
        criteria: StoppingCriteria,
        max_features: Option<usize>,
        monitor: M,
    ) -> SelectionResult<S, O::Error>
    where
        M: SelectionMonitor<S>,
    {
        let config = SelectionConfig::builder(Self::ALGORITHM)
            .criteria(criteria)
            .max_features_opt(max_features)
            .build()?;
        SequentialSelectionEngine::new(config).select_with_monitor(self.objective(), monitor)
    }
}
