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

use crate::{result::SelectionTermination, stats::SelectionStatistics};
use featsel_core::num::score::ScoreNumeric;
use featsel_model::{selection::Selection, subset::FeatureSubset};

/// Where a state change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// The starting subset of the run.
    Initial,
    /// An outer step: addition in forward search, removal in backward search.
    Outer,
    /// A conditioning step of a floating search.
    Conditioning,
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveKind::Initial => write!(f, "Initial"),
            MoveKind::Outer => write!(f, "Outer"),
            MoveKind::Conditioning => write!(f, "Conditioning"),
        }
    }
}

/// Trait for observing the progress of a selection run.
pub trait SelectionMonitor<S>
where
    S: ScoreNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before anything is evaluated.
    fn on_enter_search(&mut self, universe: &FeatureSubset);

    /// Called whenever the engine settles on a subset.
    fn on_state_accepted(&mut self, _subset: &FeatureSubset, _score: S, _kind: MoveKind) {}

    /// Called when a conditioning move is undone.
    fn on_conditioning_reverted(&mut self, _subset: &FeatureSubset, _score: S) {}

    /// Called when the best-so-far selection is replaced.
    fn on_best_updated(&mut self, _best: &Selection<S>, _statistics: &SelectionStatistics) {}

    /// Called at the end of every outer iteration.
    fn on_iteration(
        &mut self,
        _selected: &FeatureSubset,
        _score: S,
        _progress: usize,
        _statistics: &SelectionStatistics,
    ) {
    }

    /// Called once when the run ends normally. Not called if the objective fails.
    fn on_exit_search(&mut self, termination: SelectionTermination, statistics: &SelectionStatistics);
}

impl<S> std::fmt::Debug for dyn SelectionMonitor<S>
where
    S: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SelectionMonitor({})", self.name())
    }
}

impl<S> std::fmt::Display for dyn SelectionMonitor<S>
where
    S: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SelectionMonitor({})", self.name())
    }
}

impl<S, M> SelectionMonitor<S> for &mut M
where
    S: ScoreNumeric,
    M: SelectionMonitor<S> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, universe: &FeatureSubset) {
        (**self).on_enter_search(universe)
    }

    fn on_state_accepted(&mut self, subset: &FeatureSubset, score: S, kind: MoveKind) {
        (**self).on_state_accepted(subset, score, kind)
    }

    fn on_conditioning_reverted(&mut self, subset: &FeatureSubset, score: S) {
        (**self).on_conditioning_reverted(subset, score)
    }

    fn on_best_updated(&mut self, best: &Selection<S>, statistics: &SelectionStatistics) {
        (**self).on_best_updated(best, statistics)
    }

    fn on_iteration(
        &mut self,
        selected: &FeatureSubset,
        score: S,
        progress: usize,
        statistics: &SelectionStatistics,
    ) {
        (**self).on_iteration(selected, score, progress, statistics)
    }

    fn on_exit_search(&mut self, termination: SelectionTermination, statistics: &SelectionStatistics) {
        (**self).on_exit_search(termination, statistics)
    }
}
