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

//! A monitor that records the trajectory of a run.
//!
//! `TraceMonitor` keeps every accepted subset in order, every best-so-far
//! replacement, and the per-iteration progress counter. It is what the
//! engine's property tests use to check determinism, the no-cycling rule and
//! the monotonicity of the best-so-far sequence.

use crate::{
    monitor::selection_monitor::{MoveKind, SelectionMonitor},
    result::SelectionTermination,
    stats::SelectionStatistics,
};
use featsel_core::num::score::ScoreNumeric;
use featsel_model::{selection::Selection, subset::FeatureSubset};

/// One completed outer iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord<S> {
    pub selected: FeatureSubset,
    pub score: S,
    pub progress: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceMonitor<S> {
    accepted: Vec<FeatureSubset>,
    accepted_kinds: Vec<MoveKind>,
    reverted: Vec<FeatureSubset>,
    best_history: Vec<Selection<S>>,
    iterations: Vec<IterationRecord<S>>,
    termination: Option<SelectionTermination>,
}

impl<S> Default for TraceMonitor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TraceMonitor<S> {
    #[inline]
    pub fn new() -> Self {
        Self {
            accepted: Vec::new(),
            accepted_kinds: Vec::new(),
            reverted: Vec::new(),
            best_history: Vec::new(),
            iterations: Vec::new(),
            termination: None,
        }
    }

    /// Every subset the engine settled on, in order.
    #[inline]
    pub fn accepted_states(&self) -> &[FeatureSubset] {
        &self.accepted
    }

    /// The kind of move behind each entry of `accepted_states`.
    #[inline]
    pub fn accepted_kinds(&self) -> &[MoveKind] {
        &self.accepted_kinds
    }

    /// Subsets reached by conditioning moves that were undone.
    #[inline]
    pub fn reverted_states(&self) -> &[FeatureSubset] {
        &self.reverted
    }

    /// Every best-so-far replacement, in order.
    #[inline]
    pub fn best_history(&self) -> &[Selection<S>] {
        &self.best_history
    }

    #[inline]
    pub fn iterations(&self) -> &[IterationRecord<S>] {
        &self.iterations
    }

    #[inline]
    pub fn termination(&self) -> Option<SelectionTermination> {
        self.termination
    }
}

impl<S> SelectionMonitor<S> for TraceMonitor<S>
where
    S: ScoreNumeric,
{
    fn name(&self) -> &str {
        "TraceMonitor"
    }

    fn on_enter_search(&mut self, _universe: &FeatureSubset) {
        *self = Self::new();
    }

    fn on_state_accepted(&mut self, subset: &FeatureSubset, _score: S, kind: MoveKind) {
        self.accepted.push(subset.clone());
        self.accepted_kinds.push(kind);
    }

    fn on_conditioning_reverted(&mut self, subset: &FeatureSubset, _score: S) {
        self.reverted.push(subset.clone());
    }

    fn on_best_updated(&mut self, best: &Selection<S>, _statistics: &SelectionStatistics) {
        self.best_history.push(best.clone());
    }

    fn on_iteration(
        &mut self,
        selected: &FeatureSubset,
        score: S,
        progress: usize,
        _statistics: &SelectionStatistics,
    ) {
        self.iterations.push(IterationRecord {
            selected: selected.clone(),
            score,
            progress,
        });
    }

    fn on_exit_search(&mut self, termination: SelectionTermination, _statistics: &SelectionStatistics) {
        self.termination = Some(termination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_search_resets_previous_trace() {
        let mut trace: TraceMonitor<i64> = TraceMonitor::new();
        let s: FeatureSubset = [0usize].into_iter().collect();

        trace.on_state_accepted(&s, 1, MoveKind::Outer);
        trace.on_exit_search(SelectionTermination::NoCandidate, &SelectionStatistics::default());
        assert_eq!(trace.accepted_states().len(), 1);

        trace.on_enter_search(&s);
        assert!(trace.accepted_states().is_empty());
        assert!(trace.termination().is_none());
    }

    #[test]
    fn test_records_in_order() {
        let mut trace: TraceMonitor<i64> = TraceMonitor::new();
        let a: FeatureSubset = [0usize].into_iter().collect();
        let b: FeatureSubset = [0usize, 1].into_iter().collect();
        let stats = SelectionStatistics::default();

        trace.on_state_accepted(&a, 1, MoveKind::Initial);
        trace.on_best_updated(&Selection::new(a.clone(), 1), &stats);
        trace.on_state_accepted(&b, 2, MoveKind::Outer);
        trace.on_conditioning_reverted(&a, 1);
        trace.on_iteration(&b, 2, 0, &stats);

        assert_eq!(trace.accepted_states(), &[a.clone(), b.clone()]);
        assert_eq!(trace.accepted_kinds(), &[MoveKind::Initial, MoveKind::Outer]);
        assert_eq!(trace.reverted_states(), &[a]);
        assert_eq!(trace.best_history().len(), 1);
        assert_eq!(trace.iterations()[0].progress, 0);
    }
}
