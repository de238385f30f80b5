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
    monitor::selection_monitor::{MoveKind, SelectionMonitor},
    result::SelectionTermination,
    stats::SelectionStatistics,
};
use featsel_core::num::score::ScoreNumeric;
use featsel_model::{selection::Selection, subset::FeatureSubset};

/// A composite monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeMonitor<'a, S> {
    monitors: Vec<Box<dyn SelectionMonitor<S> + 'a>>,
}

impl<'a, S> std::fmt::Debug for CompositeMonitor<'a, S>
where
    S: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names().join(", "))
            .finish()
    }
}

impl<'a, S> std::fmt::Display for CompositeMonitor<'a, S>
where
    S: ScoreNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor([{}])", self.names().join(", "))
    }
}

impl<'a, S> Default for CompositeMonitor<'a, S>
where
    S: ScoreNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S> CompositeMonitor<'a, S>
where
    S: ScoreNumeric,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline]
    pub fn new() -> CompositeMonitor<'a, S> {
        CompositeMonitor {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> CompositeMonitor<'a, S> {
        CompositeMonitor {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SelectionMonitor<S> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a new boxed monitor to the composite monitor.
    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SelectionMonitor<S> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of monitors in the composite monitor.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    fn names(&self) -> Vec<&str> {
        self.monitors.iter().map(|m| m.name()).collect()
    }
}

impl<'a, S> FromIterator<Box<dyn SelectionMonitor<S> + 'a>> for CompositeMonitor<'a, S>
where
    S: ScoreNumeric,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SelectionMonitor<S> + 'a>>,
    {
        CompositeMonitor {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, S> SelectionMonitor<S> for CompositeMonitor<'a, S>
where
    S: ScoreNumeric,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, universe: &FeatureSubset) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(universe);
        }
    }

    fn on_state_accepted(&mut self, subset: &FeatureSubset, score: S, kind: MoveKind) {
        for monitor in &mut self.monitors {
            monitor.on_state_accepted(subset, score, kind);
        }
    }

    fn on_conditioning_reverted(&mut self, subset: &FeatureSubset, score: S) {
        for monitor in &mut self.monitors {
            monitor.on_conditioning_reverted(subset, score);
        }
    }

    fn on_best_updated(&mut self, best: &Selection<S>, statistics: &SelectionStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_best_updated(best, statistics);
        }
    }

    fn on_iteration(
        &mut self,
        selected: &FeatureSubset,
        score: S,
        progress: usize,
        statistics: &SelectionStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_iteration(selected, score, progress, statistics);
        }
    }

    fn on_exit_search(&mut self, termination: SelectionTermination, statistics: &SelectionStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(termination, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{no_op::NoOperationMonitor, trace::TraceMonitor};

    #[test]
    fn test_forwards_events_to_every_monitor() {
        let mut first: TraceMonitor<f64> = TraceMonitor::new();
        let mut second: TraceMonitor<f64> = TraceMonitor::new();
        let universe: FeatureSubset = [0usize, 1].into_iter().collect();

        {
            let mut composite = CompositeMonitor::new();
            composite.add_monitor(&mut first);
            composite.add_monitor(&mut second);
            composite.add_monitor(NoOperationMonitor::new());
            assert_eq!(composite.len(), 3);

            composite.on_enter_search(&universe);
            composite.on_state_accepted(&universe, 0.5, MoveKind::Initial);
            composite.on_exit_search(
                SelectionTermination::CriteriaMet,
                &SelectionStatistics::default(),
            );
        }

        for monitor in [&first, &second] {
            assert_eq!(monitor.accepted_states(), &[universe.clone()]);
            assert_eq!(monitor.termination(), Some(SelectionTermination::CriteriaMet));
        }
    }

    #[test]
    fn test_display_lists_names() {
        let mut composite: CompositeMonitor<'_, f64> = CompositeMonitor::with_capacity(2);
        assert!(composite.is_empty());
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(TraceMonitor::new());
        assert_eq!(
            composite.to_string(),
            "CompositeMonitor([NoOperationMonitor, TraceMonitor])"
        );
    }
}
