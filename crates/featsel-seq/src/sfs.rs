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

//! Sequential forward selection.
//!
//! Starts from the empty subset and adds the best remaining feature on every
//! outer step. It cannot cycle, since every step shrinks the remaining set.

use crate::{algorithm::SelectionAlgorithm, strategy::SelectionStrategy};
use featsel_core::num::score::ScoreNumeric;
use featsel_search::objective::ObjectiveFunction;

#[derive(Debug, Clone, Copy)]
pub struct SequentialForwardSelection<'o, O> {
    objective: &'o O,
}

impl<'o, O> SequentialForwardSelection<'o, O> {
    #[inline]
    pub fn new(objective: &'o O) -> Self {
        Self { objective }
    }
}

impl<'o, S, O> SelectionStrategy<S, O> for SequentialForwardSelection<'o, O>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
{
    const ALGORITHM: SelectionAlgorithm = SelectionAlgorithm::Sfs;

    #[inline]
    fn objective(&self) -> &O {
        self.objective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use featsel_model::subset::FeatureSubset;
    use featsel_search::{
        criteria::StoppingCriteria,
        error::{ConfigurationError, SelectionError},
        monitor::{selection_monitor::MoveKind, trace::TraceMonitor},
        objective::{CountingObjective, FnObjective},
        result::{SelectionOutcome, SelectionTermination},
    };

    fn subset(indices: &[usize]) -> FeatureSubset {
        indices.iter().copied().collect()
    }

    /// `|S ∩ {1, 3}| / 2` over `{0, 1, 2, 3}`.
    fn toy() -> CountingObjective<FnObjective<impl Fn(&FeatureSubset) -> f64>> {
        let targets = subset(&[1, 3]);
        CountingObjective::new(FnObjective::new(4, move |s: &FeatureSubset| {
            s.iter().filter(|f| targets.contains(*f)).count() as f64 / 2.0
        }))
    }

    #[test]
    fn test_toy_scenario_unconstrained() {
        let objective = toy();
        let mut trace = TraceMonitor::new();
        let outcome: SelectionOutcome<f64> = SequentialForwardSelection::new(&objective)
            .select_with_monitor(StoppingCriteria::convergence(5), None, &mut trace)
            .unwrap();

        let outer: Vec<FeatureSubset> = trace
            .accepted_states()
            .iter()
            .zip(trace.accepted_kinds())
            .filter(|(_, kind)| **kind == MoveKind::Outer)
            .map(|(s, _)| s.clone())
            .collect();
        assert_eq!(outer[0], subset(&[1]));
        assert_eq!(outer[1], subset(&[1, 3]));

        assert_eq!(outcome.selected_features(), subset(&[1, 3]));
        assert_eq!(outcome.score(), Some(1.0));
        assert_eq!(outcome.termination, SelectionTermination::NoCandidate);
        assert_eq!(outcome.statistics.iterations, 4);
        assert_eq!(outcome.statistics.evaluations, 1 + 4 + 3 + 2 + 1);
        assert_eq!(objective.calls(), 11);
    }

    #[test]
    fn test_default_select_matches_convergence_run() {
        let objective = toy();
        let outcome: SelectionOutcome<f64> =
            SequentialForwardSelection::new(&objective).select().unwrap();
        assert_eq!(outcome.selected_features(), subset(&[1, 3]));
    }

    #[test]
    fn test_stops_after_budget_of_non_improving_steps() {
        let objective = toy();
        let outcome: SelectionOutcome<f64> = SequentialForwardSelection::new(&objective)
            .select_with(StoppingCriteria::convergence(1), None)
            .unwrap();

        assert_eq!(outcome.termination, SelectionTermination::CriteriaMet);
        assert_eq!(outcome.statistics.iterations, 3);
        assert_eq!(outcome.selected_features(), subset(&[1, 3]));
    }

    #[test]
    fn test_select_at_most_respects_cap() {
        let objective = toy();
        let sfs = SequentialForwardSelection::new(&objective);

        let outcome: SelectionOutcome<f64> = sfs.select_at_most(1).unwrap();
        assert_eq!(outcome.selected_features(), subset(&[1]));
        assert_eq!(outcome.score(), Some(0.5));
        assert_eq!(outcome.termination, SelectionTermination::CriteriaMet);

        let outcome: SelectionOutcome<f64> = sfs.select_at_most(0).unwrap();
        assert!(outcome.selected_features().is_empty());
        assert_eq!(outcome.score(), Some(0.0));
    }

    #[test]
    fn test_zero_budget_is_refused_without_evaluation() {
        let objective = toy();
        let result: Result<SelectionOutcome<f64>, _> = SequentialForwardSelection::new(&objective)
            .select_with(StoppingCriteria::convergence(0), None);

        assert!(matches!(
            result,
            Err(SelectionError::InvalidConfiguration(
                ConfigurationError::ZeroProgressBudget
            ))
        ));
        assert_eq!(objective.calls(), 0);
    }
}
