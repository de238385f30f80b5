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

//! Sequential floating forward selection.
//!
//! Every forward step is followed by a conditioning loop that removes the
//! least informative selected feature for as long as doing so strictly
//! improves the score and leads to a subset that was not visited before.
//! Outer steps prefer additions that lead to unvisited subsets.

use crate::{algorithm::SelectionAlgorithm, strategy::SelectionStrategy};
use featsel_core::num::score::ScoreNumeric;
use featsel_search::objective::ObjectiveFunction;

#[derive(Debug, Clone, Copy)]
pub struct SequentialFloatingForwardSelection<'o, O> {
    objective: &'o O,
}

impl<'o, O> SequentialFloatingForwardSelection<'o, O> {
    #[inline]
    pub fn new(objective: &'o O) -> Self {
        Self { objective }
    }
}

impl<'o, S, O> SelectionStrategy<S, O> for SequentialFloatingForwardSelection<'o, O>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
{
    const ALGORITHM: SelectionAlgorithm = SelectionAlgorithm::Sffs;

    #[inline]
    fn objective(&self) -> &O {
        self.objective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sfs::SequentialForwardSelection;
    use featsel_model::subset::FeatureSubset;
    use featsel_search::{
        criteria::StoppingCriteria,
        monitor::{selection_monitor::MoveKind, trace::TraceMonitor},
        objective::{CountingObjective, FnObjective},
        result::{SelectionOutcome, SelectionTermination},
    };

    fn subset(indices: &[usize]) -> FeatureSubset {
        indices.iter().copied().collect()
    }

    /// Rewards dropping feature 0 once all three are in.
    fn table() -> CountingObjective<FnObjective<impl Fn(&FeatureSubset) -> i64>> {
        CountingObjective::new(FnObjective::new(3, |s: &FeatureSubset| {
            match s.to_indices().as_slice() {
                [] => 0,
                [0] => 5,
                [1] => 4,
                [2] => 4,
                [0, 1] => 6,
                [0, 2] => 6,
                [1, 2] => 9,
                _ => 7,
            }
        }))
    }

    #[test]
    fn test_conditioning_escapes_the_forward_path() {
        let objective = table();
        let mut trace = TraceMonitor::new();
        let outcome: SelectionOutcome<i64> = SequentialFloatingForwardSelection::new(&objective)
            .select_with_monitor(StoppingCriteria::convergence(5), None, &mut trace)
            .unwrap();

        assert_eq!(
            trace.accepted_states(),
            &[
                subset(&[]),
                subset(&[0]),
                subset(&[0, 1]),
                subset(&[0, 1, 2]),
                subset(&[1, 2]),
            ]
        );
        assert_eq!(trace.accepted_kinds()[4], MoveKind::Conditioning);

        assert_eq!(outcome.selected_features(), subset(&[1, 2]));
        assert_eq!(outcome.score(), Some(9));
        assert_eq!(outcome.termination, SelectionTermination::NoCandidate);
    }

    #[test]
    fn test_statistics_count_conditioning_moves() {
        let objective = table();
        let outcome: SelectionOutcome<i64> = SequentialFloatingForwardSelection::new(&objective)
            .select()
            .unwrap();

        let stats = &outcome.statistics;
        assert_eq!(stats.iterations, 4);
        assert_eq!(stats.conditioning_accepted, 1);
        assert_eq!(stats.conditioning_reverted, 4);
        assert_eq!(stats.evaluations, 19);
        assert_eq!(objective.calls(), 19);
    }

    #[test]
    fn test_plain_forward_selection_misses_the_better_pair() {
        let objective = table();
        let outcome: SelectionOutcome<i64> =
            SequentialForwardSelection::new(&objective).select().unwrap();

        assert_eq!(outcome.selected_features(), subset(&[0, 1, 2]));
        assert_eq!(outcome.score(), Some(7));
        assert_eq!(outcome.termination, SelectionTermination::NoCandidate);
    }

    #[test]
    fn test_reverted_conditioning_moves_are_reported() {
        let objective = table();
        let mut trace = TraceMonitor::new();
        let _: SelectionOutcome<i64> = SequentialFloatingForwardSelection::new(&objective)
            .select_with_monitor(StoppingCriteria::convergence(5), None, &mut trace)
            .unwrap();

        assert_eq!(
            trace.reverted_states(),
            &[subset(&[]), subset(&[0]), subset(&[2]), subset(&[1, 2])]
        );
    }

    #[test]
    fn test_cap_restricts_the_reported_selection() {
        let objective = table();
        let outcome: SelectionOutcome<i64> = SequentialFloatingForwardSelection::new(&objective)
            .select_at_most(1)
            .unwrap();

        assert_eq!(outcome.selected_features(), subset(&[0]));
        assert_eq!(outcome.score(), Some(5));
        assert_eq!(outcome.termination, SelectionTermination::CriteriaMet);
    }

    #[test]
    fn test_outer_step_skips_visited_subset_and_keeps_searching() {
        let objective = CountingObjective::new(FnObjective::new(3, |s: &FeatureSubset| {
            match s.to_indices().as_slice() {
                [] => 0,
                [0] => 7,
                [1] => 7,
                [2] => 0,
                [0, 1] => 6,
                [0, 2] => 1,
                [1, 2] => 2,
                _ => 10,
            }
        }));
        let mut trace = TraceMonitor::new();
        let outcome: SelectionOutcome<i64> = SequentialFloatingForwardSelection::new(&objective)
            .select_with_monitor(StoppingCriteria::convergence(5), None, &mut trace)
            .unwrap();

        // From {1} the best addition is feature 0, but {0, 1} was already
        // visited, so feature 2 is added instead.
        assert_eq!(
            trace.accepted_states(),
            &[
                subset(&[]),
                subset(&[0]),
                subset(&[0, 1]),
                subset(&[1]),
                subset(&[1, 2]),
                subset(&[0, 1, 2]),
            ]
        );
        assert_eq!(outcome.selected_features(), subset(&[0, 1, 2]));
        assert_eq!(outcome.score(), Some(10));
        assert_eq!(outcome.termination, SelectionTermination::NoCandidate);

        let rows: Vec<(i64, usize)> = trace
            .iterations()
            .iter()
            .map(|r| (r.score, r.progress))
            .collect();
        assert_eq!(rows, vec![(7, 0), (7, 1), (2, 2), (10, 0)]);
        assert_eq!(outcome.statistics.iterations, 4);
        assert_eq!(objective.calls(), 18);
    }

    #[test]
    fn test_outer_step_re_enters_visited_subset_when_nothing_else_is_left() {
        let objective = table();
        let mut trace = TraceMonitor::new();
        let _: SelectionOutcome<i64> = SequentialFloatingForwardSelection::new(&objective)
            .select_with_monitor(StoppingCriteria::convergence(5), None, &mut trace)
            .unwrap();

        // The only addition from {1, 2} leads back to {0, 1, 2}; it is taken
        // without being accepted a second time.
        let last = trace.iterations().last().unwrap();
        assert_eq!(last.selected, subset(&[0, 1, 2]));
        assert_eq!(last.score, 7);
        assert_eq!(last.progress, 1);
        assert_eq!(trace.accepted_states().len(), 5);
    }
}
