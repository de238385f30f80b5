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

//! Sequential backward selection.
//!
//! Starts from the full universe and removes the least informative feature on
//! every outer step, where "least informative" means the feature whose removal
//! leaves the highest score. With a size cap the search may keep removing
//! below the cap while the score still improves; only eligible subsets can
//! become the reported selection.

use crate::{algorithm::SelectionAlgorithm, strategy::SelectionStrategy};
use featsel_core::num::score::ScoreNumeric;
use featsel_search::objective::ObjectiveFunction;

#[derive(Debug, Clone, Copy)]
pub struct SequentialBackwardSelection<'o, O> {
    objective: &'o O,
}

impl<'o, O> SequentialBackwardSelection<'o, O> {
    #[inline]
    pub fn new(objective: &'o O) -> Self {
        Self { objective }
    }
}

impl<'o, S, O> SelectionStrategy<S, O> for SequentialBackwardSelection<'o, O>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
{
    const ALGORITHM: SelectionAlgorithm = SelectionAlgorithm::Sbs;

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
        monitor::trace::TraceMonitor,
        objective::FnObjective,
        result::{SelectionOutcome, SelectionTermination},
    };

    fn subset(indices: &[usize]) -> FeatureSubset {
        indices.iter().copied().collect()
    }

    fn toy() -> FnObjective<impl Fn(&FeatureSubset) -> f64> {
        let targets = subset(&[1, 3]);
        FnObjective::new(4, move |s: &FeatureSubset| {
            s.iter().filter(|f| targets.contains(*f)).count() as f64 / 2.0
        })
    }

    #[test]
    fn test_toy_scenario_first_removal_breaks_tie_by_index() {
        let objective = toy();
        let mut trace = TraceMonitor::new();
        let outcome: SelectionOutcome<f64> = SequentialBackwardSelection::new(&objective)
            .select_with_monitor(StoppingCriteria::convergence(5), None, &mut trace)
            .unwrap();

        let states = trace.accepted_states();
        assert_eq!(states[0], subset(&[0, 1, 2, 3]));
        assert_eq!(states[1], subset(&[1, 2, 3]));
        assert_eq!(states[2], subset(&[1, 3]));
        assert_eq!(trace.iterations()[0].score, 1.0);

        assert_eq!(outcome.selected_features(), subset(&[1, 3]));
        assert_eq!(outcome.score(), Some(1.0));
        assert_eq!(outcome.termination, SelectionTermination::NoCandidate);
    }

    #[test]
    fn test_equal_scores_shrink_the_best_selection() {
        let objective = toy();
        let mut trace = TraceMonitor::new();
        let _: SelectionOutcome<f64> = SequentialBackwardSelection::new(&objective)
            .select_with_monitor(StoppingCriteria::convergence(5), None, &mut trace)
            .unwrap();

        let sizes: Vec<usize> = trace
            .best_history()
            .iter()
            .map(|s| s.num_features())
            .collect();
        assert_eq!(sizes, vec![4, 3, 2]);
    }

    #[test]
    fn test_select_at_most_reports_small_subset() {
        let objective = toy();
        let sbs = SequentialBackwardSelection::new(&objective);

        let outcome: SelectionOutcome<f64> = sbs.select_at_most(2).unwrap();
        assert_eq!(outcome.selected_features(), subset(&[1, 3]));

        let outcome: SelectionOutcome<f64> = sbs.select_at_most(1).unwrap();
        assert_eq!(outcome.selected_features(), subset(&[3]));
        assert_eq!(outcome.score(), Some(0.5));
    }

    #[test]
    fn test_size_only_criteria_stop_at_target() {
        let objective = toy();
        let outcome: SelectionOutcome<f64> = SequentialBackwardSelection::new(&objective)
            .select_with(StoppingCriteria::backward_size(3), None)
            .unwrap();

        assert_eq!(outcome.termination, SelectionTermination::CriteriaMet);
        assert_eq!(outcome.statistics.iterations, 1);
        assert_eq!(outcome.selected_features(), subset(&[1, 2, 3]));
    }
}
