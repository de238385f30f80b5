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

//! # Sequential Selection Engine
//!
//! One state machine drives all four strategies. A run moves through three
//! phases:
//!
//! - `Searching`: consult the stopping criteria, then take one outer step
//!   (add the `best` remaining feature going forward, remove the `worst`
//!   selected feature going backward). Floating variants prefer the best move
//!   that leads to an unvisited subset; if every move leads back to a visited
//!   one, the best of those is taken and the run goes on. The run only ends
//!   here when the criteria are met or no move exists.
//! - `Conditioning` (floating variants only): repeatedly try the opposite
//!   move, keeping it only while it strictly beats the score before the move
//!   and leads to a subset not visited before in this run.
//! - `Done`: terminal, yields the best-so-far selection.
//!
//! At the end of each outer iteration the progress counter is reset if the
//! score strictly exceeds the previous iteration's score and incremented
//! otherwise.
//!
//! The engine owns its `selected` and `remaining` sets; the incumbent and the
//! visited-state guard store independent copies. Every score used for a
//! decision comes from the candidate evaluation that produced it, so no subset
//! is scored twice in a row. Objective failures abort the run immediately and
//! are returned unchanged inside `SelectionError::Objective`.

use crate::{algorithm::Direction, config::SelectionConfig};
use featsel_core::num::score::{ScoreNumeric, is_improvement, is_not_improvement, score_as_f64};
use featsel_model::{index::FeatureIndex, subset::FeatureSubset};
use featsel_search::{
    error::SelectionError,
    incumbent::Incumbent,
    monitor::{
        no_op::NoOperationMonitor,
        selection_monitor::{MoveKind, SelectionMonitor},
    },
    objective::ObjectiveFunction,
    result::{SelectionOutcome, SelectionTermination},
    selector::CandidateSelector,
    stats::SelectionStatistics,
    visited::VisitedStates,
};
use std::time::Instant;

/// The result of a selection run.
pub type SelectionResult<S, E> = Result<SelectionOutcome<S>, SelectionError<E>>;

/// Runs a configured sequential selection against an objective.
#[derive(Debug, Clone)]
pub struct SequentialSelectionEngine {
    config: SelectionConfig,
}

impl SequentialSelectionEngine {
    #[inline]
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Runs the selection without a monitor.
    #[inline]
    pub fn select<S, O>(&self, objective: &O) -> SelectionResult<S, O::Error>
    where
        S: ScoreNumeric,
        O: ObjectiveFunction<S>,
    {
        self.select_with_monitor(objective, NoOperationMonitor::new())
    }

    /// Runs the selection, reporting events to `monitor`.
    ///
    /// An invalid configuration is rejected before the objective is called.
    pub fn select_with_monitor<S, O, M>(&self, objective: &O, mut monitor: M) -> SelectionResult<S, O::Error>
    where
        S: ScoreNumeric,
        O: ObjectiveFunction<S>,
        M: SelectionMonitor<S>,
    {
        self.config.validate()?;
        SelectionSession::new(&self.config, objective, &mut monitor).run()
    }
}

enum Phase<S> {
    Searching,
    Conditioning { baseline: S },
    Done(SelectionTermination),
}

/// The state of a single run.
struct SelectionSession<'a, S, O, M>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
{
    config: &'a SelectionConfig,
    direction: Direction,
    selector: CandidateSelector<'a, S, O>,
    monitor: &'a mut M,
    universe: FeatureSubset,
    selected: FeatureSubset,
    remaining: FeatureSubset,
    visited: Option<VisitedStates>,
    incumbent: Incumbent<S>,
    stats: SelectionStatistics,
    progress: usize,
    current_score: Option<S>,
    start_time: Instant,
}

impl<'a, S, O, M> SelectionSession<'a, S, O, M>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
    M: SelectionMonitor<S>,
{
    fn new(config: &'a SelectionConfig, objective: &'a O, monitor: &'a mut M) -> Self {
        let direction = config.algorithm().direction();
        let universe = objective.all_feature_indices();
        let (selected, remaining) = match direction {
            Direction::Forward => (FeatureSubset::with_capacity(universe.capacity()), universe.clone()),
            Direction::Backward => (universe.clone(), FeatureSubset::with_capacity(universe.capacity())),
        };
        let visited = config
            .algorithm()
            .is_floating()
            .then(|| VisitedStates::with_initial(&selected));

        Self {
            config,
            direction,
            selector: CandidateSelector::new(objective),
            monitor,
            universe,
            selected,
            remaining,
            visited,
            incumbent: Incumbent::new(config.max_features()),
            stats: SelectionStatistics::default(),
            progress: 0,
            current_score: None,
            start_time: Instant::now(),
        }
    }

    fn run(mut self) -> SelectionResult<S, O::Error> {
        self.monitor.on_enter_search(&self.universe);
        tracing::info!(
            algorithm = %self.config.algorithm(),
            universe = self.universe.len(),
            criteria = %self.config.criteria(),
            max_features = ?self.config.max_features(),
            "starting selection"
        );

        if self.universe.is_empty() {
            return Ok(self.finish(SelectionTermination::EmptyUniverse));
        }

        let initial_score = self.selector.evaluate(&self.selected).map_err(SelectionError::Objective)?;
        self.current_score = Some(initial_score);
        self.accept(initial_score, MoveKind::Initial);

        let mut phase = Phase::Searching;
        let termination = loop {
            phase = match phase {
                Phase::Searching => self.outer_step()?,
                Phase::Conditioning { baseline } => {
                    let score = self.condition(baseline)?;
                    self.settle(score);
                    Phase::Searching
                }
                Phase::Done(termination) => break termination,
            };
        };

        Ok(self.finish(termination))
    }

    /// Takes one outer step, or decides that the run is over.
    fn outer_step(&mut self) -> Result<Phase<S>, SelectionError<O::Error>> {
        if !self
            .config
            .criteria()
            .should_continue(self.progress, self.selected.len())
        {
            return Ok(Phase::Done(SelectionTermination::CriteriaMet));
        }

        let candidate = match (self.direction, self.visited.as_ref()) {
            (Direction::Forward, None) => self.selector.best(&self.selected, &self.remaining),
            (Direction::Forward, Some(visited)) => self.selector.best_unvisited(&self.selected, &self.remaining, visited),
            (Direction::Backward, None) => self.selector.worst(&self.selected),
            (Direction::Backward, Some(visited)) => self.selector.worst_unvisited(&self.selected, visited),
        }
        .map_err(SelectionError::Objective)?;

        let Some(candidate) = candidate else {
            return Ok(Phase::Done(SelectionTermination::NoCandidate));
        };

        self.outer_move(candidate.feature());
        self.stats.on_iteration();

        if candidate.revisits() {
            // Re-entered states were accepted and offered on their first visit.
            tracing::debug!(
                feature = candidate.feature().get(),
                size = self.selected.len(),
                "every outer move leads to a visited subset, re-entering the best one"
            );
        } else {
            if let Some(visited) = self.visited.as_mut() {
                visited.insert(&self.selected);
            }
            self.accept(candidate.score(), MoveKind::Outer);
        }

        if self.visited.is_some() {
            return Ok(Phase::Conditioning {
                baseline: candidate.score(),
            });
        }

        self.settle(candidate.score());
        Ok(Phase::Searching)
    }

    /// Runs the conditioning loop and returns the score of the state it
    /// settles on.
    fn condition(&mut self, baseline: S) -> Result<S, SelectionError<O::Error>> {
        let mut baseline = baseline;

        loop {
            let candidate = match self.direction {
                Direction::Forward => self.selector.worst(&self.selected),
                Direction::Backward => self.selector.best(&self.selected, &self.remaining),
            }
            .map_err(SelectionError::Objective)?;

            let Some(candidate) = candidate else {
                break;
            };

            let feature = candidate.feature();
            let score = candidate.score();
            self.conditioning_move(feature);

            let revisits = self
                .visited
                .as_ref()
                .is_some_and(|v| v.contains(&self.selected));

            if is_not_improvement(&score, &baseline) || revisits {
                tracing::trace!(
                    feature = feature.get(),
                    score = score_as_f64(&score),
                    revisits,
                    "conditioning move reverted"
                );
                self.monitor.on_conditioning_reverted(&self.selected, score);
                self.outer_move(feature);
                self.stats.on_conditioning_reverted();
                break;
            }

            if let Some(visited) = self.visited.as_mut() {
                visited.insert(&self.selected);
            }
            tracing::trace!(
                feature = feature.get(),
                score = score_as_f64(&score),
                "conditioning move kept"
            );
            self.stats.on_conditioning_accepted();
            self.accept(score, MoveKind::Conditioning);
            baseline = score;
        }

        Ok(baseline)
    }

    /// Ends an outer iteration: updates the progress counter and reports.
    fn settle(&mut self, score: S) {
        let improved = self
            .current_score
            .as_ref()
            .is_none_or(|previous| is_improvement(&score, previous));

        self.progress = if improved {
            0
        } else {
            self.progress.saturating_add(1)
        };
        self.current_score = Some(score);
        self.stats.set_evaluations(self.selector.evaluations());

        tracing::debug!(
            iteration = self.stats.iterations,
            size = self.selected.len(),
            score = score_as_f64(&score),
            progress = self.progress,
            "iteration complete"
        );

        self.monitor
            .on_iteration(&self.selected, score, self.progress, &self.stats);
    }

    /// Records the current subset as settled and offers it as best-so-far.
    fn accept(&mut self, score: S, kind: MoveKind) {
        self.monitor.on_state_accepted(&self.selected, score, kind);

        if self.incumbent.offer(&self.selected, score) {
            self.stats.on_best_updated();
            self.stats.set_evaluations(self.selector.evaluations());
            tracing::debug!(
                score = score_as_f64(&score),
                size = self.selected.len(),
                "new best selection"
            );
            if let Some(best) = self.incumbent.best() {
                self.monitor.on_best_updated(best, &self.stats);
            }
        }
    }

    /// Moves `feature` in the outer direction.
    #[inline]
    fn outer_move(&mut self, feature: FeatureIndex) {
        match self.direction {
            Direction::Forward => self.include(feature),
            Direction::Backward => self.exclude(feature),
        }
    }

    /// Moves `feature` in the conditioning direction.
    #[inline]
    fn conditioning_move(&mut self, feature: FeatureIndex) {
        match self.direction {
            Direction::Forward => self.exclude(feature),
            Direction::Backward => self.include(feature),
        }
    }

    #[inline]
    fn include(&mut self, feature: FeatureIndex) {
        self.remaining.remove(feature);
        self.selected.insert(feature);
        self.debug_assert_partition();
    }

    #[inline]
    fn exclude(&mut self, feature: FeatureIndex) {
        self.selected.remove(feature);
        self.remaining.insert(feature);
        self.debug_assert_partition();
    }

    #[inline]
    fn debug_assert_partition(&self) {
        debug_assert!(
            self.selected.is_disjoint(&self.remaining)
                && self.selected.len() + self.remaining.len() == self.universe.len()
                && self.selected.is_subset(&self.universe),
            "selected {} and remaining {} do not partition the universe {}",
            self.selected,
            self.remaining,
            self.universe
        );
    }

    fn finish(mut self, termination: SelectionTermination) -> SelectionOutcome<S> {
        self.stats.set_evaluations(self.selector.evaluations());
        self.stats.set_elapsed(self.start_time.elapsed());
        self.monitor.on_exit_search(termination, &self.stats);

        tracing::info!(
            %termination,
            best_score = ?self.incumbent.score().map(|s| score_as_f64(&s)),
            best_size = ?self.incumbent.best().map(|b| b.num_features()),
            iterations = self.stats.iterations,
            evaluations = self.stats.evaluations,
            "selection finished"
        );

        SelectionOutcome::new(self.incumbent.into_best(), termination, self.stats)
    }
}
