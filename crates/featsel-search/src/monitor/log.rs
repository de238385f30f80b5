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
    monitor::selection_monitor::SelectionMonitor, result::SelectionTermination,
    stats::SelectionStatistics,
};
use featsel_core::num::score::{ScoreNumeric, score_as_f64};
use featsel_model::{selection::Selection, subset::FeatureSubset};
use std::time::Instant;

/// Emits one `info` row per outer iteration.
#[derive(Debug, Clone)]
pub struct LogMonitor<S> {
    start_time: Instant,
    best_score: Option<S>,
    best_size: usize,
}

impl<S> LogMonitor<S> {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            best_score: None,
            best_size: 0,
        }
    }
}

impl<S> Default for LogMonitor<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Display for LogMonitor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor")
    }
}

impl<S> SelectionMonitor<S> for LogMonitor<S>
where
    S: ScoreNumeric,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, universe: &FeatureSubset) {
        self.start_time = Instant::now();
        self.best_score = None;
        self.best_size = 0;
        tracing::info!(universe = universe.len(), "selection started");
    }

    fn on_best_updated(&mut self, best: &Selection<S>, _statistics: &SelectionStatistics) {
        self.best_score = Some(best.score());
        self.best_size = best.num_features();
    }

    fn on_iteration(
        &mut self,
        selected: &FeatureSubset,
        score: S,
        progress: usize,
        statistics: &SelectionStatistics,
    ) {
        let best = self
            .best_score
            .as_ref()
            .map(score_as_f64)
            .unwrap_or(f64::NAN);

        tracing::info!(
            elapsed_secs = self.start_time.elapsed().as_secs_f64(),
            iteration = statistics.iterations,
            size = selected.len(),
            score = score_as_f64(&score),
            progress,
            best,
            best_size = self.best_size,
            evaluations = statistics.evaluations,
            "iteration"
        );
    }

    fn on_exit_search(&mut self, termination: SelectionTermination, statistics: &SelectionStatistics) {
        tracing::info!(
            %termination,
            iterations = statistics.iterations,
            evaluations = statistics.evaluations,
            elapsed_secs = self.start_time.elapsed().as_secs_f64(),
            "selection finished"
        );
    }
}
