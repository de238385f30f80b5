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

use std::time::Duration;

/// Statistics collected during one selection run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionStatistics {
    /// Outer moves taken (feature added in forward search, removed in backward).
    pub iterations: u64,
    /// Objective function calls.
    pub evaluations: u64,
    /// Conditioning moves kept because they strictly improved the score.
    pub conditioning_accepted: u64,
    /// Conditioning moves undone.
    pub conditioning_reverted: u64,
    /// Times the best-so-far selection was replaced.
    pub best_updates: u64,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl SelectionStatistics {
    #[inline]
    pub fn on_iteration(&mut self) {
        self.iterations = self.iterations.saturating_add(1);
    }

    #[inline]
    pub fn on_conditioning_accepted(&mut self) {
        self.conditioning_accepted = self.conditioning_accepted.saturating_add(1);
    }

    #[inline]
    pub fn on_conditioning_reverted(&mut self) {
        self.conditioning_reverted = self.conditioning_reverted.saturating_add(1);
    }

    #[inline]
    pub fn on_best_updated(&mut self) {
        self.best_updates = self.best_updates.saturating_add(1);
    }

    #[inline]
    pub fn set_evaluations(&mut self, evaluations: u64) {
        self.evaluations = evaluations;
    }

    #[inline]
    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed = elapsed;
    }
}

impl std::fmt::Display for SelectionStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Selection Statistics:")?;
        writeln!(f, "  Iterations:             {}", self.iterations)?;
        writeln!(f, "  Evaluations:            {}", self.evaluations)?;
        writeln!(f, "  Conditioning accepted:  {}", self.conditioning_accepted)?;
        writeln!(f, "  Conditioning reverted:  {}", self.conditioning_reverted)?;
        writeln!(f, "  Best updates:           {}", self.best_updates)?;
        writeln!(
            f,
            "  Elapsed (secs):         {:.3}",
            self.elapsed.as_secs_f64()
        )
    }
}

/// Builder for `SelectionStatistics`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionStatisticsBuilder {
    iterations: u64,
    evaluations: u64,
    conditioning_accepted: u64,
    conditioning_reverted: u64,
    best_updates: u64,
    elapsed: Duration,
}

impl SelectionStatisticsBuilder {
    /// Creates a new `SelectionStatisticsBuilder` with all counters at zero.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    #[inline]
    pub fn evaluations(mut self, evaluations: u64) -> Self {
        self.evaluations = evaluations;
        self
    }

    #[inline]
    pub fn conditioning_accepted(mut self, accepted: u64) -> Self {
        self.conditioning_accepted = accepted;
        self
    }

    #[inline]
    pub fn conditioning_reverted(mut self, reverted: u64) -> Self {
        self.conditioning_reverted = reverted;
        self
    }

    #[inline]
    pub fn best_updates(mut self, best_updates: u64) -> Self {
        self.best_updates = best_updates;
        self
    }

    #[inline]
    pub fn elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Builds the `SelectionStatistics` instance.
    #[inline]
    pub fn build(self) -> SelectionStatistics {
        SelectionStatistics {
            iterations: self.iterations,
            evaluations: self.evaluations,
            conditioning_accepted: self.conditioning_accepted,
            conditioning_reverted: self.conditioning_reverted,
            best_updates: self.best_updates,
            elapsed: self.elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_constructs_expected_struct() {
        let stats = SelectionStatisticsBuilder::new()
            .iterations(4)
            .evaluations(11)
            .conditioning_accepted(1)
            .conditioning_reverted(3)
            .best_updates(2)
            .elapsed(Duration::from_millis(1234))
            .build();

        assert_eq!(stats.iterations, 4);
        assert_eq!(stats.evaluations, 11);
        assert_eq!(stats.conditioning_accepted, 1);
        assert_eq!(stats.conditioning_reverted, 3);
        assert_eq!(stats.best_updates, 2);
        assert_eq!(stats.elapsed, Duration::from_millis(1234));
    }

    #[test]
    fn test_counters_saturate() {
        let mut stats = SelectionStatisticsBuilder::new().iterations(u64::MAX).build();
        stats.on_iteration();
        assert_eq!(stats.iterations, u64::MAX);

        stats.on_best_updated();
        stats.on_conditioning_accepted();
        stats.on_conditioning_reverted();
        assert_eq!(stats.best_updates, 1);
        assert_eq!(stats.conditioning_accepted, 1);
        assert_eq!(stats.conditioning_reverted, 1);
    }

    #[test]
    fn test_display_formats_all_fields() {
        let stats = SelectionStatisticsBuilder::new()
            .iterations(2)
            .evaluations(7)
            .elapsed(Duration::from_millis(1234))
            .build();

        let rendered = format!("{}", stats);
        assert!(rendered.contains("Selection Statistics:"));
        assert!(rendered.contains("Iterations:             2"));
        assert!(rendered.contains("Evaluations:            7"));
        assert!(rendered.contains("Elapsed (secs):         1.234"));
    }
}
