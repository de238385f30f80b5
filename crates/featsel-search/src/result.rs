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

use crate::stats::SelectionStatistics;
use featsel_model::{selection::Selection, subset::FeatureSubset};

/// Why a selection run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionTermination {
    /// The universe was empty; nothing was evaluated.
    EmptyUniverse,
    /// The stopping criteria no longer allowed an outer step.
    CriteriaMet,
    /// No feature was left to add or remove.
    NoCandidate,
}

impl std::fmt::Display for SelectionTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionTermination::EmptyUniverse => write!(f, "Empty Universe"),
            SelectionTermination::CriteriaMet => write!(f, "Criteria Met"),
            SelectionTermination::NoCandidate => write!(f, "No Candidate"),
        }
    }
}

/// The result of a selection run.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOutcome<S> {
    /// The best eligible selection, or `None` if no eligible subset was scored.
    pub best: Option<Selection<S>>,
    pub termination: SelectionTermination,
    pub statistics: SelectionStatistics,
}

impl<S> SelectionOutcome<S> {
    #[inline]
    pub fn new(
        best: Option<Selection<S>>,
        termination: SelectionTermination,
        statistics: SelectionStatistics,
    ) -> Self {
        Self {
            best,
            termination,
            statistics,
        }
    }

    #[inline]
    pub fn best(&self) -> Option<&Selection<S>> {
        self.best.as_ref()
    }

    /// Returns the selected features; empty if nothing was selected.
    #[inline]
    pub fn selected_features(&self) -> FeatureSubset {
        self.best
            .as_ref()
            .map(|s| s.subset().clone())
            .unwrap_or_default()
    }

    #[inline]
    pub fn score(&self) -> Option<S>
    where
        S: Copy,
    {
        self.best.as_ref().map(Selection::score)
    }

    #[inline]
    pub fn has_selection(&self) -> bool {
        self.best.is_some()
    }
}

impl<S> std::fmt::Display for SelectionOutcome<S>
where
    S: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.best {
            Some(best) => write!(f, "{} ({})", best, self.termination),
            None => write!(f, "Selection(none) ({})", self.termination),
        }
    }
}
