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

//! # Candidate Selection
//!
//! The `best` and `worst` primitives of sequential selection. `best` scores
//! `selected ∪ {f}` for every remaining `f`; `worst` scores `selected \ {f}`
//! for every selected `f`. Both return the feature whose move yields the
//! greatest score, together with that score so the caller never has to
//! evaluate the resulting subset a second time.
//!
//! Candidates are visited in ascending feature index order and the running
//! favourite is only replaced by a strictly greater score. Ties therefore go
//! to the smallest index (of the added feature for `best`, of the removed
//! feature for `worst`). A NaN score never displaces a comparable one.
//!
//! The `_unvisited` variants prefer moves that lead to a subset outside a
//! `VisitedStates` set. When every move leads back into the set they still
//! return the overall favourite, flagged with `Candidate::revisits`.

use crate::{objective::ObjectiveFunction, visited::VisitedStates};
use featsel_core::num::score::{ScoreNumeric, is_improvement, score_as_f64};
use featsel_model::{index::FeatureIndex, subset::FeatureSubset};

/// A move found by the selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<S> {
    feature: FeatureIndex,
    score: S,
    revisits: bool,
}

impl<S> Candidate<S>
where
    S: Copy,
{
    #[inline]
    pub fn new(feature: FeatureIndex, score: S) -> Self {
        Self {
            feature,
            score,
            revisits: false,
        }
    }

    #[inline]
    fn revisiting(self) -> Self {
        Self {
            revisits: true,
            ..self
        }
    }

    /// The feature to add or remove.
    #[inline]
    pub fn feature(&self) -> FeatureIndex {
        self.feature
    }

    /// The score of the subset after the move.
    #[inline]
    pub fn score(&self) -> S {
        self.score
    }

    /// Whether the move leads to an already visited subset.
    #[inline]
    pub fn revisits(&self) -> bool {
        self.revisits
    }
}

/// Evaluates moves against an objective and counts the evaluations.
#[derive(Debug)]
pub struct CandidateSelector<'a, S, O> {
    objective: &'a O,
    evaluations: u64,
    _phantom: std::marker::PhantomData<S>,
}

impl<'a, S, O> CandidateSelector<'a, S, O>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
{
    #[inline]
    pub fn new(objective: &'a O) -> Self {
        Self {
            objective,
            evaluations: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the number of objective calls made through this selector.
    #[inline]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Scores a single subset.
    #[inline]
    pub fn evaluate(&mut self, subset: &FeatureSubset) -> Result<S, O::Error> {
        let score = self.objective.score(subset)?;
        self.evaluations = self.evaluations.saturating_add(1);
        Ok(score)
    }

    /// Finds the remaining feature whose inclusion scores highest.
    ///
    /// Returns `None` if `remaining` is empty.
    #[inline]
    pub fn best(
        &mut self,
        selected: &FeatureSubset,
        remaining: &FeatureSubset,
    ) -> Result<Option<Candidate<S>>, O::Error> {
        self.scan_inclusions(selected, remaining, None)
    }

    /// Like [`best`](Self::best), but prefers inclusions that lead outside
    /// `visited`.
    #[inline]
    pub fn best_unvisited(
        &mut self,
        selected: &FeatureSubset,
        remaining: &FeatureSubset,
        visited: &VisitedStates,
    ) -> Result<Option<Candidate<S>>, O::Error> {
        self.scan_inclusions(selected, remaining, Some(visited))
    }

    /// Finds the selected feature whose exclusion scores highest.
    ///
    /// Returns `None` if `selected` is empty.
    #[inline]
    pub fn worst(&mut self, selected: &FeatureSubset) -> Result<Option<Candidate<S>>, O::Error> {
        self.scan_exclusions(selected, None)
    }

    /// Like [`worst`](Self::worst), but prefers exclusions that lead outside
    /// `visited`.
    #[inline]
    pub fn worst_unvisited(
        &mut self,
        selected: &FeatureSubset,
        visited: &VisitedStates,
    ) -> Result<Option<Candidate<S>>, O::Error> {
        self.scan_exclusions(selected, Some(visited))
    }

    fn scan_inclusions(
        &mut self,
        selected: &FeatureSubset,
        remaining: &FeatureSubset,
        visited: Option<&VisitedStates>,
    ) -> Result<Option<Candidate<S>>, O::Error> {
        debug_assert!(
            selected.is_disjoint(remaining),
            "called `CandidateSelector::best` with overlapping selected and remaining sets"
        );

        let mut probe = selected.clone();
        let mut favourites = Favourites::default();

        for feature in remaining.iter() {
            probe.insert(feature);
            let score = self.evaluate(&probe);
            let fresh = visited.is_none_or(|v| !v.contains(&probe));
            probe.remove(feature);
            let score = score?;

            tracing::trace!(
                feature = feature.get(),
                score = score_as_f64(&score),
                fresh,
                "scored inclusion"
            );

            favourites.consider(Candidate::new(feature, score), fresh);
        }

        Ok(favourites.into_choice())
    }

    fn scan_exclusions(
        &mut self,
        selected: &FeatureSubset,
        visited: Option<&VisitedStates>,
    ) -> Result<Option<Candidate<S>>, O::Error> {
        let mut probe = selected.clone();
        let mut favourites = Favourites::default();

        for feature in selected.iter() {
            probe.remove(feature);
            let score = self.evaluate(&probe);
            let fresh = visited.is_none_or(|v| !v.contains(&probe));
            probe.insert(feature);
            let score = score?;

            tracing::trace!(
                feature = feature.get(),
                score = score_as_f64(&score),
                fresh,
                "scored exclusion"
            );

            favourites.consider(Candidate::new(feature, score), fresh);
        }

        Ok(favourites.into_choice())
    }
}

/// The running favourites of one scan: among moves to unvisited subsets and
/// among all moves.
struct Favourites<S> {
    fresh: Option<Candidate<S>>,
    any: Option<Candidate<S>>,
}

impl<S> Default for Favourites<S> {
    #[inline]
    fn default() -> Self {
        Self {
            fresh: None,
            any: None,
        }
    }
}

impl<S> Favourites<S>
where
    S: ScoreNumeric,
{
    #[inline]
    fn consider(&mut self, candidate: Candidate<S>, fresh: bool) {
        if fresh && Self::replaces(&self.fresh, &candidate.score) {
            self.fresh = Some(candidate);
        }
        if Self::replaces(&self.any, &candidate.score) {
            self.any = Some(candidate);
        }
    }

    #[inline]
    fn into_choice(self) -> Option<Candidate<S>> {
        self.fresh.or_else(|| self.any.map(Candidate::revisiting))
    }

    #[inline]
    fn replaces(favourite: &Option<Candidate<S>>, score: &S) -> bool {
        match favourite {
            None => true,
            Some(current) => is_improvement(score, &current.score),
        }
    }
}
