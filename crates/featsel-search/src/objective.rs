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

//! # Objective Functions
//!
//! The selection engine treats accuracy evaluation as a black box: given a
//! `FeatureSubset` it gets back a score, and higher is better. Backends (an
//! in-process k-NN evaluator, an external model trainer, a lookup table in a
//! test) implement `ObjectiveFunction` and nothing else; the engine never
//! depends on their concrete types.
//!
//! Evaluations are assumed to be expensive and deterministic. The engine
//! minimises the number of calls but does not cache. Callers who want a cache
//! wrap their backend in `CachedObjective`; `CountingObjective` records how
//! many calls actually reached the backend.
//!
//! `score` takes `&self`. Candidate evaluations within one step are
//! independent, so a backend must be usable through a shared reference.
//! Adapters that need bookkeeping use interior mutability.

use featsel_core::num::score::ScoreNumeric;
use featsel_model::subset::FeatureSubset;
use rustc_hash::FxHashMap;
use std::{
    cell::{Cell, RefCell},
    convert::Infallible,
};

/// A scoring oracle over feature subsets.
pub trait ObjectiveFunction<S>
where
    S: ScoreNumeric,
{
    /// The error raised when an evaluation fails. It aborts the run.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the name of the objective.
    fn name(&self) -> &str;

    /// Returns the number of features the objective knows about.
    fn feature_count(&self) -> usize;

    /// Returns the feature universe.
    ///
    /// The default is `0..feature_count()`. An objective without any data to
    /// learn from should return the empty subset.
    fn all_feature_indices(&self) -> FeatureSubset {
        FeatureSubset::full(self.feature_count())
    }

    /// Scores a subset. Must accept the empty subset.
    fn score(&self, subset: &FeatureSubset) -> Result<S, Self::Error>;

    /// Scores the full universe.
    fn score_all(&self) -> Result<S, Self::Error> {
        self.score(&self.all_feature_indices())
    }
}

impl<S, O> ObjectiveFunction<S> for &O
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S> + ?Sized,
{
    type Error = O::Error;

    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn feature_count(&self) -> usize {
        (**self).feature_count()
    }

    #[inline]
    fn all_feature_indices(&self) -> FeatureSubset {
        (**self).all_feature_indices()
    }

    #[inline]
    fn score(&self, subset: &FeatureSubset) -> Result<S, Self::Error> {
        (**self).score(subset)
    }

    #[inline]
    fn score_all(&self) -> Result<S, Self::Error> {
        (**self).score_all()
    }
}

/// An infallible objective backed by a closure.
#[derive(Clone)]
pub struct FnObjective<F> {
    num_features: usize,
    function: F,
}

impl<F> FnObjective<F> {
    /// Wraps `function` as an objective over `0..num_features`.
    #[inline]
    pub fn new(num_features: usize, function: F) -> Self {
        Self {
            num_features,
            function,
        }
    }
}

impl<F> std::fmt::Debug for FnObjective<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnObjective")
            .field("num_features", &self.num_features)
            .finish()
    }
}

impl<S, F> ObjectiveFunction<S> for FnObjective<F>
where
    S: ScoreNumeric,
    F: Fn(&FeatureSubset) -> S,
{
    type Error = Infallible;

    fn name(&self) -> &str {
        "FnObjective"
    }

    #[inline]
    fn feature_count(&self) -> usize {
        self.num_features
    }

    #[inline]
    fn score(&self, subset: &FeatureSubset) -> Result<S, Self::Error> {
        Ok((self.function)(subset))
    }
}

/// A fallible objective backed by a closure.
#[derive(Clone)]
pub struct TryFnObjective<F> {
    num_features: usize,
    function: F,
}

impl<F> TryFnObjective<F> {
    /// Wraps `function` as an objective over `0..num_features`.
    #[inline]
    pub fn new(num_features: usize, function: F) -> Self {
        Self {
            num_features,
            function,
        }
    }
}

impl<F> std::fmt::Debug for TryFnObjective<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryFnObjective")
            .field("num_features", &self.num_features)
            .finish()
    }
}

impl<S, E, F> ObjectiveFunction<S> for TryFnObjective<F>
where
    S: ScoreNumeric,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(&FeatureSubset) -> Result<S, E>,
{
    type Error = E;

    fn name(&self) -> &str {
        "TryFnObjective"
    }

    #[inline]
    fn feature_count(&self) -> usize {
        self.num_features
    }

    #[inline]
    fn score(&self, subset: &FeatureSubset) -> Result<S, Self::Error> {
        (self.function)(subset)
    }
}

/// Memoises scores by subset.
///
/// Only successful evaluations are stored; a failing subset is retried on the
/// next request.
#[derive(Debug)]
pub struct CachedObjective<S, O> {
    inner: O,
    cache: RefCell<FxHashMap<FeatureSubset, S>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<S, O> CachedObjective<S, O> {
    /// Wraps `inner` with an empty cache.
    #[inline]
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            cache: RefCell::new(FxHashMap::default()),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Returns the wrapped objective.
    #[inline]
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// Returns the number of requests answered from the cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    /// Returns the number of requests forwarded to the wrapped objective.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses.get()
    }

    /// Returns the number of cached subsets.
    #[inline]
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Returns `true` if nothing has been cached yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    /// Drops all cached scores and resets the counters.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
        self.hits.set(0);
        self.misses.set(0);
    }

    /// Unwraps the objective, discarding the cache.
    #[inline]
    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<S, O> ObjectiveFunction<S> for CachedObjective<S, O>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
{
    type Error = O::Error;

    fn name(&self) -> &str {
        self.inner.name()
    }

    #[inline]
    fn feature_count(&self) -> usize {
        self.inner.feature_count()
    }

    #[inline]
    fn all_feature_indices(&self) -> FeatureSubset {
        self.inner.all_feature_indices()
    }

    fn score(&self, subset: &FeatureSubset) -> Result<S, Self::Error> {
        if let Some(score) = self.cache.borrow().get(subset).copied() {
            self.hits.set(self.hits.get().saturating_add(1));
            return Ok(score);
        }

        self.misses.set(self.misses.get().saturating_add(1));
        let score = self.inner.score(subset)?;
        self.cache.borrow_mut().insert(subset.clone(), score);
        Ok(score)
    }
}

/// Counts the evaluations that reach the wrapped objective.
#[derive(Debug)]
pub struct CountingObjective<O> {
    inner: O,
    calls: Cell<u64>,
}

impl<O> CountingObjective<O> {
    #[inline]
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    /// Returns the number of `score` calls so far, failed ones included.
    #[inline]
    pub fn calls(&self) -> u64 {
        self.calls.get()
    }

    #[inline]
    pub fn reset(&self) {
        self.calls.set(0);
    }

    #[inline]
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<S, O> ObjectiveFunction<S> for CountingObjective<O>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
{
    type Error = O::Error;

    fn name(&self) -> &str {
        self.inner.name()
    }

    #[inline]
    fn feature_count(&self) -> usize {
        self.inner.feature_count()
    }

    #[inline]
    fn all_feature_indices(&self) -> FeatureSubset {
        self.inner.all_feature_indices()
    }

    #[inline]
    fn score(&self, subset: &FeatureSubset) -> Result<S, Self::Error> {
        self.calls.set(self.calls.get().saturating_add(1));
        self.inner.score(subset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subset(indices: &[usize]) -> FeatureSubset {
        indices.iter().copied().collect()
    }

    fn toy() -> FnObjective<impl Fn(&FeatureSubset) -> f64> {
        let targets = subset(&[1, 3]);
        FnObjective::new(4, move |s: &FeatureSubset| {
            s.iter().filter(|f| targets.contains(*f)).count() as f64 / 2.0
        })
    }

    #[derive(Debug, thiserror::Error)]
    #[error("too many features")]
    struct TooMany;

    #[test]
    fn test_fn_objective_scores_and_universe() {
        let objective = toy();
        assert_eq!(objective.feature_count(), 4);
        assert_eq!(
            ObjectiveFunction::<f64>::all_feature_indices(&objective).to_indices(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(objective.score(&subset(&[])).unwrap(), 0.0);
        assert_eq!(objective.score(&subset(&[0, 3])).unwrap(), 0.5);
        assert_eq!(objective.score_all().unwrap(), 1.0);
    }

    /// Scores the full universe without a subset evaluation.
    struct PrecomputedFull;

    impl ObjectiveFunction<i64> for PrecomputedFull {
        type Error = Infallible;

        fn name(&self) -> &str {
            "precomputed"
        }

        fn feature_count(&self) -> usize {
            3
        }

        fn score(&self, subset: &FeatureSubset) -> Result<i64, Self::Error> {
            Ok(subset.len() as i64)
        }

        fn score_all(&self) -> Result<i64, Self::Error> {
            Ok(42)
        }
    }

    fn full_score<O: ObjectiveFunction<i64>>(objective: O) -> i64 {
        objective.score_all().unwrap()
    }

    #[test]
    fn test_reference_forwards_score_all_override() {
        let objective = PrecomputedFull;
        assert_eq!(full_score(&objective), 42);
        assert_eq!(full_score(&&objective), 42);
        assert_eq!(full_score(&objective as &dyn ObjectiveFunction<i64, Error = Infallible>), 42);
    }

    #[test]
    fn test_try_fn_objective_propagates_errors() {
        let objective = TryFnObjective::new(3, |s: &FeatureSubset| {
            if s.len() > 1 { Err(TooMany) } else { Ok(s.len() as i64) }
        });
        assert_eq!(objective.score(&subset(&[2])).unwrap(), 1);
        assert!(objective.score(&subset(&[0, 2])).is_err());
    }

    #[test]
    fn test_cache_answers_repeated_requests() {
        let counting = CountingObjective::new(toy());
        let cached: CachedObjective<f64, _> = CachedObjective::new(&counting);

        assert_eq!(cached.score(&subset(&[1])).unwrap(), 0.5);
        assert_eq!(cached.score(&subset(&[1])).unwrap(), 0.5);
        assert_eq!(cached.score(&subset(&[1, 3])).unwrap(), 1.0);

        assert_eq!(counting.calls(), 2);
        assert_eq!(cached.hits(), 1);
        assert_eq!(cached.misses(), 2);
        assert_eq!(cached.len(), 2);

        cached.clear();
        assert!(cached.is_empty());
        assert_eq!(cached.hits(), 0);
    }

    #[test]
    fn test_cache_does_not_store_failures() {
        let counting = CountingObjective::new(TryFnObjective::new(2, |s: &FeatureSubset| {
            if s.len() > 1 { Err(TooMany) } else { Ok(1.0) }
        }));
        let cached: CachedObjective<f64, _> = CachedObjective::new(&counting);

        assert!(cached.score(&subset(&[0, 1])).is_err());
        assert!(cached.score(&subset(&[0, 1])).is_err());
        assert_eq!(counting.calls(), 2);
        assert!(cached.is_empty());
    }

    #[test]
    fn test_counting_objective_resets() {
        let counting = CountingObjective::new(toy());
        let _: f64 = counting.score(&subset(&[0])).unwrap();
        let _: f64 = counting.score(&subset(&[0])).unwrap();
        assert_eq!(counting.calls(), 2);
        counting.reset();
        assert_eq!(counting.calls(), 0);
    }
}
