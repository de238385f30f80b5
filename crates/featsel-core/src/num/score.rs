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

//! # Score Comparison
//!
//! Objective scores are compared exactly, without tolerance. Every decision the
//! engine makes ("is this candidate better", "did this iteration make
//! progress", "does this subset replace the best so far") goes through the
//! helpers in this module so the strict `>` versus `<=` split is applied in one
//! place.
//!
//! Scores are only `PartialOrd`. An incomparable score (a floating point NaN)
//! never counts as an improvement, and any comparable score improves on an
//! incomparable one. This keeps a misbehaving oracle from pinning the search to
//! a NaN candidate without turning the comparison into a panic.

use num_traits::ToPrimitive;
use std::cmp::Ordering;

/// Bounds an objective score must satisfy to drive the selection engine.
///
/// Implemented for every type with the listed capabilities; in practice `f64`
/// (percentage correct) or `f32`, but integer scores work as well.
pub trait ScoreNumeric:
    Copy + PartialOrd + ToPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

impl<T> ScoreNumeric for T where
    T: Copy + PartialOrd + ToPrimitive + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}

/// Returns `true` if `score` can be ordered against itself (i.e. is not NaN).
#[inline]
pub fn is_comparable<S>(score: &S) -> bool
where
    S: PartialOrd,
{
    score.partial_cmp(score).is_some()
}

/// Returns `true` if `candidate` is strictly greater than `reference`.
#[inline]
pub fn is_improvement<S>(candidate: &S, reference: &S) -> bool
where
    S: PartialOrd,
{
    match candidate.partial_cmp(reference) {
        Some(Ordering::Greater) => true,
        Some(_) => false,
        None => is_comparable(candidate) && !is_comparable(reference),
    }
}

/// Returns `true` if `candidate` does not strictly exceed `reference`.
#[inline]
pub fn is_not_improvement<S>(candidate: &S, reference: &S) -> bool
where
    S: PartialOrd,
{
    !is_improvement(candidate, reference)
}

/// Returns `true` if both scores are comparable and exactly equal.
#[inline]
pub fn is_tie<S>(a: &S, b: &S) -> bool
where
    S: PartialOrd,
{
    matches!(a.partial_cmp(b), Some(Ordering::Equal))
}

/// Converts a score to `f64` for logging, falling back to NaN.
#[inline]
pub fn score_as_f64<S>(score: &S) -> f64
where
    S: ToPrimitive,
{
    score.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_improvement() {
        assert!(is_improvement(&0.75, &0.5));
        assert!(!is_improvement(&0.5, &0.5));
        assert!(!is_improvement(&0.25, &0.5));
        assert!(is_not_improvement(&0.5, &0.5));
        assert!(is_not_improvement(&0.25, &0.5));
    }

    #[test]
    fn test_nan_never_improves() {
        assert!(!is_improvement(&f64::NAN, &0.0));
        assert!(!is_improvement(&f64::NAN, &f64::NAN));
        assert!(is_not_improvement(&f64::NAN, &-1.0));
    }

    #[test]
    fn test_comparable_beats_nan() {
        assert!(is_improvement(&-100.0, &f64::NAN));
        assert!(is_improvement(&0.0_f32, &f32::NAN));
    }

    #[test]
    fn test_tie_requires_comparable_equal_values() {
        assert!(is_tie(&1.0, &1.0));
        assert!(!is_tie(&1.0, &1.5));
        assert!(!is_tie(&f64::NAN, &f64::NAN));
    }

    #[test]
    fn test_integer_scores() {
        assert!(is_improvement(&3_i64, &2_i64));
        assert!(is_not_improvement(&2_i64, &2_i64));
        assert_eq!(score_as_f64(&7_u32), 7.0);
    }
}
