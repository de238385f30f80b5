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

//! # Stopping Criteria
//!
//! A stopping criterion is a predicate over `(progress, size)`, where
//! `progress` counts consecutive outer iterations without a strict score
//! improvement and `size` is the number of currently selected features. The
//! search keeps going while the predicate holds.
//!
//! The canonical predicates are named constructors so that every algorithm
//! variant composes from the same catalog:
//!
//! - `forward_size(t)`: continue while `size < t`.
//! - `backward_size(t)`: continue while `size > t`.
//! - `convergence(b)`: continue while `progress < b`.
//! - `backward_with_budget(t, b)`: `backward_size(t)` or `convergence(b)`.
//!
//! Anything else can be expressed with `or` or `custom`.

use crate::error::ConfigurationError;
use std::sync::Arc;

type CustomPredicate = Arc<dyn Fn(usize, usize) -> bool + Send + Sync>;

#[derive(Clone)]
enum Predicate {
    ForwardSize(usize),
    BackwardSize(usize),
    Convergence(usize),
    Or(Box<Predicate>, Box<Predicate>),
    Custom(CustomPredicate),
}

impl Predicate {
    fn holds(&self, progress: usize, size: usize) -> bool {
        match self {
            Predicate::ForwardSize(target) => size < *target,
            Predicate::BackwardSize(target) => size > *target,
            Predicate::Convergence(budget) => progress < *budget,
            Predicate::Or(a, b) => a.holds(progress, size) || b.holds(progress, size),
            Predicate::Custom(f) => f(progress, size),
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Predicate::Convergence(0) => Err(ConfigurationError::ZeroProgressBudget),
            Predicate::Or(a, b) => {
                a.validate()?;
                b.validate()
            }
            _ => Ok(()),
        }
    }

    fn fmt_into(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::ForwardSize(t) => write!(f, "size < {}", t),
            Predicate::BackwardSize(t) => write!(f, "size > {}", t),
            Predicate::Convergence(b) => write!(f, "progress < {}", b),
            Predicate::Or(a, b) => {
                write!(f, "(")?;
                a.fmt_into(f)?;
                write!(f, " or ")?;
                b.fmt_into(f)?;
                write!(f, ")")
            }
            Predicate::Custom(_) => write!(f, "custom"),
        }
    }
}

/// Decides whether the outer search loop takes another step.
#[derive(Clone)]
pub struct StoppingCriteria {
    predicate: Predicate,
}

impl StoppingCriteria {
    /// Continue while fewer than `target` features are selected.
    #[inline]
    pub fn forward_size(target: usize) -> Self {
        Self {
            predicate: Predicate::ForwardSize(target),
        }
    }

    /// Continue while more than `target` features are selected.
    #[inline]
    pub fn backward_size(target: usize) -> Self {
        Self {
            predicate: Predicate::BackwardSize(target),
        }
    }

    /// Continue while fewer than `budget` consecutive iterations failed to
    /// improve the score.
    #[inline]
    pub fn convergence(budget: usize) -> Self {
        Self {
            predicate: Predicate::Convergence(budget),
        }
    }

    /// Continue while above `target` features, and past it while the score
    /// still improves within `budget` iterations.
    #[inline]
    pub fn backward_with_budget(target: usize, budget: usize) -> Self {
        Self::backward_size(target).or(Self::convergence(budget))
    }

    /// Continue while `predicate(progress, size)` holds.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(usize, usize) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Predicate::Custom(Arc::new(predicate)),
        }
    }

    /// Continue while either criterion would continue.
    pub fn or(self, other: StoppingCriteria) -> Self {
        Self {
            predicate: Predicate::Or(Box::new(self.predicate), Box::new(other.predicate)),
        }
    }

    /// Returns `true` if the search should take another outer step.
    #[inline]
    pub fn should_continue(&self, progress: usize, size: usize) -> bool {
        self.predicate.holds(progress, size)
    }

    /// Rejects criteria that cannot drive a meaningful run.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.predicate.validate()
    }
}

impl std::fmt::Debug for StoppingCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StoppingCriteria(")?;
        self.predicate.fmt_into(f)?;
        write!(f, ")")
    }
}

impl std::fmt::Display for StoppingCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.predicate.fmt_into(f)
    }
}
