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

//! Sequential floating backward selection.
//!
//! The mirror image of the floating forward search: every removal is followed
//! by a conditioning loop that re-adds the most informative excluded feature
//! while that strictly improves the score and leads to an unvisited subset.

use crate::{algorithm::SelectionAlgorithm, strategy::SelectionStrategy};
use featsel_core::num::score::ScoreNumeric;
use featsel_search::objective::ObjectiveFunction;

#[derive(Debug, Clone, Copy)]
pub struct SequentialFloatingBackwardSelection<'o, O> {
    objective: &'o O,
}

impl<'o, O> SequentialFloatingBackwardSelection<'o, O> {
    #[inline]
    pub fn new(objective: &'o O) -> Self {
        Self { objective }
    }
}

impl<'o, S, O> SelectionStrategy<S, O> for SequentialFloatingBackwardSelection<'o, O>
where
    S: ScoreNumeric,
    O: ObjectiveFunction<S>,
{
    const ALGORITHM: SelectionAlgorithm = SelectionAlgorithm::Sfbs;

    #[inline]
    fn objective(&self) -> &O {
        self.objective
    }
}
