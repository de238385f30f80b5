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

//! # featsel-search
//!
//! The building blocks every sequential selection strategy shares:
//!
//! - `objective`: the `ObjectiveFunction` contract and its adapters (closures,
//!   caching, call counting).
//! - `criteria`: `StoppingCriteria`, the `(progress, size)` predicate catalog.
//! - `selector`: `CandidateSelector` with the `best`/`worst` primitives.
//! - `visited`: the visited-state guard of the floating variants.
//! - `incumbent`: the best-so-far holder with smaller-subset tie-break.
//! - `stats`, `result`, `error`: what a run reports back.
//! - `monitor`: observer hooks for logging and tracing a run.

pub mod criteria;
pub mod error;
pub mod incumbent;
pub mod monitor;
pub mod objective;
pub mod result;
pub mod selector;
pub mod stats;
pub mod visited;
