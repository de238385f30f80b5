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

//! featsel-seq: sequential wrapper feature selection
//!
//! Four greedy strategies over a shared engine:
//!
//! - `sfs::SequentialForwardSelection` grows the subset from empty.
//! - `sbs::SequentialBackwardSelection` shrinks it from the full universe.
//! - `sffs::SequentialFloatingForwardSelection` and
//!   `sfbs::SequentialFloatingBackwardSelection` follow every outer step with
//!   conditioning moves in the opposite direction.
//!
//! Core flow
//! - Implement `featsel_search::objective::ObjectiveFunction` for the model
//!   that scores a subset (higher is better).
//! - Pick a strategy and call `select`, `select_at_most` or `select_with`,
//!   or build a `config::SelectionConfig` and drive
//!   `engine::SequentialSelectionEngine` directly.
//!
//! Guarantees
//! - Deterministic for a deterministic objective: candidates are scanned in
//!   ascending index order and ties keep the smallest index.
//! - The floating variants never accept the same subset twice in one run.
//! - The reported selection never exceeds the configured size cap.
//!
//! Module map
//! - `algorithm`: the strategy enum and its direction.
//! - `config`: run configuration and its builder.
//! - `engine`: the selection state machine.
//! - `strategy`: entry points shared by the four strategies.

pub mod algorithm;
pub mod config;
pub mod engine;
pub mod sbs;
pub mod sfbs;
pub mod sffs;
pub mod sfs;
pub mod strategy;
