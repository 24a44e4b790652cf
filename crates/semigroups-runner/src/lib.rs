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

//! # Semigroups Runner
//!
//! Run control for long-running algorithms that advance in batches: run to
//! completion, run for a time budget, run until a predicate holds, and kill
//! from another thread. Algorithms plug in through the `Algorithm` trait and
//! gain the whole control surface from `Runnable`.
//!
//! ## Modules
//!
//! - `runner`: The `Runner` state machine, `RunnerHandle`, `Algorithm` and
//!   `Runnable`.
//! - `state`: The `RunnerState` enumeration.
//! - `monitor`: Stop conditions consulted at every safe point.
//! - `stats`: Per-run statistics.
//! - `report`: Process-wide reporting switch and its scoped guard.
//! - `error`: Errors raised by run control.

pub mod error;
pub mod monitor;
pub mod report;
pub mod runner;
pub mod state;
pub mod stats;
