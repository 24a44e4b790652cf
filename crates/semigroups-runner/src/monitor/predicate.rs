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

use crate::monitor::run_monitor::{RunCommand, RunMonitor, StopReason};

/// Stops the run once a caller-supplied nullary predicate returns `true`.
///
/// The predicate is evaluated at the same safe points as the time limit and
/// the kill flag. Side effects inside the predicate are the caller's business.
pub struct PredicateMonitor<F> {
    predicate: F,
    evaluations: u64,
}

impl<F> PredicateMonitor<F>
where
    F: FnMut() -> bool,
{
    #[inline]
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            evaluations: 0,
        }
    }

    /// Number of times the predicate has been evaluated.
    #[inline]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}

impl<F> std::fmt::Debug for PredicateMonitor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredicateMonitor")
            .field("evaluations", &self.evaluations)
            .finish()
    }
}

impl<F> RunMonitor for PredicateMonitor<F>
where
    F: FnMut() -> bool,
{
    fn name(&self) -> &str {
        "PredicateMonitor"
    }

    fn on_enter_run(&mut self) {}
    fn on_exit_run(&mut self) {}
    fn on_batch(&mut self) {}

    fn run_command(&mut self) -> RunCommand {
        self.evaluations += 1;
        if (self.predicate)() {
            RunCommand::Stop(StopReason::Predicate)
        } else {
            RunCommand::Continue
        }
    }
}
