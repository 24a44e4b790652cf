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

//! # Time Limit Monitor
//!
//! Enforces the soft deadline of `run_for`. The clock is read at safe points
//! only, so a run may overrun its budget by at most one batch of work.
//!
//! The clock starts in `on_enter_run`, not at construction, which lets the
//! runner build the monitor stack before it transitions into `RunningFor`.
//!
//! ## Usage
//!
//! ```rust
//! use semigroups_runner::monitor::time_limit::TimeLimitMonitor;
//! use semigroups_runner::monitor::run_monitor::{RunCommand, RunMonitor};
//! use std::time::Duration;
//!
//! let mut mon = TimeLimitMonitor::new(Duration::from_secs(5));
//! mon.on_enter_run();
//! assert_eq!(mon.run_command(), RunCommand::Continue);
//! ```

use crate::monitor::run_monitor::{RunCommand, RunMonitor, StopReason};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    time_limit: Duration,
    start_time: Instant,
}

impl TimeLimitMonitor {
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl RunMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_run(&mut self) {
        self.start_time = Instant::now();
    }

    fn on_exit_run(&mut self) {}

    fn on_batch(&mut self) {}

    #[inline(always)]
    fn run_command(&mut self) -> RunCommand {
        if self.start_time.elapsed() >= self.time_limit {
            return RunCommand::Stop(StopReason::TimedOut);
        }
        RunCommand::Continue
    }
}
