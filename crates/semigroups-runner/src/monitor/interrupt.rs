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
use std::sync::atomic::{AtomicBool, Ordering};

/// A run monitor that stops the loop once the runner's kill flag is set.
///
/// The flag is written by `Runner::kill` or `RunnerHandle::kill`, possibly
/// from another thread, and is only read here, once per safe point.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a> {
    kill_flag: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    #[inline(always)]
    pub fn new(kill_flag: &'a AtomicBool) -> Self {
        Self { kill_flag }
    }
}

impl<'a> RunMonitor for InterruptMonitor<'a> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_run(&mut self) {}
    fn on_exit_run(&mut self) {}
    fn on_batch(&mut self) {}

    #[inline(always)]
    fn run_command(&mut self) -> RunCommand {
        if self.kill_flag.load(Ordering::SeqCst) {
            RunCommand::Stop(StopReason::Killed)
        } else {
            RunCommand::Continue
        }
    }
}
