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

/// Why a run loop stopped before the algorithm finished.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum StopReason {
    /// The kill flag was observed at a safe point.
    Killed,
    /// The `run_for` deadline was reached.
    TimedOut,
    /// The `run_until` predicate returned `true`.
    Predicate,
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::Killed => write!(f, "killed"),
            StopReason::TimedOut => write!(f, "timed out"),
            StopReason::Predicate => write!(f, "stopped by predicate"),
        }
    }
}

/// The decision a monitor returns at a safe point.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RunCommand {
    #[default]
    Continue,
    Stop(StopReason),
}

impl std::fmt::Display for RunCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunCommand::Continue => write!(f, "Continue"),
            RunCommand::Stop(reason) => write!(f, "Stop: {}", reason),
        }
    }
}

/// Observer and controller of a run loop.
///
/// `run_command` is consulted at every safe point, which is before the first
/// batch and after every completed batch. It never sees a half-done batch.
pub trait RunMonitor {
    fn name(&self) -> &str;
    fn on_enter_run(&mut self);
    fn on_exit_run(&mut self);
    fn on_batch(&mut self);
    fn run_command(&mut self) -> RunCommand;
}

impl std::fmt::Debug for dyn RunMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RunMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn RunMonitor + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RunMonitor({})", self.name())
    }
}
