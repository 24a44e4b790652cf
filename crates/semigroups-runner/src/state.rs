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

//! # Runner States
//!
//! The eight states of the run-control state machine. A runner is in exactly
//! one of them at any instant. States are stored as a `u8` inside an atomic so
//! that a second thread can observe them through a `RunnerHandle`.
//!
//! ```text
//! NeverRun ──► RunningToFinish ─┐
//!          ├─► RunningFor ──────┼─► NotRunning | TimedOut | StoppedByPredicate | Dead
//!          └─► RunningUntil ────┘
//! ```
//!
//! `init` returns to `NeverRun` from any state, `Dead` included.

/// The state of a runner.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum RunnerState {
    /// No run has been started since construction or the last `init`.
    #[default]
    NeverRun = 0,
    /// Inside `run`.
    RunningToFinish = 1,
    /// Inside `run_for`.
    RunningFor = 2,
    /// Inside `run_until`.
    RunningUntil = 3,
    /// The last `run_for` reached its deadline before the algorithm finished.
    TimedOut = 4,
    /// The last `run_until` stopped because its predicate returned `true`.
    StoppedByPredicate = 5,
    /// Not running; the last run ended because the algorithm finished.
    NotRunning = 6,
    /// Killed. Absorbing until `init`.
    Dead = 7,
}

impl RunnerState {
    /// Decodes a state previously stored with `as u8`.
    ///
    /// # Panics
    ///
    /// Panics if `raw` is not a valid discriminant.
    #[inline]
    pub const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => RunnerState::NeverRun,
            1 => RunnerState::RunningToFinish,
            2 => RunnerState::RunningFor,
            3 => RunnerState::RunningUntil,
            4 => RunnerState::TimedOut,
            5 => RunnerState::StoppedByPredicate,
            6 => RunnerState::NotRunning,
            7 => RunnerState::Dead,
            _ => panic!("called `RunnerState::from_u8` with an invalid discriminant"),
        }
    }

    /// Returns `true` for the three running states.
    #[inline]
    pub const fn is_running(self) -> bool {
        matches!(
            self,
            RunnerState::RunningToFinish | RunnerState::RunningFor | RunnerState::RunningUntil
        )
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            RunnerState::NeverRun => "never_run",
            RunnerState::RunningToFinish => "running_to_finish",
            RunnerState::RunningFor => "running_for",
            RunnerState::RunningUntil => "running_until",
            RunnerState::TimedOut => "timed_out",
            RunnerState::StoppedByPredicate => "stopped_by_predicate",
            RunnerState::NotRunning => "not_running",
            RunnerState::Dead => "dead",
        }
    }
}

impl std::fmt::Display for RunnerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
