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

//! # Runner
//!
//! Run control for long-running, interruptible and resumable algorithms. The
//! runner decides *when* and *for how long* an algorithm advances; the
//! algorithm itself only knows how to advance by one batch and whether it is
//! done.
//!
//! ## Pieces
//!
//! - `Algorithm`: the capability a concrete algorithm provides, namely
//!   `run_batch` and `is_finished`.
//! - `Runner`: the state machine, composed into the concrete algorithm type.
//!   It owns an `Arc` with the atomic state and the one-way kill flag.
//! - `Runnable`: extension trait giving every `Algorithm` that exposes its
//!   `Runner` the full run-control surface (`run`, `run_for`, `run_until`,
//!   `kill`, status queries, stop-reason reporting).
//! - `RunnerHandle`: a cheap, `Send + Sync` clone of the shared state that a
//!   second thread uses to `kill` and to poll `dead`.
//!
//! ## Safe points
//!
//! The run loop consults its monitors before the first batch and after every
//! completed batch. A batch that is in progress when `kill` is called
//! completes before the kill is observed, and a `run_for` deadline can be
//! overrun by at most one batch.
//!
//! ## Usage
//!
//! ```rust
//! use semigroups_runner::error::RunnerError;
//! use semigroups_runner::runner::{Algorithm, Runnable, Runner};
//!
//! struct Countdown {
//!     runner: Runner,
//!     left: u32,
//! }
//!
//! impl Algorithm for Countdown {
//!     type Error = RunnerError;
//!
//!     fn run_batch(&mut self) -> Result<(), RunnerError> {
//!         self.left -= 1;
//!         Ok(())
//!     }
//!
//!     fn is_finished(&self) -> bool {
//!         self.left == 0
//!     }
//! }
//!
//! impl Runnable for Countdown {
//!     fn runner(&self) -> &Runner {
//!         &self.runner
//!     }
//!
//!     fn runner_mut(&mut self) -> &mut Runner {
//!         &mut self.runner
//!     }
//! }
//!
//! let mut countdown = Countdown { runner: Runner::new(), left: 3 };
//! assert!(!countdown.started());
//! countdown.run().unwrap();
//! assert!(countdown.finished());
//! assert_eq!(countdown.statistics().batches, 3);
//! ```

use crate::{
    error::RunnerError,
    monitor::{
        composite::CompositeMonitor,
        interrupt::InterruptMonitor,
        predicate::PredicateMonitor,
        run_monitor::{RunCommand, RunMonitor, StopReason},
        time_limit::TimeLimitMonitor,
    },
    report::reporting_enabled,
    state::RunnerState,
    stats::{RunStatistics, RunStatisticsBuilder},
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU8, Ordering},
};
use std::time::{Duration, Instant};

/// State shared between the compute thread and any `RunnerHandle`.
#[derive(Debug, Default)]
struct Shared {
    state: AtomicU8,
    kill: AtomicBool,
}

impl Shared {
    fn with(state: RunnerState, killed: bool) -> Self {
        Self {
            state: AtomicU8::new(state as u8),
            kill: AtomicBool::new(killed),
        }
    }

    #[inline]
    fn state(&self) -> RunnerState {
        RunnerState::from_u8(self.state.load(Ordering::SeqCst))
    }

    #[inline]
    fn set_state(&self, state: RunnerState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    #[inline]
    fn kill_requested(&self) -> bool {
        self.kill.load(Ordering::SeqCst)
    }

    /// Raises the kill flag. An idle runner becomes `Dead` right away; a
    /// running one is transitioned by its compute thread at the next safe
    /// point.
    fn kill(&self) {
        self.kill.store(true, Ordering::SeqCst);
        let _ = self
            .state
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |raw| {
                let state = RunnerState::from_u8(raw);
                if state.is_running() || state == RunnerState::Dead {
                    None
                } else {
                    Some(RunnerState::Dead as u8)
                }
            });
    }
}

/// A thread-safe handle onto a runner, for killing it and polling its state
/// from another thread.
#[derive(Debug, Clone)]
pub struct RunnerHandle {
    shared: Arc<Shared>,
}

impl RunnerHandle {
    /// Requests termination. Does not wait for the run loop to notice.
    #[inline]
    pub fn kill(&self) {
        self.shared.kill();
    }

    /// Returns `true` once the runner has transitioned to `Dead`.
    #[inline]
    pub fn dead(&self) -> bool {
        self.shared.state() == RunnerState::Dead
    }

    #[inline]
    pub fn current_state(&self) -> RunnerState {
        self.shared.state()
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.shared.state().is_running()
    }

    #[inline]
    pub fn kill_requested(&self) -> bool {
        self.shared.kill_requested()
    }
}

/// The run-control state machine.
#[derive(Debug)]
pub struct Runner {
    shared: Arc<Shared>,
    run_for_duration: Duration,
    start_time: Option<Instant>,
    statistics: RunStatistics,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Runner {
    /// The clone starts with the same state but owns its own kill flag, so
    /// handles of the source do not reach the copy.
    fn clone(&self) -> Self {
        Self {
            shared: Arc::new(Shared::with(
                self.shared.state(),
                self.shared.kill_requested(),
            )),
            run_for_duration: self.run_for_duration,
            start_time: self.start_time,
            statistics: self.statistics.clone(),
        }
    }
}

impl Runner {
    /// Creates a runner in the `NeverRun` state.
    #[inline]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            run_for_duration: Duration::ZERO,
            start_time: None,
            statistics: RunStatistics::default(),
        }
    }

    /// Returns a handle that can kill this runner from another thread.
    #[inline]
    pub fn handle(&self) -> RunnerHandle {
        RunnerHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    #[inline]
    pub fn current_state(&self) -> RunnerState {
        self.shared.state()
    }

    /// `true` once any run invocation has begun since construction or `init`.
    #[inline]
    pub fn started(&self) -> bool {
        self.current_state() != RunnerState::NeverRun
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.current_state().is_running()
    }

    #[inline]
    pub fn running_for(&self) -> bool {
        self.current_state() == RunnerState::RunningFor
    }

    #[inline]
    pub fn running_until(&self) -> bool {
        self.current_state() == RunnerState::RunningUntil
    }

    /// The budget passed to the most recent `run_for`, zero if none.
    #[inline]
    pub fn running_for_how_long(&self) -> Duration {
        self.run_for_duration
    }

    /// `true` if the last `run_for` hit its deadline, or if the current
    /// `run_for` has already exceeded it.
    pub fn timed_out(&self) -> bool {
        match self.current_state() {
            RunnerState::TimedOut => true,
            RunnerState::RunningFor => self
                .start_time
                .is_some_and(|start| start.elapsed() >= self.run_for_duration),
            _ => false,
        }
    }

    #[inline]
    pub fn stopped_by_predicate(&self) -> bool {
        self.current_state() == RunnerState::StoppedByPredicate
    }

    #[inline]
    pub fn dead(&self) -> bool {
        self.current_state() == RunnerState::Dead
    }

    #[inline]
    pub fn kill_requested(&self) -> bool {
        self.shared.kill_requested()
    }

    /// Requests termination; see `RunnerHandle::kill`.
    #[inline]
    pub fn kill(&self) {
        tracing::debug!(state = %self.current_state(), "kill requested");
        self.shared.kill();
    }

    /// Resets the runner to `NeverRun`, clearing the kill flag, the last
    /// `run_for` budget and the statistics. Handles stay attached.
    ///
    /// Must not be called while a run is in progress.
    pub fn init(&mut self) {
        debug_assert!(
            !self.running(),
            "called `Runner::init` while a run is in progress"
        );
        self.shared.kill.store(false, Ordering::SeqCst);
        self.shared.set_state(RunnerState::NeverRun);
        self.run_for_duration = Duration::ZERO;
        self.start_time = None;
        self.statistics = RunStatistics::default();
        tracing::debug!("runner reinitialized");
    }

    /// Statistics of the most recent run.
    #[inline]
    pub fn statistics(&self) -> &RunStatistics {
        &self.statistics
    }

    fn begin(&mut self, mode: RunnerState, run_for: Option<Duration>) {
        debug_assert!(mode.is_running());
        if let Some(duration) = run_for {
            self.run_for_duration = duration;
        }
        self.start_time = Some(Instant::now());
        self.statistics.batches = 0;
        self.statistics.run_duration = Duration::ZERO;
        self.shared.set_state(mode);
        tracing::debug!(state = %mode, "run started");
    }

    #[inline]
    fn record_batch(&mut self) {
        self.statistics.batches += 1;
        self.statistics.total_batches += 1;
    }

    fn finish(&mut self, reason: Option<StopReason>) {
        let next = match reason {
            None => RunnerState::NotRunning,
            Some(StopReason::Killed) => RunnerState::Dead,
            Some(StopReason::TimedOut) => RunnerState::TimedOut,
            Some(StopReason::Predicate) => RunnerState::StoppedByPredicate,
        };
        self.shared.set_state(next);
        // A kill that raced with the end of the loop still wins.
        if self.shared.kill_requested() {
            self.shared.set_state(RunnerState::Dead);
        }
        self.statistics = RunStatisticsBuilder::new()
            .batches(self.statistics.batches)
            .total_batches(self.statistics.total_batches)
            .run_duration(self.start_time.map_or(Duration::ZERO, |s| s.elapsed()))
            .build();
        tracing::debug!(
            state = %self.current_state(),
            batches = self.statistics.batches,
            "run stopped"
        );
    }
}

/// The capability a concrete algorithm supplies to the runner.
pub trait Algorithm {
    type Error: From<RunnerError>;

    /// Performs one batch of work. Must leave the algorithm in a consistent,
    /// observable state when it returns.
    fn run_batch(&mut self) -> Result<(), Self::Error>;

    /// `true` once no further batch can make progress.
    fn is_finished(&self) -> bool;
}

/// Run control for any `Algorithm` that exposes its composed `Runner`.
pub trait Runnable: Algorithm {
    fn runner(&self) -> &Runner;
    fn runner_mut(&mut self) -> &mut Runner;

    /// Runs until the algorithm finishes or the runner is killed.
    fn run(&mut self) -> Result<(), Self::Error> {
        drive(self, RunnerState::RunningToFinish, None, None)
    }

    /// Runs until the algorithm finishes, `duration` elapses, or the runner is
    /// killed.
    fn run_for(&mut self, duration: Duration) -> Result<(), Self::Error> {
        let monitor: Box<dyn RunMonitor> = Box::new(TimeLimitMonitor::new(duration));
        drive(self, RunnerState::RunningFor, Some(duration), Some(monitor))
    }

    /// `run_for` with a signed nanosecond budget; negative budgets are rejected
    /// with `RunnerError::InvalidArgument` before any state changes.
    fn run_for_nanos(&mut self, nanos: i64) -> Result<(), Self::Error> {
        if nanos < 0 {
            return Err(RunnerError::InvalidArgument(format!(
                "expected a non-negative duration, found {} ns",
                nanos
            ))
            .into());
        }
        self.run_for(Duration::from_nanos(nanos.unsigned_abs()))
    }

    /// Runs until `predicate` returns `true`, the algorithm finishes, or the
    /// runner is killed.
    fn run_until<P>(&mut self, predicate: P) -> Result<(), Self::Error>
    where
        P: FnMut() -> bool,
    {
        let monitor: Box<dyn RunMonitor + '_> = Box::new(PredicateMonitor::new(predicate));
        drive(self, RunnerState::RunningUntil, None, Some(monitor))
    }

    /// Returns the algorithm to its initial state. Implementors that hold
    /// algorithm state override this and call `Runner::init` themselves.
    fn init(&mut self) {
        self.runner_mut().init();
    }

    /// `true` once the algorithm has run to completion and is not running.
    fn finished(&self) -> bool {
        !self.runner().running() && self.is_finished()
    }

    /// Whether the algorithm completed successfully. The default equates this
    /// with `finished`.
    fn success(&self) -> bool {
        self.finished()
    }

    fn stopped(&self) -> bool {
        let runner = self.runner();
        self.finished() || runner.timed_out() || runner.dead() || runner.stopped_by_predicate()
    }

    fn started(&self) -> bool {
        self.runner().started()
    }

    fn running(&self) -> bool {
        self.runner().running()
    }

    fn running_for(&self) -> bool {
        self.runner().running_for()
    }

    fn running_until(&self) -> bool {
        self.runner().running_until()
    }

    fn running_for_how_long(&self) -> Duration {
        self.runner().running_for_how_long()
    }

    fn timed_out(&self) -> bool {
        self.runner().timed_out()
    }

    fn stopped_by_predicate(&self) -> bool {
        self.runner().stopped_by_predicate()
    }

    fn dead(&self) -> bool {
        self.runner().dead()
    }

    fn current_state(&self) -> RunnerState {
        self.runner().current_state()
    }

    fn kill(&self) {
        self.runner().kill();
    }

    fn handle(&self) -> RunnerHandle {
        self.runner().handle()
    }

    fn statistics(&self) -> &RunStatistics {
        self.runner().statistics()
    }

    /// A human-readable explanation of the most recent stop.
    fn string_why_we_stopped(&self) -> String {
        let runner = self.runner();
        match runner.current_state() {
            RunnerState::Dead => "killed".to_string(),
            RunnerState::TimedOut => format!(
                "timed out after {:?}",
                runner.running_for_how_long()
            ),
            RunnerState::StoppedByPredicate => "stopped by predicate".to_string(),
            state if state.is_running() => format!("still {}", state),
            _ if self.is_finished() => "algorithm finished".to_string(),
            RunnerState::NeverRun => "not yet run".to_string(),
            _ => "not running".to_string(),
        }
    }

    /// Logs `string_why_we_stopped` at `info` level.
    fn report_why_we_stopped(&self) {
        tracing::info!(
            reason = %self.string_why_we_stopped(),
            batches = self.runner().statistics().batches,
            "why we stopped"
        );
    }
}

/// The run loop shared by `run`, `run_for` and `run_until`.
fn drive<A>(
    algorithm: &mut A,
    mode: RunnerState,
    run_for: Option<Duration>,
    extra: Option<Box<dyn RunMonitor + '_>>,
) -> Result<(), A::Error>
where
    A: Runnable + ?Sized,
{
    if algorithm.is_finished() {
        tracing::trace!(state = %mode, "algorithm already finished; nothing to run");
        return Ok(());
    }
    if algorithm.runner().dead() {
        tracing::debug!(state = %mode, "runner is dead; call `init` before running again");
        return Ok(());
    }

    let shared = Arc::clone(&algorithm.runner().shared);
    let mut monitor = CompositeMonitor::with_capacity(2);
    monitor.add_monitor(InterruptMonitor::new(&shared.kill));
    if let Some(extra) = extra {
        monitor.add_monitor_boxed(extra);
    }

    algorithm.runner_mut().begin(mode, run_for);
    monitor.on_enter_run();

    let outcome = loop {
        if algorithm.is_finished() {
            break Ok(None);
        }
        if let RunCommand::Stop(reason) = monitor.run_command() {
            break Ok(Some(reason));
        }
        if let Err(err) = algorithm.run_batch() {
            break Err(err);
        }
        algorithm.runner_mut().record_batch();
        monitor.on_batch();
    };

    monitor.on_exit_run();

    match outcome {
        Ok(reason) => {
            algorithm.runner_mut().finish(reason);
            if reporting_enabled() {
                algorithm.report_why_we_stopped();
            }
            Ok(())
        }
        Err(err) => {
            // The step failed; the batch boundary before it is still consistent.
            algorithm.runner_mut().finish(None);
            Err(err)
        }
    }
}
