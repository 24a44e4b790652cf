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

//! # Progress Reporting Toggle
//!
//! A single process-wide flag decides whether long-running algorithms emit
//! progress lines (through `tracing` at `info` level). The flag is never set
//! directly; a `ReportGuard` sets it for the lifetime of the guard and
//! restores the previous value when dropped, so nested guards behave like a
//! stack.
//!
//! ## Usage
//!
//! ```rust
//! use semigroups_runner::report::{ReportGuard, reporting_enabled};
//!
//! assert!(!reporting_enabled());
//! {
//!     let _guard = ReportGuard::new(true);
//!     assert!(reporting_enabled());
//! }
//! assert!(!reporting_enabled());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

static REPORTING: AtomicBool = AtomicBool::new(false);

/// Returns `true` while at least the innermost live `ReportGuard` enabled reporting.
#[inline]
pub fn reporting_enabled() -> bool {
    REPORTING.load(Ordering::Relaxed)
}

/// Scoped setter for the reporting flag.
#[derive(Debug)]
#[must_use = "reporting is restored as soon as the guard is dropped"]
pub struct ReportGuard {
    previous: bool,
}

impl ReportGuard {
    /// Sets the reporting flag to `enabled` until the guard is dropped.
    pub fn new(enabled: bool) -> Self {
        let previous = REPORTING.swap(enabled, Ordering::Relaxed);
        tracing::debug!(enabled, previous, "report guard installed");
        Self { previous }
    }
}

impl Default for ReportGuard {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Drop for ReportGuard {
    fn drop(&mut self) {
        REPORTING.store(self.previous, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // The flag is process-wide; serialize the tests touching it.
    static LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_guard_restores_previous_value() {
        let _lock = LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = reporting_enabled();
        {
            let _guard = ReportGuard::new(!before);
            assert_eq!(reporting_enabled(), !before);
        }
        assert_eq!(reporting_enabled(), before);
    }

    #[test]
    fn test_nested_guards_unwind_in_order() {
        let _lock = LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let outer = ReportGuard::new(true);
        assert!(reporting_enabled());
        {
            let _inner = ReportGuard::new(false);
            assert!(!reporting_enabled());
        }
        assert!(reporting_enabled());
        drop(outer);
    }
}
