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

//! # Shared Enumeration Progress
//!
//! A concurrent view of how far an enumeration has come, readable from any
//! thread while the compute thread is inside `run`, `run_for` or `run_until`.
//!
//! ## Motivation
//!
//! The enumerator itself is mutably borrowed for the whole duration of a run,
//! so neither a `run_until` predicate nor a watcher thread can call
//! `current_size` on it. The enumerator instead publishes a `Progress`
//! snapshot after every completed batch, and hands out `ProgressHandle`s that
//! read it.
//!
//! ## Highlights
//!
//! - `current_size()` is a lock-free atomic read, cheap enough to poll from a
//!   predicate at every safe point.
//! - `snapshot()` returns all counters from the same batch boundary, so the
//!   rule count never runs ahead of the size it belongs to.
//! - Published values change only at batch boundaries; a partially processed
//!   batch is never visible.
//!
//! ## Usage
//!
//! ```rust
//! use semigroups_froidure_pin::progress::ProgressHandle;
//!
//! let handle = ProgressHandle::new();
//! assert_eq!(handle.current_size(), 0);
//! assert!(!handle.snapshot().finished);
//! ```

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

/// Counters describing an enumeration at one batch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub size: usize,
    pub number_of_rules: usize,
    pub max_word_length: usize,
    pub finished: bool,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Progress(size: {}, rules: {}, max_word_length: {}, finished: {})",
            self.size, self.number_of_rules, self.max_word_length, self.finished
        )
    }
}

#[derive(Debug, Default)]
struct Published {
    size: AtomicUsize,
    snapshot: Mutex<Progress>,
}

/// A cloneable, thread-safe reader of published `Progress`.
#[derive(Debug, Clone, Default)]
pub struct ProgressHandle {
    inner: Arc<Published>,
}

impl ProgressHandle {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Size at the most recent batch boundary.
    #[inline]
    pub fn current_size(&self) -> usize {
        self.inner.size.load(Ordering::Acquire)
    }

    /// All counters at the most recent batch boundary.
    pub fn snapshot(&self) -> Progress {
        *self
            .inner
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn publish(&self, progress: Progress) {
        let mut guard = self
            .inner
            .snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = progress;
        self.inner.size.store(progress.size, Ordering::Release);
    }
}

impl std::fmt::Display for ProgressHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.snapshot())
    }
}
