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

use semigroups_core::{constants::Extended, word::word_to_string};
use semigroups_element::{perm::Perm, transf::Transf};
use semigroups_froidure_pin::{error::FroidurePinError, froidure_pin::FroidurePin};
use semigroups_runner::{report::ReportGuard, runner::Runnable, state::RunnerState};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

/// Swap, `n`-cycle and a rank `n - 1` idempotent: generators of the full
/// transformation monoid of degree `n`.
fn full_transformation_monoid(n: u8) -> FroidurePin<Transf<u8>> {
    let mut swap: Vec<u8> = (0..n).collect();
    swap.swap(0, 1);
    let cycle: Vec<u8> = (0..n).map(|i| (i + 1) % n).collect();
    let mut collapse: Vec<u8> = (0..n).collect();
    collapse[1] = 0;
    FroidurePin::from_generators(
        [swap, cycle, collapse]
            .into_iter()
            .map(|images| Transf::new(images).unwrap()),
    )
    .unwrap()
}

#[test]
fn test_symmetric_group_end_to_end() {
    let mut s = FroidurePin::from_generators(vec![
        Perm::<u8>::new(vec![1, 2, 0]).unwrap(),
        Perm::<u8>::new(vec![1, 0, 2]).unwrap(),
    ])
    .unwrap();
    assert!(!s.started());
    assert_eq!(s.size().unwrap(), 6);
    assert!(s.finished());
    assert!(s.success());
    assert_eq!(s.current_state(), RunnerState::NotRunning);
    assert_eq!(s.string_why_we_stopped(), "algorithm finished");
    assert_eq!(s.number_of_idempotents().unwrap(), 1);
}

#[test]
fn test_run_for_times_out_and_resumes() {
    let mut t6 = full_transformation_monoid(6);
    t6.set_batch_size(16);
    t6.run_for(Duration::from_nanos(1)).unwrap();
    assert!(t6.timed_out());
    assert!(!t6.finished());
    assert!(t6.current_size() < 46_656);

    let partial = t6.current_size();
    t6.run_for(Duration::from_millis(1)).unwrap();
    assert!(t6.current_size() >= partial);

    assert_eq!(t6.size().unwrap(), 46_656);
    assert!(t6.finished());
    assert!(!t6.timed_out());
}

#[test]
fn test_run_until_size_reaches_threshold() {
    let mut t5 = full_transformation_monoid(5);
    t5.set_batch_size(32);
    let progress = t5.progress();
    t5.run_until(move || progress.current_size() >= 500).unwrap();

    assert!(t5.stopped_by_predicate());
    assert!(t5.current_size() >= 500);
    assert!(t5.current_size() < 3125);
    assert!(!t5.finished());

    t5.run().unwrap();
    assert_eq!(t5.current_size(), 3125);
}

#[test]
fn test_kill_from_another_thread() {
    let mut t7 = full_transformation_monoid(7);
    t7.set_batch_size(64);
    let handle = t7.handle();
    let progress = t7.progress();

    thread::scope(|scope| {
        scope.spawn(|| {
            while progress.current_size() < 1000 {
                thread::yield_now();
            }
            handle.kill();
        });
        t7.run().unwrap();
    });

    assert!(t7.dead());
    assert!(!t7.finished());
    assert!(t7.current_size() >= 1000);
    assert_eq!(t7.string_why_we_stopped(), "killed");
    assert_eq!(t7.size().unwrap_err(), FroidurePinError::Killed);

    // A dead enumeration does nothing until it is reinitialised.
    let before = t7.current_size();
    t7.run().unwrap();
    assert_eq!(t7.current_size(), before);

    t7.init();
    assert!(!t7.dead());
    assert_eq!(t7.current_size(), 3);
}

#[test]
fn test_progress_is_monotonic_across_threads() {
    let mut t6 = full_transformation_monoid(6);
    t6.set_batch_size(128);
    let progress = t6.progress();
    let done = Arc::new(AtomicBool::new(false));

    let watcher = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut last = 0;
            let mut observations = 0u64;
            while !done.load(Ordering::Acquire) {
                let size = progress.current_size();
                assert!(size >= last, "size went backwards: {} < {}", size, last);
                last = size;
                observations += 1;
            }
            (last, observations)
        })
    };

    t6.run().unwrap();
    done.store(true, Ordering::Release);
    let (last, observations) = watcher.join().unwrap();
    assert!(observations > 0);
    assert!(last <= 46_656);
    assert!(t6.progress().snapshot().finished);
}

#[test]
fn test_adding_generators_matches_fresh_enumeration() {
    let cycle = Transf::<u8>::new(vec![1, 2, 3, 0]).unwrap();
    let swap = Transf::<u8>::new(vec![1, 0, 2, 3]).unwrap();
    let collapse = Transf::<u8>::new(vec![0, 0, 2, 3]).unwrap();

    let mut incremental = FroidurePin::from_generators(vec![cycle.clone()]).unwrap();
    assert_eq!(incremental.size().unwrap(), 4);
    incremental.add_generator(swap.clone()).unwrap();
    assert_eq!(incremental.size().unwrap(), 24);
    incremental.add_generator(collapse.clone()).unwrap();
    assert_eq!(incremental.size().unwrap(), 256);

    let mut fresh = FroidurePin::from_generators(vec![cycle, swap, collapse]).unwrap();
    assert_eq!(fresh.size().unwrap(), 256);
    assert_eq!(
        incremental.number_of_rules().unwrap(),
        fresh.number_of_rules().unwrap()
    );
    assert_eq!(
        incremental.number_of_idempotents().unwrap(),
        fresh.number_of_idempotents().unwrap()
    );

    for (lhs, rhs) in incremental.rules().unwrap() {
        assert!(
            incremental.equal_to(&lhs, &rhs).unwrap(),
            "{} != {}",
            word_to_string(&lhs),
            word_to_string(&rhs)
        );
    }
}

#[test]
fn test_partial_results_are_queryable() {
    let mut t5 = full_transformation_monoid(5);
    t5.set_batch_size(8);
    t5.enumerate(Extended::Finite(100)).unwrap();
    let size = t5.current_size();
    assert!(size >= 100);

    for i in 0..size {
        let word = t5.current_minimal_factorisation(i).unwrap();
        assert_eq!(
            &t5.to_element(&word).unwrap(),
            &t5.current_elements()[i]
        );
    }
    let rules = t5.current_rules();
    assert_eq!(rules.len(), t5.current_number_of_rules());
    for (lhs, rhs) in &rules {
        assert_eq!(t5.to_element(lhs).unwrap(), t5.to_element(rhs).unwrap());
    }
}

#[test]
fn test_reporting_does_not_change_results() {
    let _guard = ReportGuard::new(true);
    let mut t4 = full_transformation_monoid(4);
    t4.set_batch_size(32);
    assert_eq!(t4.size().unwrap(), 256);
    assert!(t4.statistics().batches > 1);
    t4.report_why_we_stopped();
}
