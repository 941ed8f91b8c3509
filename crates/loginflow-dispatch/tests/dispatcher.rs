//! Integration tests for the main-thread dispatcher.
//!
//! Submissions come from real OS threads; draining always happens on the
//! test thread, which owns the `Dispatcher`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use loginflow_dispatch::{DispatchHandle, Dispatcher, DrainReport};

// =========================================================================
// Ordering and exactly-once execution
// =========================================================================

#[test]
fn test_drain_runs_in_submission_order() {
    let mut d = Dispatcher::<Vec<u32>>::new();
    let h = d.handle();
    for i in 0..5 {
        h.submit(move |log| log.push(i));
    }

    let mut log = Vec::new();
    let report = d.drain(&mut log);

    assert_eq!(log, vec![0, 1, 2, 3, 4]);
    assert_eq!(report, DrainReport { executed: 5, panicked: 0 });
    assert_eq!(d.pending(), 0);
}

#[test]
fn test_drain_on_empty_queue_is_noop() {
    let mut d = Dispatcher::<Vec<u32>>::new();
    let mut log = Vec::new();

    let report = d.drain(&mut log);

    assert!(report.is_empty());
    assert!(log.is_empty());
    // Draining twice in a row is just as harmless.
    assert!(d.drain(&mut log).is_empty());
}

#[test]
fn test_concurrent_submits_all_run_once_in_fifo_order() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 50;

    let mut d = Dispatcher::<Vec<(usize, usize)>>::new();
    // Records the order in which submits actually entered the queue.
    // Held across record + submit so both orders agree.
    let order = Arc::new(Mutex::new(Vec::new()));

    let workers: Vec<_> = (0..THREADS)
        .map(|t| {
            let h = d.handle();
            let order = Arc::clone(&order);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let mut guard = order.lock().unwrap();
                    guard.push((t, i));
                    assert!(h.submit(move |log: &mut Vec<(usize, usize)>| log.push((t, i))));
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    let mut log = Vec::new();
    let report = d.drain(&mut log);

    assert_eq!(report.executed, THREADS * PER_THREAD);
    assert_eq!(log, *order.lock().unwrap());
    assert_eq!(d.pending(), 0);

    // A second drain has nothing left to run.
    assert!(d.drain(&mut log).is_empty());
    assert_eq!(log.len(), THREADS * PER_THREAD);
}

#[test]
fn test_two_threads_then_one_drain_preserves_order() {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let mut d = Dispatcher::<Vec<(&'static str, usize)>>::new();

    let first = d.handle();
    thread::spawn(move || {
        first.submit(|seen| seen.push(("first", COUNTER.fetch_add(1, Ordering::SeqCst))));
    })
    .join()
    .unwrap();

    let second = d.handle();
    thread::spawn(move || {
        second.submit(|seen| seen.push(("second", COUNTER.fetch_add(1, Ordering::SeqCst))));
    })
    .join()
    .unwrap();

    // Nothing ran off the owner thread.
    assert_eq!(COUNTER.load(Ordering::SeqCst), 0);

    let mut seen = Vec::new();
    d.drain(&mut seen);

    assert_eq!(seen, vec![("first", 0), ("second", 1)]);
}

// =========================================================================
// Re-entrancy
// =========================================================================

#[test]
fn test_callback_can_submit_without_deadlock() {
    struct Ctx {
        handle: DispatchHandle<Ctx>,
        runs: Vec<&'static str>,
    }

    let mut d = Dispatcher::<Ctx>::new();
    let mut ctx = Ctx {
        handle: d.handle(),
        runs: Vec::new(),
    };

    d.submit(|ctx: &mut Ctx| {
        ctx.runs.push("outer");
        ctx.handle.submit(|ctx: &mut Ctx| ctx.runs.push("inner"));
    });

    // The inner callback is queued for the next drain, not this one.
    assert_eq!(d.drain(&mut ctx).executed, 1);
    assert_eq!(ctx.runs, vec!["outer"]);
    assert_eq!(d.pending(), 1);

    assert_eq!(d.drain(&mut ctx).executed, 1);
    assert_eq!(ctx.runs, vec!["outer", "inner"]);
}

// =========================================================================
// Failure isolation
// =========================================================================

#[test]
fn test_panicking_callback_does_not_stop_the_batch() {
    let mut d = Dispatcher::<Vec<u32>>::new();
    d.submit(|log| log.push(1));
    d.submit(|_| panic!("callback failed"));
    d.submit(|log| log.push(3));

    let mut log = Vec::new();
    let report = d.drain(&mut log);

    assert_eq!(log, vec![1, 3]);
    assert_eq!(report, DrainReport { executed: 3, panicked: 1 });

    // The dispatcher keeps working after a panic.
    d.submit(|log| log.push(4));
    d.drain(&mut log);
    assert_eq!(log, vec![1, 3, 4]);
}

#[test]
fn test_unit_context_for_plain_actions() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut d = Dispatcher::new();
    let h: DispatchHandle = d.handle();

    let counter = Arc::clone(&hits);
    h.submit(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    d.drain(&mut ());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dropping_owner_releases_every_accepted_job() {
    let token = Arc::new(());
    let d = Dispatcher::<()>::new();
    let h = d.handle();

    // Queued before the drop, never drained.
    let held = Arc::clone(&token);
    assert!(h.submit(move |_| drop(held)));

    let racer = {
        let h = h.clone();
        let token = Arc::clone(&token);
        thread::spawn(move || {
            loop {
                let held = Arc::clone(&token);
                if !h.submit(move |_| drop(held)) {
                    return;
                }
            }
        })
    };

    thread::sleep(std::time::Duration::from_millis(5));
    drop(d);
    racer.join().unwrap();

    // Nothing is left stranded in a queue that only the handles keep alive.
    assert!(h.is_closed());
    assert_eq!(Arc::strong_count(&token), 1);
}
