//! The main-thread dispatcher: a FIFO hand-off queue between arbitrary
//! threads and the one loop that owns UI state.
//!
//! Work produced on provider threads is wrapped in a closure, pushed onto
//! the queue through a [`DispatchHandle`], and executed later by the
//! owning loop when it calls [`Dispatcher::drain`] once per tick.
//!
//! ```text
//! worker thread ──submit()──┐
//! worker thread ──submit()──┼──→ [ Mutex<VecDeque<job>> ] ──drain()──→ owner loop
//! owner loop    ──submit()──┘
//! ```
//!
//! # Ownership split
//!
//! - [`Dispatcher`] is the single draining owner. It is
//!   `!Send`: once created on a thread it can only drain on that thread.
//! - [`DispatchHandle`] is the submit-only side. It is `Clone + Send + Sync`
//!   and can be handed to any task.
//!
//! # Context
//!
//! Jobs receive `&mut C`, where `C` is whatever the owner loop owns
//! (for the login flow, the controller). Plain zero-argument actions use
//! `C = ()`.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, trace, warn};

/// A deferred action, executed exactly once by the owner loop.
pub type PendingCallback<C> = Box<dyn FnOnce(&mut C) + Send + 'static>;

/// State shared between the owner and every handle.
struct Shared<C> {
    queue: Mutex<VecDeque<PendingCallback<C>>>,
    /// Set when the owning [`Dispatcher`] is dropped. Later submits are
    /// discarded instead of piling up in a queue nobody drains.
    closed: AtomicBool,
}

impl<C> Shared<C> {
    /// Locks the queue, recovering from poisoning.
    ///
    /// Callbacks never run while the lock is held, so a poisoned lock only
    /// means a thread panicked mid-push; the queue itself is still valid.
    fn lock(&self) -> MutexGuard<'_, VecDeque<PendingCallback<C>>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checks `closed` under the queue lock, so a push can never land
    /// after the owner's final sweep in `Drop`.
    fn push(&self, job: PendingCallback<C>) -> bool {
        let mut queue = self.lock();
        if self.closed.load(Ordering::Acquire) {
            drop(queue);
            warn!("dispatcher closed, dropping submitted callback");
            return false;
        }
        queue.push_back(job);
        true
    }
}

// ---------------------------------------------------------------------------
// DrainReport
// ---------------------------------------------------------------------------

/// Summary of one [`Dispatcher::drain`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Callbacks that ran (including ones that panicked).
    pub executed: usize,
    /// Callbacks that panicked. Their panic was caught and logged.
    pub panicked: usize,
}

impl DrainReport {
    /// `true` if nothing was queued.
    pub fn is_empty(&self) -> bool {
        self.executed == 0
    }
}

// ---------------------------------------------------------------------------
// Dispatcher (owner)
// ---------------------------------------------------------------------------

/// The draining side of the main-thread queue.
///
/// Create exactly one per owning loop and keep it for the lifetime of that
/// loop. Give [`handle`](Self::handle) clones to anything that needs to get
/// work back onto this thread.
pub struct Dispatcher<C: 'static = ()> {
    shared: Arc<Shared<C>>,
    /// Raw pointers are `!Send`, which pins the owner to its thread.
    _owner: PhantomData<*const ()>,
}

impl<C: 'static> Dispatcher<C> {
    /// Creates an empty dispatcher owned by the current thread.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                queue: Mutex::new(VecDeque::new()),
                closed: AtomicBool::new(false),
            }),
            _owner: PhantomData,
        }
    }

    /// Returns a new submit-only handle to this dispatcher's queue.
    pub fn handle(&self) -> DispatchHandle<C> {
        DispatchHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Enqueues an action from the owner thread itself.
    ///
    /// The action is not run inline; it runs on the next `drain`.
    pub fn submit<F>(&self, action: F)
    where
        F: FnOnce(&mut C) + Send + 'static,
    {
        self.shared.push(Box::new(action));
    }

    /// Number of actions waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.shared.lock().len()
    }

    /// Runs every action queued so far, in submission order.
    ///
    /// The whole queue is swapped out under the lock in one step, then the
    /// actions run with the lock released. Anything they submit lands in
    /// the fresh queue and runs on the following drain.
    ///
    /// A panicking action is caught and logged; the remaining actions in
    /// the batch still run.
    pub fn drain(&mut self, ctx: &mut C) -> DrainReport {
        let batch = std::mem::take(&mut *self.shared.lock());
        let mut report = DrainReport::default();

        for job in batch {
            report.executed += 1;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| job(ctx))) {
                report.panicked += 1;
                error!(
                    panic = panic_message(payload.as_ref()),
                    "dispatched callback panicked"
                );
            }
        }

        if !report.is_empty() {
            trace!(
                executed = report.executed,
                panicked = report.panicked,
                "dispatcher drained"
            );
        }
        report
    }
}

impl<C: 'static> Default for Dispatcher<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> Drop for Dispatcher<C> {
    fn drop(&mut self) {
        let unrun = {
            let mut queue = self.shared.lock();
            self.shared.closed.store(true, Ordering::Release);
            std::mem::take(&mut *queue)
        };
        // Dropped outside the lock: a job's captures may own handles.
        let leftover = unrun.len();
        drop(unrun);
        if leftover > 0 {
            warn!(leftover, "dispatcher dropped with callbacks still queued");
        }
    }
}

// ---------------------------------------------------------------------------
// DispatchHandle (submitters)
// ---------------------------------------------------------------------------

/// Submit-only handle to a [`Dispatcher`]. Cheap to clone, safe to send.
pub struct DispatchHandle<C: 'static = ()> {
    shared: Arc<Shared<C>>,
}

impl<C: 'static> DispatchHandle<C> {
    /// Enqueues `action` to run on the owner thread.
    ///
    /// Never runs the action inline and never blocks beyond lock
    /// contention. Returns `false` if the owning dispatcher is gone.
    pub fn submit<F>(&self, action: F) -> bool
    where
        F: FnOnce(&mut C) + Send + 'static,
    {
        self.shared.push(Box::new(action))
    }

    /// Like [`submit`](Self::submit), but an absent action is a no-op.
    pub fn submit_opt(&self, action: Option<PendingCallback<C>>) -> bool {
        match action {
            Some(job) => self.shared.push(job),
            None => false,
        }
    }

    /// `true` once the owning dispatcher has been dropped.
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }
}

// Manual impl: deriving would require `C: Clone`.
impl<C: 'static> Clone for DispatchHandle<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: 'static> std::fmt::Debug for DispatchHandle<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchHandle")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

// =========================================================================
// Tests
// =========================================================================
