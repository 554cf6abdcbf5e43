//! Process-wide lock for calls into a foreign runtime.
//!
//! Foreign runtimes (an embedded interpreter, a host scripting environment)
//! are typically not safe for concurrent entry. Every foreign-boundary agent
//! call therefore runs inside [`enter`], which guarantees at most one thread
//! is executing across the boundary at any moment, process-wide.
//!
//! The lock is reentrant per thread: a foreign callable that in turn invokes
//! another foreign agent on the same thread nests instead of deadlocking. Only
//! the outermost guard takes and releases the underlying mutex, and only the
//! outermost level is counted in [`stats`].
//!
//! ```
//! use yard_engine::agent::boundary;
//!
//! {
//!     let _outer = boundary::enter();
//!     let _inner = boundary::enter(); // same thread, no deadlock
//!     assert!(boundary::held_by_current_thread());
//! }
//! assert!(!boundary::held_by_current_thread());
//! ```

use std::cell::{Cell, RefCell};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

static BOUNDARY: Mutex<()> = Mutex::new(());
static ACQUISITIONS: AtomicU64 = AtomicU64::new(0);
static RELEASES: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static HELD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

/// Scope guard for the foreign boundary. Releases on drop, including during
/// unwinding. Not `Send`: it must be dropped on the thread that created it.
#[must_use = "the boundary is released as soon as the guard is dropped"]
pub struct BoundaryGuard {
    _not_send: PhantomData<*const ()>,
}

/// Lock counters since process start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundaryStats {
    /// Outermost acquisitions.
    pub acquisitions: u64,
    /// Outermost releases.
    pub releases: u64,
}

impl BoundaryStats {
    /// Acquisitions not yet matched by a release (0 or 1).
    #[must_use]
    pub fn outstanding(&self) -> u64 {
        self.acquisitions.saturating_sub(self.releases)
    }
}

/// Enter the foreign boundary, blocking until no other thread is inside.
pub fn enter() -> BoundaryGuard {
    let depth = DEPTH.with(Cell::get);
    if depth == 0 {
        // The mutex protects no data, so a poisoned lock is still usable.
        let guard = BOUNDARY.lock().unwrap_or_else(PoisonError::into_inner);
        HELD.with(|held| *held.borrow_mut() = Some(guard));
        ACQUISITIONS.fetch_add(1, Ordering::SeqCst);
        log::trace!("foreign boundary acquired");
    }
    DEPTH.with(|d| d.set(depth + 1));

    BoundaryGuard {
        _not_send: PhantomData,
    }
}

impl Drop for BoundaryGuard {
    fn drop(&mut self) {
        let depth = DEPTH.with(Cell::get).saturating_sub(1);
        DEPTH.with(|d| d.set(depth));
        if depth == 0 {
            RELEASES.fetch_add(1, Ordering::SeqCst);
            let guard = HELD.with(|held| held.borrow_mut().take());
            drop(guard);
            log::trace!("foreign boundary released");
        }
    }
}

/// True if this thread is currently inside the boundary.
#[must_use]
pub fn held_by_current_thread() -> bool {
    DEPTH.with(Cell::get) > 0
}

/// Snapshot of the process-wide counters.
#[must_use]
pub fn stats() -> BoundaryStats {
    // Releases first: a racing acquire can only make `outstanding` larger.
    let releases = RELEASES.load(Ordering::SeqCst);
    let acquisitions = ACQUISITIONS.load(Ordering::SeqCst);
    BoundaryStats {
        acquisitions,
        releases,
    }
}
