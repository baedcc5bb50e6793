//! Re-entrant state wrapper guarding the manager's registries.
//!
//! The frame registry and scope tracker form one atomic domain: a mutation
//! may need to consult and update both, and nested manager calls can arrive
//! on the thread that already holds the lock (platform callbacks, value
//! reclaim during unwind). A plain mutex would deadlock there, so the wrapper
//! is built on [`parking_lot::ReentrantMutex`].
//!
//! A re-entrant mutex only hands out shared references, so the state lives in
//! a [`RefCell`] and mutation happens through short, explicitly scoped
//! borrows. Callers must not invoke manager APIs (or anything that may
//! re-enter them, such as dropping the last handle to a context value) while
//! a borrow is live; holding the [`StateGuard`] across re-entry points is
//! fine.

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::cell::RefCell;

/// Interior state behind a re-entrant lock.
pub struct ReentrantState<T> {
    inner: ReentrantMutex<RefCell<T>>,
}

impl<T> ReentrantState<T> {
    pub fn new(value: T) -> Self {
        ReentrantState {
            inner: ReentrantMutex::new(RefCell::new(value)),
        }
    }

    /// Acquire the lock. Re-acquiring on the same thread does not block.
    pub fn enter(&self) -> StateGuard<'_, T> {
        StateGuard {
            guard: self.inner.lock(),
        }
    }

    /// Convenience: acquire, run one read-only step, release.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.enter().with(f)
    }

    /// Convenience: acquire, run one mutation step, release.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.enter().with_mut(f)
    }
}

/// Lock guard over [`ReentrantState`].
///
/// Each `with`/`with_mut` call opens and closes one interior borrow; between
/// calls no borrow is live, so same-thread re-entry through the owning lock
/// is safe at those points.
pub struct StateGuard<'a, T> {
    guard: ReentrantMutexGuard<'a, RefCell<T>>,
}

impl<T> StateGuard<'_, T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.guard.borrow())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.guard.borrow_mut())
    }
}
