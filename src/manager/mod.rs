//! Context manager: frame-scoped key/value propagation.
//!
//! Owns the frame registry and scope tracker behind one re-entrant lock and
//! orchestrates them against the frame platform. Callers reach it through
//! three operations: get the nearest value for a key, set a value at the
//! current frame, remove a value's scope.

pub mod registry;
pub mod tracker;

pub use registry::FrameRegistry;
pub use tracker::ScopeTracker;

use crate::concurrency::ReentrantState;
use crate::error::ContextError;
use crate::platform::FramePlatform;
use crate::types::{ContextValue, ValueId};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// The three context propagation operations.
///
/// Implemented by [`ContextManager`]; higher layers (span processors,
/// baggage APIs) should be written against this trait so tests can
/// substitute their own propagation.
pub trait ContextPropagator: Send + Sync {
    /// Nearest enclosing value for `key`, or `None`.
    fn get_current_value(&self, key: &str) -> Option<ContextValue>;

    /// Associate `value` with `key` at the current frame, creating and
    /// entering a child frame-scope when required.
    fn set_current_value(&self, key: &str, value: &ContextValue) -> Result<(), ContextError>;

    /// Release the frame-scope bound to `value`. No-op when unbound.
    fn remove_value(&self, key: &str, value: &ContextValue);
}

struct ManagerState {
    registry: FrameRegistry,
    tracker: ScopeTracker,
}

struct ManagerInner {
    platform: Arc<dyn FramePlatform>,
    state: ReentrantState<ManagerState>,
}

impl ManagerInner {
    /// Teardown path shared by explicit removal and value reclaim.
    fn release_binding(&self, value: ValueId) {
        let handle = self.state.with_mut(|state| state.tracker.take(value));
        match handle {
            Some(handle) => {
                debug!(%value, scope = handle.raw(), "releasing frame-scope");
                self.platform.release_scope(handle);
            }
            None => trace!(%value, "no open binding; release ignored"),
        }
    }
}

/// Frame-scoped context propagation manager.
///
/// Cheap to clone (`Arc` inner) and safe to share across threads. Construct
/// one instance per propagation domain and inject it where context access is
/// needed; independent instances are fully isolated, which tests rely on.
///
/// # Semantics
///
/// * `set` isolates its value in a fresh child frame whenever the current
///   frame has no registry entry yet, or already defines the same key. Code
///   re-entering the original frame after that scope closes therefore never
///   sees the newer value.
/// * `get` consults the current frame, falling back to its immediate parent
///   when the current frame has no entry at all. It never creates frames.
/// * A value's frame-scope is released by
///   [`remove_value`](ContextPropagator::remove_value) or automatically when
///   the last [`ContextValue`] handle drops, whichever comes first.
#[derive(Clone)]
pub struct ContextManager {
    inner: Arc<ManagerInner>,
}

impl ContextManager {
    pub fn new(platform: Arc<dyn FramePlatform>) -> Self {
        ContextManager {
            inner: Arc::new(ManagerInner {
                platform,
                state: ReentrantState::new(ManagerState {
                    registry: FrameRegistry::new(),
                    tracker: ScopeTracker::new(),
                }),
            }),
        }
    }

    /// Number of frame-scopes currently held open through this manager.
    pub fn open_scopes(&self) -> usize {
        self.inner.state.with(|state| state.tracker.len())
    }

    /// Number of frames with at least one registered key.
    pub fn registered_frames(&self) -> usize {
        self.inner.state.with(|state| state.registry.len())
    }

    /// Arm the drop hook that routes a value's reclaim back into this
    /// manager. The hook holds only a weak pointer, so armed values never
    /// keep the manager alive.
    fn arm_reclaim(&self, value: &ContextValue) {
        let weak = Arc::downgrade(&self.inner);
        value.arm_reclaim(Box::new(move |id| {
            if let Some(inner) = weak.upgrade() {
                trace!(value = %id, "last handle dropped; reclaiming scope");
                inner.release_binding(id);
            }
        }));
    }
}

impl ContextPropagator for ContextManager {
    fn get_current_value(&self, key: &str) -> Option<ContextValue> {
        let cursor = self.inner.platform.current_frame();
        self.inner.state.with(|state| {
            let frame = if state.registry.has_frame(cursor.frame) {
                cursor.frame
            } else if state.registry.has_frame(cursor.parent) {
                cursor.parent
            } else {
                return None;
            };
            state.registry.lookup(frame, key)
        })
    }

    fn set_current_value(&self, key: &str, value: &ContextValue) -> Result<(), ContextError> {
        let cursor = self.inner.platform.current_frame();
        let guard = self.inner.state.enter();

        // A fresh child frame-scope is needed when the current frame has no
        // entry, or when it already defines this key (overwrites must not
        // mutate state visible to code re-entering the current frame).
        let needs_scope = guard.with(|state| {
            !state.registry.has_frame(cursor.frame) || state.registry.defines(cursor.frame, key)
        });

        let mut frame = cursor.frame;
        if needs_scope {
            let entered = self.inner.platform.create_child_frame(cursor.frame)?;
            frame = entered.frame;

            let displaced = guard.with_mut(|state| {
                state.registry.init_frame(entered.frame);
                state.tracker.bind(value.id(), entered.scope)
            });
            if let Some(displaced) = displaced {
                // The prior scope stays open until the value is removed or
                // reclaimed; only this newest binding is released then.
                warn!(
                    value = %value.id(),
                    scope = displaced.raw(),
                    "value re-bound; displaced frame-scope left open"
                );
            }
            self.arm_reclaim(value);
        }

        guard.with_mut(|state| state.registry.put(frame, key, value));
        debug!(%frame, key, value = %value.id(), new_scope = needs_scope, "context value set");
        Ok(())
    }

    fn remove_value(&self, key: &str, value: &ContextValue) {
        trace!(key, value = %value.id(), "context value removal requested");
        self.inner.release_binding(value.id());
    }
}
