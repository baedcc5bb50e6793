//! Shared types for frame-scoped context propagation.
//!
//! Identifiers are opaque tokens handed out by the frame platform; context
//! values are identity-distinguished handles around caller payloads. Nothing
//! in this module performs locking or platform calls.

use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Identifier of one execution frame instance.
///
/// Supplied by the [`FramePlatform`](crate::platform::FramePlatform).
/// [`FrameId::ROOT`] is the sentinel for "no active frame".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

impl FrameId {
    /// Sentinel identifier: no frame / root of the hierarchy.
    pub const ROOT: FrameId = FrameId(0);

    /// Wrap a raw platform-assigned identifier.
    pub fn new(raw: u64) -> Self {
        FrameId(raw)
    }

    /// Whether this is the root sentinel.
    pub fn is_root(&self) -> bool {
        *self == FrameId::ROOT
    }

    /// Raw identifier value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame:{}", self.0)
    }
}

/// The currently active frame and its immediate parent, as reported by the
/// platform. Both fields are [`FrameId::ROOT`] when no frame is active.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameCursor {
    pub frame: FrameId,
    pub parent: FrameId,
}

impl FrameCursor {
    /// Cursor denoting "no active frame".
    pub fn rootless() -> Self {
        FrameCursor {
            frame: FrameId::ROOT,
            parent: FrameId::ROOT,
        }
    }
}

/// Opaque token for an open frame-scope.
///
/// Deliberately neither `Clone` nor `Copy`: the only way to consume a handle
/// is to move it into
/// [`FramePlatform::release_scope`](crate::platform::FramePlatform::release_scope),
/// so a scope is released at most once by this crate.
#[derive(Debug, PartialEq, Eq)]
pub struct ScopeHandle(u64);

impl ScopeHandle {
    /// Wrap a raw platform-assigned scope token.
    pub fn new(raw: u64) -> Self {
        ScopeHandle(raw)
    }

    /// Raw token value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

static NEXT_VALUE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`ContextValue`].
///
/// Assigned at construction from a monotonic counter, never derived from an
/// allocation address, so ids are never reused within a process lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ValueId(u64);

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "value:{}", self.0)
    }
}

/// Hook invoked when the last strong handle to a value drops.
pub(crate) type ReclaimHook = Box<dyn FnOnce(ValueId) + Send>;

pub(crate) struct ValueInner {
    id: ValueId,
    payload: Box<dyn Any + Send + Sync>,
    reclaim: Mutex<Option<ReclaimHook>>,
}

impl Drop for ValueInner {
    fn drop(&mut self) {
        // Last strong handle is gone; tell the manager that bound this value
        // so its frame-scope is released without an explicit remove call.
        if let Some(hook) = self.reclaim.lock().take() {
            hook(self.id);
        }
    }
}

/// Caller-supplied context payload with identity semantics.
///
/// A `ContextValue` is a cheap-clone handle (`Arc` inner). Equality and
/// hashing use the value's [`ValueId`], never payload content: two values
/// constructed from equal payloads are distinct.
///
/// The handle doubles as the lifetime anchor for the frame-scope that hosts
/// it: when the last clone drops, the scope bound to this value by a
/// [`ContextManager`](crate::manager::ContextManager) is released
/// automatically.
pub struct ContextValue {
    inner: Arc<ValueInner>,
}

impl ContextValue {
    /// Wrap a payload in a new identity-bearing handle.
    pub fn new<T: Any + Send + Sync>(payload: T) -> Self {
        ContextValue {
            inner: Arc::new(ValueInner {
                id: ValueId(NEXT_VALUE_ID.fetch_add(1, Ordering::Relaxed)),
                payload: Box::new(payload),
                reclaim: Mutex::new(None),
            }),
        }
    }

    /// This value's process-unique identity.
    pub fn id(&self) -> ValueId {
        self.inner.id
    }

    /// Borrow the payload as a concrete type.
    ///
    /// Returns `None` if the payload is of a different type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.payload.downcast_ref::<T>()
    }

    /// Register (or replace) the reclaim hook fired on last-handle drop.
    pub(crate) fn arm_reclaim(&self, hook: ReclaimHook) {
        *self.inner.reclaim.lock() = Some(hook);
    }

    /// Non-owning reference for registry storage.
    pub(crate) fn downgrade(&self) -> WeakContextValue {
        WeakContextValue {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl Clone for ContextValue {
    fn clone(&self) -> Self {
        ContextValue {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl PartialEq for ContextValue {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for ContextValue {}

impl std::hash::Hash for ContextValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextValue")
            .field("id", &self.inner.id)
            .finish()
    }
}

/// Weak counterpart of [`ContextValue`] held by the frame registry.
///
/// Does not extend the payload's lifetime; a failed upgrade means the value
/// was reclaimed and the key should read as absent.
pub(crate) struct WeakContextValue {
    inner: Weak<ValueInner>,
}

impl WeakContextValue {
    pub(crate) fn upgrade(&self) -> Option<ContextValue> {
        self.inner.upgrade().map(|inner| ContextValue { inner })
    }
}
