//! Scope tracker: value identity → open frame-scope handle.
//!
//! The association is keyed by [`ValueId`] and holds nothing of the value
//! itself, so it never extends a value's lifetime. Entries are removed by an
//! explicit remove or by the value's reclaim hook when its last handle
//! drops; either path takes the handle out, and the handle type guarantees a
//! scope is released at most once.

use crate::types::{ScopeHandle, ValueId};
use std::collections::HashMap;

#[derive(Default)]
pub struct ScopeTracker {
    bindings: HashMap<ValueId, ScopeHandle>,
}

impl ScopeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `value`'s frame-scope is `handle`.
    ///
    /// Returns the displaced handle if a binding already existed; the caller
    /// decides whether to release it.
    pub fn bind(&mut self, value: ValueId, handle: ScopeHandle) -> Option<ScopeHandle> {
        self.bindings.insert(value, handle)
    }

    /// Remove and return the binding for `value`, if any.
    pub fn take(&mut self, value: ValueId) -> Option<ScopeHandle> {
        self.bindings.remove(&value)
    }

    /// Whether `value` currently has an open binding.
    pub fn is_bound(&self, value: ValueId) -> bool {
        self.bindings.contains_key(&value)
    }

    /// Number of open bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
