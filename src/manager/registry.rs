//! Frame registry: per-frame context key/value bindings.
//!
//! Maps a frame identifier to the keys set at that exact frame. Lookups are
//! exact-frame only; the parent fallback is the context manager's job, using
//! the parent identifier the platform reports.
//!
//! Values are stored weakly. The registry never extends a context value's
//! lifetime: once every caller-held handle is gone, the stored reference goes
//! dead and the key reads as absent.

use crate::types::{ContextValue, FrameId, WeakContextValue};
use std::collections::HashMap;

#[derive(Default)]
pub struct FrameRegistry {
    frames: HashMap<FrameId, HashMap<String, WeakContextValue>>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored for `key` directly at `frame`, if it is still alive.
    pub fn lookup(&self, frame: FrameId, key: &str) -> Option<ContextValue> {
        self.frames
            .get(&frame)?
            .get(key)
            .and_then(WeakContextValue::upgrade)
    }

    /// Insert or overwrite the binding for `key` at `frame`, creating the
    /// per-frame map if absent.
    pub fn put(&mut self, frame: FrameId, key: &str, value: &ContextValue) {
        self.frames
            .entry(frame)
            .or_default()
            .insert(key.to_owned(), value.downgrade());
    }

    /// Ensure an (empty) entry exists for a freshly created frame.
    pub fn init_frame(&mut self, frame: FrameId) {
        self.frames.entry(frame).or_default();
    }

    /// Whether any entry exists for `frame`.
    pub fn has_frame(&self, frame: FrameId) -> bool {
        self.frames.contains_key(&frame)
    }

    /// Whether `frame`'s entry defines `key` (dead or alive).
    ///
    /// A dead binding still counts: the key was set at this frame, so a new
    /// set of the same key must isolate itself in a fresh child frame.
    pub fn defines(&self, frame: FrameId, key: &str) -> bool {
        self.frames
            .get(&frame)
            .is_some_and(|entry| entry.contains_key(key))
    }

    /// Number of registered frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
