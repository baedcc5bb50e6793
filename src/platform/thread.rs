//! In-process frame platform backed by per-thread frame stacks.
//!
//! Each thread owns a stack of entered frames; the top of the stack is that
//! thread's active frame. Frame identifiers are assigned from a shared
//! monotonic counter, so identifiers are unique across threads and the
//! [`FrameId::ROOT`] sentinel is never handed out.

use crate::error::PlatformError;
use crate::platform::{EnteredFrame, FramePlatform};
use crate::types::{FrameCursor, FrameId, ScopeHandle};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::thread::{self, ThreadId};
use tracing::{trace, warn};

struct ScopeRecord {
    frame: FrameId,
    thread: ThreadId,
}

#[derive(Default)]
struct PlatformState {
    next_frame: u64,
    next_scope: u64,
    /// Entered-frame stack per thread; absent entry means rootless.
    stacks: HashMap<ThreadId, Vec<FrameId>>,
    /// Creation parent of every live frame.
    parents: HashMap<FrameId, FrameId>,
    /// Open scopes by raw handle.
    scopes: HashMap<u64, ScopeRecord>,
}

/// In-process [`FramePlatform`] implementation.
///
/// Scope release restores the owning thread's stack to its pre-enter state:
/// closing a buried scope also closes every frame entered after it, matching
/// activity-scope semantics. Releasing a handle whose scope was already
/// closed is a no-op (logged at `warn!`).
#[derive(Default)]
pub struct ThreadFramePlatform {
    state: Mutex<PlatformState>,
}

impl ThreadFramePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and enter a frame nested under the calling thread's current
    /// frame. Convenience for instrumentation layers that model their own
    /// nesting on top of the platform.
    pub fn enter_frame(&self) -> Result<EnteredFrame, PlatformError> {
        let parent = self.current_frame().frame;
        self.create_child_frame(parent)
    }

    /// Depth of the calling thread's entered-frame stack.
    pub fn depth(&self) -> usize {
        let state = self.state.lock();
        state
            .stacks
            .get(&thread::current().id())
            .map_or(0, Vec::len)
    }
}

impl FramePlatform for ThreadFramePlatform {
    fn current_frame(&self) -> FrameCursor {
        let state = self.state.lock();
        let Some(stack) = state.stacks.get(&thread::current().id()) else {
            return FrameCursor::rootless();
        };
        match stack.last() {
            Some(&frame) => FrameCursor {
                frame,
                parent: state.parents.get(&frame).copied().unwrap_or(FrameId::ROOT),
            },
            None => FrameCursor::rootless(),
        }
    }

    fn create_child_frame(&self, parent: FrameId) -> Result<EnteredFrame, PlatformError> {
        let mut state = self.state.lock();

        state.next_frame = state
            .next_frame
            .checked_add(1)
            .ok_or(PlatformError::FrameExhausted)?;
        let frame = FrameId::new(state.next_frame);

        state.next_scope = state
            .next_scope
            .checked_add(1)
            .ok_or(PlatformError::FrameExhausted)?;
        let raw_scope = state.next_scope;

        let thread_id = thread::current().id();
        state.parents.insert(frame, parent);
        state.stacks.entry(thread_id).or_default().push(frame);
        state.scopes.insert(
            raw_scope,
            ScopeRecord {
                frame,
                thread: thread_id,
            },
        );

        trace!(%frame, %parent, scope = raw_scope, "entered child frame");
        Ok(EnteredFrame {
            frame,
            scope: ScopeHandle::new(raw_scope),
        })
    }

    fn release_scope(&self, handle: ScopeHandle) {
        let mut state = self.state.lock();
        let Some(record) = state.scopes.remove(&handle.raw()) else {
            warn!(scope = handle.raw(), "release of unknown frame-scope ignored");
            return;
        };

        let Some(stack) = state.stacks.get_mut(&record.thread) else {
            return;
        };
        let Some(position) = stack.iter().position(|&f| f == record.frame) else {
            // Frame already left via an enclosing scope's release.
            return;
        };

        let popped: Vec<FrameId> = stack.drain(position..).collect();
        if stack.is_empty() {
            state.stacks.remove(&record.thread);
        }
        for frame in &popped {
            state.parents.remove(frame);
        }
        trace!(frame = %record.frame, closed = popped.len(), "left frame-scope");
    }
}
