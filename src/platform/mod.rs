//! Execution-frame platform boundary.
//!
//! The context manager does not create or track execution frames itself; it
//! consumes a narrow contract from the platform that does. On Darwin-style
//! systems that facility is the OS activity subsystem; in self-contained
//! deployments it is [`ThreadFramePlatform`], the in-process implementation
//! bundled here.

pub mod thread;

pub use thread::ThreadFramePlatform;

use crate::error::PlatformError;
use crate::types::{FrameCursor, FrameId, ScopeHandle};

/// A frame that was just created and entered.
#[derive(Debug)]
pub struct EnteredFrame {
    pub frame: FrameId,
    pub scope: ScopeHandle,
}

/// Contract the context manager consumes from the execution-frame subsystem.
pub trait FramePlatform: Send + Sync {
    /// Identifier of the active frame and of its immediate parent.
    ///
    /// Both fields are [`FrameId::ROOT`] when no frame is active on the
    /// calling thread.
    fn current_frame(&self) -> FrameCursor;

    /// Create a new frame nested under `parent` and enter it on the calling
    /// thread, returning its identifier and the handle for the open scope.
    fn create_child_frame(&self, parent: FrameId) -> Result<EnteredFrame, PlatformError>;

    /// Leave and close a previously created frame-scope.
    ///
    /// Behavior on a handle whose scope was already closed is
    /// implementation-defined and must be documented by the implementation.
    /// The bundled [`ThreadFramePlatform`] treats it as a no-op.
    fn release_scope(&self, handle: ScopeHandle);
}
