//! Framectx: frame-scoped context propagation
//!
//! A context propagation manager for tracing instrumentation: concurrent,
//! nested units of work attach and look up key/value state that follows the
//! logical execution-frame hierarchy instead of being threaded through
//! parameters. Values are visible from the frame they were set at and from
//! frames entered below it, never from unrelated concurrent executions, and
//! the frame-scope holding a value is released deterministically when the
//! value is removed or its last handle drops.

pub mod concurrency;
pub mod error;
pub mod keys;
pub mod logging;
pub mod manager;
pub mod platform;
pub mod types;

pub use error::{ContextError, LoggingError, PlatformError};
pub use manager::{ContextManager, ContextPropagator};
pub use platform::{FramePlatform, ThreadFramePlatform};
pub use types::{ContextValue, FrameCursor, FrameId, ScopeHandle, ValueId};
