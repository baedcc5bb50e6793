//! Shared helpers for integration tests.

use framectx::{ContextManager, ThreadFramePlatform};
use std::sync::Arc;

/// A manager wired to a fresh in-process platform, plus the platform itself
/// so tests can enter frames and inspect stack depth directly.
pub fn create_test_manager() -> (ContextManager, Arc<ThreadFramePlatform>) {
    let platform = Arc::new(ThreadFramePlatform::new());
    let manager = ContextManager::new(platform.clone());
    (manager, platform)
}
