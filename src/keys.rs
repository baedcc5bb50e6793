//! Well-known context keys.
//!
//! The manager itself treats keys as opaque strings; these constants are the
//! conventional keys tracing layers use so independent instrumentation
//! agrees on where the active span and baggage live.

/// Key under which the span currently in progress is propagated.
pub const ACTIVE_SPAN: &str = "span";

/// Key under which cross-cutting baggage entries are propagated.
pub const BAGGAGE: &str = "baggage";
