//! Registration and execution of analyses

/// Timed execution of registered analyses
pub mod executor;
/// Explicit, name-keyed analysis registry
pub mod registry;
