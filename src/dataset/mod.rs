//! Dataset discovery and shared, read-only access to its images

/// Immutable dataset context shared by every analysis
pub mod context;
