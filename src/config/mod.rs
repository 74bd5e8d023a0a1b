//! Configuration module for resource inlining
//!
//! This module provides the `InlineConfig` struct, its getters and its
//! chainable setters.

// Sub-modules
pub mod getters;
pub mod methods;
pub mod types;

// Re-exports for public API
pub use types::{FailurePolicy, InlineConfig};
