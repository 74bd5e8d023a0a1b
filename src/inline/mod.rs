//! Resource inlining
//!
//! Turns external stylesheets, images and CSS `url(...)` references of an
//! HTML document into embedded content, producing a self-contained document.

// Sub-modules
pub mod encode;
pub mod orchestrator;
pub mod processors;
pub mod replace;
pub mod types;

// Re-exports for public API
pub use orchestrator::ResourceInliner;
pub use types::{InlineError, InliningError, InliningResult, ResourceRef, ResourceType};
