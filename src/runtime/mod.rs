//! Concurrency coordination for the inlining pipeline
//!
//! Two shapes of one ordered fan-out/fan-in contract: completion handles
//! (`map_with_completion`, `map_deferred`) and plain futures
//! (`map_ordered`, `map_ordered_bounded`). Each invocation owns its own
//! pending count and result slots; nothing is shared between invocations.

pub mod async_wrappers;
pub mod completion;
pub mod ordered_map;
mod slots;

pub use async_wrappers::{MapAbandoned, PendingResults};
pub use completion::{Completion, map_deferred, map_with_completion};
pub use ordered_map::{map_ordered, map_ordered_bounded};
