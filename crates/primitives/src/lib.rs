//! Core identifier types for the runtime binding: symbols and entity ids.

/// Identifier types for host entities.
pub mod ids;
/// Host-visible symbolic names.
pub mod symbol;

pub use ids::{BufferId, FrameId, WindowId};
pub use symbol::Symbol;
