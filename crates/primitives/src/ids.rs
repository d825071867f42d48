//! Newtype identifiers for the host objects referenced by hook payloads.
//!
//! These are opaque handles minted by the host; the engine only stores and
//! compares them.

/// Unique identifier for a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(pub u64);

impl BufferId {
	/// The host's scratch buffer, always present.
	pub const SCRATCH: BufferId = BufferId(0);
}

/// Unique identifier for a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Unique identifier for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);
