//! Payload taxonomy: the closed set of occasion categories and their shapes.
//!
//! Every hook occasion carries one of six payload shapes. The shapes exist in
//! two forms that must stay in lockstep:
//!
//! - [`Payload`], the dynamically-tagged union crossing the host boundary, and
//! - the per-shape witness structs ([`AfterChange`], [`Normal`], ...) which
//!   implement the sealed [`Shape`] trait and carry the same data statically.
//!
//! A [`Hook`](crate::Hook) and a [`FnHandle`](crate::FnHandle) are both
//! parameterised by a witness type, so registering a function against a hook
//! with a different shape is a type error. Dynamic tags are only inspected at
//! the host boundary, where [`Shape::from_payload`] narrows them back.

use std::fmt;
use std::path::PathBuf;

use limn_primitives::{FrameId, WindowId};

/// Region boundaries and change sizes are character positions/counts.
pub type CharPos = usize;

/// Payload for hooks that fire after a buffer modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AfterChange {
	/// Start of the changed region.
	pub begin: CharPos,
	/// End of the changed region.
	pub end: CharPos,
	/// Length of the region before the change.
	pub old_len: usize,
}

/// Payload for hooks that fire before a buffer modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeforeChange {
	/// Start of the region about to change.
	pub begin: CharPos,
	/// End of the region about to change.
	pub end: CharPos,
}

/// Payload for hooks that fire on file-level occasions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileVisit {
	/// Path of the file involved.
	pub path: PathBuf,
}

/// Payload for hooks that carry no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Normal;

/// Payload for frame lifecycle occasions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEvent {
	/// The frame involved.
	pub frame: FrameId,
}

/// Payload for window scroll occasions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowScroll {
	/// The window that scrolled.
	pub window: WindowId,
	/// New position of the first visible character.
	pub start: CharPos,
}

/// Dynamically-tagged payload as it crosses the host boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
	/// A buffer region was modified.
	AfterChange(AfterChange),
	/// A buffer region is about to be modified.
	BeforeChange(BeforeChange),
	/// A file-level occasion.
	File(FileVisit),
	/// No data.
	Normal,
	/// A frame lifecycle occasion.
	Frame(FrameEvent),
	/// A window scrolled.
	Window(WindowScroll),
}

impl Payload {
	/// Returns the shape tag of this payload.
	pub fn kind(&self) -> PayloadKind {
		match self {
			Payload::AfterChange(_) => PayloadKind::AfterChange,
			Payload::BeforeChange(_) => PayloadKind::BeforeChange,
			Payload::File(_) => PayloadKind::File,
			Payload::Normal => PayloadKind::Normal,
			Payload::Frame(_) => PayloadKind::Frame,
			Payload::Window(_) => PayloadKind::Window,
		}
	}
}

/// Tag-only mirror of [`Payload`], used for arity checks and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
	/// After-change shape.
	AfterChange,
	/// Before-change shape.
	BeforeChange,
	/// File shape.
	File,
	/// No-payload shape.
	Normal,
	/// Frame shape.
	Frame,
	/// Window shape.
	Window,
}

impl fmt::Display for PayloadKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			PayloadKind::AfterChange => "after-change",
			PayloadKind::BeforeChange => "before-change",
			PayloadKind::File => "file",
			PayloadKind::Normal => "normal",
			PayloadKind::Frame => "frame",
			PayloadKind::Window => "window",
		};
		f.write_str(name)
	}
}

mod sealed {
	pub trait Sealed {}
	impl Sealed for super::AfterChange {}
	impl Sealed for super::BeforeChange {}
	impl Sealed for super::FileVisit {}
	impl Sealed for super::Normal {}
	impl Sealed for super::FrameEvent {}
	impl Sealed for super::WindowScroll {}
}

/// Static witness for a payload shape.
///
/// Implemented only by the six shape structs in this module; the set is
/// closed. `from_payload` is the single narrowing point for dynamically-tagged
/// payloads arriving from the host.
pub trait Shape: sealed::Sealed + Clone + Send + Sized + 'static {
	/// The dynamic tag corresponding to this shape.
	const KIND: PayloadKind;

	/// Narrows a dynamic payload to this shape, or `None` on tag mismatch.
	fn from_payload(payload: Payload) -> Option<Self>;

	/// Widens this shape into the dynamic union.
	fn into_payload(self) -> Payload;
}

impl Shape for AfterChange {
	const KIND: PayloadKind = PayloadKind::AfterChange;

	fn from_payload(payload: Payload) -> Option<Self> {
		match payload {
			Payload::AfterChange(p) => Some(p),
			_ => None,
		}
	}

	fn into_payload(self) -> Payload {
		Payload::AfterChange(self)
	}
}

impl Shape for BeforeChange {
	const KIND: PayloadKind = PayloadKind::BeforeChange;

	fn from_payload(payload: Payload) -> Option<Self> {
		match payload {
			Payload::BeforeChange(p) => Some(p),
			_ => None,
		}
	}

	fn into_payload(self) -> Payload {
		Payload::BeforeChange(self)
	}
}

impl Shape for FileVisit {
	const KIND: PayloadKind = PayloadKind::File;

	fn from_payload(payload: Payload) -> Option<Self> {
		match payload {
			Payload::File(p) => Some(p),
			_ => None,
		}
	}

	fn into_payload(self) -> Payload {
		Payload::File(self)
	}
}

impl Shape for Normal {
	const KIND: PayloadKind = PayloadKind::Normal;

	fn from_payload(payload: Payload) -> Option<Self> {
		match payload {
			Payload::Normal => Some(Normal),
			_ => None,
		}
	}

	fn into_payload(self) -> Payload {
		Payload::Normal
	}
}

impl Shape for FrameEvent {
	const KIND: PayloadKind = PayloadKind::Frame;

	fn from_payload(payload: Payload) -> Option<Self> {
		match payload {
			Payload::Frame(p) => Some(p),
			_ => None,
		}
	}

	fn into_payload(self) -> Payload {
		Payload::Frame(self)
	}
}

impl Shape for WindowScroll {
	const KIND: PayloadKind = PayloadKind::Window;

	fn from_payload(payload: Payload) -> Option<Self> {
		match payload {
			Payload::Window(p) => Some(p),
			_ => None,
		}
	}

	fn into_payload(self) -> Payload {
		Payload::Window(self)
	}
}
