//! Typed hook registry and dispatch engine.
//!
//! Host code registers, orders, and invokes callback chains that fire on
//! editor-defined occasions (buffer changes, file loads, window scroll,
//! startup, ...). Each occasion carries a statically-known payload shape, and
//! a hook's member list lives in a mutable host variable that the engine
//! round-trips through on every operation.
//!
//! The pieces:
//!
//! - [`payload`] — the closed taxonomy of payload shapes;
//! - [`FnHandle`] — a typed, named, wrapped callback identity;
//! - [`Hook`] — a typed handle over the backing list variable, with the
//!   registry operations (add/remove/clear) and firing entry points;
//! - [`host::HookHost`] — the contract consumed from the host runtime, with
//!   [`host::MemoryHost`] as an in-process reference implementation;
//! - [`Builtins`] — the fixed catalog of built-in occasions.
//!
//! Every registered body is wrapped in a fault-containment shim: a failing
//! callback is reported to the host's message log and never aborts the
//! dispatch chain.
//!
//! ```
//! use limn_hooks::host::MemoryHost;
//! use limn_hooks::{AddOptions, FnHandle, FnHandleDef, Hook, Normal, Where};
//!
//! let mut host = MemoryHost::new();
//! let hook: Hook<Normal> = Hook::new(&mut host, "startup-hook");
//! let greet = FnHandle::<Normal>::create(
//! 	&mut host,
//! 	FnHandleDef::new("greet", "Say hello on startup"),
//! 	|_host, _payload| Ok(()),
//! )
//! .unwrap();
//! hook.add(&mut host, &greet, AddOptions {
//! 	place: Where::End,
//! 	..AddOptions::default()
//! });
//! hook.run(&mut host);
//! ```

mod catalog;
mod dispatch;
mod error;
mod handle;
mod hook;
/// Host collaborator contract and the in-memory reference host.
pub mod host;
/// Payload taxonomy: occasion categories and their shapes.
pub mod payload;

#[cfg(test)]
mod tests;

pub use catalog::Builtins;
pub use error::{CallbackError, RegisterError};
pub use handle::{FnHandle, FnHandleDef};
pub use hook::{AddOptions, Hook, HookInfo, Where};
pub use host::{HookBody, HookHost, Scope};
pub use limn_primitives::{BufferId, FrameId, Symbol, WindowId};
pub use payload::{
	AfterChange, BeforeChange, FileVisit, FrameEvent, Normal, Payload, PayloadKind, Shape,
	WindowScroll,
};
