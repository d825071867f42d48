//! Function handles: typed, named, wrapped callback identities.

use std::marker::PhantomData;
use std::panic::Location;

use limn_primitives::Symbol;

use crate::dispatch;
use crate::error::{CallbackError, RegisterError};
use crate::host::HookHost;
use crate::payload::Shape;

/// Declarative description of a hook function.
#[derive(Debug, Clone, Copy)]
pub struct FnHandleDef {
	/// Host-visible symbolic name to bind the body under.
	pub name: &'static str,
	/// Docstring recorded with the binding.
	pub doc: &'static str,
	/// Whether invocations should emit timing records.
	pub profile: bool,
}

impl FnHandleDef {
	/// Creates a definition with profiling off.
	pub const fn new(name: &'static str, doc: &'static str) -> Self {
		Self {
			name,
			doc,
			profile: false,
		}
	}

	/// Enables per-invocation timing records.
	pub const fn profiled(mut self) -> Self {
		self.profile = true;
		self
	}
}

/// A registered hook function of payload shape `S`.
///
/// The handle is the only legitimate way to later reference the registration:
/// hook-list membership and removal go by the handle's symbol. Cloning is
/// cheap and clones refer to the same registration.
#[derive(Clone)]
pub struct FnHandle<S: Shape> {
	symbol: Symbol,
	location: &'static Location<'static>,
	doc: &'static str,
	profile: bool,
	_shape: PhantomData<fn(S)>,
}

impl<S: Shape> FnHandle<S> {
	/// Registers `body` under `def.name` in the host namespace.
	///
	/// The body receives the host and one payload of the declared shape. It
	/// is bound already wrapped in the fault-containment shim, so a failure
	/// inside it can never abort a dispatch chain.
	///
	/// Rebinding an existing symbol with a different payload shape is a
	/// configuration error; rebinding with the same shape replaces the body.
	#[track_caller]
	pub fn create<F>(
		host: &mut dyn HookHost,
		def: FnHandleDef,
		body: F,
	) -> Result<Self, RegisterError>
	where
		F: FnMut(&mut dyn HookHost, S) -> Result<(), CallbackError> + Send + 'static,
	{
		let handle = Self::identity(def);
		let wrapped = dispatch::wrap::<S, F>(
			handle.symbol.clone(),
			handle.location,
			handle.profile,
			body,
		);
		host.bind_function(&handle.symbol, S::KIND, def.doc, wrapped)?;
		Ok(handle)
	}

	/// Like [`create`](Self::create), but the body also receives its own
	/// handle, so it can remove or re-register itself mid-invocation.
	///
	/// Construction is two-phase: the handle identity is built first, then
	/// the body closes over a clone of it.
	#[track_caller]
	pub fn create_with_self<F>(
		host: &mut dyn HookHost,
		def: FnHandleDef,
		mut body: F,
	) -> Result<Self, RegisterError>
	where
		F: FnMut(&mut dyn HookHost, &FnHandle<S>, S) -> Result<(), CallbackError> + Send + 'static,
	{
		let handle = Self::identity(def);
		let me = handle.clone();
		let wrapped = dispatch::wrap::<S, _>(
			handle.symbol.clone(),
			handle.location,
			handle.profile,
			move |host, payload| body(host, &me, payload),
		);
		host.bind_function(&handle.symbol, S::KIND, def.doc, wrapped)?;
		Ok(handle)
	}

	#[track_caller]
	fn identity(def: FnHandleDef) -> Self {
		Self {
			symbol: Symbol::from(def.name),
			location: Location::caller(),
			doc: def.doc,
			profile: def.profile,
			_shape: PhantomData,
		}
	}

	/// The symbol this function is bound under.
	pub fn symbol(&self) -> &Symbol {
		&self.symbol
	}

	/// Source location of the construction site, used in diagnostics.
	pub fn location(&self) -> &'static Location<'static> {
		self.location
	}

	/// The docstring recorded at construction.
	pub fn doc(&self) -> &'static str {
		self.doc
	}

	/// Whether invocations emit timing records.
	pub fn should_profile(&self) -> bool {
		self.profile
	}
}

impl<S: Shape> std::fmt::Debug for FnHandle<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FnHandle")
			.field("symbol", &self.symbol)
			.field("shape", &S::KIND)
			.field("location", &self.location)
			.finish()
	}
}
