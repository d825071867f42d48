//! Host collaborator contract and the in-memory reference host.
//!
//! The engine never owns a hook's member list. The list lives in a named host
//! variable, and every registry operation round-trips through [`HookHost`], so
//! the host stays the source of truth and the engine stays testable against
//! [`MemoryHost`].

use std::sync::Arc;

use limn_primitives::{BufferId, Symbol};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::RegisterError;
use crate::payload::{Payload, PayloadKind};

/// Which view of a hook's backing variable an operation addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
	/// The process-wide list.
	#[default]
	Global,
	/// The current buffer's shadow list.
	BufferLocal,
}

/// A stored, already-wrapped hook function body.
///
/// Bodies are shared (`Arc`) so the host can hand one out for invocation
/// without borrowing its own tables, and locked (`Mutex`) so a multi-threaded
/// embedder gets per-binding exclusion.
pub type HookBody = Arc<Mutex<dyn FnMut(&mut dyn HookHost, Payload) + Send>>;

/// Capabilities the engine requires from the host runtime.
///
/// List variables hold ordered sequences of function symbols; reads and
/// writes are whole-list, and a write is a single atomic replacement of the
/// addressed view.
pub trait HookHost {
	/// Reads the list bound to `var` in `scope`. Unbound reads as empty.
	fn list_var(&self, var: &Symbol, scope: Scope) -> Vec<Symbol>;

	/// Replaces the list bound to `var` in `scope`.
	fn set_list_var(&mut self, var: &Symbol, scope: Scope, items: Vec<Symbol>);

	/// Ensures `var` exists, binding it to the empty global list if unbound.
	fn define_list_var(&mut self, var: &Symbol);

	/// Binds `body` under `symbol` with the declared payload shape.
	///
	/// Rebinding with the same shape replaces the body; a different shape is
	/// a configuration error.
	fn bind_function(
		&mut self,
		symbol: &Symbol,
		kind: PayloadKind,
		doc: &str,
		body: HookBody,
	) -> Result<(), RegisterError>;

	/// Swaps the stored body of an existing binding, keeping its metadata.
	/// No-op if `symbol` is not bound.
	fn rebind_function(&mut self, symbol: &Symbol, body: HookBody);

	/// Looks up the stored body bound to `symbol`.
	fn function(&self, symbol: &Symbol) -> Option<HookBody>;

	/// Returns the payload shape `symbol` was bound with.
	fn function_kind(&self, symbol: &Symbol) -> Option<PayloadKind>;

	/// Appends a line to the host's persistent, user-visible message log.
	fn log_message(&mut self, text: &str);
}

struct FnBinding {
	kind: PayloadKind,
	doc: String,
	body: HookBody,
}

/// In-memory [`HookHost`] used by tests and by embedders without a real host.
///
/// Buffer-local variables shadow per buffer; the "current" buffer is an
/// explicit cursor so tests can switch scopes deterministically.
pub struct MemoryHost {
	globals: FxHashMap<Symbol, Vec<Symbol>>,
	locals: FxHashMap<(BufferId, Symbol), Vec<Symbol>>,
	functions: FxHashMap<Symbol, FnBinding>,
	current: BufferId,
	messages: Vec<String>,
}

impl Default for MemoryHost {
	fn default() -> Self {
		Self {
			globals: FxHashMap::default(),
			locals: FxHashMap::default(),
			functions: FxHashMap::default(),
			current: BufferId::SCRATCH,
			messages: Vec::new(),
		}
	}
}

impl MemoryHost {
	/// Creates an empty host with the scratch buffer current.
	pub fn new() -> Self {
		Self::default()
	}

	/// Switches the current buffer, changing which shadow lists
	/// [`Scope::BufferLocal`] operations address.
	pub fn set_current_buffer(&mut self, buffer: BufferId) {
		self.current = buffer;
	}

	/// Returns the current buffer.
	pub fn current_buffer(&self) -> BufferId {
		self.current
	}

	/// Returns the accumulated message log.
	pub fn messages(&self) -> &[String] {
		&self.messages
	}

	/// Returns the docstring `symbol` was bound with.
	pub fn function_doc(&self, symbol: &Symbol) -> Option<&str> {
		self.functions.get(symbol).map(|b| b.doc.as_str())
	}
}

impl HookHost for MemoryHost {
	fn list_var(&self, var: &Symbol, scope: Scope) -> Vec<Symbol> {
		match scope {
			Scope::Global => self.globals.get(var).cloned().unwrap_or_default(),
			Scope::BufferLocal => self
				.locals
				.get(&(self.current, var.clone()))
				.cloned()
				.unwrap_or_default(),
		}
	}

	fn set_list_var(&mut self, var: &Symbol, scope: Scope, items: Vec<Symbol>) {
		match scope {
			Scope::Global => {
				self.globals.insert(var.clone(), items);
			}
			Scope::BufferLocal => {
				self.locals.insert((self.current, var.clone()), items);
			}
		}
	}

	fn define_list_var(&mut self, var: &Symbol) {
		self.globals.entry(var.clone()).or_default();
	}

	fn bind_function(
		&mut self,
		symbol: &Symbol,
		kind: PayloadKind,
		doc: &str,
		body: HookBody,
	) -> Result<(), RegisterError> {
		if let Some(existing) = self.functions.get(symbol)
			&& existing.kind != kind
		{
			return Err(RegisterError::ShapeConflict {
				symbol: symbol.clone(),
				existing: existing.kind,
				requested: kind,
			});
		}
		self.functions.insert(
			symbol.clone(),
			FnBinding {
				kind,
				doc: doc.to_owned(),
				body,
			},
		);
		Ok(())
	}

	fn rebind_function(&mut self, symbol: &Symbol, body: HookBody) {
		if let Some(binding) = self.functions.get_mut(symbol) {
			binding.body = body;
		} else {
			tracing::trace!(symbol = %symbol, "rebind of unbound symbol ignored");
		}
	}

	fn function(&self, symbol: &Symbol) -> Option<HookBody> {
		self.functions.get(symbol).map(|b| b.body.clone())
	}

	fn function_kind(&self, symbol: &Symbol) -> Option<PayloadKind> {
		self.functions.get(symbol).map(|b| b.kind)
	}

	fn log_message(&mut self, text: &str) {
		self.messages.push(text.to_owned());
	}
}
