//! Hook handles and the registry operations over their backing lists.
//!
//! A [`Hook`] binds a payload shape to a named host variable holding an
//! ordered list of function symbols. The engine never caches that list: every
//! operation is a read-modify-write through the host, finishing in a single
//! atomic variable write.

use std::marker::PhantomData;
use std::sync::Arc;

use limn_primitives::Symbol;
use parking_lot::Mutex;
use tracing::trace;

use crate::dispatch;
use crate::handle::FnHandle;
use crate::host::{HookBody, HookHost, Scope};
use crate::payload::{Normal, Payload, PayloadKind, Shape};

/// Insertion position for [`Hook::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Where {
	/// Prepend: the function runs before existing members.
	#[default]
	Start,
	/// Append: the function runs after existing members.
	End,
}

/// Options for [`Hook::add`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
	/// Which view of the backing list to splice into.
	pub scope: Scope,
	/// Remove the function from this list/scope after its first completed
	/// invocation.
	///
	/// One-shot excision is installed by rewrapping the symbol's stored body,
	/// so a symbol shared across several hooks should not be registered
	/// one-shot.
	pub one_shot: bool,
	/// Insertion position.
	pub place: Where,
}

/// Name and shape tag of a hook, for by-name lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInfo {
	/// The backing variable.
	pub var: Symbol,
	/// The payload shape the hook fires with.
	pub kind: PayloadKind,
}

/// A typed identifier for one hook occasion.
///
/// The shape tag `S` is fixed at creation; only functions of the same shape
/// can be registered, checked at compile time. Handles are cheap to clone and
/// live for the whole process.
#[derive(Clone)]
pub struct Hook<S: Shape> {
	var: Symbol,
	_shape: PhantomData<fn(S)>,
}

impl<S: Shape> Hook<S> {
	/// Creates a hook backed by the host variable `name`, defining the
	/// variable as the empty global list if it is unbound.
	pub fn new(host: &mut dyn HookHost, name: &str) -> Self {
		let var = Symbol::from(name);
		host.define_list_var(&var);
		Self {
			var,
			_shape: PhantomData,
		}
	}

	/// The backing variable's symbol.
	pub fn var(&self) -> &Symbol {
		&self.var
	}

	/// The payload shape this hook fires with.
	pub fn kind(&self) -> PayloadKind {
		S::KIND
	}

	/// Name and shape tag, for catalog lookups.
	pub fn info(&self) -> HookInfo {
		HookInfo {
			var: self.var.clone(),
			kind: S::KIND,
		}
	}

	/// Splices `function` into the backing list at `options.place`.
	///
	/// Membership is idempotent: if the symbol is already present the call is
	/// a no-op and the original position is kept.
	pub fn add(&self, host: &mut dyn HookHost, function: &FnHandle<S>, options: AddOptions) {
		let symbol = function.symbol().clone();
		let mut list = host.list_var(&self.var, options.scope);
		if list.contains(&symbol) {
			trace!(hook = %self.var, function = %symbol, "already a member, add skipped");
			return;
		}
		if options.one_shot {
			install_one_shot(host, &self.var, &symbol, options.scope);
		}
		match options.place {
			Where::Start => list.insert(0, symbol),
			Where::End => list.push(symbol),
		}
		host.set_list_var(&self.var, options.scope, list);
	}

	/// Removes `function` from the backing list. No-op if absent.
	pub fn remove(&self, host: &mut dyn HookHost, function: &FnHandle<S>, scope: Scope) {
		self.remove_symbol(host, function.symbol(), scope);
	}

	/// Removes a raw symbol from the backing list, for registrations whose
	/// handle the caller does not hold. No-op if absent.
	pub fn remove_symbol(&self, host: &mut dyn HookHost, symbol: &Symbol, scope: Scope) {
		let mut list = host.list_var(&self.var, scope);
		let Some(pos) = list.iter().position(|s| s == symbol) else {
			return;
		};
		list.remove(pos);
		host.set_list_var(&self.var, scope, list);
		trace!(hook = %self.var, function = %symbol, "removed");
	}

	/// Empties the global backing list unconditionally. Buffer-local shadows
	/// are untouched.
	pub fn clear(&self, host: &mut dyn HookHost) {
		host.set_list_var(&self.var, Scope::Global, Vec::new());
	}

	/// Returns the current members of the addressed view, in invocation
	/// order.
	pub fn members(&self, host: &dyn HookHost, scope: Scope) -> Vec<Symbol> {
		host.list_var(&self.var, scope)
	}

	/// Invokes every registered function with `payload`, sequentially:
	/// buffer-local members of the current buffer first, then global
	/// members, each in list order.
	pub fn fire(&self, host: &mut dyn HookHost, payload: S) {
		dispatch::fire_hook(host, &self.var, &payload.into_payload());
	}
}

impl Hook<Normal> {
	/// Bulk-invocation entry point for the no-payload shape.
	///
	/// Returns only after every member body has been attempted; a contained
	/// failure in one member never skips the rest.
	pub fn run(&self, host: &mut dyn HookHost) {
		self.fire(host, Normal);
	}
}

impl<S: Shape> std::fmt::Debug for Hook<S> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Hook")
			.field("var", &self.var)
			.field("shape", &S::KIND)
			.finish()
	}
}

/// Rewraps the stored body of `symbol` so that after one completed invocation
/// it excises itself from `var` in `scope` and restores the original binding,
/// so a later plain `add` of the same function behaves normally again.
///
/// A contained callback failure still counts as a completed invocation; only
/// a fault that tears down the dispatch itself leaves the symbol in place.
fn install_one_shot(host: &mut dyn HookHost, var: &Symbol, symbol: &Symbol, scope: Scope) {
	let Some(original) = host.function(symbol) else {
		trace!(hook = %var, function = %symbol, "one-shot requested for unbound symbol");
		return;
	};
	let var = var.clone();
	let symbol_in_list = symbol.clone();
	let restore = original.clone();
	let wrapper: HookBody = Arc::new(Mutex::new(move |host: &mut dyn HookHost, payload: Payload| {
		(*original.lock())(host, payload);
		let mut list = host.list_var(&var, scope);
		if let Some(pos) = list.iter().position(|s| *s == symbol_in_list) {
			list.remove(pos);
			host.set_list_var(&var, scope, list);
		}
		host.rebind_function(&symbol_in_list, restore.clone());
	}));
	host.rebind_function(symbol, wrapper);
}
