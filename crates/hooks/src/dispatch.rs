//! Invocation wrapper and list-firing loop.
//!
//! Every body registered through [`FnHandle`](crate::FnHandle) construction
//! passes through [`wrap`] exactly once, so no registered body can reach the
//! host's invocation machinery without fault containment. A failing body is
//! reported to the host message log and to tracing, then the dispatch chain
//! continues as if the body had returned its unit result.

use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Arc;
use std::time::Instant;

use limn_primitives::Symbol;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::CallbackError;
use crate::host::{HookBody, HookHost, Scope};
use crate::payload::{Payload, Shape};

/// Wraps a typed native body into a stored, fault-contained [`HookBody`].
///
/// The wrapper narrows the dynamic payload, runs the body inside a
/// panic-catching scope, and normalises every outcome to unit. Failures
/// (error returns and panics alike) become diagnostics, never propagation.
pub(crate) fn wrap<S, F>(
	symbol: Symbol,
	location: &'static Location<'static>,
	profile: bool,
	mut body: F,
) -> HookBody
where
	S: Shape,
	F: FnMut(&mut dyn HookHost, S) -> Result<(), CallbackError> + Send + 'static,
{
	Arc::new(Mutex::new(move |host: &mut dyn HookHost, payload: Payload| {
		let got = payload.kind();
		let Some(typed) = S::from_payload(payload) else {
			report(
				host,
				&symbol,
				location,
				&format!("expected {} payload, host sent {got}", S::KIND),
			);
			return;
		};

		let started = profile.then(Instant::now);
		match panic::catch_unwind(AssertUnwindSafe(|| body(host, typed))) {
			Ok(Ok(())) => {}
			Ok(Err(err)) => report(host, &symbol, location, &err.to_string()),
			Err(panic_payload) => {
				report(host, &symbol, location, panic_message(&*panic_payload));
			}
		}
		if let Some(started) = started {
			debug!(
				function = %symbol,
				elapsed_us = started.elapsed().as_micros() as u64,
				"hook function finished"
			);
		}
	}))
}

/// Invokes every symbol currently registered on `var`, buffer-local members
/// first, then global members, in list order.
///
/// Both views are snapshotted before the first invocation, so a body that
/// edits the list (self-removal, one-shot excision) never perturbs the
/// iteration already in progress.
pub(crate) fn fire_hook(host: &mut dyn HookHost, var: &Symbol, payload: &Payload) {
	let mut queue = host.list_var(var, Scope::BufferLocal);
	queue.extend(host.list_var(var, Scope::Global));

	for symbol in queue {
		let Some(body) = host.function(&symbol) else {
			warn!(hook = %var, function = %symbol, "registered symbol has no function binding");
			host.log_message(&format!("hook {var}: no function bound to {symbol}"));
			continue;
		};
		// A body that re-fires a hook it is registered on would re-lock its
		// own non-reentrant mutex. Diagnose and skip, like a missing binding.
		let Some(mut guard) = body.try_lock() else {
			warn!(hook = %var, function = %symbol, "function is already running, re-entrant invocation skipped");
			host.log_message(&format!("hook {var}: {symbol} is already running, skipped"));
			continue;
		};
		(*guard)(host, payload.clone());
	}
}

/// Routes a caught failure to the diagnostic surfaces without re-raising.
fn report(host: &mut dyn HookHost, symbol: &Symbol, location: &Location<'_>, detail: &str) {
	warn!(function = %symbol, %location, detail, "hook function failed");
	host.log_message(&format!("error in hook function {symbol} ({location}): {detail}"));
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		msg
	} else if let Some(msg) = payload.downcast_ref::<String>() {
		msg
	} else {
		"panicked"
	}
}
