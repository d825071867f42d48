//! Error taxonomy for the hook engine.
//!
//! Only configuration errors ([`RegisterError`]) cross the public boundary as
//! failures. A [`CallbackError`] returned by a hook body is always absorbed by
//! the invocation wrapper and surfaced as a diagnostic, never re-raised.

use limn_primitives::Symbol;

use crate::payload::PayloadKind;

/// Fatal configuration errors from function construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegisterError {
	/// The symbol is already bound to a function of a different shape.
	#[error("symbol `{symbol}` is already bound to a {existing} function, cannot rebind as {requested}")]
	ShapeConflict {
		/// The contested symbol.
		symbol: Symbol,
		/// Shape of the existing binding.
		existing: PayloadKind,
		/// Shape the caller requested.
		requested: PayloadKind,
	},
}

/// Failure signalled by a hook body.
///
/// Carries a human-readable detail string; the wrapper attaches the failing
/// function's symbol and source location before reporting it.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct CallbackError(pub String);

impl From<&str> for CallbackError {
	fn from(detail: &str) -> Self {
		Self(detail.to_owned())
	}
}

impl From<String> for CallbackError {
	fn from(detail: String) -> Self {
		Self(detail)
	}
}
