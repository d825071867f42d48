//! Host-visible symbolic names.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A symbolic name in the host namespace.
///
/// Symbols identify both hook functions and the backing variables of hook
/// lists. Cloning is cheap (shared allocation) and equality is by name, never
/// by the value a symbol is bound to.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(Arc<str>);

impl Symbol {
	/// Creates a symbol from a name.
	pub fn new(name: impl Into<Arc<str>>) -> Self {
		Self(name.into())
	}

	/// Returns the symbol's name.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Symbol({})", self.0)
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for Symbol {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

impl From<String> for Symbol {
	fn from(name: String) -> Self {
		Self::new(name)
	}
}

impl Borrow<str> for Symbol {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for Symbol {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
