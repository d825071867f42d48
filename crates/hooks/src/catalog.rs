//! The fixed catalog of built-in hook occasions.
//!
//! Constructed once at process startup and passed explicitly to whatever
//! subsystem needs to look a hook up by name; there is no ambient global
//! table.

use crate::hook::{Hook, HookInfo};
use crate::host::HookHost;
use crate::payload::{AfterChange, BeforeChange, FileVisit, FrameEvent, Normal, WindowScroll};

/// Built-in hook handles, one per named editor occasion.
///
/// Each field is plain data (backing variable plus payload shape); the
/// occasions themselves are fired by the host.
pub struct Builtins {
	/// The editor finished starting up.
	pub startup: Hook<Normal>,
	/// The editor is about to exit.
	pub shutdown: Hook<Normal>,
	/// The current buffer is about to be saved.
	pub before_save: Hook<Normal>,
	/// The current buffer was saved.
	pub after_save: Hook<Normal>,
	/// The current buffer is being discarded.
	pub buffer_kill: Hook<Normal>,
	/// A file was loaded into a buffer.
	pub find_file: Hook<FileVisit>,
	/// A buffer was written out to a file.
	pub write_file: Hook<FileVisit>,
	/// A buffer region is about to change.
	pub before_change: Hook<BeforeChange>,
	/// A buffer region changed.
	pub after_change: Hook<AfterChange>,
	/// A frame was created.
	pub frame_made: Hook<FrameEvent>,
	/// A frame was deleted.
	pub frame_removed: Hook<FrameEvent>,
	/// A window's first visible position changed.
	pub window_scroll: Hook<WindowScroll>,
}

impl Builtins {
	/// Creates every built-in hook, defining its backing variable in the
	/// host. Call once during startup, before any occasion can fire.
	pub fn install(host: &mut dyn HookHost) -> Self {
		Self {
			startup: Hook::new(host, "startup-hook"),
			shutdown: Hook::new(host, "shutdown-hook"),
			before_save: Hook::new(host, "before-save-hook"),
			after_save: Hook::new(host, "after-save-hook"),
			buffer_kill: Hook::new(host, "buffer-kill-hook"),
			find_file: Hook::new(host, "find-file-hook"),
			write_file: Hook::new(host, "write-file-hook"),
			before_change: Hook::new(host, "before-change-hook"),
			after_change: Hook::new(host, "after-change-hook"),
			frame_made: Hook::new(host, "frame-made-hook"),
			frame_removed: Hook::new(host, "frame-removed-hook"),
			window_scroll: Hook::new(host, "window-scroll-hook"),
		}
	}

	/// Looks up a built-in hook's name and shape by its variable name.
	pub fn lookup(&self, name: &str) -> Option<HookInfo> {
		self.infos().into_iter().find(|i| i.var.as_str() == name)
	}

	/// Name and shape of every built-in hook.
	pub fn infos(&self) -> Vec<HookInfo> {
		vec![
			self.startup.info(),
			self.shutdown.info(),
			self.before_save.info(),
			self.after_save.info(),
			self.buffer_kill.info(),
			self.find_file.info(),
			self.write_file.info(),
			self.before_change.info(),
			self.after_change.info(),
			self.frame_made.info(),
			self.frame_removed.info(),
			self.window_scroll.info(),
		]
	}
}
