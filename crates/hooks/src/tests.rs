use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use limn_primitives::{BufferId, Symbol};
use parking_lot::Mutex;

use crate::host::MemoryHost;
use crate::{
	AddOptions, AfterChange, Builtins, FileVisit, FnHandle, FnHandleDef, Hook, HookHost, Normal,
	PayloadKind, RegisterError, Scope, Where,
};

type SharedLog = Arc<Mutex<Vec<&'static str>>>;

fn normal_hook(host: &mut MemoryHost) -> Hook<Normal> {
	Hook::new(host, "test-hook")
}

fn logger(
	host: &mut MemoryHost,
	name: &'static str,
	log: &SharedLog,
	entry: &'static str,
) -> FnHandle<Normal> {
	let log = Arc::clone(log);
	FnHandle::create(
		host,
		FnHandleDef::new(name, "appends to the shared log"),
		move |_host, _payload: Normal| {
			log.lock().push(entry);
			Ok(())
		},
	)
	.unwrap()
}

fn failing(host: &mut MemoryHost, name: &'static str) -> FnHandle<Normal> {
	FnHandle::create(
		host,
		FnHandleDef::new(name, "always fails"),
		|_host, _payload: Normal| Err("it broke".into()),
	)
	.unwrap()
}

fn at_end() -> AddOptions {
	AddOptions {
		place: Where::End,
		..AddOptions::default()
	}
}

fn names(members: &[Symbol]) -> Vec<&str> {
	members.iter().map(Symbol::as_str).collect()
}

#[test]
fn add_is_idempotent() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");
	let g = logger(&mut host, "g", &log, "g");

	hook.add(&mut host, &f, at_end());
	hook.add(&mut host, &g, at_end());
	hook.add(&mut host, &f, at_end());
	hook.add(&mut host, &f, AddOptions::default());

	assert_eq!(names(&hook.members(&host, Scope::Global)), ["f", "g"]);
}

#[test]
fn where_end_appends_in_registration_order() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");
	let g = logger(&mut host, "g", &log, "g");

	hook.add(&mut host, &f, at_end());
	hook.add(&mut host, &g, at_end());
	hook.run(&mut host);

	assert_eq!(*log.lock(), ["f", "g"]);
}

#[test]
fn where_start_prepends() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");
	let g = logger(&mut host, "g", &log, "g");

	hook.add(&mut host, &f, AddOptions::default());
	hook.add(&mut host, &g, AddOptions::default());
	hook.run(&mut host);

	assert_eq!(names(&hook.members(&host, Scope::Global)), ["g", "f"]);
	assert_eq!(*log.lock(), ["g", "f"]);
}

#[test]
fn remove_of_absent_function_is_noop() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");
	let g = logger(&mut host, "g", &log, "g");

	hook.add(&mut host, &g, at_end());
	hook.remove(&mut host, &f, Scope::Global);

	assert_eq!(names(&hook.members(&host, Scope::Global)), ["g"]);
}

#[test]
fn remove_symbol_excises_by_name() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");
	let g = logger(&mut host, "g", &log, "g");

	hook.add(&mut host, &f, at_end());
	hook.add(&mut host, &g, at_end());
	hook.remove_symbol(&mut host, &Symbol::from("f"), Scope::Global);

	assert_eq!(names(&hook.members(&host, Scope::Global)), ["g"]);
}

#[test]
fn one_shot_invokes_exactly_once() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");

	hook.add(&mut host, &f, AddOptions {
		one_shot: true,
		place: Where::End,
		..AddOptions::default()
	});

	hook.run(&mut host);
	assert!(hook.members(&host, Scope::Global).is_empty());

	hook.run(&mut host);
	assert_eq!(*log.lock(), ["f"]);
}

#[test]
fn one_shot_failing_body_is_still_excised() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let f = failing(&mut host, "f-fail");

	hook.add(&mut host, &f, AddOptions {
		one_shot: true,
		..AddOptions::default()
	});
	hook.run(&mut host);

	assert!(hook.members(&host, Scope::Global).is_empty());
	assert_eq!(host.messages().len(), 1);
}

#[test]
fn plain_readd_after_one_shot_stays_registered() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");

	hook.add(&mut host, &f, AddOptions {
		one_shot: true,
		place: Where::End,
		..AddOptions::default()
	});
	hook.run(&mut host);
	assert!(hook.members(&host, Scope::Global).is_empty());

	hook.add(&mut host, &f, at_end());
	hook.run(&mut host);
	hook.run(&mut host);

	assert_eq!(names(&hook.members(&host, Scope::Global)), ["f"]);
	assert_eq!(*log.lock(), ["f", "f", "f"]);
}

#[test]
fn failing_member_does_not_abort_the_chain() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let a = logger(&mut host, "f-log", &log, "A");
	let fail = failing(&mut host, "f-fail");
	let b = logger(&mut host, "f-log2", &log, "B");

	hook.add(&mut host, &a, at_end());
	hook.add(&mut host, &fail, at_end());
	hook.add(&mut host, &b, at_end());
	hook.run(&mut host);

	assert_eq!(*log.lock(), ["A", "B"]);
	assert_eq!(host.messages().len(), 1);
	assert!(host.messages()[0].contains("f-fail"));
	assert!(host.messages()[0].contains("it broke"));
}

#[test]
fn panicking_member_is_contained() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let bomb = FnHandle::create(
		&mut host,
		FnHandleDef::new("bomb", "always panics"),
		|_host, _payload: Normal| panic!("boom"),
	)
	.unwrap();
	let after = logger(&mut host, "after", &log, "after");

	hook.add(&mut host, &bomb, at_end());
	hook.add(&mut host, &after, at_end());

	let prev = std::panic::take_hook();
	std::panic::set_hook(Box::new(|_| {}));
	hook.run(&mut host);
	std::panic::set_hook(prev);

	assert_eq!(*log.lock(), ["after"]);
	assert_eq!(host.messages().len(), 1);
	assert!(host.messages()[0].contains("bomb"));
	assert!(host.messages()[0].contains("boom"));
}

#[test]
fn recursive_firing_skips_the_running_member() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();

	let hk = hook.clone();
	let reenter = FnHandle::create(
		&mut host,
		FnHandleDef::new("reenter", "re-fires the hook it is registered on"),
		move |host, _payload: Normal| {
			hk.run(host);
			Ok(())
		},
	)
	.unwrap();
	let g = logger(&mut host, "g", &log, "g");

	hook.add(&mut host, &reenter, at_end());
	hook.add(&mut host, &g, at_end());
	hook.run(&mut host);

	assert_eq!(*log.lock(), ["g", "g"]);
	assert_eq!(host.messages().len(), 1);
	assert!(host.messages()[0].contains("reenter"));
}

#[test]
fn clear_empties_global_scope_only() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");
	let g = logger(&mut host, "g", &log, "g");

	hook.add(&mut host, &f, at_end());
	hook.add(&mut host, &g, AddOptions {
		scope: Scope::BufferLocal,
		..AddOptions::default()
	});
	hook.clear(&mut host);

	assert!(hook.members(&host, Scope::Global).is_empty());
	assert_eq!(names(&hook.members(&host, Scope::BufferLocal)), ["g"]);
}

#[test]
fn buffer_local_lists_are_isolated() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");

	host.set_current_buffer(BufferId(1));
	hook.add(&mut host, &f, AddOptions {
		scope: Scope::BufferLocal,
		..AddOptions::default()
	});

	assert!(hook.members(&host, Scope::Global).is_empty());

	host.set_current_buffer(BufferId(2));
	assert!(hook.members(&host, Scope::BufferLocal).is_empty());

	host.set_current_buffer(BufferId(1));
	assert_eq!(names(&hook.members(&host, Scope::BufferLocal)), ["f"]);
}

#[test]
fn buffer_local_members_run_before_global() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let local = logger(&mut host, "local", &log, "local");
	let global = logger(&mut host, "global", &log, "global");

	hook.add(&mut host, &global, at_end());
	hook.add(&mut host, &local, AddOptions {
		scope: Scope::BufferLocal,
		..AddOptions::default()
	});
	hook.run(&mut host);

	assert_eq!(*log.lock(), ["local", "global"]);
}

#[test]
fn create_with_self_enables_self_removal() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let count = Arc::new(AtomicUsize::new(0));

	let hk = hook.clone();
	let c = Arc::clone(&count);
	let f = FnHandle::create_with_self(
		&mut host,
		FnHandleDef::new("self-removing", "unregisters itself on first run"),
		move |host, me, _payload: Normal| {
			c.fetch_add(1, Ordering::SeqCst);
			hk.remove(host, me, Scope::Global);
			Ok(())
		},
	)
	.unwrap();

	hook.add(&mut host, &f, at_end());
	hook.run(&mut host);
	hook.run(&mut host);

	assert_eq!(count.load(Ordering::SeqCst), 1);
	assert!(hook.members(&host, Scope::Global).is_empty());
}

#[test]
fn rebinding_with_a_different_shape_is_an_error() {
	let mut host = MemoryHost::new();
	FnHandle::create(
		&mut host,
		FnHandleDef::new("dup", "first binding"),
		|_host, _payload: Normal| Ok(()),
	)
	.unwrap();

	let err = FnHandle::create(
		&mut host,
		FnHandleDef::new("dup", "conflicting binding"),
		|_host, _payload: FileVisit| Ok(()),
	)
	.unwrap_err();

	let RegisterError::ShapeConflict {
		symbol,
		existing,
		requested,
	} = err;
	assert_eq!(symbol.as_str(), "dup");
	assert_eq!(existing, PayloadKind::Normal);
	assert_eq!(requested, PayloadKind::File);
}

#[test]
fn rebinding_with_the_same_shape_replaces_the_body() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	logger(&mut host, "f", &log, "old");
	let f = logger(&mut host, "f", &log, "new");

	hook.add(&mut host, &f, at_end());
	hook.run(&mut host);

	assert_eq!(*log.lock(), ["new"]);
}

#[test]
fn typed_fire_delivers_the_payload() {
	let mut host = MemoryHost::new();
	let hook: Hook<AfterChange> = Hook::new(&mut host, "change-hook");
	let seen: Arc<Mutex<Option<AfterChange>>> = Arc::default();

	let s = Arc::clone(&seen);
	let f = FnHandle::create(
		&mut host,
		FnHandleDef::new("record-change", "records the change region"),
		move |_host, payload: AfterChange| {
			*s.lock() = Some(payload);
			Ok(())
		},
	)
	.unwrap();

	hook.add(&mut host, &f, at_end());
	hook.fire(&mut host, AfterChange {
		begin: 2,
		end: 5,
		old_len: 1,
	});

	assert_eq!(
		*seen.lock(),
		Some(AfterChange {
			begin: 2,
			end: 5,
			old_len: 1,
		})
	);
}

#[test]
fn member_without_binding_is_diagnosed_and_skipped() {
	let mut host = MemoryHost::new();
	let hook = normal_hook(&mut host);
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");

	hook.add(&mut host, &f, at_end());
	let var = hook.var().clone();
	let mut list = hook.members(&host, Scope::Global);
	list.insert(0, Symbol::from("ghost"));
	host.set_list_var(&var, Scope::Global, list);

	hook.run(&mut host);

	assert_eq!(*log.lock(), ["f"]);
	assert_eq!(host.messages().len(), 1);
	assert!(host.messages()[0].contains("ghost"));
}

#[test]
fn docstring_is_recorded_with_the_binding() {
	let mut host = MemoryHost::new();
	let log = SharedLog::default();
	let f = logger(&mut host, "f", &log, "f");

	assert_eq!(
		host.function_doc(f.symbol()),
		Some("appends to the shared log")
	);
}

#[test]
fn builtins_catalog_covers_every_shape_and_resolves_by_name() {
	let mut host = MemoryHost::new();
	let builtins = Builtins::install(&mut host);

	assert_eq!(builtins.infos().len(), 12);
	assert_eq!(
		builtins.lookup("after-change-hook").unwrap().kind,
		PayloadKind::AfterChange
	);
	assert_eq!(
		builtins.lookup("window-scroll-hook").unwrap().kind,
		PayloadKind::Window
	);
	assert!(builtins.lookup("no-such-hook").is_none());

	let log = SharedLog::default();
	let greet = logger(&mut host, "greet", &log, "hello");
	builtins.startup.add(&mut host, &greet, at_end());
	builtins.startup.run(&mut host);

	assert_eq!(*log.lock(), ["hello"]);
}
