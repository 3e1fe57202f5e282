use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::dependencies::Dependencies;
use crate::evaluation::Evaluation;
use crate::object::Object;
use crate::value::{same_value, Value};
use crate::Subscriber;

/// Re-reads one key of a record whenever it is notified and passes the
/// value to its callback if it changed.
///
/// The watcher stays subscribed while any handle to it is alive.
#[derive(Clone)]
pub struct Watcher {
	body: Rc<WatcherBody>,
}

pub struct WatcherBody {
	data: Object,
	key: Rc<str>,
	callback: Box<dyn Fn(&Value)>,
	old: RefCell<Value>,
	dependencies: RefCell<Dependencies>,
	disposed: Cell<bool>,
	this: Weak<WatcherBody>,
}

impl Drop for WatcherBody {
	fn drop(&mut self) {
		let this = self.this.clone() as Weak<dyn Subscriber>;
		self.dependencies.get_mut().drop(&this)
	}
}

impl Watcher {
	#[must_use]
	pub fn new(data: &Object, key: &str, callback: impl Fn(&Value) + 'static) -> Self {
		let body = Rc::new_cyclic(|this| WatcherBody {
			data: data.clone(),
			key: Rc::from(key),
			callback: Box::new(callback),
			old: RefCell::new(Value::Undefined),
			dependencies: RefCell::new(Dependencies::new()),
			disposed: Cell::new(false),
			this: this.clone(),
		});

		let eval = Evaluation::new(Rc::downgrade(&body) as Weak<dyn Subscriber>);
		let value = body.data.get(&body.key, &eval);
		*body.old.borrow_mut() = value;
		*body.dependencies.borrow_mut() = eval.take();

		tracing::trace!(
			key = %body.key,
			dependencies = body.dependencies.borrow().len(),
			"watching"
		);

		Watcher { body }
	}

	pub fn key(&self) -> &str {
		&self.body.key
	}

	/// The last value seen.
	pub fn value(&self) -> Value {
		self.body.old.borrow().clone()
	}

	pub fn update(&self) {
		self.body.update();
	}

	pub fn subscriber(&self) -> Weak<dyn Subscriber> {
		Rc::downgrade(&self.body) as Weak<dyn Subscriber>
	}

	/// Unsubscribes from every property it currently reads.
	pub fn dispose(&self) {
		let this = self.subscriber();
		self.body.disposed.set(true);
		self.body.dependencies.borrow_mut().drop(&this);
	}
}

impl Subscriber for WatcherBody {
	fn update(&self) {
		if self.disposed.get() {
			return;
		}

		// Tracked again: a replaced parent record of a dotted path brings
		// new properties to subscribe to.
		let this = self.this.clone() as Weak<dyn Subscriber>;
		let eval = Evaluation::new(this.clone());
		let value = self.data.get(&self.key, &eval);
		self.dependencies.borrow_mut().swap(eval.take(), &this);

		if same_value(&value, &self.old.borrow()) {
			return;
		}

		// No borrow is held here: the callback may write back and
		// re-enter this watcher.
		(self.callback)(&value);
		*self.old.borrow_mut() = value;
	}
}

impl std::fmt::Debug for Watcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Watcher")
			.field("key", &self.body.key)
			.field("value", &*self.body.old.borrow())
			.finish()
	}
}
