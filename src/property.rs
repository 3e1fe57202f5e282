use std::fmt::Debug;
use std::rc::Rc;
use std::cell::RefCell;

use crate::dependencies::DependencySet;
use crate::evaluation::Evaluation;
use crate::value::{same_value, Value};
use crate::observer;

/// A reactive field: the backing value and the one set of its subscribers.
#[derive(Clone)]
pub struct ObservableProperty {
	body: Rc<PropertyBody>,
}

struct PropertyBody {
	key: Rc<str>,
	value: RefCell<Value>,
	dependencies: DependencySet,
}

impl ObservableProperty {
	pub(crate) fn new(key: Rc<str>, value: Value) -> Self {
		ObservableProperty {
			body: Rc::new(PropertyBody {
				key,
				value: RefCell::new(value),
				dependencies: DependencySet::new(),
			}),
		}
	}

	pub fn key(&self) -> &str {
		&self.body.key
	}

	pub fn get(&self, eval: &impl AsRef<Evaluation>) -> Value {
		eval.as_ref().based_on(&self.body.dependencies);
		self.get_once()
	}

	pub fn get_once(&self) -> Value {
		self.body.value.borrow().clone()
	}

	/// Stores `value` and notifies subscribers, unless it is the same value.
	///
	/// Returns whether anything changed.
	pub fn set(&self, value: Value) -> bool {
		{
			let mut current = self.body.value.borrow_mut();
			if same_value(&current, &value) {
				return false;
			}
			*current = value.clone();
		}

		observer::walk(&value);

		tracing::trace!(key = %self.body.key, "changed");
		self.body.dependencies.notify();
		true
	}

	pub fn dependency_set(&self) -> &DependencySet {
		&self.body.dependencies
	}
}

impl Debug for ObservableProperty {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ObservableProperty")
			.field("key", &self.body.key)
			.field("dependencies", &self.body.dependencies)
			.finish()
	}
}
