//! Turns plain records into reactive ones.

use std::rc::Rc;

use crate::object::{Field, Object};
use crate::property::ObservableProperty;
use crate::value::Value;

/// Observes `value` if it is a record, does nothing otherwise.
pub fn walk(value: &Value) {
	if let Value::Object(object) = value {
		observe(object);
	}
}

/// Converts every plain field of `object` into an [`ObservableProperty`],
/// nested records first.
///
/// A record is observed at most once, so reference cycles terminate.
pub fn observe(object: &Object) {
	if !object.mark_observed() {
		return;
	}

	for (key, value) in object.plain_fields() {
		define_reactive(object, key, value);
	}
}

pub fn define_reactive(object: &Object, key: Rc<str>, value: Value) -> ObservableProperty {
	walk(&value);

	let property = ObservableProperty::new(key.clone(), value);
	object.put(&key, Field::Reactive(property.clone()));

	property
}
