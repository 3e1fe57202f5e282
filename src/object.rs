use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;

use fxhash::FxHashMap;

use crate::dependencies::DependencySet;
use crate::evaluation::Evaluation;
use crate::property::ObservableProperty;
use crate::value::Value;

/// A shared, insertion ordered record.
///
/// Fields start out plain and become [`ObservableProperty`] once the record
/// is observed. Clones share the same record.
#[derive(Clone, Default)]
pub struct Object {
	body: Rc<ObjectBody>,
}

#[derive(Default)]
struct ObjectBody {
	fields: RefCell<Fields>,
	observed: Cell<bool>,
}

#[derive(Default)]
struct Fields {
	entries: Vec<(Rc<str>, Field)>,
	index: FxHashMap<Rc<str>, usize>,
}

#[derive(Clone)]
pub(crate) enum Field {
	Plain(Value),
	Reactive(ObservableProperty),
}

impl Field {
	fn read(&self, eval: Option<&Evaluation>) -> Value {
		match (self, eval) {
			(Field::Plain(value), _) => value.clone(),
			(Field::Reactive(property), Some(eval)) => property.get(eval),
			(Field::Reactive(property), None) => property.get_once(),
		}
	}
}

impl Fields {
	fn get(&self, key: &str) -> Option<&Field> {
		self.index.get(key).map(|i| &self.entries[*i].1)
	}

	fn put(&mut self, key: &str, field: Field) {
		match self.index.get(key) {
			Some(i) => self.entries[*i].1 = field,
			None => {
				let key: Rc<str> = Rc::from(key);
				self.index.insert(key.clone(), self.entries.len());
				self.entries.push((key, field));
			}
		}
	}
}

impl Object {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(self, key: &str, value: impl Into<Value>) -> Self {
		self.set(key, value.into());
		self
	}

	pub fn ptr_eq(&self, other: &Object) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}

	pub fn len(&self) -> usize {
		self.body.fields.borrow().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.body.fields.borrow().index.contains_key(key)
	}

	pub fn keys(&self) -> Vec<Rc<str>> {
		let fields = self.body.fields.borrow();
		fields.entries.iter().map(|(k, _)| k.clone()).collect()
	}

	pub fn is_observed(&self) -> bool {
		self.body.observed.get()
	}

	/// Tracked read of `path`, a key or a dotted path into nested records.
	pub fn get(&self, path: &str, eval: &impl AsRef<Evaluation>) -> Value {
		self.read(path, Some(eval.as_ref()))
	}

	pub fn get_once(&self, path: &str) -> Value {
		self.read(path, None)
	}

	pub fn property(&self, key: &str) -> Option<ObservableProperty> {
		match self.field(key)? {
			Field::Reactive(property) => Some(property),
			Field::Plain(_) => None,
		}
	}

	pub fn dependency_set(&self, key: &str) -> Option<DependencySet> {
		self.property(key).map(|p| p.dependency_set().clone())
	}

	/// Writes a direct field. Reactive fields notify their subscribers,
	/// unknown keys are added as plain fields.
	pub fn set(&self, key: &str, value: Value) {
		match self.field(key) {
			Some(Field::Reactive(property)) => {
				property.set(value);
			}
			_ => self.put(key, Field::Plain(value)),
		}
	}

	/// Writes `path`, resolving every segment but the last one.
	pub fn set_path(&self, path: &str, value: Value) {
		if self.contains_key(path) {
			return self.set(path, value);
		}

		match path.rsplit_once('.') {
			Some((parent, key)) => match self.get_once(parent) {
				Value::Object(object) => object.set(key.trim(), value),
				_ => tracing::warn!(path, "cannot write through a non-object"),
			},
			None => self.set(path.trim(), value),
		}
	}

	pub(crate) fn mark_observed(&self) -> bool {
		!self.body.observed.replace(true)
	}

	pub(crate) fn plain_fields(&self) -> Vec<(Rc<str>, Value)> {
		let fields = self.body.fields.borrow();
		fields
			.entries
			.iter()
			.filter_map(|(key, field)| match field {
				Field::Plain(value) => Some((key.clone(), value.clone())),
				Field::Reactive(_) => None,
			})
			.collect()
	}

	pub(crate) fn put(&self, key: &str, field: Field) {
		self.body.fields.borrow_mut().put(key, field);
	}

	fn field(&self, key: &str) -> Option<Field> {
		self.body.fields.borrow().get(key).cloned()
	}

	fn read(&self, path: &str, eval: Option<&Evaluation>) -> Value {
		if let Some(field) = self.field(path) {
			return field.read(eval);
		}

		let mut segments = path.split('.').map(str::trim);
		let mut current = match segments.next().and_then(|s| self.field(s)) {
			Some(field) => field.read(eval),
			None => return Value::Undefined,
		};

		for segment in segments {
			current = match current.as_object().and_then(|o| o.field(segment)) {
				Some(field) => field.read(eval),
				None => return Value::Undefined,
			};
		}

		current
	}
}

impl Debug for Object {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		// Records may contain themselves, only keys are printed.
		f.debug_struct("Object")
			.field("keys", &self.keys())
			.field("observed", &self.is_observed())
			.finish()
	}
}
