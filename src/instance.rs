use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fxhash::FxHashMap;

use crate::compiler::{Binding, Compiler};
use crate::dom::{Document, Node, NodeRef};
use crate::error::{Error, Result};
use crate::object::Object;
use crate::observer;
use crate::value::{same_value, Value};

pub type Method = Rc<dyn Fn(&Instance)>;

/// Where the root node comes from.
pub enum El {
	Selector(String),
	Node(NodeRef),
}

impl From<&str> for El {
	fn from(selector: &str) -> Self {
		El::Selector(selector.to_owned())
	}
}

impl From<String> for El {
	fn from(selector: String) -> Self {
		El::Selector(selector)
	}
}

impl From<NodeRef> for El {
	fn from(node: NodeRef) -> Self {
		El::Node(node)
	}
}

impl<N: Node> From<Rc<N>> for El {
	fn from(node: Rc<N>) -> Self {
		El::Node(node)
	}
}

/// Construction options of an [`Instance`].
#[derive(Default)]
pub struct Options {
	el: Option<El>,
	data: Object,
	methods: FxHashMap<Rc<str>, Method>,
}

impl Options {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn el(mut self, el: impl Into<El>) -> Self {
		self.el = Some(el.into());
		self
	}

	pub fn data(mut self, data: Object) -> Self {
		self.data = data;
		self
	}

	/// Registers a handler; it runs with the instance as its receiver.
	pub fn method(mut self, name: &str, method: impl Fn(&Instance) + 'static) -> Self {
		self.methods.insert(Rc::from(name), Rc::new(method));
		self
	}
}

/// A data record bound to a node tree.
///
/// Bindings live as long as the instance: dropping the last handle, or
/// calling [`Instance::unmount`], detaches them.
#[derive(Clone)]
pub struct Instance {
	body: Rc<InstanceBody>,
}

struct InstanceBody {
	el: NodeRef,
	data: Object,
	methods: FxHashMap<Rc<str>, Method>,
	keys: Vec<Rc<str>>,
	bindings: RefCell<Vec<Binding>>,
}

impl Drop for InstanceBody {
	fn drop(&mut self) {
		for binding in self.bindings.get_mut().iter_mut() {
			binding.dispose();
		}
	}
}

#[derive(Clone)]
pub(crate) struct WeakInstance(Weak<InstanceBody>);

impl WeakInstance {
	pub(crate) fn upgrade(&self) -> Option<Instance> {
		self.0.upgrade().map(|body| Instance { body })
	}
}

impl Instance {
	/// Resolves the root, makes the data reactive, then binds the tree.
	pub fn new(options: Options, document: &dyn Document) -> Result<Self> {
		Self::mount_with(options, Some(document))
	}

	/// Like [`Instance::new`] for options that carry the root node itself.
	pub fn mount(options: Options) -> Result<Self> {
		Self::mount_with(options, None)
	}

	fn mount_with(options: Options, document: Option<&dyn Document>) -> Result<Self> {
		let span = tracing::debug_span!("mount");
		let _enter = span.enter();

		let el = match options.el {
			None => return Err(Error::MissingRoot),
			Some(El::Node(node)) => node,
			Some(El::Selector(selector)) => {
				match document.and_then(|d| d.query_selector(&selector)) {
					Some(node) => node,
					None => return Err(Error::RootNotFound(selector)),
				}
			}
		};

		let keys = options.data.keys();
		observer::observe(&options.data);

		let instance = Instance {
			body: Rc::new(InstanceBody {
				el,
				data: options.data,
				methods: options.methods,
				keys,
				bindings: RefCell::new(Vec::new()),
			}),
		};

		let bindings = Compiler::new(&instance).compile(&instance.body.el);
		tracing::debug!(bindings = bindings.len(), "mounted");
		*instance.body.bindings.borrow_mut() = bindings;

		Ok(instance)
	}

	pub fn el(&self) -> &NodeRef {
		&self.body.el
	}

	pub fn data(&self) -> &Object {
		&self.body.data
	}

	/// Top level data keys, in declaration order.
	pub fn keys(&self) -> &[Rc<str>] {
		&self.body.keys
	}

	pub fn get(&self, key: &str) -> Value {
		self.body.data.get_once(key)
	}

	/// Writes through to the data record. Writing the value already held
	/// neither stores nor notifies.
	pub fn set(&self, key: &str, value: impl Into<Value>) {
		let value = value.into();
		if same_value(&self.get(key), &value) {
			return;
		}

		self.body.data.set_path(key, value);
	}

	pub fn call(&self, name: &str) -> Result<()> {
		let method = self
			.body
			.methods
			.get(name)
			.cloned()
			.ok_or_else(|| Error::MissingMethod(name.to_owned()))?;

		method(self);
		Ok(())
	}

	pub fn binding_count(&self) -> usize {
		self.body.bindings.borrow().len()
	}

	/// Detaches every binding. Later writes no longer reach the tree.
	pub fn unmount(&self) {
		let bindings = std::mem::take(&mut *self.body.bindings.borrow_mut());
		for mut binding in bindings {
			binding.dispose();
		}
	}

	pub(crate) fn downgrade(&self) -> WeakInstance {
		WeakInstance(Rc::downgrade(&self.body))
	}
}

impl std::fmt::Debug for Instance {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Instance")
			.field("keys", &self.body.keys)
			.field("methods", &self.body.methods.len())
			.field("bindings", &self.binding_count())
			.finish()
	}
}
