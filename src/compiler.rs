use std::rc::Rc;

use enclose::enclose;
use smallvec::SmallVec;

use crate::directive::{self, Directive};
use crate::dom::{Listener, ListenerId, NodeKind, NodeRef};
use crate::instance::Instance;
use crate::value::Value;
use crate::watcher::Watcher;

/// Everything one directive or interpolation attached to a node.
#[derive(Default)]
pub struct Binding {
	watchers: SmallVec<[Watcher; 1]>,
	listeners: SmallVec<[(NodeRef, &'static str, ListenerId); 1]>,
}

impl Binding {
	fn watch(mut self, watcher: Watcher) -> Self {
		self.watchers.push(watcher);
		self
	}

	fn listen(mut self, node: &NodeRef, event: &'static str, listener: Listener) -> Self {
		let id = node.add_event_listener(event, listener);
		self.listeners.push((node.clone(), event, id));
		self
	}

	pub fn watchers(&self) -> &[Watcher] {
		&self.watchers
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	/// Unsubscribes the watchers and detaches the listeners.
	pub fn dispose(&mut self) {
		for watcher in self.watchers.drain(..) {
			watcher.dispose();
		}

		for (node, event, id) in self.listeners.drain(..) {
			node.remove_event_listener(event, id);
		}
	}
}

impl std::fmt::Debug for Binding {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Binding")
			.field("watchers", &self.watchers)
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

/// Walks a node tree and binds every interpolation and directive found in
/// it to an instance.
pub struct Compiler<'a> {
	instance: &'a Instance,
}

impl<'a> Compiler<'a> {
	pub fn new(instance: &'a Instance) -> Self {
		Compiler { instance }
	}

	/// Binds the descendants of `root`, in document order.
	pub fn compile(&self, root: &NodeRef) -> Vec<Binding> {
		let mut bindings = Vec::new();
		self.compile_children(root, &mut bindings);
		bindings
	}

	fn compile_children(&self, node: &NodeRef, bindings: &mut Vec<Binding>) {
		for child in node.children() {
			match child.kind() {
				NodeKind::Text => bindings.extend(self.compile_text(&child)),
				NodeKind::Element => self.compile_element(&child, bindings),
				NodeKind::Other => {}
			}

			// Children are read again: a binding may have replaced them.
			self.compile_children(&child, bindings);
		}
	}

	fn compile_text(&self, node: &NodeRef) -> Option<Binding> {
		let text = node.text_content();
		let key = directive::interpolation_key(&text)?;

		tracing::debug!(key, "interpolation");
		Some(self.bind_text(node, key))
	}

	fn compile_element(&self, node: &NodeRef, bindings: &mut Vec<Binding>) {
		for attribute in node.attributes() {
			let key = attribute.value.trim();
			let binding = match directive::parse_directive(&attribute.name) {
				Some(Directive::Text) => self.bind_text(node, key),
				Some(Directive::Model) => self.bind_model(node, key),
				Some(Directive::On(event)) if event == "click" => self.bind_click(node, key),
				Some(Directive::On(event)) => {
					tracing::debug!(event = %event, "unsupported event directive ignored");
					continue;
				}
				None => {
					if attribute.name.starts_with(directive::PREFIX) {
						tracing::debug!(name = %attribute.name, "unknown directive ignored");
					}
					continue;
				}
			};

			tracing::debug!(directive = %attribute.name, key, "directive");
			bindings.push(binding);
		}
	}

	fn bind_text(&self, node: &NodeRef, key: &str) -> Binding {
		node.set_text_content(&self.instance.get(key).to_string());

		let watcher = Watcher::new(
			self.instance.data(),
			key,
			enclose!((node) move |value: &Value| {
				node.set_text_content(&value.to_string());
			}),
		);

		Binding::default().watch(watcher)
	}

	fn bind_model(&self, node: &NodeRef, key: &str) -> Binding {
		node.set_value(&self.instance.get(key).to_string());

		let watcher = Watcher::new(
			self.instance.data(),
			key,
			enclose!((node) move |value: &Value| {
				let value = value.to_string();
				if node.value() != value {
					node.set_value(&value);
				}
			}),
		);

		let target = Rc::downgrade(node);
		let instance = self.instance.downgrade();
		let key: Rc<str> = Rc::from(key);
		let listener: Listener = Rc::new(move || {
			if let (Some(node), Some(instance)) = (target.upgrade(), instance.upgrade()) {
				instance.set(&key, Value::String(node.value()));
			}
		});

		Binding::default().watch(watcher).listen(node, "input", listener)
	}

	fn bind_click(&self, node: &NodeRef, method: &str) -> Binding {
		let instance = self.instance.downgrade();
		let method: Rc<str> = Rc::from(method);
		let listener: Listener = Rc::new(move || {
			let Some(instance) = instance.upgrade() else {
				return;
			};

			if let Err(error) = instance.call(&method) {
				tracing::error!(%error, "click handler failed");
			}
		});

		Binding::default().listen(node, "click", listener)
	}
}
