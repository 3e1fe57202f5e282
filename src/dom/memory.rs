//! An in-memory host tree.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::{Attribute, Document, Listener, ListenerId, Node, NodeKind, NodeRef};

pub struct MemoryNode {
	kind: NodeKind,
	tag: String,
	text: RefCell<String>,
	value: RefCell<String>,
	attributes: RefCell<Vec<Attribute>>,
	children: RefCell<Vec<Rc<MemoryNode>>>,
	listeners: RefCell<Vec<(String, ListenerId, Listener)>>,
	next_listener: Cell<u64>,
	value_writes: Cell<usize>,
}

impl MemoryNode {
	fn new(kind: NodeKind, tag: &str, text: &str) -> Rc<Self> {
		Rc::new(MemoryNode {
			kind,
			tag: tag.to_owned(),
			text: RefCell::new(text.to_owned()),
			value: RefCell::new(String::new()),
			attributes: RefCell::new(Vec::new()),
			children: RefCell::new(Vec::new()),
			listeners: RefCell::new(Vec::new()),
			next_listener: Cell::new(0),
			value_writes: Cell::new(0),
		})
	}

	pub fn element(tag: &str) -> Rc<Self> {
		Self::new(NodeKind::Element, tag, "")
	}

	pub fn text(text: &str) -> Rc<Self> {
		Self::new(NodeKind::Text, "#text", text)
	}

	pub fn comment(text: &str) -> Rc<Self> {
		Self::new(NodeKind::Other, "#comment", text)
	}

	pub fn with_attr(self: Rc<Self>, name: &str, value: &str) -> Rc<Self> {
		self.set_attribute(name, value);
		self
	}

	pub fn with_child(self: Rc<Self>, child: Rc<MemoryNode>) -> Rc<Self> {
		self.append(child);
		self
	}

	pub fn append(&self, child: Rc<MemoryNode>) {
		self.children.borrow_mut().push(child);
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn child_nodes(&self) -> Vec<Rc<MemoryNode>> {
		self.children.borrow().clone()
	}

	pub fn attribute(&self, name: &str) -> Option<String> {
		let attributes = self.attributes.borrow();
		attributes
			.iter()
			.find(|a| a.name == name)
			.map(|a| a.value.clone())
	}

	pub fn set_attribute(&self, name: &str, value: &str) {
		let mut attributes = self.attributes.borrow_mut();
		match attributes.iter_mut().find(|a| a.name == name) {
			Some(attribute) => attribute.value = value.to_owned(),
			None => attributes.push(Attribute {
				name: name.to_owned(),
				value: value.to_owned(),
			}),
		}
	}

	pub fn listener_count(&self, event: &str) -> usize {
		let listeners = self.listeners.borrow();
		listeners.iter().filter(|(e, _, _)| e == event).count()
	}

	/// Runs the listeners registered for `event`, returns how many ran.
	pub fn dispatch(&self, event: &str) -> usize {
		let listeners: Vec<Listener> = self
			.listeners
			.borrow()
			.iter()
			.filter(|(e, _, _)| e == event)
			.map(|(_, _, l)| l.clone())
			.collect();

		for listener in &listeners {
			listener();
		}

		listeners.len()
	}

	/// How often the value was written through [`Node::set_value`].
	/// Simulated typing does not count.
	pub fn value_writes(&self) -> usize {
		self.value_writes.get()
	}

	pub fn click(&self) -> usize {
		self.dispatch("click")
	}

	/// Simulates typing: replaces the value and dispatches `input`.
	pub fn input(&self, value: &str) -> usize {
		*self.value.borrow_mut() = value.to_owned();
		self.dispatch("input")
	}

	/// First node in document order, starting with `self`, matching `predicate`.
	pub fn find(self: &Rc<Self>, predicate: &impl Fn(&MemoryNode) -> bool) -> Option<Rc<MemoryNode>> {
		if predicate(&**self) {
			return Some(self.clone());
		}

		self.child_nodes().iter().find_map(|child| child.find(predicate))
	}

	pub fn matches(&self, selector: &str) -> bool {
		if self.kind != NodeKind::Element {
			return false;
		}

		if let Some(id) = selector.strip_prefix('#') {
			self.attribute("id").as_deref() == Some(id)
		} else if let Some(class) = selector.strip_prefix('.') {
			self.attribute("class")
				.map_or(false, |c| c.split_whitespace().any(|c| c == class))
		} else {
			self.tag.eq_ignore_ascii_case(selector)
		}
	}
}

impl Node for MemoryNode {
	fn kind(&self) -> NodeKind {
		self.kind
	}

	fn children(&self) -> Vec<NodeRef> {
		let children = self.children.borrow();
		children.iter().map(|c| c.clone() as NodeRef).collect()
	}

	fn text_content(&self) -> String {
		match self.kind {
			NodeKind::Element => {
				let children = self.children.borrow();
				children.iter().map(|c| c.text_content()).collect()
			}
			NodeKind::Text => self.text.borrow().clone(),
			NodeKind::Other => String::new(),
		}
	}

	fn set_text_content(&self, text: &str) {
		match self.kind {
			NodeKind::Element => {
				let mut children = self.children.borrow_mut();
				children.clear();
				if !text.is_empty() {
					children.push(MemoryNode::text(text));
				}
			}
			_ => *self.text.borrow_mut() = text.to_owned(),
		}
	}

	fn attributes(&self) -> Vec<Attribute> {
		self.attributes.borrow().clone()
	}

	fn value(&self) -> String {
		self.value.borrow().clone()
	}

	fn set_value(&self, value: &str) {
		self.value_writes.set(self.value_writes.get() + 1);
		*self.value.borrow_mut() = value.to_owned();
	}

	fn add_event_listener(&self, event: &str, listener: Listener) -> ListenerId {
		let id = ListenerId(self.next_listener.get());
		self.next_listener.set(id.0 + 1);
		self.listeners
			.borrow_mut()
			.push((event.to_owned(), id, listener));
		id
	}

	fn remove_event_listener(&self, event: &str, id: ListenerId) {
		self.listeners
			.borrow_mut()
			.retain(|(e, i, _)| !(e == event && *i == id));
	}
}

impl std::fmt::Debug for MemoryNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryNode")
			.field("tag", &self.tag)
			.field("text", &self.text_content())
			.finish()
	}
}

pub struct MemoryDocument {
	root: Rc<MemoryNode>,
}

impl MemoryDocument {
	pub fn new(root: Rc<MemoryNode>) -> Self {
		MemoryDocument { root }
	}

	pub fn root(&self) -> &Rc<MemoryNode> {
		&self.root
	}

	pub fn find(&self, selector: &str) -> Option<Rc<MemoryNode>> {
		self.root.find(&|node: &MemoryNode| node.matches(selector))
	}
}

impl Document for MemoryDocument {
	fn query_selector(&self, selector: &str) -> Option<NodeRef> {
		self.find(selector).map(|node| node as NodeRef)
	}
}
