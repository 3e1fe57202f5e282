//! The host tree the compiler walks.
//!
//! Bindings only touch nodes through [`Node`], so any tree providing these
//! capabilities can be bound: a browser DOM, a virtual tree, or
//! [`memory::MemoryNode`].

use std::rc::Rc;

pub mod memory;

pub type NodeRef = Rc<dyn Node>;

pub type Listener = Rc<dyn Fn()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
	Element,
	Text,
	Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
	pub name: String,
	pub value: String,
}

pub trait Node: 'static {
	fn kind(&self) -> NodeKind;

	fn children(&self) -> Vec<NodeRef>;

	fn text_content(&self) -> String;

	fn set_text_content(&self, text: &str);

	fn attributes(&self) -> Vec<Attribute>;

	/// Current value of a form control.
	fn value(&self) -> String;

	fn set_value(&self, value: &str);

	fn add_event_listener(&self, event: &str, listener: Listener) -> ListenerId;

	fn remove_event_listener(&self, event: &str, id: ListenerId);
}

pub trait Document {
	fn query_selector(&self, selector: &str) -> Option<NodeRef>;
}
