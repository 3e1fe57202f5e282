//! Reactive data binding for DOM-like trees.
//!
//! An [`Instance`] makes its data record observable, walks its root node and
//! binds `{{ key }}` interpolations and the `v-text`, `v-model` and
//! `v-on:click` directives. Writes to the record update the bound nodes
//! synchronously.

pub mod directive;
pub mod dom;
pub mod macros;
pub mod observer;

mod addr;
mod compiler;
mod dependencies;
mod error;
mod evaluation;
mod instance;
mod object;
mod property;
mod value;
mod watcher;

pub use compiler::{Binding, Compiler};
pub use dependencies::{Dependencies, DependencySet};
pub use error::{Error, Result};
pub use evaluation::Evaluation;
pub use instance::{El, Instance, Method, Options};
pub use object::Object;
pub use property::ObservableProperty;
pub use value::{same_value, Value};
pub use watcher::Watcher;

/// Something a [`DependencySet`] can notify.
pub trait Subscriber: 'static {
	/// Called after a property this subscriber read has changed.
	fn update(&self);
}
