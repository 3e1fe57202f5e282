use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::addr::WeakAddr;
use crate::Subscriber;

/// Subscribers of a single observable property.
///
/// Cloning yields another handle to the same set.
#[derive(Clone, Default)]
pub struct DependencySet {
	subscribers: Rc<RefCell<SmallVec<[WeakAddr<dyn Subscriber>; 4]>>>,
}

impl DependencySet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns `false` when the subscriber is gone or already present.
	pub fn add(&self, subscriber: &Weak<dyn Subscriber>) -> bool {
		if subscriber.strong_count() == 0 {
			return false;
		}

		let mut subscribers = self.subscribers.borrow_mut();
		if subscribers.iter().any(|s| s.is(subscriber)) {
			return false;
		}

		subscribers.push(WeakAddr::new(subscriber.clone()));
		true
	}

	pub fn remove(&self, subscriber: &Weak<dyn Subscriber>) {
		self.subscribers.borrow_mut().retain(|s| !s.is(subscriber));
	}

	pub fn contains(&self, subscriber: &Weak<dyn Subscriber>) -> bool {
		self.subscribers.borrow().iter().any(|s| s.is(subscriber))
	}

	pub fn len(&self) -> usize {
		self.subscribers.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.subscribers.borrow().is_empty()
	}

	pub fn notify(&self) {
		let live: SmallVec<[Rc<dyn Subscriber>; 4]> = {
			let mut subscribers = self.subscribers.borrow_mut();
			subscribers.retain(|s| s.strong_count() > 0);
			subscribers.iter().filter_map(|s| s.upgrade()).collect()
		};

		tracing::trace!(subscribers = live.len(), "notify");

		// The borrow is released: updates may write back into this set.
		for subscriber in live {
			subscriber.update();
		}
	}

	pub fn ptr_eq(&self, other: &DependencySet) -> bool {
		Rc::ptr_eq(&self.subscribers, &other.subscribers)
	}
}

impl Debug for DependencySet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DependencySet")
			.field("subscribers", &self.len())
			.finish()
	}
}

/// The sets one subscriber was registered into.
#[derive(Default)]
pub struct Dependencies {
	based_on: SmallVec<[DependencySet; 2]>,
}

impl Dependencies {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn based_on(&mut self, set: DependencySet) {
		if !self.based_on.iter().any(|s| s.ptr_eq(&set)) {
			self.based_on.push(set);
		}
	}

	pub fn len(&self) -> usize {
		self.based_on.len()
	}

	pub fn is_empty(&self) -> bool {
		self.based_on.is_empty()
	}

	pub fn drop(&mut self, subscriber: &Weak<dyn Subscriber>) {
		for set in self.based_on.drain(..) {
			set.remove(subscriber);
		}
	}

	/// Replaces the list with `next`, leaving the sets that are not part of
	/// it.
	pub fn swap(&mut self, next: Dependencies, subscriber: &Weak<dyn Subscriber>) {
		let prev = std::mem::replace(&mut self.based_on, next.based_on);

		prev.iter()
			.filter(|set| !self.based_on.iter().any(|s| s.ptr_eq(set)))
			.for_each(|set| set.remove(subscriber));
	}
}
