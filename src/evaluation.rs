use std::cell::RefCell;
use std::rc::Weak;

use crate::dependencies::{Dependencies, DependencySet};
use crate::Subscriber;

/// Tracking context of one subscriber evaluation.
///
/// Every reactive read made through it registers the subscriber into the
/// read property's [`DependencySet`].
pub struct Evaluation {
	inner: RefCell<EvaluationInner>,
	subscriber: Weak<dyn Subscriber>,
}

impl AsRef<Evaluation> for Evaluation {
	fn as_ref(&self) -> &Evaluation {
		self
	}
}

struct EvaluationInner {
	dependencies: Dependencies,
}

impl Evaluation {
	pub fn new(subscriber: Weak<dyn Subscriber>) -> Self {
		Evaluation {
			subscriber,
			inner: RefCell::new(EvaluationInner {
				dependencies: Dependencies::new(),
			}),
		}
	}

	pub fn subscriber(&self) -> &Weak<dyn Subscriber> {
		&self.subscriber
	}

	pub(crate) fn based_on(&self, set: &DependencySet) {
		if set.add(&self.subscriber) || set.contains(&self.subscriber) {
			self.inner.borrow_mut().dependencies.based_on(set.clone());
		}
	}

	pub fn take(self) -> Dependencies {
		self.inner.into_inner().dependencies
	}
}
