use std::ops::Deref;
use std::rc::Weak;

/// Compares weak pointers by the address of their allocation.
pub struct WeakAddr<T: ?Sized> {
	ptr: Weak<T>,
}

impl<T: ?Sized> WeakAddr<T> {
	pub fn new(ptr: Weak<T>) -> Self {
		WeakAddr { ptr }
	}

	pub fn is(&self, other: &Weak<T>) -> bool {
		same_allocation(&self.ptr, other)
	}
}

impl<T: ?Sized> Clone for WeakAddr<T> {
	fn clone(&self) -> Self {
		WeakAddr {
			ptr: self.ptr.clone(),
		}
	}
}

impl<T: ?Sized> Deref for WeakAddr<T> {
	type Target = Weak<T>;
	fn deref(&self) -> &Self::Target {
		&self.ptr
	}
}

impl<T: ?Sized> PartialEq for WeakAddr<T> {
	fn eq(&self, other: &Self) -> bool {
		same_allocation(&self.ptr, &other.ptr)
	}
}

impl<T: ?Sized> Eq for WeakAddr<T> {}

// Vtable pointers are not unique, only the data half is compared.
fn same_allocation<T: ?Sized>(a: &Weak<T>, b: &Weak<T>) -> bool {
	Weak::as_ptr(a) as *const () == Weak::as_ptr(b) as *const ()
}
