//! Single-threaded shared state.
//!
//! Documents and elements are handles: cloning one clones the handle, not
//! the state behind it. Everything lives on the one UI thread, so the cell
//! is an `Rc<RefCell<T>>` rather than a lock.

use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

/// A "shared" value.
///
/// Equivalent to `Rc<RefCell<T>>`.
#[derive(Default)]
pub struct Shared<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Shared<T> {
    /// Create a new shared `T`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Borrow the inner `T`.
    ///
    /// Panics if the value is currently borrowed mutably.
    pub fn get(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    /// Mutably borrow the inner `T`.
    ///
    /// Panics if the value is currently borrowed.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    /// Set the inner `T`.
    ///
    /// Returns the previous value.
    pub fn set(&self, value: T) -> T {
        self.inner.replace(value)
    }

    /// Whether two handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
