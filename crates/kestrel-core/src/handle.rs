// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Shared object references for registries that must not own their items.
//!
//! A game object registers itself in several registries (update loops,
//! pausables, ...) but is owned elsewhere. Registries hold a [`WeakHandle`];
//! once the owner drops the object the handle goes dead and the registry
//! compacts it away on its next read-through.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A single-threaded shared, mutable object.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps `value` in a [`Shared`] cell.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// A non-owning reference to a [`Shared`] object.
///
/// Equality is identity: two handles are equal when they point at the same
/// allocation, whatever the value inside.
pub struct WeakHandle<T: ?Sized>(Weak<RefCell<T>>);

impl<T: ?Sized> WeakHandle<T> {
    /// Creates a handle from an existing weak pointer.
    pub fn new(weak: Weak<RefCell<T>>) -> Self {
        Self(weak)
    }

    /// Creates a handle pointing at `object`.
    pub fn from_shared(object: &Shared<T>) -> Self {
        Self(Rc::downgrade(object))
    }

    /// Returns `true` while the referenced object is still owned somewhere.
    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Upgrades to a strong reference if the object is still alive.
    pub fn upgrade(&self) -> Option<Shared<T>> {
        self.0.upgrade()
    }

    /// Runs `f` on the referenced object.
    ///
    /// Returns `None` if the object is gone, or if it is already mutably
    /// borrowed further up the stack.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let object = self.0.upgrade()?;
        let mut guard = match object.try_borrow_mut() {
            Ok(guard) => guard,
            Err(_) => {
                log::warn!("WeakHandle: object is already borrowed, skipping call.");
                return None;
            }
        };
        Some(f(&mut guard))
    }
}

impl<T: ?Sized> Clone for WeakHandle<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized> PartialEq for WeakHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl<T: ?Sized> Eq for WeakHandle<T> {}

impl<T: ?Sized> From<Weak<RefCell<T>>> for WeakHandle<T> {
    fn from(weak: Weak<RefCell<T>>) -> Self {
        Self(weak)
    }
}

impl<T: ?Sized> From<&Shared<T>> for WeakHandle<T> {
    fn from(object: &Shared<T>) -> Self {
        Self::from_shared(object)
    }
}

impl<T: ?Sized> fmt::Debug for WeakHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
