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

//! A registry holding at most one instance per concrete type.

use crate::any::AsAny;
use crate::error::{RegistryError, RegistryResult};
use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// A type-map from concrete runtime type to a single boxed instance.
///
/// `T` is the shared capability, usually a trait object such as
/// `dyn Service`. Values are keyed by the concrete type of the boxed value
/// and retrieved by that concrete type. Iteration order is unspecified.
///
/// # Example
///
/// ```rust
/// use kestrel_core::{AsAny, TypedRegistry};
///
/// trait Loader: AsAny {}
/// struct SceneLoader { scenes: u32 }
/// impl Loader for SceneLoader {}
///
/// let mut registry: TypedRegistry<dyn Loader> = TypedRegistry::new();
/// registry.register(Box::new(SceneLoader { scenes: 3 })).unwrap();
///
/// assert_eq!(registry.get::<SceneLoader>().unwrap().scenes, 3);
/// assert!(registry.register(Box::new(SceneLoader { scenes: 1 })).is_err());
/// ```
pub struct TypedRegistry<T: ?Sized + AsAny> {
    items: HashMap<TypeId, Box<T>>,
}

impl<T: ?Sized + AsAny> TypedRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
        }
    }

    /// Stores `item`, keyed by its concrete type.
    ///
    /// Fails with [`RegistryError::DuplicateRegistration`] if an instance of
    /// that type is already present; the existing entry is kept.
    pub fn register(&mut self, item: Box<T>) -> RegistryResult<&mut T> {
        let key = (*item).concrete_type_id();
        let type_name = (*item).concrete_type_name();
        match self.items.entry(key) {
            Entry::Occupied(_) => {
                log::warn!("TypedRegistry: rejected duplicate registration of `{type_name}`.");
                Err(RegistryError::DuplicateRegistration { type_name })
            }
            Entry::Vacant(slot) => {
                log::debug!("TypedRegistry: registered `{type_name}`.");
                Ok(&mut **slot.insert(item))
            }
        }
    }

    /// Removes and returns the entry for type `S`.
    pub fn unregister<S: Any>(&mut self) -> RegistryResult<Box<S>> {
        let boxed = self
            .items
            .remove(&TypeId::of::<S>())
            .ok_or_else(RegistryError::not_found::<S>)?;
        log::debug!(
            "TypedRegistry: unregistered `{}`.",
            std::any::type_name::<S>()
        );
        AsAny::into_any(boxed)
            .downcast::<S>()
            .map_err(|_| RegistryError::not_found::<S>())
    }

    /// Returns the entry for type `S`.
    pub fn get<S: Any>(&self) -> RegistryResult<&S> {
        self.get_by_key(TypeId::of::<S>())
            .and_then(|item| item.as_any().downcast_ref::<S>())
            .ok_or_else(RegistryError::not_found::<S>)
    }

    /// Returns the entry for type `S` mutably.
    pub fn get_mut<S: Any>(&mut self) -> RegistryResult<&mut S> {
        self.get_by_key_mut(TypeId::of::<S>())
            .and_then(|item| item.as_any_mut().downcast_mut::<S>())
            .ok_or_else(RegistryError::not_found::<S>)
    }

    /// Returns `true` if an instance of type `S` is registered.
    #[must_use]
    pub fn contains<S: Any>(&self) -> bool {
        self.items.contains_key(&TypeId::of::<S>())
    }

    /// Applies `action` to every stored value.
    pub fn for_each(&self, mut action: impl FnMut(&T)) {
        for item in self.items.values() {
            action(item.as_ref());
        }
    }

    /// Applies `action` to every stored value with mutable access.
    pub fn for_each_mut(&mut self, mut action: impl FnMut(&mut T)) {
        for item in self.items.values_mut() {
            action(item.as_mut());
        }
    }

    /// Iterates over the stored values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values().map(|item| item.as_ref())
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of distinct registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn contains_key(&self, key: TypeId) -> bool {
        self.items.contains_key(&key)
    }

    pub(crate) fn get_by_key(&self, key: TypeId) -> Option<&T> {
        self.items.get(&key).map(|item| item.as_ref())
    }

    pub(crate) fn get_by_key_mut(&mut self, key: TypeId) -> Option<&mut T> {
        self.items.get_mut(&key).map(|item| item.as_mut())
    }
}

impl<T: ?Sized + AsAny> Default for TypedRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + AsAny> fmt::Debug for TypedRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|item| item.concrete_type_name()))
            .finish()
    }
}
