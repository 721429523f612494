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

//! A type-safe service locator for gameplay subsystems.
//!
//! The [`ServiceLocator`] provides a type-map where controllers, loaders
//! and timers are published once and retrieved by their concrete type,
//! without threading each of them through every constructor.
//!
//! # Design
//!
//! This follows the **Service Locator** pattern on top of a
//! [`TypedRegistry`]: one instance per concrete service type, and a second
//! registration of the same type is rejected rather than replacing the
//! first.

use crate::any::AsAny;
use crate::error::RegistryResult;
use crate::registry::TypedRegistry;

/// Marker capability for values published through a [`ServiceLocator`].
pub trait Service: AsAny {}

/// A service registry keyed by concrete type.
///
/// # Example
///
/// ```rust
/// use kestrel_core::{Service, ServiceLocator};
///
/// struct SceneLoader { loaded: u32 }
/// impl Service for SceneLoader {}
///
/// let mut locator = ServiceLocator::new();
/// locator.register(SceneLoader { loaded: 0 }).unwrap();
///
/// locator.get_mut::<SceneLoader>().unwrap().loaded += 1;
/// assert_eq!(locator.get::<SceneLoader>().unwrap().loaded, 1);
/// ```
#[derive(Default)]
pub struct ServiceLocator {
    services: TypedRegistry<dyn Service>,
}

impl ServiceLocator {
    /// Creates an empty service locator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            services: TypedRegistry::new(),
        }
    }

    /// Publishes `service`, keyed by `S`, and returns it.
    ///
    /// Fails with [`DuplicateRegistration`](crate::RegistryError::DuplicateRegistration)
    /// if a service of type `S` is already published.
    pub fn register<S: Service>(&mut self, service: S) -> RegistryResult<&mut S> {
        self.services.register(Box::new(service))?;
        self.services.get_mut::<S>()
    }

    /// Removes the service of type `S` and returns it.
    pub fn unregister<S: Service>(&mut self) -> RegistryResult<S> {
        self.services.unregister::<S>().map(|service| *service)
    }

    /// Retrieves a shared reference to the service of type `S`.
    pub fn get<S: Service>(&self) -> RegistryResult<&S> {
        self.services.get::<S>()
    }

    /// Retrieves a mutable reference to the service of type `S`.
    pub fn get_mut<S: Service>(&mut self) -> RegistryResult<&mut S> {
        self.services.get_mut::<S>()
    }

    /// Returns `true` if a service of type `S` is published.
    #[must_use]
    pub fn contains<S: Service>(&self) -> bool {
        self.services.contains::<S>()
    }

    /// Applies `action` to every published service. Order is unspecified.
    pub fn for_each(&self, action: impl FnMut(&dyn Service)) {
        self.services.for_each(action);
    }

    /// Returns the number of published services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if no services are published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl std::fmt::Debug for ServiceLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceLocator")
            .field("services", &self.services)
            .finish()
    }
}
