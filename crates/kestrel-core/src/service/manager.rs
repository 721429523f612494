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

//! Global and scene-local service locators.

use super::locator::{Service, ServiceLocator};
use crate::error::{RegistryError, RegistryResult};

/// Holds the two service scopes of a running game.
///
/// The global locator lives for the whole session and can be installed
/// only once. The local locator belongs to the current scene and is
/// swapped freely on scene changes.
#[derive(Debug, Default)]
pub struct ServiceManager {
    global: Option<ServiceLocator>,
    local: ServiceLocator,
}

impl ServiceManager {
    /// Creates a manager with no global locator and an empty local one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the global locator.
    ///
    /// Returns `false` and leaves the current one in place if a global
    /// locator was already installed.
    pub fn set_global(&mut self, locator: ServiceLocator) -> bool {
        if self.global.is_some() {
            log::warn!("ServiceManager: global services are already set, ignoring replacement.");
            return false;
        }
        log::info!(
            "ServiceManager: global services installed ({} service(s)).",
            locator.len()
        );
        self.global = Some(locator);
        true
    }

    /// The global locator, if installed.
    pub fn global(&self) -> Option<&ServiceLocator> {
        self.global.as_ref()
    }

    /// The global locator mutably, if installed.
    pub fn global_mut(&mut self) -> Option<&mut ServiceLocator> {
        self.global.as_mut()
    }

    /// The scene-local locator.
    pub fn local(&self) -> &ServiceLocator {
        &self.local
    }

    /// The scene-local locator mutably.
    pub fn local_mut(&mut self) -> &mut ServiceLocator {
        &mut self.local
    }

    /// Replaces the scene-local locator, returning the previous one.
    pub fn replace_local(&mut self, locator: ServiceLocator) -> ServiceLocator {
        log::debug!("ServiceManager: scene-local services replaced.");
        std::mem::replace(&mut self.local, locator)
    }

    /// Looks `S` up in the local scope first, then the global one.
    pub fn resolve<S: Service>(&self) -> RegistryResult<&S> {
        if let Ok(service) = self.local.get::<S>() {
            return Ok(service);
        }
        self.global
            .as_ref()
            .ok_or_else(RegistryError::not_found::<S>)?
            .get::<S>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Audio(u8);
    impl Service for Audio {}

    struct Input;
    impl Service for Input {}

    #[test]
    fn test_global_is_set_once() {
        let mut manager = ServiceManager::new();
        let mut first = ServiceLocator::new();
        first.register(Audio(1)).unwrap();

        assert!(manager.set_global(first));
        assert!(!manager.set_global(ServiceLocator::new()));
        assert_eq!(manager.global().unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_prefers_local() {
        let mut manager = ServiceManager::new();
        let mut global = ServiceLocator::new();
        global.register(Audio(1)).unwrap();
        global.register(Input).unwrap();
        manager.set_global(global);
        manager.local_mut().register(Audio(2)).unwrap();

        assert_eq!(manager.resolve::<Audio>().unwrap().0, 2);
        assert!(manager.resolve::<Input>().is_ok());

        let previous = manager.replace_local(ServiceLocator::new());
        assert_eq!(previous.len(), 1);
        assert_eq!(manager.resolve::<Audio>().unwrap().0, 1);
    }

    #[test]
    fn test_resolve_without_global() {
        let manager = ServiceManager::new();
        assert!(matches!(
            manager.resolve::<Input>(),
            Err(RegistryError::NotFound { .. })
        ));
    }
}
