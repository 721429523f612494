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

//! # Kestrel Core
//!
//! Foundational containers for gameplay architecture: ordered item
//! registries, type-keyed registries, a service locator, a state machine
//! and a per-type quantity counter.
//!
//! Everything here is single-threaded by contract. Registries hold no locks
//! and are meant to be owned by one logical thread of control (the game
//! loop), the same way the host engine drives them.

#![warn(missing_docs)]

pub mod any;
pub mod counter;
pub mod error;
pub mod handle;
pub mod registry;
pub mod service;
pub mod state;

pub use any::AsAny;
pub use counter::{Counted, QuantityCounter};
pub use error::{RegistryError, RegistryResult, SessionError};
pub use handle::{shared, Shared, WeakHandle};
pub use registry::{
    ItemRegistry, ListenerId, MergeMode, PriorityRegistry, Prioritized, TypedRegistry,
};
pub use service::{Service, ServiceLocator, ServiceManager};
pub use state::{State, StateMachine};
