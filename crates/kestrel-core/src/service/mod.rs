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

//! Service publication and lookup by type.
//!
//! A [`ServiceLocator`] is an ordinary value: pass it (or the
//! [`ServiceManager`] holding a global and a scene-local one) to whoever
//! needs it. When code really must reach services without a reference, the
//! [`session`] module installs one manager for the lifetime of a guard.

mod locator;
mod manager;
pub mod session;

pub use self::locator::{Service, ServiceLocator};
pub use self::manager::ServiceManager;
