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

//! Registries: containers that game code registers items into and that
//! the host later iterates.
//!
//! - [`ItemRegistry`]: insertion-ordered, duplicates allowed, lazy
//!   compaction of dead slots, item-added notifications.
//! - [`PriorityRegistry`]: like `ItemRegistry`, but ordered by an optional
//!   per-item priority.
//! - [`TypedRegistry`]: at most one instance per concrete type.

mod item;
mod priority;
mod typed;

pub use self::item::{ItemRegistry, ListenerId, MergeMode, DEFAULT_CAPACITY};
pub use self::priority::{PriorityRegistry, Prioritized};
pub use self::typed::TypedRegistry;
