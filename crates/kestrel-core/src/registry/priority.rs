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

//! Registry ordered by an optional per-item priority.

use crate::error::{RegistryError, RegistryResult};
use std::fmt;

/// An item paired with its priority.
///
/// `None` means the item was registered without one. Explicit priorities
/// are clamped to at least 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Prioritized<T> {
    item: T,
    priority: Option<u32>,
}

impl<T> Prioritized<T> {
    /// Wraps `item` without a priority.
    pub fn new(item: T) -> Self {
        Self {
            item,
            priority: None,
        }
    }

    /// Wraps `item` with `priority`, clamped to at least 1.
    pub fn with_priority(item: T, priority: u32) -> Self {
        Self {
            item,
            priority: Some(priority.max(1)),
        }
    }

    /// The wrapped item.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// The priority, if one was given.
    pub fn priority(&self) -> Option<u32> {
        self.priority
    }

    /// Unwraps the item.
    pub fn into_inner(self) -> T {
        self.item
    }

    fn runs_before(&self, priority: u32) -> bool {
        self.priority.is_some_and(|own| own <= priority)
    }
}

/// An ordered registry where lower priority numbers come first.
///
/// Priority 1 runs first. Items registered with a priority are placed after
/// every entry with an equal or smaller number, so equal priorities keep
/// registration order. Items registered without a priority come last.
///
/// ```rust
/// use kestrel_core::PriorityRegistry;
///
/// let mut registry = PriorityRegistry::new();
/// registry.register("late");
/// registry.register_with_priority("normal", 5);
/// registry.register_with_priority("urgent", 1);
///
/// let order: Vec<_> = registry.iter().copied().collect();
/// assert_eq!(order, vec!["urgent", "normal", "late"]);
/// ```
pub struct PriorityRegistry<T> {
    entries: Vec<Prioritized<T>>,
}

impl<T> PriorityRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::with_capacity(super::DEFAULT_CAPACITY)
    }

    /// Creates an empty registry with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends `item` without a priority.
    pub fn register(&mut self, item: T) -> &T {
        self.entries.push(Prioritized::new(item));
        &self.entries[self.entries.len() - 1].item
    }

    /// Inserts `item` according to `priority`.
    pub fn register_with_priority(&mut self, item: T, priority: u32) -> &T {
        let entry = Prioritized::with_priority(item, priority);
        let priority = priority.max(1);
        let index = self
            .entries
            .iter()
            .position(|existing| !existing.runs_before(priority))
            .unwrap_or(self.entries.len());
        log::trace!("PriorityRegistry: inserted item with priority {priority} at {index}.");
        self.entries.insert(index, entry);
        &self.entries[index].item
    }

    /// Removes and returns the item at `index`.
    pub fn unregister_at(&mut self, index: usize) -> RegistryResult<T> {
        let len = self.entries.len();
        if index >= len {
            return Err(RegistryError::OutOfRange { index, len });
        }
        Ok(self.entries.remove(index).into_inner())
    }

    /// Returns the item at `index`.
    pub fn at(&self, index: usize) -> RegistryResult<&T> {
        self.entries
            .get(index)
            .map(Prioritized::item)
            .ok_or(RegistryError::OutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    /// Applies `action` to every item in order.
    pub fn for_each(&self, mut action: impl FnMut(&T)) {
        for entry in &self.entries {
            action(&entry.item);
        }
    }

    /// Applies `action` to every entry, priority included, in order.
    pub fn for_each_entry(&self, mut action: impl FnMut(&Prioritized<T>)) {
        for entry in &self.entries {
            action(entry);
        }
    }

    /// Iterates over the items in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(Prioritized::item)
    }

    /// Returns a new registry with the entries whose item satisfies
    /// `predicate`. Priorities are kept.
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Self
    where
        T: Clone,
    {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| predicate(&entry.item))
                .cloned()
                .collect(),
        }
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no items are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: PartialEq> PriorityRegistry<T> {
    /// Removes the first entry whose item equals `item`. Returns whether
    /// anything was removed.
    pub fn unregister(&mut self, item: &T) -> bool {
        match self.entries.iter().position(|entry| entry.item == *item) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for PriorityRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PriorityRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            match entry.priority {
                Some(priority) => writeln!(f, "{}: priority {priority}", entry.item)?,
                None => writeln!(f, "{}: priority -", entry.item)?,
            }
        }
        Ok(())
    }
}
