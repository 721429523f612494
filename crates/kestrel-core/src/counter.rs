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

//! A per-type multiset: one representative instance plus a count.

use crate::any::AsAny;
use crate::error::{RegistryError, RegistryResult};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// A representative instance and how many of its type are held.
pub struct Counted<T: ?Sized> {
    item: Box<T>,
    count: usize,
}

impl<T: ?Sized + AsAny> Counted<T> {
    /// The representative instance.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// How many are held. Never negative; may be zero until compaction.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Name of the concrete type this entry counts.
    pub fn type_name(&self) -> &'static str {
        (*self.item).concrete_type_name()
    }
}

/// Tracks a representative instance and a running count per concrete type.
///
/// The first instance added for a type stays its representative; later
/// additions only raise the count. Counts saturate at zero. Zero-count
/// entries remain until [`remove_empty`](Self::remove_empty) runs, which
/// [`pick`](Self::pick) triggers on an empty or missing type.
///
/// ```rust
/// use kestrel_core::{AsAny, QuantityCounter};
///
/// trait Loot: AsAny {}
/// struct Apple;
/// impl Loot for Apple {}
///
/// let mut bag: QuantityCounter<dyn Loot> = QuantityCounter::new();
/// bag.add(Box::new(Apple), 10);
/// bag.pop::<Apple>(4).unwrap();
/// assert_eq!(bag.check_count::<Apple>(), Ok(6));
/// ```
pub struct QuantityCounter<T: ?Sized + AsAny> {
    entries: HashMap<TypeId, Counted<T>>,
}

impl<T: ?Sized + AsAny> QuantityCounter<T> {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Adds `count` of `item`'s concrete type.
    ///
    /// A zero count is ignored. If the type is already tracked, only its
    /// count changes and `item` is dropped.
    pub fn add(&mut self, item: Box<T>, count: usize) {
        if count == 0 {
            return;
        }
        let key = (*item).concrete_type_id();
        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.count = entry.count.saturating_add(count);
            }
            None => {
                log::debug!(
                    "QuantityCounter: tracking `{}` ({count}).",
                    (*item).concrete_type_name()
                );
                self.entries.insert(key, Counted { item, count });
            }
        }
    }

    /// Adds a single `item`.
    pub fn add_one(&mut self, item: Box<T>) {
        self.add(item, 1);
    }

    /// Returns the current count for type `S`.
    pub fn check_count<S: Any>(&self) -> RegistryResult<usize> {
        self.entries
            .get(&TypeId::of::<S>())
            .map(Counted::count)
            .ok_or_else(RegistryError::not_found::<S>)
    }

    /// Returns the representative for type `S` without changing its count.
    ///
    /// Returns `None`, and compacts empty entries, when the type is absent
    /// or its count is zero.
    pub fn pick<S: Any>(&mut self) -> Option<&S> {
        self.pick_entry::<S>().map(|(item, _)| item)
    }

    /// Like [`pick`](Self::pick), also returning the count.
    pub fn pick_entry<S: Any>(&mut self) -> Option<(&S, usize)> {
        let key = TypeId::of::<S>();
        let in_stock = self.entries.get(&key).is_some_and(|entry| entry.count > 0);
        if !in_stock {
            self.remove_empty();
            return None;
        }
        let entry = self.entries.get(&key)?;
        let item = (*entry.item).as_any().downcast_ref::<S>()?;
        Some((item, entry.count))
    }

    /// Removes `count` of type `S`, saturating at zero, and returns the
    /// representative.
    ///
    /// A zero-count entry that has not been compacted yet still succeeds.
    pub fn pop<S: Any>(&mut self, count: usize) -> RegistryResult<&S> {
        let entry = self
            .entries
            .get_mut(&TypeId::of::<S>())
            .ok_or_else(RegistryError::not_found::<S>)?;
        entry.count = entry.count.saturating_sub(count);
        (*entry.item)
            .as_any()
            .downcast_ref::<S>()
            .ok_or_else(RegistryError::not_found::<S>)
    }

    /// Evicts every type whose count is zero. Returns how many were evicted.
    pub fn remove_empty(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.count > 0);
        before - self.entries.len()
    }

    /// Returns `true` if type `S` has an entry, empty or not.
    pub fn contains<S: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<S>())
    }

    /// Applies `action` to every representative. Order is unspecified.
    pub fn for_each(&self, mut action: impl FnMut(&T)) {
        for entry in self.entries.values() {
            action(&*entry.item);
        }
    }

    /// Applies `action` to every entry. Order is unspecified.
    pub fn for_each_entry(&self, mut action: impl FnMut(&Counted<T>)) {
        for entry in self.entries.values() {
            action(entry);
        }
    }

    /// Number of tracked types, empty entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no type is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized + AsAny> Default for QuantityCounter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One `type : count` line per tracked type.
impl<T: ?Sized + AsAny> fmt::Display for QuantityCounter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries.values() {
            writeln!(f, "{} : {}", entry.type_name(), entry.count)?;
        }
        Ok(())
    }
}
