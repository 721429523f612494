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

//! The ordered item registry.

use crate::error::{RegistryError, RegistryResult};
use crate::handle::WeakHandle;
use std::fmt;

/// Capacity used when a registry is created without an explicit one.
pub const DEFAULT_CAPACITY: usize = 10;

/// How [`ItemRegistry::register_bulk`] combines incoming items with the
/// current contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeMode {
    /// Discard the current contents and adopt the incoming items.
    #[default]
    Replace,
    /// Append the incoming items after the current contents.
    AppendToEnd,
    /// Place the incoming items, in their own order, before the current contents.
    PrependToStart,
    /// Set union: current contents followed by incoming items, keeping only
    /// the first occurrence of every value.
    UnionToEnd,
}

/// Identifies a listener added with [`ItemRegistry::on_item_added`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

fn always_alive<T>(_: &T) -> bool {
    true
}

/// An insertion-ordered collection of items.
///
/// Duplicates are allowed. A liveness check decides which slots count as
/// empty (for example a [`WeakHandle`] whose object was dropped); empty
/// slots are compacted lazily by [`at`](Self::at), [`for_each`](Self::for_each)
/// and [`compact`](Self::compact).
///
/// Iteration callbacks receive `&T` while the registry is exclusively
/// borrowed, so a callback cannot mutate the registry it is iterating.
///
/// # Example
///
/// ```rust
/// use kestrel_core::ItemRegistry;
///
/// let mut registry = ItemRegistry::new();
/// registry.register("a");
/// registry.register("b");
/// registry.register("c");
///
/// assert_eq!(registry.unregister_at(1).unwrap(), "b");
/// assert_eq!(registry.to_vec(), vec!["a", "c"]);
/// assert!(registry.at(5).is_none());
/// ```
pub struct ItemRegistry<T> {
    items: Vec<T>,
    is_alive: fn(&T) -> bool,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_listener: u64,
}

impl<T> ItemRegistry<T> {
    /// Creates an empty registry with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty registry. A capacity of zero falls back to
    /// [`DEFAULT_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Creates a registry that takes ownership of `items`.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            is_alive: always_alive::<T>,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Replaces the liveness check. Items for which `is_alive` returns `false`
    /// are treated as empty slots.
    #[must_use]
    pub fn with_liveness(mut self, is_alive: fn(&T) -> bool) -> Self {
        self.is_alive = is_alive;
        self
    }

    /// Appends `item` and notifies listeners. Returns the stored item.
    pub fn register(&mut self, item: T) -> &T {
        self.items.push(item);
        let index = self.items.len() - 1;
        self.notify(index);
        &self.items[index]
    }

    /// Inserts `item` at `position` and notifies listeners.
    ///
    /// `position` may equal the current length (append).
    pub fn register_at(&mut self, item: T, position: usize) -> RegistryResult<&T> {
        let len = self.items.len();
        if position > len {
            return Err(RegistryError::OutOfRange {
                index: position,
                len,
            });
        }
        self.items.insert(position, item);
        self.notify(position);
        Ok(&self.items[position])
    }

    /// Removes and returns the item at `index`.
    pub fn unregister_at(&mut self, index: usize) -> RegistryResult<T> {
        let len = self.items.len();
        if index >= len {
            return Err(RegistryError::OutOfRange { index, len });
        }
        Ok(self.items.remove(index))
    }

    /// Returns the item at `index`.
    ///
    /// Returns `None` if `index` is out of bounds or the slot is dead; a dead
    /// slot is evicted as a side effect.
    pub fn at(&mut self, index: usize) -> Option<&T> {
        let item = self.items.get(index)?;
        if !(self.is_alive)(item) {
            self.items.remove(index);
            log::trace!("ItemRegistry: evicted dead slot at index {index}.");
            return None;
        }
        self.items.get(index)
    }

    /// Returns the item at `index` without touching dead slots.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns a mutable reference to the item at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Removes every dead slot. Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        let is_alive = self.is_alive;
        self.items.retain(|item| is_alive(item));
        let removed = before - self.items.len();
        if removed > 0 {
            log::trace!("ItemRegistry: compacted {removed} dead slot(s).");
        }
        removed
    }

    /// Applies `action` to every item in order, after compacting dead slots.
    pub fn for_each(&mut self, mut action: impl FnMut(&T)) {
        self.compact();
        for item in &self.items {
            action(item);
        }
    }

    /// Applies `action` to every item in order with mutable access, after
    /// compacting dead slots.
    pub fn for_each_mut(&mut self, mut action: impl FnMut(&mut T)) {
        self.compact();
        for item in &mut self.items {
            action(item);
        }
    }

    /// Iterates over the live items in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let is_alive = self.is_alive;
        self.items.iter().filter(move |item| is_alive(item))
    }

    /// Returns a new registry holding the live items that satisfy
    /// `predicate`, in order. Listeners are not carried over.
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Self
    where
        T: Clone,
    {
        let mut filtered = Self::with_capacity(self.items.len()).with_liveness(self.is_alive);
        for item in self.iter() {
            if predicate(item) {
                filtered.items.push(item.clone());
            }
        }
        filtered
    }

    /// Clones the live items into a `Vec`, in order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Removes every item. Listeners stay registered.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of stored items, dead slots included until compaction.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Subscribes `listener` to item-added notifications.
    ///
    /// Listeners run synchronously, in subscription order, on every
    /// [`register`](Self::register) and [`register_at`](Self::register_at).
    /// Bulk registration does not notify.
    pub fn on_item_added(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not subscribed.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, index: usize) {
        let item = &self.items[index];
        for (_, listener) in &mut self.listeners {
            listener(item);
        }
    }
}

impl<T: PartialEq> ItemRegistry<T> {
    /// Removes the first item equal to `item` and returns it.
    ///
    /// A miss is not an error: the registry is left untouched and `None` is
    /// returned.
    pub fn unregister(&mut self, item: &T) -> Option<T> {
        let index = self.items.iter().position(|stored| stored == item)?;
        Some(self.items.remove(index))
    }

    /// Returns `true` if an item equal to `item` is stored.
    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Combines `items` with the current contents according to `mode`.
    pub fn register_bulk(&mut self, items: impl IntoIterator<Item = T>, mode: MergeMode) {
        match mode {
            MergeMode::Replace => {
                self.items = items.into_iter().collect();
            }
            MergeMode::AppendToEnd => {
                self.items.extend(items);
            }
            MergeMode::PrependToStart => {
                let mut merged: Vec<T> = items.into_iter().collect();
                merged.append(&mut self.items);
                self.items = merged;
            }
            MergeMode::UnionToEnd => {
                let current = std::mem::take(&mut self.items);
                let mut merged: Vec<T> = Vec::with_capacity(current.len());
                for item in current.into_iter().chain(items) {
                    if !merged.contains(&item) {
                        merged.push(item);
                    }
                }
                self.items = merged;
            }
        }
        log::debug!(
            "ItemRegistry: bulk registration ({mode:?}), {} item(s) stored.",
            self.items.len()
        );
    }
}

impl<U: ?Sized> ItemRegistry<WeakHandle<U>> {
    /// Creates a registry of weak handles whose dead handles count as empty
    /// slots.
    pub fn tracking() -> Self {
        Self::new().with_liveness(WeakHandle::is_alive)
    }
}

impl<T> Default for ItemRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for ItemRegistry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for ItemRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRegistry")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Renders as `{ a b c }`.
impl<T: fmt::Display> fmt::Display for ItemRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for item in self.iter() {
            write!(f, "{item} ")?;
        }
        write!(f, "}}")
    }
}
