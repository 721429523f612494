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

use kestrel_core::{shared, AsAny, ItemRegistry, MergeMode, QuantityCounter, Shared, WeakHandle};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Register(u8),
    UnregisterAt(usize),
    UnregisterLive(usize),
    DropOwner(usize),
    At(usize),
    Compact,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::Register),
        1 => (0usize..16).prop_map(Op::UnregisterAt),
        1 => (0usize..16).prop_map(Op::UnregisterLive),
        2 => (0usize..16).prop_map(Op::DropOwner),
        1 => (0usize..16).prop_map(Op::At),
        1 => Just(Op::Compact),
    ]
}

fn occurrences(values: &[u8], value: u8) -> usize {
    values.iter().filter(|v| **v == value).count()
}

trait Coin: AsAny {}
struct Copper;
impl Coin for Copper {}

proptest! {
    #[test]
    fn test_len_tracks_registrations_removals_and_compaction(
        ops in prop::collection::vec(op(), 0..64)
    ) {
        let mut registry: ItemRegistry<WeakHandle<u8>> = ItemRegistry::tracking();
        let mut owners: Vec<Shared<u8>> = Vec::new();
        let (mut registered, mut removed, mut compacted) = (0usize, 0usize, 0usize);

        for op in ops {
            match op {
                Op::Register(value) => {
                    let owner = shared(value);
                    registry.register(WeakHandle::from_shared(&owner));
                    owners.push(owner);
                    registered += 1;
                }
                Op::UnregisterAt(index) => {
                    if registry.unregister_at(index).is_ok() {
                        removed += 1;
                    }
                }
                Op::UnregisterLive(seed) => {
                    if !owners.is_empty() {
                        let handle = WeakHandle::from_shared(&owners[seed % owners.len()]);
                        if registry.unregister(&handle).is_some() {
                            removed += 1;
                        }
                    }
                }
                Op::DropOwner(seed) => {
                    if !owners.is_empty() {
                        let index = seed % owners.len();
                        owners.remove(index);
                    }
                }
                Op::At(index) => {
                    let before = registry.len();
                    let found = registry.at(index).is_some();
                    if !found {
                        compacted += before - registry.len();
                    }
                }
                Op::Compact => {
                    compacted += registry.compact();
                }
            }
            prop_assert_eq!(registry.len(), registered - removed - compacted);
        }
    }

    #[test]
    fn test_append_to_end_concatenates(
        old in prop::collection::vec(any::<u8>(), 0..16),
        items in prop::collection::vec(any::<u8>(), 0..16)
    ) {
        let mut registry = ItemRegistry::from_vec(old.clone());
        registry.register_bulk(items.clone(), MergeMode::AppendToEnd);

        let mut expected = old;
        expected.extend(items);
        prop_assert_eq!(registry.to_vec(), expected);
    }

    #[test]
    fn test_union_to_end_never_duplicates_existing_values(
        old in prop::collection::vec(0u8..8, 0..16),
        items in prop::collection::vec(0u8..8, 0..16)
    ) {
        let mut registry = ItemRegistry::from_vec(old.clone());
        registry.register_bulk(items.clone(), MergeMode::UnionToEnd);
        let merged = registry.to_vec();

        for value in old.iter().chain(items.iter()) {
            prop_assert_eq!(occurrences(&merged, *value), 1);
        }
        prop_assert_eq!(merged.len(), {
            let mut distinct = old.clone();
            distinct.extend(items.iter().copied());
            distinct.sort_unstable();
            distinct.dedup();
            distinct.len()
        });
    }

    #[test]
    fn test_register_then_unregister_restores_contents(
        old in prop::collection::vec(0u8..8, 0..16),
        item in 0u8..8
    ) {
        let mut registry = ItemRegistry::from_vec(old.clone());
        registry.register(item);
        prop_assert!(registry.unregister(&item).is_some());

        let after = registry.to_vec();
        prop_assert_eq!(after.len(), old.len());
        prop_assert_eq!(occurrences(&after, item), occurrences(&old, item));
        if !old.contains(&item) {
            prop_assert_eq!(after, old);
        }
    }

    #[test]
    fn test_pop_floors_count_at_zero(added in 1usize..1000, popped in 0usize..2000) {
        let mut purse: QuantityCounter<dyn Coin> = QuantityCounter::new();
        purse.add(Box::new(Copper), added);
        prop_assert!(purse.pop::<Copper>(popped).is_ok());
        prop_assert_eq!(purse.check_count::<Copper>(), Ok(added.saturating_sub(popped)));
    }
}
