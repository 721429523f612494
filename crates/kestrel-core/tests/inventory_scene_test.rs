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

use kestrel_core::service::session;
use kestrel_core::{
    shared, AsAny, ItemRegistry, MergeMode, QuantityCounter, RegistryError, Service,
    ServiceLocator, ServiceManager, State, StateMachine, WeakHandle,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// --- Test Setup: an inventory service and a shop menu ---
trait Item: AsAny {
    fn price(&self) -> u32;
}

struct Potion;
impl Item for Potion {
    fn price(&self) -> u32 {
        5
    }
}

struct Arrow;
impl Item for Arrow {
    fn price(&self) -> u32 {
        1
    }
}

#[derive(Default)]
struct Inventory {
    bag: QuantityCounter<dyn Item>,
}
impl Service for Inventory {}

trait ShopState: State {}

#[derive(Default)]
struct Browsing {
    visits: u32,
}
impl State for Browsing {
    fn on_enter(&mut self) {
        self.visits += 1;
    }
}
impl ShopState for Browsing {}

#[derive(Default)]
struct Closed {
    closings: u32,
}
impl State for Closed {
    fn on_enter(&mut self) {
        self.closings += 1;
    }
}
impl ShopState for Closed {}
// ---

#[test]
fn test_inventory_through_session() {
    init_logging();

    let mut global = ServiceLocator::new();
    global.register(Inventory::default()).unwrap();
    let mut manager = ServiceManager::new();
    assert!(manager.set_global(global));
    let _guard = session::begin(manager).unwrap();

    session::with(|services| {
        let inventory = services
            .global_mut()
            .unwrap()
            .get_mut::<Inventory>()
            .unwrap();
        inventory.bag.add(Box::new(Potion), 3);
        inventory.bag.add(Box::new(Arrow), 20);
    })
    .unwrap();

    let value = session::with(|services| {
        let inventory = services.resolve::<Inventory>().unwrap();
        let mut value = 0;
        inventory
            .bag
            .for_each_entry(|entry| value += entry.count() as u32 * entry.item().price());
        value
    })
    .unwrap();
    assert_eq!(value, 35);

    let remaining = session::with(|services| {
        let bag = &mut services
            .global_mut()
            .unwrap()
            .get_mut::<Inventory>()
            .unwrap()
            .bag;
        bag.pop::<Potion>(3).unwrap();
        assert!(bag.pick::<Potion>().is_none());
        bag.len()
    })
    .unwrap();
    assert_eq!(remaining, 1);
}

#[test]
fn test_shop_menu_transitions() {
    init_logging();

    let mut shop: StateMachine<dyn ShopState> = StateMachine::new();
    shop.register_state(Box::new(Browsing::default())).unwrap();
    shop.register_state(Box::new(Closed::default())).unwrap();

    assert!(shop.change_state::<Browsing>());
    assert!(shop.change_state::<Closed>());
    assert!(shop.change_state::<Browsing>());

    assert_eq!(shop.state::<Browsing>().unwrap().visits, 2);
    assert_eq!(shop.state::<Closed>().unwrap().closings, 1);
    assert!(matches!(
        shop.current_as::<Closed>(),
        Err(RegistryError::NotFound { .. })
    ));
}

#[test]
fn test_listeners_track_weak_registrants() {
    init_logging();

    let first = shared(1u32);
    let second = shared(2u32);
    let mut registry: ItemRegistry<WeakHandle<u32>> = ItemRegistry::tracking();

    let added = shared(0usize);
    let counter = added.clone();
    registry.on_item_added(move |_| *counter.borrow_mut() += 1);

    registry.register(WeakHandle::from_shared(&first));
    registry.register_bulk(
        vec![
            WeakHandle::from_shared(&first),
            WeakHandle::from_shared(&second),
        ],
        MergeMode::UnionToEnd,
    );
    assert_eq!(registry.len(), 2);
    assert_eq!(*added.borrow(), 1);

    drop(first);
    let mut sum = 0;
    registry.for_each(|handle| {
        handle.with(|value| sum += *value);
    });
    assert_eq!(sum, 2);
    assert_eq!(registry.len(), 1);
}
