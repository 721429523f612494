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

//! The four update loops and their registrants.
//!
//! Each loop holds weak handles: registering an object never extends its
//! lifetime, and objects dropped by their owner fall out of the loop on the
//! next run.

use crate::capability::{FixedUpdatable, FrameUpdatable, LateUpdatable, TickUpdatable};
use kestrel_core::{ItemRegistry, RegistryResult, Shared, WeakHandle};
use std::time::Duration;

macro_rules! update_loop {
    (
        $field:ident: $capability:ident,
        $register:ident, $register_at:ident, $unregister:ident, $count:ident,
        fn $run:ident($($arg:ident: $ty:ty),*) => $call:ident
    ) => {
        #[doc = concat!("Appends `object` to the ", stringify!($field), " loop.")]
        pub fn $register<U: $capability + 'static>(&mut self, object: &Shared<U>) {
            let object: Shared<dyn $capability> = object.clone();
            self.$field.register(WeakHandle::from_shared(&object));
        }

        #[doc = concat!("Inserts `object` into the ", stringify!($field), " loop at `position`.")]
        pub fn $register_at<U: $capability + 'static>(
            &mut self,
            object: &Shared<U>,
            position: usize,
        ) -> RegistryResult<()> {
            let object: Shared<dyn $capability> = object.clone();
            self.$field
                .register_at(WeakHandle::from_shared(&object), position)
                .map(|_| ())
        }

        #[doc = concat!("Removes `object` from the ", stringify!($field), " loop. Returns `false` if it was not registered.")]
        pub fn $unregister<U: $capability + 'static>(&mut self, object: &Shared<U>) -> bool {
            let object: Shared<dyn $capability> = object.clone();
            self.$field
                .unregister(&WeakHandle::from_shared(&object))
                .is_some()
        }

        #[doc = concat!("Runs every live registrant of the ", stringify!($field), " loop in order.")]
        pub fn $run(&mut self, $($arg: $ty),*) {
            self.$field.for_each(|handle| {
                handle.with(|object| object.$call($($arg),*));
            });
        }

        #[doc = concat!("Number of slots in the ", stringify!($field), " loop, dead ones included until the next run.")]
        pub fn $count(&self) -> usize {
            self.$field.len()
        }
    };
}

/// Registrants of the frame, fixed, late and tick loops.
pub struct UpdateLoops {
    frame: ItemRegistry<WeakHandle<dyn FrameUpdatable>>,
    fixed: ItemRegistry<WeakHandle<dyn FixedUpdatable>>,
    late: ItemRegistry<WeakHandle<dyn LateUpdatable>>,
    tick: ItemRegistry<WeakHandle<dyn TickUpdatable>>,
}

impl UpdateLoops {
    /// Creates four empty loops.
    pub fn new() -> Self {
        Self {
            frame: ItemRegistry::tracking(),
            fixed: ItemRegistry::tracking(),
            late: ItemRegistry::tracking(),
            tick: ItemRegistry::tracking(),
        }
    }

    update_loop! {
        frame: FrameUpdatable,
        register_frame, register_frame_at, unregister_frame, frame_count,
        fn run_frame(dt: Duration) => frame_run
    }

    update_loop! {
        fixed: FixedUpdatable,
        register_fixed, register_fixed_at, unregister_fixed, fixed_count,
        fn run_fixed(dt: Duration) => fixed_run
    }

    update_loop! {
        late: LateUpdatable,
        register_late, register_late_at, unregister_late, late_count,
        fn run_late(dt: Duration) => late_run
    }

    update_loop! {
        tick: TickUpdatable,
        register_tick, register_tick_at, unregister_tick, tick_count,
        fn run_tick() => tick_run
    }

    /// Drops every registrant from every loop.
    pub fn clear(&mut self) {
        self.frame.clear();
        self.fixed.clear();
        self.late.clear();
        self.tick.clear();
    }
}

impl Default for UpdateLoops {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UpdateLoops {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateLoops")
            .field("frame", &self.frame.len())
            .field("fixed", &self.fixed.len())
            .field("late", &self.late.len())
            .field("tick", &self.tick.len())
            .finish()
    }
}
