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

//! The game controller service and its start, play and pause states.
//!
//! The controller is the single entry point the host loop talks to. It owns
//! the [`UpdateLoops`], a [`TickMachine`] feeding the tick loop, and a
//! [`StateMachine`] whose states broadcast lifecycle calls to the
//! registered [`Startable`] and [`Pausable`] objects.

use crate::capability::{Pausable, Startable};
use crate::config::LoopsConfig;
use crate::loops::UpdateLoops;
use crate::timer::TickMachine;
use kestrel_core::{
    shared, ItemRegistry, RegistryResult, Service, Shared, State, StateMachine, WeakHandle,
};
use std::cell::RefCell;
use std::time::Duration;

type Pausables = Shared<ItemRegistry<WeakHandle<dyn Pausable>>>;
type Startables = Shared<ItemRegistry<WeakHandle<dyn Startable>>>;

/// A state of the [`GameController`].
pub trait GameState: State {}

fn broadcast<T: ?Sized>(registry: &RefCell<ItemRegistry<WeakHandle<T>>>, call: impl Fn(&mut T)) {
    match registry.try_borrow_mut() {
        Ok(mut registry) => registry.for_each(|handle| {
            handle.with(|object| call(object));
        }),
        Err(_) => log::warn!("GameController: registrants are busy, broadcast skipped."),
    }
}

/// Calls [`Startable::on_start`] on every startable when entered.
pub struct StartState {
    startables: Startables,
}

impl State for StartState {
    fn on_enter(&mut self) {
        broadcast(&self.startables, |startable| startable.on_start());
    }
}
impl GameState for StartState {}

/// Calls [`Pausable::on_resume`] on every pausable when entered.
pub struct PlayState {
    pausables: Pausables,
}

impl State for PlayState {
    fn on_enter(&mut self) {
        broadcast(&self.pausables, |pausable| pausable.on_resume());
    }
}
impl GameState for PlayState {}

/// Calls [`Pausable::on_pause`] on every pausable when entered.
pub struct PauseState {
    pausables: Pausables,
}

impl State for PauseState {
    fn on_enter(&mut self) {
        broadcast(&self.pausables, |pausable| pausable.on_pause());
    }
}
impl GameState for PauseState {}

/// Drives the update loops and the start, play and pause lifecycle.
///
/// Publish it through a [`ServiceLocator`](kestrel_core::ServiceLocator) so
/// game objects can find it and register themselves.
pub struct GameController {
    loops: UpdateLoops,
    pausables: Pausables,
    startables: Startables,
    states: StateMachine<dyn GameState>,
    tick_machine: TickMachine,
    config: Option<LoopsConfig>,
}

impl Service for GameController {}

impl GameController {
    /// Creates a controller with empty loops and no current state.
    pub fn new() -> RegistryResult<Self> {
        let pausables: Pausables = shared(ItemRegistry::tracking());
        let startables: Startables = shared(ItemRegistry::tracking());

        let mut states: StateMachine<dyn GameState> = StateMachine::new();
        states.register_state(Box::new(StartState {
            startables: startables.clone(),
        }))?;
        states.register_state(Box::new(PlayState {
            pausables: pausables.clone(),
        }))?;
        states.register_state(Box::new(PauseState {
            pausables: pausables.clone(),
        }))?;

        Ok(Self {
            loops: UpdateLoops::new(),
            pausables,
            startables,
            states,
            tick_machine: TickMachine::new(),
            config: None,
        })
    }

    /// Applies the loop settings. Only the first call takes effect.
    pub fn configure(&mut self, config: LoopsConfig) -> bool {
        if self.config.is_some() {
            log::warn!("GameController: already configured, ignoring new loops config.");
            return false;
        }
        self.tick_machine.set_interval(config.tick_interval());
        if config.tick_enabled {
            self.tick_machine.start();
        }
        log::info!(
            "GameController: configured (tick {}, every {:?}).",
            if config.tick_enabled { "on" } else { "off" },
            config.tick_interval()
        );
        self.config = Some(config);
        true
    }

    /// The applied loop settings, if any.
    pub fn config(&self) -> Option<&LoopsConfig> {
        self.config.as_ref()
    }

    /// The update loops, for registering frame, fixed, late and tick objects.
    pub fn loops(&self) -> &UpdateLoops {
        &self.loops
    }

    /// Mutable access to the update loops.
    pub fn loops_mut(&mut self) -> &mut UpdateLoops {
        &mut self.loops
    }

    /// The machine feeding the tick loop.
    pub fn tick_machine(&self) -> &TickMachine {
        &self.tick_machine
    }

    /// Mutable access to the tick machine.
    pub fn tick_machine_mut(&mut self) -> &mut TickMachine {
        &mut self.tick_machine
    }

    /// Registers `object` to hear pause and resume.
    pub fn register_pausable<U: Pausable + 'static>(&mut self, object: &Shared<U>) {
        let object: Shared<dyn Pausable> = object.clone();
        self.pausables
            .borrow_mut()
            .register(WeakHandle::from_shared(&object));
    }

    /// Stops `object` hearing pause and resume.
    pub fn unregister_pausable<U: Pausable + 'static>(&mut self, object: &Shared<U>) -> bool {
        let object: Shared<dyn Pausable> = object.clone();
        self.pausables
            .borrow_mut()
            .unregister(&WeakHandle::from_shared(&object))
            .is_some()
    }

    /// Registers `object` to be started with the game.
    pub fn register_startable<U: Startable + 'static>(&mut self, object: &Shared<U>) {
        let object: Shared<dyn Startable> = object.clone();
        self.startables
            .borrow_mut()
            .register(WeakHandle::from_shared(&object));
    }

    /// Removes `object` from the startables.
    pub fn unregister_startable<U: Startable + 'static>(&mut self, object: &Shared<U>) -> bool {
        let object: Shared<dyn Startable> = object.clone();
        self.startables
            .borrow_mut()
            .unregister(&WeakHandle::from_shared(&object))
            .is_some()
    }

    /// Enters [`StartState`].
    pub fn start_game(&mut self) -> bool {
        self.states.change_state::<StartState>()
    }

    /// Enters [`PlayState`].
    pub fn play(&mut self) -> bool {
        self.states.change_state::<PlayState>()
    }

    /// Enters [`PauseState`].
    pub fn pause(&mut self) -> bool {
        self.states.change_state::<PauseState>()
    }

    /// Returns `true` while in [`PauseState`].
    pub fn is_paused(&self) -> bool {
        self.states.is_current::<PauseState>()
    }

    /// Type name of the current state, if any.
    pub fn current_state_name(&self) -> Option<&'static str> {
        self.states
            .current()
            .map(|state| state.concrete_type_name())
    }

    /// Runs the frame loop, then the tick loop once per elapsed tick.
    pub fn frame(&mut self, dt: Duration) {
        self.loops.run_frame(dt);
        let ticks = self.tick_machine.advance(dt);
        for _ in 0..ticks {
            self.loops.run_tick();
        }
    }

    /// Runs the fixed-step loop.
    pub fn fixed(&mut self, dt: Duration) {
        self.loops.run_fixed(dt);
    }

    /// Runs the late loop.
    pub fn late(&mut self, dt: Duration) {
        self.loops.run_late(dt);
    }
}

impl std::fmt::Debug for GameController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameController")
            .field("state", &self.current_state_name())
            .field("loops", &self.loops)
            .field("tick_machine", &self.tick_machine)
            .field("config", &self.config)
            .finish()
    }
}
