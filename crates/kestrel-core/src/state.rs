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

//! # State Machine
//!
//! A finite state machine whose states are indexed by concrete type.
//!
//! States are registered once, then selected by type with
//! [`StateMachine::change_state`]. A transition always exits the previous
//! state before entering the new one.
//!
//! ## Usage
//!
//! ```rust
//! use kestrel_core::{State, StateMachine};
//!
//! trait MenuState: State {}
//!
//! #[derive(Default)]
//! struct Title { visits: u32 }
//! impl State for Title {
//!     fn on_enter(&mut self) { self.visits += 1; }
//! }
//! impl MenuState for Title {}
//!
//! struct Options;
//! impl State for Options {}
//! impl MenuState for Options {}
//!
//! let mut menu: StateMachine<dyn MenuState> = StateMachine::new();
//! menu.register_state(Box::new(Title::default())).unwrap();
//! menu.register_state(Box::new(Options)).unwrap();
//!
//! assert!(menu.change_state::<Title>());
//! assert!(menu.change_state::<Options>());
//! assert!(menu.change_state::<Title>());
//! assert_eq!(menu.state::<Title>().unwrap().visits, 2);
//! ```

use crate::any::AsAny;
use crate::error::{RegistryError, RegistryResult};
use crate::registry::TypedRegistry;
use std::any::{Any, TypeId};
use std::fmt;

/// One mode of a [`StateMachine`].
pub trait State: AsAny {
    /// Called when the machine switches into this state.
    fn on_enter(&mut self) {}

    /// Called when the machine switches away from this state.
    fn on_exit(&mut self) {}
}

/// A state machine over a family of states sharing the capability `T`.
///
/// There is no initial state: [`current`](Self::current) is `None` until
/// the first successful transition.
pub struct StateMachine<T: ?Sized + State> {
    states: TypedRegistry<T>,
    current: Option<TypeId>,
}

impl<T: ?Sized + State> StateMachine<T> {
    /// Creates a machine with no states.
    pub fn new() -> Self {
        Self {
            states: TypedRegistry::new(),
            current: None,
        }
    }

    /// Adds a state.
    ///
    /// Fails with [`RegistryError::DuplicateRegistration`] if a state of the
    /// same concrete type is already registered.
    pub fn register_state(&mut self, state: Box<T>) -> RegistryResult<&mut T> {
        self.states.register(state)
    }

    /// Removes the state of type `S` and returns it.
    ///
    /// If it is the current state it is exited first and the machine is left
    /// with no current state.
    pub fn unregister_state<S: Any>(&mut self) -> RegistryResult<Box<S>> {
        let key = TypeId::of::<S>();
        if self.current == Some(key) {
            if let Some(state) = self.states.get_by_key_mut(key) {
                state.on_exit();
            }
            self.current = None;
        }
        self.states.unregister::<S>()
    }

    /// Switches to the state of type `S`.
    ///
    /// Exits the current state (if any), makes `S` current, then enters it.
    /// If `S` was never registered nothing happens, no hook runs and `false`
    /// is returned. Switching to the current state exits and re-enters it.
    pub fn change_state<S: Any>(&mut self) -> bool {
        let next = TypeId::of::<S>();
        if !self.states.contains_key(next) {
            log::debug!(
                "StateMachine: no state `{}` registered, transition skipped.",
                std::any::type_name::<S>()
            );
            return false;
        }

        if let Some(previous) = self.current.take() {
            if let Some(state) = self.states.get_by_key_mut(previous) {
                state.on_exit();
            }
        }

        self.current = Some(next);
        if let Some(state) = self.states.get_by_key_mut(next) {
            log::debug!(
                "StateMachine: entering `{}`.",
                (*state).concrete_type_name()
            );
            state.on_enter();
        }
        true
    }

    /// The current state, if any.
    pub fn current(&self) -> Option<&T> {
        self.states.get_by_key(self.current?)
    }

    /// The current state, mutably.
    pub fn current_mut(&mut self) -> Option<&mut T> {
        self.states.get_by_key_mut(self.current?)
    }

    /// Returns `true` if the current state is of type `S`.
    pub fn is_current<S: Any>(&self) -> bool {
        self.current == Some(TypeId::of::<S>())
    }

    /// Returns the registered state of type `S`, current or not.
    pub fn state<S: Any>(&self) -> RegistryResult<&S> {
        self.states.get::<S>()
    }

    /// Returns the registered state of type `S` mutably.
    pub fn state_mut<S: Any>(&mut self) -> RegistryResult<&mut S> {
        self.states.get_mut::<S>()
    }

    /// Returns `true` if a state of type `S` is registered.
    pub fn has_state<S: Any>(&self) -> bool {
        self.states.contains::<S>()
    }

    /// Number of registered states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no state is registered.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the current state as `S`, failing if it is not of that type.
    pub fn current_as<S: Any>(&self) -> RegistryResult<&S> {
        if !self.is_current::<S>() {
            return Err(RegistryError::not_found::<S>());
        }
        self.state::<S>()
    }
}

impl<T: ?Sized + State> Default for StateMachine<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + State> fmt::Debug for StateMachine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.states)
            .field(
                "current",
                &self.current().map(|state| state.concrete_type_name()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    trait Phase: State {}

    struct Recording<const N: usize> {
        journal: Journal,
    }

    impl<const N: usize> State for Recording<N> {
        fn on_enter(&mut self) {
            self.journal.borrow_mut().push(format!("enter {}", N));
        }

        fn on_exit(&mut self) {
            self.journal.borrow_mut().push(format!("exit {}", N));
        }
    }

    impl<const N: usize> Phase for Recording<N> {}

    type S1 = Recording<1>;
    type S2 = Recording<2>;
    type S3 = Recording<3>;

    fn machine(journal: &Journal) -> StateMachine<dyn Phase> {
        let mut machine: StateMachine<dyn Phase> = StateMachine::new();
        machine
            .register_state(Box::new(S1 {
                journal: journal.clone(),
            }))
            .unwrap();
        machine
            .register_state(Box::new(S2 {
                journal: journal.clone(),
            }))
            .unwrap();
        machine
    }

    #[test]
    fn test_transition_order() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        assert!(machine.current().is_none());

        assert!(machine.change_state::<S1>());
        assert!(machine.change_state::<S2>());

        assert_eq!(*journal.borrow(), vec!["enter 1", "exit 1", "enter 2"]);
        assert!(machine.is_current::<S2>());
        assert!(machine.current_as::<S2>().is_ok());
        assert!(machine.current_as::<S1>().is_err());
    }

    #[test]
    fn test_unregistered_target_is_ignored() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        machine.change_state::<S1>();
        journal.borrow_mut().clear();

        assert!(!machine.change_state::<S3>());
        assert!(journal.borrow().is_empty());
        assert!(machine.is_current::<S1>());
    }

    #[test]
    fn test_duplicate_state_is_rejected() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        let result = machine.register_state(Box::new(S1 {
            journal: journal.clone(),
        }));
        assert!(matches!(
            result.err(),
            Some(RegistryError::DuplicateRegistration { .. })
        ));
        assert_eq!(machine.len(), 2);
    }

    #[test]
    fn test_unregister_current_exits_it() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        machine.change_state::<S2>();
        assert!(machine.unregister_state::<S2>().is_ok());

        assert_eq!(*journal.borrow(), vec!["enter 2", "exit 2"]);
        assert!(machine.current().is_none());
        assert!(!machine.has_state::<S2>());
        assert!(!machine.change_state::<S2>());
    }

    #[test]
    fn test_reentering_current_state() {
        let journal = Journal::default();
        let mut machine = machine(&journal);
        machine.change_state::<S1>();
        machine.change_state::<S1>();
        assert_eq!(*journal.borrow(), vec!["enter 1", "exit 1", "enter 1"]);
    }
}
