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

//! # Kestrel Game
//!
//! The game-side callers of `kestrel-core`: capability traits for objects
//! that take part in the update loops, the per-loop registries, frame-driven
//! timers, and the [`GameController`](game::GameController) service that
//! switches between start, play and pause.
//!
//! Nothing here owns a clock. The host calls [`GameController::frame`],
//! [`GameController::fixed`] and [`GameController::late`] with the elapsed
//! time and the controller fans the call out to live registrants.
//!
//! [`GameController::frame`]: game::GameController::frame
//! [`GameController::fixed`]: game::GameController::fixed
//! [`GameController::late`]: game::GameController::late

#![warn(missing_docs)]

pub mod capability;
pub mod config;
pub mod game;
pub mod loops;
pub mod timer;

pub use capability::{
    FixedUpdatable, FrameUpdatable, LateUpdatable, Pausable, Startable, TickUpdatable,
};
pub use config::LoopsConfig;
pub use game::{GameController, GameState, PauseState, PlayState, StartState};
pub use loops::UpdateLoops;
pub use timer::{TickMachine, Timer, TimerStatus};
