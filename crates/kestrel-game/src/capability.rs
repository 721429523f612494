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

//! Capabilities a game object opts into to be driven by the controller.

use std::time::Duration;

/// Reacts to the game being paused and resumed.
pub trait Pausable {
    /// Called when the game enters the pause state.
    fn on_pause(&mut self);
    /// Called when the game enters the play state.
    fn on_resume(&mut self);
}

/// Runs once when the game starts.
pub trait Startable {
    /// Called when the game enters the start state.
    fn on_start(&mut self);
}

/// Updated once per rendered frame.
pub trait FrameUpdatable {
    /// `dt` is the time since the previous frame.
    fn frame_run(&mut self, dt: Duration);
}

/// Updated on the fixed simulation step.
pub trait FixedUpdatable {
    /// `dt` is the fixed step length.
    fn fixed_run(&mut self, dt: Duration);
}

/// Updated after every frame updatable has run.
pub trait LateUpdatable {
    /// `dt` is the time since the previous frame.
    fn late_run(&mut self, dt: Duration);
}

/// Updated on every tick of the controller's tick machine.
pub trait TickUpdatable {
    /// Runs once per elapsed tick interval.
    fn tick_run(&mut self);
}
