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

use anyhow::Result;
use kestrel_core::{shared, ServiceLocator};
use kestrel_game::{
    FrameUpdatable, GameController, LoopsConfig, Pausable, TickUpdatable, Timer, TimerStatus,
};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tempfile::tempdir;

const FRAME: Duration = Duration::from_millis(250);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// --- Test Setup: a countdown driven by the frame loop ---
struct Countdown {
    timer: Timer,
    paused_frames: u32,
}

impl FrameUpdatable for Countdown {
    fn frame_run(&mut self, dt: Duration) {
        if self.timer.status() == TimerStatus::Pause {
            self.paused_frames += 1;
        }
        self.timer.advance(dt);
    }
}

impl Pausable for Countdown {
    fn on_pause(&mut self) {
        self.timer.on_pause();
    }

    fn on_resume(&mut self) {
        self.timer.on_resume();
    }
}

#[derive(Default)]
struct Heartbeat {
    beats: u32,
}

impl TickUpdatable for Heartbeat {
    fn tick_run(&mut self) {
        self.beats += 1;
    }
}
// ---

#[test]
fn test_controller_from_config_file() -> Result<()> {
    init_logging();

    let dir = tempdir()?;
    let path = dir.path().join("loops.ron");
    LoopsConfig {
        tick_enabled: true,
        tick_interval_secs: 0.5,
    }
    .save(&path)?;

    let mut services = ServiceLocator::new();
    let controller = services.register(GameController::new()?)?;
    assert!(controller.configure(LoopsConfig::load(&path)?));

    let heart = shared(Heartbeat::default());
    controller.loops_mut().register_tick(&heart);

    let controller = services.get_mut::<GameController>()?;
    for _ in 0..4 {
        controller.frame(FRAME);
    }
    assert_eq!(heart.borrow().beats, 2);
    Ok(())
}

#[test]
fn test_pause_freezes_countdown() -> Result<()> {
    init_logging();

    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    let countdown = shared(Countdown {
        timer: Timer::with_action(Duration::from_secs(1), move || flag.set(true)),
        paused_frames: 0,
    });
    countdown.borrow_mut().timer.start();

    let mut controller = GameController::new()?;
    controller.loops_mut().register_frame(&countdown);
    controller.register_pausable(&countdown);
    controller.start_game();
    controller.play();

    controller.frame(FRAME);
    controller.frame(FRAME);
    controller.pause();
    for _ in 0..8 {
        controller.frame(FRAME);
    }
    assert!(!fired.get());
    assert_eq!(countdown.borrow().paused_frames, 8);
    assert_eq!(countdown.borrow().timer.remaining(), Duration::from_millis(500));

    controller.play();
    controller.frame(FRAME);
    controller.frame(FRAME);
    assert!(fired.get());
    assert_eq!(countdown.borrow().timer.status(), TimerStatus::Shutdown);
    Ok(())
}

#[test]
fn test_unknown_config_extension_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("loops.toml");
    std::fs::write(&path, "tick_enabled = true")?;

    let err = LoopsConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported"));
    assert!(LoopsConfig::load(dir.path().join("missing.json")).is_err());
    Ok(())
}
