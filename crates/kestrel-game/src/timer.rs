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

//! Frame-driven countdowns and periodic ticks.
//!
//! Neither type reads a clock. The host feeds elapsed time through
//! `advance(dt)`, usually from a frame updatable, so pausing the game is as
//! simple as not advancing them.

use crate::capability::Pausable;
use std::fmt;
use std::time::Duration;

type Action = Box<dyn FnMut()>;

/// Lifecycle of a [`Timer`] or [`TickMachine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    /// Not running. Advancing has no effect.
    #[default]
    Shutdown,
    /// Counting.
    Run,
    /// Suspended. [`Timer::resume`] continues where it stopped.
    Pause,
}

/// A one-shot countdown that fires its action when the duration elapses.
///
/// ```rust
/// use kestrel_game::Timer;
/// use std::time::Duration;
///
/// let mut timer = Timer::new();
/// timer.set_time(Duration::from_secs(2)).start();
/// assert!(!timer.advance(Duration::from_secs(1)));
/// assert!(timer.advance(Duration::from_secs(1)));
/// ```
#[derive(Default)]
pub struct Timer {
    duration: Duration,
    elapsed: Duration,
    status: TimerStatus,
    action: Option<Action>,
}

impl Timer {
    /// A stopped timer with a zero duration and no action.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stopped timer with `duration` and `action` already set.
    pub fn with_action(duration: Duration, action: impl FnMut() + 'static) -> Self {
        let mut timer = Self::new();
        timer.set_time(duration).set_action(action);
        timer
    }

    /// Sets the countdown length and rewinds the elapsed time.
    pub fn set_time(&mut self, duration: Duration) -> &mut Self {
        self.duration = duration;
        self.reset();
        self
    }

    /// Sets the action fired on expiry.
    pub fn set_action(&mut self, action: impl FnMut() + 'static) -> &mut Self {
        self.action = Some(Box::new(action));
        self
    }

    /// Starts counting from zero. Does nothing if already running.
    pub fn start(&mut self) {
        if self.status == TimerStatus::Run {
            return;
        }
        self.reset();
        self.status = TimerStatus::Run;
    }

    /// Stops without firing.
    pub fn stop(&mut self) {
        self.status = TimerStatus::Shutdown;
    }

    /// Rewinds the elapsed time without changing the status.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Stops, then starts again from zero.
    pub fn restart(&mut self) {
        self.stop();
        self.start();
    }

    /// Suspends a running timer.
    pub fn pause(&mut self) {
        if self.status == TimerStatus::Run {
            self.status = TimerStatus::Pause;
        }
    }

    /// Continues a paused timer. A stopped timer stays stopped.
    pub fn resume(&mut self) {
        if self.status == TimerStatus::Pause {
            self.status = TimerStatus::Run;
        }
    }

    /// Moves the countdown forward by `dt`.
    ///
    /// Returns `true` on the call that expires the timer. The action fires
    /// once and the timer shuts down.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.status != TimerStatus::Run {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        if self.elapsed < self.duration {
            return false;
        }

        self.status = TimerStatus::Shutdown;
        log::trace!("Timer: expired after {:?}.", self.duration);
        if let Some(action) = self.action.as_mut() {
            action();
        }
        true
    }

    /// Time counted since the last start or reset.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Time left before expiry.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// The configured countdown length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The current lifecycle status.
    pub fn status(&self) -> TimerStatus {
        self.status
    }
}

impl Pausable for Timer {
    fn on_pause(&mut self) {
        self.pause();
    }

    fn on_resume(&mut self) {
        self.resume();
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("status", &self.status)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Fires an action once per elapsed interval while running.
///
/// A zero interval fires exactly once per [`advance`](Self::advance) call.
#[derive(Default)]
pub struct TickMachine {
    interval: Duration,
    accumulated: Duration,
    status: TimerStatus,
    action: Option<Action>,
}

impl TickMachine {
    /// A stopped machine with a zero interval and no action.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time between ticks.
    pub fn set_interval(&mut self, interval: Duration) -> &mut Self {
        self.interval = interval;
        self
    }

    /// Sets the action fired on each tick.
    pub fn set_action(&mut self, action: impl FnMut() + 'static) -> &mut Self {
        self.action = Some(Box::new(action));
        self
    }

    /// Starts ticking. Does nothing if already running.
    pub fn start(&mut self) {
        if self.status == TimerStatus::Run {
            return;
        }
        self.accumulated = Duration::ZERO;
        self.status = TimerStatus::Run;
        log::debug!("TickMachine: started, interval {:?}.", self.interval);
    }

    /// Stops ticking and drops any partial interval.
    pub fn stop(&mut self) {
        self.status = TimerStatus::Shutdown;
        self.accumulated = Duration::ZERO;
    }

    /// Moves time forward by `dt` and returns how many ticks elapsed.
    ///
    /// The action, if any, runs once per tick.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.status != TimerStatus::Run {
            return 0;
        }
        let ticks = if self.interval.is_zero() {
            1
        } else {
            let elapsed = self.accumulated.saturating_add(dt);
            let whole = elapsed.as_nanos() / self.interval.as_nanos();
            let ticks = u32::try_from(whole).unwrap_or(u32::MAX);
            // Ticks past u32::MAX stay accumulated for the next advance.
            self.accumulated = self
                .interval
                .checked_mul(ticks)
                .and_then(|spent| elapsed.checked_sub(spent))
                .unwrap_or(Duration::ZERO);
            ticks
        };

        if let Some(action) = self.action.as_mut() {
            for _ in 0..ticks {
                action();
            }
        }
        ticks
    }

    /// Returns `true` while running.
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Run
    }

    /// The time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The current lifecycle status.
    pub fn status(&self) -> TimerStatus {
        self.status
    }
}

impl fmt::Debug for TickMachine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickMachine")
            .field("interval", &self.interval)
            .field("status", &self.status)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_timer_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let mut timer = Timer::with_action(SECOND * 3, move || counter.set(counter.get() + 1));
        timer.start();

        assert!(!timer.advance(SECOND));
        assert_eq!(timer.remaining(), SECOND * 2);
        assert!(timer.advance(SECOND * 5));
        assert_eq!(timer.elapsed(), SECOND * 3);
        assert_eq!(timer.status(), TimerStatus::Shutdown);
        assert!(!timer.advance(SECOND));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_timer_pause_and_resume() {
        let mut timer = Timer::new();
        timer.set_time(SECOND * 2).start();
        timer.advance(SECOND);

        timer.on_pause();
        assert_eq!(timer.status(), TimerStatus::Pause);
        assert!(!timer.advance(SECOND * 10));
        assert_eq!(timer.elapsed(), SECOND);

        timer.on_resume();
        assert!(timer.advance(SECOND));
    }

    #[test]
    fn test_resume_does_not_start_a_stopped_timer() {
        let mut timer = Timer::new();
        timer.set_time(SECOND);
        timer.resume();
        assert_eq!(timer.status(), TimerStatus::Shutdown);
    }

    #[test]
    fn test_restart_rewinds() {
        let mut timer = Timer::new();
        timer.set_time(SECOND * 4).start();
        timer.advance(SECOND * 3);
        timer.restart();
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.status(), TimerStatus::Run);
    }

    #[test]
    fn test_tick_machine_counts_intervals() {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let mut machine = TickMachine::new();
        machine
            .set_interval(Duration::from_millis(500))
            .set_action(move || counter.set(counter.get() + 1));

        assert_eq!(machine.advance(SECOND), 0);
        machine.start();
        assert_eq!(machine.advance(Duration::from_millis(400)), 0);
        assert_eq!(machine.advance(Duration::from_millis(700)), 2);
        assert_eq!(machine.advance(Duration::from_millis(400)), 1);
        assert_eq!(fired.get(), 3);

        machine.stop();
        assert_eq!(machine.advance(SECOND), 0);
    }

    #[test]
    fn test_very_long_interval_keeps_remainder() {
        let mut machine = TickMachine::new();
        machine.set_interval(Duration::from_secs(u64::MAX)).start();
        assert_eq!(machine.advance(Duration::from_secs(u64::MAX - 1)), 0);
        assert_eq!(machine.advance(SECOND), 1);
        assert_eq!(machine.advance(SECOND), 0);
    }

    #[test]
    fn test_zero_interval_ticks_every_advance() {
        let mut machine = TickMachine::new();
        machine.start();
        assert_eq!(machine.advance(Duration::ZERO), 1);
        assert_eq!(machine.advance(SECOND * 9), 1);
    }
}
