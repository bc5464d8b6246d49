// src/timer.rs
// Countdown state and the one-second ticker task that drives it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::defs::TIMER_SECONDS;
use crate::game::GameEvent;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    active: bool,
}

impl Countdown {
    /// Inactive, full time on the clock.
    pub fn new() -> Self {
        Self { remaining: TIMER_SECONDS, active: false }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts from a full clock. There is no resume.
    pub fn start(&mut self) {
        self.remaining = TIMER_SECONDS;
        self.active = true;
    }

    /// Stops counting, the remaining time stays on display.
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn toggle(&mut self) -> bool {
        if self.active {
            self.stop();
        } else {
            self.start();
        }
        self.active
    }

    /// Puts the full time back on the clock without changing the active flag.
    pub fn reset(&mut self) {
        self.remaining = TIMER_SECONDS;
    }

    /// One second elapsed. Returns true when this tick ran the clock out.
    pub fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running ticker task. Every tick it sends is stamped with the
/// ticker's generation; dropping the handle aborts the task.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Spawns the task on the current tokio runtime. The first tick fires
    /// one full period after the call.
    pub fn spawn(generation: u64, events: UnboundedSender<GameEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if events.send(GameEvent::Tick(generation)).is_err() {
                    // Receiver gone, nobody left to tick for.
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
