//! Round timer abstraction.
//!
//! The scoring engine only needs start/stop semantics and a "reached zero"
//! signal. Audio-backed timers implement `TimerService` outside this crate;
//! `Countdown` is the built-in implementation over a monotonic clock.

mod clock;
mod countdown;

pub use clock::*;
pub use countdown::*;

use serde::{Deserialize, Serialize};

/// Start/stop countdown with elapsed-time reporting.
pub trait TimerService {
    fn play(&mut self);

    fn pause(&mut self);

    /// Stop and rewind to the start.
    fn stop(&mut self);

    /// Release underlying resources. The timer is stopped afterwards.
    fn release(&mut self) {
        self.stop();
    }

    /// Move the playback position, e.g. when restoring a saved session.
    fn seek(&mut self, position_millis: u64);

    fn is_playing(&self) -> bool;

    fn position_millis(&self) -> u64;

    fn duration_millis(&self) -> u64;

    fn remaining_millis(&self) -> u64 {
        self.duration_millis()
            .saturating_sub(self.position_millis())
    }

    fn has_reached_zero(&self) -> bool {
        self.position_millis() >= self.duration_millis()
    }

    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            position_millis: self.position_millis(),
            duration_millis: self.duration_millis(),
            playing: self.is_playing(),
        }
    }
}

/// Persisted view of a timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub position_millis: u64,
    pub duration_millis: u64,
    pub playing: bool,
}
