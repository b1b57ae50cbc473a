use crate::timer::{Clock, MonotonicClock, TimerService};

/// Countdown measured against a clock baseline.
///
/// Elapsed time is `elapsed_before + (now - started_at)`, so pausing and
/// resuming never accumulates drift from tick scheduling.
#[derive(Debug, Clone)]
pub struct Countdown<C: Clock = MonotonicClock> {
    clock: C,
    duration_ms: u64,
    started_at: Option<u64>,
    elapsed_before: u64,
}

impl Countdown<MonotonicClock> {
    pub fn new(duration_ms: u64) -> Self {
        Self::with_clock(duration_ms, MonotonicClock::new())
    }
}

impl<C: Clock> Countdown<C> {
    pub fn with_clock(duration_ms: u64, clock: C) -> Self {
        Self {
            clock,
            duration_ms,
            started_at: None,
            elapsed_before: 0,
        }
    }

    fn elapsed(&self) -> u64 {
        let running = self
            .started_at
            .map_or(0, |start| self.clock.now_millis().saturating_sub(start));
        (self.elapsed_before + running).min(self.duration_ms)
    }
}

impl<C: Clock> TimerService for Countdown<C> {
    fn play(&mut self) {
        if self.started_at.is_none() && !self.has_reached_zero() {
            self.started_at = Some(self.clock.now_millis());
        }
    }

    fn pause(&mut self) {
        if self.started_at.is_some() {
            self.elapsed_before = self.elapsed();
            self.started_at = None;
        }
    }

    fn stop(&mut self) {
        self.started_at = None;
        self.elapsed_before = 0;
    }

    fn seek(&mut self, position_millis: u64) {
        self.elapsed_before = position_millis.min(self.duration_ms);
        if self.started_at.is_some() {
            self.started_at = Some(self.clock.now_millis());
        }
    }

    fn is_playing(&self) -> bool {
        self.started_at.is_some() && !self.has_reached_zero()
    }

    fn position_millis(&self) -> u64 {
        self.elapsed()
    }

    fn duration_millis(&self) -> u64 {
        self.duration_ms
    }
}
