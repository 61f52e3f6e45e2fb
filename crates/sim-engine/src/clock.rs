//! The accelerated simulation clock. Each tick converts a wall-clock
//! delta into simulated seconds through the base speed and a user
//! multiplier; wall deltas are clamped so a frame hiccup or a suspended
//! tab cannot produce an outsized jump.

use tracing::debug;

pub struct SimClock {
    sim_time: f64,
    base_speed: f64,
    speed_multiplier: f64,
    max_frame_delta: f64,
    running: bool,
}

impl SimClock {
    pub fn new(start_time: i64, base_speed: f64, max_frame_delta: f64) -> Self {
        Self {
            sim_time: start_time as f64,
            base_speed,
            speed_multiplier: 1.0,
            max_frame_delta,
            running: false,
        }
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Negative multipliers are clamped to zero; the clock never runs
    /// backwards.
    pub fn set_multiplier(&mut self, multiplier: f64) {
        self.speed_multiplier = multiplier.max(0.0);
        debug!(multiplier = self.speed_multiplier, "speed changed");
    }

    /// Advance by a wall-clock delta and return `(prev, new)` simulated
    /// times. While paused this is a no-op and both values are equal.
    pub fn advance(&mut self, wall_delta_secs: f64) -> (f64, f64) {
        let prev = self.sim_time;
        if !self.running {
            return (prev, prev);
        }
        let clamped = wall_delta_secs.clamp(0.0, self.max_frame_delta);
        self.sim_time += clamped * self.base_speed * self.speed_multiplier;
        (prev, self.sim_time)
    }

    /// Pin the clock, e.g. to the series end on completion.
    pub fn clamp_to(&mut self, limit: f64) {
        if self.sim_time > limit {
            self.sim_time = limit;
        }
    }
}
