/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death (max 10 steps per frame)
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Simulation clock seen by game logic.
///
/// Advanced once per fixed step, so `elapsed` is simulated time since the
/// game started rather than wall time.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    dt: f32,
    elapsed: f32,
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new step of length `dt`.
    pub fn advance(&mut self, dt: f32) {
        self.dt = dt;
        self.elapsed += dt;
        self.frame += 1;
    }

    /// Length of the current step in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Seconds simulated so far, including the current step.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Number of steps taken.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0 / 60.0);
        assert_eq!(steps, 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(0.008); // half a frame
        assert_eq!(steps, 0);
        let steps = ts.accumulate(0.010); // over one frame total
        assert_eq!(steps, 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        let steps = ts.accumulate(1.0); // 60 frames worth, but capped at 10
        assert_eq!(steps, 10);
    }

    #[test]
    fn clock_tracks_steps() {
        let mut clock = FrameClock::new();
        clock.advance(0.25);
        clock.advance(0.25);
        assert_eq!(clock.frame(), 2);
        assert_eq!(clock.dt(), 0.25);
        assert_eq!(clock.elapsed(), 0.5);
    }
}
