//! Stroke tracking: turns a run of per-frame striker pushes into a shot speed.
//!
//! A stroke starts on the first frame the player pushes the striker forward
//! and lands when the striker reaches its closest distance to the ball. The
//! shot speed blends the average speed over the whole stroke with the peak
//! input seen on consecutive fast frames, so a single jittery spike cannot
//! dominate the shot.

use strike_engine::lerp_clamped;

/// What a frame of input did to the stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEvent {
    /// No stroke in progress and no forward push.
    Idle,
    /// A forward push started a new stroke.
    Started,
    /// A stroke in progress saw another frame.
    Tracking,
    /// A pull back during the stroke discarded it.
    Cancelled,
}

/// Speeds computed when a stroke lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotVelocity {
    pub average: f32,
    pub peak: f32,
    /// Blended and clamped speed that scales the impulse.
    pub final_velocity: f32,
}

#[derive(Debug, Clone, Default)]
pub struct StrokeTracker {
    in_progress: bool,
    start_time: f32,
    start_distance: f32,
    peak: f32,
    last_input: f32,
    high_frames: u32,
}

impl StrokeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame of striker input. `current_distance` is the striker's
    /// distance from the ball before this frame's move.
    pub fn observe(&mut self, input: f32, now: f32, current_distance: f32, threshold: f32) -> StrokeEvent {
        if input > 0.0 && !self.in_progress {
            *self = Self {
                in_progress: true,
                start_time: now,
                start_distance: current_distance,
                ..Self::default()
            };
            StrokeEvent::Started
        } else if input > 0.0 {
            if input > threshold {
                if self.last_input > threshold {
                    self.high_frames += 1;
                } else {
                    self.high_frames = 1;
                }
                if self.high_frames >= 2 {
                    self.peak = self.peak.max(input);
                }
            }
            self.last_input = input;
            StrokeEvent::Tracking
        } else if input < 0.0 && self.in_progress {
            self.in_progress = false;
            StrokeEvent::Cancelled
        } else if self.in_progress {
            StrokeEvent::Tracking
        } else {
            StrokeEvent::Idle
        }
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn peak(&self) -> f32 {
        self.peak
    }

    pub fn start_distance(&self) -> f32 {
        self.start_distance
    }

    /// Whether a stroke in progress has brought the striker within
    /// `epsilon` of `min_distance`.
    pub fn has_landed(&self, current_distance: f32, min_distance: f32, epsilon: f32) -> bool {
        self.in_progress && current_distance <= min_distance + epsilon
    }

    /// Finish the stroke and compute the shot speed.
    pub fn complete(&mut self, now: f32, current_distance: f32, weight: f32, max_velocity: f32) -> ShotVelocity {
        let elapsed = now - self.start_time;
        let travelled = self.start_distance - current_distance;
        let average = if elapsed > 0.0 { travelled / elapsed } else { 0.0 };
        let blended = lerp_clamped(average, self.peak, weight);
        let shot = ShotVelocity {
            average,
            peak: self.peak,
            final_velocity: blended.clamp(0.0, max_velocity),
        };
        self.in_progress = false;
        shot
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 0.5;

    #[test]
    fn first_push_starts_stroke() {
        let mut stroke = StrokeTracker::new();
        assert_eq!(stroke.observe(0.0, 0.0, 4.0, THRESHOLD), StrokeEvent::Idle);
        assert_eq!(stroke.observe(-1.0, 0.0, 4.0, THRESHOLD), StrokeEvent::Idle);
        assert_eq!(stroke.observe(0.25, 1.0, 4.0, THRESHOLD), StrokeEvent::Started);
        assert!(stroke.is_in_progress());
        assert_eq!(stroke.start_distance(), 4.0);
        assert_eq!(stroke.peak(), 0.0);
    }

    #[test]
    fn single_fast_frame_does_not_raise_peak() {
        let mut stroke = StrokeTracker::new();
        stroke.observe(1.0, 0.0, 4.0, THRESHOLD);
        stroke.observe(3.0, 0.0, 4.0, THRESHOLD);
        assert_eq!(stroke.peak(), 0.0);
        stroke.observe(0.25, 0.0, 4.0, THRESHOLD);
        stroke.observe(2.0, 0.0, 4.0, THRESHOLD);
        assert_eq!(stroke.peak(), 0.0);
    }

    #[test]
    fn consecutive_fast_frames_raise_peak() {
        let mut stroke = StrokeTracker::new();
        stroke.observe(1.0, 0.0, 4.0, THRESHOLD);
        stroke.observe(3.0, 0.0, 4.0, THRESHOLD);
        stroke.observe(2.0, 0.0, 4.0, THRESHOLD);
        assert_eq!(stroke.peak(), 2.0);
        stroke.observe(5.0, 0.0, 4.0, THRESHOLD);
        assert_eq!(stroke.peak(), 5.0);
        stroke.observe(4.0, 0.0, 4.0, THRESHOLD);
        assert_eq!(stroke.peak(), 5.0);
    }

    #[test]
    fn pull_back_cancels() {
        let mut stroke = StrokeTracker::new();
        stroke.observe(1.0, 0.0, 4.0, THRESHOLD);
        assert_eq!(stroke.observe(-0.5, 0.0, 3.0, THRESHOLD), StrokeEvent::Cancelled);
        assert!(!stroke.is_in_progress());
        assert!(!stroke.has_landed(0.0, 2.0, 0.05));
    }

    #[test]
    fn zero_elapsed_stroke_uses_weighted_peak() {
        let mut stroke = StrokeTracker::new();
        stroke.observe(1.0, 2.0, 6.0, THRESHOLD);
        stroke.observe(2.0, 2.0, 5.0, THRESHOLD);
        stroke.observe(2.0, 2.0, 4.0, THRESHOLD);

        let shot = stroke.complete(2.0, 2.0, 0.5, 4.0);
        assert_eq!(shot.average, 0.0);
        assert_eq!(shot.peak, 2.0);
        assert_eq!(shot.final_velocity, 1.0);
        assert!(!stroke.is_in_progress());
    }

    #[test]
    fn shot_blends_average_and_peak_then_clamps() {
        let mut stroke = StrokeTracker::new();
        stroke.observe(1.0, 0.0, 6.0, THRESHOLD);
        let shot = stroke.complete(2.0, 2.0, 0.0, 4.0);
        assert_eq!(shot.average, 2.0);
        assert_eq!(shot.final_velocity, 2.0);

        let mut stroke = StrokeTracker::new();
        stroke.observe(1.0, 0.0, 8.0, THRESHOLD);
        stroke.observe(9.0, 0.0, 8.0, THRESHOLD);
        stroke.observe(9.0, 0.0, 8.0, THRESHOLD);
        let shot = stroke.complete(0.5, 2.0, 0.6, 4.0);
        assert_eq!(shot.final_velocity, 4.0);
    }

    #[test]
    fn landing_uses_epsilon() {
        let mut stroke = StrokeTracker::new();
        stroke.observe(1.0, 0.0, 4.0, THRESHOLD);
        assert!(!stroke.has_landed(2.5, 2.0, 0.25));
        assert!(stroke.has_landed(2.25, 2.0, 0.25));
    }
}
