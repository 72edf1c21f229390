use glam::{Quat, Vec2, Vec3};
use strike_engine::{yaw_pitch_degrees, yaw_pitch_rotation};

use crate::config::ControllerConfig;

/// Spherical camera placement around the player.
///
/// Yaw is unbounded; pitch and distance are kept inside the configured limits
/// by every mutator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl OrbitCamera {
    pub fn from_config(cfg: &ControllerConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: cfg.initial_pitch.clamp(cfg.min_pitch, cfg.max_pitch),
            distance: cfg.orbit_distance.clamp(cfg.min_distance, cfg.max_distance),
        }
    }

    /// Orbit by one step of mouse motion. Moving the mouse up lowers the camera.
    pub fn apply_mouse(&mut self, delta: Vec2, cfg: &ControllerConfig, dt: f32) {
        let delta = delta * cfg.mouse_sensitivity * cfg.orbit_speed * dt;
        self.yaw += delta.x;
        self.pitch = (self.pitch - delta.y).clamp(cfg.min_pitch, cfg.max_pitch);
    }

    /// Zoom by scroll movement. Scrolling away from the user moves closer.
    pub fn apply_zoom(&mut self, scroll: f32, cfg: &ControllerConfig) {
        self.distance = (self.distance - scroll * cfg.zoom_speed).clamp(cfg.min_distance, cfg.max_distance);
    }

    pub fn rotation(&self) -> Quat {
        yaw_pitch_rotation(self.yaw, self.pitch)
    }

    /// Camera position relative to the orbit target.
    pub fn offset(&self) -> Vec3 {
        self.rotation() * Vec3::new(0.0, 0.0, -self.distance)
    }

    pub fn position(&self, target: Vec3) -> Vec3 {
        target + self.offset()
    }

    /// Take yaw and pitch from a camera rotation so the next orbit step
    /// continues from where the camera actually looks.
    pub fn sync_from_rotation(&mut self, rotation: Quat, cfg: &ControllerConfig) {
        let (yaw, pitch) = yaw_pitch_degrees(rotation);
        self.yaw = yaw;
        self.pitch = pitch.clamp(cfg.min_pitch, cfg.max_pitch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strike_engine::look_rotation;

    #[test]
    fn starts_at_configured_pitch_and_distance() {
        let orbit = OrbitCamera::from_config(&ControllerConfig::default());
        assert_eq!(orbit.pitch, 20.0);
        assert_eq!(orbit.distance, 40.0);
    }

    #[test]
    fn pitch_and_distance_stay_clamped() {
        let cfg = ControllerConfig::default();
        let mut orbit = OrbitCamera::from_config(&cfg);

        orbit.apply_mouse(Vec2::new(0.0, -100.0), &cfg, 1.0);
        assert_eq!(orbit.pitch, cfg.max_pitch);
        orbit.apply_mouse(Vec2::new(0.0, 100.0), &cfg, 1.0);
        assert_eq!(orbit.pitch, cfg.min_pitch);

        orbit.apply_zoom(100.0, &cfg);
        assert_eq!(orbit.distance, cfg.min_distance);
        orbit.apply_zoom(-100.0, &cfg);
        assert_eq!(orbit.distance, cfg.max_distance);
    }

    #[test]
    fn horizontal_motion_scales_by_speed_and_dt() {
        let cfg = ControllerConfig { mouse_sensitivity: 2.0, ..Default::default() };
        let mut orbit = OrbitCamera::from_config(&cfg);
        orbit.apply_mouse(Vec2::new(1.0, 0.0), &cfg, 0.25);
        assert_eq!(orbit.yaw, 2.0 * 256.0 * 0.25);
        assert_eq!(orbit.pitch, 20.0);
    }

    #[test]
    fn camera_sits_behind_and_above_target() {
        let orbit = OrbitCamera { yaw: 0.0, pitch: 30.0, distance: 10.0 };
        let pos = orbit.position(Vec3::new(1.0, 0.0, 1.0));
        assert!(pos.y > 0.0);
        assert!(pos.z < 1.0);
        assert!((pos.distance(Vec3::new(1.0, 0.0, 1.0)) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn sync_recovers_angles_of_a_look_at() {
        let cfg = ControllerConfig::default();
        let orbit = OrbitCamera { yaw: 35.0, pitch: 25.0, distance: 40.0 };
        let target = Vec3::new(3.0, 0.5, -2.0);
        let look = look_rotation(target - orbit.position(target));

        let mut synced = OrbitCamera::from_config(&cfg);
        synced.sync_from_rotation(look, &cfg);
        assert!((synced.yaw - 35.0).abs() < 1e-3);
        assert!((synced.pitch - 25.0).abs() < 1e-3);
    }

    #[test]
    fn sync_clamps_pitch() {
        let cfg = ControllerConfig::default();
        let mut orbit = OrbitCamera::from_config(&cfg);
        orbit.sync_from_rotation(yaw_pitch_rotation(10.0, -15.0), &cfg);
        assert_eq!(orbit.pitch, cfg.min_pitch);
    }
}
