//! Game tunables loaded from data/cue_golf.toml.
//!
//! Every key is optional; a missing file or a missing key falls back to the
//! defaults below. `CUE_GOLF_SENSITIVITY` and `CUE_GOLF_IMPULSE` override the
//! file for quick tuning.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use strike_engine::keys;

use crate::error::ControllerError;

/// Player/camera/striker controller tunables. Angles are in degrees,
/// distances in world units, times in seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // Camera orbit
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub initial_pitch: f32,
    pub orbit_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub orbit_speed: f32,
    pub zoom_speed: f32,

    // Striker
    pub striker_min_distance: f32,
    pub striker_max_distance: f32,
    pub striker_spawn_distance: f32,
    pub striker_move_speed: f32,
    pub max_striker_velocity: f32,

    // Stroke
    pub mouse_sensitivity: f32,
    /// 0 = average stroke speed only, 1 = peak only.
    pub velocity_weight: f32,
    /// Input below this never counts towards the peak.
    pub velocity_threshold: f32,
    /// Slack above `striker_min_distance` at which a stroke lands.
    pub stroke_epsilon: f32,

    // Physics
    pub impulse_force: f32,
    pub max_goal_velocity: f32,

    // Post-shot sequence
    pub settle_delay: f32,
    pub settle_speed: f32,
    pub return_delay: f32,
    pub return_duration: f32,

    // Key bindings
    pub shoot_key: u32,
    pub cancel_key: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            min_pitch: 4.0,
            max_pitch: 80.0,
            initial_pitch: 20.0,
            orbit_distance: 40.0,
            min_distance: 20.0,
            max_distance: 80.0,
            orbit_speed: 256.0,
            zoom_speed: 20.0,
            striker_min_distance: 2.0,
            striker_max_distance: 8.0,
            striker_spawn_distance: 4.0,
            striker_move_speed: 64.0,
            max_striker_velocity: 4.0,
            mouse_sensitivity: 1.0,
            velocity_weight: 0.6,
            velocity_threshold: 0.5,
            stroke_epsilon: 0.05,
            impulse_force: 10.0,
            max_goal_velocity: 10.0,
            settle_delay: 0.1,
            settle_speed: 0.1,
            return_delay: 1.0,
            return_duration: 1.0,
            shoot_key: keys::SPACE,
            cancel_key: keys::B,
        }
    }
}

fn ensure(ok: bool, name: &'static str, reason: impl Into<String>) -> Result<(), ControllerError> {
    if ok {
        Ok(())
    } else {
        Err(ControllerError::InvalidConfig { name, reason: reason.into() })
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> Result<(), ControllerError> {
        ensure(self.min_pitch <= self.max_pitch, "min_pitch", "must not exceed max_pitch")?;
        ensure(
            (-90.0..=90.0).contains(&self.min_pitch) && (-90.0..=90.0).contains(&self.max_pitch),
            "max_pitch",
            "pitch limits must lie within [-90, 90]",
        )?;
        ensure(self.min_distance > 0.0, "min_distance", "must be positive")?;
        ensure(self.min_distance <= self.max_distance, "min_distance", "must not exceed max_distance")?;
        ensure(self.striker_min_distance >= 0.0, "striker_min_distance", "must not be negative")?;
        ensure(
            self.striker_min_distance <= self.striker_max_distance,
            "striker_min_distance",
            "must not exceed striker_max_distance",
        )?;
        ensure(
            (self.striker_min_distance..=self.striker_max_distance).contains(&self.striker_spawn_distance),
            "striker_spawn_distance",
            "must lie within [striker_min_distance, striker_max_distance]",
        )?;
        ensure(self.orbit_speed > 0.0, "orbit_speed", "must be positive")?;
        ensure(self.zoom_speed > 0.0, "zoom_speed", "must be positive")?;
        ensure(self.striker_move_speed > 0.0, "striker_move_speed", "must be positive")?;
        ensure(self.mouse_sensitivity > 0.0, "mouse_sensitivity", "must be positive")?;
        ensure(self.max_striker_velocity >= 0.0, "max_striker_velocity", "must not be negative")?;
        ensure(self.impulse_force >= 0.0, "impulse_force", "must not be negative")?;
        ensure(
            (0.0..=1.0).contains(&self.velocity_weight),
            "velocity_weight",
            format!("{} is outside [0, 1]", self.velocity_weight),
        )?;
        ensure(self.velocity_threshold >= 0.0, "velocity_threshold", "must not be negative")?;
        ensure(self.stroke_epsilon >= 0.0, "stroke_epsilon", "must not be negative")?;
        ensure(self.max_goal_velocity >= 0.0, "max_goal_velocity", "must not be negative")?;
        // A negative settle speed would keep the ball sliding forever
        ensure(self.settle_speed >= 0.0, "settle_speed", "must not be negative")?;
        ensure(self.settle_delay >= 0.0, "settle_delay", "must not be negative")?;
        ensure(self.return_delay >= 0.0, "return_delay", "must not be negative")?;
        ensure(self.return_duration > 0.0, "return_duration", "must be positive")?;
        Ok(())
    }
}

/// Obstacle rotator tunables.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Degrees per second around world up. Negative spins the other way.
    pub rotation_speed: f32,
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self { rotation_speed: 45.0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CueGolfConfig {
    pub controller: ControllerConfig,
    pub obstacle: ObstacleConfig,
}

impl CueGolfConfig {
    /// Parse TOML text. Keys not present keep their defaults.
    pub fn from_toml_str(txt: &str) -> Result<Self> {
        let cfg: CueGolfConfig = toml::from_str(txt).context("parse cue_golf TOML")?;
        cfg.controller.validate()?;
        Ok(cfg)
    }

    /// Apply `CUE_GOLF_*` overrides from `var` (usually the process env).
    /// Unparsable values are ignored.
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("CUE_GOLF_SENSITIVITY").and_then(|s| s.parse().ok()) {
            self.controller.mouse_sensitivity = v;
        }
        if let Some(v) = var("CUE_GOLF_IMPULSE").and_then(|s| s.parse().ok()) {
            self.controller.impulse_force = v;
        }
    }
}

fn data_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load a config file; a missing file yields defaults.
pub fn load_from_path(path: &Path) -> Result<CueGolfConfig> {
    if !path.is_file() {
        log::debug!("{} not found, using default tunables", path.display());
        return Ok(CueGolfConfig::default());
    }
    let txt = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    CueGolfConfig::from_toml_str(&txt).with_context(|| format!("load {}", path.display()))
}

/// Load data/cue_golf.toml and apply env overrides.
pub fn load_default() -> Result<CueGolfConfig> {
    let mut cfg = load_from_path(&data_root().join("cue_golf.toml"))?;
    cfg.apply_overrides(|key| std::env::var(key).ok());
    cfg.controller.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let cfg = ControllerConfig { min_pitch: 60.0, max_pitch: 10.0, ..Default::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ControllerError::InvalidConfig { name: "min_pitch", .. })
        ));

        let cfg = ControllerConfig {
            striker_min_distance: 9.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn weight_outside_unit_range_is_rejected() {
        let cfg = ControllerConfig { velocity_weight: 1.5, ..Default::default() };
        match cfg.validate() {
            Err(ControllerError::InvalidConfig { name, reason }) => {
                assert_eq!(name, "velocity_weight");
                assert!(reason.contains("1.5"));
            }
            other => panic!("expected invalid weight, got {:?}", other),
        }
    }

    #[test]
    fn non_positive_speed_is_rejected() {
        let cfg = ControllerConfig { striker_move_speed: 0.0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    fn rejected_field(cfg: ControllerConfig) -> &'static str {
        match cfg.validate() {
            Err(ControllerError::InvalidConfig { name, .. }) => name,
            other => panic!("expected invalid config, got {:?}", other),
        }
    }

    #[test]
    fn negative_thresholds_are_rejected() {
        let base = ControllerConfig::default;
        assert_eq!(rejected_field(ControllerConfig { settle_speed: -0.1, ..base() }), "settle_speed");
        assert_eq!(rejected_field(ControllerConfig { stroke_epsilon: -0.01, ..base() }), "stroke_epsilon");
        assert_eq!(
            rejected_field(ControllerConfig { velocity_threshold: -1.0, ..base() }),
            "velocity_threshold"
        );
        assert_eq!(
            rejected_field(ControllerConfig { max_goal_velocity: -5.0, ..base() }),
            "max_goal_velocity"
        );
    }

    #[test]
    fn zero_thresholds_are_allowed() {
        let cfg = ControllerConfig {
            settle_speed: 0.0,
            stroke_epsilon: 0.0,
            velocity_threshold: 0.0,
            max_goal_velocity: 0.0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn spawn_distance_must_lie_in_striker_range() {
        let base = ControllerConfig::default;
        assert_eq!(
            rejected_field(ControllerConfig { striker_spawn_distance: 1.0, ..base() }),
            "striker_spawn_distance"
        );
        assert_eq!(
            rejected_field(ControllerConfig { striker_spawn_distance: 8.5, ..base() }),
            "striker_spawn_distance"
        );
        let at_edge = ControllerConfig { striker_spawn_distance: 8.0, ..base() };
        assert_eq!(at_edge.validate(), Ok(()));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut cfg = CueGolfConfig::default();
        cfg.apply_overrides(|key| match key {
            "CUE_GOLF_SENSITIVITY" => Some("2.5".to_string()),
            "CUE_GOLF_IMPULSE" => Some("not a number".to_string()),
            _ => None,
        });
        assert_eq!(cfg.controller.mouse_sensitivity, 2.5);
        assert_eq!(cfg.controller.impulse_force, 10.0);
    }

    #[test]
    fn data_root_is_the_crate_data_dir() {
        let root = data_root();
        assert!(root.ends_with("cue-golf/data"), "{}", root.display());
        assert!(root.join("cue_golf.toml").is_file());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = load_from_path(Path::new("/nonexistent/cue_golf.toml")).unwrap();
        assert_eq!(cfg, CueGolfConfig::default());
    }
}
