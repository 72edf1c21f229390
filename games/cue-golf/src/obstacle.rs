use glam::{EulerRot, Quat};
use strike_engine::{EngineContext, EntityId};

use crate::config::ObstacleConfig;
use crate::error::ControllerError;

/// Advance a yaw angle in degrees. Reaching a full turn resets to 0; going
/// below 0 wraps back into [0, 360).
pub fn advance_yaw(yaw: f32, delta: f32) -> f32 {
    let next = yaw + delta;
    if next >= 360.0 {
        return 0.0;
    }
    // rem_euclid can round tiny negatives up to exactly 360
    let wrapped = next.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Spins an entity around world up at a constant rate.
#[derive(Debug, Clone)]
pub struct ObstacleRotator {
    entity: EntityId,
    rotation_speed: f32,
    yaw: f32,
    pitch: f32,
    roll: f32,
}

impl ObstacleRotator {
    /// Capture the entity's current orientation as the starting pose.
    pub fn new(entity: EntityId, config: &ObstacleConfig, ctx: &EngineContext) -> Result<Self, ControllerError> {
        let rotation = ctx
            .scene
            .get(entity)
            .map(|e| e.rotation)
            .ok_or(ControllerError::MissingEntity { role: "obstacle", id: entity })?;
        let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
        Ok(Self {
            entity,
            rotation_speed: config.rotation_speed,
            yaw: advance_yaw(yaw.to_degrees(), 0.0),
            pitch,
            roll,
        })
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Current yaw in degrees, always in [0, 360).
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw.to_radians(), self.pitch, self.roll)
    }

    /// Rotate by one step. Kinematic bodies follow on the next physics step.
    pub fn update(&mut self, ctx: &mut EngineContext) {
        self.yaw = advance_yaw(self.yaw, self.rotation_speed * ctx.clock.dt());
        let Some(pos) = ctx.scene.get(self.entity).map(|e| e.pos) else {
            return;
        };
        let rotation = self.rotation();
        ctx.set_pose(self.entity, pos, rotation);
    }
}
