use strike_engine::EntityId;
use thiserror::Error;

/// Failures while wiring a controller to its scene or validating tunables.
/// Nothing fails once a controller is running; runtime inputs are clamped.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControllerError {
    #[error("{role} entity {id:?} is not in the scene")]
    MissingEntity { role: &'static str, id: EntityId },
    #[error("player entity {0:?} has no physics body")]
    MissingBody(EntityId),
    #[error("invalid config `{name}`: {reason}")]
    InvalidConfig { name: &'static str, reason: String },
}
