use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::orientation;
#[cfg(feature = "physics")]
use crate::core::physics::PhysicsBody;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity and rapid prototyping over ECS purity.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active. Inactive entities keep their transform
    /// but are ignored by hosts when presenting the scene.
    pub active: bool,
    /// Position in world space (Y up).
    pub pos: Vec3,
    /// Orientation. Local forward is +Z.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Physics body (optional, requires "physics" feature).
    #[cfg(feature = "physics")]
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            #[cfg(feature = "physics")]
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[cfg(feature = "physics")]
    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    // -- Orientation helpers --

    /// Unit vector the entity is facing.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Rotate so that `forward()` points at `target`. No-op when `target`
    /// coincides with the entity position.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.pos;
        if dir.length_squared() > f32::EPSILON {
            self.rotation = orientation::look_rotation(dir);
        }
    }
}
