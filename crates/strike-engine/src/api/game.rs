use glam::Quat;
#[cfg(feature = "physics")]
use glam::Vec3;

use crate::api::types::{EntityId, GameEvent};
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::input::queue::InputQueue;
#[cfg(feature = "physics")]
use crate::components::entity::Entity;
#[cfg(feature = "physics")]
use crate::core::physics::{BodyDesc, ColliderMaterial, CollisionPair, PhysicsWorld};

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Gravity vector for physics simulation. Default: zero (no gravity).
    /// Y is up, so downward gravity has a negative Y component.
    #[cfg(feature = "physics")]
    pub gravity: glam::Vec3,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            #[cfg(feature = "physics")]
            gravity: glam::Vec3::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step of game logic. `ctx.clock` already covers this step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    pub clock: FrameClock,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
    #[cfg(feature = "physics")]
    collision_events: Vec<CollisionPair>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            events: Vec::new(),
            clock: FrameClock::new(),
            next_id: 1,
            #[cfg(feature = "physics")]
            physics: PhysicsWorld::new(Vec3::ZERO),
            #[cfg(feature = "physics")]
            collision_events: Vec::new(),
        }
    }

    /// Create an EngineContext configured from a [`GameConfig`].
    pub fn from_config(config: &GameConfig) -> Self {
        #[allow(unused_mut)]
        let mut ctx = Self::new();
        #[cfg(feature = "physics")]
        {
            ctx.physics = PhysicsWorld::new(config.gravity);
            ctx.physics.set_dt(config.fixed_dt);
        }
        #[cfg(not(feature = "physics"))]
        let _ = config;
        ctx
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Start a fixed step of length `dt`.
    pub fn begin_step(&mut self, dt: f32) {
        self.clock.advance(dt);
    }

    /// Emit a game event for the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data. Collision events are replaced on
    /// every physics step instead, so the next update still sees them.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Set an entity's pose. Kinematic bodies are driven to the same pose
    /// on the next physics step; other bodies are teleported.
    pub fn set_pose(&mut self, id: EntityId, pos: glam::Vec3, rotation: Quat) {
        if let Some(entity) = self.scene.get_mut(id) {
            entity.pos = pos;
            entity.rotation = rotation;
            #[cfg(feature = "physics")]
            if let Some(body) = &entity.body {
                self.physics.set_pose(body, pos, rotation);
            }
        }
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    /// The entity's pose is set from the BodyDesc.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity
            .with_pos(desc.position)
            .with_rotation(desc.rotation)
            .with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Whether the entity exists and owns a physics body.
    #[cfg(feature = "physics")]
    pub fn has_body(&self, id: EntityId) -> bool {
        self.scene.get(id).is_some_and(|e| e.body.is_some())
    }

    /// Apply an instantaneous impulse to an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec3) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body.as_ref()) {
            self.physics.apply_impulse(body, impulse);
        }
    }

    /// Set the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec3) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body.as_ref()) {
            self.physics.set_velocity(body, vel);
        }
    }

    /// Get the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec3 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec3::ZERO)
    }

    /// Get collision events from the most recent physics step.
    #[cfg(feature = "physics")]
    pub fn collisions(&self) -> &[CollisionPair] {
        &self.collision_events
    }

    /// Step the physics simulation and sync poses back to entities.
    /// Called automatically by the game runner after `Game::update()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.collision_events.clear();
        self.physics.step_into(&mut self.collision_events);

        // Sync Rapier body poses back to entity transforms
        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg(feature = "physics")]
mod physics_tests {
    use super::*;
    use crate::core::physics::ColliderDesc;

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.5 })
            .with_position(Vec3::new(1.0, 2.0, 3.0));

        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        assert_eq!(ctx.scene.len(), 1);
        assert!(ctx.has_body(id));
        assert_eq!(ctx.scene.position(id), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn step_physics_syncs_positions() {
        let config = GameConfig {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::from_config(&config);

        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.5 })
            .with_position(Vec3::new(0.0, 5.0, 0.0));
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        for _ in 0..10 {
            ctx.step_physics();
        }

        let y = ctx.scene.position(id).y;
        assert!(y < 5.0, "Entity should have fallen: y={}", y);
    }

    #[test]
    fn set_pose_drives_kinematic_body() {
        let mut ctx = EngineContext::from_config(&GameConfig::default());
        let id = ctx.next_id();
        let desc = BodyDesc::kinematic(ColliderDesc::Cuboid { half_extents: Vec3::ONE });
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());

        let rot = Quat::from_rotation_y(0.3);
        ctx.set_pose(id, Vec3::new(0.0, 0.0, 2.0), rot);
        ctx.step_physics();

        let entity = ctx.scene.get(id).expect("entity");
        assert!(entity.pos.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-4));
        assert!(entity.rotation.abs_diff_eq(rot, 1e-4) || entity.rotation.abs_diff_eq(-rot, 1e-4));
    }

    #[test]
    fn velocity_of_bodiless_entity_is_zero() {
        let mut ctx = EngineContext::new();
        let id = ctx.next_id();
        ctx.scene.spawn(Entity::new(id));
        ctx.apply_impulse(id, Vec3::X);
        assert_eq!(ctx.velocity(id), Vec3::ZERO);
        assert!(!ctx.has_body(id));
    }
}
