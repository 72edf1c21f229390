use glam::{Quat, Vec3};
use rapier3d::prelude::*;
use std::sync::Mutex;

use crate::api::types::EntityId;

// ---------------------------------------------------------------------------
// Conversion helpers (private): glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec3_to_na(v: Vec3) -> nalgebra::Vector3<f32> {
    nalgebra::Vector3::new(v.x, v.y, v.z)
}

fn na_to_vec3(v: &nalgebra::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn quat_to_na(q: Quat) -> nalgebra::UnitQuaternion<f32> {
    nalgebra::UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(q.w, q.x, q.y, q.z))
}

fn pose_to_na(pos: Vec3, rot: Quat) -> nalgebra::Isometry3<f32> {
    nalgebra::Isometry3::from_parts(nalgebra::Translation3::new(pos.x, pos.y, pos.z), quat_to_na(rot))
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry3<f32>) -> (Vec3, Quat) {
    let t = &iso.translation.vector;
    let q = iso.rotation.quaternion();
    (Vec3::new(t.x, t.y, t.z), Quat::from_xyzw(q.i, q.j, q.k, q.w))
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
    KinematicPositionBased,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
            BodyType::KinematicPositionBased => RigidBodyType::KinematicPositionBased,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_extents: Vec3 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec3,
    pub rotation: Quat,
    pub ccd: bool,
    /// Sensors report intersections but never push other bodies.
    pub sensor: bool,
    pub collider: ColliderDesc,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDesc {
    fn with_type(body_type: BodyType, collider: ColliderDesc) -> Self {
        Self {
            body_type,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            ccd: false,
            sensor: false,
            collider,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self::with_type(BodyType::Dynamic, collider)
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self::with_type(BodyType::Fixed, collider)
    }

    /// Create a body moved by setting its next pose each step.
    pub fn kinematic(collider: ColliderDesc) -> Self {
        Self::with_type(BodyType::KinematicPositionBased, collider)
    }

    pub fn with_position(mut self, pos: Vec3) -> Self {
        self.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Turn the collider into a trigger volume.
    pub fn as_sensor(mut self) -> Self {
        self.sensor = true;
        self
    }

    /// Set the linear damping (velocity decay). Higher values slow the body faster.
    /// Stands in for rolling friction on a flat, gravity-free course.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set the angular damping (rotation decay). Higher values slow rotation faster.
    pub fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A collision or sensor-intersection event between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub entity_a: EntityId,
    pub entity_b: EntityId,
    /// `true` when the contact just started, `false` when it ended.
    pub started: bool,
    /// Whether one of the colliders is a sensor.
    pub sensor: bool,
}

impl CollisionPair {
    /// If `id` takes part in this pair, the other entity.
    pub fn other(&self, id: EntityId) -> Option<EntityId> {
        if self.entity_a == id {
            Some(self.entity_b)
        } else if self.entity_b == id {
            Some(self.entity_a)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Event collector (no crossbeam channel needed)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        match self.collisions.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let Ok(mut events) = self.collisions.lock() {
            events.push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
        // Contact force events are not enabled on any collider.
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier3D boilerplate into a single struct.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector3<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector (Y up, so
    /// Earth-like gravity is `Vec3::new(0.0, -9.81, 0.0)`).
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity: vec3_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    /// The EntityId is stored in the body's `user_data` for collision lookups.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .position(pose_to_na(desc.position, desc.rotation))
            .ccd_enabled(desc.ccd)
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .user_data(entity_id.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .sensor(desc.sensor)
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Step the simulation and collect collision events into the provided Vec.
    pub fn step_into(&mut self, collision_events: &mut Vec<CollisionPair>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        // Resolve collider handles → body handles → entity IDs
        for event in self.event_collector.drain_collisions() {
            let started = event.started();
            let sensor = event.sensor();
            let entity_a = self.collider_to_entity(event.collider1());
            let entity_b = self.collider_to_entity(event.collider2());

            if let (Some(a), Some(b)) = (entity_a, entity_b) {
                collision_events.push(CollisionPair {
                    entity_a: a,
                    entity_b: b,
                    started,
                    sensor,
                });
            }
        }
    }

    /// Apply an instantaneous impulse to a body.
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec3_to_na(impulse), true);
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec3) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec3_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec3 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec3(rb.linvel()))
            .unwrap_or(Vec3::ZERO)
    }

    /// Move a body to a pose. Kinematic bodies get it as their next target so
    /// contacts stay continuous; other bodies are teleported and woken.
    pub fn set_pose(&mut self, body: &PhysicsBody, pos: Vec3, rotation: Quat) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            if rb.is_kinematic() {
                rb.set_next_kinematic_position(pose_to_na(pos, rotation));
            } else {
                rb.set_position(pose_to_na(pos, rotation), true);
            }
        }
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec3, Quat) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec3::ZERO, Quat::IDENTITY))
    }

    // -- private helpers --

    fn collider_to_entity(&self, collider_handle: ColliderHandle) -> Option<EntityId> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        Some(EntityId(body.user_data as u32))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn ball(world: &mut PhysicsWorld, id: u32, pos: Vec3) -> PhysicsBody {
        world.create_body(
            EntityId(id),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.5 }).with_position(pos),
            ColliderMaterial::default(),
        )
    }

    fn run(world: &mut PhysicsWorld, steps: u32) -> Vec<CollisionPair> {
        let mut events = Vec::new();
        for _ in 0..steps {
            world.step_into(&mut events);
        }
        events
    }

    #[test]
    fn gravity_pulls_down() {
        let mut world = PhysicsWorld::new(Vec3::new(0.0, -9.81, 0.0));
        world.set_dt(DT);
        let body = ball(&mut world, 1, Vec3::new(0.0, 10.0, 0.0));

        run(&mut world, 10);
        let (pos, _) = world.body_position(&body);
        assert!(pos.y < 10.0, "Body should fall: y={}", pos.y);
    }

    #[test]
    fn impulse_changes_velocity() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        world.set_dt(DT);
        let body = ball(&mut world, 1, Vec3::ZERO);

        assert_eq!(world.velocity(&body), Vec3::ZERO);
        world.apply_impulse(&body, Vec3::new(0.0, 0.0, 5.0));

        run(&mut world, 1);
        let vel = world.velocity(&body);
        assert!(vel.z > 0.0, "Velocity should be positive Z: {:?}", vel);
        assert!(vel.x.abs() < 1e-4 && vel.y.abs() < 1e-4);
    }

    #[test]
    fn damping_brings_body_to_rest() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        world.set_dt(DT);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.5 }).with_linear_damping(2.0),
            ColliderMaterial::default(),
        );
        world.set_velocity(&body, Vec3::new(3.0, 0.0, 0.0));

        run(&mut world, 600);
        assert!(world.velocity(&body).length() < 0.01);
    }

    #[test]
    fn set_velocity_directly() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let body = ball(&mut world, 1, Vec3::ZERO);

        world.set_velocity(&body, Vec3::new(5.0, 0.0, -3.0));
        let vel = world.velocity(&body);
        assert!((vel.x - 5.0).abs() < 0.001);
        assert!((vel.z + 3.0).abs() < 0.001);
    }

    #[test]
    fn body_position_and_rotation() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let rot = Quat::from_rotation_y(1.2);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::fixed(ColliderDesc::Cuboid { half_extents: Vec3::ONE })
                .with_position(Vec3::new(1.0, 2.0, 3.0))
                .with_rotation(rot),
            ColliderMaterial::default(),
        );

        let (pos, got) = world.body_position(&body);
        assert!(pos.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
        assert!(got.abs_diff_eq(rot, 1e-5) || got.abs_diff_eq(-rot, 1e-5));
    }

    #[test]
    fn kinematic_body_follows_target_pose() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        world.set_dt(DT);
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::kinematic(ColliderDesc::Cuboid { half_extents: Vec3::new(2.0, 0.5, 0.2) }),
            ColliderMaterial::default(),
        );
        let target = Quat::from_rotation_y(0.5);
        world.set_pose(&body, Vec3::ZERO, target);

        run(&mut world, 1);
        let (_, rot) = world.body_position(&body);
        assert!(rot.abs_diff_eq(target, 1e-4) || rot.abs_diff_eq(-target, 1e-4));
    }

    #[test]
    fn dynamic_body_is_teleported() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        let body = ball(&mut world, 1, Vec3::ZERO);

        world.set_pose(&body, Vec3::new(4.0, 0.5, -2.0), Quat::IDENTITY);
        let (pos, _) = world.body_position(&body);
        assert!(pos.abs_diff_eq(Vec3::new(4.0, 0.5, -2.0), 1e-5));
    }

    #[test]
    fn sensor_reports_intersection() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        world.set_dt(DT);

        let mover = ball(&mut world, 1, Vec3::ZERO);
        world.set_velocity(&mover, Vec3::new(0.0, 0.0, 5.0));
        world.create_body(
            EntityId(2),
            &BodyDesc::fixed(ColliderDesc::Cuboid { half_extents: Vec3::ONE })
                .with_position(Vec3::new(0.0, 0.0, 3.0))
                .as_sensor(),
            ColliderMaterial::default(),
        );

        let events = run(&mut world, 60);
        let hit = events
            .iter()
            .find(|e| e.started)
            .expect("sensor should report an intersection");
        assert!(hit.sensor);
        assert_eq!(hit.other(EntityId(1)), Some(EntityId(2)));
    }

    #[test]
    fn collision_events_between_converging_bodies() {
        let mut world = PhysicsWorld::new(Vec3::ZERO);
        world.set_dt(DT);

        let left = ball(&mut world, 1, Vec3::ZERO);
        let right = ball(&mut world, 2, Vec3::new(3.0, 0.0, 0.0));
        world.set_velocity(&left, Vec3::new(4.0, 0.0, 0.0));
        world.set_velocity(&right, Vec3::new(-4.0, 0.0, 0.0));

        let events = run(&mut world, 60);
        let first = events
            .iter()
            .find(|e| e.started)
            .expect("Should have at least one collision start event");
        assert!(!first.sensor);
        let ids = [first.entity_a, first.entity_b];
        assert!(ids.contains(&EntityId(1)));
        assert!(ids.contains(&EntityId(2)));
    }

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 0.5 })
            .with_position(Vec3::new(1.0, 2.0, 3.0))
            .with_linear_damping(1.5)
            .with_ccd(true);

        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(desc.linear_damping, 1.5);
        assert!(desc.ccd);
        assert!(!desc.sensor);

        let goal = BodyDesc::fixed(ColliderDesc::Ball { radius: 1.0 }).as_sensor();
        assert_eq!(goal.body_type, BodyType::Fixed);
        assert!(goal.sensor);
    }
}
