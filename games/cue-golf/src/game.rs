//! Cue golf - knock a ball into the goal past spinning obstacles.
//! The camera orbits the ball; a striker pushed with the mouse sets shot power.

use glam::{Quat, Vec3};
use strike_engine::{
    BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity, EntityId, Game, GameConfig,
    InputEvent, InputQueue,
};

use crate::config::CueGolfConfig;
use crate::obstacle::ObstacleRotator;
use crate::player::{PlayerController, SceneHandles, GOAL_TAG};

// Course extents (ground plane is y = 0, ball rolls toward +Z)
const COURSE_HALF_WIDTH: f32 = 15.0;
const COURSE_NEAR: f32 = -10.0;
const COURSE_FAR: f32 = 50.0;
const WALL_HALF_HEIGHT: f32 = 1.0;
const WALL_HALF_THICKNESS: f32 = 0.5;

// Ball
pub const BALL_RADIUS: f32 = 0.5;
pub const BALL_START: Vec3 = Vec3::new(0.0, BALL_RADIUS, 0.0);
const BALL_DENSITY: f32 = 1.91; // ~1 kg, so impulse reads as velocity
const LINEAR_DAMPING: f32 = 1.5; // Turf friction (higher = stops sooner)
const ANGULAR_DAMPING: f32 = 1.0;

// Goal trigger volume
pub const GOAL_POS: Vec3 = Vec3::new(0.0, BALL_RADIUS, 40.0);
const GOAL_HALF_EXTENTS: Vec3 = Vec3::new(1.5, 1.0, 1.5);

// Obstacles: spinning bars either side of the fairway
const OBSTACLES: [Vec3; 2] = [Vec3::new(-6.0, 1.0, 20.0), Vec3::new(6.0, 1.0, 28.0)];
const OBSTACLE_HALF_EXTENTS: Vec3 = Vec3::new(4.0, 1.0, 0.5);

const CAMERA_START: Vec3 = Vec3::new(0.0, 12.0, -30.0);

/// Custom event kinds from the host
pub mod events {
    /// Put the ball back on the tee and restart the turn.
    pub const RESET: u32 = 1;
}

pub struct CueGolf {
    config: CueGolfConfig,
    controller: Option<PlayerController>,
    obstacles: Vec<ObstacleRotator>,
}

impl CueGolf {
    pub fn new(config: CueGolfConfig) -> Self {
        Self {
            config,
            controller: None,
            obstacles: Vec::with_capacity(OBSTACLES.len()),
        }
    }

    pub fn controller(&self) -> Option<&PlayerController> {
        self.controller.as_ref()
    }

    pub fn obstacles(&self) -> &[ObstacleRotator] {
        &self.obstacles
    }

    /// Fence in the fairway
    fn build_walls(ctx: &mut EngineContext) {
        let wall_material = ColliderMaterial {
            restitution: 0.8,
            friction: 0.2,
            density: 1.0,
        };

        let mid_z = (COURSE_NEAR + COURSE_FAR) / 2.0;
        let half_length = (COURSE_FAR - COURSE_NEAR) / 2.0;
        let walls = [
            // Left and right rails
            (Vec3::new(-COURSE_HALF_WIDTH, WALL_HALF_HEIGHT, mid_z), Vec3::new(WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, half_length)),
            (Vec3::new(COURSE_HALF_WIDTH, WALL_HALF_HEIGHT, mid_z), Vec3::new(WALL_HALF_THICKNESS, WALL_HALF_HEIGHT, half_length)),
            // Back and far ends
            (Vec3::new(0.0, WALL_HALF_HEIGHT, COURSE_NEAR), Vec3::new(COURSE_HALF_WIDTH, WALL_HALF_HEIGHT, WALL_HALF_THICKNESS)),
            (Vec3::new(0.0, WALL_HALF_HEIGHT, COURSE_FAR), Vec3::new(COURSE_HALF_WIDTH, WALL_HALF_HEIGHT, WALL_HALF_THICKNESS)),
        ];

        for (pos, half_extents) in walls {
            let id = ctx.next_id();
            let desc = BodyDesc::fixed(ColliderDesc::Cuboid { half_extents }).with_position(pos);
            ctx.spawn_with_body(Entity::new(id).with_tag("wall"), desc, wall_material);
        }
    }

    fn spawn_ball(ctx: &mut EngineContext) -> EntityId {
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: BALL_RADIUS })
            .with_position(BALL_START)
            .with_linear_damping(LINEAR_DAMPING)
            .with_angular_damping(ANGULAR_DAMPING)
            .with_ccd(true);
        let material = ColliderMaterial {
            restitution: 0.6,
            friction: 0.3,
            density: BALL_DENSITY,
        };
        ctx.spawn_with_body(Entity::new(id).with_tag("player"), desc, material)
    }

    fn spawn_goal(ctx: &mut EngineContext) {
        let id = ctx.next_id();
        let desc = BodyDesc::fixed(ColliderDesc::Cuboid { half_extents: GOAL_HALF_EXTENTS })
            .with_position(GOAL_POS)
            .as_sensor();
        ctx.spawn_with_body(Entity::new(id).with_tag(GOAL_TAG), desc, ColliderMaterial::default());
    }

    fn spawn_obstacles(&mut self, ctx: &mut EngineContext) {
        for pos in OBSTACLES {
            let id = ctx.next_id();
            let desc = BodyDesc::kinematic(ColliderDesc::Cuboid { half_extents: OBSTACLE_HALF_EXTENTS })
                .with_position(pos);
            ctx.spawn_with_body(Entity::new(id).with_tag("obstacle"), desc, ColliderMaterial::default());

            match ObstacleRotator::new(id, &self.config.obstacle, ctx) {
                Ok(rotator) => self.obstacles.push(rotator),
                Err(err) => log::error!("obstacle not animated: {}", err),
            }
        }
    }

    /// Put the ball back on the tee and replay the post-shot wait.
    fn reset(&mut self, ctx: &mut EngineContext) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let ball = controller.handles().player;
        ctx.set_pose(ball, BALL_START, Quat::IDENTITY);
        ctx.set_velocity(ball, Vec3::ZERO);
        controller.begin_waiting(ctx);
        log::info!("Ball reset");
    }
}

impl Game for CueGolf {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / 60.0,
            gravity: Vec3::ZERO, // Ball rolls on a plane, damping stands in for turf
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        Self::build_walls(ctx);
        let player = Self::spawn_ball(ctx);
        Self::spawn_goal(ctx);
        self.spawn_obstacles(ctx);

        let camera = ctx.next_id();
        ctx.scene.spawn(Entity::new(camera).with_tag("camera").with_pos(CAMERA_START));

        let striker = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(striker)
                .with_tag("striker")
                .with_scale(Vec3::new(0.2, 0.2, 1.5))
                .with_active(false),
        );

        let handles = SceneHandles { player, camera, striker };
        match PlayerController::new(handles, self.config.controller.clone(), ctx) {
            Ok(controller) => self.controller = Some(controller),
            Err(err) => log::error!("player controller not attached: {}", err),
        }
        log::info!("Course built ({} entities)", ctx.scene.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            if let InputEvent::Custom { kind, .. } = event {
                if *kind == events::RESET {
                    self.reset(ctx);
                }
            }
        }

        if let Some(controller) = self.controller.as_mut() {
            controller.update(ctx, input);
        }

        for obstacle in &mut self.obstacles {
            obstacle.update(ctx);
        }
    }
}
