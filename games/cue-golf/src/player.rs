//! Player/camera/striker controller.
//!
//! One turn runs `Aiming -> Shooting -> Sliding -> Waiting -> Aiming`:
//!
//! - Aiming: the mouse orbits the camera around the ball, the wheel zooms.
//!   The shoot key brings out the striker between camera and ball.
//! - Shooting: vertical mouse motion slides the striker along its axis. A
//!   forward stroke that reaches the ball fires an impulse along the camera's
//!   horizontal forward. The cancel key puts the striker away.
//! - Sliding: the striker is put away and the camera keeps watching the
//!   ball until it comes to rest.
//! - Waiting: after a pause the camera glides back to orbit distance.
//!
//! Deferred steps run as timers and a tween owned by the controller. At most
//! one such sequence is live; starting another cancels it.

use glam::{Vec2, Vec3};
use strike_engine::{
    horizontal, look_rotation, yaw_pitch_degrees, yaw_pitch_rotation, EngineContext,
    EntityId, GameEvent, InputQueue, TimerId, TimerState, Tween, TweenId, TweenState,
};

use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::orbit::OrbitCamera;
use crate::stroke::{ShotVelocity, StrokeEvent, StrokeTracker};

/// Tag marking goal trigger volumes.
pub const GOAL_TAG: &str = "goal";

/// Game event kinds for the host.
pub mod game_events {
    /// A goal was entered slowly enough. Payload `a`: ball speed.
    pub const GOAL_REACHED: f32 = 1.0;
    /// A stroke landed. Payload `a`: final, `b`: average, `c`: peak velocity.
    pub const SHOT_FIRED: f32 = 2.0;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Aiming,
    Shooting,
    Sliding,
    Waiting,
}

/// The scene entities a controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    /// The ball; must own a physics body.
    pub player: EntityId,
    pub camera: EntityId,
    pub striker: EntityId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    SettleArmed,
    ReturnCamera,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Sequence {
    Idle,
    /// Waiting for the ball to stop. Polls speed once `armed`.
    Settle { timer: TimerId, armed: bool },
    /// Pause before the camera return. `target` is the ball position at rest.
    Hold { timer: TimerId, target: Vec3 },
    /// Camera gliding toward the ball, stopping at `min_distance`.
    Return { tween: TweenId, min_distance: f32 },
}

const RETURN_DONE: u32 = 1;

pub struct PlayerController {
    handles: SceneHandles,
    config: ControllerConfig,
    state: PlayerState,
    orbit: OrbitCamera,
    stroke: StrokeTracker,
    sequence: Sequence,
    timers: TimerState<Wake>,
    tweens: TweenState,
    last_shot: Option<ShotVelocity>,
    goals: u32,
}

impl PlayerController {
    /// Attach a controller to its scene entities.
    ///
    /// Like a fresh turn, control starts in `Waiting`: the camera is aimed at
    /// the ball, the striker is hidden and the camera return runs once before
    /// the player can aim.
    pub fn new(
        handles: SceneHandles,
        config: ControllerConfig,
        ctx: &mut EngineContext,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        for (role, id) in [
            ("player", handles.player),
            ("camera", handles.camera),
            ("striker", handles.striker),
        ] {
            if !ctx.scene.contains(id) {
                return Err(ControllerError::MissingEntity { role, id });
            }
        }
        if !ctx.has_body(handles.player) {
            return Err(ControllerError::MissingBody(handles.player));
        }

        let mut controller = Self {
            handles,
            orbit: OrbitCamera::from_config(&config),
            config,
            state: PlayerState::Waiting,
            stroke: StrokeTracker::new(),
            sequence: Sequence::Idle,
            timers: TimerState::new(),
            tweens: TweenState::new(),
            last_shot: None,
            goals: 0,
        };

        controller.track_player(ctx);
        controller.begin_waiting(ctx);
        Ok(controller)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn handles(&self) -> SceneHandles {
        self.handles
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn orbit(&self) -> &OrbitCamera {
        &self.orbit
    }

    pub fn stroke(&self) -> &StrokeTracker {
        &self.stroke
    }

    /// Speeds of the most recent shot.
    pub fn last_shot(&self) -> Option<ShotVelocity> {
        self.last_shot
    }

    /// Goals reached so far.
    pub fn goals(&self) -> u32 {
        self.goals
    }

    /// Timers and tweens still scheduled.
    pub fn pending_tasks(&self) -> usize {
        self.timers.len() + self.tweens.len()
    }

    /// Horizontal distance between striker and ball.
    pub fn striker_distance(&self, ctx: &EngineContext) -> f32 {
        let delta = ctx.scene.position(self.handles.striker) - ctx.scene.position(self.handles.player);
        Vec3::new(delta.x, 0.0, delta.z).length()
    }

    /// One fixed step.
    pub fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let dt = ctx.clock.dt();

        // Timers started during this step first count down on the next one.
        self.tick_timers(ctx, dt);

        if self.state == PlayerState::Aiming {
            self.orbit_camera(ctx, input.mouse_delta(), input.scroll_delta(), dt);
        }

        if self.state == PlayerState::Aiming && input.key_pressed(self.config.shoot_key) {
            self.set_state(PlayerState::Shooting);
            self.prepare_striker(ctx);
        }

        if self.state == PlayerState::Shooting {
            let push = input.mouse_delta().y * self.config.mouse_sensitivity;
            self.cue_control(ctx, push, dt);
        }

        if self.state == PlayerState::Shooting && input.key_pressed(self.config.cancel_key) {
            self.stroke.reset();
            ctx.scene.set_active(self.handles.striker, false);
            self.set_state(PlayerState::Aiming);
        }

        if self.state == PlayerState::Sliding {
            self.track_player(ctx);
        }

        self.poll_settle(ctx);
        self.step_camera_return(ctx, dt);
        self.check_goals(ctx);
    }

    /// Start the post-shot wait from wherever the ball is now, replacing any
    /// sequence in flight. Used at startup, after the ball settles and when
    /// the host resets the ball.
    pub fn begin_waiting(&mut self, ctx: &mut EngineContext) {
        self.stroke.reset();
        ctx.scene.set_active(self.handles.striker, false);
        self.set_state(PlayerState::Waiting);
        let target = ctx.scene.position(self.handles.player);
        let timer = self.timers.start(self.config.return_delay, Wake::ReturnCamera);
        self.replace_sequence(Sequence::Hold { timer, target });
    }

    fn set_state(&mut self, next: PlayerState) {
        if self.state != next {
            log::info!("player {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn replace_sequence(&mut self, next: Sequence) {
        match self.sequence {
            Sequence::Idle => {}
            Sequence::Settle { timer, .. } | Sequence::Hold { timer, .. } => {
                if self.timers.cancel(timer) {
                    log::debug!("cancelled pending {:?}", self.sequence);
                }
            }
            Sequence::Return { tween, .. } => {
                if self.tweens.remove(tween) {
                    log::debug!("cancelled camera return");
                }
            }
        }
        self.sequence = next;
    }

    fn orbit_camera(&mut self, ctx: &mut EngineContext, mouse: Vec2, scroll: f32, dt: f32) {
        self.orbit.apply_mouse(mouse, &self.config, dt);
        self.orbit.apply_zoom(scroll, &self.config);

        let target = ctx.scene.position(self.handles.player);
        let pos = self.orbit.position(target);
        ctx.set_pose(self.handles.camera, pos, look_rotation(target - pos));
    }

    /// Put the striker between ball and camera, facing the camera's heading.
    fn prepare_striker(&mut self, ctx: &mut EngineContext) {
        let player = ctx.scene.position(self.handles.player);
        let Some(camera) = ctx.scene.get(self.handles.camera) else {
            return;
        };
        let toward_camera = horizontal(camera.pos - player);
        let (camera_yaw, _) = yaw_pitch_degrees(camera.rotation);

        let pos = player + toward_camera * self.config.striker_spawn_distance;
        ctx.set_pose(self.handles.striker, pos, yaw_pitch_rotation(camera_yaw, 0.0));
        ctx.scene.set_active(self.handles.striker, true);
    }

    fn cue_control(&mut self, ctx: &mut EngineContext, push: f32, dt: f32) {
        let player = ctx.scene.position(self.handles.player);
        let Some(striker) = ctx.scene.get(self.handles.striker) else {
            return;
        };
        let (striker_pos, striker_rot) = (striker.pos, striker.rotation);

        let axis = Vec3::new(striker_pos.x - player.x, 0.0, striker_pos.z - player.z);
        let current = axis.length();
        let axis = axis.normalize_or_zero();

        let step = self.config.striker_move_speed * push * dt;
        let distance = (current - step).clamp(self.config.striker_min_distance, self.config.striker_max_distance);
        ctx.set_pose(self.handles.striker, player + axis * distance, striker_rot);

        let now = ctx.clock.elapsed();
        match self.stroke.observe(push, now, current, self.config.velocity_threshold) {
            StrokeEvent::Started => log::debug!("stroke started at distance {:.2}", current),
            StrokeEvent::Cancelled => log::debug!("stroke cancelled"),
            StrokeEvent::Idle | StrokeEvent::Tracking => {}
        }

        if self
            .stroke
            .has_landed(current, self.config.striker_min_distance, self.config.stroke_epsilon)
        {
            let shot = self.stroke.complete(
                now,
                current,
                self.config.velocity_weight,
                self.config.max_striker_velocity,
            );
            self.fire(ctx, shot);
        }
    }

    fn fire(&mut self, ctx: &mut EngineContext, shot: ShotVelocity) {
        let camera_forward = ctx
            .scene
            .get(self.handles.camera)
            .map(|c| horizontal(c.forward()))
            .unwrap_or(Vec3::ZERO);

        log::info!(
            "shot avg {:.2}, peak {:.2}, final {:.2}",
            shot.average,
            shot.peak,
            shot.final_velocity
        );
        ctx.apply_impulse(
            self.handles.player,
            camera_forward * shot.final_velocity * self.config.impulse_force,
        );
        ctx.emit_event(GameEvent {
            kind: game_events::SHOT_FIRED,
            a: shot.final_velocity,
            b: shot.average,
            c: shot.peak,
        });
        self.last_shot = Some(shot);

        ctx.scene.set_active(self.handles.striker, false);
        self.set_state(PlayerState::Sliding);
        let timer = self.timers.start(self.config.settle_delay, Wake::SettleArmed);
        self.replace_sequence(Sequence::Settle { timer, armed: false });
    }

    /// Aim the camera at the ball and continue the orbit from there.
    fn track_player(&mut self, ctx: &mut EngineContext) {
        let target = ctx.scene.position(self.handles.player);
        if let Some(camera) = ctx.scene.get_mut(self.handles.camera) {
            camera.look_at(target);
            self.orbit.sync_from_rotation(camera.rotation, &self.config);
        }
    }

    fn tick_timers(&mut self, ctx: &mut EngineContext, dt: f32) {
        for wake in self.timers.tick(dt) {
            match (wake, self.sequence) {
                (Wake::SettleArmed, Sequence::Settle { timer, .. }) => {
                    self.sequence = Sequence::Settle { timer, armed: true };
                }
                (Wake::ReturnCamera, Sequence::Hold { target, .. }) => {
                    self.start_camera_return(ctx, target);
                }
                (wake, sequence) => log::warn!("stray {:?} during {:?}", wake, sequence),
            }
        }
    }

    fn poll_settle(&mut self, ctx: &mut EngineContext) {
        if let Sequence::Settle { armed: true, .. } = self.sequence {
            let speed = ctx.velocity(self.handles.player).length();
            if speed <= self.config.settle_speed {
                log::debug!("ball settled (speed {:.3})", speed);
                self.begin_waiting(ctx);
            }
        }
    }

    fn start_camera_return(&mut self, ctx: &mut EngineContext, target: Vec3) {
        let from = ctx.scene.position(self.handles.camera);
        let tween = self.tweens.add(
            self.handles.camera,
            Tween::position(from, target, self.config.return_duration)
                .with_on_complete(RETURN_DONE),
        );
        self.sequence = Sequence::Return { tween, min_distance: self.orbit.distance };
    }

    /// Glide the camera, keep it aimed at the ball and stop it at the orbit
    /// distance captured when the return started.
    fn step_camera_return(&mut self, ctx: &mut EngineContext, dt: f32) {
        let Sequence::Return { min_distance, .. } = self.sequence else {
            return;
        };
        self.tweens.tick(dt, &mut ctx.scene);
        let done = self.tweens.drain_completed().any(|id| id == RETURN_DONE);

        let player = ctx.scene.position(self.handles.player);
        let Some(camera) = ctx.scene.get_mut(self.handles.camera) else {
            return;
        };

        let offset = camera.pos - player;
        let reached = offset.length() < min_distance;
        if reached {
            camera.pos = player + offset.normalize_or_zero() * min_distance;
        }
        camera.look_at(player);

        if reached || done {
            self.replace_sequence(Sequence::Idle);
            self.set_state(PlayerState::Aiming);
        }
    }

    fn check_goals(&mut self, ctx: &mut EngineContext) {
        let player = self.handles.player;
        let entered: Vec<EntityId> = ctx
            .collisions()
            .iter()
            .filter(|pair| pair.started)
            .filter_map(|pair| pair.other(player))
            .filter(|other| ctx.scene.has_tag(*other, GOAL_TAG))
            .collect();

        for goal in entered {
            let speed = ctx.velocity(player).length();
            if speed <= self.config.max_goal_velocity {
                log::info!("goal {:?} reached at speed {:.2}", goal, speed);
                ctx.emit_event(GameEvent::new(game_events::GOAL_REACHED, speed));
                self.goals += 1;
            } else {
                log::debug!("goal {:?} entered too fast ({:.2})", goal, speed);
            }
        }
    }
}
