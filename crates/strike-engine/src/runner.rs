use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::types::GameEvent;
use crate::core::time::FixedTimestep;
use crate::input::queue::{InputEvent, InputQueue};

/// Generic game runner that wires up the engine loop.
///
/// The host pushes input as it arrives and calls `tick` once per frame with
/// the wall-clock frame time. Game logic runs at the fixed timestep from
/// `GameConfig`; physics steps right after each update.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    empty_input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            empty_input: InputQueue::new(),
            timestep,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.ctx = EngineContext::from_config(&self.config);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        log::debug!("game initialized (fixed_dt={})", self.config.fixed_dt);
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick. Returns the number of fixed steps taken.
    ///
    /// Input pushed since the previous frame is delivered to the first fixed
    /// step only, so mouse deltas are never counted twice.
    pub fn tick(&mut self, frame_dt: f32) -> u32 {
        if !self.initialized {
            return 0;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Fixed timestep accumulation
        let steps = self.timestep.accumulate(frame_dt);
        for i in 0..steps {
            let input = if i == 0 { &self.input } else { &self.empty_input };
            Self::run_step(&mut self.game, &mut self.ctx, input, self.timestep.dt());
        }

        // Input waits for the next frame if no step ran.
        if steps > 0 {
            self.input.drain();
        }
        steps
    }

    /// Run exactly one fixed step, bypassing the accumulator.
    pub fn step(&mut self) {
        if !self.initialized {
            return;
        }
        self.ctx.clear_frame_data();
        Self::run_step(&mut self.game, &mut self.ctx, &self.input, self.timestep.dt());
        self.input.drain();
    }

    fn run_step(game: &mut G, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        ctx.begin_step(dt);
        game.update(ctx, input);
        #[cfg(feature = "physics")]
        ctx.step_physics();
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut EngineContext {
        &mut self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Game events emitted during the most recent frame.
    pub fn events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    /// Game events as a flat float buffer (`GameEvent::FLOATS` per event).
    pub fn events_as_floats(&self) -> &[f32] {
        GameEvent::as_floats(&self.ctx.events)
    }
}
