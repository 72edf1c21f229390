//! Headless cue-golf: builds the course and plays one scripted turn,
//! logging state transitions and the shot. `RUST_LOG=debug` shows more.

use anyhow::{bail, Result};
use cue_golf::{config, game_events, CueGolf, PlayerState};
use strike_engine::{keys, GameEvent, GameRunner, InputEvent};

const FRAME_DT: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 30;

fn state(runner: &GameRunner<CueGolf>) -> Option<PlayerState> {
    runner.game().controller().map(|c| c.state())
}

/// Run frames until the controller reaches `want`. Returns frames taken.
fn run_until(runner: &mut GameRunner<CueGolf>, want: PlayerState) -> Result<u32> {
    for frame in 0..MAX_FRAMES {
        if state(runner) == Some(want) {
            return Ok(frame);
        }
        runner.tick(FRAME_DT);
        log_events(runner.events_as_floats());
    }
    bail!("controller never reached {:?} (stuck in {:?})", want, state(runner))
}

/// Read events the way a host does: `GameEvent::FLOATS` floats per event,
/// kind first.
fn log_events(buffer: &[f32]) {
    for event in buffer.chunks_exact(GameEvent::FLOATS) {
        if event[0] == game_events::GOAL_REACHED {
            log::info!("host: goal at speed {:.2}", event[1]);
        } else if event[0] == game_events::SHOT_FIRED {
            log::info!("host: shot at {:.2} (avg {:.2}, peak {:.2})", event[1], event[2], event[3]);
        }
    }
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .try_init();

    let cfg = config::load_default()?;
    let mut runner = GameRunner::new(CueGolf::new(cfg));
    runner.init();
    if state(&runner).is_none() {
        bail!("controller failed to attach; see log");
    }

    let frames = run_until(&mut runner, PlayerState::Aiming)?;
    log::info!("aiming after {} frames", frames);

    runner.push_input(InputEvent::KeyDown { key_code: keys::SPACE });
    runner.tick(FRAME_DT);

    // Pull the striker back, then push it through the ball.
    for _ in 0..4 {
        runner.push_input(InputEvent::MouseMotion { dx: 0.0, dy: -0.5 });
        runner.tick(FRAME_DT);
    }
    for _ in 0..MAX_FRAMES {
        if state(&runner) != Some(PlayerState::Shooting) {
            break;
        }
        runner.push_input(InputEvent::MouseMotion { dx: 0.0, dy: 0.75 });
        runner.tick(FRAME_DT);
        log_events(runner.events_as_floats());
    }

    let frames = run_until(&mut runner, PlayerState::Aiming)?;
    let ctx = runner.ctx();
    if let Some(controller) = runner.game().controller() {
        let ball = ctx.scene.position(controller.handles().player);
        log::info!(
            "turn over after {} frames: ball at ({:.2}, {:.2}), goals {}",
            frames,
            ball.x,
            ball.z,
            controller.goals()
        );
    }
    Ok(())
}
