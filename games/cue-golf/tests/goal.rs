//! Goal trigger volumes only count slow enough arrivals.

use cue_golf::game::{BALL_RADIUS, GOAL_POS};
use cue_golf::{game_events, CueGolf, CueGolfConfig};
use glam::{Quat, Vec3};
use strike_engine::GameRunner;

/// Roll the ball at the goal from just in front of it and collect goal events.
fn roll_at_goal(speed: f32) -> (Vec<f32>, u32) {
    let mut runner = GameRunner::new(CueGolf::new(CueGolfConfig::default()));
    runner.init();
    let ball = runner.game().controller().unwrap().handles().player;

    let start = Vec3::new(GOAL_POS.x, BALL_RADIUS, GOAL_POS.z - 4.0);
    runner.ctx_mut().set_pose(ball, start, Quat::IDENTITY);
    runner.ctx_mut().set_velocity(ball, Vec3::new(0.0, 0.0, speed));

    let mut speeds = Vec::new();
    for _ in 0..240 {
        runner.step();
        speeds.extend(
            runner
                .events()
                .iter()
                .filter(|e| e.kind == game_events::GOAL_REACHED)
                .map(|e| e.a),
        );
    }
    let goals = runner.game().controller().unwrap().goals();
    (speeds, goals)
}

#[test]
fn slow_ball_scores() {
    let (speeds, goals) = roll_at_goal(5.0);
    assert_eq!(goals, 1);
    assert_eq!(speeds.len(), 1);
    assert!(speeds[0] > 0.0 && speeds[0] <= 10.0, "entry speed {}", speeds[0]);
}

#[test]
fn fast_ball_passes_through() {
    let (speeds, goals) = roll_at_goal(18.0);
    assert_eq!(goals, 0);
    assert!(speeds.is_empty());
}

#[test]
fn ball_short_of_goal_does_not_score() {
    let (speeds, goals) = roll_at_goal(1.0);
    assert_eq!(goals, 0);
    assert!(speeds.is_empty());
}
