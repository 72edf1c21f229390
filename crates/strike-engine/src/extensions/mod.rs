// extensions/mod.rs
//
// Optional extension modules for StrikeEngine.
// These are decoupled from core Entity/Scene. Games opt in by creating these systems.

pub mod lerp;
pub mod timer;
pub mod tween;

pub use lerp::{lerp, lerp_clamped, lerp_vec3};
pub use timer::{TimerState, TimerId};
pub use tween::{TweenState, Tween, TweenId};
