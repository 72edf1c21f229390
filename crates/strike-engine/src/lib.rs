pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod extensions;
pub mod runner;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::orientation::{horizontal, look_rotation, yaw_pitch_degrees, yaw_pitch_rotation};
pub use core::scene::Scene;
pub use core::time::{FixedTimestep, FrameClock};
pub use input::queue::{keys, InputEvent, InputQueue};
pub use runner::GameRunner;

#[cfg(feature = "physics")]
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial, CollisionPair,
};

// Extensions: decoupled optional systems
pub use extensions::{
    lerp, lerp_clamped, lerp_vec3,
    TimerState, TimerId,
    TweenState, Tween, TweenId,
};
