pub mod config;
pub mod error;
pub mod game;
pub mod obstacle;
pub mod orbit;
pub mod player;
pub mod stroke;

pub use config::{ControllerConfig, CueGolfConfig, ObstacleConfig};
pub use error::ControllerError;
pub use game::CueGolf;
pub use obstacle::ObstacleRotator;
pub use orbit::OrbitCamera;
pub use player::{game_events, PlayerController, PlayerState, SceneHandles};
pub use stroke::{ShotVelocity, StrokeEvent, StrokeTracker};
