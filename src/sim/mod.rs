//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame delta clamped before integration
//! - Injected or seeded RNG only
//! - Stable obstacle order (oldest/leftmost first)
//! - No rendering, audio or platform dependencies

pub mod geometry;
pub mod physics;
pub mod resolver;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geometry::{Aabb, intersects, vertically_clears};
pub use resolver::Resolution;
pub use spawner::Spawner;
pub use state::{
    Actor, Collision, Edge, GameEvent, GamePhase, GameState, InputEvent, Obstacle, ObstacleRole,
    SpawnTimer,
};
pub use tick::{Frame, Simulation, clamp_dt};
