//! Flappy Core - simulation core for a side-scrolling gap runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `settings`: Data-driven tuning and playfield configuration
//! - `highscores`: In-process leaderboard of finished runs
//! - `error`: Configuration errors
//!
//! The core never draws anything. A host feeds it frame deltas and taps via
//! [`sim::Simulation::advance`] and renders the returned [`sim::GameState`].

pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use highscores::HighScores;
pub use settings::SimConfig;
pub use sim::{Frame, GameEvent, GamePhase, GameState, InputEvent, Simulation};

/// Game configuration constants
///
/// Tuning is expressed per second (classic 60 Hz per-frame values scaled up).
pub mod consts {
    /// Host stepping rate used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest delta a single `advance` integrates (frame-hitch clamp)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 100.0;
    pub const ACTOR_WIDTH: f32 = 40.0;
    pub const ACTOR_HEIGHT: f32 = 30.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    pub const GAP_SIZE: f32 = 150.0;
    /// Obstacles scroll left at this speed (pixels/s)
    pub const OBSTACLE_SPEED: f32 = 180.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Velocity set by a jump (negative = upward, pixels/s)
    pub const JUMP_IMPULSE: f32 = -600.0;

    /// Seconds between obstacle pair spawns
    pub const SPAWN_INTERVAL: f32 = 1.5;
    /// Keep the gap at least this far from the top/bottom edges
    pub const GAP_MARGIN_TOP: f32 = 50.0;
    pub const GAP_MARGIN_BOTTOM: f32 = 50.0;
}
