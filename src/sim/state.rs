//! Game state and core simulation types
//!
//! Pure data. The state owns every counter (score, high score, ids) so any
//! number of simulations can run side by side without sharing anything.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::settings::SimConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start/tap, nothing moves
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, state frozen until reset
    GameOver,
}

/// Player input delivered alongside a frame delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Tap/click/space: jump (or start/reset outside Running)
    Tap,
}

/// Which playfield edge the actor hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Actor left the playfield vertically
    Boundary(Edge),
    /// Actor hit the obstacle with this id
    Obstacle { id: u32 },
}

/// Notifications for the presentation layer (audio, overlays)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run began (from Idle or after GameOver)
    Started,
    /// Jump impulse applied
    Jumped,
    /// Actor passed a pair; `score` is the new total
    Scored { score: u32 },
    /// Run ended
    GameOver {
        cause: Collision,
        score: u32,
        high_score: u32,
    },
}

/// The player-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (positive = downward)
    pub vel: f32,
    pub size: Vec2,
}

impl Actor {
    /// Actor centred vertically at the configured column, at rest
    pub fn new(id: u32, config: &SimConfig) -> Self {
        Self {
            id,
            pos: Vec2::new(config.actor_x, config.actor_start_y()),
            vel: 0.0,
            size: Vec2::new(config.actor_width, config.actor_height),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Which half of a pair an obstacle is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleRole {
    Upper,
    Lower,
}

/// One half of an obstacle pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Shared by both halves of a pair
    pub pair_id: u32,
    pub role: ObstacleRole,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Actor already passed this obstacle
    pub scored: bool,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Vertical extent `(top, bottom)` of the gap this obstacle borders
    pub fn gap(&self, gap_size: f32) -> (f32, f32) {
        let top = match self.role {
            ObstacleRole::Upper => self.pos.y + self.size.y,
            ObstacleRole::Lower => self.pos.y - gap_size,
        };
        (top, top + gap_size)
    }
}

/// Elapsed-time accumulator governing pair spawns
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    /// Seconds since the last spawn (overshoot carried forward). Summed in
    /// f64 so long runs of f32 frame deltas don't drift.
    pub accumulated: f64,
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    pub actor: Actor,
    /// Oldest (leftmost) first; pairs are stored upper then lower
    pub obstacles: Vec<Obstacle>,
    /// Pairs passed this run
    pub score: u32,
    /// Best score since this state was created
    pub high_score: u32,
    pub spawn_timer: SpawnTimer,
    /// Seconds simulated in the current run
    pub elapsed: f32,
    /// Pairs spawned in the current run
    pub pairs_spawned: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh Idle state with the actor centred and no obstacles
    pub fn new(config: &SimConfig) -> Self {
        let mut state = Self {
            phase: GamePhase::Idle,
            actor: Actor::new(0, config),
            obstacles: Vec::new(),
            score: 0,
            high_score: 0,
            spawn_timer: SpawnTimer::default(),
            elapsed: 0.0,
            pairs_spawned: 0,
            next_id: 1,
        };
        state.actor.id = state.next_entity_id();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reinitialize the run (actor, obstacles, score, timer), keeping the high score.
    /// Leaves `phase` to the caller.
    pub fn reset_run(&mut self, config: &SimConfig) {
        let id = self.next_entity_id();
        self.actor = Actor::new(id, config);
        self.obstacles.clear();
        self.score = 0;
        self.spawn_timer = SpawnTimer::default();
        self.elapsed = 0.0;
        self.pairs_spawned = 0;
    }

    /// Raise the high score to the current score if it's higher
    pub fn record_high_score(&mut self) {
        self.high_score = self.high_score.max(self.score);
    }

    /// Iterate obstacle pairs as `(upper, lower)`
    pub fn pairs(&self) -> impl Iterator<Item = (&Obstacle, &Obstacle)> {
        self.obstacles
            .chunks_exact(2)
            .map(|pair| (&pair[0], &pair[1]))
    }
}
