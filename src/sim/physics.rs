//! Per-frame integration
//!
//! Gravity on the actor (semi-implicit Euler: velocity first, then position),
//! leftward scroll for every obstacle, and the playfield boundary check.
//! Never removes obstacles and never touches the score.

use super::state::{Collision, Edge, GameState};
use crate::settings::SimConfig;

/// Advance continuous quantities by `dt` seconds.
/// Returns a boundary collision if the actor reached the top or bottom edge.
pub fn step(state: &mut GameState, config: &SimConfig, dt: f32) -> Option<Collision> {
    let actor = &mut state.actor;
    actor.vel += config.gravity * dt;
    actor.pos.y += actor.vel * dt;

    let scroll = config.obstacle_speed * dt;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= scroll;
    }

    check_boundary(state, config)
}

/// Top edge at or above y = 0, bottom edge at or below the playfield height
pub fn check_boundary(state: &GameState, config: &SimConfig) -> Option<Collision> {
    let bounds = state.actor.bounds();
    if bounds.bottom() >= config.playfield_height {
        Some(Collision::Boundary(Edge::Bottom))
    } else if bounds.top() <= 0.0 {
        Some(Collision::Boundary(Edge::Top))
    } else {
        None
    }
}
