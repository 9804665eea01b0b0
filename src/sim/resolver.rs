//! Scoring, obstacle collision and retirement
//!
//! Runs once per frame after physics. Scoring is keyed off the upper half of
//! each pair so one pass through a gap scores exactly one point.

use log::debug;

use super::geometry::vertically_clears;
use super::state::{Collision, GameEvent, GameState, ObstacleRole};
use crate::settings::SimConfig;

/// Outcome of one resolver pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Points gained this pass
    pub scored: u32,
    /// First obstacle the actor hit, if any
    pub collision: Option<Collision>,
    /// Obstacles removed for leaving the playfield
    pub retired: usize,
}

/// Score passed pairs, detect hits, drop off-screen obstacles.
/// `Scored` events are appended to `events` in the order they occur.
pub fn resolve(state: &mut GameState, config: &SimConfig, events: &mut Vec<GameEvent>) -> Resolution {
    let mut resolution = Resolution::default();
    let actor = state.actor.bounds();

    #[cfg(debug_assertions)]
    for (upper, lower) in state.pairs() {
        debug_assert!(
            upper.role == ObstacleRole::Upper
                && lower.role == ObstacleRole::Lower
                && upper.pair_id == lower.pair_id,
            "obstacle pair {} out of order",
            upper.pair_id
        );
        debug_assert!(
            lower.pos.x == upper.pos.x
                && lower.pos.y == upper.pos.y + upper.size.y + config.gap_size,
            "obstacle pair {} lost its gap",
            upper.pair_id
        );
    }

    for obstacle in &mut state.obstacles {
        // Trailing edge fully behind the actor's leading edge
        if !obstacle.scored && obstacle.right() < actor.left() {
            obstacle.scored = true;
            if obstacle.role == ObstacleRole::Upper {
                state.score += 1;
                state.high_score = state.high_score.max(state.score);
                resolution.scored += 1;
                events.push(GameEvent::Scored { score: state.score });
            }
        }

        if resolution.collision.is_none() && obstacle.bounds().intersects(&actor) {
            let (gap_top, gap_bottom) = obstacle.gap(config.gap_size);
            if !vertically_clears(&actor, gap_top, gap_bottom) {
                resolution.collision = Some(Collision::Obstacle { id: obstacle.id });
            }
        }
    }

    let before = state.obstacles.len();
    state.obstacles.retain(|o| o.right() >= 0.0);
    resolution.retired = before - state.obstacles.len();
    if resolution.retired > 0 {
        debug!("Retired {} off-screen obstacles", resolution.retired);
    }

    resolution
}
