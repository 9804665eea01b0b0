//! Timer-driven obstacle pair generation
//!
//! The spawn timer is an accumulator: each spawn subtracts one interval, so
//! overshoot from uneven frame deltas carries into the next cycle.

use glam::Vec2;
use log::debug;
use rand::Rng;

use super::state::{GameState, Obstacle, ObstacleRole};
use crate::error::ConfigResult;
use crate::settings::SimConfig;

/// Tolerance (seconds) when comparing the timer to the interval. Deltas that
/// sum to the interval in decimal land a hair short once rounded to f32.
const TIMER_SLACK: f64 = 1e-6;

/// Generates obstacle pairs at the right edge of the playfield
#[derive(Debug, Clone)]
pub struct Spawner {
    interval: f32,
    spawn_x: f32,
    width: f32,
    height: f32,
    gap_size: f32,
    min_gap_top: f32,
    max_gap_top: f32,
}

impl Spawner {
    /// Build from a config, rejecting margins/gap that don't fit the playfield
    pub fn new(config: &SimConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            interval: config.spawn_interval,
            spawn_x: config.playfield_width,
            width: config.obstacle_width,
            height: config.obstacle_height,
            gap_size: config.gap_size,
            min_gap_top: config.min_gap_top(),
            max_gap_top: config.max_gap_top(),
        })
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Advance the spawn timer by `dt` and append every pair that came due.
    /// Returns how many pairs were spawned.
    pub fn update<R: Rng>(&self, state: &mut GameState, dt: f32, rng: &mut R) -> u32 {
        state.spawn_timer.accumulated += f64::from(dt);
        let interval = f64::from(self.interval);

        let mut spawned = 0;
        while state.spawn_timer.accumulated + TIMER_SLACK >= interval {
            state.spawn_timer.accumulated -= interval;
            let gap_top = rng.random_range(self.min_gap_top..=self.max_gap_top);
            self.spawn_pair(state, gap_top);
            spawned += 1;
        }
        spawned
    }

    /// Append one upper/lower pair whose gap starts at `gap_top`
    pub fn spawn_pair(&self, state: &mut GameState, gap_top: f32) {
        debug_assert!(
            (self.min_gap_top..=self.max_gap_top).contains(&gap_top),
            "gap top {gap_top} outside [{}, {}]",
            self.min_gap_top,
            self.max_gap_top
        );

        let pair_id = state.next_entity_id();
        let upper = Obstacle {
            id: state.next_entity_id(),
            pair_id,
            role: ObstacleRole::Upper,
            pos: Vec2::new(self.spawn_x, gap_top - self.height),
            size: Vec2::new(self.width, self.height),
            scored: false,
        };
        let lower = Obstacle {
            id: state.next_entity_id(),
            pair_id,
            role: ObstacleRole::Lower,
            pos: Vec2::new(self.spawn_x, upper.pos.y + self.height + self.gap_size),
            size: Vec2::new(self.width, self.height),
            scored: false,
        };

        debug!(
            "Spawned pair {} at x={} gap=[{}, {}]",
            pair_id,
            self.spawn_x,
            gap_top,
            gap_top + self.gap_size
        );

        state.obstacles.push(upper);
        state.obstacles.push(lower);
        state.pairs_spawned += 1;
    }
}
