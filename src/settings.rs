//! Simulation tuning and playfield configuration
//!
//! Loaded once before a simulation is built. Every value is validated up
//! front so nothing downstream has to re-check it per frame.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};

/// Tuning for one simulation instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Playfield ===
    /// Playfield width (obstacles spawn at this x)
    pub playfield_width: f32,
    /// Playfield height (y grows downward, 0 = top edge)
    pub playfield_height: f32,

    // === Actor ===
    /// Fixed horizontal position of the actor's left edge
    pub actor_x: f32,
    pub actor_width: f32,
    pub actor_height: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Height of each half of a pair
    pub obstacle_height: f32,
    /// Vertical size of the passable window
    pub gap_size: f32,
    /// Leftward scroll speed (pixels/s)
    pub obstacle_speed: f32,

    // === Physics ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Velocity assigned on jump (negative = upward)
    pub jump_impulse: f32,
    /// Frame deltas above this are clamped
    pub max_frame_dt: f32,

    // === Spawning ===
    /// Seconds between pair spawns
    pub spawn_interval: f32,
    pub gap_margin_top: f32,
    pub gap_margin_bottom: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            actor_x: ACTOR_X,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: PLAYFIELD_HEIGHT,
            gap_size: GAP_SIZE,
            obstacle_speed: OBSTACLE_SPEED,

            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            max_frame_dt: MAX_FRAME_DT,

            spawn_interval: SPAWN_INTERVAL,
            gap_margin_top: GAP_MARGIN_TOP,
            gap_margin_bottom: GAP_MARGIN_BOTTOM,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document; omitted fields keep their defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON (for hosts that keep a tuning file around)
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Lowest allowed y for the top edge of a gap
    pub fn min_gap_top(&self) -> f32 {
        self.gap_margin_top
    }

    /// Highest allowed y for the top edge of a gap
    pub fn max_gap_top(&self) -> f32 {
        self.playfield_height - self.gap_size - self.gap_margin_bottom
    }

    /// Vertical position that centres the actor in the playfield
    pub fn actor_start_y(&self) -> f32 {
        self.playfield_height / 2.0 - self.actor_height / 2.0
    }

    /// Reject any configuration the simulation can't run with
    pub fn validate(&self) -> ConfigResult<()> {
        let positives = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("actor_width", self.actor_width),
            ("actor_height", self.actor_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("gap_size", self.gap_size),
            ("obstacle_speed", self.obstacle_speed),
            ("gravity", self.gravity),
            ("max_frame_dt", self.max_frame_dt),
            ("spawn_interval", self.spawn_interval),
        ];
        for (field, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("gap_margin_top", self.gap_margin_top),
            ("gap_margin_bottom", self.gap_margin_bottom),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidMargin { field, value });
            }
        }

        if self.gap_margin_top + self.gap_size + self.gap_margin_bottom > self.playfield_height {
            return Err(ConfigError::GapDoesNotFit {
                margin_top: self.gap_margin_top,
                gap: self.gap_size,
                margin_bottom: self.gap_margin_bottom,
                height: self.playfield_height,
            });
        }

        let actor_fits = self.actor_x.is_finite()
            && self.actor_x >= 0.0
            && self.actor_x + self.actor_width <= self.playfield_width
            && self.actor_height < self.playfield_height;
        if !actor_fits {
            return Err(ConfigError::ActorDoesNotFit {
                x: self.actor_x,
                width: self.actor_width,
                height: self.actor_height,
                field_width: self.playfield_width,
                field_height: self.playfield_height,
            });
        }

        if !self.jump_impulse.is_finite() || self.jump_impulse >= 0.0 {
            return Err(ConfigError::ImpulseNotUpward(self.jump_impulse));
        }

        Ok(())
    }
}
