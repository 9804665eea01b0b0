//! Configuration errors
//!
//! Everything here is fatal at construction time. Nothing per-frame is ever
//! reported as an error; bad frame deltas are clamped instead.

use thiserror::Error;

/// Errors raised while validating a [`crate::SimConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A dimension, speed or interval that must be strictly positive wasn't.
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Gap margins must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    InvalidMargin {
        /// Which margin.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// The gap plus both margins is taller than the playfield.
    #[error(
        "gap does not fit: margin_top {margin_top} + gap {gap} + margin_bottom {margin_bottom} > height {height}"
    )]
    GapDoesNotFit {
        /// Top margin.
        margin_top: f32,
        /// Gap size.
        gap: f32,
        /// Bottom margin.
        margin_bottom: f32,
        /// Playfield height.
        height: f32,
    },

    /// The actor's starting box lies outside the playfield.
    #[error("actor {width}x{height} at x={x} does not fit a {field_width}x{field_height} playfield")]
    ActorDoesNotFit {
        /// Actor left edge.
        x: f32,
        /// Actor width.
        width: f32,
        /// Actor height.
        height: f32,
        /// Playfield width.
        field_width: f32,
        /// Playfield height.
        field_height: f32,
    },

    /// The jump impulse has to point up (negative y).
    #[error("jump impulse must be negative (upward), got {0}")]
    ImpulseNotUpward(f32),

    /// The config document could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),

    /// The config could not be written out.
    #[error("could not serialize configuration: {0}")]
    Serialize(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
