//! Studio configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    DEFAULT_FLOOR_DEPTH_MM, DEFAULT_FLOOR_WIDTH_MM, DEFAULT_SCALE, DEFAULT_WALL_HEIGHT_MM, GENERATED_PRICE,
};
use crate::layout::Room;

pub const SCALE_VAR: &str = "CABINETRY_SCALE";
pub const FLOOR_WIDTH_VAR: &str = "CABINETRY_FLOOR_WIDTH";
pub const FLOOR_DEPTH_VAR: &str = "CABINETRY_FLOOR_DEPTH";
pub const WALL_HEIGHT_VAR: &str = "CABINETRY_WALL_HEIGHT";
pub const GENERATED_PRICE_VAR: &str = "CABINETRY_GENERATED_PRICE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} is out of range: {value}")]
    OutOfRange { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudioConfig {
    /// Millimeters-to-display-unit factor for projection.
    pub scale: f64,
    /// Room a new layout starts with.
    pub room: Room,
    /// Price assigned to every generated module.
    pub generated_price: f64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE, room: Room::default(), generated_price: GENERATED_PRICE }
    }
}

impl StudioConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `CABINETRY_SCALE`: default 0.15, must be > 0
    /// - `CABINETRY_FLOOR_WIDTH`: default 6000
    /// - `CABINETRY_FLOOR_DEPTH`: default 5000
    /// - `CABINETRY_WALL_HEIGHT`: default 2700
    /// - `CABINETRY_GENERATED_PRICE`: default 1500, must be >= 0
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but unparseable or out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StudioConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let positive = |v: f64| v > 0.0;
        Ok(Self {
            scale: parse_var(&lookup, SCALE_VAR, DEFAULT_SCALE, positive)?,
            room: Room {
                floor_width: parse_var(&lookup, FLOOR_WIDTH_VAR, DEFAULT_FLOOR_WIDTH_MM, positive)?,
                floor_depth: parse_var(&lookup, FLOOR_DEPTH_VAR, DEFAULT_FLOOR_DEPTH_MM, positive)?,
                wall_height: parse_var(&lookup, WALL_HEIGHT_VAR, DEFAULT_WALL_HEIGHT_MM, positive)?,
            },
            generated_price: parse_var(&lookup, GENERATED_PRICE_VAR, GENERATED_PRICE, |v| v >= 0.0)?,
        })
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: f64,
    in_range: impl Fn(f64) -> bool,
) -> Result<f64, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::NotANumber { var, value: raw.clone() })?;
    if value.is_finite() && in_range(value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange { var, value: raw })
    }
}
