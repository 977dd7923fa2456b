//! `timerstat.toml` config loading.

use serde::{Deserialize, Serialize};

use std::path::Path;

use crate::{StatsError, StatsResult};

/// Nanoseconds available to one frame at 30 fps; full bar width.
pub const DEFAULT_MAX_VALUE: f64 = 1e9 / 30.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(default)]
    pub aggregation: AggregationSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub color: ColorSettings,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct AggregationSettings {
    /// Timers whose raw and smoothed values are all at or below this are retired.
    #[serde(default = "default_min_time")]
    pub min_time: f64,

    /// Smoothing constant of the moving average; closer to 1 reacts slower.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct DisplaySettings {
    /// Duration drawn as a full-width bar.
    #[serde(default = "default_max_value")]
    pub max_value: f64,

    /// Number of ranked timers drawn.
    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default = "default_width_px")]
    pub width_px: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ColorSettings {
    #[serde(default = "default_lightness")]
    pub lightness: f64,

    #[serde(default = "default_saturation")]
    pub saturation: f64,
}

fn default_min_time() -> f64 {
    1000.0
}

fn default_alpha() -> f64 {
    0.95
}

fn default_max_value() -> f64 {
    DEFAULT_MAX_VALUE
}

fn default_limit() -> usize {
    10
}

fn default_width_px() -> u32 {
    400
}

fn default_lightness() -> f64 {
    0.5
}

fn default_saturation() -> f64 {
    0.3
}

impl Default for AggregationSettings {
    fn default() -> Self {
        Self {
            min_time: default_min_time(),
            alpha: default_alpha(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_value: default_max_value(),
            limit: default_limit(),
            width_px: default_width_px(),
        }
    }
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            lightness: default_lightness(),
            saturation: default_saturation(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> StatsResult<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg = toml::from_str::<Config>(&s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_optional(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(StatsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(err) => {
                tracing::warn!("failed to load config {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> StatsResult<()> {
        let agg = &self.aggregation;
        if !(0.0..1.0).contains(&agg.alpha) {
            return Err(StatsError::Config(format!(
                "aggregation.alpha must be in [0, 1), got {}",
                agg.alpha
            )));
        }
        if !agg.min_time.is_finite() || agg.min_time < 0.0 {
            return Err(StatsError::Config(format!(
                "aggregation.min_time must be a non-negative number, got {}",
                agg.min_time
            )));
        }
        if !self.display.max_value.is_finite() || self.display.max_value <= 0.0 {
            return Err(StatsError::Config(format!(
                "display.max_value must be positive, got {}",
                self.display.max_value
            )));
        }
        for (key, value) in [
            ("color.lightness", self.color.lightness),
            ("color.saturation", self.color.saturation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(StatsError::Config(format!("{key} must be in [0, 1], got {value}")));
            }
        }
        Ok(())
    }
}
