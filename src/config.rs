// Tunable simulation defaults and the configuration structs built from them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::Environment;

// Driver
pub const DEFAULT_FPS_TARGET: f64 = 150.0;
pub const DEFAULT_SEED: u64 = 42;

// Tank
pub const DEFAULT_AGENT_COUNT: u32 = 350;
pub const DEFAULT_BOUNDS: [f64; 3] = [12.8, 8.0, 12.8];

// Boid behavior
pub const DEFAULT_VIEWING_RANGE: f64 = 1.8;
pub const DEFAULT_TOO_CLOSE: f64 = 1.1;
pub const DEFAULT_TOO_FAR: f64 = 1.6;
pub const DEFAULT_TURN_RATE: f64 = 0.25;
pub const DEFAULT_NOISE_SCALE: f64 = 0.02;
pub const DEFAULT_SPEED: f64 = 5.0;

// Blinking
pub const DEFAULT_MAX_BRIGHTNESS: f64 = 1.0;
pub const DEFAULT_MIN_BRIGHTNESS: f64 = 0.15;
pub const DEFAULT_ACCUMULATION_RATE: f64 = 0.2;
pub const DEFAULT_EMPATHY_FACTOR: f64 = 0.5;
pub const DEFAULT_COLOR_ACCUMULATION_RATE: f64 = 5.0;
pub const DEFAULT_COLOR_EMPATHY_FACTOR: f64 = 40.0;
pub const DEFAULT_COLOR_SATURATION: f64 = 30.0;

// Oscillator thresholds
pub const EXCITEMENT_THRESHOLD: f64 = 1.0;
pub const PHASE_THRESHOLD: f64 = 360.0;

// Files
pub const CONFIG_SAVE_PATH: &str = "boidtank.json";

// Stats
pub const STATS_CAPACITY: usize = 600;

// Camera
pub const CAMERA_DISTANCE_MIN: f32 = 2.0;
pub const CAMERA_DISTANCE_MAX: f32 = 120.0;
pub const CAMERA_ZOOM_SPEED: f32 = 0.1;
pub const CAMERA_ORBIT_SENSITIVITY: f32 = 0.01;
pub const CAMERA_SMOOTH_SPEED: f32 = 8.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error(
        "distances must satisfy 0 <= too_close ({too_close}) <= too_far ({too_far}) <= viewing_range ({viewing_range})"
    )]
    DistanceOrder {
        too_close: f64,
        too_far: f64,
        viewing_range: f64,
    },
    #[error("min_brightness ({min}) exceeds max_brightness ({max})")]
    BrightnessOrder { min: f64, max: f64 },
    #[error("color_saturation must lie in [0, 100], got {0}")]
    SaturationRange(f64),
}

pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

pub(crate) fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<(), ConfigError> {
    check_finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

/// Decision parameters shared by every boid in a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// How far a boid sees its peers.
    pub viewing_range: f64,
    /// Below this distance to the group the boid steers away.
    pub too_close: f64,
    /// Above this distance to the group the boid steers toward it.
    pub too_far: f64,
    /// Fraction of a full turn per second of simulated time.
    pub turn_rate: f64,
    /// Length of the noise vector added to every heading.
    pub noise_scale: f64,
    pub speed: f64,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            viewing_range: DEFAULT_VIEWING_RANGE,
            too_close: DEFAULT_TOO_CLOSE,
            too_far: DEFAULT_TOO_FAR,
            turn_rate: DEFAULT_TURN_RATE,
            noise_scale: DEFAULT_NOISE_SCALE,
            speed: DEFAULT_SPEED,
        }
    }
}

impl BehaviorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("behavior.viewing_range", self.viewing_range)?;
        check_non_negative("behavior.too_close", self.too_close)?;
        check_non_negative("behavior.too_far", self.too_far)?;
        check_non_negative("behavior.turn_rate", self.turn_rate)?;
        check_non_negative("behavior.noise_scale", self.noise_scale)?;
        check_non_negative("behavior.speed", self.speed)?;
        if self.too_close > self.too_far || self.too_far > self.viewing_range {
            return Err(ConfigError::DistanceOrder {
                too_close: self.too_close,
                too_far: self.too_far,
                viewing_range: self.viewing_range,
            });
        }
        Ok(())
    }
}

/// Blink and colour coupling parameters for the extended variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorConfig {
    pub max_brightness: f64,
    pub min_brightness: f64,
    /// Excitement gained per second without any neighbor influence.
    pub accumulation_rate: f64,
    /// Excitement window and per-neighbor boost.
    pub empathy_factor: f64,
    /// Degrees of hue per second.
    pub color_accumulation_rate: f64,
    /// Degrees of hue window and per-neighbor boost.
    pub color_empathy_factor: f64,
    /// Percent.
    pub color_saturation: f64,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            max_brightness: DEFAULT_MAX_BRIGHTNESS,
            min_brightness: DEFAULT_MIN_BRIGHTNESS,
            accumulation_rate: DEFAULT_ACCUMULATION_RATE,
            empathy_factor: DEFAULT_EMPATHY_FACTOR,
            color_accumulation_rate: DEFAULT_COLOR_ACCUMULATION_RATE,
            color_empathy_factor: DEFAULT_COLOR_EMPATHY_FACTOR,
            color_saturation: DEFAULT_COLOR_SATURATION,
        }
    }
}

impl OscillatorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit("oscillator.max_brightness", self.max_brightness)?;
        check_unit("oscillator.min_brightness", self.min_brightness)?;
        if self.min_brightness > self.max_brightness {
            return Err(ConfigError::BrightnessOrder {
                min: self.min_brightness,
                max: self.max_brightness,
            });
        }
        check_non_negative("oscillator.accumulation_rate", self.accumulation_rate)?;
        check_non_negative("oscillator.empathy_factor", self.empathy_factor)?;
        check_non_negative(
            "oscillator.color_accumulation_rate",
            self.color_accumulation_rate,
        )?;
        check_non_negative("oscillator.color_empathy_factor", self.color_empathy_factor)?;
        check_finite("oscillator.color_saturation", self.color_saturation)?;
        if !(0.0..=100.0).contains(&self.color_saturation) {
            return Err(ConfigError::SaturationRange(self.color_saturation));
        }
        Ok(())
    }
}

/// Everything needed to build a run. Missing JSON fields take their defaults;
/// `"oscillator": null` selects plain (non-blinking) boids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub environment: Environment,
    pub behavior: BehaviorConfig,
    pub oscillator: Option<OscillatorConfig>,
    /// Wall-clock ticks per second requested from the driver.
    pub fps_target: f64,
    pub seed: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            behavior: BehaviorConfig::default(),
            oscillator: Some(OscillatorConfig::default()),
            fps_target: DEFAULT_FPS_TARGET,
            seed: DEFAULT_SEED,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.environment.validate()?;
        self.behavior.validate()?;
        if let Some(osc) = &self.oscillator {
            osc.validate()?;
        }
        check_positive("fps_target", self.fps_target)?;
        Ok(())
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
