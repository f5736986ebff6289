//! Tunable engine configuration.
//!
//! All values default to the compiled constants in [`crate::core::constants`].
//! A JSON file may override any subset of fields:
//!
//! ```json
//! { "cast_range": 450.0, "burst_chance": 0.01 }
//! ```

use crate::core::constants::*;
use crate::error::ConfigError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "angler.json";

/// Immutable tuning parameters for targeting, bite timing and the fight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishingConstants {
    /// Maximum distance from the player to a valid cast target.
    pub cast_range: f64,
    /// Player-to-bobber distance corresponding to a stress ratio of 1.0.
    pub line_break_distance: f64,
    /// Stress ratio at which the line snaps.
    pub line_break_threshold: f64,

    /// Total time to wait for a bite before giving up.
    pub bite_timer_ms: u64,
    /// Fixed interval between bite rolls.
    pub bite_check_interval_ms: u64,
    pub bite_base_chance: f64,
    pub bite_time_ramp: f64,
    pub distance_multiplier_min: f64,
    pub distance_multiplier_max: f64,
    pub distance_multiplier_exponent: f64,

    /// Fixed fight step.
    pub fight_tick_ms: u64,
    pub fish_swim_speed: f64,
    pub fish_drift_speed: f64,
    /// Drift is scaled by `1 + drift_stress_scale * stress_ratio`.
    pub drift_stress_scale: f64,
    pub zigzag_sweep_distance: f64,
    pub zigzag_arrival_radius: f64,
    pub zigzag_near_radius: f64,
    pub direction_change_interval_ms: u64,
    /// Per fight tick.
    pub burst_chance: f64,
    pub burst_distance: f64,

    pub reel_step_distance: f64,
    pub reel_path_samples: u32,
    pub reel_success_fraction: f64,

    /// Host frames longer than this are clamped before stepping.
    pub max_frame_ms: u64,
}

impl Default for FishingConstants {
    fn default() -> Self {
        Self {
            cast_range: CAST_RANGE,
            line_break_distance: LINE_BREAK_DISTANCE,
            line_break_threshold: LINE_BREAK_THRESHOLD,
            bite_timer_ms: BITE_TIMER_MS,
            bite_check_interval_ms: BITE_CHECK_INTERVAL_MS,
            bite_base_chance: BITE_BASE_CHANCE,
            bite_time_ramp: BITE_TIME_RAMP,
            distance_multiplier_min: DISTANCE_MULTIPLIER_MIN,
            distance_multiplier_max: DISTANCE_MULTIPLIER_MAX,
            distance_multiplier_exponent: DISTANCE_MULTIPLIER_EXPONENT,
            fight_tick_ms: FIGHT_TICK_MS,
            fish_swim_speed: FISH_SWIM_SPEED,
            fish_drift_speed: FISH_DRIFT_SPEED,
            drift_stress_scale: DRIFT_STRESS_SCALE,
            zigzag_sweep_distance: ZIGZAG_SWEEP_DISTANCE,
            zigzag_arrival_radius: ZIGZAG_ARRIVAL_RADIUS,
            zigzag_near_radius: ZIGZAG_NEAR_RADIUS,
            direction_change_interval_ms: DIRECTION_CHANGE_INTERVAL_MS,
            burst_chance: BURST_CHANCE,
            burst_distance: BURST_DISTANCE,
            reel_step_distance: REEL_STEP_DISTANCE,
            reel_path_samples: REEL_PATH_SAMPLES,
            reel_success_fraction: REEL_SUCCESS_FRACTION,
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

impl FishingConstants {
    /// Loads and validates constants from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parses and validates constants from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let constants: FishingConstants = serde_json::from_str(text)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Loads the config file from the platform config directory, falling
    /// back to defaults when it does not exist.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = default_config_path()?;
        if path.exists() {
            log::info!("Loading fishing constants from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every value is usable by the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("cast_range", self.cast_range)?;
        positive("line_break_distance", self.line_break_distance)?;
        positive("fish_swim_speed", self.fish_swim_speed)?;
        positive("zigzag_sweep_distance", self.zigzag_sweep_distance)?;
        positive("zigzag_arrival_radius", self.zigzag_arrival_radius)?;
        positive("burst_distance", self.burst_distance)?;
        positive("reel_step_distance", self.reel_step_distance)?;
        non_negative("fish_drift_speed", self.fish_drift_speed)?;
        non_negative("drift_stress_scale", self.drift_stress_scale)?;
        non_negative("bite_time_ramp", self.bite_time_ramp)?;
        non_negative("distance_multiplier_min", self.distance_multiplier_min)?;
        positive(
            "distance_multiplier_exponent",
            self.distance_multiplier_exponent,
        )?;

        unit_interval_open_low("line_break_threshold", self.line_break_threshold)?;
        unit_interval_open_low("reel_success_fraction", self.reel_success_fraction)?;
        probability("bite_base_chance", self.bite_base_chance)?;
        probability("burst_chance", self.burst_chance)?;

        nonzero_ms("bite_timer_ms", self.bite_timer_ms)?;
        nonzero_ms("bite_check_interval_ms", self.bite_check_interval_ms)?;
        nonzero_ms("fight_tick_ms", self.fight_tick_ms)?;
        nonzero_ms("max_frame_ms", self.max_frame_ms)?;

        if self.distance_multiplier_min > self.distance_multiplier_max {
            return Err(ConfigError::Invalid {
                field: "distance_multiplier_max",
                reason: format!(
                    "must be >= distance_multiplier_min ({})",
                    self.distance_multiplier_min
                ),
            });
        }
        if self.zigzag_near_radius < self.zigzag_arrival_radius {
            return Err(ConfigError::Invalid {
                field: "zigzag_near_radius",
                reason: format!(
                    "must be >= zigzag_arrival_radius ({})",
                    self.zigzag_arrival_radius
                ),
            });
        }
        if self.reel_path_samples == 0 {
            return Err(ConfigError::Invalid {
                field: "reel_path_samples",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Number of bite checks in a full bite timer.
    pub fn bite_checks_per_timer(&self) -> u64 {
        self.bite_timer_ms.div_ceil(self.bite_check_interval_ms)
    }
}

/// Platform path of the optional config file (`<config dir>/angler.json`).
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("", "", "angler").ok_or(ConfigError::NoConfigDir)?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must not be negative, got {value}"),
        })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be within [0, 1], got {value}"),
        })
    }
}

fn unit_interval_open_low(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be within (0, 1], got {value}"),
        })
    }
}

fn nonzero_ms(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value > 0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: "must be at least 1 ms".to_string(),
        })
    }
}
