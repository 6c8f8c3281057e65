//! CLI configuration from environment.

use std::env;
use survey_core::GridConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub grid: GridConfig,
    /// Cruise speed for duration estimates; falls back to the plan's survey speed
    pub cruise_speed_mps: Option<f64>,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = GridConfig::default();
        Self {
            grid: GridConfig {
                clip_samples: env_parse("SURVEY_CLIP_SAMPLES").unwrap_or(defaults.clip_samples),
                max_lines: env_parse("SURVEY_MAX_LINES").unwrap_or(defaults.max_lines),
                ..defaults
            },
            cruise_speed_mps: env_parse("SURVEY_CRUISE_SPEED_MPS"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}
