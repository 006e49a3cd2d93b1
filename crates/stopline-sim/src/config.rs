//! JSON loading for run configuration and braking requests.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use stopline_core::types::BrakingRequest;

use crate::engine::SimConfig;

/// Errors raised while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be greater than {min:.3} (got {value:.3})")]
    MinViolation {
        field: &'static str,
        min: f64,
        value: f64,
    },
    #[error("{field} must be between {min:.3} and {max:.3} (got {value:.3})")]
    RangeViolation {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

impl SimConfig {
    /// Check that every field leaves the integrator well defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_frame_dt", self.max_frame_dt)?;
        positive("safety_cap_m", self.safety_cap_m)?;
        if !(self.stop_epsilon_kmh >= 0.0 && self.stop_epsilon_kmh <= 10.0) {
            return Err(ConfigError::RangeViolation {
                field: "stop_epsilon_kmh",
                min: 0.0,
                max: 10.0,
                value: self.stop_epsilon_kmh,
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::MinViolation {
            field,
            min: 0.0,
            value,
        })
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and validate a `SimConfig`. Missing fields take their defaults.
pub fn parse_sim_config(json: &str) -> Result<SimConfig, ConfigError> {
    let config: SimConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

pub fn load_sim_config(path: impl AsRef<Path>) -> Result<SimConfig, ConfigError> {
    parse_sim_config(&read(path.as_ref())?)
}

/// Parse a `BrakingRequest`. Missing fields take the baseline and unknown
/// category keys fall back, so only malformed JSON is an error.
pub fn parse_request(json: &str) -> Result<BrakingRequest, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_request(path: impl AsRef<Path>) -> Result<BrakingRequest, ConfigError> {
    parse_request(&read(path.as_ref())?)
}
