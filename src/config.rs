//! Optional YAML overrides for the scene parameters

use crate::scene::SceneParameters;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

/// Load scene parameters from a YAML file
///
/// Keys that are absent keep their default values.
pub fn load_params<P: AsRef<Path>>(path: P) -> Result<SceneParameters, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let params: SceneParameters = serde_yaml::from_str(&content)?;
    params.validate()?;

    Ok(params)
}

impl SceneParameters {
    /// Load from a YAML file, see [`load_params`]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_params(path)
    }

    /// Reject values the marcher or the frame loop cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("major_radius", self.major_radius),
            ("thickness", self.thickness),
            ("normal_epsilon", self.normal_epsilon),
            ("hit_threshold", self.hit_threshold),
            ("frame_rate", self.frame_rate),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        // A tiny frame rate gives an interval too long for Duration to hold
        if Duration::try_from_secs_f64(1.0 / self.frame_rate).is_err() {
            return Err(ConfigError::Validation(format!(
                "frame_rate {} gives a frame interval that is out of range",
                self.frame_rate
            )));
        }

        if !self.angular_speed.is_finite() {
            return Err(ConfigError::Validation(format!(
                "angular_speed must be finite, got {}",
                self.angular_speed
            )));
        }

        if self.max_steps == 0 {
            return Err(ConfigError::Validation("max_steps must be at least 1".to_string()));
        }

        Ok(())
    }
}
