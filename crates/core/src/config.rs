use std::path::PathBuf;

use thiserror::Error;

use crate::detection::domain::face_detector::DetectionParams;
use crate::shared::constants::{
    CAMERA_INDICES_ENV_VAR, CAMERA_INDICES_TO_TRY, CASCADE_ENV_VAR, CASCADE_PATH, KEY_POLL_MS,
    WINDOW_TITLE,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("FACECAM_CAMERA_INDICES must be a positive integer, got '{0}'")]
    InvalidCameraIndices(String),
    #[error("FACECAM_CASCADE must not be empty")]
    EmptyCascadePath,
}

/// Settings for a live detection session.
#[derive(Clone, Debug, PartialEq)]
pub struct LiveConfig {
    pub cascade_path: PathBuf,
    pub camera_indices: u32,
    pub window_title: String,
    pub key_poll_ms: i32,
    pub detection: DetectionParams,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            cascade_path: PathBuf::from(CASCADE_PATH),
            camera_indices: CAMERA_INDICES_TO_TRY,
            window_title: WINDOW_TITLE.to_string(),
            key_poll_ms: KEY_POLL_MS,
            detection: DetectionParams::default(),
        }
    }
}

impl LiveConfig {
    /// Defaults overridden by `FACECAM_CASCADE` and `FACECAM_CAMERA_INDICES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = lookup(CASCADE_ENV_VAR) {
            if path.trim().is_empty() {
                return Err(ConfigError::EmptyCascadePath);
            }
            config.cascade_path = PathBuf::from(path);
        }

        if let Some(raw) = lookup(CAMERA_INDICES_ENV_VAR) {
            config.camera_indices = match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidCameraIndices(raw)),
            };
        }

        Ok(config)
    }
}
