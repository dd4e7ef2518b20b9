//! Client configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a [`ClientConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings for one client.
///
/// Every field has a default, so a config file only needs the values it
/// changes:
///
/// ```json
/// { "server_url": "ws://game.local:8000/ws", "player_name": "alice" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// WebSocket URL of the game server.
    pub server_url: String,

    /// Name shown in the lobby. Must not contain a newline.
    pub player_name: String,

    /// Playable height / width ratio sent with the registration. `None`
    /// registers by name only.
    pub level_size_ratio: Option<f64>,

    /// Simulation frames per second.
    pub frame_rate_hz: u32,

    /// Send a progress report every this many frames while playing.
    pub progress_interval_frames: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "ws://127.0.0.1:8000/ws".to_string(),
            player_name: "player".to_string(),
            level_size_ratio: None,
            frame_rate_hz: 60,
            progress_interval_frames: 15,
        }
    }
}

impl ClientConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "loaded client config");
        Ok(config)
    }

    /// Checks the values a server would reject or the client can't use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server_url.is_empty() {
            return Err(ConfigError::Invalid("server_url is empty".into()));
        }
        if self.player_name.is_empty() || self.player_name.contains('\n') {
            return Err(ConfigError::Invalid(
                "player_name must be non-empty and on one line".into(),
            ));
        }
        if let Some(ratio) = self.level_size_ratio {
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "level_size_ratio must be positive, got {ratio}"
                )));
            }
        }
        if !(1..=240).contains(&self.frame_rate_hz) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate_hz must be 1..=240, got {}",
                self.frame_rate_hz
            )));
        }
        if self.progress_interval_frames == 0 {
            return Err(ConfigError::Invalid(
                "progress_interval_frames must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
