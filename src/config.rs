//=========================================================================
// Sketch Configuration
//=========================================================================
//
// Window and input settings for the winit host, read from TOML.
//
// Every field is optional in the file; missing ones keep their default.
//
// ```toml
// title = "Scenes"
// width = 1024
// height = 768
// double_click_ms = 300
// extra_events = ["beat", "reset"]
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

//=== External Dependencies ===============================================

use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::EventName;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid sketch config: {0}")]
    Parse(#[from] toml::de::Error),
}

//=== SketchConfig ========================================================

/// Settings of the sketch window and input translation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Window title.
    pub title: String,

    /// Initial inner width in logical pixels.
    pub width: u32,

    /// Initial inner height in logical pixels.
    pub height: u32,

    /// Maximum gap between two presses that still counts as a double click.
    pub double_click_ms: u64,

    /// Application event names wired in addition to the standard ones.
    pub extra_events: Vec<String>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            title: "Sketch".to_string(),
            width: 800,
            height: 600,
            double_click_ms: 400,
            extra_events: Vec::new(),
        }
    }
}

impl SketchConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file exists but cannot be read,
    /// [`ConfigError::Parse`] if it is not valid sketch TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Config file not found at {:?}, using defaults.", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        info!("Loading config from {:?}", path);
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// `extra_events` as event names. Standard names map to their
    /// standard variant.
    pub fn extra_event_names(&self) -> Vec<EventName> {
        self.extra_events.iter().map(EventName::custom).collect()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
