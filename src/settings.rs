//! Game settings and preferences
//!
//! Read from a JSON file next to the executable's working directory. Only
//! presentation and persistence options live here; physics is fixed in
//! `consts`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where the high score is kept
    pub high_score_file: PathBuf,
    /// Ring the terminal bell on game events
    pub sound: bool,
    /// Fixed RNG seed for reproducible runs (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_file: PathBuf::from("hscore.txt"),
            sound: true,
            seed: None,
        }
    }
}

impl Settings {
    /// Settings file looked up by the binary
    pub const DEFAULT_PATH: &'static str = "cactus_jump.json";

    /// Load settings, falling back to defaults when the file is missing or
    /// invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(json) = fs::read_to_string(path) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
