// src/settings.rs
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_THEME: &str = "light";

/// Presentation preferences, persisted separately from the record data as a
/// small `{"theme": <name>}` JSON file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Per-user location of the settings file, when the platform has one.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "CredmanRS", "CredmanRS")
        .map(|proj_dirs| proj_dirs.config_dir().join("settings.json"))
}

/// Loads settings from `path`. A missing, unreadable or malformed file falls
/// back to the defaults; loading never fails and never writes.
pub fn load(path: &Path) -> Settings {
    if !path.exists() {
        info!("Settings file {:?} not found. Using default settings.", path);
        return Settings::default();
    }
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(settings) => {
                info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                warn!(
                    "Failed to parse settings file {:?}: {}. Using default settings.",
                    path, e
                );
                Settings::default()
            }
        },
        Err(e) => {
            warn!(
                "Failed to read settings file {:?}: {}. Using default settings.",
                path, e
            );
            Settings::default()
        }
    }
}

/// Writes `settings` to `path` as indented JSON, creating parent directories
/// as needed.
pub fn save(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)
                .map_err(|e| format!("Failed to create settings directory {:?}: {}", parent_dir, e))?;
            info!("Created settings directory: {:?}", parent_dir);
        }
    }

    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;
    fs::write(path, json)
        .map_err(|e| format!("Failed to write settings file {:?}: {}", path, e))?;
    info!("Saved settings to {:?}", path);
    Ok(())
}
