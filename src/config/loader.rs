// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV_VAR: &str = "APKBENCH_SETTINGS";

/// Load a settings file from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: RawSettings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Load a settings file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let raw = load_from_path(&path)?;
    let settings = Settings::try_from(raw)?;
    info!(path = ?path.as_ref(), "settings loaded");
    Ok(settings)
}

/// Resolve and load the settings the binary should use.
///
/// - An explicit path (from `--settings`) must exist.
/// - Otherwise `APKBENCH_SETTINGS`, if set, must exist.
/// - Otherwise [`default_settings_path`] is used if present, and built-in
///   defaults if not.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_and_validate(path);
    }

    if let Some(path) = std::env::var_os(SETTINGS_ENV_VAR) {
        return load_and_validate(PathBuf::from(path));
    }

    let default_path = default_settings_path();
    if default_path.is_file() {
        load_and_validate(&default_path)
    } else {
        debug!(path = ?default_path, "no settings file; using defaults");
        Ok(Settings::default())
    }
}

/// `apkbench.toml` in the current working directory.
pub fn default_settings_path() -> PathBuf {
    PathBuf::from("apkbench.toml")
}
