// src/config/validate.rs

use crate::config::model::{RawSettings, Settings};
use crate::errors::{ApkBenchError, Result};

impl TryFrom<RawSettings> for Settings {
    type Error = ApkBenchError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_raw_settings(&raw)?;
        Ok(Settings::new_unchecked(raw.tools, raw.signing))
    }
}

fn validate_raw_settings(raw: &RawSettings) -> Result<()> {
    validate_tool_paths(raw)?;
    validate_signing(raw)?;
    Ok(())
}

fn validate_tool_paths(raw: &RawSettings) -> Result<()> {
    let tools = &raw.tools;
    let entries = [
        ("java", &tools.java),
        ("apktool", &tools.apktool),
        ("apk_editor", &tools.apk_editor),
        ("apksigner", &tools.apksigner),
        ("keytool", &tools.keytool),
        ("zipalign", &tools.zipalign),
        ("adb", &tools.adb),
    ];

    for (key, value) in entries {
        if value.trim().is_empty() {
            return Err(ApkBenchError::Settings(format!(
                "[tools].{key} must not be blank (remove the key to use the default)"
            )));
        }
    }

    Ok(())
}

fn validate_signing(raw: &RawSettings) -> Result<()> {
    if let Some(dir) = &raw.signing.keystore_dir {
        if dir.as_os_str().is_empty() {
            return Err(ApkBenchError::Settings(
                "[signing].keystore_dir must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}
