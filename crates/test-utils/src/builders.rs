#![allow(dead_code)]

use std::path::{Path, PathBuf};

use apkbench::config::{RawSettings, Settings};

/// Builder for `Settings` to simplify test setup.
///
/// Starts from the built-in defaults and goes through the same validation
/// as a settings file.
pub struct SettingsBuilder {
    raw: RawSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawSettings::default(),
        }
    }

    pub fn java(mut self, path: &str) -> Self {
        self.raw.tools.java = path.to_string();
        self
    }

    pub fn apktool(mut self, path: &str) -> Self {
        self.raw.tools.apktool = path.to_string();
        self
    }

    pub fn apk_editor(mut self, path: &str) -> Self {
        self.raw.tools.apk_editor = path.to_string();
        self
    }

    pub fn apksigner(mut self, path: &str) -> Self {
        self.raw.tools.apksigner = path.to_string();
        self
    }

    pub fn keytool(mut self, path: &str) -> Self {
        self.raw.tools.keytool = path.to_string();
        self
    }

    pub fn zipalign(mut self, path: &str) -> Self {
        self.raw.tools.zipalign = path.to_string();
        self
    }

    pub fn adb(mut self, path: &str) -> Self {
        self.raw.tools.adb = path.to_string();
        self
    }

    pub fn keystore_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.raw.signing.keystore_dir = Some(PathBuf::from(dir.as_ref()));
        self
    }

    pub fn build(self) -> Settings {
        Settings::try_from(self.raw).expect("test settings should validate")
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
