// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Settings as read from a TOML file, before validation.
///
/// ```toml
/// [tools]
/// java = "java"
/// apktool = "tools/apktool.jar"
/// apk_editor = "resources/APKEditor.jar"
/// apksigner = "resources/apksigner.jar"
/// keytool = "keytool"
/// zipalign = "zipalign"
/// adb = "adb"
///
/// [signing]
/// keystore_dir = "/home/me/.apkbench"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSettings {
    #[serde(default)]
    pub tools: ToolPaths,

    #[serde(default)]
    pub signing: SigningSection,
}

/// Validated settings.
///
/// Only obtainable through `Settings::try_from(RawSettings)` (or
/// `Settings::default()`), so the tool paths are known to be non-blank.
#[derive(Debug, Clone)]
pub struct Settings {
    tools: ToolPaths,
    signing: SigningSection,
}

impl Settings {
    pub(crate) fn new_unchecked(tools: ToolPaths, signing: SigningSection) -> Self {
        Self { tools, signing }
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    pub fn signing(&self) -> &SigningSection {
        &self.signing
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new_unchecked(ToolPaths::default(), SigningSection::default())
    }
}

/// `[tools]` section: how to invoke each external binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    /// Java launcher used for the jar-based tools.
    pub java: String,
    pub apktool: String,
    pub apk_editor: String,
    pub apksigner: String,
    pub keytool: String,
    pub zipalign: String,
    pub adb: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            apktool: "apktool.jar".to_string(),
            apk_editor: "resources/APKEditor.jar".to_string(),
            apksigner: "resources/apksigner.jar".to_string(),
            keytool: "keytool".to_string(),
            zipalign: "zipalign".to_string(),
            adb: "adb".to_string(),
        }
    }
}

/// `[signing]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SigningSection {
    /// Where the generated debug keystore lives.
    ///
    /// If `None`, `$HOME/.apkbench` is used (or `.apkbench` when `HOME` is
    /// unset).
    pub keystore_dir: Option<PathBuf>,
}

impl SigningSection {
    pub fn effective_keystore_dir(&self) -> PathBuf {
        match &self.keystore_dir {
            Some(dir) => dir.clone(),
            None => std::env::var_os("HOME")
                .map(PathBuf::from)
                .unwrap_or_default()
                .join(".apkbench"),
        }
    }
}
