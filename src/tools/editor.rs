// src/tools/editor.rs

//! APKEditor: resource-level decompile/build, split merging, refactoring,
//! obfuscation and inspection.

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::errors::Result;

use super::{Flag, ToolAction, java_jar, push_flags, require};

#[derive(Debug, Clone, Subcommand)]
pub enum EditorAction {
    /// Decompile an APK (`d`).
    Decompile(EditorDecompileConfig),
    /// Build a decompiled directory (`b`).
    Build(EditorBuildConfig),
    /// Merge split APKs / XAPK / APKM into one APK (`m`).
    Merge(MergeConfig),
    /// Refactor obfuscated resource names (`x`).
    Refactor(RefactorConfig),
    /// Obfuscate resources (`p`).
    Protect(ProtectConfig),
    /// Print information about an APK (`info`).
    Info(InfoConfig),
}

impl EditorAction {
    fn config(&self) -> &dyn ToolAction {
        match self {
            EditorAction::Decompile(c) => c,
            EditorAction::Build(c) => c,
            EditorAction::Merge(c) => c,
            EditorAction::Refactor(c) => c,
            EditorAction::Protect(c) => c,
            EditorAction::Info(c) => c,
        }
    }
}

impl ToolAction for EditorAction {
    fn label(&self) -> &'static str {
        self.config().label()
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        self.config().argv(settings)
    }
}

/// `java -jar <APKEditor> <sub> -i <input>` followed by `flags`.
fn editor_argv(settings: &Settings, sub: &str, input: &str, flags: &[Flag<'_>]) -> Vec<String> {
    let mut argv = java_jar(settings, &settings.tools().apk_editor, &[sub, "-i", input]);
    push_flags(&mut argv, flags);
    argv
}

#[derive(Debug, Clone, Default, Args)]
pub struct EditorDecompileConfig {
    #[arg(value_name = "APK")]
    pub apk: String,

    #[arg(short = 'o', long, default_value = "")]
    pub output: String,

    /// Decode resources to XML instead of JSON.
    #[arg(long)]
    pub xml: bool,

    /// Load dex files (`-load-dex 3`).
    #[arg(long)]
    pub load_dex: bool,

    /// Dex library to use (e.g. `internal`, `jf`).
    #[arg(long, default_value = "")]
    pub dex_lib: String,
}

impl ToolAction for EditorDecompileConfig {
    fn label(&self) -> &'static str {
        "Decompiling APK..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let apk = require(&self.apk, "Please select an APK file to decompile.")?;
        Ok(editor_argv(
            settings,
            "d",
            apk,
            &[
                Flag::Valued("-o", &self.output),
                Flag::Preset(&["-t", "xml"], self.xml),
                Flag::Preset(&["-load-dex", "3"], self.load_dex),
                Flag::Valued("-dex-lib", &self.dex_lib),
            ],
        ))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct EditorBuildConfig {
    #[arg(value_name = "DIR")]
    pub input_dir: String,

    #[arg(short = 'o', long, default_value = "")]
    pub output_apk: String,

    /// Build from XML sources instead of JSON.
    #[arg(long)]
    pub xml: bool,

    #[arg(long, default_value = "")]
    pub dex_lib: String,
}

impl ToolAction for EditorBuildConfig {
    fn label(&self) -> &'static str {
        "Building APK..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let dir = require(&self.input_dir, "Please select a decompiled directory to build.")?;
        Ok(editor_argv(
            settings,
            "b",
            dir,
            &[
                Flag::Valued("-o", &self.output_apk),
                Flag::Preset(&["-t", "xml"], self.xml),
                Flag::Valued("-dex-lib", &self.dex_lib),
            ],
        ))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct MergeConfig {
    /// Directory of splits, or an XAPK/APKM/APKS file.
    #[arg(value_name = "INPUT")]
    pub input: String,

    #[arg(short = 'o', long, default_value = "")]
    pub output_apk: String,

    #[arg(long, default_value = "")]
    pub res_dir: String,

    /// Value for `-extractNativeLibs` (`true`, `false` or `manifest`).
    #[arg(long, default_value = "")]
    pub extract_native_libs: String,

    #[arg(long)]
    pub clean_meta: bool,

    #[arg(short = 'f', long)]
    pub force: bool,

    #[arg(long)]
    pub validate_modules: bool,

    /// Validate resource directory names (`-vrd`).
    #[arg(long)]
    pub vrd: bool,
}

impl ToolAction for MergeConfig {
    fn label(&self) -> &'static str {
        "Merging APKs..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let input = require(&self.input, "Please select input for merging.")?;
        Ok(editor_argv(
            settings,
            "m",
            input,
            &[
                Flag::Valued("-o", &self.output_apk),
                Flag::Valued("-res-dir", &self.res_dir),
                Flag::Valued("-extractNativeLibs", &self.extract_native_libs),
                Flag::Switch("-clean-meta", self.clean_meta),
                Flag::Switch("-f", self.force),
                Flag::Switch("-validate-modules", self.validate_modules),
                Flag::Switch("-vrd", self.vrd),
            ],
        ))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct RefactorConfig {
    #[arg(value_name = "APK")]
    pub apk: String,

    #[arg(short = 'o', long, default_value = "")]
    pub output_apk: String,

    /// public.xml to take resource names from.
    #[arg(long, default_value = "")]
    pub public_xml: String,

    #[arg(long)]
    pub clean_meta: bool,

    #[arg(short = 'f', long)]
    pub force: bool,

    #[arg(long)]
    pub fix_types: bool,
}

impl ToolAction for RefactorConfig {
    fn label(&self) -> &'static str {
        "Refactoring APK..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let apk = require(&self.apk, "Please select an APK file to refactor.")?;
        Ok(editor_argv(
            settings,
            "x",
            apk,
            &[
                Flag::Valued("-o", &self.output_apk),
                Flag::Valued("-public-xml", &self.public_xml),
                Flag::Switch("-clean-meta", self.clean_meta),
                Flag::Switch("-f", self.force),
                Flag::Switch("-fix-types", self.fix_types),
            ],
        ))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ProtectConfig {
    #[arg(value_name = "APK")]
    pub apk: String,

    #[arg(short = 'o', long, default_value = "")]
    pub output_apk: String,

    /// Resource types to leave alone.
    #[arg(long, default_value = "")]
    pub keep_type: String,

    #[arg(long)]
    pub confuse_zip: bool,

    /// Dictionary file for directory names.
    #[arg(long, default_value = "")]
    pub dic_dir_names: String,

    /// Dictionary file for file names.
    #[arg(long, default_value = "")]
    pub dic_file_names: String,

    #[arg(short = 'f', long)]
    pub force: bool,

    #[arg(long)]
    pub skip_manifest: bool,
}

impl ToolAction for ProtectConfig {
    fn label(&self) -> &'static str {
        "Protecting APK..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let apk = require(&self.apk, "Please select an APK file to protect.")?;
        Ok(editor_argv(
            settings,
            "p",
            apk,
            &[
                Flag::Valued("-o", &self.output_apk),
                Flag::Valued("-keep-type", &self.keep_type),
                Flag::Valued("-dic-dir-names", &self.dic_dir_names),
                Flag::Valued("-dic-file-names", &self.dic_file_names),
                Flag::Switch("-confuse-zip", self.confuse_zip),
                Flag::Switch("-f", self.force),
                Flag::Switch("-skip-manifest", self.skip_manifest),
            ],
        ))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct InfoConfig {
    #[arg(value_name = "APK")]
    pub apk: String,

    /// File APKEditor writes the report to.
    #[arg(short = 'o', long, default_value = "")]
    pub output_file: String,

    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[arg(long, default_value = "")]
    pub filter_type: String,

    #[arg(long, default_value = "")]
    pub framework: String,

    #[arg(long, default_value = "")]
    pub framework_version: String,

    /// Resource id to look up (`-res`).
    #[arg(long, default_value = "")]
    pub resource_id: String,

    #[arg(long, default_value = "")]
    pub xml_strings: String,

    #[arg(long, default_value = "")]
    pub xml_tree: String,

    /// Report format (`-t`), e.g. `json` or `xml`.
    #[arg(long, default_value = "")]
    pub output_type: String,

    #[arg(long)]
    pub activities: bool,
    #[arg(long)]
    pub app_class: bool,
    #[arg(long)]
    pub app_icon: bool,
    #[arg(long)]
    pub app_name: bool,
    #[arg(long)]
    pub app_round_icon: bool,
    #[arg(long)]
    pub configurations: bool,
    #[arg(long)]
    pub dex: bool,
    #[arg(short = 'f', long)]
    pub force: bool,
    #[arg(long)]
    pub languages: bool,
    #[arg(long)]
    pub list_files: bool,
    #[arg(long)]
    pub list_xml_files: bool,
    #[arg(long)]
    pub locales: bool,
    #[arg(long)]
    pub min_sdk_version: bool,
    #[arg(long)]
    pub package: bool,
    #[arg(long)]
    pub permissions: bool,
    #[arg(long)]
    pub resources: bool,
    #[arg(long)]
    pub signatures: bool,
    #[arg(long)]
    pub signatures_base64: bool,
    #[arg(long)]
    pub target_sdk_version: bool,
    #[arg(long)]
    pub version_code: bool,
    #[arg(long)]
    pub version_name: bool,
}

impl InfoConfig {
    fn flags(&self) -> Vec<Flag<'_>> {
        vec![
            Flag::Valued("-o", &self.output_file),
            Flag::Valued("-filter-type", &self.filter_type),
            Flag::Valued("-framework", &self.framework),
            Flag::Valued("-framework-version", &self.framework_version),
            Flag::Valued("-res", &self.resource_id),
            Flag::Valued("-xmlstrings", &self.xml_strings),
            Flag::Valued("-xmltree", &self.xml_tree),
            Flag::Valued("-t", &self.output_type),
            Flag::Switch("-v", self.verbose),
            Flag::Switch("-activities", self.activities),
            Flag::Switch("-app-class", self.app_class),
            Flag::Switch("-app-icon", self.app_icon),
            Flag::Switch("-app-name", self.app_name),
            Flag::Switch("-app-round-icon", self.app_round_icon),
            Flag::Switch("-configurations", self.configurations),
            Flag::Switch("-dex", self.dex),
            Flag::Switch("-f", self.force),
            Flag::Switch("-languages", self.languages),
            Flag::Switch("-list-files", self.list_files),
            Flag::Switch("-list-xml-files", self.list_xml_files),
            Flag::Switch("-locales", self.locales),
            Flag::Switch("-min-sdk-version", self.min_sdk_version),
            Flag::Switch("-package", self.package),
            Flag::Switch("-permissions", self.permissions),
            Flag::Switch("-resources", self.resources),
            Flag::Switch("-signatures", self.signatures),
            Flag::Switch("-signatures-base64", self.signatures_base64),
            Flag::Switch("-target-sdk-version", self.target_sdk_version),
            Flag::Switch("-version-code", self.version_code),
            Flag::Switch("-version-name", self.version_name),
        ]
    }
}

impl ToolAction for InfoConfig {
    fn label(&self) -> &'static str {
        "Getting APK information..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let apk = require(&self.apk, "Please select an APK file to get information.")?;
        Ok(editor_argv(settings, "info", apk, &self.flags()))
    }
}
