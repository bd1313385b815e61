// src/tools/apktool.rs

//! apktool: decode an APK into a project directory and build it back.

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::errors::Result;

use super::{Flag, ToolAction, java_jar, push_flags, require};

#[derive(Debug, Clone, Subcommand)]
pub enum ApktoolAction {
    /// Decode an APK (`apktool d`).
    Decode(DecodeConfig),
    /// Build a decoded directory back into an APK (`apktool b`).
    Build(BuildConfig),
}

impl ToolAction for ApktoolAction {
    fn label(&self) -> &'static str {
        match self {
            ApktoolAction::Decode(c) => c.label(),
            ApktoolAction::Build(c) => c.label(),
        }
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        match self {
            ApktoolAction::Decode(c) => c.argv(settings),
            ApktoolAction::Build(c) => c.argv(settings),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct DecodeConfig {
    /// APK file to decode.
    #[arg(value_name = "APK")]
    pub apk: String,

    /// Output directory.
    #[arg(short = 'o', long, default_value = "")]
    pub output: String,

    /// Do not decode resources.
    #[arg(long)]
    pub no_res: bool,

    /// Do not decode sources.
    #[arg(long)]
    pub no_src: bool,

    /// Do not decode the assets folder.
    #[arg(long)]
    pub no_assets: bool,

    /// Decode only AndroidManifest.xml.
    #[arg(long)]
    pub only_manifest: bool,

    /// Delete the destination directory first.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Strip debug info from smali files.
    #[arg(long)]
    pub no_debug: bool,

    /// Keep files as close to the original as possible.
    #[arg(long)]
    pub match_original: bool,

    /// Keep broken resources instead of failing.
    #[arg(long)]
    pub keep_broken: bool,

    /// Only decode classes in the main dex.
    #[arg(long)]
    pub only_main_classes: bool,

    #[arg(long, default_value = "")]
    pub api_level: String,

    /// Number of threads.
    #[arg(long, default_value = "")]
    pub jobs: String,

    #[arg(long, default_value = "")]
    pub framework_path: String,
}

impl DecodeConfig {
    fn flags(&self) -> [Flag<'_>; 13] {
        [
            Flag::Valued("-o", &self.output),
            Flag::Switch("-r", self.no_res),
            Flag::Switch("-s", self.no_src),
            Flag::Switch("--no-assets", self.no_assets),
            Flag::Switch("--only-manifest", self.only_manifest),
            Flag::Switch("-f", self.force),
            Flag::Switch("-b", self.no_debug),
            Flag::Switch("-m", self.match_original),
            Flag::Switch("-k", self.keep_broken),
            Flag::Switch("--only-main-classes", self.only_main_classes),
            Flag::Valued("--api-level", &self.api_level),
            Flag::Valued("-j", &self.jobs),
            Flag::Valued("-p", &self.framework_path),
        ]
    }
}

impl ToolAction for DecodeConfig {
    fn label(&self) -> &'static str {
        "Decompiling APK..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let apk = require(&self.apk, "Please select an APK file to decompile.")?;

        let mut argv = java_jar(settings, &settings.tools().apktool, &["d", apk]);
        push_flags(&mut argv, &self.flags());
        Ok(argv)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct BuildConfig {
    /// Decoded project directory.
    #[arg(value_name = "DIR")]
    pub input_dir: String,

    /// Output APK.
    #[arg(short = 'o', long, default_value = "")]
    pub output_apk: String,

    /// Set android:debuggable="true".
    #[arg(short = 'd', long)]
    pub debuggable: bool,

    /// Copy the original manifest and META-INF.
    #[arg(short = 'c', long)]
    pub copy_original: bool,

    /// Skip change detection and build everything.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Do not repack into an APK.
    #[arg(long)]
    pub no_apk: bool,

    /// Do not crunch resource files.
    #[arg(long)]
    pub no_crunch: bool,

    #[arg(long)]
    pub use_aapt1: bool,

    /// Add a permissive network security config.
    #[arg(short = 'n', long)]
    pub net_sec_conf: bool,

    /// Custom aapt binary.
    #[arg(long, default_value = "")]
    pub aapt_path: String,

    #[arg(long, default_value = "")]
    pub framework_path: String,
}

impl BuildConfig {
    fn flags(&self) -> [Flag<'_>; 10] {
        [
            Flag::Valued("-o", &self.output_apk),
            Flag::Switch("-d", self.debuggable),
            Flag::Switch("-c", self.copy_original),
            Flag::Switch("-f", self.force),
            Flag::Switch("--no-apk", self.no_apk),
            Flag::Switch("--no-crunch", self.no_crunch),
            Flag::Switch("--use-aapt1", self.use_aapt1),
            Flag::Switch("-n", self.net_sec_conf),
            Flag::Valued("-a", &self.aapt_path),
            Flag::Valued("-p", &self.framework_path),
        ]
    }
}

impl ToolAction for BuildConfig {
    fn label(&self) -> &'static str {
        "Building APK..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let dir = require(&self.input_dir, "Please select a decompiled directory to build.")?;

        let mut argv = java_jar(settings, &settings.tools().apktool, &["b", dir]);
        push_flags(&mut argv, &self.flags());
        Ok(argv)
    }
}
