// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Each tool family is a subcommand and each of its actions a nested
//! subcommand whose options are the tool's configuration struct.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::tools::ToolAction;
use crate::tools::adb::AdbAction;
use crate::tools::align::AlignConfig;
use crate::tools::apktool::ApktoolAction;
use crate::tools::editor::EditorAction;
use crate::tools::signer::SignerAction;

/// Command-line arguments for `apkbench`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "apkbench",
    version,
    about = "Drive apktool, APKEditor, apksigner, zipalign and adb from one place.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the settings file (TOML).
    ///
    /// If omitted, `APKBENCH_SETTINGS` or `apkbench.toml` is used, falling back
    /// to built-in defaults.
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `APKBENCH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    /// Print the commands that would run, but don't run them.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Also write the command's output to this file.
    #[arg(long, value_name = "PATH", global = true)]
    pub tee: Option<PathBuf>,

    #[command(subcommand)]
    pub tool: ToolCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ToolCommand {
    /// Decode and rebuild APKs with apktool.
    #[command(subcommand)]
    Apktool(ApktoolAction),

    /// Work with APKs through APKEditor.
    #[command(subcommand)]
    Editor(EditorAction),

    /// Sign and verify APKs with apksigner.
    #[command(subcommand)]
    Signer(SignerAction),

    /// Align an APK with zipalign.
    Align(AlignConfig),

    /// Talk to devices through adb.
    #[command(subcommand)]
    Adb(AdbAction),
}

impl ToolCommand {
    /// The argument builder behind this subcommand.
    pub fn action(&self) -> &dyn ToolAction {
        match self {
            ToolCommand::Apktool(a) => a,
            ToolCommand::Editor(a) => a,
            ToolCommand::Signer(a) => a,
            ToolCommand::Align(a) => a,
            ToolCommand::Adb(a) => a,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
