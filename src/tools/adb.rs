// src/tools/adb.rs

//! adb: wireless pairing, device listing and per-device package operations.
//!
//! Device-scoped actions take an optional `--device` serial; when it is blank
//! no `-s` is emitted and adb falls back to its single attached device.

use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::errors::{ApkBenchError, Result};

use super::{Flag, ToolAction, is_blank, push_flags, require};

#[derive(Debug, Clone, Subcommand)]
pub enum AdbAction {
    /// `adb pair ip:port code`.
    Pair(PairConfig),
    /// `adb connect ip:port`.
    Connect(ConnectConfig),
    /// `adb devices -l`.
    Devices,
    /// `adb install -r <apk>`.
    Install(InstallConfig),
    /// `adb pull <remote> <dest>`.
    Pull(PullConfig),
    /// Print the on-device path of a package's APK.
    Path(PackageConfig),
    /// `dumpsys package <pkg>`.
    Dump(PackageConfig),
    /// `adb uninstall <pkg>`.
    Uninstall(PackageConfig),
    /// Run a shell command on the device.
    Shell(ShellConfig),
}

impl ToolAction for AdbAction {
    fn label(&self) -> &'static str {
        match self {
            AdbAction::Pair(_) => "Pairing device...",
            AdbAction::Connect(_) => "Connecting to device...",
            AdbAction::Devices => "Listing devices...",
            AdbAction::Install(_) => "Installing APK...",
            AdbAction::Pull(_) => "Pulling file...",
            AdbAction::Path(_) => "Resolving package path...",
            AdbAction::Dump(_) => "Dumping package info...",
            AdbAction::Uninstall(_) => "Uninstalling package...",
            AdbAction::Shell(_) => "Running shell command...",
        }
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let adb = &settings.tools().adb;
        match self {
            AdbAction::Pair(c) => {
                let code = require(&c.code, "Enter the pairing code.")?;
                Ok(vec![adb.clone(), "pair".into(), c.target.address()?, code.into()])
            }
            AdbAction::Connect(c) => Ok(vec![adb.clone(), "connect".into(), c.target.address()?]),
            AdbAction::Devices => Ok(vec![adb.clone(), "devices".into(), "-l".into()]),
            AdbAction::Install(c) => {
                let apk = require(&c.apk, "Please select an APK file to install.")?;
                Ok(device_argv(adb, &c.device, &["install", "-r", apk]))
            }
            AdbAction::Pull(c) => {
                let remote = require(&c.remote, "Enter the remote path to pull.")?;
                let dest = require(&c.dest, "Please select a destination directory.")?;
                Ok(device_argv(adb, &c.device, &["pull", remote, dest]))
            }
            AdbAction::Path(c) => {
                let pkg = c.package()?;
                Ok(device_argv(adb, &c.device, &["shell", "pm", "path", pkg]))
            }
            AdbAction::Dump(c) => {
                let pkg = c.package()?;
                Ok(device_argv(adb, &c.device, &["shell", "dumpsys", "package", pkg]))
            }
            AdbAction::Uninstall(c) => {
                let pkg = c.package()?;
                Ok(device_argv(adb, &c.device, &["uninstall", pkg]))
            }
            AdbAction::Shell(c) => {
                if c.command.iter().all(|w| is_blank(w)) {
                    return Err(ApkBenchError::validation("Enter a shell command."));
                }
                let mut argv = device_argv(adb, &c.device, &["shell"]);
                argv.extend(c.command.iter().cloned());
                Ok(argv)
            }
        }
    }
}

/// `adb [-s <device>] <args...>`.
fn device_argv(adb: &str, device: &str, args: &[&str]) -> Vec<String> {
    let mut argv = vec![adb.to_string()];
    push_flags(&mut argv, &[Flag::Valued("-s", device)]);
    argv.extend(args.iter().map(|a| a.to_string()));
    argv
}

/// Host and port of a device in wireless debugging mode.
#[derive(Debug, Clone, Default, Args)]
pub struct WirelessTarget {
    #[arg(long, default_value = "")]
    pub ip: String,

    #[arg(long, default_value = "")]
    pub port: String,
}

impl WirelessTarget {
    /// `ip:port`.
    pub fn address(&self) -> Result<String> {
        let ip = require(&self.ip, "Enter the device IP address.")?;
        let port = require(&self.port, "Enter the device port.")?;
        Ok(format!("{}:{}", ip.trim(), port.trim()))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct PairConfig {
    #[command(flatten)]
    pub target: WirelessTarget,

    /// Pairing code shown on the device.
    #[arg(long, default_value = "")]
    pub code: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConnectConfig {
    #[command(flatten)]
    pub target: WirelessTarget,
}

#[derive(Debug, Clone, Default, Args)]
pub struct InstallConfig {
    #[arg(value_name = "APK")]
    pub apk: String,

    #[arg(short = 's', long, default_value = "")]
    pub device: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PullConfig {
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    #[arg(value_name = "DEST")]
    pub dest: String,

    #[arg(short = 's', long, default_value = "")]
    pub device: String,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PackageConfig {
    #[arg(value_name = "PACKAGE", default_value = "")]
    pub package: String,

    #[arg(short = 's', long, default_value = "")]
    pub device: String,
}

impl PackageConfig {
    fn package(&self) -> Result<&str> {
        require(&self.package, "Enter package name")
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ShellConfig {
    #[arg(short = 's', long, default_value = "")]
    pub device: String,

    /// Command words, passed through to `adb shell`.
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}
