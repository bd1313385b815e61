// src/tools/mod.rs

//! Argument builders for the supported external tools.
//!
//! Every tool form is a plain struct of booleans and strings. Turning one into
//! an argv is a pure function built from a small declarative rule, [`Flag`]:
//! each tool lists its flags once and [`push_flags`] decides which of them make
//! it onto the command line.
//!
//! - [`apktool`]: decode / build.
//! - [`editor`]: APKEditor decompile / build / merge / refactor / protect / info.
//! - [`signer`]: apksigner sign / verify / version / lineage, plus the keytool
//!   call that creates the debug keystore.
//! - [`align`]: zipalign.
//! - [`adb`]: the device bridge.

pub mod adb;
pub mod align;
pub mod apktool;
pub mod editor;
pub mod signer;

use crate::config::Settings;
use crate::errors::{ApkBenchError, Result};

/// One command-line flag and the condition for emitting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag<'a> {
    /// `flag`, emitted iff the bool is true.
    Switch(&'static str, bool),
    /// `flag value`, emitted iff `value` is not blank.
    Valued(&'static str, &'a str),
    /// A fixed group of arguments (e.g. `-t xml`), emitted iff the bool is
    /// true.
    Preset(&'static [&'static str], bool),
}

/// Append the flags whose condition holds, in table order.
pub fn push_flags(argv: &mut Vec<String>, flags: &[Flag<'_>]) {
    for flag in flags {
        match *flag {
            Flag::Switch(name, true) => argv.push(name.to_string()),
            Flag::Valued(name, value) if !is_blank(value) => {
                argv.push(name.to_string());
                argv.push(value.to_string());
            }
            Flag::Preset(args, true) => argv.extend(args.iter().map(|a| a.to_string())),
            _ => {}
        }
    }
}

/// Empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Reject a blank required input with the given message.
pub fn require<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    if is_blank(value) {
        Err(ApkBenchError::validation(message))
    } else {
        Ok(value)
    }
}

/// Derive a sibling output path: `app.apk` + `_signed` -> `app_signed.apk`.
///
/// Inputs without an `.apk` suffix just get `suffix.apk` appended.
pub fn sibling_apk(input: &str, suffix: &str) -> String {
    let stem = input.strip_suffix(".apk").unwrap_or(input);
    format!("{stem}{suffix}.apk")
}

/// Something the user can ask a tool to do.
pub trait ToolAction {
    /// Status text shown while the command runs.
    fn label(&self) -> &'static str;

    /// Build the full argv (binary first) for this action.
    fn argv(&self, settings: &Settings) -> Result<Vec<String>>;
}

/// `java -jar <jar> <args...>`.
pub(crate) fn java_jar(settings: &Settings, jar: &str, args: &[&str]) -> Vec<String> {
    let mut argv = vec![
        settings.tools().java.clone(),
        "-jar".to_string(),
        jar.to_string(),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));
    argv
}
