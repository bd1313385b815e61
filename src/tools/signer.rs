// src/tools/signer.rs

//! apksigner actions and the keytool call behind the debug test key.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Subcommand};

use crate::config::Settings;
use crate::errors::{ApkBenchError, Result};

use super::{Flag, ToolAction, is_blank, java_jar, push_flags, require, sibling_apk};

pub const TEST_KEYSTORE_NAME: &str = "debug.keystore";
pub const TEST_KEYSTORE_PASSWORD: &str = "android";
pub const TEST_KEY_ALIAS: &str = "androiddebugkey";
pub const TEST_KEY_PASSWORD: &str = "android";

#[derive(Debug, Clone, Subcommand)]
pub enum SignerAction {
    /// Sign an APK.
    Sign(SignConfig),
    /// Verify an APK signature.
    Verify(VerifyConfig),
    /// Print the apksigner version.
    Version,
    /// Create a signing certificate lineage for key rotation.
    Lineage(LineageConfig),
}

impl ToolAction for SignerAction {
    fn label(&self) -> &'static str {
        match self {
            SignerAction::Sign(c) => c.label(),
            SignerAction::Verify(c) => c.label(),
            SignerAction::Version => "Getting apksigner version...",
            SignerAction::Lineage(c) => c.label(),
        }
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        match self {
            SignerAction::Sign(c) => c.argv(settings),
            SignerAction::Verify(c) => c.argv(settings),
            SignerAction::Version => Ok(signer_base(settings, "version")),
            SignerAction::Lineage(c) => c.argv(settings),
        }
    }
}

fn signer_base(settings: &Settings, sub: &str) -> Vec<String> {
    java_jar(settings, &settings.tools().apksigner, &[sub])
}

/// Where the generated debug keystore lives for these settings.
pub fn test_keystore_path(settings: &Settings) -> PathBuf {
    settings
        .signing()
        .effective_keystore_dir()
        .join(TEST_KEYSTORE_NAME)
}

/// `keytool -genkeypair ...` creating the debug keystore at `path`.
pub fn test_keystore_argv(settings: &Settings, path: &Path) -> Vec<String> {
    let keystore = path.to_string_lossy();
    let mut argv = vec![settings.tools().keytool.clone(), "-genkeypair".into(), "-v".into()];
    for (flag, value) in [
        ("-keystore", &*keystore),
        ("-storepass", TEST_KEYSTORE_PASSWORD),
        ("-alias", TEST_KEY_ALIAS),
        ("-keypass", TEST_KEY_PASSWORD),
        ("-keyalg", "RSA"),
        ("-keysize", "2048"),
        ("-validity", "10000"),
        ("-dname", "CN=Android Debug,O=Android,C=US"),
    ] {
        argv.push(flag.to_string());
        argv.push(value.to_string());
    }
    argv
}

/// `--ks P --ks-pass pass:X --ks-key-alias A`, plus `--key-pass pass:Y` when
/// a key password is given.
fn push_keystore(argv: &mut Vec<String>, ks: &str, ks_pass: &str, alias: &str, key_pass: Option<&str>) {
    argv.extend([
        "--ks".to_string(),
        ks.to_string(),
        "--ks-pass".to_string(),
        format!("pass:{ks_pass}"),
        "--ks-key-alias".to_string(),
        alias.to_string(),
    ]);
    if let Some(key_pass) = key_pass {
        argv.push("--key-pass".to_string());
        argv.push(format!("pass:{key_pass}"));
    }
}

#[derive(Debug, Clone, Args)]
pub struct SignConfig {
    #[arg(value_name = "APK")]
    pub input_apk: String,

    /// Signed output; defaults to `<input>_signed.apk`.
    #[arg(short = 'o', long, default_value = "")]
    pub output_apk: String,

    #[arg(long, default_value = "")]
    pub keystore: String,

    #[arg(long, default_value = "")]
    pub keystore_password: String,

    #[arg(long, default_value = "")]
    pub key_alias: String,

    #[arg(long, default_value = "")]
    pub key_password: String,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub v1: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub v2: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub v3: bool,

    #[arg(long, default_value_t = false, action = ArgAction::Set)]
    pub v4: bool,

    /// Sign with the generated debug key.
    #[arg(long)]
    pub test_key: bool,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            input_apk: String::new(),
            output_apk: String::new(),
            keystore: String::new(),
            keystore_password: String::new(),
            key_alias: String::new(),
            key_password: String::new(),
            v1: true,
            v2: true,
            v3: true,
            v4: false,
            test_key: false,
        }
    }
}

impl SignConfig {
    /// The debug key is used when asked for, or when no keystore is given.
    pub fn uses_test_key(&self) -> bool {
        self.test_key || is_blank(&self.keystore)
    }

    pub fn effective_output(&self) -> String {
        if is_blank(&self.output_apk) {
            sibling_apk(&self.input_apk, "_signed")
        } else {
            self.output_apk.clone()
        }
    }
}

impl ToolAction for SignConfig {
    fn label(&self) -> &'static str {
        "Signing APK..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let input = require(&self.input_apk, "Please select an APK file to sign.")?;

        let mut argv = signer_base(settings, "sign");
        for (n, enabled) in [(1, self.v1), (2, self.v2), (3, self.v3), (4, self.v4)] {
            argv.push(format!("--v{n}-signing-enabled"));
            argv.push(enabled.to_string());
        }

        if self.uses_test_key() {
            let ks = test_keystore_path(settings);
            push_keystore(
                &mut argv,
                &ks.to_string_lossy(),
                TEST_KEYSTORE_PASSWORD,
                TEST_KEY_ALIAS,
                Some(TEST_KEY_PASSWORD),
            );
        } else {
            push_keystore(
                &mut argv,
                &self.keystore,
                &self.keystore_password,
                &self.key_alias,
                Some(&self.key_password),
            );
        }

        argv.push("--out".to_string());
        argv.push(self.effective_output());
        argv.push(input.to_string());
        Ok(argv)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct VerifyConfig {
    #[arg(value_name = "APK")]
    pub apk: String,

    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[arg(long)]
    pub print_certs: bool,
}

impl ToolAction for VerifyConfig {
    fn label(&self) -> &'static str {
        "Verifying APK signature..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        let apk = require(&self.apk, "Please select an APK file to verify.")?;

        let mut argv = signer_base(settings, "verify");
        push_flags(
            &mut argv,
            &[
                Flag::Switch("-v", self.verbose),
                Flag::Switch("--print-certs", self.print_certs),
            ],
        );
        argv.push(apk.to_string());
        Ok(argv)
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct LineageConfig {
    #[arg(value_name = "APK")]
    pub input_apk: String,

    /// Lineage file to write.
    #[arg(short = 'o', long, default_value = "")]
    pub output: String,

    #[arg(long, default_value = "")]
    pub old_keystore: String,
    #[arg(long, default_value = "")]
    pub old_keystore_password: String,
    #[arg(long, default_value = "")]
    pub old_key_alias: String,

    #[arg(long, default_value = "")]
    pub new_keystore: String,
    #[arg(long, default_value = "")]
    pub new_keystore_password: String,
    #[arg(long, default_value = "")]
    pub new_key_alias: String,
}

impl ToolAction for LineageConfig {
    fn label(&self) -> &'static str {
        "Rotating signing key..."
    }

    fn argv(&self, settings: &Settings) -> Result<Vec<String>> {
        require(&self.input_apk, "Please select an APK file.")?;
        if is_blank(&self.old_keystore) || is_blank(&self.new_keystore) {
            return Err(ApkBenchError::validation(
                "Both old and new keystores are required for key rotation.",
            ));
        }

        let mut argv = signer_base(settings, "lineage");
        push_flags(&mut argv, &[Flag::Valued("--out", &self.output)]);
        argv.push("--old-signer".to_string());
        push_keystore(
            &mut argv,
            &self.old_keystore,
            &self.old_keystore_password,
            &self.old_key_alias,
            None,
        );
        argv.push("--new-signer".to_string());
        push_keystore(
            &mut argv,
            &self.new_keystore,
            &self.new_keystore_password,
            &self.new_key_alias,
            None,
        );
        Ok(argv)
    }
}
