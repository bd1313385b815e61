// tests/tools_argv.rs

use apkbench::errors::ApkBenchError;
use apkbench::tools::ToolAction;
use apkbench::tools::adb::{
    AdbAction, ConnectConfig, InstallConfig, PackageConfig, PairConfig, PullConfig, ShellConfig,
    WirelessTarget,
};
use apkbench::tools::align::AlignConfig;
use apkbench::tools::apktool::{BuildConfig, DecodeConfig};
use apkbench::tools::editor::{
    EditorDecompileConfig, InfoConfig, MergeConfig, ProtectConfig, RefactorConfig,
};
use apkbench::tools::signer::{
    LineageConfig, SignConfig, SignerAction, VerifyConfig, test_keystore_argv,
};
use apkbench::tools::sibling_apk;
use apkbench_test_utils::builders::SettingsBuilder;

fn settings() -> apkbench::config::Settings {
    SettingsBuilder::new()
        .java("java")
        .apktool("apktool.jar")
        .apk_editor("APKEditor.jar")
        .apksigner("apksigner.jar")
        .keytool("keytool")
        .zipalign("zipalign")
        .adb("adb")
        .keystore_dir("/keys")
        .build()
}

fn argv(action: &dyn ToolAction) -> Vec<String> {
    action.argv(&settings()).unwrap()
}

fn validation_message(action: &dyn ToolAction) -> String {
    match action.argv(&settings()) {
        Err(ApkBenchError::Validation(msg)) => msg,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn apktool_build_force_without_output() {
    let cfg = BuildConfig {
        input_dir: "app".into(),
        force: true,
        output_apk: String::new(),
        ..Default::default()
    };

    let argv = argv(&cfg);
    assert!(argv.contains(&"-f".to_string()));
    assert!(!argv.contains(&"-o".to_string()));
    assert_eq!(argv, vec!["java", "-jar", "apktool.jar", "b", "app", "-f"]);
}

#[test]
fn apktool_decode_with_options() {
    let cfg = DecodeConfig {
        apk: "app.apk".into(),
        output: "out".into(),
        no_res: true,
        only_main_classes: true,
        api_level: "30".into(),
        jobs: "  ".into(),
        ..Default::default()
    };

    assert_eq!(
        argv(&cfg),
        vec![
            "java", "-jar", "apktool.jar", "d", "app.apk", "-o", "out", "-r",
            "--only-main-classes", "--api-level", "30",
        ]
    );
}

#[test]
fn apktool_requires_input() {
    assert_eq!(
        validation_message(&DecodeConfig::default()),
        "Please select an APK file to decompile."
    );
    assert_eq!(
        validation_message(&BuildConfig::default()),
        "Please select a decompiled directory to build."
    );
}

#[test]
fn editor_decompile_to_xml() {
    let cfg = EditorDecompileConfig {
        apk: "app.apk".into(),
        output: "out".into(),
        xml: true,
        load_dex: true,
        ..Default::default()
    };

    assert_eq!(
        argv(&cfg),
        vec![
            "java", "-jar", "APKEditor.jar", "d", "-i", "app.apk", "-o", "out", "-t", "xml",
            "-load-dex", "3",
        ]
    );
}

#[test]
fn editor_merge_advanced_flags() {
    let cfg = MergeConfig {
        input: "splits.xapk".into(),
        extract_native_libs: "manifest".into(),
        clean_meta: true,
        vrd: true,
        ..Default::default()
    };

    assert_eq!(
        argv(&cfg),
        vec![
            "java", "-jar", "APKEditor.jar", "m", "-i", "splits.xapk",
            "-extractNativeLibs", "manifest", "-clean-meta", "-vrd",
        ]
    );
    assert_eq!(
        validation_message(&MergeConfig::default()),
        "Please select input for merging."
    );
}

#[test]
fn editor_refactor_and_protect() {
    let refactor = RefactorConfig {
        apk: "a.apk".into(),
        fix_types: true,
        ..Default::default()
    };
    assert_eq!(
        argv(&refactor)[3..],
        ["x", "-i", "a.apk", "-fix-types"]
    );

    let protect = ProtectConfig {
        apk: "a.apk".into(),
        keep_type: "font".into(),
        confuse_zip: true,
        ..Default::default()
    };
    assert_eq!(
        argv(&protect)[3..],
        ["p", "-i", "a.apk", "-keep-type", "font", "-confuse-zip"]
    );
}

#[test]
fn editor_info_switches() {
    let cfg = InfoConfig {
        apk: "a.apk".into(),
        verbose: true,
        package: true,
        version_name: true,
        output_type: "json".into(),
        ..Default::default()
    };

    assert_eq!(
        argv(&cfg)[3..],
        ["info", "-i", "a.apk", "-t", "json", "-v", "-package", "-version-name"]
    );
    assert_eq!(cfg.label(), "Getting APK information...");
}

#[test]
fn sign_with_explicit_keystore() {
    let cfg = SignConfig {
        input_apk: "app.apk".into(),
        output_apk: "signed.apk".into(),
        keystore: "release.jks".into(),
        keystore_password: "s3cret".into(),
        key_alias: "release".into(),
        key_password: "k3y".into(),
        v4: true,
        ..Default::default()
    };

    assert_eq!(
        argv(&cfg),
        vec![
            "java", "-jar", "apksigner.jar", "sign",
            "--v1-signing-enabled", "true",
            "--v2-signing-enabled", "true",
            "--v3-signing-enabled", "true",
            "--v4-signing-enabled", "true",
            "--ks", "release.jks",
            "--ks-pass", "pass:s3cret",
            "--ks-key-alias", "release",
            "--key-pass", "pass:k3y",
            "--out", "signed.apk",
            "app.apk",
        ]
    );
}

#[test]
fn sign_without_keystore_uses_test_key_and_default_output() {
    let cfg = SignConfig {
        input_apk: "dir/app.apk".into(),
        ..Default::default()
    };
    assert!(cfg.uses_test_key());

    let argv = argv(&cfg);
    let ks = argv.iter().position(|a| a == "--ks").unwrap();
    assert_eq!(argv[ks + 1], "/keys/debug.keystore");
    assert_eq!(argv[ks + 3], "pass:android");
    assert_eq!(argv[ks + 5], "androiddebugkey");

    let out = argv.iter().position(|a| a == "--out").unwrap();
    assert_eq!(argv[out + 1], "dir/app_signed.apk");
    assert_eq!(argv.last().unwrap(), "dir/app.apk");
}

#[test]
fn verify_and_version() {
    let cfg = VerifyConfig {
        apk: "a.apk".into(),
        verbose: true,
        print_certs: true,
    };
    assert_eq!(argv(&cfg)[3..], ["verify", "-v", "--print-certs", "a.apk"]);

    assert_eq!(
        argv(&SignerAction::Version),
        vec!["java", "-jar", "apksigner.jar", "version"]
    );
}

#[test]
fn lineage_requires_both_keystores() {
    let cfg = LineageConfig {
        input_apk: "a.apk".into(),
        old_keystore: "old.jks".into(),
        ..Default::default()
    };
    assert_eq!(
        validation_message(&cfg),
        "Both old and new keystores are required for key rotation."
    );

    let cfg = LineageConfig {
        new_keystore: "new.jks".into(),
        new_keystore_password: "n".into(),
        new_key_alias: "newkey".into(),
        ..cfg
    };
    let argv = argv(&cfg);
    assert_eq!(
        argv[3..],
        [
            "lineage", "--old-signer", "--ks", "old.jks", "--ks-pass", "pass:",
            "--ks-key-alias", "", "--new-signer", "--ks", "new.jks", "--ks-pass", "pass:n",
            "--ks-key-alias", "newkey",
        ]
    );
}

#[test]
fn keytool_argv_for_test_keystore() {
    let argv = test_keystore_argv(&settings(), std::path::Path::new("/keys/debug.keystore"));

    assert_eq!(argv[..3], ["keytool", "-genkeypair", "-v"]);
    let dname = argv.iter().position(|a| a == "-dname").unwrap();
    assert_eq!(argv[dname + 1], "CN=Android Debug,O=Android,C=US");
    assert!(argv.windows(2).any(|w| w == ["-keystore", "/keys/debug.keystore"]));
    assert!(argv.windows(2).any(|w| w == ["-validity", "10000"]));
}

#[test]
fn align_defaults_output_and_optional_force() {
    let cfg = AlignConfig {
        input_apk: "app.apk".into(),
        ..Default::default()
    };
    assert_eq!(
        argv(&cfg),
        vec!["zipalign", "-v", "4", "app.apk", "app_aligned.apk"]
    );

    let cfg = AlignConfig {
        output_apk: "out.apk".into(),
        force: true,
        ..cfg
    };
    assert_eq!(
        argv(&cfg),
        vec!["zipalign", "-f", "-v", "4", "app.apk", "out.apk"]
    );
}

#[test]
fn adb_wireless_actions() {
    let target = WirelessTarget {
        ip: "192.168.1.20".into(),
        port: "37000".into(),
    };

    let pair = AdbAction::Pair(PairConfig {
        target: target.clone(),
        code: "123456".into(),
    });
    assert_eq!(argv(&pair), vec!["adb", "pair", "192.168.1.20:37000", "123456"]);

    let connect = AdbAction::Connect(ConnectConfig { target });
    assert_eq!(argv(&connect), vec!["adb", "connect", "192.168.1.20:37000"]);

    let missing_ip = AdbAction::Connect(ConnectConfig::default());
    assert_eq!(validation_message(&missing_ip), "Enter the device IP address.");
}

#[test]
fn adb_device_scoped_actions() {
    let install = AdbAction::Install(InstallConfig {
        apk: "app.apk".into(),
        device: "emulator-5554".into(),
    });
    assert_eq!(
        argv(&install),
        vec!["adb", "-s", "emulator-5554", "install", "-r", "app.apk"]
    );

    let pull = AdbAction::Pull(PullConfig {
        remote: "/data/app/base.apk".into(),
        dest: "out".into(),
        device: String::new(),
    });
    assert_eq!(argv(&pull), vec!["adb", "pull", "/data/app/base.apk", "out"]);

    let pkg = PackageConfig {
        package: "com.example".into(),
        device: "d1".into(),
    };
    assert_eq!(
        argv(&AdbAction::Path(pkg.clone())),
        vec!["adb", "-s", "d1", "shell", "pm", "path", "com.example"]
    );
    assert_eq!(
        argv(&AdbAction::Dump(pkg.clone())),
        vec!["adb", "-s", "d1", "shell", "dumpsys", "package", "com.example"]
    );
    assert_eq!(
        argv(&AdbAction::Uninstall(pkg)),
        vec!["adb", "-s", "d1", "uninstall", "com.example"]
    );

    assert_eq!(
        validation_message(&AdbAction::Dump(PackageConfig::default())),
        "Enter package name"
    );
}

#[test]
fn adb_shell_passes_words_through() {
    let shell = AdbAction::Shell(ShellConfig {
        device: String::new(),
        command: vec!["pm".into(), "list".into(), "packages".into(), "-3".into()],
    });
    assert_eq!(argv(&shell), vec!["adb", "shell", "pm", "list", "packages", "-3"]);

    let empty = AdbAction::Shell(ShellConfig::default());
    assert_eq!(validation_message(&empty), "Enter a shell command.");

    assert_eq!(argv(&AdbAction::Devices), vec!["adb", "devices", "-l"]);
}

#[test]
fn sibling_apk_paths() {
    assert_eq!(sibling_apk("app.apk", "_signed"), "app_signed.apk");
    assert_eq!(sibling_apk("a.apk.d/app.apk", "_aligned"), "a.apk.d/app_aligned.apk");
    assert_eq!(sibling_apk("bundle", "_signed"), "bundle_signed.apk");
}
