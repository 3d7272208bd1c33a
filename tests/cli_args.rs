//! Tests for the non-interactive commands, run against the real binary.

mod common;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

use common::{driver_package, write_zip};

/// Settings file pointing the driver root into `dir`.
fn settings_in(dir: &Path) -> (PathBuf, PathBuf) {
    let root = dir.join("drivers");
    let settings = dir.join("config.toml");
    fs::write(
        &settings,
        format!(
            "[drivers]\nroot = {:?}\n\n[gpu]\nvk_api_version = \"1.1.0\"\n",
            root.display().to_string()
        ),
    )
    .expect("Failed to write settings");
    (settings, root)
}

fn containerconf(settings: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_containerconf"));
    cmd.arg("--config").arg(settings).stdin(Stdio::null());
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn help_lists_subcommands() {
    let output = run(Command::new(env!("CARGO_BIN_EXE_containerconf")).arg("--help"));

    let text = stdout(&output);
    for command in ["edit", "show", "env", "drivers"] {
        assert!(text.contains(command), "missing {command} in help: {text}");
    }
}

#[test]
fn missing_subcommand_is_usage_error() {
    let output = run(&mut Command::new(env!("CARGO_BIN_EXE_containerconf")));

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn show_prints_reconciled_record() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, _) = settings_in(temp_dir.path());
    let file = temp_dir.path().join("game.toml");
    fs::write(&file, "name = \"Game\"\ngraphics_driver = \"vortek\"\ndxwrapper = \"vkd3d\"\n").unwrap();

    let output = run(containerconf(&settings).arg("show").arg(&file));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("name = \"Game\""));
    assert!(text.contains("version=1.10.3"), "{text}");
    assert!(text.contains("vkd3dVersion=2.6"), "{text}");
    assert!(text.contains("vkd3dFeatureLevel=12_1"), "{text}");
    // The file itself is not rewritten.
    assert!(!fs::read_to_string(&file).unwrap().contains("vkd3dVersion"));
}

#[test]
fn env_prints_launch_environment() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, _) = settings_in(temp_dir.path());
    let file = temp_dir.path().join("game.toml");
    fs::write(
        &file,
        "graphics_driver = \"turnip\"\ndxwrapper = \"dxvk\"\nbox64_preset = \"STABILITY\"\nenv_vars = \"WINEESYNC=0\"\n",
    )
    .unwrap();

    let output = run(containerconf(&settings).arg("env").arg(&file));

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert!(lines.contains(&"WINEESYNC=0".to_string()));
    assert!(lines.contains(&"BOX64_DYNAREC_SAFEFLAGS=2".to_string()));
    // Default DXVK build is async on turnip.
    assert!(lines.contains(&"DXVK_ASYNC=1".to_string()));
}

#[test]
fn show_reports_parse_errors() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, _) = settings_in(temp_dir.path());
    let file = temp_dir.path().join("broken.toml");
    fs::write(&file, "name = ").unwrap();

    let output = run(containerconf(&settings).arg("show").arg(&file));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Failed to parse config file"));
}

#[test]
fn invalid_settings_file_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let settings = temp_dir.path().join("config.toml");
    fs::write(&settings, "[host]\ncpu_count = 0\n").unwrap();

    let output = run(containerconf(&settings).arg("drivers").arg("list"));

    assert_eq!(output.status.code(), Some(1));
    let text = stderr(&output);
    assert!(text.contains("Error: Failed to load settings"), "{text}");
    assert!(text.contains("cpu_count"), "{text}");
}

#[test]
fn drivers_list_on_fresh_install_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, root) = settings_in(temp_dir.path());

    let output = run(containerconf(&settings).args(["drivers", "list"]));

    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(!root.exists());
}

#[test]
fn drivers_import_list_remove() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, root) = settings_in(temp_dir.path());
    let archive = driver_package(temp_dir.path(), "turnip.zip", "Turnip-25");

    let output = run(containerconf(&settings).args(["drivers", "import"]).arg(&archive));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Installed driver: Turnip-25");
    assert!(root.join("Turnip-25").join("meta.json").is_file());

    let output = run(containerconf(&settings).args(["drivers", "list"]));
    assert_eq!(stdout(&output).trim(), "Turnip-25");

    let output = run(containerconf(&settings).args(["drivers", "remove", "Turnip-25", "--yes"]));
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Removed driver: Turnip-25");
    assert!(!root.join("Turnip-25").exists());
}

#[test]
fn drivers_remove_without_confirmation_keeps_driver() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, root) = settings_in(temp_dir.path());
    let archive = driver_package(temp_dir.path(), "turnip.zip", "Keep");
    run(containerconf(&settings).args(["drivers", "import"]).arg(&archive));

    // stdin is closed, so the prompt reads no answer.
    let output = run(containerconf(&settings).args(["drivers", "remove", "Keep"]));

    assert!(output.status.success());
    assert!(stdout(&output).contains("Cancelled"));
    assert!(root.join("Keep").is_dir());
}

#[test]
fn drivers_import_without_manifest_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, root) = settings_in(temp_dir.path());
    let archive = temp_dir.path().join("empty.zip");
    write_zip(&archive, &[("libvulkan.so", "\x7fELF")]);

    let output = run(containerconf(&settings).args(["drivers", "import"]).arg(&archive));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output)
        .contains("Error: Failed to install driver: no valid manifest found in archive"));
    assert!(!root.exists());
}

#[test]
fn drivers_remove_unknown_fails() {
    let temp_dir = TempDir::new().unwrap();
    let (settings, _) = settings_in(temp_dir.path());

    let output = run(containerconf(&settings).args(["drivers", "remove", "Ghost", "-y"]));

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Failed to remove Ghost"));
}
