//! Integration tests for the version bump

use crate::helpers::{BUILD_BAT, CPP, TestProject, WORKFLOW, run_bump, run_bump_raw};
use anyhow::Result;

#[test]
fn test_report_only_without_version() -> Result<()> {
  let project = TestProject::new()?;
  let before = project.snapshot()?;

  let output = run_bump(&project.path, &[])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("------------Current Versions------------"));
  assert!(stdout.contains("setup_script.iss: 0.0.9"));
  assert!(stdout.contains("src/main.cpp: 0.0.9"));
  assert!(stdout.contains("  linux-testing: 0.0.9"));
  assert!(stdout.contains("  linux-stable: 0.0.8"));
  assert!(stdout.contains("  Qt: 6.8.3"));
  assert!(stdout.contains("build.sh: Qt 6.8.3"));
  assert!(stdout.contains("build.bat: Qt 6.8.3"));
  assert!(!stdout.contains("Updated Versions"));
  assert_eq!(project.snapshot()?, before);

  Ok(())
}

#[test]
fn test_bump_with_qt_golden_output() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_bump(&project.path, &["0.1.0", "--qt-version", "6.9.0"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("------------Updated Versions------------"));

  assert_eq!(
    project.read("setup_script.iss")?,
    "#define AppName \"qtedit4\"\r\n#define VersionString \"0.1.0\"\r\n\r\n[Setup]\r\nAppVersion={#VersionString}\r\n"
  );
  assert_eq!(project.read("src/main.cpp")?, CPP.replace("0.0.9", "0.1.0"));
  assert_eq!(
    project.read("updates.json")?,
    r#"{
    "updates": {
        "linux-testing": {
            "latest-version": "0.1.0",
            "open-url": "https://github.com/diegoiast/qtedit4/releases/tag/v0.1.0",
            "download-url": "https://github.com/diegoiast/qtedit4/releases/download/v0.1.0/qtedit4-qt6.9.0-v0.1.0-x86_64.AppImage"
        },
        "linux-stable": {
            "latest-version": "0.0.8",
            "open-url": "https://github.com/diegoiast/qtedit4/releases/tag/v0.0.8"
        }
    }
}"#
  );
  assert_eq!(
    project.read("build.sh")?,
    "#!/bin/sh\nset -e\n\nAPP_VERSION=\"0.1.0\"\nQT_VERSION=\"6.9.0\"\n\necho \"building $APP_VERSION with Qt $QT_VERSION\"\n"
  );
  assert_eq!(
    project.read("build.bat")?,
    "@echo off\r\nSET PATH=c:\\Qt\\6.9.0\\mingw_64\\bin;c:\\Qt\\Tools\\mingw1310_64\\bin;%PATH%\r\ncmake --build build\r\n"
  );
  assert_eq!(
    project.read(".github/workflows/build.yml")?,
    WORKFLOW.replace("\"6.8.3\"", "\"6.9.0\"")
  );

  Ok(())
}

#[test]
fn test_bump_without_qt_leaves_qt_files() -> Result<()> {
  let project = TestProject::new()?;

  run_bump(&project.path, &["0.1.0"])?;

  assert_eq!(project.read("build.bat")?, BUILD_BAT);
  assert_eq!(project.read(".github/workflows/build.yml")?, WORKFLOW);
  let build_sh = project.read("build.sh")?;
  assert!(build_sh.contains("APP_VERSION=\"0.1.0\"\nQT_VERSION=\"6.8.3\"\n"));

  // The Qt part of the AppImage name is kept as it was
  let manifest = project.read("updates.json")?;
  assert!(manifest.contains("/download/v0.1.0/qtedit4-qt6.8.3-v0.1.0-x86_64.AppImage"));

  Ok(())
}

#[test]
fn test_second_run_is_byte_identical() -> Result<()> {
  let project = TestProject::new()?;

  run_bump(&project.path, &["0.1.0", "--qt-version", "6.9.0", "--all"])?;
  let first = project.snapshot()?;
  run_bump(&project.path, &["0.1.0", "--qt-version", "6.9.0", "--all"])?;
  let second = project.snapshot()?;

  assert_eq!(first, second);
  Ok(())
}

#[test]
fn test_all_updates_stable_channel() -> Result<()> {
  let project = TestProject::new()?;

  run_bump(&project.path, &["0.2.0", "--all"])?;
  let manifest: serde_json::Value = serde_json::from_str(&project.read("updates.json")?)?;

  assert_eq!(manifest["updates"]["linux-stable"]["latest-version"], "0.2.0");
  assert_eq!(
    manifest["updates"]["linux-stable"]["open-url"],
    "https://github.com/diegoiast/qtedit4/releases/tag/v0.2.0"
  );
  assert_eq!(manifest["updates"]["linux-testing"]["latest-version"], "0.2.0");
  Ok(())
}

#[test]
fn test_dry_run_shows_diff_and_writes_nothing() -> Result<()> {
  let project = TestProject::new()?;
  let before = project.snapshot()?;

  let output = run_bump(&project.path, &["0.1.0", "--qt-version", "6.9.0", "--dry-run"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("+#define VersionString \"0.1.0\""));
  assert!(stdout.contains("-QT_VERSION=\"6.8.3\""));
  assert!(stdout.contains("Dry-run mode"));
  assert_eq!(project.snapshot()?, before);
  Ok(())
}

#[test]
fn test_report_json_output() -> Result<()> {
  let project = TestProject::new()?;

  let output = run_bump(&project.path, &["0.1.0", "--report-json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(json["current"]["installer"]["version"], "0.0.9");
  assert_eq!(json["updated"]["installer"]["version"], "0.1.0");
  assert_eq!(json["updated"]["manifest"]["channels"][0]["channel"], "linux-testing");
  assert_eq!(json["updated"]["manifest"]["channels"][0]["version"], "0.1.0");
  assert_eq!(json["updated"]["build_sh"]["version"], "6.8.3");
  Ok(())
}

#[test]
fn test_missing_installer_fails_with_system_exit_code() -> Result<()> {
  let project = TestProject::new()?;
  project.remove("setup_script.iss")?;

  let output = run_bump_raw(&project.path, &["0.1.0"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr.contains("setup_script.iss"));
  Ok(())
}

#[test]
fn test_manifest_without_updates_fails() -> Result<()> {
  let project = TestProject::new()?;
  project.write("updates.json", "{\"channels\": {}}")?;

  let output = run_bump_raw(&project.path, &["0.1.0"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("'updates'"));
  Ok(())
}

#[test]
fn test_missing_optional_files_only_reported() -> Result<()> {
  let project = TestProject::new()?;
  project.remove("build.bat")?;
  project.remove(".github/workflows/build.yml")?;

  let output = run_bump(&project.path, &["0.1.0"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains(".github/workflows/build.yml: Qt version not found."));
  assert!(stdout.contains("build.bat: Qt version not found"));
  Ok(())
}

#[test]
fn test_custom_paths_from_flags() -> Result<()> {
  let project = TestProject::new()?;
  project.write("installer/setup.iss", "#define VersionString \"1.0\"\n")?;

  run_bump(&project.path, &["1.1", "--iss", "installer/setup.iss"])?;

  assert_eq!(project.read("installer/setup.iss")?, "#define VersionString \"1.1\"\n");
  // The default installer path was not used
  assert!(project.read("setup_script.iss")?.contains("\"0.0.9\""));
  Ok(())
}

#[test]
fn test_config_file_changes_channel_filter() -> Result<()> {
  let project = TestProject::new()?;
  project.write("bump.toml", "[manifest]\nchannel_filter = \"stable\"\n")?;

  run_bump(&project.path, &["0.3.0"])?;
  let manifest: serde_json::Value = serde_json::from_str(&project.read("updates.json")?)?;

  assert_eq!(manifest["updates"]["linux-stable"]["latest-version"], "0.3.0");
  assert_eq!(manifest["updates"]["linux-testing"]["latest-version"], "0.0.9");
  Ok(())
}

#[test]
fn test_invalid_config_fails() -> Result<()> {
  let project = TestProject::new()?;
  project.write("bump.toml", "[paths]\nunknown = \"x\"\n")?;

  let output = run_bump_raw(&project.path, &[])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("bump.toml"));
  Ok(())
}
