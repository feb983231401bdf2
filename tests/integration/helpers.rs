//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const ISS: &str = "#define AppName \"qtedit4\"\r\n#define VersionString \"0.0.9\"\r\n\r\n[Setup]\r\nAppVersion={#VersionString}\r\n";

pub const CPP: &str = r#"#include <QApplication>

int main(int argc, char *argv[]) {
    QApplication app(argc, argv);
    QCoreApplication::setApplicationName("qtedit4");
    QCoreApplication::setApplicationVersion("0.0.9");
    return app.exec();
}
"#;

pub const MANIFEST: &str = r#"{
    "updates": {
        "linux-testing": {
            "latest-version": "0.0.9",
            "open-url": "https://github.com/diegoiast/qtedit4/releases/tag/v0.0.9",
            "download-url": "https://github.com/diegoiast/qtedit4/releases/download/v0.0.9/qtedit4-qt6.8.3-v0.0.9-x86_64.AppImage"
        },
        "linux-stable": {
            "latest-version": "0.0.8",
            "open-url": "https://github.com/diegoiast/qtedit4/releases/tag/v0.0.8"
        }
    }
}"#;

pub const BUILD_SH: &str = "#!/bin/sh\nset -e\n\nAPP_VERSION=\"0.0.9\"\nQT_VERSION=\"6.8.3\"\n\necho \"building $APP_VERSION with Qt $QT_VERSION\"\n";

pub const BUILD_BAT: &str = "@echo off\r\nSET PATH=c:\\Qt\\6.8.3\\mingw_64\\bin;c:\\Qt\\Tools\\mingw1310_64\\bin;%PATH%\r\ncmake --build build\r\n";

pub const WORKFLOW: &str = r#"name: Build
on: [push]
jobs:
  build:
    strategy:
      matrix:
        qt_version:
          - "6.8.3"
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
"#;

/// A throwaway project laid out like a real release checkout
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestProject {
  /// Every artifact present, no git repository
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    let project = Self { _root: root, path };

    project.write("setup_script.iss", ISS)?;
    project.write("src/main.cpp", CPP)?;
    project.write("updates.json", MANIFEST)?;
    project.write("build.sh", BUILD_SH)?;
    project.write("build.bat", BUILD_BAT)?;
    project.write(".github/workflows/build.yml", WORKFLOW)?;

    Ok(project)
  }

  /// Same as `new`, inside a fresh git repository with everything committed
  pub fn with_git() -> Result<Self> {
    let project = Self::new()?;
    git(&project.path, &["init", "--initial-branch=main"])?;
    git(&project.path, &["config", "user.name", "Test User"])?;
    git(&project.path, &["config", "user.email", "test@example.com"])?;
    git(&project.path, &["add", "."])?;
    git(&project.path, &["commit", "-m", "Initial project"])?;
    Ok(project)
  }

  pub fn write(&self, rel: &str, content: &str) -> Result<()> {
    let file = self.path.join(rel);
    if let Some(parent) = file.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file, content).with_context(|| format!("Failed to write {}", rel))?;
    Ok(())
  }

  /// Read a file as raw text, line endings untouched
  pub fn read(&self, rel: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(rel))?)
  }

  pub fn remove(&self, rel: &str) -> Result<()> {
    Ok(std::fs::remove_file(self.path.join(rel))?)
  }

  /// Snapshot every artifact, for byte-for-byte comparisons
  pub fn snapshot(&self) -> Result<Vec<String>> {
    [
      "setup_script.iss",
      "src/main.cpp",
      "updates.json",
      "build.sh",
      "build.bat",
      ".github/workflows/build.yml",
    ]
    .iter()
    .map(|rel| self.read(rel))
    .collect()
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run bump-version and return its output whatever the exit status
pub fn run_bump_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_bump-version");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run bump-version")
}

/// Run bump-version and fail unless it exits successfully
pub fn run_bump(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_bump_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "bump-version failed: bump-version {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
