//! System git backend
//!
//! Shells out to the `git` binary found on PATH. Only what a version bump
//! needs: locating the repository and staging files.

use crate::core::error::{BumpError, BumpResult, GitError, ResultExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Git backend using system git
pub struct SystemGit {
  /// Directory git commands run from
  pub(crate) repo_path: PathBuf,

  /// Working tree root
  pub(crate) work_tree: PathBuf,
}

impl SystemGit {
  /// Open the git repository containing `path`
  pub fn open(path: &Path) -> BumpResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(BumpError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(BumpError::Git(GitError::CommandFailed {
        command: "git rev-parse --show-toplevel".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();
    log::debug!("git work tree: {}", work_tree);

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  pub fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  /// Stage `paths` (relative to the directory the repo was opened from)
  pub fn add(&self, paths: &[&Path]) -> BumpResult<()> {
    if paths.is_empty() {
      return Ok(());
    }

    let output = self
      .git_cmd()
      .arg("add")
      .arg("--")
      .args(paths)
      .output()
      .context("Failed to execute git add")?;

    if !output.status.success() {
      let names: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
      return Err(BumpError::Git(GitError::CommandFailed {
        command: format!("git add {}", names.join(" ")),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }

    Ok(())
  }

  /// Create a git command with an isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false");

    cmd
  }
}
