//! AppImage build script (`build.sh`)
//!
//! Carries both the app version and the Qt toolchain version as plain shell
//! assignments:
//!
//! ```sh
//! APP_VERSION="0.1.2"
//! QT_VERSION="6.8.3"
//! ```

use super::{BumpRequest, VersionTarget, first_capture};
use crate::core::error::BumpResult;
use crate::core::text::{self, FileEdit, TextFile};
use regex::Regex;
use std::path::{Path, PathBuf};

const APP_VERSION: &str = "APP_VERSION=";
const QT_VERSION: &str = "QT_VERSION=";

pub struct BuildSh {
  path: PathBuf,
}

impl BuildSh {
  pub fn new(path: &Path) -> Self {
    Self { path: path.to_path_buf() }
  }

  /// Qt version from the first unindented `QT_VERSION="..."` line; `None` if the file is absent
  pub fn read_qt_version(&self) -> BumpResult<Option<String>> {
    match TextFile::read_optional(&self.path)? {
      Some(file) => qt_version(&file.content),
      None => Ok(None),
    }
  }
}

pub fn qt_version(content: &str) -> BumpResult<Option<String>> {
  let re = Regex::new(r#"(?m)^QT_VERSION="([^"]+)""#)?;
  Ok(first_capture(&re, content))
}

/// Rewrite `APP_VERSION=` and `QT_VERSION=` assignment lines
///
/// Each assignment is matched on its trimmed text and replaced whole, keeping
/// only its indentation. A `None` version leaves that assignment untouched.
pub fn patch(content: &str, app_version: Option<&str>, qt_version: Option<&str>) -> String {
  let lines: Vec<String> = text::lines(content)
    .into_iter()
    .map(|line| {
      let trimmed = line.trim_start();
      let indent = &line[..line.len() - trimmed.len()];
      match (app_version, qt_version) {
        (Some(app), _) if trimmed.starts_with(APP_VERSION) => {
          format!("{}{}\"{}\"", indent, APP_VERSION, app)
        }
        (_, Some(qt)) if trimmed.starts_with(QT_VERSION) => {
          format!("{}{}\"{}\"", indent, QT_VERSION, qt)
        }
        _ => line.to_string(),
      }
    })
    .collect();

  text::join_lines(&lines)
}

impl VersionTarget for BuildSh {
  fn label(&self) -> &'static str {
    "build.sh"
  }

  fn path(&self) -> &Path {
    &self.path
  }

  fn plan(&self, request: &BumpRequest) -> BumpResult<Option<FileEdit>> {
    let file = TextFile::read(&self.path)?;
    let patched = patch(
      &file.content,
      Some(request.app_version.as_str()),
      request.qt_version.as_deref(),
    );
    Ok(Some(file.edit(&patched)))
  }
}
