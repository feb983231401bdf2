//! Windows build script (`build.bat`)
//!
//! Only the Qt version appears here, inside `SET PATH=` lines such as
//! `SET PATH=c:\Qt\6.8.3\mingw_64\bin;c:\Qt\Tools\mingw1310_64\bin;%PATH%`.
//! Batch files are case-insensitive, so both the command and the drive path are
//! matched without regard to case.

use super::{BumpRequest, VersionTarget, first_capture};
use crate::core::error::BumpResult;
use crate::core::text::{self, FileEdit, TextFile};
use regex::Regex;
use std::path::{Path, PathBuf};

const SET_PATH: &str = "SET PATH=";

pub struct BuildBat {
  path: PathBuf,
}

impl BuildBat {
  pub fn new(path: &Path) -> Self {
    Self { path: path.to_path_buf() }
  }

  pub fn read_qt_version(&self) -> BumpResult<Option<String>> {
    match TextFile::read_optional(&self.path)? {
      Some(file) => qt_version(&file.content),
      None => Ok(None),
    }
  }
}

pub fn qt_version(content: &str) -> BumpResult<Option<String>> {
  let re = Regex::new(r"(?i)c:\\Qt\\([\d.]+)\\")?;
  Ok(first_capture(&re, content))
}

fn is_set_path(line: &str) -> bool {
  line
    .trim_start()
    .get(..SET_PATH.len())
    .is_some_and(|head| head.eq_ignore_ascii_case(SET_PATH))
}

/// Swap the Qt version in every `c:\Qt\<ver>\<kit>` segment of `SET PATH=` lines
///
/// Segments without a kit directory after the version (`c:\Qt\Tools\...`) are
/// not versioned and stay as they are.
pub fn patch(content: &str, qt_version: &str) -> BumpResult<String> {
  let re = Regex::new(r"(?i)(c:\\Qt\\)([\d.]+)(\\[^;\\]+)")?;
  let lines: Vec<String> = text::lines(content)
    .into_iter()
    .map(|line| {
      if is_set_path(line) {
        super::replace_quoted(&re, line, qt_version).0
      } else {
        line.to_string()
      }
    })
    .collect();

  Ok(text::join_lines(&lines))
}

impl VersionTarget for BuildBat {
  fn label(&self) -> &'static str {
    "build.bat"
  }

  fn path(&self) -> &Path {
    &self.path
  }

  fn plan(&self, request: &BumpRequest) -> BumpResult<Option<FileEdit>> {
    let Some(qt) = request.qt_version.as_deref() else {
      return Ok(None);
    };
    let file = TextFile::read(&self.path)?;
    let patched = patch(&file.content, qt)?;
    Ok(Some(file.edit(&patched)))
  }
}
