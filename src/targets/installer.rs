//! Windows installer script (`setup_script.iss`)
//!
//! The app version lives in a preprocessor define:
//! `#define VersionString "0.1.2"`.

use super::{BumpRequest, VersionTarget, quoted_value, replace_quoted};
use crate::core::error::BumpResult;
use crate::core::text::{FileEdit, TextFile};
use regex::Regex;
use std::path::{Path, PathBuf};

const DEFINE_PATTERN: &str = r#"(#define\s+VersionString\s+")([^"]+)(")"#;

pub struct Installer {
  path: PathBuf,
}

impl Installer {
  pub fn new(path: &Path) -> Self {
    Self { path: path.to_path_buf() }
  }

  /// Version in the `VersionString` define, if there is one
  pub fn read_version(&self) -> BumpResult<Option<String>> {
    let file = TextFile::read(&self.path)?;
    version(&file.content)
  }
}

pub fn version(content: &str) -> BumpResult<Option<String>> {
  let re = Regex::new(DEFINE_PATTERN)?;
  Ok(quoted_value(&re, content))
}

/// Point every `VersionString` define at `new_version`
pub fn patch(content: &str, new_version: &str) -> BumpResult<(String, usize)> {
  let re = Regex::new(DEFINE_PATTERN)?;
  Ok(replace_quoted(&re, content, new_version))
}

impl VersionTarget for Installer {
  fn label(&self) -> &'static str {
    "installer"
  }

  fn path(&self) -> &Path {
    &self.path
  }

  fn plan(&self, request: &BumpRequest) -> BumpResult<Option<FileEdit>> {
    let file = TextFile::read(&self.path)?;
    let (patched, count) = patch(&file.content, &request.app_version)?;
    if count == 0 {
      log::warn!("no VersionString define found in {}", self.path.display());
    }
    Ok(Some(file.edit(&patched)))
  }
}
