//! C++ entry point (`src/main.cpp`)
//!
//! The runtime version is set with
//! `QCoreApplication::setApplicationVersion("0.1.2")`.

use super::{BumpRequest, VersionTarget, quoted_value, replace_quoted};
use crate::core::error::BumpResult;
use crate::core::text::{FileEdit, TextFile};
use regex::Regex;
use std::path::{Path, PathBuf};

const SET_VERSION_PATTERN: &str = r#"(QCoreApplication::setApplicationVersion\(")([^"]+)("\))"#;

pub struct Source {
  path: PathBuf,
}

impl Source {
  pub fn new(path: &Path) -> Self {
    Self { path: path.to_path_buf() }
  }

  pub fn read_version(&self) -> BumpResult<Option<String>> {
    let file = TextFile::read(&self.path)?;
    version(&file.content)
  }
}

pub fn version(content: &str) -> BumpResult<Option<String>> {
  let re = Regex::new(SET_VERSION_PATTERN)?;
  Ok(quoted_value(&re, content))
}

pub fn patch(content: &str, new_version: &str) -> BumpResult<(String, usize)> {
  let re = Regex::new(SET_VERSION_PATTERN)?;
  Ok(replace_quoted(&re, content, new_version))
}

impl VersionTarget for Source {
  fn label(&self) -> &'static str {
    "source"
  }

  fn path(&self) -> &Path {
    &self.path
  }

  fn plan(&self, request: &BumpRequest) -> BumpResult<Option<FileEdit>> {
    let file = TextFile::read(&self.path)?;
    let (patched, count) = patch(&file.content, &request.app_version)?;
    if count == 0 {
      log::warn!("no setApplicationVersion call found in {}", self.path.display());
    }
    Ok(Some(file.edit(&patched)))
  }
}
