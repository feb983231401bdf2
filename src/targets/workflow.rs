//! CI workflow (`.github/workflows/build.yml`)
//!
//! The build matrix lists the Qt versions to build against:
//!
//! ```yaml
//! strategy:
//!   matrix:
//!     qt_version:
//!       - "6.8.3"
//! ```
//!
//! The YAML is not parsed; the list is located and rewritten textually so the
//! rest of the file keeps its exact formatting.

use super::{BumpRequest, VersionTarget};
use crate::core::error::BumpResult;
use crate::core::text::{FileEdit, TextFile};
use regex::Regex;
use std::path::{Path, PathBuf};

const LIST_PATTERN: &str = r#"qt_version:\s*\n(?:\s*-\s*"[0-9.]+"\s*\n)+"#;

pub struct Workflow {
  path: PathBuf,
}

impl Workflow {
  pub fn new(path: &Path) -> Self {
    Self { path: path.to_path_buf() }
  }

  /// Versions in the first `qt_version:` list; `None` if the file or list is missing
  pub fn read_qt_versions(&self) -> BumpResult<Option<Vec<String>>> {
    match TextFile::read_optional(&self.path)? {
      Some(file) => qt_versions(&file.content),
      None => Ok(None),
    }
  }
}

pub fn qt_versions(content: &str) -> BumpResult<Option<Vec<String>>> {
  let block = Regex::new(r#"qt_version:\s*\n((?:\s*-\s*"[0-9.]+"\s*\n?)+)"#)?;
  let quoted = Regex::new(r#""([\d.]+)""#)?;

  Ok(block.captures(content).map(|caps| {
    quoted
      .captures_iter(&caps[1])
      .map(|c| c[1].to_string())
      .collect()
  }))
}

/// Collapse every `qt_version:` list to the single entry `qt_version`
///
/// The new entry takes the indentation of the first entry it replaces.
pub fn patch(content: &str, qt_version: &str) -> BumpResult<(String, usize)> {
  let list = Regex::new(LIST_PATTERN)?;
  let indent = Regex::new(r"(?m)^([ \t]*)-")?;

  let count = list.find_iter(content).count();
  let patched = list
    .replace_all(content, |caps: &regex::Captures<'_>| {
      let pad = indent
        .captures(&caps[0])
        .and_then(|c| c.get(1))
        .map_or("", |m| m.as_str());
      format!("qt_version:\n{}- \"{}\"\n", pad, qt_version)
    })
    .into_owned();

  Ok((patched, count))
}

impl VersionTarget for Workflow {
  fn label(&self) -> &'static str {
    "workflow"
  }

  fn path(&self) -> &Path {
    &self.path
  }

  fn plan(&self, request: &BumpRequest) -> BumpResult<Option<FileEdit>> {
    let Some(qt) = request.qt_version.as_deref() else {
      return Ok(None);
    };
    let file = TextFile::read(&self.path)?;
    let (patched, count) = patch(&file.content, qt)?;
    if count == 0 {
      log::warn!("no qt_version list found in {}", self.path.display());
    }
    Ok(Some(file.edit(&patched)))
  }
}
