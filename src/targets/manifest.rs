//! Update manifest (`updates.json`)
//!
//! ```json
//! {
//!     "updates": {
//!         "linux-testing": {
//!             "latest-version": "0.1.0",
//!             "open-url": "https://github.com/o/r/releases/tag/v0.1.0",
//!             "download-url": "https://github.com/o/r/releases/download/v0.1.0/qtedit4-qt6.8.3-v0.1.0-x86_64.AppImage"
//!         }
//!     }
//! }
//! ```
//!
//! Unlike the other targets this one is parsed and re-serialized. Keys keep
//! their order (serde_json `preserve_order`), output uses four-space indents
//! with no trailing newline, and the file's line ending is kept.

use super::{BumpRequest, VersionTarget};
use crate::core::config::ManifestConfig;
use crate::core::error::{BumpError, BumpResult, PatternError};
use crate::core::text::{FileEdit, TextFile};
use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

const UPDATES: &str = "updates";
const LATEST_VERSION: &str = "latest-version";
const OPEN_URL: &str = "open-url";
const DOWNLOAD_URL: &str = "download-url";

/// Typed view of one channel record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
  pub latest_version: String,
  pub open_url: Option<String>,
  pub download_url: Option<String>,
}

/// Scalars are shown as written; numbers keep their literal text
fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

/// A parsed manifest together with the file it came from
#[derive(Debug, Clone)]
pub struct Manifest {
  file: TextFile,
  data: Value,
}

impl Manifest {
  pub fn read(path: &Path) -> BumpResult<Self> {
    Self::parse(TextFile::read(path)?)
  }

  pub fn parse(file: TextFile) -> BumpResult<Self> {
    let data: Value = serde_json::from_str(&file.content).map_err(|e| {
      BumpError::message(format!("Failed to parse {}", file.path.display())).context(format!("JSON error: {}", e))
    })?;
    Ok(Self { file, data })
  }

  fn missing(&self, field: impl Into<String>) -> BumpError {
    BumpError::Pattern(PatternError::MissingField {
      path: self.file.path.clone(),
      field: field.into(),
    })
  }

  fn updates(&self) -> BumpResult<&Map<String, Value>> {
    self
      .data
      .get(UPDATES)
      .and_then(Value::as_object)
      .ok_or_else(|| self.missing(UPDATES))
  }

  /// Every channel in file order
  pub fn channels(&self) -> BumpResult<Vec<(String, Channel)>> {
    self
      .updates()?
      .iter()
      .map(|(name, value)| -> BumpResult<(String, Channel)> {
        let field = format!("{}.{}", name, LATEST_VERSION);
        let raw = value.get(LATEST_VERSION).ok_or_else(|| self.missing(field.clone()))?;
        let latest_version = scalar_text(raw).ok_or_else(|| {
          BumpError::message(format!("'{}' in {} must be a string or number", field, self.file.path.display()))
        })?;
        let url = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        let channel = Channel {
          latest_version,
          open_url: url(OPEN_URL),
          download_url: url(DOWNLOAD_URL),
        };
        Ok((name.clone(), channel))
      })
      .collect()
  }

  /// Channel name to `latest-version`, in file order
  pub fn channel_versions(&self) -> BumpResult<Vec<(String, String)>> {
    Ok(
      self
        .channels()?
        .into_iter()
        .map(|(name, channel)| (name, channel.latest_version))
        .collect(),
    )
  }

  /// Move the selected channels to `new_version`, returning the names touched
  ///
  /// Without `all`, only channels whose name contains the configured filter are
  /// updated. URLs are rewritten so they point at the same version as
  /// `latest-version`.
  pub fn update(
    &mut self,
    new_version: &str,
    all: bool,
    qt_version: Option<&str>,
    config: &ManifestConfig,
  ) -> BumpResult<Vec<String>> {
    let rewriter = UrlRewriter::new(&config.artifact)?;
    let names: Vec<String> = self
      .updates()?
      .keys()
      .filter(|name| all || name.contains(config.channel_filter.as_str()))
      .cloned()
      .collect();

    let path = self.file.path.clone();
    let updates = self
      .data
      .get_mut(UPDATES)
      .and_then(Value::as_object_mut)
      .ok_or_else(|| {
        BumpError::Pattern(PatternError::MissingField {
          path: path.clone(),
          field: UPDATES.to_string(),
        })
      })?;

    for name in &names {
      let channel = updates.get_mut(name).and_then(Value::as_object_mut).ok_or_else(|| {
        BumpError::Pattern(PatternError::MissingField {
          path: path.clone(),
          field: format!("{}.{}", name, LATEST_VERSION),
        })
      })?;

      channel.insert(LATEST_VERSION.to_string(), Value::String(new_version.to_string()));

      if let Some(Value::String(url)) = channel.get_mut(OPEN_URL) {
        *url = rewriter.open_url(url, new_version);
      }
      if let Some(Value::String(url)) = channel.get_mut(DOWNLOAD_URL) {
        *url = rewriter.download_url(url, new_version, qt_version);
      }
      log::debug!("{}: channel '{}' -> {}", path.display(), name, new_version);
    }

    if names.is_empty() {
      log::warn!(
        "no channel in {} matches '{}'; use --all to update every channel",
        path.display(),
        config.channel_filter
      );
    }

    Ok(names)
  }

  /// Pretty JSON with `\n` line endings
  pub fn to_pretty(&self) -> BumpResult<String> {
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    self.data.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
  }

  /// Pending rewrite of the file with the current data
  pub fn edit(&self) -> BumpResult<FileEdit> {
    Ok(self.file.edit(&self.to_pretty()?))
  }
}

/// Regexes for the version-bearing parts of release URLs
struct UrlRewriter {
  tag: Regex,
  download: Regex,
  artifact_re: Regex,
  artifact: String,
}

impl UrlRewriter {
  fn new(artifact: &str) -> BumpResult<Self> {
    Ok(Self {
      tag: Regex::new(r"/tag/v[\w.\-]+")?,
      download: Regex::new(r"/download/v[\w.\-]+/")?,
      artifact_re: Regex::new(&format!(r"{}-qt([\d.]+)-v[\w.\-]+-x86_64", regex::escape(artifact)))?,
      artifact: artifact.to_string(),
    })
  }

  fn open_url(&self, url: &str, version: &str) -> String {
    self
      .tag
      .replace_all(url, regex::NoExpand(&format!("/tag/v{}", version)))
      .into_owned()
  }

  /// When no Qt version is given, the one already in the file name is kept
  fn download_url(&self, url: &str, version: &str, qt_version: Option<&str>) -> String {
    let url = self
      .download
      .replace_all(url, regex::NoExpand(&format!("/download/v{}/", version)))
      .into_owned();
    self
      .artifact_re
      .replace_all(&url, |caps: &regex::Captures<'_>| {
        let qt = qt_version.unwrap_or(&caps[1]);
        format!("{}-qt{}-v{}-x86_64", self.artifact, qt, version)
      })
      .into_owned()
  }
}

/// The manifest as a release target
pub struct UpdateManifest {
  path: PathBuf,
}

impl UpdateManifest {
  pub fn new(path: &Path) -> Self {
    Self { path: path.to_path_buf() }
  }
}

impl VersionTarget for UpdateManifest {
  fn label(&self) -> &'static str {
    "manifest"
  }

  fn path(&self) -> &Path {
    &self.path
  }

  fn plan(&self, request: &BumpRequest) -> BumpResult<Option<FileEdit>> {
    let mut manifest = Manifest::read(&self.path)?;
    manifest.update(
      &request.app_version,
      request.all_channels,
      request.qt_version.as_deref(),
      &request.manifest,
    )?;
    Ok(Some(manifest.edit()?))
  }
}

/// Re-serialize the manifest without changing any value
pub fn reformat(path: &Path) -> BumpResult<FileEdit> {
  Manifest::read(path)?.edit()
}
