//! Versioned artifacts and how each one is patched
//!
//! Every target exposes a pure `patch` over LF-normalized text, a reader used by
//! the version report, and a [`VersionTarget`] impl that turns a [`BumpRequest`]
//! into a pending [`FileEdit`]. Targets are run one after another in the order
//! returned by [`release_targets`].

use crate::core::config::{ManifestConfig, TargetPaths};
use crate::core::error::BumpResult;
use crate::core::text::FileEdit;
use regex::Regex;
use std::path::Path;

pub mod build_bat;
pub mod build_sh;
pub mod installer;
pub mod manifest;
pub mod source;
pub mod workflow;

/// What a single run is asked to change
#[derive(Debug, Clone)]
pub struct BumpRequest {
  /// New application version
  pub app_version: String,
  /// New Qt version; Qt-only targets are left alone without it
  pub qt_version: Option<String>,
  /// Update every manifest channel instead of only the filtered ones
  pub all_channels: bool,
  pub manifest: ManifestConfig,
}

/// A file that carries a version string
pub trait VersionTarget {
  /// Short name used in log lines
  fn label(&self) -> &'static str;

  fn path(&self) -> &Path;

  /// Compute the rewrite for `request`, or `None` when this target has nothing to do
  fn plan(&self, request: &BumpRequest) -> BumpResult<Option<FileEdit>>;
}

/// Targets in patch order: installer, source, manifest, build.sh, build.bat, workflow
pub fn release_targets(paths: &TargetPaths) -> Vec<Box<dyn VersionTarget>> {
  vec![
    Box::new(installer::Installer::new(&paths.iss)),
    Box::new(source::Source::new(&paths.cpp)),
    Box::new(manifest::UpdateManifest::new(&paths.manifest)),
    Box::new(build_sh::BuildSh::new(&paths.build_sh)),
    Box::new(build_bat::BuildBat::new(&paths.build_bat)),
    Box::new(workflow::Workflow::new(&paths.workflow)),
  ]
}

/// Replace the middle group of a three-group pattern everywhere it matches
///
/// The closure form keeps `$` in versions from being read as a group reference.
pub(crate) fn replace_quoted(re: &Regex, content: &str, value: &str) -> (String, usize) {
  let count = re.find_iter(content).count();
  let replaced = re
    .replace_all(content, |caps: &regex::Captures<'_>| format!("{}{}{}", &caps[1], value, &caps[3]))
    .into_owned();
  (replaced, count)
}

/// Middle group of the first match of a three-group pattern
pub(crate) fn quoted_value(re: &Regex, content: &str) -> Option<String> {
  re.captures(content).map(|caps| caps[2].to_string())
}

/// First group of the first match
pub(crate) fn first_capture(re: &Regex, content: &str) -> Option<String> {
  re.captures(content)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str().to_string())
}
