//! The "Current Versions" / "Updated Versions" snapshot
//!
//! The installer, source and manifest must be readable. The three files that
//! carry the Qt version are optional and show up as "not found" when absent.

use crate::core::config::TargetPaths;
use crate::core::error::BumpResult;
use crate::targets::build_bat::BuildBat;
use crate::targets::build_sh::BuildSh;
use crate::targets::installer::Installer;
use crate::targets::manifest::Manifest;
use crate::targets::source::Source;
use crate::targets::workflow::Workflow;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A single version read from one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileVersion {
  pub path: PathBuf,
  pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelVersion {
  pub channel: String,
  pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestVersions {
  pub path: PathBuf,
  pub channels: Vec<ChannelVersion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowVersions {
  pub path: PathBuf,
  pub qt_versions: Option<Vec<String>>,
}

/// Versions found across every artifact at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionReport {
  pub title: String,
  pub installer: FileVersion,
  pub source: FileVersion,
  pub manifest: ManifestVersions,
  pub workflow: WorkflowVersions,
  pub build_sh: FileVersion,
  pub build_bat: FileVersion,
}

impl VersionReport {
  pub fn collect(title: &str, paths: &TargetPaths) -> BumpResult<Self> {
    let installer = Installer::new(&paths.iss).read_version()?;
    let source = Source::new(&paths.cpp).read_version()?;
    let channels = Manifest::read(&paths.manifest)?
      .channel_versions()?
      .into_iter()
      .map(|(channel, version)| ChannelVersion { channel, version })
      .collect();

    Ok(Self {
      title: title.to_string(),
      installer: FileVersion {
        path: paths.iss.clone(),
        version: installer,
      },
      source: FileVersion {
        path: paths.cpp.clone(),
        version: source,
      },
      manifest: ManifestVersions {
        path: paths.manifest.clone(),
        channels,
      },
      workflow: WorkflowVersions {
        path: paths.workflow.clone(),
        qt_versions: Workflow::new(&paths.workflow).read_qt_versions()?,
      },
      build_sh: FileVersion {
        path: paths.build_sh.clone(),
        version: BuildSh::new(&paths.build_sh).read_qt_version()?,
      },
      build_bat: FileVersion {
        path: paths.build_bat.clone(),
        version: BuildBat::new(&paths.build_bat).read_qt_version()?,
      },
    })
  }
}

impl fmt::Display for VersionReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{:-^40}", self.title)?;

    for file in [&self.installer, &self.source] {
      writeln!(
        f,
        "{}: {}",
        file.path.display(),
        file.version.as_deref().unwrap_or("not found")
      )?;
    }

    writeln!(f, "{}:", self.manifest.path.display())?;
    for channel in &self.manifest.channels {
      writeln!(f, "  {}: {}", channel.channel, channel.version)?;
    }

    match &self.workflow.qt_versions {
      Some(versions) if !versions.is_empty() => {
        writeln!(f, "{}:", self.workflow.path.display())?;
        for version in versions {
          writeln!(f, "  Qt: {}", version)?;
        }
      }
      _ => writeln!(f, "{}: Qt version not found.", self.workflow.path.display())?,
    }

    for file in [&self.build_sh, &self.build_bat] {
      writeln!(
        f,
        "{}: Qt {}",
        file.path.display(),
        file.version.as_deref().unwrap_or("version not found")
      )?;
    }

    Ok(())
  }
}
