use crate::core::error::{BumpError, BumpResult, ConfigError, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for bump-version
/// Searched in order: bump.toml, .bump.toml, .config/bump.toml
///
/// Every field is optional. Command-line flags win over the file, and the file
/// wins over the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BumpConfig {
  #[serde(default)]
  pub paths: PathsConfig,
  #[serde(default)]
  pub manifest: ManifestConfig,
}

/// Where each versioned artifact lives, relative to the working directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
  #[serde(default)]
  pub iss: Option<PathBuf>,
  #[serde(default)]
  pub cpp: Option<PathBuf>,
  #[serde(default)]
  pub manifest: Option<PathBuf>,
  #[serde(default)]
  pub build_sh: Option<PathBuf>,
  #[serde(default)]
  pub build_bat: Option<PathBuf>,
  #[serde(default)]
  pub workflow: Option<PathBuf>,
}

/// Update manifest settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestConfig {
  /// Channels whose name contains this are updated when `--all` is not given
  #[serde(default = "default_channel_filter")]
  pub channel_filter: String,

  /// File name prefix of the AppImage in `download-url` (`<artifact>-qt<qt>-v<version>-x86_64`)
  #[serde(default = "default_artifact")]
  pub artifact: String,
}

fn default_channel_filter() -> String {
  "testing".to_string()
}

fn default_artifact() -> String {
  "qtedit4".to_string()
}

impl Default for ManifestConfig {
  fn default() -> Self {
    Self {
      channel_filter: default_channel_filter(),
      artifact: default_artifact(),
    }
  }
}

/// Fully resolved artifact locations for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetPaths {
  pub iss: PathBuf,
  pub cpp: PathBuf,
  pub manifest: PathBuf,
  pub build_sh: PathBuf,
  pub build_bat: PathBuf,
  pub workflow: PathBuf,
}

impl Default for TargetPaths {
  fn default() -> Self {
    Self {
      iss: PathBuf::from("setup_script.iss"),
      cpp: PathBuf::from("src/main.cpp"),
      manifest: PathBuf::from("updates.json"),
      build_sh: PathBuf::from("build.sh"),
      build_bat: PathBuf::from("build.bat"),
      workflow: PathBuf::from(".github/workflows/build.yml"),
    }
  }
}

impl TargetPaths {
  /// Layer config file values and then CLI overrides over the defaults
  pub fn resolve(config: &PathsConfig, overrides: &PathsConfig) -> Self {
    let defaults = Self::default();
    let pick = |cli: &Option<PathBuf>, file: &Option<PathBuf>, default: PathBuf| {
      cli.clone().or_else(|| file.clone()).unwrap_or(default)
    };

    Self {
      iss: pick(&overrides.iss, &config.iss, defaults.iss),
      cpp: pick(&overrides.cpp, &config.cpp, defaults.cpp),
      manifest: pick(&overrides.manifest, &config.manifest, defaults.manifest),
      build_sh: pick(&overrides.build_sh, &config.build_sh, defaults.build_sh),
      build_bat: pick(&overrides.build_bat, &config.build_bat, defaults.build_bat),
      workflow: pick(&overrides.workflow, &config.workflow, defaults.workflow),
    }
  }

  /// All paths in the order they are patched
  pub fn all(&self) -> [&Path; 6] {
    [
      self.iss.as_path(),
      self.cpp.as_path(),
      self.manifest.as_path(),
      self.build_sh.as_path(),
      self.build_bat.as_path(),
      self.workflow.as_path(),
    ]
  }
}

impl BumpConfig {
  /// Find config file in search order: bump.toml, .bump.toml, .config/bump.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("bump.toml"),
      path.join(".bump.toml"),
      path.join(".config").join("bump.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config if one exists, otherwise fall back to defaults
  pub fn load_or_default(path: &Path) -> BumpResult<Self> {
    match Self::find_config_path(path) {
      Some(config_path) => Self::load_from(&config_path),
      None => {
        log::debug!("no bump.toml under {}, using defaults", path.display());
        Ok(Self::default())
      }
    }
  }

  /// Load and validate a specific config file
  pub fn load_from(config_path: &Path) -> BumpResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: BumpConfig = toml_edit::de::from_str(&content).map_err(|e| {
      BumpError::Config(ConfigError::Invalid {
        path: config_path.to_path_buf(),
        reason: e.to_string(),
      })
    })?;

    config.manifest.validate().map_err(|reason| {
      BumpError::Config(ConfigError::Invalid {
        path: config_path.to_path_buf(),
        reason,
      })
    })?;

    log::debug!("loaded config from {}", config_path.display());
    Ok(config)
  }
}

impl ManifestConfig {
  fn validate(&self) -> Result<(), String> {
    if self.artifact.trim().is_empty() {
      return Err("manifest.artifact must not be empty".to_string());
    }
    Ok(())
  }
}
