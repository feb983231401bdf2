//! The version bump itself
//!
//! 1. Report current versions
//! 2. Patch installer, source, manifest, build.sh, build.bat, workflow (in that order)
//! 3. Report updated versions
//! 4. Optionally stage everything in git (best effort)

use crate::core::config::{ManifestConfig, TargetPaths};
use crate::core::error::{BumpError, BumpResult};
use crate::core::vcs::SystemGit;
use crate::report::VersionReport;
use crate::targets::{BumpRequest, release_targets};
use crate::ui::diff;
use serde::Serialize;
use std::path::Path;

/// Everything a bump run needs, already merged from CLI and bump.toml
#[derive(Debug, Clone)]
pub struct BumpOptions {
  pub new_version: Option<String>,
  pub qt_version: Option<String>,
  pub all_channels: bool,
  pub git: bool,
  pub dry_run: bool,
  pub json: bool,
  pub paths: TargetPaths,
  pub manifest: ManifestConfig,
}

#[derive(Serialize)]
struct JsonOutput {
  current: VersionReport,
  updated: Option<VersionReport>,
}

pub fn run_bump(opts: BumpOptions) -> BumpResult<()> {
  let current = VersionReport::collect("Current Versions", &opts.paths)?;
  if !opts.json {
    print!("{}", current);
  }

  let Some(new_version) = opts.new_version.clone() else {
    if opts.json {
      print_json(current, None)?;
    }
    return Ok(());
  };

  let request = BumpRequest {
    app_version: new_version,
    qt_version: opts.qt_version.clone(),
    all_channels: opts.all_channels,
    manifest: opts.manifest.clone(),
  };

  if !opts.json {
    println!();
  }
  for target in release_targets(&opts.paths) {
    let Some(edit) = target.plan(&request)? else {
      log::debug!("{}: nothing to do without a Qt version", target.label());
      continue;
    };

    if opts.dry_run {
      if !opts.json {
        diff::print_edit(&edit);
      }
      continue;
    }

    edit.apply()?;
    if opts.json {
      log::info!("updated {}", target.path().display());
    } else if edit.is_noop() {
      println!("   {} already up to date", target.path().display());
    } else {
      println!("📝 Updated {} ({})", target.path().display(), target.label());
    }
  }

  if opts.dry_run {
    if opts.json {
      print_json(current, None)?;
    } else {
      println!();
      println!("🔍 Dry-run mode (no changes applied)");
    }
    return Ok(());
  }

  let updated = VersionReport::collect("Updated Versions", &opts.paths)?;
  if opts.json {
    print_json(current, Some(updated))?;
  } else {
    print!("{}", updated);
  }

  if opts.git {
    stage(&opts.paths, opts.json);
  }

  Ok(())
}

fn print_json(current: VersionReport, updated: Option<VersionReport>) -> BumpResult<()> {
  let output = JsonOutput { current, updated };
  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

/// Stage every artifact that exists; failures are reported, never raised
fn stage(paths: &TargetPaths, json: bool) {
  let files: Vec<&Path> = paths.all().into_iter().filter(|p| p.exists()).collect();
  let names: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();

  let result = std::env::current_dir()
    .map_err(BumpError::from)
    .and_then(|cwd| SystemGit::open(&cwd))
    .and_then(|repo| {
      log::debug!("staging in {}", repo.work_tree().display());
      repo.add(&files)
    });

  let message = match result {
    Ok(()) => format!("\nStaged files for commit: {}", names.join(", ")),
    Err(e) => format!("Error staging files for git: {}", e),
  };
  // Keep stdout valid JSON
  if json {
    eprintln!("{}", message);
  } else {
    println!("{}", message);
  }
}
