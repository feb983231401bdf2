//! `--reformat-json`: pretty-print the update manifest and nothing else

use crate::core::error::BumpResult;
use crate::targets::manifest;
use crate::ui::diff;
use std::path::Path;

pub fn run_reformat(manifest_path: &Path, dry_run: bool) -> BumpResult<()> {
  let edit = manifest::reformat(manifest_path)?;

  if dry_run {
    diff::print_edit(&edit);
    println!("🔍 Dry-run mode (no changes applied)");
    return Ok(());
  }

  edit.apply()?;
  println!("Reformatted {}", manifest_path.display());
  Ok(())
}
