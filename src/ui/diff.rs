//! Unified diffs for `--dry-run`

use crate::core::text::FileEdit;

/// Summary of a rendered diff
pub struct DiffResult {
  pub unified_diff: String,
  pub lines_added: usize,
  pub lines_removed: usize,
}

/// Diff the before/after of an edit
///
/// Line endings are shown as `\n` so a CRLF file does not render as one long
/// changed line per hunk.
pub fn unified_diff(edit: &FileEdit, context_lines: usize) -> DiffResult {
  let old = crate::core::text::LineEnding::normalize(&edit.before);
  let new = crate::core::text::LineEnding::normalize(&edit.after);
  let diff = similar::TextDiff::from_lines(&old, &new);

  let unified_diff = diff
    .unified_diff()
    .context_radius(context_lines)
    .header(
      &format!("a/{}", edit.path.display()),
      &format!("b/{}", edit.path.display()),
    )
    .to_string();

  let mut lines_added = 0;
  let mut lines_removed = 0;
  for change in diff.iter_all_changes() {
    match change.tag() {
      similar::ChangeTag::Insert => lines_added += 1,
      similar::ChangeTag::Delete => lines_removed += 1,
      similar::ChangeTag::Equal => {}
    }
  }

  DiffResult {
    unified_diff,
    lines_added,
    lines_removed,
  }
}

/// Print an edit's diff, or a note that nothing would change
pub fn print_edit(edit: &FileEdit) {
  if edit.is_noop() {
    println!("   {} already up to date", edit.path.display());
    return;
  }

  let result = unified_diff(edit, 2);
  if result.lines_added == 0 && result.lines_removed == 0 {
    // Only the line-ending bytes differ
    println!("   {} would be rewritten (whitespace only)", edit.path.display());
    return;
  }
  print!("{}", result.unified_diff);
  println!("   (+{} -{})", result.lines_added, result.lines_removed);
}
