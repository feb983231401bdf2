//! Text files with a remembered line-ending convention
//!
//! Content is held LF-normalized in memory so every pattern only has to deal
//! with `\n`. The detected ending is put back when the file is rendered.

use crate::core::error::{BumpResult, ResultExt};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Line-ending convention of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
  #[default]
  Lf,
  CrLf,
  Cr,
}

impl LineEnding {
  /// CRLF wins if present anywhere, then a lone CR, otherwise LF
  pub fn detect(text: &str) -> Self {
    if text.contains("\r\n") {
      LineEnding::CrLf
    } else if text.contains('\r') {
      LineEnding::Cr
    } else {
      LineEnding::Lf
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      LineEnding::Lf => "\n",
      LineEnding::CrLf => "\r\n",
      LineEnding::Cr => "\r",
    }
  }

  /// Rewrite every `\r\n` and lone `\r` as `\n`
  pub fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
  }

  /// Turn LF-normalized text into text using this ending
  pub fn apply(self, text: &str) -> String {
    match self {
      LineEnding::Lf => text.to_string(),
      other => text.replace('\n', other.as_str()),
    }
  }
}

/// A UTF-8 text file loaded for patching
#[derive(Debug, Clone)]
pub struct TextFile {
  pub path: PathBuf,
  /// Bytes exactly as read
  pub original: String,
  /// Content with `\n` line endings
  pub content: String,
  pub ending: LineEnding,
}

impl TextFile {
  /// Read a file that must exist
  pub fn read(path: &Path) -> BumpResult<Self> {
    let original = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Self::from_text(path, original))
  }

  /// Read a file that may be absent; `None` when it does not exist
  pub fn read_optional(path: &Path) -> BumpResult<Option<Self>> {
    match fs::read_to_string(path) {
      Ok(original) => Ok(Some(Self::from_text(path, original))),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        log::debug!("{} not found, skipping", path.display());
        Ok(None)
      }
      Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
  }

  pub fn from_text(path: &Path, original: String) -> Self {
    let ending = LineEnding::detect(&original);
    let content = LineEnding::normalize(&original);
    log::debug!("{}: {:?} line endings", path.display(), ending);
    Self {
      path: path.to_path_buf(),
      original,
      content,
      ending,
    }
  }

  /// Render LF-normalized text with this file's line ending
  pub fn render(&self, content: &str) -> String {
    self.ending.apply(content)
  }

  /// Build the pending rewrite of this file to `new_content` (LF-normalized)
  pub fn edit(&self, new_content: &str) -> FileEdit {
    FileEdit {
      path: self.path.clone(),
      before: self.original.clone(),
      after: self.render(new_content),
    }
  }
}

/// Split LF-normalized text into lines the way a line-oriented editor sees them
///
/// A trailing newline does not produce an empty last line.
pub fn lines(content: &str) -> Vec<&str> {
  content.lines().collect()
}

/// Join lines back, always terminating the last one
///
/// An empty line list stays empty.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
  let mut out = String::new();
  for line in lines {
    out.push_str(line.as_ref());
    out.push('\n');
  }
  out
}

/// A pending rewrite of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEdit {
  pub path: PathBuf,
  pub before: String,
  pub after: String,
}

impl FileEdit {
  /// True when writing would not change a byte
  pub fn is_noop(&self) -> bool {
    self.before == self.after
  }

  /// Write the new content to disk
  pub fn apply(&self) -> BumpResult<()> {
    if self.is_noop() {
      log::debug!("{} unchanged, not rewriting", self.path.display());
      return Ok(());
    }
    fs::write(&self.path, self.after.as_bytes()).with_context(|| format!("Failed to write {}", self.path.display()))
  }
}
