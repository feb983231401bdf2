//! Error types for bump-version with contextual messages and exit codes
//!
//! Every failure is a [`BumpError`]. Most of them stop the run; the git staging
//! step is the only place that catches one and keeps going.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for bump-version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, malformed files)
  User = 1,
  /// System error (git, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for bump-version
#[derive(Debug)]
pub enum BumpError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// A file did not have the shape we expected
  Pattern(PatternError),

  /// I/O errors
  Io(io::Error),

  /// I/O error tied to the operation that hit it
  File { message: String, source: io::Error },

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl BumpError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    BumpError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  ///
  /// Bare I/O errors become [`BumpError::File`] so the failing operation is named.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      BumpError::Message { message, context, help } => BumpError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      BumpError::Io(source) => BumpError::File {
        message: ctx_str,
        source,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      BumpError::Config(_) => ExitCode::User,
      BumpError::Git(_) => ExitCode::System,
      BumpError::Pattern(_) => ExitCode::User,
      BumpError::Io(_) | BumpError::File { .. } => ExitCode::System,
      BumpError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      BumpError::Config(e) => e.help_message(),
      BumpError::Git(e) => e.help_message(),
      BumpError::Pattern(e) => e.help_message(),
      BumpError::Io(e) | BumpError::File { source: e, .. } => io_help(e),
      BumpError::Message { help, .. } => help.clone(),
    }
  }
}

fn io_help(err: &io::Error) -> Option<String> {
  match err.kind() {
    io::ErrorKind::NotFound => {
      Some("Run from the project root, or point at the file with --iss/--cpp/--json/--build-sh/--build-bat.".to_string())
    }
    _ => None,
  }
}

impl fmt::Display for BumpError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BumpError::Config(e) => write!(f, "{}", e),
      BumpError::Git(e) => write!(f, "{}", e),
      BumpError::Pattern(e) => write!(f, "{}", e),
      BumpError::Io(e) => write!(f, "I/O error: {}", e),
      BumpError::File { message, source } => write!(f, "{}\nI/O error: {}", message, source),
      BumpError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for BumpError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      BumpError::Io(e) | BumpError::File { source: e, .. } => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for BumpError {
  fn from(err: io::Error) -> Self {
    BumpError::Io(err)
  }
}

impl From<serde_json::Error> for BumpError {
  fn from(err: serde_json::Error) -> Self {
    BumpError::message(format!("JSON error: {}", err))
  }
}

impl From<regex::Error> for BumpError {
  fn from(err: regex::Error) -> Self {
    BumpError::Pattern(PatternError::InvalidRegex {
      reason: err.to_string(),
    })
  }
}

impl From<std::string::FromUtf8Error> for BumpError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    BumpError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// bump.toml exists but could not be parsed
  Invalid { path: PathBuf, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Invalid { .. } => {
        Some("Valid sections are [paths] and [manifest]; see the README for the field list.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Invalid { path, reason } => {
        write!(f, "Invalid configuration in {}: {}", path.display(), reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run inside a git checkout or drop --git: {}",
        path.display()
      )),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr.trim_end())
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// Errors about the shape of an edited file
#[derive(Debug)]
pub enum PatternError {
  /// A required JSON field is absent or has the wrong type
  MissingField { path: PathBuf, field: String },

  /// A pattern failed to compile
  InvalidRegex { reason: String },
}

impl PatternError {
  fn help_message(&self) -> Option<String> {
    match self {
      PatternError::MissingField { field, .. } if field == "updates" => {
        Some("The manifest must have a top-level \"updates\" object keyed by channel name.".to_string())
      }
      PatternError::MissingField { .. } => {
        Some("Every channel under \"updates\" needs a string \"latest-version\".".to_string())
      }
      PatternError::InvalidRegex { .. } => None,
    }
  }
}

impl fmt::Display for PatternError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PatternError::MissingField { path, field } => {
        write!(f, "Missing field '{}' in {}", field, path.display())
      }
      PatternError::InvalidRegex { reason } => write!(f, "Invalid pattern: {}", reason),
    }
  }
}

/// Result type alias for bump-version
pub type BumpResult<T> = Result<T, BumpError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> BumpResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> BumpResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<BumpError>,
{
  fn context(self, ctx: impl Into<String>) -> BumpResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> BumpResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &BumpError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
