mod commands;
mod core;
mod report;
mod targets;
mod ui;

use clap::Parser;
use crate::core::config::{BumpConfig, PathsConfig, TargetPaths};
use crate::core::error::{BumpError, BumpResult, print_error};
use env_logger::Env;
use std::path::PathBuf;

/// Update version numbers across project files
#[derive(Parser)]
#[command(name = "bump-version")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// New version number to set (omit to only show current versions)
  new_version: Option<String>,

  /// Update all channels in updates.json, not only testing ones
  #[arg(long)]
  all: bool,

  /// Stage the updated files for a git commit
  #[arg(long)]
  git: bool,

  /// Qt version for updates.json URLs, build scripts and the CI workflow (e.g. 6.8.3)
  #[arg(long)]
  qt_version: Option<String>,

  /// Only reformat (pretty print) the JSON file and do nothing else
  #[arg(long)]
  reformat_json: bool,

  /// Show what would change without writing any file
  #[arg(long)]
  dry_run: bool,

  /// Print the version reports as JSON
  #[arg(long)]
  report_json: bool,

  /// Path to the installer script
  #[arg(long, value_name = "PATH")]
  iss: Option<PathBuf>,

  /// Path to the C++ file that sets the application version
  #[arg(long, value_name = "PATH")]
  cpp: Option<PathBuf>,

  /// Path to the update manifest
  #[arg(long, value_name = "PATH")]
  json: Option<PathBuf>,

  /// Path to build.sh
  #[arg(long, value_name = "PATH")]
  build_sh: Option<PathBuf>,

  /// Path to build.bat
  #[arg(long, value_name = "PATH")]
  build_bat: Option<PathBuf>,

  /// Path to the CI workflow
  #[arg(long, value_name = "PATH")]
  workflow: Option<PathBuf>,

  /// Explicit config file (default: bump.toml, .bump.toml or .config/bump.toml)
  #[arg(long, value_name = "PATH")]
  config: Option<PathBuf>,

  /// Print debug diagnostics
  #[arg(short, long)]
  verbose: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let default_filter = if cli.verbose { "debug" } else { "warn" };
  env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn run(cli: Cli) -> BumpResult<()> {
  let workspace_root = std::env::current_dir()?;

  let config = match &cli.config {
    Some(path) => BumpConfig::load_from(path)?,
    None => BumpConfig::load_or_default(&workspace_root)?,
  };

  let overrides = PathsConfig {
    iss: cli.iss,
    cpp: cli.cpp,
    manifest: cli.json,
    build_sh: cli.build_sh,
    build_bat: cli.build_bat,
    workflow: cli.workflow,
  };
  let paths = TargetPaths::resolve(&config.paths, &overrides);
  log::debug!("targets: {:?}", paths);

  if cli.reformat_json {
    return commands::run_reformat(&paths.manifest, cli.dry_run);
  }

  commands::run_bump(commands::BumpOptions {
    new_version: cli.new_version,
    qt_version: cli.qt_version,
    all_channels: cli.all,
    git: cli.git,
    dry_run: cli.dry_run,
    json: cli.report_json,
    paths,
    manifest: config.manifest,
  })
}

fn handle_error(err: BumpError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
