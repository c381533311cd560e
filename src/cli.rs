//! CLI definition and parsing, shared by `relocate` and `relocate-git`.
//!
//! Notes:
//! - --debug is a shorthand for --log-level debug.
//! - Any usage error exits with status 1 (clap's default would be 2).

use clap::{CommandFactory, FromArgMatches, Parser, ValueHint};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::request::MoveRequest;

/// Which move backend a binary drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Plain filesystem rename (copy+delete across filesystems).
    Filesystem,
    /// `git mv`, so history records a rename.
    Git,
}

impl Backend {
    pub fn bin_name(self) -> &'static str {
        match self {
            Backend::Filesystem => "relocate",
            Backend::Git => "relocate-git",
        }
    }

    fn about(self) -> &'static str {
        match self {
            Backend::Filesystem => "Move a file from one folder to another within the repository",
            Backend::Git => "Move a file with `git mv` so its history is preserved",
        }
    }
}

const AFTER_HELP: &str = "\
Examples:
  # Move a file to a different folder
  {bin} \"Experiment 1/file.txt\" \"Experiment 2/file.txt\"

  # Move a file to an existing folder (keeps same filename)
  {bin} \"Experiment 1/file.txt\" \"Experiment 2/\"

  # Move a file and create destination folders if they don't exist
  {bin} \"Experiment 1/file.txt\" \"Experiment 3/subfolder/\" --create-dirs";

#[derive(Parser, Debug, Clone)]
#[command(author, version)]
pub struct Args {
    /// Path to the source file to move.
    #[arg(value_name = "SOURCE", value_hint = ValueHint::FilePath, required_unless_present = "print_config")]
    pub source: Option<PathBuf>,

    /// Destination: a file path, or a directory (existing, or ending in '/') to keep the name.
    #[arg(value_name = "DESTINATION", value_hint = ValueHint::AnyPath, required_unless_present = "print_config")]
    pub destination: Option<PathBuf>,

    /// Create destination directories if they do not exist.
    #[arg(long)]
    pub create_dirs: bool,

    /// Overwrite an existing destination file without asking.
    #[arg(short, long)]
    pub force: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Set log level: quiet, normal, info, debug.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also write logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs as structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the config file location and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.clone()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if self.create_dirs {
            cfg.create_dirs = true;
        }
    }

    /// The move request, or None when the positionals are absent (only with --print-config).
    pub fn move_request(&self, cfg: &Config) -> Option<MoveRequest> {
        let source = self.source.clone()?;
        let destination = self.destination.clone()?;
        Some(
            MoveRequest::new(source, destination)
                .create_dirs(cfg.create_dirs || self.create_dirs)
                .force(self.force),
        )
    }
}

fn command_for(backend: Backend) -> clap::Command {
    Args::command()
        .name(backend.bin_name())
        .bin_name(backend.bin_name())
        .about(backend.about())
        .after_help(AFTER_HELP.replace("{bin}", backend.bin_name()))
}

/// Parse arguments for `backend` from `argv`.
pub fn try_parse_from<I, T>(backend: Backend, argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut cmd = command_for(backend);
    let matches = cmd.try_get_matches_from_mut(argv)?;
    Args::from_arg_matches(&matches).map_err(|e| e.format(&mut cmd))
}

/// Parse the process arguments; help/version exit 0, usage errors exit 1.
pub fn parse(backend: Backend) -> Args {
    match try_parse_from(backend, std::env::args_os()) {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}
