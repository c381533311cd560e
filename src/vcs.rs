//! History-preserving moves through `git mv`.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

use crate::config::GIT_PROGRAM_DEFAULT;
use crate::errors::RelocateError;
use crate::mover::Mover;
use crate::relocator::MoveOutcome;
use crate::request::destination_dir;

/// Runs `<program> mv [-f] -- <source> <destination>` in the current directory.
#[derive(Debug, Clone)]
pub struct GitMover {
    program: PathBuf,
}

impl GitMover {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self, source: &Path, destination: &Path, overwrite: bool) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("mv");
        if overwrite {
            cmd.arg("-f");
        }
        cmd.arg("--").arg(source).arg(destination);
        cmd
    }
}

impl Default for GitMover {
    fn default() -> Self {
        Self::new(GIT_PROGRAM_DEFAULT)
    }
}

impl Mover for GitMover {
    fn label(&self) -> &'static str {
        "git"
    }

    fn move_file(
        &self,
        source: &Path,
        destination: &Path,
        overwrite: bool,
    ) -> Result<(), RelocateError> {
        let mut cmd = self.command(source, destination, overwrite);
        debug!(command = ?cmd, "Running history-preserving move");

        let out = cmd.output().map_err(|e| {
            let hint = if e.kind() == io::ErrorKind::NotFound {
                "; is it installed and on PATH?"
            } else {
                ""
            };
            RelocateError::Unexpected(format!(
                "could not run '{}': {e}{hint}",
                self.program.display()
            ))
        })?;

        if out.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&out.stderr);
        let reason = match stderr.trim() {
            "" => format!("'{}' exited with {}", self.program.display(), out.status),
            msg => msg.to_string(),
        };
        Err(RelocateError::move_failed(source, destination, reason))
    }

    fn follow_up(&self, outcome: &MoveOutcome) -> Option<String> {
        Some(commit_hint(outcome))
    }
}

/// Suggested command to record the move, e.g. `git commit -m "Move data.csv to Experiment 2"`.
pub fn commit_hint(outcome: &MoveOutcome) -> String {
    let name = outcome
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| outcome.source.display().to_string());
    let dir = destination_dir(&outcome.destination)
        .map(|d| d.display().to_string())
        .unwrap_or_else(|| ".".to_string());
    format!("git commit -m \"Move {name} to {dir}\"")
}
