//! Application orchestrator.
//! Loads/merges config, initializes logging, runs the relocation with the
//! binary's backend, reports the outcome and picks the exit status.

use std::process::ExitCode;
use tracing::{debug, error};

use crate::cli::{Args, Backend};
use crate::config::{CONFIG_ENV, Config, config_path, load_config};
use crate::errors::RelocateError;
use crate::logging::init_tracing;
use crate::mover::{FsMover, Mover};
use crate::output as out;
use crate::prompt::{Confirm, stdin_confirm};
use crate::relocator::{MoveOutcome, relocate};
use crate::vcs::GitMover;

/// Run the CLI application for `backend`. Success is 0; every failure is 1.
pub fn run(backend: Backend, args: Args) -> ExitCode {
    if args.print_config {
        print_config_location();
        return ExitCode::SUCCESS;
    }

    let mut cfg = match load_config() {
        Ok(c) => c,
        Err(e) => {
            out::print_error(&format!("Failed to load config: {e:#}"));
            return ExitCode::FAILURE;
        }
    };
    args.apply_overrides(&mut cfg);

    // Held until return so the file writer flushes.
    let _guard = match init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json) {
        Ok(g) => g,
        Err(e) => {
            out::print_error(&format!("Failed to initialize logging: {e:#}"));
            return ExitCode::FAILURE;
        }
    };
    debug!(?args, ?cfg, backend = backend.bin_name(), "Starting");

    let mut confirm = stdin_confirm();
    match backend {
        Backend::Filesystem => execute(backend, &args, &cfg, &FsMover, &mut confirm),
        Backend::Git => execute(
            backend,
            &args,
            &cfg,
            &GitMover::new(cfg.git_program.clone()),
            &mut confirm,
        ),
    }
}

/// Relocate per `args`/`cfg` with the given ports, then report.
pub fn execute<M, C>(backend: Backend, args: &Args, cfg: &Config, mover: &M, confirm: &mut C) -> ExitCode
where
    M: Mover + ?Sized,
    C: Confirm + ?Sized,
{
    let Some(request) = args.move_request(cfg) else {
        out::print_error("Both SOURCE and DESTINATION are required.");
        return ExitCode::FAILURE;
    };

    match relocate(&request, mover, confirm) {
        Ok(outcome) => {
            report_success(backend, &outcome, request.force, mover.follow_up(&outcome));
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_success(backend: Backend, outcome: &MoveOutcome, forced: bool, follow_up: Option<String>) {
    if let Some(dir) = &outcome.created_dir {
        out::print_info(&format!("Created directory: {}", dir.display()));
    }
    if outcome.replaced_existing && forced {
        out::print_info(&format!("Replaced existing file: {}", outcome.destination.display()));
    }

    match backend {
        Backend::Filesystem => out::print_success(&format!(
            "Successfully moved '{}' to '{}'",
            outcome.source.display(),
            outcome.destination.display()
        )),
        Backend::Git => {
            out::print_success("File moved successfully!");
            out::print_user(&format!("   From: {}", outcome.source.display()));
            out::print_user(&format!("   To:   {}", outcome.destination.display()));
        }
    }
    if let Some(next) = follow_up {
        out::print_info("Don't forget to commit the change:");
        out::print_user(&format!("   {next}"));
    }
}

fn report_failure(e: &RelocateError) {
    let code = e.code();
    let kind = e.kind();
    match e {
        RelocateError::NotFound(path) | RelocateError::NotAFile(path) => {
            error!(code, kind, path = %path.display(), "Source rejected")
        }
        RelocateError::MissingDestinationDir(dir) => {
            error!(code, kind, dir = %dir.display(), "Destination directory missing")
        }
        RelocateError::OperationCancelled(path) => {
            debug!(code, kind, path = %path.display(), "Cancelled by user")
        }
        RelocateError::MoveFailed { from, to, reason } => {
            error!(code, kind, from = %from.display(), to = %to.display(), %reason, "Move failed")
        }
        RelocateError::Unexpected(msg) => error!(code, kind, %msg, "Unexpected failure"),
    }

    out::print_error(&e.to_string());
    if matches!(e, RelocateError::MissingDestinationDir(_)) {
        out::print_info("Use --create-dirs to create it automatically.");
    }
}

fn print_config_location() {
    if let Some(p) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}",
            std::path::Path::new(&p).display()
        ));
        return;
    }
    match config_path() {
        Some(p) => {
            out::print_info(&format!("Default relocate config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults are used.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
}
