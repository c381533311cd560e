//! Core library for `relocate`.
//!
//! Moves a single file inside a repository tree, either with plain filesystem
//! operations ([`FsMover`]) or through `git mv` so history is kept ([`GitMover`]).
//! [`relocate`] holds the validation-then-action pipeline; the two binaries in
//! `src/bin` are thin wrappers around [`app::run`].

pub mod app;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod logging;
pub mod mover;
pub mod output;
pub mod prompt;
pub mod relocator;
pub mod request;
pub mod vcs;

pub use config::{Config, LogLevel, load_config, load_config_from_xml_path};
pub use errors::RelocateError;
pub use mover::{FsMover, Mover};
pub use prompt::{Confirm, LineConfirm};
pub use relocator::{MoveOutcome, relocate};
pub use request::{MoveRequest, resolve_destination};
pub use vcs::GitMover;
