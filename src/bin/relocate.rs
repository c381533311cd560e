use relocate::app;
use relocate::cli::{self, Backend};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::parse(Backend::Filesystem);
    app::run(Backend::Filesystem, args)
}
