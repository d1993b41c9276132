//! Mobparts - Command-line tool for organizing mob sprite assets

use std::process::ExitCode;

use mobparts::cli;

fn main() -> ExitCode {
    cli::run()
}
