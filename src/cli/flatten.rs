//! Flatten command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::flatten::flatten;

/// Run the flatten command
pub fn run_flatten(dir: &Path, out: &Path) -> ExitCode {
    match flatten(dir, out) {
        Ok(report) => {
            println!(
                "Flattened {} sprites ({} files copied) into {}",
                report.sprites,
                report.copied,
                out.display()
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
