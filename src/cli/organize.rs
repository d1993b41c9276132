//! Organize command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::organize::Organizer;

/// Run the organize command
pub fn run_organize(
    source: &Path,
    mob: &str,
    out: &Path,
    author: Option<&str>,
) -> ExitCode {
    let mut organizer = Organizer::new(source, mob).with_out_root(out);
    if let Some(author) = author {
        organizer = organizer.with_author(author);
    }

    match organizer.run() {
        Ok(report) => {
            for warning in &report.warnings {
                eprintln!("Warning: {}", warning);
            }
            println!(
                "Organized {}: {} part files, {} frames, {} passthrough files ({} pairs skipped)",
                mob,
                report.parts_copied,
                report.frames_copied,
                report.passthrough_copied,
                report.pairs_skipped
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
