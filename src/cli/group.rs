//! Group command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::group::{group_files, GroupOptions};

/// Run the group command
pub fn run_group(
    dir: &Path,
    output: Option<PathBuf>,
    types: Option<Vec<String>>,
    dry_run: bool,
    delete_originals: bool,
) -> ExitCode {
    let mut opts = GroupOptions::new(dir);
    opts.output = output;
    if let Some(types) = types {
        // Normalize to lowercased, dot-prefixed extensions.
        opts.types = types
            .iter()
            .map(|t| format!(".{}", t.to_lowercase().trim_start_matches('.')))
            .collect();
    }
    opts.dry_run = dry_run;
    opts.delete_originals = delete_originals;

    match group_files(&opts) {
        Ok(report) => {
            println!(
                "Grouped {} files into {} categories ({} copied)",
                report.files, report.categories, report.copied
            );
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
