//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod flatten;
mod group;
mod organize;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::organize::DEFAULT_OUT_ROOT;

/// Exit codes: success, and everything else (usage errors included).
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;

/// Mobparts - organize mob sprite assets into a body-part layout
#[derive(Parser)]
#[command(name = "mobparts")]
#[command(about = "Mobparts - organize mob sprite assets into a body-part layout with a JSON manifest")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Organize a mob's sprite directories and write the body manifest
    Organize {
        /// Source directory holding the mob's exported sprite directories
        source: PathBuf,

        /// Mob name, used verbatim in the target tree and manifest
        mob: String,

        /// Target root for the organized tree and JSON/ manifest directory
        #[arg(short, long, default_value = DEFAULT_OUT_ROOT)]
        out: PathBuf,

        /// Author recorded in the manifest metadata
        #[arg(long)]
        author: Option<String>,
    },
    /// Group loose exported files into category folders
    Group {
        /// Directory containing the loose files
        dir: PathBuf,

        /// Output directory (default: group in place)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// File types to process (e.g. .svg .png; default: .svg)
        #[arg(short, long, num_args = 1..)]
        types: Option<Vec<String>>,

        /// Print the plan without copying anything
        #[arg(short, long)]
        dry_run: bool,

        /// Delete the loose source files after grouping
        #[arg(long)]
        delete_originals: bool,
    },
    /// Flatten DefineSprite exporter directories into named sprites
    Flatten {
        /// Directory containing the exporter's sprite directories
        dir: PathBuf,

        /// Output directory for flattened sprites
        #[arg(short, long, default_value = crate::flatten::DEFAULT_FLATTEN_OUT)]
        out: PathBuf,
    },
}

/// Run the CLI application.
///
/// Usage errors exit 1 with the usage message; `--help`/`--version`
/// exit 0.
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
                _ => EXIT_ERROR,
            };
            // clap routes help to stdout and errors to stderr.
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match cli.command {
        Commands::Organize {
            source,
            mob,
            out,
            author,
        } => organize::run_organize(&source, &mob, &out, author.as_deref()),
        Commands::Group {
            dir,
            output,
            types,
            dry_run,
            delete_originals,
        } => group::run_group(&dir, output, types, dry_run, delete_originals),
        Commands::Flatten { dir, out } => flatten::run_flatten(&dir, &out),
    }
}
