//! Flattening exporter output directories into named sprites.
//!
//! A sprite exporter leaves one directory per sprite with machine names
//! like `DefineSprite_2_a_WaistSide_ThunderGolem`, each holding one or
//! more SVG files. This pass recovers the proper sprite name and copies
//! the files out: single-file sprites become `<Name>.svg`, multi-file
//! sprites become a `<Name>/` folder of `<Name>_<NN>.svg` frames.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Default destination directory for flattened sprites.
pub const DEFAULT_FLATTEN_OUT: &str = "sprites_done";

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("directory not found: {}", .0.display())]
    DirMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Counts from one flatten run.
#[derive(Debug, Default)]
pub struct FlattenReport {
    pub sprites: usize,
    pub copied: usize,
}

fn a_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"a_(.+)$").unwrap())
}

fn define_sprite_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"DefineSprite_\d+_(.+)$").unwrap())
}

/// Recover the proper sprite name from an exporter directory name.
///
/// `DefineSprite_2_a_WaistSide_ThunderGolem` -> `WaistSide_ThunderGolem`,
/// `DefineSprite_1234_Torso_EscapedGladiator` -> `Torso_EscapedGladiator`;
/// anything else keeps its name.
pub fn proper_name(folder: &str) -> String {
    if let Some(caps) = a_name_re().captures(folder) {
        return caps[1].to_string();
    }
    if let Some(caps) = define_sprite_re().captures(folder) {
        return caps[1].to_string();
    }
    folder.to_string()
}

/// Flatten every sprite directory under `dir` into `out`.
pub fn flatten(dir: &Path, out: &Path) -> Result<FlattenReport, FlattenError> {
    if !dir.is_dir() {
        return Err(FlattenError::DirMissing(dir.to_path_buf()));
    }
    fs::create_dir_all(out)?;
    let out_canon = out.canonicalize()?;

    let mut folders: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        // Never descend into our own output, however its path was spelled
        // (`./sprites_done` and `sprites_done` are the same directory).
        if path.canonicalize().map(|p| p == out_canon).unwrap_or(false) {
            continue;
        }
        folders.push(path);
    }
    folders.sort();
    println!("Found {} directories to process", folders.len());

    let mut report = FlattenReport::default();
    for folder in folders {
        let Some(folder_name) = folder.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let name = proper_name(folder_name);

        let mut svgs: Vec<PathBuf> = fs::read_dir(&folder)?
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
            })
            .collect();
        svgs.sort();
        println!(
            "Processing {} -> {} ({} SVG files)",
            folder_name,
            name,
            svgs.len()
        );
        if svgs.is_empty() {
            continue;
        }
        report.sprites += 1;

        if svgs.len() == 1 {
            let dest = out.join(format!("{}.svg", name));
            fs::copy(&svgs[0], &dest)?;
            println!("  Copied {} -> {}", svgs[0].display(), dest.display());
            report.copied += 1;
        } else {
            let subfolder = out.join(&name);
            fs::create_dir_all(&subfolder)?;
            for (i, svg) in svgs.iter().enumerate() {
                let dest = subfolder.join(format!("{}_{:02}.svg", name, i + 1));
                fs::copy(svg, &dest)?;
                println!("  Copied {} -> {}", svg.display(), dest.display());
                report.copied += 1;
            }
        }
    }
    Ok(report)
}
