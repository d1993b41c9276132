//! Source tree scanning.
//!
//! Walks the first level of a mob's source directory and sorts every
//! subdirectory into one of: body part, animation bucket, effect
//! directory, `_Animation` passthrough, or ignored. Nothing here touches
//! the target tree; the scan is a transient model consumed by the
//! organize pipeline.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::glob;

use crate::catalog::Catalog;
use crate::classify::{PartName, DEFAULT_VARIANT};

/// Directory holding files that are passed through without renaming.
pub const PASSTHROUGH_DIR: &str = "_Animation";

/// Directory prefix left behind by the sprite exporter; never organized.
pub const IGNORED_PREFIX: &str = "DefineSprite";

/// One variant bucket of an animation: the variant name and the
/// directory its frames live in.
#[derive(Debug, Clone)]
pub struct SequenceBucket {
    pub variant: String,
    pub dir: PathBuf,
}

/// An animation category found under the source root, with its "Default"
/// bucket first (when the base directory exists) followed by any
/// `<name>_<variant>` sibling buckets.
#[derive(Debug, Clone)]
pub struct AnimationDirs {
    pub name: String,
    pub buckets: Vec<SequenceBucket>,
}

/// An effect category found under the source root.
#[derive(Debug, Clone)]
pub struct EffectDir {
    pub name: String,
    pub dir: PathBuf,
}

/// Everything the organize pipeline needs to know about a source tree.
#[derive(Debug)]
pub struct SourceTree {
    pub root: PathBuf,
    /// Distinct part types, sorted, sequence families excluded.
    pub parts: Vec<String>,
    /// Distinct variants with "Default" forced to the front.
    pub variants: Vec<String>,
    pub animations: Vec<AnimationDirs>,
    pub effects: Vec<EffectDir>,
    /// SVG files under `_Animation`, sorted by filename.
    pub passthrough: Vec<PathBuf>,
    /// Directory names that failed classification, with the reason.
    pub warnings: Vec<String>,
}

/// Scan the first-level subdirectories of `root`.
pub fn scan(root: &Path, catalog: &Catalog) -> io::Result<SourceTree> {
    let mut dir_names: Vec<String> = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                dir_names.push(name.to_string());
            }
        }
    }
    dir_names.sort();

    let mut parts: Vec<String> = Vec::new();
    let mut variants: Vec<String> = vec![DEFAULT_VARIANT.to_string()];
    let mut warnings: Vec<String> = Vec::new();

    for name in &dir_names {
        if name == PASSTHROUGH_DIR || name.starts_with(IGNORED_PREFIX) {
            continue;
        }
        let parsed = match PartName::parse(name) {
            Ok(parsed) => parsed,
            Err(e) => {
                warnings.push(format!("skipping directory '{}': {}", name, e));
                continue;
            }
        };
        if !variants.contains(&parsed.variant) {
            variants.push(parsed.variant.clone());
        }
        if !catalog.is_reserved(&parsed.part) && !parts.contains(&parsed.part) {
            parts.push(parsed.part);
        }
    }

    let animations = scan_animations(root, catalog, &dir_names);
    let effects = catalog
        .effects()
        .filter(|spec| root.join(&spec.name).is_dir())
        .map(|spec| EffectDir {
            name: spec.name.clone(),
            dir: root.join(&spec.name),
        })
        .collect();
    let passthrough = svg_files(&root.join(PASSTHROUGH_DIR));

    Ok(SourceTree {
        root: root.to_path_buf(),
        parts,
        variants,
        animations,
        effects,
        passthrough,
        warnings,
    })
}

fn scan_animations(root: &Path, catalog: &Catalog, dir_names: &[String]) -> Vec<AnimationDirs> {
    let mut animations = Vec::new();
    for spec in catalog.animations() {
        let mut buckets = Vec::new();
        let base = root.join(&spec.name);
        if base.is_dir() {
            buckets.push(SequenceBucket {
                variant: DEFAULT_VARIANT.to_string(),
                dir: base,
            });
        }
        let prefix = format!("{}_", spec.name);
        for name in dir_names {
            if let Some(variant) = name.strip_prefix(&prefix) {
                if !variant.is_empty() {
                    buckets.push(SequenceBucket {
                        variant: variant.to_string(),
                        dir: root.join(name),
                    });
                }
            }
        }
        if !buckets.is_empty() {
            animations.push(AnimationDirs {
                name: spec.name.clone(),
                buckets,
            });
        }
    }
    animations
}

/// All `*.svg` files directly inside `dir`, sorted. Missing directories
/// yield an empty list.
pub fn svg_files(dir: &Path) -> Vec<PathBuf> {
    // The directory portion is literal; escape it so metacharacters in
    // the source path ('[', '?', '*') don't empty the match.
    let pattern = format!("{}/*.svg", glob::Pattern::escape(&dir.display().to_string()));
    let mut files: Vec<PathBuf> = match glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(_) => Vec::new(),
    };
    files.sort();
    files
}
