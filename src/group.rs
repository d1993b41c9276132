//! Grouping loose exported files into category folders.
//!
//! Sprite exporters drop hundreds of flat files like
//! `_IconArtStoreFront14.svg` or `DefineSprite_539__FrameBendBronze01/1.svg`
//! next to each other. This pass buckets them by category name so the
//! organize pipeline (and humans) have something navigable to work with.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Category prefixes recognized in exported filenames.
const CATEGORY_PREFIXES: [&str; 5] = ["IconArt", "Frame", "Doodad", "Window", "Button"];

#[derive(Debug, Error)]
pub enum GroupError {
    #[error("directory not found: {}", .0.display())]
    DirMissing(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for one grouping run.
#[derive(Debug)]
pub struct GroupOptions {
    pub dir: PathBuf,
    /// Where category folders are created; defaults to `dir` itself.
    pub output: Option<PathBuf>,
    /// Extensions to process, lowercased with leading dot (default `.svg`).
    pub types: Vec<String>,
    /// Print the plan without copying.
    pub dry_run: bool,
    /// Remove the loose source files after copying.
    pub delete_originals: bool,
}

impl GroupOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            output: None,
            types: vec![".svg".to_string()],
            dry_run: false,
            delete_originals: false,
        }
    }
}

/// Counts from one grouping run.
#[derive(Debug, Default)]
pub struct GroupReport {
    pub files: usize,
    pub categories: usize,
    pub copied: usize,
    pub deleted: usize,
}

fn leading_alpha_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]+").unwrap())
}

fn match_prefix(name: &str) -> Option<&'static str> {
    let bare = name.strip_prefix('_').unwrap_or(name);
    CATEGORY_PREFIXES
        .iter()
        .find(|p| bare.starts_with(**p))
        .copied()
}

/// Derive the category folder name for an exported filename.
///
/// Order of attempts: known prefix on the name itself; for
/// `DefineSprite…__Name` forms, a known prefix (or the leading alphabetic
/// run) of the part after the double underscore; for `_Name` forms the
/// leading alphabetic run; otherwise the file stem.
pub fn extract_category(filename: &str) -> String {
    let base = filename.rsplit('/').next().unwrap_or(filename);

    if let Some(category) = match_prefix(base) {
        return category.to_string();
    }

    if let Some((_, after)) = filename.split_once("__") {
        if let Some(category) = match_prefix(after) {
            return category.to_string();
        }
        if let Some(m) = leading_alpha_re().find(after) {
            return m.as_str().to_string();
        }
    }

    if let Some(bare) = base.strip_prefix('_') {
        if let Some(m) = leading_alpha_re().find(bare) {
            return m.as_str().to_string();
        }
    }

    match base.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => base.to_string(),
    }
}

/// Group the loose files of a directory into category folders.
pub fn group_files(opts: &GroupOptions) -> Result<GroupReport, GroupError> {
    if !opts.dir.is_dir() {
        return Err(GroupError::DirMissing(opts.dir.clone()));
    }
    let output = opts.output.as_deref().unwrap_or(&opts.dir);
    if !opts.dry_run {
        fs::create_dir_all(output)?;
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(&opts.dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && matches_type(&path, &opts.types) {
            files.push(path);
        }
    }
    files.sort();
    println!("Found {} files to organize", files.len());

    let mut categories: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        categories.entry(extract_category(name)).or_default().push(path);
    }
    println!("Grouped files into {} categories", categories.len());

    let mut report = GroupReport {
        categories: categories.len(),
        ..Default::default()
    };

    for (category, paths) in &categories {
        println!("Category '{}' has {} files", category, paths.len());
        let category_dir = output.join(category);
        if !opts.dry_run {
            fs::create_dir_all(&category_dir)?;
        }
        for path in paths {
            report.files += 1;
            let Some(name) = path.file_name() else { continue };
            let dest = category_dir.join(name);
            if opts.dry_run {
                println!("  Would copy {} -> {}", path.display(), dest.display());
                continue;
            }
            if *path == dest {
                continue;
            }
            fs::copy(path, &dest)?;
            println!("  Copied {} -> {}", path.display(), dest.display());
            report.copied += 1;
        }
    }

    if opts.delete_originals && !opts.dry_run {
        for (_, paths) in categories {
            for path in paths {
                fs::remove_file(&path)?;
                println!("Deleted: {}", path.display());
                report.deleted += 1;
            }
        }
    }

    Ok(report)
}

fn matches_type(path: &Path, types: &[String]) -> bool {
    if types.is_empty() {
        return true;
    }
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    let dotted = format!(".{}", ext.to_lowercase());
    types.iter().any(|t| *t == dotted)
}
