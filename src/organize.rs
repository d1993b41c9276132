//! The organize pipeline: scan a mob's source tree, copy its assets into
//! the normalized target layout, and write the body-part manifest.
//!
//! Runs sequentially through five passes: body parts, animations,
//! effects, `_Animation` passthrough, manifest. Destination files are
//! overwritten without confirmation; re-running with unchanged inputs is
//! idempotent apart from the manifest's `created` date.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::Catalog;
use crate::classify::frame_number;
use crate::manifest::{
    manifest_filename, Manifest, ManifestError, Metadata, SequenceSection, VariantSection,
    MANIFEST_VERSION,
};
use crate::scan::{scan, AnimationDirs, EffectDir, SourceTree, PASSTHROUGH_DIR};

/// Default root of the organized target tree.
pub const DEFAULT_OUT_ROOT: &str = "Sprite/Body_Parts";

/// Subdirectory of the target root holding manifests.
pub const MANIFEST_DIR: &str = "JSON";

const DEFAULT_AUTHOR: &str = "mobparts";

/// Error during the organize pipeline.
#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("source directory not found: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("no frame number in '{}'", .0.display())]
    MissingFrameNumber(PathBuf),
    #[error(
        "duplicate frame number {number} in '{}': '{}' and '{}'",
        .dir.display(),
        .first.display(),
        .second.display()
    )]
    DuplicateFrame {
        number: u64,
        dir: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Counts and diagnostics from one organize run.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    pub parts_copied: usize,
    pub frames_copied: usize,
    pub passthrough_copied: usize,
    pub pairs_skipped: usize,
    pub warnings: Vec<String>,
    pub manifest_path: PathBuf,
}

/// One configured organize run.
#[derive(Debug)]
pub struct Organizer {
    source: PathBuf,
    mob: String,
    out_root: PathBuf,
    author: String,
    catalog: Catalog,
}

impl Organizer {
    pub fn new(source: impl Into<PathBuf>, mob: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            mob: mob.into(),
            out_root: PathBuf::from(DEFAULT_OUT_ROOT),
            author: DEFAULT_AUTHOR.to_string(),
            catalog: Catalog::default(),
        }
    }

    /// Override the target root (default `Sprite/Body_Parts`).
    pub fn with_out_root(mut self, out_root: impl Into<PathBuf>) -> Self {
        self.out_root = out_root.into();
        self
    }

    /// Override the manifest author field.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Override the sequence catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Run the full pipeline, returning counts and the manifest path.
    pub fn run(&self) -> Result<OrganizeReport, OrganizeError> {
        if !self.source.is_dir() {
            return Err(OrganizeError::SourceMissing(self.source.clone()));
        }
        let tree = scan(&self.source, &self.catalog)?;
        let mut report = OrganizeReport {
            warnings: tree.warnings.clone(),
            ..Default::default()
        };

        let variants = self.copy_parts(&tree, &mut report)?;
        let animations = self.copy_animations(&tree.animations, &mut report)?;
        let effects = self.copy_effects(&tree.effects, &mut report)?;
        let passthrough = self.copy_passthrough(&tree, &mut report)?;

        let manifest = Manifest::assemble(
            self.metadata(),
            variants,
            animations,
            effects,
            passthrough,
        )?;
        let manifest_path = self.out_root.join(MANIFEST_DIR).join(manifest_filename(&self.mob));
        manifest.save(&manifest_path)?;
        println!("Wrote manifest {}", manifest_path.display());

        report.manifest_path = manifest_path;
        Ok(report)
    }

    fn metadata(&self) -> Metadata {
        Metadata {
            version: MANIFEST_VERSION.to_string(),
            created: chrono::Local::now().format("%Y-%m-%d").to_string(),
            description: format!("Body part layout for {}", self.mob),
            author: self.author.clone(),
        }
    }

    fn mob_dir(&self) -> PathBuf {
        self.out_root.join(&self.mob)
    }

    /// Manifest-relative path for a file under the mob's target tree.
    fn rel_path(&self, segments: &[&str]) -> String {
        let mut rel = format!("../{}", self.mob);
        for segment in segments {
            rel.push('/');
            rel.push_str(segment);
        }
        rel
    }

    fn copy_file(&self, src: &Path, dest: &Path) -> Result<(), OrganizeError> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src, dest)?;
        println!("Copied {} -> {}", src.display(), dest.display());
        Ok(())
    }

    /// Pass 1+2: resolve and copy every (variant, part) pair.
    ///
    /// The variant-specific file wins; the bare part file is the
    /// fallback; a pair with neither is skipped without an entry.
    fn copy_parts(
        &self,
        tree: &SourceTree,
        report: &mut OrganizeReport,
    ) -> Result<Vec<VariantSection>, OrganizeError> {
        let mut sections = Vec::new();
        for variant in &tree.variants {
            let mut parts = Vec::new();
            for part in &tree.parts {
                let specific = format!("{}_{}", part, variant);
                let candidates = [
                    tree.root.join(&specific).join(format!("{}.svg", specific)),
                    tree.root.join(part).join(format!("{}.svg", part)),
                ];
                let Some(src) = candidates.iter().find(|p| p.is_file()) else {
                    report.pairs_skipped += 1;
                    continue;
                };
                let filename = format!("{}.svg", variant);
                let dest = self.mob_dir().join(part).join(&filename);
                self.copy_file(src, &dest)?;
                parts.push((part.clone(), self.rel_path(&[part.as_str(), filename.as_str()])));
                report.parts_copied += 1;
            }
            sections.push(VariantSection {
                name: variant.clone(),
                description: format!("{} variant of {}", variant, self.mob),
                parts,
            });
        }
        Ok(sections)
    }

    /// Copy one bucket of numbered frames to `dest_dir/Frame_<n>.svg`.
    ///
    /// Frames are listed sorted by frame number. A frame with no digit
    /// run, or two frames with the same number, is a hard error.
    fn copy_frames(
        &self,
        bucket_dir: &Path,
        strip: &[&str],
        dest_dir: &Path,
        rel_segments: &[&str],
        report: &mut OrganizeReport,
    ) -> Result<Vec<String>, OrganizeError> {
        let mut seen: HashMap<u64, PathBuf> = HashMap::new();
        let mut frames: Vec<(u64, String)> = Vec::new();
        for src in crate::scan::svg_files(bucket_dir) {
            let stem = src
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let number = frame_number(stem, strip)
                .ok_or_else(|| OrganizeError::MissingFrameNumber(src.clone()))?;
            if let Some(first) = seen.insert(number, src.clone()) {
                return Err(OrganizeError::DuplicateFrame {
                    number,
                    dir: bucket_dir.to_path_buf(),
                    first,
                    second: src,
                });
            }
            let filename = format!("Frame_{}.svg", number);
            self.copy_file(&src, &dest_dir.join(&filename))?;
            let mut segments: Vec<&str> = rel_segments.to_vec();
            segments.push(&filename);
            frames.push((number, self.rel_path(&segments)));
            report.frames_copied += 1;
        }
        frames.sort_by_key(|(number, _)| *number);
        Ok(frames.into_iter().map(|(_, path)| path).collect())
    }

    /// Pass 3: animation sequences, one frame list per variant bucket.
    fn copy_animations(
        &self,
        animations: &[AnimationDirs],
        report: &mut OrganizeReport,
    ) -> Result<Vec<SequenceSection>, OrganizeError> {
        let mut sections = Vec::new();
        for anim in animations {
            let mut buckets = Vec::new();
            for bucket in &anim.buckets {
                let dest_dir = self.mob_dir().join(&anim.name).join(&bucket.variant);
                let strip = [anim.name.as_str(), bucket.variant.as_str()];
                let frames =
                    self.copy_frames(&bucket.dir, &strip, &dest_dir, &strip, report)?;
                buckets.push((bucket.variant.clone(), frames));
            }
            sections.push(SequenceSection {
                name: anim.name.clone(),
                buckets,
            });
        }
        Ok(sections)
    }

    /// Pass 4: effect sequences, a single frame list each.
    fn copy_effects(
        &self,
        effects: &[EffectDir],
        report: &mut OrganizeReport,
    ) -> Result<Vec<SequenceSection>, OrganizeError> {
        let mut sections = Vec::new();
        for effect in effects {
            let dest_dir = self.mob_dir().join(&effect.name);
            let strip = [effect.name.as_str()];
            let frames = self.copy_frames(&effect.dir, &strip, &dest_dir, &strip, report)?;
            sections.push(SequenceSection {
                name: effect.name.clone(),
                buckets: vec![(String::new(), frames)],
            });
        }
        Ok(sections)
    }

    /// Pass 5: `_Animation` files copied verbatim, original names kept.
    fn copy_passthrough(
        &self,
        tree: &SourceTree,
        report: &mut OrganizeReport,
    ) -> Result<Vec<String>, OrganizeError> {
        let mut files = Vec::new();
        for src in &tree.passthrough {
            let Some(filename) = src.file_name().and_then(|f| f.to_str()) else {
                continue;
            };
            let dest = self.mob_dir().join(PASSTHROUGH_DIR).join(filename);
            self.copy_file(src, &dest)?;
            files.push(self.rel_path(&[PASSTHROUGH_DIR, filename]));
            report.passthrough_copied += 1;
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_file(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(&path)
            .unwrap()
            .write_all(contents.as_bytes())
            .unwrap();
    }

    #[test]
    fn missing_source_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let organizer = Organizer::new(temp.path().join("nope"), "Roc")
            .with_out_root(temp.path().join("out"));
        assert!(matches!(
            organizer.run(),
            Err(OrganizeError::SourceMissing(_))
        ));
    }

    #[test]
    fn frame_without_number_is_an_error() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        create_file(&src, "Web/sparkle.svg", "<svg/>");

        let organizer =
            Organizer::new(&src, "Roc").with_out_root(temp.path().join("out"));
        assert!(matches!(
            organizer.run(),
            Err(OrganizeError::MissingFrameNumber(_))
        ));
    }

    #[test]
    fn colliding_frame_numbers_are_an_error() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        create_file(&src, "Web/Web_1.svg", "<svg>a</svg>");
        create_file(&src, "Web/Web_01.svg", "<svg>b</svg>");

        let organizer =
            Organizer::new(&src, "Roc").with_out_root(temp.path().join("out"));
        assert!(matches!(
            organizer.run(),
            Err(OrganizeError::DuplicateFrame { number: 1, .. })
        ));
    }

    #[test]
    fn report_counts_skipped_pairs() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        // Wing_Red exists with no Wing fallback: the (Default, Wing) pair
        // cannot resolve and is skipped.
        create_file(&src, "Wing_Red/Wing_Red.svg", "<svg/>");

        let organizer =
            Organizer::new(&src, "Roc").with_out_root(temp.path().join("out"));
        let report = organizer.run().unwrap();
        assert_eq!(report.parts_copied, 1);
        assert_eq!(report.pairs_skipped, 1);
    }
}
