//! Body-part manifest - the JSON document describing the organized layout.
//!
//! The manifest is assembled as a typed in-memory document and serialized
//! through serde_json (with `preserve_order`, so sections and entries keep
//! their insertion order). All paths are relative to the `JSON/` directory
//! the manifest lives in, of the form `../<mob>/...`.
//!
//! # Manifest Format
//!
//! ```json
//! {
//!   "metadata": {
//!     "version": "1.0",
//!     "created": "2026-08-27",
//!     "description": "Body part layout for ThunderGolem",
//!     "author": "mobparts"
//!   },
//!   "variants": {
//!     "Default": {
//!       "name": "Default",
//!       "description": "Default variant of ThunderGolem",
//!       "parts": { "Head": "../ThunderGolem/Head/Default.svg" }
//!     }
//!   },
//!   "animations": {
//!     "TalonPowerOn": { "Default": ["../ThunderGolem/TalonPowerOn/Default/Frame_1.svg"] }
//!   },
//!   "effects": {
//!     "Swoosh01": ["../ThunderGolem/Swoosh01/Frame_1.svg"]
//!   },
//!   "_Animation": {
//!     "files": ["../ThunderGolem/_Animation/Idle.svg"]
//!   }
//! }
//! ```

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Current manifest format version.
pub const MANIFEST_VERSION: &str = "1.0";

/// Error during manifest assembly or writing.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Document metadata block.
#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub version: String,
    pub created: String,
    pub description: String,
    pub author: String,
}

/// One variant's resolved parts, ordered by part discovery.
#[derive(Debug, Clone)]
pub struct VariantSection {
    pub name: String,
    pub description: String,
    pub parts: Vec<(String, String)>,
}

/// One sequence category's frame lists: animations carry one list per
/// variant bucket, effects exactly one bucket.
#[derive(Debug, Clone)]
pub struct SequenceSection {
    pub name: String,
    pub buckets: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Clone, Default, Serialize)]
struct Passthrough {
    files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
struct VariantEntry {
    name: String,
    description: String,
    parts: Map<String, Value>,
}

/// The complete manifest document.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub metadata: Metadata,
    variants: Map<String, Value>,
    animations: Map<String, Value>,
    effects: Map<String, Value>,
    #[serde(rename = "_Animation")]
    passthrough: Passthrough,
}

impl Manifest {
    /// Assemble the document from its typed sections.
    pub fn assemble(
        metadata: Metadata,
        variants: Vec<VariantSection>,
        animations: Vec<SequenceSection>,
        effects: Vec<SequenceSection>,
        passthrough: Vec<String>,
    ) -> Result<Self, ManifestError> {
        let mut variant_map = Map::new();
        for section in variants {
            let mut parts = Map::new();
            for (part, path) in section.parts {
                parts.insert(part, Value::String(path));
            }
            let entry = VariantEntry {
                name: section.name.clone(),
                description: section.description,
                parts,
            };
            variant_map.insert(section.name, serde_json::to_value(entry)?);
        }

        let mut animation_map = Map::new();
        for section in animations {
            let mut buckets = Map::new();
            for (variant, frames) in section.buckets {
                buckets.insert(variant, serde_json::to_value(frames)?);
            }
            animation_map.insert(section.name, Value::Object(buckets));
        }

        let mut effect_map = Map::new();
        for section in effects {
            // Effects carry a single unnamed bucket; the frame list is the value.
            let frames = section.buckets.into_iter().next().map(|(_, f)| f).unwrap_or_default();
            effect_map.insert(section.name, serde_json::to_value(frames)?);
        }

        Ok(Self {
            metadata,
            variants: variant_map,
            animations: animation_map,
            effects: effect_map,
            passthrough: Passthrough { files: passthrough },
        })
    }

    /// Write the manifest as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Manifest filename for a mob: `body_<mob-lowercased>.json`.
pub fn manifest_filename(mob: &str) -> String {
    format!("body_{}.json", mob.to_lowercase())
}
