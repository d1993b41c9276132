//! Mobparts - Library for organizing mob sprite assets
//!
//! This library provides functionality to:
//! - Classify exported sprite directories into body parts, variants,
//!   animations and effects by filename convention
//! - Copy assets into a normalized `Sprite/Body_Parts` target layout
//! - Emit a JSON manifest describing the resulting layout
//! - Group and flatten raw sprite-exporter output

pub mod catalog;
pub mod classify;
pub mod cli;
pub mod flatten;
pub mod group;
pub mod manifest;
pub mod organize;
pub mod scan;
