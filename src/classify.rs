//! Directory and filename classification.
//!
//! Asset directories follow a `<Part>_<Variant>` naming convention; frame
//! files carry a numeric suffix. Both are parsed here with explicit
//! failures instead of silent misclassification.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// The implicit variant used when a name carries no `_<Variant>` suffix.
pub const DEFAULT_VARIANT: &str = "Default";

/// Classification failure for a directory or frame filename.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("empty name")]
    Empty,
    #[error("empty part segment in '{0}'")]
    EmptyPart(String),
    #[error("empty variant segment in '{0}'")]
    EmptyVariant(String),
}

/// A parsed `<Part>_<Variant>` directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartName {
    pub part: String,
    pub variant: String,
}

impl PartName {
    /// Parse a directory name into a (part, variant) pair.
    ///
    /// The variant is the segment after the LAST underscore, so
    /// "WaistSide_ThunderGolem" is part "WaistSide", variant
    /// "ThunderGolem". A name without an underscore gets the implicit
    /// "Default" variant. Leading or trailing underscores are rejected.
    pub fn parse(name: &str) -> Result<Self, ClassifyError> {
        if name.is_empty() {
            return Err(ClassifyError::Empty);
        }
        match name.rsplit_once('_') {
            None => Ok(Self {
                part: name.to_string(),
                variant: DEFAULT_VARIANT.to_string(),
            }),
            Some((part, variant)) => {
                if part.is_empty() {
                    return Err(ClassifyError::EmptyPart(name.to_string()));
                }
                if variant.is_empty() {
                    return Err(ClassifyError::EmptyVariant(name.to_string()));
                }
                Ok(Self {
                    part: part.to_string(),
                    variant: variant.to_string(),
                })
            }
        }
    }

    /// Whether this name carries the implicit "Default" variant.
    pub fn is_default(&self) -> bool {
        self.variant == DEFAULT_VARIANT
    }
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap())
}

/// Strip `prefix` off the front of `s`, ignoring ASCII case.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Extract the frame number from a frame file stem.
///
/// The sequence name and (for variant buckets) the variant name are
/// stripped off the front, case-insensitively so a lowercased export
/// doesn't leave digits from the category name in play. The first run
/// of digits in the remainder is the frame number. `None` means the
/// stem carries no usable number; callers report that instead of
/// fabricating a frame name.
pub fn frame_number(stem: &str, strip: &[&str]) -> Option<u64> {
    let mut rest = stem;
    for token in strip {
        if token.is_empty() {
            continue;
        }
        rest = strip_prefix_ci(rest, token).unwrap_or(rest);
        rest = rest.trim_start_matches('_');
    }
    let m = digits_re().find(rest)?;
    m.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_gets_default_variant() {
        let parsed = PartName::parse("Head").unwrap();
        assert_eq!(parsed.part, "Head");
        assert_eq!(parsed.variant, DEFAULT_VARIANT);
        assert!(parsed.is_default());
    }

    #[test]
    fn suffixed_name_splits_on_last_underscore() {
        let parsed = PartName::parse("Head_Red").unwrap();
        assert_eq!(parsed.part, "Head");
        assert_eq!(parsed.variant, "Red");

        let parsed = PartName::parse("WaistSide_ThunderGolem").unwrap();
        assert_eq!(parsed.part, "WaistSide");
        assert_eq!(parsed.variant, "ThunderGolem");
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert_eq!(PartName::parse(""), Err(ClassifyError::Empty));
        assert_eq!(
            PartName::parse("_Red"),
            Err(ClassifyError::EmptyPart("_Red".to_string()))
        );
        assert_eq!(
            PartName::parse("Head_"),
            Err(ClassifyError::EmptyVariant("Head_".to_string()))
        );
    }

    #[test]
    fn frame_number_strips_sequence_prefix() {
        assert_eq!(frame_number("TalonPowerOn_1", &["TalonPowerOn"]), Some(1));
        assert_eq!(frame_number("TalonPowerOn_12", &["TalonPowerOn"]), Some(12));
        assert_eq!(
            frame_number("TalonPowerOn_Red_3", &["TalonPowerOn", "Red"]),
            Some(3)
        );
    }

    #[test]
    fn frame_number_strips_prefix_case_insensitively() {
        assert_eq!(frame_number("swoosh01_3", &["Swoosh01"]), Some(3));
        assert_eq!(frame_number("TALONPOWERON_4", &["TalonPowerOn"]), Some(4));
    }

    #[test]
    fn frame_number_handles_bare_numeric_stems() {
        assert_eq!(frame_number("7", &["Swoosh01"]), Some(7));
    }

    #[test]
    fn frame_number_missing_digits_is_none() {
        assert_eq!(frame_number("TalonPowerOn", &["TalonPowerOn"]), None);
        assert_eq!(frame_number("sparkle", &["Web"]), None);
    }
}
