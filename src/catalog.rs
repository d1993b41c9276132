//! Sequence catalog - the table of known animation and effect categories.
//!
//! Animation and effect names are data, not code: the catalog maps a
//! category name to its kind so new categories can be added without
//! touching the scan or organize logic.

/// Kind of a frame sequence category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// Multi-frame animation, optionally keyed by variant (e.g. "TalonPowerOn_Red")
    Animation,
    /// Effect sequence, never keyed by variant
    Effect,
}

/// One named sequence category.
#[derive(Debug, Clone)]
pub struct SequenceSpec {
    pub name: String,
    pub kind: SequenceKind,
}

impl SequenceSpec {
    pub fn new(name: impl Into<String>, kind: SequenceKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// The set of sequence categories plus the name prefixes reserved for them.
///
/// Reserved prefixes keep sequence-family directories (e.g. "Swoosh99")
/// out of body-part discovery even when no exact category matches.
#[derive(Debug, Clone)]
pub struct Catalog {
    sequences: Vec<SequenceSpec>,
    reserved_prefixes: Vec<String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            sequences: vec![
                SequenceSpec::new("TalonPowerOn", SequenceKind::Animation),
                SequenceSpec::new("TalonPowerOff", SequenceKind::Animation),
                SequenceSpec::new("Swoosh01", SequenceKind::Effect),
                SequenceSpec::new("Swoosh02", SequenceKind::Effect),
                SequenceSpec::new("Swoosh03", SequenceKind::Effect),
                SequenceSpec::new("Swoosh04", SequenceKind::Effect),
                SequenceSpec::new("Web", SequenceKind::Effect),
            ],
            reserved_prefixes: vec!["Swoosh".to_string(), "TalonPower".to_string()],
        }
    }
}

impl Catalog {
    /// Build a catalog from explicit entries and reserved prefixes.
    pub fn new(sequences: Vec<SequenceSpec>, reserved_prefixes: Vec<String>) -> Self {
        Self { sequences, reserved_prefixes }
    }

    /// All animation categories, in table order.
    pub fn animations(&self) -> impl Iterator<Item = &SequenceSpec> {
        self.sequences.iter().filter(|s| s.kind == SequenceKind::Animation)
    }

    /// All effect categories, in table order.
    pub fn effects(&self) -> impl Iterator<Item = &SequenceSpec> {
        self.sequences.iter().filter(|s| s.kind == SequenceKind::Effect)
    }

    /// Whether a directory or part name belongs to a sequence family and
    /// must be excluded from body-part handling.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.sequences.iter().any(|s| s.name == name)
            || self.reserved_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_both_kinds() {
        let catalog = Catalog::default();
        assert_eq!(catalog.animations().count(), 2);
        assert_eq!(catalog.effects().count(), 5);
    }

    #[test]
    fn reserved_matches_exact_names_and_prefixes() {
        let catalog = Catalog::default();
        assert!(catalog.is_reserved("Web"));
        assert!(catalog.is_reserved("Swoosh01"));
        assert!(catalog.is_reserved("Swoosh99"));
        assert!(catalog.is_reserved("TalonPowerOn"));
        assert!(!catalog.is_reserved("Head"));
        assert!(!catalog.is_reserved("Wing_Red"));
    }

    #[test]
    fn custom_catalog_drives_reservation() {
        let catalog = Catalog::new(
            vec![SequenceSpec::new("Sparkle", SequenceKind::Effect)],
            vec![],
        );
        assert!(catalog.is_reserved("Sparkle"));
        assert!(!catalog.is_reserved("Web"));
    }
}
