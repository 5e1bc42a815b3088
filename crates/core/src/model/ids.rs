use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a section within one glossary.
///
/// Section ids are dense indices assigned in glossary sort order, so they
/// double as positions into the glossary's section table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(usize);

impl SectionId {
    /// Creates a new `SectionId`
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the underlying index value
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }
}

/// Identifier of a subsection, scoped to its section.
///
/// Subsection ids restart at 0 inside every section.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubsectionId(usize);

impl SubsectionId {
    /// Creates a new `SubsectionId`
    #[must_use]
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the underlying index value
    #[must_use]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SectionId({})", self.0)
    }
}

impl fmt::Debug for SubsectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubsectionId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SubsectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_id_display() {
        let id = SectionId::new(3);
        assert_eq!(id.to_string(), "3");
    }

    #[test]
    fn subsection_id_debug() {
        let id = SubsectionId::new(0);
        assert_eq!(format!("{id:?}"), "SubsectionId(0)");
    }

    #[test]
    fn ids_order_by_index() {
        assert!(SectionId::new(0) < SectionId::new(1));
        assert!(SubsectionId::new(2) > SubsectionId::new(1));
    }
}
