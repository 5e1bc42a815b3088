use chrono::NaiveDate;
use thiserror::Error;

use crate::model::ids::{SectionId, SubsectionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("word term cannot be empty")]
    EmptyTerm,

    #[error("section name cannot be empty")]
    EmptySection,

    #[error("subsection name cannot be empty")]
    EmptySubsection,
}

//
// ─── WORD DRAFT ────────────────────────────────────────────────────────────────
//

/// Unvalidated glossary row as read by a loader, before grouping and history
/// merge. The translation may legitimately be empty (a glossary row with no
/// target-language columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDraft {
    term: String,
    translation: String,
    section: String,
    subsection: String,
}

impl WordDraft {
    /// Validate and normalize a raw glossary row.
    ///
    /// All fields are trimmed; `term`, `section` and `subsection` must be
    /// non-empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns `WordError` naming the first empty required field.
    pub fn new(
        term: impl Into<String>,
        translation: impl Into<String>,
        section: impl Into<String>,
        subsection: impl Into<String>,
    ) -> Result<Self, WordError> {
        let term = term.into().trim().to_string();
        let translation = translation.into().trim().to_string();
        let section = section.into().trim().to_string();
        let subsection = subsection.into().trim().to_string();

        if term.is_empty() {
            return Err(WordError::EmptyTerm);
        }
        if section.is_empty() {
            return Err(WordError::EmptySection);
        }
        if subsection.is_empty() {
            return Err(WordError::EmptySubsection);
        }

        Ok(Self {
            term,
            translation,
            section,
            subsection,
        })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.section
    }

    #[must_use]
    pub fn subsection(&self) -> &str {
        &self.subsection
    }
}

//
// ─── WORD STATS ────────────────────────────────────────────────────────────────
//

/// Accumulated right/wrong feedback for one word.
///
/// Counters only ever grow; each recorded answer bumps exactly one of them
/// and stamps the matching date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordStats {
    ok: u32,
    not_ok: u32,
    last_ok: NaiveDate,
    last_not_ok: NaiveDate,
}

impl WordStats {
    /// Stats for a word that has never been attempted: zero counts, both
    /// date stamps set to `today`.
    #[must_use]
    pub fn untouched(today: NaiveDate) -> Self {
        Self {
            ok: 0,
            not_ok: 0,
            last_ok: today,
            last_not_ok: today,
        }
    }

    /// Rebuild stats from persisted history values.
    #[must_use]
    pub fn from_persisted(ok: u32, not_ok: u32, last_ok: NaiveDate, last_not_ok: NaiveDate) -> Self {
        Self {
            ok,
            not_ok,
            last_ok,
            last_not_ok,
        }
    }

    /// Record a correct answer given on `today`.
    pub fn record_ok(&mut self, today: NaiveDate) {
        self.ok += 1;
        self.last_ok = today;
    }

    /// Record a wrong answer given on `today`.
    pub fn record_miss(&mut self, today: NaiveDate) {
        self.not_ok += 1;
        self.last_not_ok = today;
    }

    #[must_use]
    pub fn ok(&self) -> u32 {
        self.ok
    }

    #[must_use]
    pub fn not_ok(&self) -> u32 {
        self.not_ok
    }

    #[must_use]
    pub fn last_ok(&self) -> NaiveDate {
        self.last_ok
    }

    #[must_use]
    pub fn last_not_ok(&self) -> NaiveDate {
        self.last_not_ok
    }

    /// Wrong minus right answers. Higher means more mistake-prone.
    #[must_use]
    pub fn net_errors(&self) -> i64 {
        i64::from(self.not_ok) - i64::from(self.ok)
    }

    /// True once at least one answer has been recorded.
    #[must_use]
    pub fn attempted(&self) -> bool {
        self.ok + self.not_ok > 0
    }
}

//
// ─── WORD ENTRY ────────────────────────────────────────────────────────────────
//

/// One vocabulary entry of a loaded glossary.
///
/// Group ids are assigned by `Glossary::build` before any entry exists, so an
/// entry can never carry an unresolved group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    term: String,
    translation: String,
    section_id: SectionId,
    subsection_id: SubsectionId,
    stats: WordStats,
}

impl WordEntry {
    #[must_use]
    pub fn new(
        draft: WordDraft,
        section_id: SectionId,
        subsection_id: SubsectionId,
        stats: WordStats,
    ) -> Self {
        Self {
            term: draft.term,
            translation: draft.translation,
            section_id,
            subsection_id,
            stats,
        }
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    #[must_use]
    pub fn section_id(&self) -> SectionId {
        self.section_id
    }

    #[must_use]
    pub fn subsection_id(&self) -> SubsectionId {
        self.subsection_id
    }

    #[must_use]
    pub fn stats(&self) -> &WordStats {
        &self.stats
    }

    /// Record a correct answer given on `today`.
    pub fn record_ok(&mut self, today: NaiveDate) {
        self.stats.record_ok(today);
    }

    /// Record a wrong answer given on `today`.
    pub fn record_miss(&mut self, today: NaiveDate) {
        self.stats.record_miss(today);
    }

    /// Wrong minus right answers for this entry.
    #[must_use]
    pub fn net_errors(&self) -> i64 {
        self.stats.net_errors()
    }

    /// True once this entry has received any recorded feedback.
    #[must_use]
    pub fn attempted(&self) -> bool {
        self.stats.attempted()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
