use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use thiserror::Error;

use crate::model::history::HistoryRecord;
use crate::model::ids::{SectionId, SubsectionId};
use crate::model::word::{WordDraft, WordEntry, WordStats};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GlossaryError {
    #[error("glossary contains no rows")]
    Empty,

    /// The persisted history table carries the same term twice. This is
    /// corrupt state and must not be merged silently.
    #[error("duplicate term in history: {term}")]
    DuplicateHistory { term: String },
}

//
// ─── GLOSSARY ──────────────────────────────────────────────────────────────────
//

/// The in-memory dataset for one glossary.
///
/// Entries are sorted by (section, subsection, term) at build time. That
/// fixed order is the basis for alphabetic traversal, and it makes every
/// (section-id, subsection-id) group occupy one contiguous index range.
#[derive(Debug, Clone, PartialEq)]
pub struct Glossary {
    entries: Vec<WordEntry>,
    sections: Vec<String>,
    subsections: Vec<Vec<String>>,
    counts: Vec<Vec<usize>>,
}

/// Result of assembling a glossary from raw rows.
///
/// `duplicates_removed` is data, not a side effect: the caller decides how
/// to report it.
#[derive(Debug, Clone, PartialEq)]
pub struct GlossaryBuild {
    pub glossary: Glossary,
    pub duplicates_removed: usize,
}

impl Glossary {
    /// Assemble a glossary from loader rows and an optional history table.
    ///
    /// - Rows sharing a term are deduplicated, first occurrence wins.
    /// - Rows are sorted by (section, subsection, term).
    /// - Section ids increase monotonically as the section value changes in
    ///   the sorted walk; subsection ids restart at 0 inside each section.
    /// - History is left-joined by term: matched rows take the persisted
    ///   stats, unmatched rows start untouched with `today` stamps. History
    ///   rows naming unknown terms are ignored.
    ///
    /// # Errors
    ///
    /// Returns `GlossaryError::Empty` when no rows are given and
    /// `GlossaryError::DuplicateHistory` when the history table itself
    /// repeats a term.
    pub fn build(
        drafts: Vec<WordDraft>,
        history: &[HistoryRecord],
        today: NaiveDate,
    ) -> Result<GlossaryBuild, GlossaryError> {
        let stats_by_term = index_history(history)?;

        let before = drafts.len();
        let mut rows = dedup_first_wins(drafts);
        let duplicates_removed = before - rows.len();

        if rows.is_empty() {
            return Err(GlossaryError::Empty);
        }

        rows.sort_by(|a, b| {
            (a.section(), a.subsection(), a.term()).cmp(&(b.section(), b.subsection(), b.term()))
        });

        let mut sections: Vec<String> = Vec::new();
        let mut subsections: Vec<Vec<String>> = Vec::new();
        let mut counts: Vec<Vec<usize>> = Vec::new();
        let mut entries: Vec<WordEntry> = Vec::with_capacity(rows.len());

        for row in rows {
            let new_section = sections.last().is_none_or(|s| s != row.section());
            if new_section {
                sections.push(row.section().to_string());
                subsections.push(vec![row.subsection().to_string()]);
                counts.push(vec![0]);
            } else {
                let current = subsections
                    .last_mut()
                    .expect("section list is non-empty inside the walk");
                if current.last().is_none_or(|ss| ss != row.subsection()) {
                    current.push(row.subsection().to_string());
                    counts
                        .last_mut()
                        .expect("counts stay parallel to sections")
                        .push(0);
                }
            }

            let section_id = SectionId::new(sections.len() - 1);
            let subsection_id = SubsectionId::new(
                subsections
                    .last()
                    .expect("section list is non-empty inside the walk")
                    .len()
                    - 1,
            );
            *counts
                .last_mut()
                .expect("counts stay parallel to sections")
                .last_mut()
                .expect("subsection counts are non-empty inside the walk") += 1;

            let stats = stats_by_term
                .get(row.term())
                .map_or_else(|| WordStats::untouched(today), |record| record.to_stats());

            entries.push(WordEntry::new(row, section_id, subsection_id, stats));
        }

        Ok(GlossaryBuild {
            glossary: Self {
                entries,
                sections,
                subsections,
                counts,
            },
            duplicates_removed,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, ix: usize) -> Option<&WordEntry> {
        self.entries.get(ix)
    }

    /// Mutable access to one entry, for the session that owns the counters.
    #[must_use]
    pub fn entry_mut(&mut self, ix: usize) -> Option<&mut WordEntry> {
        self.entries.get_mut(ix)
    }

    #[must_use]
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    #[must_use]
    pub fn section_name(&self, id: SectionId) -> Option<&str> {
        self.sections.get(id.value()).map(String::as_str)
    }

    #[must_use]
    pub fn subsection_names(&self, id: SectionId) -> Option<&[String]> {
        self.subsections.get(id.value()).map(Vec::as_slice)
    }

    #[must_use]
    pub fn subsection_name(&self, section: SectionId, subsection: SubsectionId) -> Option<&str> {
        self.subsections
            .get(section.value())
            .and_then(|names| names.get(subsection.value()))
            .map(String::as_str)
    }

    /// Word counts per subsection, parallel to `sections`/`subsection_names`.
    #[must_use]
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    /// The savable history subset: one record per attempted entry, in
    /// dataset order.
    #[must_use]
    pub fn history_rows(&self) -> Vec<HistoryRecord> {
        self.entries
            .iter()
            .filter(|entry| entry.attempted())
            .map(HistoryRecord::from_entry)
            .collect()
    }
}

fn index_history(
    history: &[HistoryRecord],
) -> Result<HashMap<&str, &HistoryRecord>, GlossaryError> {
    let mut by_term: HashMap<&str, &HistoryRecord> = HashMap::with_capacity(history.len());
    for record in history {
        if by_term.insert(record.term.as_str(), record).is_some() {
            return Err(GlossaryError::DuplicateHistory {
                term: record.term.clone(),
            });
        }
    }
    Ok(by_term)
}

fn dedup_first_wins(drafts: Vec<WordDraft>) -> Vec<WordDraft> {
    let mut seen: HashSet<String> = HashSet::with_capacity(drafts.len());
    drafts
        .into_iter()
        .filter(|draft| seen.insert(draft.term().to_string()))
        .collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
