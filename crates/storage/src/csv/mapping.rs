use serde::Deserialize;

use vocab_core::model::{WordDraft, WordError};

/// Raw glossary row as it appears on disk.
///
/// A glossary either carries a direct `translation` column or per-language
/// columns that get merged into one translation at load time.
#[derive(Debug, Deserialize)]
pub(crate) struct RawGlossaryRow {
    pub term: String,
    #[serde(default)]
    pub translation: Option<String>,
    #[serde(default)]
    pub spanish: Option<String>,
    #[serde(default)]
    pub english: Option<String>,
    pub section: String,
    pub subsection: String,
}

impl RawGlossaryRow {
    /// Convert the raw row into a validated loader draft.
    ///
    /// # Errors
    ///
    /// Returns `WordError` if a required field is empty.
    pub(crate) fn into_draft(self) -> Result<WordDraft, WordError> {
        let translation = effective_translation(self.translation, self.spanish, self.english);
        WordDraft::new(self.term, translation, self.section, self.subsection)
    }
}

/// A non-empty direct translation wins; otherwise the per-language fields
/// merge: both absent gives an empty translation, one present is used as-is,
/// both present concatenate with a comma-space separator.
fn effective_translation(
    direct: Option<String>,
    spanish: Option<String>,
    english: Option<String>,
) -> String {
    if let Some(direct) = non_empty(direct) {
        return direct;
    }
    match (non_empty(spanish), non_empty(english)) {
        (Some(es), Some(en)) => format!("{es}, {en}"),
        (Some(es), None) => es,
        (None, Some(en)) => en,
        (None, None) => String::new(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
