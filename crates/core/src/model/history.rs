use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::word::{WordEntry, WordStats};

/// Persisted performance row for one word, keyed by term.
///
/// This mirrors `WordStats` so storage adapters can serialize history tables
/// without leaking file-format concerns into the domain layer. Dates are
/// date-only (`YYYY-MM-DD` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub term: String,
    pub ok: u32,
    pub not_ok: u32,
    pub last_ok: NaiveDate,
    pub last_not_ok: NaiveDate,
}

impl HistoryRecord {
    #[must_use]
    pub fn from_entry(entry: &WordEntry) -> Self {
        let stats = entry.stats();
        Self {
            term: entry.term().to_string(),
            ok: stats.ok(),
            not_ok: stats.not_ok(),
            last_ok: stats.last_ok(),
            last_not_ok: stats.last_not_ok(),
        }
    }

    /// Convert the record back into in-memory stats.
    #[must_use]
    pub fn to_stats(&self) -> WordStats {
        WordStats::from_persisted(self.ok, self.not_ok, self.last_ok, self.last_not_ok)
    }
}
