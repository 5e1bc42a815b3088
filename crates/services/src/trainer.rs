use std::sync::Arc;

use tracing::{info, warn};

use storage::repository::{GlossaryRepository, HistoryRepository, Store};
use vocab_core::model::Glossary;
use vocab_core::time::Clock;

use crate::config::SessionConfig;
use crate::error::TrainerError;
use crate::review_session::ReviewSession;

/// Orchestrates one glossary run: load and merge, hand out a session, save
/// the history subset at the end.
#[derive(Clone)]
pub struct Trainer {
    clock: Clock,
    glossaries: Arc<dyn GlossaryRepository>,
    histories: Arc<dyn HistoryRepository>,
}

impl Trainer {
    #[must_use]
    pub fn new(
        clock: Clock,
        glossaries: Arc<dyn GlossaryRepository>,
        histories: Arc<dyn HistoryRepository>,
    ) -> Self {
        Self {
            clock,
            glossaries,
            histories,
        }
    }

    /// Convenience constructor over an assembled `Store`.
    #[must_use]
    pub fn from_store(clock: Clock, store: &Store) -> Self {
        Self::new(
            clock,
            Arc::clone(&store.glossaries),
            Arc::clone(&store.histories),
        )
    }

    /// Load the configured glossary, merge its history and start a session.
    ///
    /// # Errors
    ///
    /// Returns `TrainerError` for storage failures, a corrupt history table
    /// or an empty glossary.
    pub fn start_session(&self, config: &SessionConfig) -> Result<ReviewSession, TrainerError> {
        let drafts = self.glossaries.load_words(&config.glossary)?;
        let history = self
            .histories
            .load_history(&config.glossary)?
            .unwrap_or_default();

        let built = Glossary::build(drafts, &history, self.clock.today())?;
        if built.duplicates_removed > 0 {
            warn!(
                glossary = %config.glossary,
                removed = built.duplicates_removed,
                "dropped duplicated glossary rows"
            );
        }

        let session = ReviewSession::new(
            built.glossary,
            config.policy,
            config.foreign_in_front,
            self.clock,
        )?;
        info!(
            glossary = %config.glossary,
            policy = config.policy.name(),
            words = session.len(),
            "review session started"
        );
        Ok(session)
    }

    /// Persist the session's attempted rows, overwriting any prior table.
    ///
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns `TrainerError::Storage` if the table cannot be written.
    pub fn finish_session(
        &self,
        config: &SessionConfig,
        session: ReviewSession,
    ) -> Result<usize, TrainerError> {
        let glossary = session.into_glossary();
        let rows = glossary.history_rows();
        self.histories.save_history(&config.glossary, &rows)?;
        info!(glossary = %config.glossary, rows = rows.len(), "session history persisted");
        Ok(rows.len())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
