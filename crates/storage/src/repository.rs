use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use vocab_core::model::{HistoryRecord, WordDraft};

use crate::name::{GlossaryName, NameError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("glossary not found: {name}")]
    NotFound { name: String },

    #[error(transparent)]
    Name(#[from] NameError),

    #[error("io error: {0}")]
    Io(String),

    #[error("malformed row: {0}")]
    Malformed(String),
}

//
// ─── REPOSITORY CONTRACTS ──────────────────────────────────────────────────────
//

/// Repository contract for glossary word tables.
pub trait GlossaryRepository: Send + Sync {
    /// Read all raw word rows for a glossary.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the glossary does not exist, or
    /// other storage errors.
    fn load_words(&self, name: &GlossaryName) -> Result<Vec<WordDraft>, StorageError>;
}

/// Repository contract for per-glossary performance history.
pub trait HistoryRepository: Send + Sync {
    /// Read the history table, if one exists.
    ///
    /// A missing history is not an error: it means "no history yet" and
    /// returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if an existing table cannot be read.
    fn load_history(&self, name: &GlossaryName)
    -> Result<Option<Vec<HistoryRecord>>, StorageError>;

    /// Overwrite the history table with the given rows.
    ///
    /// No merge happens here; merging with prior history is a load-time
    /// concern.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the table cannot be written.
    fn save_history(
        &self,
        name: &GlossaryName,
        rows: &[HistoryRecord],
    ) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY STORE ───────────────────────────────────────────────────────────
//

/// Simple in-memory store implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    glossaries: Arc<Mutex<HashMap<String, Vec<WordDraft>>>>,
    histories: Arc<Mutex<HashMap<String, Vec<HistoryRecord>>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            glossaries: Arc::new(Mutex::new(HashMap::new())),
            histories: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Seed a glossary's raw rows.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the store mutex is poisoned.
    pub fn insert_glossary(
        &self,
        name: &GlossaryName,
        rows: Vec<WordDraft>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .glossaries
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.insert(name.as_str().to_string(), rows);
        Ok(())
    }
}

impl GlossaryRepository for InMemoryStore {
    fn load_words(&self, name: &GlossaryName) -> Result<Vec<WordDraft>, StorageError> {
        let guard = self
            .glossaries
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                name: name.to_string(),
            })
    }
}

impl HistoryRepository for InMemoryStore {
    fn load_history(
        &self,
        name: &GlossaryName,
    ) -> Result<Option<Vec<HistoryRecord>>, StorageError> {
        let guard = self
            .histories
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.get(name.as_str()).cloned())
    }

    fn save_history(
        &self,
        name: &GlossaryName,
        rows: &[HistoryRecord],
    ) -> Result<(), StorageError> {
        let mut guard = self
            .histories
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.insert(name.as_str().to_string(), rows.to_vec());
        Ok(())
    }
}

//
// ─── STORE AGGREGATE ───────────────────────────────────────────────────────────
//

/// Aggregates glossary and history repositories behind trait objects for easy
/// backend swapping.
#[derive(Clone)]
pub struct Store {
    pub glossaries: Arc<dyn GlossaryRepository>,
    pub histories: Arc<dyn HistoryRepository>,
}

impl Store {
    #[must_use]
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        let glossaries: Arc<dyn GlossaryRepository> = Arc::new(store.clone());
        let histories: Arc<dyn HistoryRepository> = Arc::new(store);
        Self {
            glossaries,
            histories,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
