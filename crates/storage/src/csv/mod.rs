use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::name::{GlossaryName, NameError, path_is_safe};
use crate::repository::{GlossaryRepository, HistoryRepository, StorageError, Store};

mod glossary_repo;
mod history_repo;
mod mapping;

/// Flat-file store keeping glossaries and history tables as headered CSV
/// files under one data directory (`glossary/<name>.csv`,
/// `history/<name>.csv`).
#[derive(Debug, Clone)]
pub struct CsvStore {
    glossary_dir: PathBuf,
    history_dir: PathBuf,
}

const GLOSSARY_SUBDIR: &str = "glossary";
const HISTORY_SUBDIR: &str = "history";

impl CsvStore {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let root = data_dir.into();
        Self {
            glossary_dir: root.join(GLOSSARY_SUBDIR),
            history_dir: root.join(HISTORY_SUBDIR),
        }
    }

    pub(crate) fn glossary_path(&self, name: &GlossaryName) -> Result<PathBuf, NameError> {
        checked_path(&self.glossary_dir, GLOSSARY_SUBDIR, name)
    }

    pub(crate) fn history_path(&self, name: &GlossaryName) -> Result<PathBuf, NameError> {
        checked_path(&self.history_dir, HISTORY_SUBDIR, name)
    }
}

/// The relative form of the path is what gets vetted; the returned path is
/// anchored under the store's data directory.
fn checked_path(dir: &Path, subdir: &str, name: &GlossaryName) -> Result<PathBuf, NameError> {
    let file = format!("{name}.csv");
    let relative = format!("{subdir}/{file}");
    if !path_is_safe(&relative) {
        return Err(NameError::UnsafePath { path: relative });
    }
    Ok(dir.join(file))
}

pub(crate) fn io_err(e: impl core::fmt::Display) -> StorageError {
    StorageError::Io(e.to_string())
}

pub(crate) fn malformed_err(e: impl core::fmt::Display) -> StorageError {
    StorageError::Malformed(e.to_string())
}

impl Store {
    /// Build a `Store` backed by CSV files under `data_dir`.
    #[must_use]
    pub fn csv(data_dir: impl Into<PathBuf>) -> Self {
        let store = CsvStore::new(data_dir);
        let glossaries: Arc<dyn GlossaryRepository> = Arc::new(store.clone());
        let histories: Arc<dyn HistoryRepository> = Arc::new(store);
        Self {
            glossaries,
            histories,
        }
    }
}
