use tracing::debug;

use vocab_core::model::WordDraft;

use super::mapping::RawGlossaryRow;
use super::{CsvStore, io_err, malformed_err};
use crate::name::GlossaryName;
use crate::repository::{GlossaryRepository, StorageError};

impl GlossaryRepository for CsvStore {
    fn load_words(&self, name: &GlossaryName) -> Result<Vec<WordDraft>, StorageError> {
        let path = self.glossary_path(name)?;
        if !path.exists() {
            return Err(StorageError::NotFound {
                name: name.to_string(),
            });
        }

        let mut reader = csv::Reader::from_path(&path).map_err(io_err)?;
        let mut drafts = Vec::new();
        for row in reader.deserialize::<RawGlossaryRow>() {
            let raw = row.map_err(malformed_err)?;
            drafts.push(raw.into_draft().map_err(malformed_err)?);
        }

        debug!(glossary = %name, rows = drafts.len(), "glossary rows loaded");
        Ok(drafts)
    }
}
