use std::fs;

use tracing::info;

use vocab_core::model::HistoryRecord;

use super::{CsvStore, io_err, malformed_err};
use crate::name::GlossaryName;
use crate::repository::{HistoryRepository, StorageError};

impl HistoryRepository for CsvStore {
    fn load_history(
        &self,
        name: &GlossaryName,
    ) -> Result<Option<Vec<HistoryRecord>>, StorageError> {
        let path = self.history_path(name)?;
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = csv::Reader::from_path(&path).map_err(io_err)?;
        let mut rows = Vec::new();
        for row in reader.deserialize::<HistoryRecord>() {
            rows.push(row.map_err(malformed_err)?);
        }
        Ok(Some(rows))
    }

    fn save_history(
        &self,
        name: &GlossaryName,
        rows: &[HistoryRecord],
    ) -> Result<(), StorageError> {
        let path = self.history_path(name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        // Write to a sibling temp file and rename, so an interrupted save
        // never leaves a half-written table behind.
        let tmp = path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp).map_err(io_err)?;
            for row in rows {
                writer.serialize(row).map_err(io_err)?;
            }
            writer.flush().map_err(io_err)?;
        }
        fs::rename(&tmp, &path).map_err(io_err)?;

        info!(glossary = %name, rows = rows.len(), "history saved");
        Ok(())
    }
}
