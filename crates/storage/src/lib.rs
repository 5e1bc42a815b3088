#![forbid(unsafe_code)]

pub mod csv;
pub mod name;
pub mod repository;

pub use csv::CsvStore;
pub use name::{GlossaryName, NameError};
pub use repository::{GlossaryRepository, HistoryRepository, InMemoryStore, StorageError, Store};
