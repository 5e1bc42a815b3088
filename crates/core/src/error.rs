use thiserror::Error;

use crate::model::{GlossaryError, WordError};
use crate::ordering::OrderingError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Glossary(#[from] GlossaryError),
    #[error(transparent)]
    Ordering(#[from] OrderingError),
}
