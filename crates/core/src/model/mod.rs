mod glossary;
mod history;
mod ids;
mod word;

pub use glossary::{Glossary, GlossaryBuild, GlossaryError};
pub use history::HistoryRecord;
pub use ids::{SectionId, SubsectionId};
pub use word::{WordDraft, WordEntry, WordError, WordStats};
