#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod review_session;
pub mod trainer;

pub use vocab_core::Clock;

pub use config::SessionConfig;
pub use error::{ConfigError, SessionError, TrainerError};
pub use review_session::{CursorState, ReviewSession};
pub use trainer::Trainer;
