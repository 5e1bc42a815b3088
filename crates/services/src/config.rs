use storage::name::GlossaryName;
use vocab_core::ordering::OrderingPolicy;

use crate::error::ConfigError;

/// Startup configuration for one review session.
///
/// Built once by the caller from arguments or environment and passed down
/// explicitly; nothing here lives in global state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub glossary: GlossaryName,
    pub policy: OrderingPolicy,
    /// When true the source-language word is shown first and the translation
    /// is the solution; when false the fields swap.
    pub foreign_in_front: bool,
}

impl SessionConfig {
    #[must_use]
    pub fn new(glossary: GlossaryName, policy: OrderingPolicy, foreign_in_front: bool) -> Self {
        Self {
            glossary,
            policy,
            foreign_in_front,
        }
    }

    /// Resolve a configuration from raw string values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the glossary name fails validation or the
    /// ordering name/sigma cannot be resolved.
    pub fn from_names(
        glossary: &str,
        ordering: &str,
        sigma: Option<f64>,
        foreign_in_front: bool,
    ) -> Result<Self, ConfigError> {
        let glossary = GlossaryName::new(glossary)?;
        let policy = OrderingPolicy::from_name(ordering, sigma)?;
        Ok(Self::new(glossary, policy, foreign_in_front))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::name::NameError;
    use vocab_core::ordering::OrderingError;

    #[test]
    fn resolves_from_raw_names() {
        let config = SessionConfig::from_names("animali", "net-errors", None, true).unwrap();
        assert_eq!(config.glossary.as_str(), "animali");
        assert_eq!(config.policy, OrderingPolicy::NetErrors);
        assert!(config.foreign_in_front);
    }

    #[test]
    fn bad_name_fails_before_any_ordering_check() {
        let err = SessionConfig::from_names("../animali", "random", None, true).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Name(NameError::InvalidName { .. })
        ));
    }

    #[test]
    fn unknown_ordering_is_rejected() {
        let err = SessionConfig::from_names("animali", "fsrs", None, true).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Ordering(OrderingError::UnknownPolicy(_))
        ));
    }
}
