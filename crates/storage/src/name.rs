use std::fmt;
use std::path::{Component, Path};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9\-_]*[a-zA-Z0-9]$").expect("name pattern is valid")
});

// Windows-specific reserved device names.
static RESERVED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[1-9]|lpt[1-9])$").expect("reserved pattern is valid")
});

const UNSAFE_ELEMENTS: [&str; 11] = ["..", "$", "\\", ":", "*", "?", "\"", "'", "<", ">", "|"];

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NameError {
    #[error("invalid glossary name: '{name}'")]
    InvalidName { name: String },

    #[error("derived file path is unsafe: '{path}'")]
    UnsafePath { path: String },
}

//
// ─── GLOSSARY NAME ─────────────────────────────────────────────────────────────
//

/// A glossary name validated against the safe-filename pattern.
///
/// Names are used directly to build file paths, so they are constrained to
/// alphanumerics, hyphens and underscores, starting and ending with a letter
/// or digit. Validation runs before any file access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlossaryName(String);

impl GlossaryName {
    /// Validate a raw glossary name.
    ///
    /// # Errors
    ///
    /// Returns `NameError::InvalidName` when the name does not match the
    /// safe-filename pattern.
    pub fn new(name: impl Into<String>) -> Result<Self, NameError> {
        let name = name.into();
        if !NAME_PATTERN.is_match(&name) {
            return Err(NameError::InvalidName { name });
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlossaryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check that a relative path is safe to touch.
///
/// Rejects parent-directory segments, absolute paths, forbidden characters
/// and OS-reserved device names as any path component.
#[must_use]
pub fn path_is_safe(path: &str) -> bool {
    if path.is_empty() {
        return false;
    }
    if UNSAFE_ELEMENTS.iter().any(|element| path.contains(element)) {
        return false;
    }

    let path = Path::new(path);
    if path.is_absolute() {
        return false;
    }
    for component in path.components() {
        let Component::Normal(part) = component else {
            return false;
        };
        let Some(part) = part.to_str() else {
            return false;
        };
        if RESERVED_PATTERN.is_match(part) {
            return false;
        }
    }

    true
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
