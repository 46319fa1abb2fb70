//! Error types for style building.
//!
//! Every fallible operation in this crate returns [`StyleError`]. Errors are never
//! retried or recovered internally: a build either yields a complete
//! [`StyleDocument`](crate::StyleDocument) or fails with one of these.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The two lookup surfaces a rule generator can dereference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    /// Named colors (`colors.<name>`).
    Colors,
    /// Named fonts (`fonts.<name>`).
    Fonts,
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Surface::Colors => write!(f, "colors"),
            Surface::Fonts => write!(f, "fonts"),
        }
    }
}

/// Errors that can occur when configuring a builder or building a style.
#[derive(Debug, Error)]
pub enum StyleError {
    /// A required argument was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A generator dereferenced a color or font name that is not registered.
    #[error("unknown reference: {surface}.{name}")]
    UnknownReference { surface: Surface, name: String },

    /// A registered color value could not be parsed when it was dereferenced.
    #[error("invalid color for colors.{name}: '{value}' ({reason})")]
    InvalidColor {
        name: String,
        value: String,
        reason: String,
    },

    /// A generator returned a malformed rule set.
    #[error("invalid rule set: {0}")]
    InvalidRuleSet(String),

    /// The template declares no sources and no source name was given.
    #[error("style template declares no sources and no source name was given")]
    MissingSource,

    /// Option overrides could not be loaded.
    #[error("{}", config_message(.path, .message))]
    Config {
        path: Option<PathBuf>,
        message: String,
    },
}

fn config_message(path: &Option<PathBuf>, message: &str) -> String {
    match path {
        Some(p) => format!("failed to load style options from {}: {}", p.display(), message),
        None => format!("failed to load style options: {}", message),
    }
}

impl StyleError {
    /// Shorthand for an [`UnknownReference`](StyleError::UnknownReference) error.
    pub fn unknown(surface: Surface, name: impl Into<String>) -> Self {
        StyleError::UnknownReference {
            surface,
            name: name.into(),
        }
    }

    /// Returns the `surface.name` pair for unknown-reference errors.
    pub fn reference(&self) -> Option<(Surface, &str)> {
        match self {
            StyleError::UnknownReference { surface, name } => Some((*surface, name.as_str())),
            _ => None,
        }
    }
}

/// Result type for style operations.
pub type Result<T> = std::result::Result<T, StyleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_reference_display() {
        let err = StyleError::unknown(Surface::Fonts, "title");
        assert_eq!(err.to_string(), "unknown reference: fonts.title");
        assert_eq!(err.reference(), Some((Surface::Fonts, "title")));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = StyleError::InvalidArgument("every style should have an id".into());
        assert!(err.to_string().contains("every style should have an id"));
        assert_eq!(err.reference(), None);
    }

    #[test]
    fn test_config_display_with_path() {
        let err = StyleError::Config {
            path: Some(PathBuf::from("/tmp/options.yaml")),
            message: "bad indent".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/options.yaml"));
        assert!(msg.contains("bad indent"));
    }

    #[test]
    fn test_config_display_without_path() {
        let err = StyleError::Config {
            path: None,
            message: "expected a mapping".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load style options: expected a mapping"
        );
    }
}
