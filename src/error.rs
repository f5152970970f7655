//! Error types for map and settings I/O.
//!
//! The simulation core has no recoverable errors; everything that can fail
//! lives at the file boundary and is reported through these enums so callers
//! can tell "no map found" apart from "map loaded empty".

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to read, parse or write a map file.
#[derive(Debug)]
pub enum MapError {
    /// The file could not be opened, read or written.
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        source: io::Error,
    },

    /// The token stream ended before a required field.
    UnexpectedEnd {
        /// Field that was expected next.
        expected: &'static str,
    },

    /// A line began with the wrong keyword.
    Keyword {
        expected: &'static str,
        found: String,
    },

    /// A numeric token could not be parsed.
    Number {
        /// Field the token was destined for.
        field: &'static str,
        token: String,
    },

    /// A parsed value violates a geometric invariant.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io { path, source } => {
                write!(f, "map file '{}': {}", path.display(), source)
            }
            MapError::UnexpectedEnd { expected } => {
                write!(f, "map ended early: expected {}", expected)
            }
            MapError::Keyword { expected, found } => {
                write!(f, "expected keyword '{}', found '{}'", expected, found)
            }
            MapError::Number { field, token } => {
                write!(f, "invalid number '{}' for {}", token, field)
            }
            MapError::Invalid { field, reason } => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Failure to read or write the settings file.
#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io { path, source } => {
                write!(f, "settings file '{}': {}", path.display(), source)
            }
            SettingsError::Json(e) => write!(f, "settings json: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io { source, .. } => Some(source),
            SettingsError::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}
