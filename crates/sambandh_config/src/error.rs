//! Error types for chart-file loading.

use std::error::Error;
use std::fmt::{Display, Formatter};

use sambandh_base::SambandhError;

/// Errors from reading, parsing or validating a chart file.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    Io(String),
    /// The file is not valid TOML or does not match the schema.
    Parse(String),
    /// A value is out of range or sections conflict.
    Invalid(String),
    /// The engine rejected the assembled inputs.
    Chart(SambandhError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid chart file: {msg}"),
            Self::Chart(e) => write!(f, "chart error: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Chart(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SambandhError> for ConfigError {
    fn from(e: SambandhError) -> Self {
        Self::Chart(e)
    }
}
