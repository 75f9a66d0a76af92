//! Error types for chart relationship calculations.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised while assembling chart inputs or parsing names.
///
/// Chart analysis itself is total; these only surface at the edges where
/// raw values or user-provided names enter the engine.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SambandhError {
    /// Graha name not recognized.
    UnknownGraha(String),
    /// A dasha period string did not name exactly three grahas.
    InvalidDashaPeriod(String),
    /// A longitude or cusp was NaN or infinite.
    NonFiniteInput(&'static str),
    /// The ephemeris provider failed.
    Ephemeris(String),
}

impl Display for SambandhError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownGraha(name) => write!(f, "unknown graha: {name}"),
            Self::InvalidDashaPeriod(s) => {
                write!(f, "invalid dasha period '{s}': expected MAHA/ANTAR/PRATYANTAR")
            }
            Self::NonFiniteInput(what) => write!(f, "non-finite input: {what}"),
            Self::Ephemeris(msg) => write!(f, "ephemeris error: {msg}"),
        }
    }
}

impl Error for SambandhError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_graha() {
        let e = SambandhError::UnknownGraha("Pluto".into());
        assert_eq!(e.to_string(), "unknown graha: Pluto");
    }

    #[test]
    fn display_non_finite() {
        let e = SambandhError::NonFiniteInput("cusp 4");
        assert_eq!(e.to_string(), "non-finite input: cusp 4");
    }
}
