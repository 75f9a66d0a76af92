//! Chart-file configuration for the sambandh engine.
//!
//! Loads TOML chart files holding recorded positions, ayanamsha settings,
//! orb overrides and analysis defaults, and turns them into a
//! [`sambandh_base::ChartContext`].

pub mod chart_file;
pub mod error;
pub mod recorded;

pub use chart_file::{AnalysisDefaults, AyanamshaSetting, BirthDetails, ChartFile, PositionSet};
pub use error::ConfigError;
pub use recorded::RecordedEphemeris;
