//! Natal-chart relationship and dasha bhava-activation engine.
//!
//! This crate provides:
//! - Rashi, nakshatra and navamsa classification of sidereal longitudes
//! - Sripati bhava boundaries with lagna-sequential bhava rashis
//! - Continuous bhava drishti strengths and one-sided (controlling) aspects
//! - Lordship cross-references, tiered bhava activation and dasha overlap
//! - A linear ayanamsha model and the seam to an external ephemeris
//!
//! Positions are never computed here. Build [`ChartInputs`] from tropical
//! or sidereal values, derive a [`ChartContext`], then query it.

pub mod activation;
pub mod ayanamsha;
pub mod bhava;
pub mod chart;
pub mod control;
pub mod dasha;
pub mod drishti;
pub mod ephemeris;
pub mod error;
pub mod graha;
pub mod lordship;
pub mod nakshatra;
pub mod navamsa;
pub mod rashi;
pub mod util;

pub use activation::{
    ActivationConfig, ActivationEntry, ActivationReason, Activations, Influence,
    house_activations,
};
pub use ayanamsha::{LinearAyanamsha, calendar_to_jd, tropical_to_sidereal};
pub use bhava::{Bhava, BhavaChart, bhava_rashi};
pub use chart::{
    AspectStrength, ChartContext, ChartInputs, ChartSummary, GrahaAnalysis, GrahaPlacement,
    ketu_from_rahu,
};
pub use control::{ControlMatrix, ControllingRelation, reaches};
pub use dasha::{
    ALL_DASHA_LEVELS, CommonBhava, DashaAnalysis, DashaLevel, DashaOverlap, DashaQuery,
    LevelBhavas, LevelReasons, MAX_REASONS_PER_LEVEL, compose_dasha,
};
pub use drishti::{
    BhavaDrishti, DEFAULT_ORBS, DrishtiConfig, aspect_distances, aspect_offset_deg,
    aspect_strength, bhava_drishti,
};
pub use ephemeris::{ALL_EPHEMERIS_BODIES, EphemerisBody, EphemerisProvider, GeoLocation};
pub use error::SambandhError;
pub use graha::{ALL_GRAHAS, Graha, nakshatra_lord, rashi_lords};
pub use lordship::{Lordship, LordshipLink};
pub use nakshatra::{ALL_NAKSHATRAS_27, Nakshatra, NakshatraInfo, nakshatra_from_longitude};
pub use navamsa::{NavamsaInfo, navamsa_from_longitude};
pub use rashi::{ALL_RASHIS, Dms, Modality, Rashi, RashiInfo, deg_to_dms, rashi_from_longitude};
pub use util::normalize_360;
