//! Seam to an external ephemeris provider.
//!
//! The engine never computes positions itself. A provider hands over
//! tropical ecliptic longitudes and Sripati (Porphyry) cusps for a moment
//! and place; everything downstream is derived from those.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::graha::Graha;

/// Bodies requested from a provider. Ketu is derived and never requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EphemerisBody {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    /// Mean lunar ascending node (Rahu).
    MeanNode,
}

/// The 8 bodies in graha order.
pub const ALL_EPHEMERIS_BODIES: [EphemerisBody; 8] = [
    EphemerisBody::Sun,
    EphemerisBody::Moon,
    EphemerisBody::Mars,
    EphemerisBody::Mercury,
    EphemerisBody::Jupiter,
    EphemerisBody::Venus,
    EphemerisBody::Saturn,
    EphemerisBody::MeanNode,
];

impl EphemerisBody {
    /// Graha this body stands for.
    pub const fn graha(self) -> Graha {
        match self {
            Self::Sun => Graha::Surya,
            Self::Moon => Graha::Chandra,
            Self::Mars => Graha::Mangal,
            Self::Mercury => Graha::Buddh,
            Self::Jupiter => Graha::Guru,
            Self::Venus => Graha::Shukra,
            Self::Saturn => Graha::Shani,
            Self::MeanNode => Graha::Rahu,
        }
    }
}

impl Display for EphemerisBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MeanNode => f.write_str("Mean Node"),
            other => f.write_str(other.graha().english_name()),
        }
    }
}

/// Geographic observer location in degrees, east and north positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }
}

/// Source of tropical positions for chart construction.
pub trait EphemerisProvider {
    type Error: Display;

    /// Tropical ecliptic longitude of a body in degrees at `jd_ut`.
    fn tropical_longitude(&self, body: EphemerisBody, jd_ut: f64) -> Result<f64, Self::Error>;

    /// Twelve tropical Sripati cusps in degrees, cusp 1 first.
    fn tropical_cusps(&self, jd_ut: f64, location: &GeoLocation) -> Result<[f64; 12], Self::Error>;
}
