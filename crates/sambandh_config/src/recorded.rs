//! Ephemeris provider backed by positions recorded in a chart file.

use std::convert::Infallible;

use sambandh_base::{EphemerisBody, EphemerisProvider, GeoLocation};

/// Tropical positions captured for a single moment and place.
///
/// Queries ignore the requested time and location; the recording already
/// fixes both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedEphemeris {
    /// Sun..Mean Node tropical longitudes, in `ALL_EPHEMERIS_BODIES` order.
    pub longitudes: [f64; 8],
    /// Tropical Sripati cusps, cusp 1 first.
    pub cusps: [f64; 12],
}

impl EphemerisProvider for RecordedEphemeris {
    type Error = Infallible;

    fn tropical_longitude(&self, body: EphemerisBody, _jd_ut: f64) -> Result<f64, Infallible> {
        Ok(self.longitudes[body.graha().index() as usize])
    }

    fn tropical_cusps(&self, _jd_ut: f64, _location: &GeoLocation) -> Result<[f64; 12], Infallible> {
        Ok(self.cusps)
    }
}
