//! Navamsa (D9) sign of a sidereal longitude.
//!
//! Each rashi is split into 9 parts of 3 deg 20'. The first part maps to a
//! starting sign chosen by the rashi's modality, and successive parts step
//! forward one sign each.

use serde::Serialize;

use crate::rashi::{RASHI_SPAN, Rashi, rashi_index};
use crate::util::normalize_360;

/// Span of one navamsa division: 30/9 = 3.3333... degrees.
pub const NAVAMSA_SPAN: f64 = RASHI_SPAN / 9.0;

/// Navamsa placement of a longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavamsaInfo {
    /// The navamsa rashi.
    pub rashi: Rashi,
    /// 0-based division within the occupied rashi (0-8).
    pub division: u8,
}

/// Navamsa rashi for a sidereal longitude.
///
/// `(rashi + modality_offset + division) mod 12`, with offsets
/// movable 0, fixed 8, dual 4.
pub fn navamsa_from_longitude(sidereal_lon_deg: f64) -> NavamsaInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let natal_idx = rashi_index(lon);
    let natal = Rashi::from_index(natal_idx);
    let within = lon - natal_idx as f64 * RASHI_SPAN;
    let division = ((within / NAVAMSA_SPAN).floor() as u8).min(8);
    let target = natal_idx + natal.modality().navamsa_offset() + division;
    NavamsaInfo {
        rashi: Rashi::from_index(target),
        division,
    }
}

/// Navamsa rashi index (0-11) for a sidereal longitude.
pub fn navamsa_rashi_index(sidereal_lon_deg: f64) -> u8 {
    navamsa_from_longitude(sidereal_lon_deg).rashi.index()
}
