//! Linear ayanamsha model.
//!
//! The sidereal correction is a reference value at a fixed epoch plus a
//! constant precession drift per year. The default is anchored at
//! 1900-01-01 with 22 deg 33' 38.81" and drifts 50.278658 arcsec per year.

use serde::Serialize;

use crate::util::normalize_360;

/// Julian Date of 1900-01-01 0h.
pub const JD_1900: f64 = 2_415_020.5;

/// Days per Julian year.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Ayanamsha at the 1900 epoch: 22 deg 33' 38.81".
pub const REFERENCE_1900_DEG: f64 = 22.0 + 33.0 / 60.0 + 38.81 / 3600.0;

/// Precession drift in arcseconds per year.
pub const PRECESSION_ARCSEC_PER_YEAR: f64 = 50.278658;

/// Reference value plus linear drift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearAyanamsha {
    /// Ayanamsha at `epoch_jd`, degrees.
    pub reference_deg: f64,
    /// Drift in degrees per Julian year.
    pub rate_deg_per_year: f64,
    /// Epoch of `reference_deg` as a Julian Date.
    pub epoch_jd: f64,
}

impl Default for LinearAyanamsha {
    fn default() -> Self {
        Self {
            reference_deg: REFERENCE_1900_DEG,
            rate_deg_per_year: PRECESSION_ARCSEC_PER_YEAR / 3600.0,
            epoch_jd: JD_1900,
        }
    }
}

impl LinearAyanamsha {
    /// Model with a custom reference value and drift (arcsec/yr), 1900 epoch.
    pub fn with_rate_arcsec(reference_deg: f64, rate_arcsec_per_year: f64) -> Self {
        Self {
            reference_deg,
            rate_deg_per_year: rate_arcsec_per_year / 3600.0,
            epoch_jd: JD_1900,
        }
    }

    /// Ayanamsha in degrees at a Julian Date.
    pub fn deg_at_jd(&self, jd: f64) -> f64 {
        let years = (jd - self.epoch_jd) / DAYS_PER_YEAR;
        self.reference_deg + years * self.rate_deg_per_year
    }

    /// Ayanamsha for a civil date; the time of day is not considered.
    pub fn deg_for_date(&self, year: i32, month: u32, day: u32) -> f64 {
        self.deg_at_jd(calendar_to_jd(year, month, day as f64))
    }
}

/// Sidereal longitude from a tropical one.
pub fn tropical_to_sidereal(tropical_deg: f64, ayanamsha_deg: f64) -> f64 {
    normalize_360(tropical_deg - ayanamsha_deg)
}

/// Julian Date for a Gregorian calendar date, `day` may carry a fraction.
///
/// Meeus, Astronomical Algorithms, ch. 7.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}
