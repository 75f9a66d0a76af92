//! Sripati bhava (house) boundaries from 12 sidereal cusps.
//!
//! Each bhava runs from the midpoint of its previous cusp and its own cusp to
//! the midpoint of its own cusp and the next one. Bhava signs are assigned
//! sequentially from the lagna rashi and do not depend on the boundaries.

use serde::Serialize;

use crate::rashi::{Rashi, rashi_index};
use crate::util::{circular_midpoint, in_half_open_arc, normalize_360};

/// A single bhava with its Sripati interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bhava {
    /// Bhava number (1-12).
    pub number: u8,
    /// Sidereal cusp longitude in degrees [0, 360).
    pub cusp_deg: f64,
    /// Interval start in degrees [0, 360), inclusive.
    pub start_deg: f64,
    /// Interval end in degrees [0, 360), exclusive. May be less than start.
    pub end_deg: f64,
    /// Rashi assigned to this bhava: lagna rashi + (number - 1).
    pub rashi: Rashi,
}

impl Bhava {
    /// Whether a sidereal longitude lies in `[start, end)`.
    pub fn contains(&self, lon_deg: f64) -> bool {
        in_half_open_arc(normalize_360(lon_deg), self.start_deg, self.end_deg)
    }

    /// Forward arc length of the interval in degrees.
    pub fn span_deg(&self) -> f64 {
        arc_forward(self.start_deg, self.end_deg)
    }
}

/// The 12 Sripati bhavas of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BhavaChart {
    /// Bhavas 1..=12 in order.
    pub bhavas: [Bhava; 12],
    /// Rashi of the lagna; bhava 1 carries this rashi.
    pub lagna_rashi: Rashi,
}

impl BhavaChart {
    /// Build bhavas from 12 sidereal cusps, lagna rashi taken from cusp 1.
    pub fn from_cusps(cusps_deg: &[f64; 12]) -> Self {
        Self::sripati(cusps_deg, Rashi::from_index(rashi_index(cusps_deg[0])))
    }

    /// Build bhavas from 12 sidereal cusps and an explicit lagna rashi.
    pub fn sripati(cusps_deg: &[f64; 12], lagna_rashi: Rashi) -> Self {
        let cusps = cusps_deg.map(normalize_360);
        let mut bhavas = [Bhava {
            number: 0,
            cusp_deg: 0.0,
            start_deg: 0.0,
            end_deg: 0.0,
            rashi: lagna_rashi,
        }; 12];

        for i in 0..12 {
            let prev = (i + 11) % 12;
            let next = (i + 1) % 12;
            let number = (i as u8) + 1;
            bhavas[i] = Bhava {
                number,
                cusp_deg: cusps[i],
                start_deg: circular_midpoint(cusps[prev], cusps[i]),
                end_deg: circular_midpoint(cusps[i], cusps[next]),
                rashi: bhava_rashi(lagna_rashi, number),
            };
        }

        Self {
            bhavas,
            lagna_rashi,
        }
    }

    /// Bhava number (1-12) holding a sidereal longitude.
    ///
    /// Bhavas are tested in order and the first match wins, so where
    /// out-of-order cusps make intervals overlap the lower number is
    /// returned. Fully collapsed cusps place nothing.
    pub fn bhava_of(&self, lon_deg: f64) -> Option<u8> {
        self.bhavas
            .iter()
            .find(|b| b.contains(lon_deg))
            .map(|b| b.number)
    }

    /// Bhava numbers whose assigned rashi satisfies `pred`, ascending.
    pub fn bhavas_where(&self, pred: impl Fn(Rashi) -> bool) -> Vec<u8> {
        self.bhavas
            .iter()
            .filter(|b| pred(b.rashi))
            .map(|b| b.number)
            .collect()
    }
}

/// Rashi of a bhava given the lagna rashi: `(lagna + number - 1) mod 12`.
pub fn bhava_rashi(lagna_rashi: Rashi, number: u8) -> Rashi {
    let n = (number.max(1) - 1) % 12;
    Rashi::from_index(lagna_rashi.index() + n)
}

/// Forward arc from a to b in degrees, in [0, 360).
pub fn arc_forward(a: f64, b: f64) -> f64 {
    (b - a).rem_euclid(360.0)
}
