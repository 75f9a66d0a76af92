//! Rashi (zodiac sign) classification of sidereal longitudes.
//!
//! 12 rashis of 30 deg each, starting from Mesha (Aries) at 0 deg sidereal.
//! Besides the sign itself, each rashi carries its modality (chara, sthira,
//! dwiswabhava), which drives the navamsa starting point.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::util::normalize_360;

/// Span of one rashi in degrees.
pub const RASHI_SPAN: f64 = 30.0;

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

/// Modality group of a rashi.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Modality {
    /// Chara (movable): Mesha, Karka, Tula, Makara.
    Movable,
    /// Sthira (fixed): Vrishabha, Simha, Vrischika, Kumbha.
    Fixed,
    /// Dwiswabhava (dual): Mithuna, Kanya, Dhanu, Meena.
    Dual,
}

impl Modality {
    /// Navamsa starting offset, in signs, from the occupied rashi.
    ///
    /// Movable signs start at themselves, fixed signs at their 9th,
    /// dual signs at their 5th.
    pub const fn navamsa_offset(self) -> u8 {
        match self {
            Self::Movable => 0,
            Self::Fixed => 8,
            Self::Dual => 4,
        }
    }
}

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Rashi for a 0-based index, wrapping modulo 12.
    pub const fn from_index(index: u8) -> Rashi {
        ALL_RASHIS[(index % 12) as usize]
    }

    /// Modality group: index mod 3 (0 movable, 1 fixed, 2 dual).
    pub const fn modality(self) -> Modality {
        match self.index() % 3 {
            0 => Modality::Movable,
            1 => Modality::Fixed,
            _ => Modality::Dual,
        }
    }
}

impl Display for Rashi {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.western_name())
    }
}

impl Serialize for Rashi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.western_name())
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dms {
    /// Whole degrees.
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds, may include a fractional part.
    pub seconds: f64,
}

impl Display for Dms {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°{:02}'{:04.1}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// Convert decimal degrees to degrees-minutes-seconds (sign dropped).
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let degrees = d.floor() as u16;
    let arcmin = (d - degrees as f64) * 60.0;
    let minutes = arcmin.floor() as u8;
    Dms {
        degrees,
        minutes,
        seconds: (arcmin - minutes as f64) * 60.0,
    }
}

/// Rashi position of a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RashiInfo {
    /// The rashi (zodiac sign).
    pub rashi: Rashi,
    /// 0-based rashi index (0 = Mesha).
    pub rashi_index: u8,
    /// Decimal degrees within the rashi [0.0, 30.0).
    pub degrees_in_rashi: f64,
    /// `degrees_in_rashi` as DMS.
    pub dms: Dms,
}

/// 0-based rashi index of a longitude; any real input is accepted.
pub fn rashi_index(lon_deg: f64) -> u8 {
    // normalize_360 can round up to 360.0 for tiny negatives
    ((normalize_360(lon_deg) / RASHI_SPAN).floor() as u8).min(11)
}

/// Rashi of a sidereal longitude; rashi `i` covers `[30 i, 30 i + 30)`.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> RashiInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let idx = rashi_index(lon);
    let degrees_in_rashi = lon - idx as f64 * RASHI_SPAN;
    RashiInfo {
        rashi: Rashi::from_index(idx),
        rashi_index: idx,
        degrees_in_rashi,
        dms: deg_to_dms(degrees_in_rashi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
            assert_eq!(Rashi::from_index(i as u8), *r);
        }
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(Rashi::from_index(12), Rashi::Mesha);
        assert_eq!(Rashi::from_index(23), Rashi::Meena);
    }

    #[test]
    fn modality_groups() {
        assert_eq!(Rashi::Mesha.modality(), Modality::Movable);
        assert_eq!(Rashi::Karka.modality(), Modality::Movable);
        assert_eq!(Rashi::Simha.modality(), Modality::Fixed);
        assert_eq!(Rashi::Kumbha.modality(), Modality::Fixed);
        assert_eq!(Rashi::Kanya.modality(), Modality::Dual);
        assert_eq!(Rashi::Meena.modality(), Modality::Dual);
    }

    #[test]
    fn dms_known() {
        // 17.2625 = 17°15'45"
        let d = deg_to_dms(17.2625);
        assert_eq!((d.degrees, d.minutes), (17, 15));
        assert!((d.seconds - 45.0).abs() < 1e-6);
        assert_eq!(d.to_string(), "17°15'45.0\"");
    }

    #[test]
    fn every_boundary_starts_its_sign() {
        for i in 0..12u8 {
            let info = rashi_from_longitude(i as f64 * 30.0);
            assert_eq!(info.rashi_index, i);
            assert!(info.degrees_in_rashi.abs() < 1e-10);
        }
    }

    #[test]
    fn mid_sign() {
        let info = rashi_from_longitude(287.25);
        assert_eq!(info.rashi, Rashi::Makara);
        assert!((info.degrees_in_rashi - 17.25).abs() < 1e-10);
        assert_eq!(info.dms.minutes, 15);
    }

    #[test]
    fn negative_and_wrapped() {
        assert_eq!(rashi_from_longitude(-10.0).rashi, Rashi::Meena);
        assert_eq!(rashi_from_longitude(365.0).rashi, Rashi::Mesha);
    }

    #[test]
    fn periodic_over_full_turns() {
        for lon in [0.5, 29.5, 100.25, 181.0, 359.5] {
            for k in -3..=3 {
                assert_eq!(rashi_index(lon), rashi_index(lon + 360.0 * k as f64));
            }
        }
    }
}
