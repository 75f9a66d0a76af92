//! Nakshatra (lunar mansion) classification in the 27-fold scheme.
//!
//! The ecliptic circle is divided into 27 equal nakshatras of 13 deg 20'
//! (13.3333... deg) each, and each nakshatra into 4 padas of 3 deg 20'.

use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::util::normalize_360;

/// Span of one nakshatra: 360/27 = 13.3333... degrees.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// Span of one pada: 13.3333.../4 = 3.3333... degrees.
pub const PADA_SPAN: f64 = NAKSHATRA_SPAN_27 / 4.0;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Sanskrit name of the nakshatra.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl Display for Nakshatra {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Nakshatra {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Result of a 27-nakshatra lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NakshatraInfo {
    /// The nakshatra.
    pub nakshatra: Nakshatra,
    /// 0-based index (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Quarter of the nakshatra, 1-4.
    pub pada: u8,
    /// Degrees already traversed in the nakshatra, below 13°20'.
    pub degrees_in_nakshatra: f64,
}

/// 0-based nakshatra index of a longitude; any real input is accepted.
pub fn nakshatra_index(lon_deg: f64) -> u8 {
    ((normalize_360(lon_deg) / NAKSHATRA_SPAN_27).floor() as u8).min(26)
}

/// Determine nakshatra and pada from sidereal ecliptic longitude.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraInfo {
    let lon = normalize_360(sidereal_lon_deg);
    let idx = nakshatra_index(lon);
    let degrees_in_nakshatra = lon - idx as f64 * NAKSHATRA_SPAN_27;
    let pada = ((degrees_in_nakshatra / PADA_SPAN).floor() as u8).min(3) + 1;
    NakshatraInfo {
        nakshatra: ALL_NAKSHATRAS_27[idx as usize],
        nakshatra_index: idx,
        pada,
        degrees_in_nakshatra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, n) in ALL_NAKSHATRAS_27.iter().enumerate() {
            assert_eq!(n.index() as usize, i);
        }
    }

    #[test]
    fn span_correct() {
        assert!((NAKSHATRA_SPAN_27 * 27.0 - 360.0).abs() < 1e-10);
    }

    #[test]
    fn regulus_in_magha() {
        // Magha starts at 120; 3.5 deg in is pada 2
        let info = nakshatra_from_longitude(123.5);
        assert_eq!(info.nakshatra, Nakshatra::Magha);
        assert_eq!(info.nakshatra_index, 9);
        assert_eq!(info.pada, 2);
        assert!((info.degrees_in_nakshatra - 3.5).abs() < 1e-10);
    }

    #[test]
    fn padas_advance_every_3_20() {
        assert_eq!(nakshatra_from_longitude(1.0).pada, 1);
        assert_eq!(nakshatra_from_longitude(4.0).pada, 2);
        assert_eq!(nakshatra_from_longitude(7.0).pada, 3);
        assert_eq!(nakshatra_from_longitude(12.0).pada, 4);
    }

    #[test]
    fn mid_segments() {
        for i in 0..27u8 {
            let lon = (i as f64 + 0.5) * NAKSHATRA_SPAN_27;
            assert_eq!(nakshatra_index(lon), i, "at {lon}");
        }
    }

    #[test]
    fn wrapped_and_negative() {
        assert_eq!(nakshatra_from_longitude(365.0).nakshatra, Nakshatra::Ashwini);
        assert_eq!(nakshatra_from_longitude(-1.0).nakshatra, Nakshatra::Revati);
    }

    #[test]
    fn mula_starts_sagittarius() {
        assert_eq!(nakshatra_from_longitude(241.0).nakshatra, Nakshatra::Mula);
    }
}
