//! Vedic planet (graha) enum and its rashi/nakshatra lordship.
//!
//! The 9 grahas form the foundation of every relationship in the chart.
//! Lordship here follows the node-inclusive convention: besides the seven
//! classical rulers, Rahu co-rules Kanya and Ketu co-rules Meena.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::SambandhError;
use crate::nakshatra::Nakshatra;
use crate::rashi::Rashi;

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Graha {
    Surya,
    Chandra,
    Mangal,
    Buddh,
    Guru,
    Shukra,
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// Nakshatra lordship cycle, starting at Ashwini and repeating every 9.
pub const NAKSHATRA_LORD_CYCLE: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        match self {
            Self::Surya => 0,
            Self::Chandra => 1,
            Self::Mangal => 2,
            Self::Buddh => 3,
            Self::Guru => 4,
            Self::Shukra => 5,
            Self::Shani => 6,
            Self::Rahu => 7,
            Self::Ketu => 8,
        }
    }

    /// Rashis this graha rules.
    ///
    /// - Surya → Simha; Chandra → Karka
    /// - Mangal → Mesha, Vrischika; Shukra → Vrishabha, Tula
    /// - Buddh → Mithuna, Kanya; Guru → Dhanu, Meena
    /// - Shani → Makara, Kumbha
    /// - Rahu → Kanya; Ketu → Meena
    pub const fn ruled_rashis(self) -> &'static [Rashi] {
        match self {
            Self::Surya => &[Rashi::Simha],
            Self::Chandra => &[Rashi::Karka],
            Self::Mangal => &[Rashi::Mesha, Rashi::Vrischika],
            Self::Buddh => &[Rashi::Mithuna, Rashi::Kanya],
            Self::Guru => &[Rashi::Dhanu, Rashi::Meena],
            Self::Shukra => &[Rashi::Vrishabha, Rashi::Tula],
            Self::Shani => &[Rashi::Makara, Rashi::Kumbha],
            Self::Rahu => &[Rashi::Kanya],
            Self::Ketu => &[Rashi::Meena],
        }
    }

    /// Whether this graha rules the given rashi.
    pub fn rules_rashi(self, rashi: Rashi) -> bool {
        self.ruled_rashis().contains(&rashi)
    }

    /// Whether this graha rules the given nakshatra.
    pub fn rules_nakshatra(self, nakshatra: Nakshatra) -> bool {
        nakshatra_lord(nakshatra) == self
    }
}

impl Display for Graha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.english_name())
    }
}

impl FromStr for Graha {
    type Err = SambandhError;

    /// Accepts English or Sanskrit names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_GRAHAS
            .into_iter()
            .find(|g| {
                g.english_name().eq_ignore_ascii_case(wanted) || g.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| SambandhError::UnknownGraha(s.to_string()))
    }
}

impl Serialize for Graha {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.english_name())
    }
}

/// All grahas ruling a rashi (one or two).
pub fn rashi_lords(rashi: Rashi) -> Vec<Graha> {
    ALL_GRAHAS
        .into_iter()
        .filter(|g| g.rules_rashi(rashi))
        .collect()
}

/// Lord of a nakshatra from the 9-graha cycle.
pub const fn nakshatra_lord(nakshatra: Nakshatra) -> Graha {
    NAKSHATRA_LORD_CYCLE[(nakshatra.index() % 9) as usize]
}
