//! Three-level dasha composition over bhava activations.
//!
//! The maha, antar and pratyantar lords are ranked independently and their
//! distinct bhava sets intersected. Bhavas active under all three are the
//! ones the period brings forward.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::activation::{ActivationConfig, ActivationReason, Activations, house_activations};
use crate::chart::ChartContext;
use crate::error::SambandhError;
use crate::graha::Graha;

/// Reasons shown per level for each common bhava.
pub const MAX_REASONS_PER_LEVEL: usize = 3;

/// Dasha hierarchy levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DashaLevel {
    Maha,
    Antar,
    Pratyantar,
}

/// Levels from outermost to innermost.
pub const ALL_DASHA_LEVELS: [DashaLevel; 3] =
    [DashaLevel::Maha, DashaLevel::Antar, DashaLevel::Pratyantar];

impl DashaLevel {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Maha => "Mahadasha",
            Self::Antar => "Antardasha",
            Self::Pratyantar => "Pratyantardasha",
        }
    }

    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Maha => "MD",
            Self::Antar => "AD",
            Self::Pratyantar => "PD",
        }
    }
}

impl Display for DashaLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// The three running lords. Lords may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashaQuery {
    pub maha: Graha,
    pub antar: Graha,
    pub pratyantar: Graha,
}

impl DashaQuery {
    pub fn new(maha: Graha, antar: Graha, pratyantar: Graha) -> Self {
        Self {
            maha,
            antar,
            pratyantar,
        }
    }

    pub fn lord(&self, level: DashaLevel) -> Graha {
        match level {
            DashaLevel::Maha => self.maha,
            DashaLevel::Antar => self.antar,
            DashaLevel::Pratyantar => self.pratyantar,
        }
    }
}

impl Display for DashaQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} MD → {} AD → {} PD",
            self.maha, self.antar, self.pratyantar
        )
    }
}

impl FromStr for DashaQuery {
    type Err = SambandhError;

    /// Parses `"Sun/Moon/Mars"`; `/`, `,` and `-` all separate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(['/', ',', '-'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        match parts.as_slice() {
            [m, a, p] => Ok(Self::new(m.parse()?, a.parse()?, p.parse()?)),
            _ => Err(SambandhError::InvalidDashaPeriod(s.to_string())),
        }
    }
}

/// Up to [`MAX_REASONS_PER_LEVEL`] reasons of one level for one bhava.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelReasons {
    pub level: DashaLevel,
    pub graha: Graha,
    pub reasons: Vec<ActivationReason>,
}

/// A bhava active under all three levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommonBhava {
    pub bhava: u8,
    pub levels: [LevelReasons; 3],
}

/// The distinct bhava set of one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelBhavas {
    pub level: DashaLevel,
    pub graha: Graha,
    pub bhavas: Vec<u8>,
}

/// Outcome of intersecting the three levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "bhavas", rename_all = "snake_case")]
pub enum DashaOverlap {
    /// Common bhavas, ascending.
    Common(Vec<CommonBhava>),
    /// Nothing in common; each level's own set instead.
    Disjoint([LevelBhavas; 3]),
}

/// Full result of a dasha query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashaAnalysis {
    pub query: DashaQuery,
    pub activations: [Activations; 3],
    pub overlap: DashaOverlap,
}

impl DashaAnalysis {
    /// Bhavas shared by all three levels, ascending. Empty when disjoint.
    pub fn common_bhavas(&self) -> Vec<u8> {
        match &self.overlap {
            DashaOverlap::Common(common) => common.iter().map(|c| c.bhava).collect(),
            DashaOverlap::Disjoint(_) => Vec::new(),
        }
    }
}

/// Rank all three lords and intersect their bhava sets.
pub fn compose_dasha(
    ctx: &ChartContext,
    query: &DashaQuery,
    config: &ActivationConfig,
) -> DashaAnalysis {
    let activations = ALL_DASHA_LEVELS.map(|l| house_activations(ctx, query.lord(l), config));
    let sets = activations.each_ref().map(Activations::bhava_set);

    let common: BTreeSet<u8> = sets[0]
        .iter()
        .filter(|b| sets[1].contains(*b) && sets[2].contains(*b))
        .copied()
        .collect();

    debug!(
        period = %query,
        aspects_only = config.aspects_only,
        common = common.len(),
        "dasha composed"
    );

    let overlap = if common.is_empty() {
        DashaOverlap::Disjoint(std::array::from_fn(|i| LevelBhavas {
            level: ALL_DASHA_LEVELS[i],
            graha: activations[i].graha,
            bhavas: sets[i].iter().copied().collect(),
        }))
    } else {
        DashaOverlap::Common(
            common
                .into_iter()
                .map(|bhava| CommonBhava {
                    bhava,
                    levels: std::array::from_fn(|i| LevelReasons {
                        level: ALL_DASHA_LEVELS[i],
                        graha: activations[i].graha,
                        reasons: activations[i]
                            .reasons_for(bhava)
                            .take(MAX_REASONS_PER_LEVEL)
                            .copied()
                            .collect(),
                    }),
                })
                .collect(),
        )
    };

    DashaAnalysis {
        query: *query,
        activations,
        overlap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartInputs;
    use crate::drishti::DrishtiConfig;

    fn sample_ctx() -> ChartContext {
        let cusps = std::array::from_fn(|i| i as f64 * 30.0 + 0.5);
        let inputs = ChartInputs::from_sidereal(
            [138.0, 190.0, 58.0, 157.0, 24.0, 163.0, 113.0, 234.0],
            cusps,
        )
        .unwrap();
        ChartContext::new(&inputs, &DrishtiConfig::default())
    }

    #[test]
    fn parse_period() {
        let q: DashaQuery = "Sun/Moon/Mars".parse().unwrap();
        assert_eq!(q, DashaQuery::new(Graha::Surya, Graha::Chandra, Graha::Mangal));
        let q: DashaQuery = "saturn, rahu, ketu".parse().unwrap();
        assert_eq!(q.pratyantar, Graha::Ketu);
    }

    #[test]
    fn parse_period_wrong_count() {
        assert_eq!(
            "Sun/Moon".parse::<DashaQuery>(),
            Err(SambandhError::InvalidDashaPeriod("Sun/Moon".into()))
        );
    }

    #[test]
    fn parse_period_unknown_graha() {
        assert_eq!(
            "Sun/Moon/Pluto".parse::<DashaQuery>(),
            Err(SambandhError::UnknownGraha("Pluto".into()))
        );
    }

    #[test]
    fn same_lord_thrice_gives_own_set() {
        let ctx = sample_ctx();
        let cfg = ActivationConfig::default();
        let q = DashaQuery::new(Graha::Surya, Graha::Surya, Graha::Surya);
        let analysis = compose_dasha(&ctx, &q, &cfg);
        let own: Vec<u8> = house_activations(&ctx, Graha::Surya, &cfg)
            .bhava_set()
            .into_iter()
            .collect();
        assert_eq!(analysis.common_bhavas(), own);
    }

    #[test]
    fn reasons_capped_per_level() {
        let ctx = sample_ctx();
        let q = DashaQuery::new(Graha::Guru, Graha::Shani, Graha::Rahu);
        let analysis = compose_dasha(&ctx, &q, &ActivationConfig::default());
        if let DashaOverlap::Common(common) = &analysis.overlap {
            for c in common {
                for level in &c.levels {
                    assert!(!level.reasons.is_empty());
                    assert!(level.reasons.len() <= MAX_REASONS_PER_LEVEL);
                    assert!(level.reasons.iter().all(|r| r.bhava() == c.bhava));
                }
            }
        }
    }

    #[test]
    fn common_bhavas_are_in_every_level() {
        let ctx = sample_ctx();
        let q = DashaQuery::new(Graha::Chandra, Graha::Buddh, Graha::Shukra);
        let analysis = compose_dasha(&ctx, &q, &ActivationConfig::default());
        for b in analysis.common_bhavas() {
            for acts in &analysis.activations {
                assert!(acts.bhava_set().contains(&b));
            }
        }
    }

    #[test]
    fn level_names() {
        let names: Vec<_> = ALL_DASHA_LEVELS.iter().map(|l| l.name()).collect();
        assert_eq!(names, ["Mahadasha", "Antardasha", "Pratyantardasha"]);
        assert_eq!(DashaLevel::Antar.to_string(), "AD");
    }

    #[test]
    fn display_period() {
        let q = DashaQuery::new(Graha::Shani, Graha::Buddh, Graha::Ketu);
        assert_eq!(q.to_string(), "Saturn MD → Mercury AD → Ketu PD");
    }
}
