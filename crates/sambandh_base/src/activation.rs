//! Bhava activation ranking for a single graha.
//!
//! A graha activates bhavas directly (its own aspects, placement and
//! lordship) and indirectly through grahas sitting in its rashis, its
//! nakshatras or its navamsa rashis. Each route has a fixed tier:
//!
//! | tier  | route                                      |
//! |-------|--------------------------------------------|
//! | 1-3   | aspects / placed in / rules                |
//! | 4-6   | via a graha in its rashi: same three       |
//! | 7-9   | via a graha in its nakshatra: same three   |
//! | 10-12 | via a graha in its navamsa: same three     |
//!
//! Aspect routes are always reported. Placement and lordship routes are
//! dropped when `aspects_only` is set.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::chart::ChartContext;
use crate::graha::Graha;
use crate::lordship::LordshipLink;

/// Filtering and ordering for an activation query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivationConfig {
    /// Keep only aspect-based routes (tiers 1, 4, 7, 10).
    pub aspects_only: bool,
    /// Sort by (tier, bhava) instead of bhava alone.
    pub priority_order: bool,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            aspects_only: false,
            priority_order: true,
        }
    }
}

/// How a graha touches a bhava.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Influence {
    Aspects,
    PlacedIn,
    Rules,
}

impl Influence {
    /// Offset within a tier group (1-3).
    pub const fn rank(self) -> u8 {
        match self {
            Self::Aspects => 1,
            Self::PlacedIn => 2,
            Self::Rules => 3,
        }
    }

    const fn phrase(self, capitalized: bool) -> &'static str {
        match (self, capitalized) {
            (Self::Aspects, true) => "Aspects",
            (Self::Aspects, false) => "aspects",
            (Self::PlacedIn, true) => "Placed in",
            (Self::PlacedIn, false) => "placed in",
            (Self::Rules, true) => "Rules",
            (Self::Rules, false) => "rules",
        }
    }
}

/// Why a bhava is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationReason {
    /// The queried graha itself.
    Direct { influence: Influence, bhava: u8 },
    /// Another graha linked to the queried one by lordship.
    Via {
        other: Graha,
        lord: Graha,
        link: LordshipLink,
        influence: Influence,
        bhava: u8,
    },
}

impl ActivationReason {
    /// Priority tier, 1 (strongest) to 12.
    pub const fn tier(&self) -> u8 {
        match self {
            Self::Direct { influence, .. } => influence.rank(),
            Self::Via {
                link, influence, ..
            } => link_tier_base(*link) + influence.rank(),
        }
    }

    /// Bhava the reason activates.
    pub const fn bhava(&self) -> u8 {
        match self {
            Self::Direct { bhava, .. } | Self::Via { bhava, .. } => *bhava,
        }
    }

    /// Whether the reason rests on an aspect.
    pub const fn is_aspect(&self) -> bool {
        matches!(
            self,
            Self::Direct {
                influence: Influence::Aspects,
                ..
            } | Self::Via {
                influence: Influence::Aspects,
                ..
            }
        )
    }
}

const fn link_tier_base(link: LordshipLink) -> u8 {
    match link {
        LordshipLink::Rashi => 3,
        LordshipLink::Nakshatra => 6,
        LordshipLink::Navamsa => 9,
    }
}

impl Display for ActivationReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct { influence, bhava } => {
                write!(f, "{} H{bhava}", influence.phrase(true))
            }
            Self::Via {
                other,
                lord,
                link,
                influence,
                bhava,
            } => write!(
                f,
                "Via {other} in {lord}'s {} ({} H{bhava})",
                link.label(),
                influence.phrase(false)
            ),
        }
    }
}

impl Serialize for ActivationReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One (bhava, reason, tier) row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivationEntry {
    pub bhava: u8,
    pub reason: ActivationReason,
    pub tier: u8,
}

impl From<ActivationReason> for ActivationEntry {
    fn from(reason: ActivationReason) -> Self {
        Self {
            bhava: reason.bhava(),
            tier: reason.tier(),
            reason,
        }
    }
}

/// Ordered activation list of one graha. Bhavas may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activations {
    pub graha: Graha,
    pub entries: Vec<ActivationEntry>,
}

impl Activations {
    /// Distinct activated bhavas.
    pub fn bhava_set(&self) -> BTreeSet<u8> {
        self.entries.iter().map(|e| e.bhava).collect()
    }

    /// Reasons for one bhava in list order.
    pub fn reasons_for(&self, bhava: u8) -> impl Iterator<Item = &ActivationReason> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.bhava == bhava)
            .map(|e| &e.reason)
    }

    /// Whether the graha activates nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every bhava `graha` activates, ranked.
pub fn house_activations(
    ctx: &ChartContext,
    graha: Graha,
    config: &ActivationConfig,
) -> Activations {
    let mut reasons = Vec::new();

    for (influence, bhava) in routes_of(ctx, graha, config.aspects_only) {
        reasons.push(ActivationReason::Direct { influence, bhava });
    }

    let lordship = ctx.lordship(graha);
    for link in [
        LordshipLink::Rashi,
        LordshipLink::Nakshatra,
        LordshipLink::Navamsa,
    ] {
        for &other in lordship.linked(link) {
            for (influence, bhava) in routes_of(ctx, other, config.aspects_only) {
                reasons.push(ActivationReason::Via {
                    other,
                    lord: graha,
                    link,
                    influence,
                    bhava,
                });
            }
        }
    }

    let mut entries: Vec<ActivationEntry> = reasons.into_iter().map(Into::into).collect();
    if config.priority_order {
        entries.sort_by_key(|e| (e.tier, e.bhava));
    } else {
        entries.sort_by_key(|e| e.bhava);
    }

    Activations { graha, entries }
}

/// Aspects, placement and lordship of one graha, in that order.
fn routes_of(ctx: &ChartContext, graha: Graha, aspects_only: bool) -> Vec<(Influence, u8)> {
    let mut out: Vec<(Influence, u8)> = ctx
        .drishti(graha)
        .bhavas()
        .into_iter()
        .map(|b| (Influence::Aspects, b))
        .collect();
    if aspects_only {
        return out;
    }
    if let Some(b) = ctx.bhava_of(graha) {
        out.push((Influence::PlacedIn, b));
    }
    out.extend(
        ctx.lordship(graha)
            .ruled_bhavas
            .iter()
            .map(|&b| (Influence::Rules, b)),
    );
    out
}
