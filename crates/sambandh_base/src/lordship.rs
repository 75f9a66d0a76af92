//! Lordship cross-references between grahas, bhavas and placements.

use serde::Serialize;

use crate::bhava::BhavaChart;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::nakshatra::Nakshatra;
use crate::rashi::Rashi;

/// The placement a lordship link runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LordshipLink {
    /// Another graha occupies a rashi the lord rules.
    Rashi,
    /// Another graha occupies a nakshatra the lord rules.
    Nakshatra,
    /// Another graha's navamsa falls in a rashi the lord rules.
    Navamsa,
}

impl LordshipLink {
    /// Word used in activation reasons.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rashi => "sign",
            Self::Nakshatra => "nakshatra",
            Self::Navamsa => "navamsa",
        }
    }
}

/// Everything a graha rules in a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lordship {
    pub graha: Graha,
    /// Bhavas whose assigned rashi the graha rules, ascending.
    pub ruled_bhavas: Vec<u8>,
    /// Other grahas sitting in a rashi the graha rules.
    pub grahas_in_rashis: Vec<Graha>,
    /// Other grahas sitting in a nakshatra the graha rules.
    pub grahas_in_nakshatras: Vec<Graha>,
    /// Other grahas whose navamsa rashi the graha rules.
    pub grahas_in_navamsa: Vec<Graha>,
}

impl Lordship {
    /// Grahas reached through one kind of link.
    pub fn linked(&self, link: LordshipLink) -> &[Graha] {
        match link {
            LordshipLink::Rashi => &self.grahas_in_rashis,
            LordshipLink::Nakshatra => &self.grahas_in_nakshatras,
            LordshipLink::Navamsa => &self.grahas_in_navamsa,
        }
    }
}

/// Bhavas whose assigned rashi `graha` rules.
pub fn ruled_bhavas(graha: Graha, chart: &BhavaChart) -> Vec<u8> {
    chart.bhavas_where(|r| graha.rules_rashi(r))
}

/// Resolve the lordship of `graha` against the placements of all nine.
///
/// Placement arrays are indexed by `Graha::index()`. Output lists follow
/// graha order and never include `graha` itself.
pub fn resolve_lordship(
    graha: Graha,
    chart: &BhavaChart,
    rashis: &[Rashi; 9],
    nakshatras: &[Nakshatra; 9],
    navamsas: &[Rashi; 9],
) -> Lordship {
    let others = || ALL_GRAHAS.into_iter().filter(move |&q| q != graha);
    let at = |q: Graha| q.index() as usize;

    Lordship {
        graha,
        ruled_bhavas: ruled_bhavas(graha, chart),
        grahas_in_rashis: others().filter(|&q| graha.rules_rashi(rashis[at(q)])).collect(),
        grahas_in_nakshatras: others()
            .filter(|&q| graha.rules_nakshatra(nakshatras[at(q)]))
            .collect(),
        grahas_in_navamsa: others().filter(|&q| graha.rules_rashi(navamsas[at(q)])).collect(),
    }
}
