//! Chart inputs and the immutable per-chart context.
//!
//! [`ChartContext`] is built once from sidereal longitudes and cusps and then
//! only queried. It holds placements, bhava boundaries, bhava drishti, the
//! control matrix and lordship for all nine grahas.

use serde::Serialize;
use tracing::{debug, warn};

use crate::ayanamsha::tropical_to_sidereal;
use crate::bhava::BhavaChart;
use crate::control::ControlMatrix;
use crate::drishti::{BhavaDrishti, DrishtiConfig, bhava_drishti_all};
use crate::ephemeris::{ALL_EPHEMERIS_BODIES, EphemerisProvider, GeoLocation};
use crate::error::SambandhError;
use crate::graha::{ALL_GRAHAS, Graha};
use crate::lordship::{Lordship, resolve_lordship};
use crate::nakshatra::{NakshatraInfo, nakshatra_from_longitude};
use crate::navamsa::{NavamsaInfo, navamsa_from_longitude};
use crate::rashi::{Rashi, RashiInfo, rashi_from_longitude};
use crate::util::normalize_360;

const GRAHA_LABELS: [&str; 8] = [
    "sun longitude",
    "moon longitude",
    "mars longitude",
    "mercury longitude",
    "jupiter longitude",
    "venus longitude",
    "saturn longitude",
    "rahu longitude",
];

const CUSP_LABELS: [&str; 12] = [
    "cusp 1", "cusp 2", "cusp 3", "cusp 4", "cusp 5", "cusp 6", "cusp 7", "cusp 8", "cusp 9",
    "cusp 10", "cusp 11", "cusp 12",
];

/// Sidereal longitudes of the nine grahas plus the 12 sidereal cusps.
///
/// Ketu is always `Rahu + 180`; there is no way to set it independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartInputs {
    longitudes: [f64; 9],
    cusps: [f64; 12],
    ayanamsha_deg: f64,
}

impl ChartInputs {
    /// From sidereal longitudes of Sun..Rahu (graha order) and sidereal cusps.
    pub fn from_sidereal(longitudes: [f64; 8], cusps: [f64; 12]) -> Result<Self, SambandhError> {
        Self::build(longitudes, cusps, 0.0)
    }

    /// From tropical longitudes and cusps, subtracting `ayanamsha_deg`.
    pub fn from_tropical(
        longitudes: [f64; 8],
        cusps: [f64; 12],
        ayanamsha_deg: f64,
    ) -> Result<Self, SambandhError> {
        if !ayanamsha_deg.is_finite() {
            return Err(SambandhError::NonFiniteInput("ayanamsha"));
        }
        check_finite(&longitudes, &GRAHA_LABELS)?;
        check_finite(&cusps, &CUSP_LABELS)?;
        Self::build(
            longitudes.map(|l| tropical_to_sidereal(l, ayanamsha_deg)),
            cusps.map(|c| tropical_to_sidereal(c, ayanamsha_deg)),
            ayanamsha_deg,
        )
    }

    /// Query a provider for all 8 bodies and the cusps, then go sidereal.
    pub fn from_ephemeris<P: EphemerisProvider>(
        provider: &P,
        jd_ut: f64,
        location: &GeoLocation,
        ayanamsha_deg: f64,
    ) -> Result<Self, SambandhError> {
        let ephemeris_err = |e: P::Error| SambandhError::Ephemeris(e.to_string());
        let mut longitudes = [0.0; 8];
        for (slot, body) in longitudes.iter_mut().zip(ALL_EPHEMERIS_BODIES) {
            *slot = provider
                .tropical_longitude(body, jd_ut)
                .map_err(ephemeris_err)?;
        }
        let cusps = provider
            .tropical_cusps(jd_ut, location)
            .map_err(ephemeris_err)?;
        Self::from_tropical(longitudes, cusps, ayanamsha_deg)
    }

    fn build(
        longitudes: [f64; 8],
        cusps: [f64; 12],
        ayanamsha_deg: f64,
    ) -> Result<Self, SambandhError> {
        check_finite(&longitudes, &GRAHA_LABELS)?;
        check_finite(&cusps, &CUSP_LABELS)?;

        let mut all = [0.0; 9];
        for (slot, lon) in all.iter_mut().zip(longitudes) {
            *slot = normalize_360(lon);
        }
        all[Graha::Ketu.index() as usize] = ketu_from_rahu(all[Graha::Rahu.index() as usize]);

        Ok(Self {
            longitudes: all,
            cusps: cusps.map(normalize_360),
            ayanamsha_deg,
        })
    }

    /// Sidereal longitude of a graha in [0, 360).
    pub fn longitude(&self, graha: Graha) -> f64 {
        self.longitudes[graha.index() as usize]
    }

    /// All nine sidereal longitudes, indexed by `Graha::index()`.
    pub fn longitudes(&self) -> &[f64; 9] {
        &self.longitudes
    }

    /// The 12 sidereal cusps, cusp 1 first.
    pub fn cusps(&self) -> &[f64; 12] {
        &self.cusps
    }

    /// Ayanamsha subtracted from tropical input; 0 for sidereal input.
    pub fn ayanamsha_deg(&self) -> f64 {
        self.ayanamsha_deg
    }
}

/// Ketu is exactly opposite Rahu.
pub fn ketu_from_rahu(rahu_deg: f64) -> f64 {
    normalize_360(rahu_deg + 180.0)
}

fn check_finite(values: &[f64], labels: &[&'static str]) -> Result<(), SambandhError> {
    match values.iter().zip(labels).find(|(v, _)| !v.is_finite()) {
        Some((_, label)) => Err(SambandhError::NonFiniteInput(*label)),
        None => Ok(()),
    }
}

/// Where a graha sits in the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrahaPlacement {
    pub graha: Graha,
    /// Sidereal longitude in degrees.
    pub longitude_deg: f64,
    pub rashi: RashiInfo,
    pub nakshatra: NakshatraInfo,
    pub navamsa: NavamsaInfo,
    /// Sripati bhava, `None` when the longitude falls in no interval.
    pub bhava: Option<u8>,
}

/// One bhava aspect with its strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectStrength {
    pub bhava: u8,
    pub strength: f64,
}

/// One row of the chart analysis table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrahaAnalysis {
    pub graha: Graha,
    pub bhava: Option<u8>,
    pub ruled_bhavas: Vec<u8>,
    pub aspects: Vec<AspectStrength>,
    pub grahas_in_rashis: Vec<Graha>,
    pub grahas_in_nakshatras: Vec<Graha>,
    pub grahas_in_navamsa: Vec<Graha>,
    pub controlling: Vec<Graha>,
}

/// Chart-level facts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartSummary {
    pub ayanamsha_deg: f64,
    pub lagna_deg: f64,
    pub lagna_rashi: Rashi,
}

/// Everything derived from one set of chart inputs.
#[derive(Debug, Clone)]
pub struct ChartContext {
    inputs: ChartInputs,
    config: DrishtiConfig,
    bhavas: BhavaChart,
    placements: [GrahaPlacement; 9],
    drishti: [BhavaDrishti; 9],
    control: ControlMatrix,
    lordships: [Lordship; 9],
}

impl ChartContext {
    /// Derive the full context. Total: unplaced grahas are kept as `None`.
    pub fn new(inputs: &ChartInputs, config: &DrishtiConfig) -> Self {
        let bhavas = BhavaChart::from_cusps(inputs.cusps());
        let lons = inputs.longitudes();

        let placements: [GrahaPlacement; 9] = std::array::from_fn(|i| {
            let graha = ALL_GRAHAS[i];
            let lon = lons[i];
            GrahaPlacement {
                graha,
                longitude_deg: lon,
                rashi: rashi_from_longitude(lon),
                nakshatra: nakshatra_from_longitude(lon),
                navamsa: navamsa_from_longitude(lon),
                bhava: bhavas.bhava_of(lon),
            }
        });

        for p in placements.iter().filter(|p| p.bhava.is_none()) {
            warn!(graha = %p.graha, longitude = p.longitude_deg, "graha falls in no bhava");
        }

        let unplaced = placements.map(|p| p.bhava.is_none());
        let drishti = bhava_drishti_all(lons, inputs.cusps(), &unplaced, config);
        let control = ControlMatrix::compute(lons, config);

        let rashis = placements.map(|p| p.rashi.rashi);
        let nakshatras = placements.map(|p| p.nakshatra.nakshatra);
        let navamsas = placements.map(|p| p.navamsa.rashi);
        let lordships = std::array::from_fn(|i| {
            resolve_lordship(ALL_GRAHAS[i], &bhavas, &rashis, &nakshatras, &navamsas)
        });

        debug!(
            lagna = %bhavas.lagna_rashi,
            ayanamsha = inputs.ayanamsha_deg(),
            unplaced = unplaced.iter().filter(|&&u| u).count(),
            "chart context built"
        );

        Self {
            inputs: *inputs,
            config: *config,
            bhavas,
            placements,
            drishti,
            control,
            lordships,
        }
    }

    /// Inputs the context was built from.
    pub fn inputs(&self) -> &ChartInputs {
        &self.inputs
    }

    /// Aspect parameters in effect.
    pub fn config(&self) -> &DrishtiConfig {
        &self.config
    }

    /// Sripati bhavas with their assigned rashis.
    pub fn bhavas(&self) -> &BhavaChart {
        &self.bhavas
    }

    /// Placement of one graha.
    pub fn placement(&self, graha: Graha) -> &GrahaPlacement {
        &self.placements[graha.index() as usize]
    }

    /// Placements of all nine grahas, in graha order.
    pub fn placements(&self) -> &[GrahaPlacement; 9] {
        &self.placements
    }

    /// Bhava of a graha, if placed.
    pub fn bhava_of(&self, graha: Graha) -> Option<u8> {
        self.placement(graha).bhava
    }

    /// Bhava drishti of a graha; empty when the graha is unplaced.
    pub fn drishti(&self, graha: Graha) -> &BhavaDrishti {
        &self.drishti[graha.index() as usize]
    }

    /// Reach and control tables.
    pub fn control(&self) -> &ControlMatrix {
        &self.control
    }

    /// Grahas `graha` controls through a one-sided aspect.
    pub fn controlled_by(&self, graha: Graha) -> Vec<Graha> {
        self.control.controlled_by(graha)
    }

    /// Lordship cross-references of one graha.
    pub fn lordship(&self, graha: Graha) -> &Lordship {
        &self.lordships[graha.index() as usize]
    }

    /// One analysis row per graha, in graha order.
    pub fn analysis(&self) -> Vec<GrahaAnalysis> {
        ALL_GRAHAS
            .into_iter()
            .map(|g| {
                let lordship = self.lordship(g);
                GrahaAnalysis {
                    graha: g,
                    bhava: self.bhava_of(g),
                    ruled_bhavas: lordship.ruled_bhavas.clone(),
                    aspects: self
                        .drishti(g)
                        .iter()
                        .map(|(bhava, strength)| AspectStrength { bhava, strength })
                        .collect(),
                    grahas_in_rashis: lordship.grahas_in_rashis.clone(),
                    grahas_in_nakshatras: lordship.grahas_in_nakshatras.clone(),
                    grahas_in_navamsa: lordship.grahas_in_navamsa.clone(),
                    controlling: self.controlled_by(g),
                }
            })
            .collect()
    }

    /// Ayanamsha, lagna degree and lagna rashi.
    pub fn summary(&self) -> ChartSummary {
        ChartSummary {
            ayanamsha_deg: self.inputs.ayanamsha_deg(),
            lagna_deg: self.inputs.cusps()[0],
            lagna_rashi: self.bhavas.lagna_rashi,
        }
    }
}
