//! Bhava drishti: continuous aspect strength from a graha onto house cusps.
//!
//! Every graha casts aspects at fixed sign distances (the 7th for all, plus
//! special aspects for Mars, Jupiter, Saturn and the nodes). An aspect of
//! distance `d` lands `(d - 1) * 30` degrees ahead of the graha. A cusp
//! inside `[point - orb, point + orb]` takes full strength 100; outside the
//! window strength decays as `100 * exp(-edge_distance / orb)` and is cut
//! off beyond `falloff_orbs * orb`.

use serde::Serialize;

use crate::graha::{ALL_GRAHAS, Graha};
use crate::util::{angular_separation, in_closed_arc, normalize_360};

/// Full aspect strength, reached inside the orb window.
pub const FULL_STRENGTH: f64 = 100.0;

/// Default orbs in degrees, indexed by `Graha::index()`.
///
/// Sun 15, Moon 12, Mars 9, Mercury 7, Jupiter 9, Venus 7, Saturn 9,
/// Rahu 15, Ketu 15.
pub const DEFAULT_ORBS: [f64; 9] = [15.0, 12.0, 9.0, 7.0, 9.0, 7.0, 9.0, 15.0, 15.0];

/// Sign distances at which a graha casts aspect (1-based, 7 = opposition).
pub const fn aspect_distances(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Surya | Graha::Chandra | Graha::Buddh | Graha::Shukra => &[7],
        Graha::Mangal => &[4, 7, 8],
        Graha::Guru | Graha::Rahu | Graha::Ketu => &[5, 7, 9],
        Graha::Shani => &[3, 7, 10],
    }
}

/// Angular offset of an aspect distance: `(d - 1) * 30` degrees.
pub const fn aspect_offset_deg(distance: u8) -> f64 {
    (distance.saturating_sub(1)) as f64 * 30.0
}

/// Aspect points cast by a graha at `lon_deg`, one per aspect distance.
pub fn aspect_points(graha: Graha, lon_deg: f64) -> impl Iterator<Item = f64> {
    aspect_distances(graha)
        .iter()
        .map(move |&d| normalize_360(lon_deg + aspect_offset_deg(d)))
}

/// Tunable aspect parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrishtiConfig {
    /// Orb per graha in degrees, indexed by `Graha::index()`.
    pub orbs: [f64; 9],
    /// Extra tolerance added to the orb when testing graha-to-graha aspect.
    pub grace_deg: f64,
    /// Cut-off for the decay tail, in multiples of the orb.
    pub falloff_orbs: f64,
}

impl Default for DrishtiConfig {
    fn default() -> Self {
        Self {
            orbs: DEFAULT_ORBS,
            grace_deg: 2.0,
            falloff_orbs: 2.0,
        }
    }
}

impl DrishtiConfig {
    /// Orb of a graha in degrees.
    pub fn orb(&self, graha: Graha) -> f64 {
        self.orbs[graha.index() as usize]
    }

    /// Same config with one orb replaced.
    pub fn with_orb(mut self, graha: Graha, orb_deg: f64) -> Self {
        self.orbs[graha.index() as usize] = orb_deg;
        self
    }
}

/// Strength of an aspect point on a target longitude.
///
/// Returns `None` when the target lies beyond the decay cut-off.
pub fn aspect_strength(point_deg: f64, orb_deg: f64, falloff_orbs: f64, target_deg: f64) -> Option<f64> {
    let start = normalize_360(point_deg - orb_deg);
    let end = normalize_360(point_deg + orb_deg);
    let target = normalize_360(target_deg);

    if in_closed_arc(target, start, end) {
        return Some(FULL_STRENGTH);
    }

    let edge = angular_separation(target, start).min(angular_separation(target, end));
    if edge <= falloff_orbs * orb_deg {
        Some(FULL_STRENGTH * (-edge / orb_deg).exp())
    } else {
        None
    }
}

/// Aspect strengths of one graha on the 12 bhava cusps.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BhavaDrishti {
    /// `strengths[n - 1]` for bhava `n`; `None` when not aspected.
    pub strengths: [Option<f64>; 12],
}

impl BhavaDrishti {
    /// Strength on bhava `number` (1-12).
    pub fn get(&self, number: u8) -> Option<f64> {
        match number {
            1..=12 => self.strengths[number as usize - 1],
            _ => None,
        }
    }

    /// Aspected bhavas with their strengths, ascending by bhava.
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.strengths
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|v| (i as u8 + 1, v)))
    }

    /// Aspected bhava numbers, ascending.
    pub fn bhavas(&self) -> Vec<u8> {
        self.iter().map(|(n, _)| n).collect()
    }

    /// Whether no bhava is aspected.
    pub fn is_empty(&self) -> bool {
        self.strengths.iter().all(Option::is_none)
    }
}

/// Aspect strengths of a graha on every bhava cusp.
///
/// Where several aspect distances reach the same cusp, the strongest wins.
pub fn bhava_drishti(
    graha: Graha,
    lon_deg: f64,
    cusps_deg: &[f64; 12],
    config: &DrishtiConfig,
) -> BhavaDrishti {
    let orb = config.orb(graha);
    let mut out = BhavaDrishti::default();
    for point in aspect_points(graha, lon_deg) {
        for (slot, &cusp) in out.strengths.iter_mut().zip(cusps_deg) {
            if let Some(s) = aspect_strength(point, orb, config.falloff_orbs, cusp) {
                *slot = Some(slot.map_or(s, |prev| prev.max(s)));
            }
        }
    }
    out
}

/// Bhava drishti for all 9 grahas, indexed by `Graha::index()`.
///
/// Grahas flagged in `unplaced` aspect nothing.
pub fn bhava_drishti_all(
    longitudes: &[f64; 9],
    cusps_deg: &[f64; 12],
    unplaced: &[bool; 9],
    config: &DrishtiConfig,
) -> [BhavaDrishti; 9] {
    let mut out = [BhavaDrishti::default(); 9];
    for g in ALL_GRAHAS {
        let i = g.index() as usize;
        if !unplaced[i] {
            out[i] = bhava_drishti(g, longitudes[i], cusps_deg, config);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-10;

    fn equal_cusps() -> [f64; 12] {
        std::array::from_fn(|i| i as f64 * 30.0)
    }

    #[test]
    fn offsets_closed_form() {
        assert!((aspect_offset_deg(3) - 60.0).abs() < EPS);
        assert!((aspect_offset_deg(4) - 90.0).abs() < EPS);
        assert!((aspect_offset_deg(5) - 120.0).abs() < EPS);
        assert!((aspect_offset_deg(7) - 180.0).abs() < EPS);
        assert!((aspect_offset_deg(8) - 210.0).abs() < EPS);
        assert!((aspect_offset_deg(9) - 240.0).abs() < EPS);
        assert!((aspect_offset_deg(10) - 270.0).abs() < EPS);
    }

    #[test]
    fn every_graha_has_seventh() {
        for g in ALL_GRAHAS {
            assert!(aspect_distances(g).contains(&7), "{}", g.name());
        }
    }

    #[test]
    fn default_orbs_by_graha() {
        let cfg = DrishtiConfig::default();
        assert!((cfg.orb(Graha::Surya) - 15.0).abs() < EPS);
        assert!((cfg.orb(Graha::Chandra) - 12.0).abs() < EPS);
        assert!((cfg.orb(Graha::Buddh) - 7.0).abs() < EPS);
        assert!((cfg.orb(Graha::Shukra) - 7.0).abs() < EPS);
        assert!((cfg.orb(Graha::Shani) - 9.0).abs() < EPS);
        assert!((cfg.orb(Graha::Ketu) - 15.0).abs() < EPS);
    }

    #[test]
    fn with_orb_overrides_one() {
        let cfg = DrishtiConfig::default().with_orb(Graha::Shani, 10.0);
        assert!((cfg.orb(Graha::Shani) - 10.0).abs() < EPS);
        assert!((cfg.orb(Graha::Guru) - 9.0).abs() < EPS);
    }

    #[test]
    fn full_strength_inside_window() {
        // 181 + 180 = 1; cusp 2 is inside [352, 10]
        let point = normalize_360(181.0 + aspect_offset_deg(7));
        assert!((point - 1.0).abs() < EPS);
        assert_eq!(aspect_strength(point, 9.0, 2.0, 2.0), Some(FULL_STRENGTH));
    }

    #[test]
    fn window_edges_are_inclusive() {
        assert_eq!(aspect_strength(100.0, 9.0, 2.0, 91.0), Some(FULL_STRENGTH));
        assert_eq!(aspect_strength(100.0, 9.0, 2.0, 109.0), Some(FULL_STRENGTH));
    }

    #[test]
    fn decays_outside_window() {
        // 9 deg beyond the edge: 100 * e^-1
        let s = aspect_strength(100.0, 9.0, 2.0, 118.0).unwrap_or_default();
        assert!((s - 100.0 * (-1.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn cut_off_beyond_two_orbs() {
        assert!(aspect_strength(100.0, 9.0, 2.0, 127.0).is_some());
        assert!(aspect_strength(100.0, 9.0, 2.0, 127.5).is_none());
    }

    #[test]
    fn strength_non_increasing_with_distance() {
        let mut last = FULL_STRENGTH;
        for step in 0..=40 {
            let target = 100.0 + step as f64 * 0.5;
            let s = aspect_strength(100.0, 9.0, 2.0, target).unwrap_or(0.0);
            assert!(s <= last + EPS, "at {target}");
            last = s;
        }
    }

    #[test]
    fn sun_opposes_seventh_cusp() {
        let d = bhava_drishti(Graha::Surya, 0.0, &equal_cusps(), &DrishtiConfig::default());
        assert_eq!(d.get(7), Some(FULL_STRENGTH));
        // 150 and 210 are 15 deg from the window edges: 100 * e^-1
        let tail = 100.0 * (-1.0f64).exp();
        assert!((d.get(6).unwrap_or_default() - tail).abs() < 1e-9);
        assert!((d.get(8).unwrap_or_default() - tail).abs() < 1e-9);
        assert_eq!(d.get(1), None);
        assert_eq!(d.bhavas(), vec![6, 7, 8]);
    }

    #[test]
    fn overlapping_aspects_take_maximum() {
        // Mars 4th and 8th hit cusps 4 and 8 fully; 7th hits cusp 7.
        let d = bhava_drishti(Graha::Mangal, 0.0, &equal_cusps(), &DrishtiConfig::default());
        assert_eq!(d.get(4), Some(FULL_STRENGTH));
        assert_eq!(d.get(7), Some(FULL_STRENGTH));
        assert_eq!(d.get(8), Some(FULL_STRENGTH));
        for (_, s) in d.iter() {
            assert!(s <= FULL_STRENGTH);
        }
    }

    #[test]
    fn unplaced_graha_aspects_nothing() {
        let lons = [0.0; 9];
        let mut unplaced = [false; 9];
        unplaced[Graha::Shani.index() as usize] = true;
        let all = bhava_drishti_all(&lons, &equal_cusps(), &unplaced, &DrishtiConfig::default());
        assert!(all[Graha::Shani.index() as usize].is_empty());
        assert!(!all[Graha::Surya.index() as usize].is_empty());
    }
}
