//! One-sided (controlling) aspects between grahas.
//!
//! Graha A reaches graha B when B sits within `orb_A + grace` of any of A's
//! aspect points. A controls B when A reaches B and B does not reach A.

use serde::Serialize;

use crate::drishti::{DrishtiConfig, aspect_points};
use crate::graha::{ALL_GRAHAS, Graha};
use crate::util::angular_separation;

/// Whether `source` at `source_lon` reaches a body at `target_lon`.
pub fn reaches(source: Graha, source_lon: f64, target_lon: f64, config: &DrishtiConfig) -> bool {
    let tolerance = config.orb(source) + config.grace_deg;
    aspect_points(source, source_lon).any(|p| angular_separation(target_lon, p) <= tolerance)
}

/// A directed controlling relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControllingRelation {
    pub controller: Graha,
    pub controlled: Graha,
}

/// 9×9 reach and control tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMatrix {
    /// `reach[a][b]`: a's aspect reaches b. Indexed by `Graha::index()`.
    pub reach: [[bool; 9]; 9],
}

impl ControlMatrix {
    /// Compute all 72 directed reach checks; the diagonal stays false.
    pub fn compute(longitudes: &[f64; 9], config: &DrishtiConfig) -> Self {
        let mut reach = [[false; 9]; 9];
        for src in ALL_GRAHAS {
            let si = src.index() as usize;
            for tgt in ALL_GRAHAS {
                let ti = tgt.index() as usize;
                if si == ti {
                    continue;
                }
                reach[si][ti] = reaches(src, longitudes[si], longitudes[ti], config);
            }
        }
        Self { reach }
    }

    /// Whether `a` controls `b`.
    pub fn controls(&self, a: Graha, b: Graha) -> bool {
        let (ai, bi) = (a.index() as usize, b.index() as usize);
        self.reach[ai][bi] && !self.reach[bi][ai]
    }

    /// Grahas controlled by `g`, in graha order.
    pub fn controlled_by(&self, g: Graha) -> Vec<Graha> {
        ALL_GRAHAS
            .into_iter()
            .filter(|&other| self.controls(g, other))
            .collect()
    }

    /// Every controlling relation, ordered by controller then controlled.
    pub fn relations(&self) -> Vec<ControllingRelation> {
        ALL_GRAHAS
            .into_iter()
            .flat_map(|controller| {
                self.controlled_by(controller)
                    .into_iter()
                    .map(move |controlled| ControllingRelation {
                        controller,
                        controlled,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lons(pairs: &[(Graha, f64)], rest: f64) -> [f64; 9] {
        let mut out = [rest; 9];
        for &(g, lon) in pairs {
            out[g.index() as usize] = lon;
        }
        out
    }

    #[test]
    fn grace_extends_orb() {
        let cfg = DrishtiConfig::default();
        // Saturn orb 9 + 2: 10th aspect point at 270
        assert!(reaches(Graha::Shani, 0.0, 281.0, &cfg));
        assert!(!reaches(Graha::Shani, 0.0, 281.5, &cfg));
    }

    #[test]
    fn special_aspect_is_one_sided() {
        // Saturn at 0 throws its 3rd onto Sun at 60; Sun's 7th lands at 240.
        let l = lons(&[(Graha::Shani, 0.0), (Graha::Surya, 60.0)], 120.0);
        let m = ControlMatrix::compute(&l, &DrishtiConfig::default());
        assert!(m.controls(Graha::Shani, Graha::Surya));
        assert!(!m.controls(Graha::Surya, Graha::Shani));
        assert!(m.controlled_by(Graha::Shani).contains(&Graha::Surya));
        let saturn_on_sun = ControllingRelation {
            controller: Graha::Shani,
            controlled: Graha::Surya,
        };
        assert!(m.relations().contains(&saturn_on_sun));
    }

    #[test]
    fn mutual_opposition_is_not_control() {
        let l = lons(&[(Graha::Surya, 10.0), (Graha::Chandra, 190.0)], 100.0);
        let m = ControlMatrix::compute(&l, &DrishtiConfig::default());
        assert!(m.reach[0][1] && m.reach[1][0]);
        assert!(!m.controls(Graha::Surya, Graha::Chandra));
        assert!(!m.controls(Graha::Chandra, Graha::Surya));
    }

    #[test]
    fn diagonal_is_false() {
        let m = ControlMatrix::compute(&[0.0; 9], &DrishtiConfig::default());
        for i in 0..9 {
            assert!(!m.reach[i][i]);
        }
    }

    #[test]
    fn never_both_directions() {
        let l = [12.0, 77.0, 140.0, 200.0, 260.0, 301.0, 333.0, 45.0, 225.0];
        let m = ControlMatrix::compute(&l, &DrishtiConfig::default());
        for a in ALL_GRAHAS {
            for b in ALL_GRAHAS {
                assert!(!(m.controls(a, b) && m.controls(b, a)));
            }
        }
        assert_eq!(
            m.relations().len(),
            ALL_GRAHAS.iter().map(|&g| m.controlled_by(g).len()).sum::<usize>()
        );
    }
}
