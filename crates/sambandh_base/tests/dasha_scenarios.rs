//! Dasha composition scenarios on small hand-built charts.

use sambandh_base::{
    ALL_GRAHAS, ActivationConfig, ChartContext, ChartInputs, DashaOverlap, DashaQuery,
    DrishtiConfig, Graha, MAX_REASONS_PER_LEVEL, compose_dasha, house_activations,
};

fn equal_cusps(offset: f64) -> [f64; 12] {
    std::array::from_fn(|i| offset + i as f64 * 30.0)
}

fn ctx(lons: [f64; 8], cusps: [f64; 12]) -> ChartContext {
    let inputs = ChartInputs::from_sidereal(lons, cusps).unwrap();
    ChartContext::new(&inputs, &DrishtiConfig::default())
}

#[test]
fn single_lord_period_equals_its_own_set() {
    let c = ctx(
        [138.0, 190.0, 58.0, 157.0, 24.0, 163.0, 113.0, 234.0],
        equal_cusps(0.5),
    );
    for cfg in [
        ActivationConfig::default(),
        ActivationConfig {
            aspects_only: true,
            priority_order: false,
        },
    ] {
        for g in ALL_GRAHAS {
            let own: Vec<u8> = house_activations(&c, g, &cfg).bhava_set().into_iter().collect();
            let analysis = compose_dasha(&c, &DashaQuery::new(g, g, g), &cfg);
            if own.is_empty() {
                assert!(matches!(analysis.overlap, DashaOverlap::Disjoint(_)));
            } else {
                assert_eq!(analysis.common_bhavas(), own, "{g}");
            }
        }
    }
}

#[test]
fn collapsed_cusps_with_aspects_only_are_disjoint() {
    // No graha can be placed, so none aspects; aspects-only leaves nothing.
    let c = ctx([10.0; 8], [42.0; 12]);
    let cfg = ActivationConfig {
        aspects_only: true,
        priority_order: true,
    };
    let q = DashaQuery::new(Graha::Surya, Graha::Chandra, Graha::Mangal);
    let analysis = compose_dasha(&c, &q, &cfg);
    match analysis.overlap {
        DashaOverlap::Disjoint(levels) => {
            assert_eq!(levels[0].graha, Graha::Surya);
            assert_eq!(levels[2].graha, Graha::Mangal);
            assert!(levels.iter().all(|l| l.bhavas.is_empty()));
        }
        DashaOverlap::Common(_) => panic!("expected no common bhavas"),
    }
}

#[test]
fn collapsed_cusps_still_activate_by_lordship() {
    let c = ctx([10.0; 8], [42.0; 12]);
    let acts = house_activations(&c, Graha::Surya, &ActivationConfig::default());
    assert!(acts.entries.iter().all(|e| e.tier != 1 && e.tier != 2));
    // Vrishabha lagna: Simha is bhava 4.
    assert!(acts.reasons_for(4).any(|r| r.to_string() == "Rules H4"));
}

#[test]
fn common_reasons_respect_priority_order() {
    let c = ctx(
        [138.0, 190.0, 58.0, 157.0, 24.0, 163.0, 113.0, 234.0],
        equal_cusps(0.5),
    );
    let q: DashaQuery = "Jupiter/Saturn/Mercury".parse().unwrap();
    let analysis = compose_dasha(&c, &q, &ActivationConfig::default());
    if let DashaOverlap::Common(common) = &analysis.overlap {
        let bhavas: Vec<u8> = common.iter().map(|c| c.bhava).collect();
        assert!(bhavas.windows(2).all(|w| w[0] < w[1]));
        for cb in common {
            for level in &cb.levels {
                assert!(level.reasons.len() <= MAX_REASONS_PER_LEVEL);
                let tiers: Vec<u8> = level.reasons.iter().map(|r| r.tier()).collect();
                assert!(tiers.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}
