//! End-to-end checks on the bundled sample chart.

use std::path::PathBuf;

use sambandh_base::{
    ALL_GRAHAS, ActivationConfig, DashaOverlap, Graha, Rashi, compose_dasha, house_activations,
};
use sambandh_config::{AyanamshaSetting, ChartFile, ConfigError, PositionSet};

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_chart.toml")
}

fn sample() -> ChartFile {
    ChartFile::load(&sample_path()).unwrap()
}

#[test]
fn loads_tropical_sample() {
    let file = sample();
    assert!(matches!(file.positions, PositionSet::Tropical(_)));
    assert!(matches!(file.ayanamsha, AyanamshaSetting::Linear(_)));
    let birth = file.birth.as_ref().unwrap();
    assert_eq!(birth.place.as_deref(), Some("Kolhapur"));
}

#[test]
fn ayanamsha_uses_birth_date() {
    // 27615 days after 1900-01-01 at 50.278658"/yr
    let aya = sample().ayanamsha_deg();
    assert!((aya - 23.616715).abs() < 1e-5, "aya = {aya}");
}

#[test]
fn lagna_and_placements() {
    let ctx = sample().context().unwrap();
    assert_eq!(ctx.bhavas().lagna_rashi, Rashi::Makara);
    assert_eq!(ctx.bhava_of(Graha::Surya), Some(7));
    assert_eq!(ctx.bhava_of(Graha::Chandra), Some(9));
    assert_eq!(ctx.bhava_of(Graha::Guru), Some(3));
    assert_eq!(ctx.bhava_of(Graha::Rahu), Some(10));
    assert_eq!(ctx.bhava_of(Graha::Ketu), Some(4));
    assert_eq!(ctx.placement(Graha::Ketu).rashi.rashi, Rashi::Vrishabha);
    assert_eq!(ctx.lordship(Graha::Surya).ruled_bhavas, vec![8]);
}

#[test]
fn every_graha_is_placed() {
    let ctx = sample().context().unwrap();
    for g in ALL_GRAHAS {
        assert!(ctx.bhava_of(g).is_some(), "{g}");
        assert!(!ctx.drishti(g).is_empty(), "{g}");
    }
}

#[test]
fn analysis_defaults_drive_dasha() {
    let file = sample();
    let ctx = file.context().unwrap();
    let period = file.analysis.period.unwrap();
    assert_eq!(period.maha, Graha::Shani);
    let analysis = compose_dasha(&ctx, &period, &file.analysis.activation);
    let sets: Vec<_> = analysis.activations.iter().map(|a| a.bhava_set()).collect();
    match &analysis.overlap {
        DashaOverlap::Common(common) => {
            for c in common {
                assert!(sets.iter().all(|s| s.contains(&c.bhava)));
            }
        }
        DashaOverlap::Disjoint(levels) => {
            for (level, set) in levels.iter().zip(&sets) {
                assert_eq!(level.bhavas, set.iter().copied().collect::<Vec<_>>());
            }
        }
    }
}

#[test]
fn aspects_only_narrows_sample() {
    let ctx = sample().context().unwrap();
    let narrow = ActivationConfig {
        aspects_only: true,
        priority_order: true,
    };
    for g in ALL_GRAHAS {
        let all = house_activations(&ctx, g, &ActivationConfig::default());
        let only = house_activations(&ctx, g, &narrow);
        assert!(only.entries.len() <= all.entries.len());
        assert!(only.bhava_set().is_subset(&all.bhava_set()));
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = ChartFile::load(&sample_path().with_file_name("no_such_chart.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
