//! TOML chart files.
//!
//! A chart file records the positions of one natal chart, either tropical
//! (with an ayanamsha model) or already sidereal, plus optional orb
//! overrides and analysis defaults.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use sambandh_base::{
    ALL_GRAHAS, ActivationConfig, ChartContext, ChartInputs, DashaQuery, DrishtiConfig,
    GeoLocation, Graha, LinearAyanamsha, calendar_to_jd,
};

use crate::error::ConfigError;
use crate::recorded::RecordedEphemeris;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartFileToml {
    #[serde(default)]
    cusps: Option<Vec<f64>>,
    #[serde(default)]
    sidereal_cusps: Option<Vec<f64>>,
    #[serde(default)]
    birth: Option<BirthToml>,
    #[serde(default)]
    ayanamsha: Option<AyanamshaToml>,
    #[serde(default)]
    tropical: Option<LongitudesToml>,
    #[serde(default)]
    sidereal: Option<LongitudesToml>,
    #[serde(default)]
    orbs: OrbsToml,
    #[serde(default)]
    analysis: AnalysisToml,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct BirthToml {
    year: i32,
    month: u32,
    day: u32,
    #[serde(default)]
    hour: u32,
    #[serde(default)]
    minute: u32,
    #[serde(default)]
    tz_offset_hours: f64,
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
    #[serde(default)]
    location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct AyanamshaToml {
    #[serde(default)]
    reference_deg: Option<f64>,
    #[serde(default)]
    rate_arcsec_per_year: Option<f64>,
    #[serde(default)]
    value_deg: Option<f64>,
}

/// Ketu is deliberately absent: it is always derived from Rahu.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
struct LongitudesToml {
    sun: f64,
    moon: f64,
    mars: f64,
    mercury: f64,
    jupiter: f64,
    venus: f64,
    saturn: f64,
    rahu: f64,
}

impl LongitudesToml {
    fn to_array(self) -> [f64; 8] {
        [
            self.sun,
            self.moon,
            self.mars,
            self.mercury,
            self.jupiter,
            self.venus,
            self.saturn,
            self.rahu,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OrbsToml {
    sun: Option<f64>,
    moon: Option<f64>,
    mars: Option<f64>,
    mercury: Option<f64>,
    jupiter: Option<f64>,
    venus: Option<f64>,
    saturn: Option<f64>,
    rahu: Option<f64>,
    ketu: Option<f64>,
    grace_deg: Option<f64>,
}

impl OrbsToml {
    fn overrides(&self) -> [Option<f64>; 9] {
        [
            self.sun,
            self.moon,
            self.mars,
            self.mercury,
            self.jupiter,
            self.venus,
            self.saturn,
            self.rahu,
            self.ketu,
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnalysisToml {
    aspects_only: Option<bool>,
    priority_order: Option<bool>,
    maha: Option<String>,
    antar: Option<String>,
    pratyantar: Option<String>,
}

/// Birth moment and place, local civil time.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthDetails {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Local offset from UT in hours, east positive.
    pub tz_offset_hours: f64,
    pub location: GeoLocation,
    pub place: Option<String>,
}

impl BirthDetails {
    /// Julian Date (UT) of the birth moment.
    pub fn jd_ut(&self) -> f64 {
        let local_hours = self.hour as f64 + self.minute as f64 / 60.0;
        let ut_day = self.day as f64 + (local_hours - self.tz_offset_hours) / 24.0;
        calendar_to_jd(self.year, self.month, ut_day)
    }
}

/// How the ayanamsha is obtained for tropical input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AyanamshaSetting {
    /// Linear model evaluated on the birth date.
    Linear(LinearAyanamsha),
    /// A fixed value in degrees.
    Fixed(f64),
}

/// Recorded positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionSet {
    /// Tropical longitudes and cusps, to be corrected by the ayanamsha.
    Tropical(RecordedEphemeris),
    /// Sidereal longitudes (Sun..Rahu) and cusps, used as given.
    Sidereal {
        longitudes: [f64; 8],
        cusps: [f64; 12],
    },
}

/// Defaults for the activation and dasha commands.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnalysisDefaults {
    pub activation: ActivationConfig,
    /// Running period, when all three lords are given.
    pub period: Option<DashaQuery>,
}

/// A validated chart file.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFile {
    pub birth: Option<BirthDetails>,
    pub ayanamsha: AyanamshaSetting,
    pub positions: PositionSet,
    pub drishti: DrishtiConfig,
    pub analysis: AnalysisDefaults,
}

impl ChartFile {
    /// Read and validate a chart file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        let file = Self::parse(&text)?;
        debug!(path = %path.display(), "chart file loaded");
        Ok(file)
    }

    /// Parse and validate chart-file text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let raw: ChartFileToml =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let birth = raw.birth.map(validate_birth).transpose()?;
        let ayanamsha = resolve_ayanamsha(raw.ayanamsha)?;
        let positions = resolve_positions(
            raw.tropical,
            raw.cusps,
            raw.sidereal,
            raw.sidereal_cusps,
        )?;
        let drishti = resolve_orbs(&raw.orbs)?;
        let analysis = resolve_analysis(raw.analysis)?;

        if matches!(positions, PositionSet::Tropical(_))
            && matches!(ayanamsha, AyanamshaSetting::Linear(_))
            && birth.is_none()
        {
            return Err(ConfigError::Invalid(
                "[birth] is required to evaluate the linear ayanamsha; \
                 add it or set [ayanamsha] value_deg"
                    .into(),
            ));
        }

        Ok(Self {
            birth,
            ayanamsha,
            positions,
            drishti,
            analysis,
        })
    }

    /// Ayanamsha in degrees; 0 for sidereal files.
    pub fn ayanamsha_deg(&self) -> f64 {
        match (&self.positions, self.ayanamsha, &self.birth) {
            (PositionSet::Sidereal { .. }, _, _) => 0.0,
            (_, AyanamshaSetting::Fixed(v), _) => v,
            (_, AyanamshaSetting::Linear(model), Some(b)) => {
                model.deg_for_date(b.year, b.month, b.day)
            }
            // Rejected by `parse`.
            (_, AyanamshaSetting::Linear(model), None) => model.reference_deg,
        }
    }

    /// Sidereal chart inputs.
    pub fn chart_inputs(&self) -> Result<ChartInputs, ConfigError> {
        let inputs = match &self.positions {
            PositionSet::Sidereal { longitudes, cusps } => {
                ChartInputs::from_sidereal(*longitudes, *cusps)?
            }
            PositionSet::Tropical(recorded) => {
                let (jd_ut, location) = match &self.birth {
                    Some(b) => (b.jd_ut(), b.location),
                    None => (0.0, GeoLocation::new(0.0, 0.0)),
                };
                ChartInputs::from_ephemeris(recorded, jd_ut, &location, self.ayanamsha_deg())?
            }
        };
        Ok(inputs)
    }

    /// Build the chart context with this file's orbs.
    pub fn context(&self) -> Result<ChartContext, ConfigError> {
        Ok(ChartContext::new(&self.chart_inputs()?, &self.drishti))
    }
}

fn validate_birth(b: BirthToml) -> Result<BirthDetails, ConfigError> {
    let checks: [(bool, &str); 7] = [
        ((1..=12).contains(&b.month), "birth.month must be 1-12"),
        ((1..=31).contains(&b.day), "birth.day must be 1-31"),
        (b.hour <= 23, "birth.hour must be 0-23"),
        (b.minute <= 59, "birth.minute must be 0-59"),
        (
            b.tz_offset_hours.is_finite() && b.tz_offset_hours.abs() <= 14.0,
            "birth.tz_offset_hours must be within +/-14",
        ),
        (
            b.latitude.is_finite() && b.latitude.abs() <= 90.0,
            "birth.latitude must be within +/-90",
        ),
        (
            b.longitude.is_finite() && b.longitude.abs() <= 180.0,
            "birth.longitude must be within +/-180",
        ),
    ];
    if let Some((_, msg)) = checks.iter().find(|(ok, _)| !ok) {
        return Err(ConfigError::Invalid((*msg).to_string()));
    }
    Ok(BirthDetails {
        year: b.year,
        month: b.month,
        day: b.day,
        hour: b.hour,
        minute: b.minute,
        tz_offset_hours: b.tz_offset_hours,
        location: GeoLocation::new(b.latitude, b.longitude),
        place: b.location,
    })
}

fn resolve_ayanamsha(raw: Option<AyanamshaToml>) -> Result<AyanamshaSetting, ConfigError> {
    let Some(raw) = raw else {
        return Ok(AyanamshaSetting::Linear(LinearAyanamsha::default()));
    };
    if let Some(v) = raw.value_deg {
        if raw.reference_deg.is_some() || raw.rate_arcsec_per_year.is_some() {
            return Err(ConfigError::Invalid(
                "ayanamsha.value_deg cannot be combined with a linear model".into(),
            ));
        }
        return finite(v, "ayanamsha.value_deg").map(AyanamshaSetting::Fixed);
    }
    let default = LinearAyanamsha::default();
    let reference = finite(
        raw.reference_deg.unwrap_or(default.reference_deg),
        "ayanamsha.reference_deg",
    )?;
    let rate = finite(
        raw.rate_arcsec_per_year
            .unwrap_or(default.rate_deg_per_year * 3600.0),
        "ayanamsha.rate_arcsec_per_year",
    )?;
    Ok(AyanamshaSetting::Linear(LinearAyanamsha::with_rate_arcsec(
        reference, rate,
    )))
}

fn resolve_positions(
    tropical: Option<LongitudesToml>,
    cusps: Option<Vec<f64>>,
    sidereal: Option<LongitudesToml>,
    sidereal_cusps: Option<Vec<f64>>,
) -> Result<PositionSet, ConfigError> {
    match (tropical, cusps, sidereal, sidereal_cusps) {
        (Some(lons), Some(cusps), None, None) => Ok(PositionSet::Tropical(RecordedEphemeris {
            longitudes: lons.to_array(),
            cusps: twelve_cusps(cusps, "cusps")?,
        })),
        (None, None, Some(lons), Some(cusps)) => Ok(PositionSet::Sidereal {
            longitudes: lons.to_array(),
            cusps: twelve_cusps(cusps, "sidereal_cusps")?,
        }),
        (Some(_), None, None, None) => Err(ConfigError::Invalid(
            "[tropical] needs a top-level `cusps` array".into(),
        )),
        (None, None, Some(_), None) => Err(ConfigError::Invalid(
            "[sidereal] needs a top-level `sidereal_cusps` array".into(),
        )),
        (None, None, None, None) => Err(ConfigError::Invalid(
            "either [tropical] with `cusps` or [sidereal] with `sidereal_cusps` is required"
                .into(),
        )),
        _ => Err(ConfigError::Invalid(
            "tropical and sidereal positions cannot be mixed".into(),
        )),
    }
}

fn twelve_cusps(values: Vec<f64>, key: &str) -> Result<[f64; 12], ConfigError> {
    let n = values.len();
    <[f64; 12]>::try_from(values)
        .map_err(|_| ConfigError::Invalid(format!("`{key}` must hold 12 values, found {n}")))
}

fn resolve_orbs(raw: &OrbsToml) -> Result<DrishtiConfig, ConfigError> {
    let mut config = DrishtiConfig::default();
    for (g, orb) in ALL_GRAHAS.into_iter().zip(raw.overrides()) {
        if let Some(orb) = orb {
            if !(orb.is_finite() && orb > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "orb for {g} must be a positive number"
                )));
            }
            config = config.with_orb(g, orb);
        }
    }
    if let Some(grace) = raw.grace_deg {
        if !(grace.is_finite() && grace >= 0.0) {
            return Err(ConfigError::Invalid("orbs.grace_deg must be >= 0".into()));
        }
        config.grace_deg = grace;
    }
    Ok(config)
}

fn resolve_analysis(raw: AnalysisToml) -> Result<AnalysisDefaults, ConfigError> {
    let defaults = ActivationConfig::default();
    let activation = ActivationConfig {
        aspects_only: raw.aspects_only.unwrap_or(defaults.aspects_only),
        priority_order: raw.priority_order.unwrap_or(defaults.priority_order),
    };
    let period = match (raw.maha, raw.antar, raw.pratyantar) {
        (Some(m), Some(a), Some(p)) => Some(DashaQuery::new(
            m.parse::<Graha>()?,
            a.parse::<Graha>()?,
            p.parse::<Graha>()?,
        )),
        (None, None, None) => None,
        _ => {
            return Err(ConfigError::Invalid(
                "analysis needs all of maha, antar and pratyantar, or none".into(),
            ));
        }
    };
    Ok(AnalysisDefaults { activation, period })
}

fn finite(v: f64, key: &str) -> Result<f64, ConfigError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConfigError::Invalid(format!("{key} must be finite")))
    }
}
