use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use sambandh_base::{
    ActivationConfig, ChartContext, DashaOverlap, DashaQuery, Graha,
    LinearAyanamsha, compose_dasha, deg_to_dms, house_activations, nakshatra_from_longitude,
    navamsa_from_longitude, rashi_from_longitude,
};
use sambandh_config::ChartFile;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "sambandh", about = "Natal-chart relationships and dasha bhava activation")]
struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rashi, nakshatra and navamsa of a sidereal longitude
    Placement {
        /// Sidereal longitude in degrees
        #[arg(allow_negative_numbers = true)]
        lon: f64,
    },
    /// Linear ayanamsha for a calendar date
    Ayanamsha {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
        /// Ayanamsha at 1900-01-01 in degrees
        #[arg(long)]
        reference: Option<f64>,
        /// Precession rate in arcseconds per year
        #[arg(long)]
        rate: Option<f64>,
    },
    /// Sripati bhava boundaries and bhava rashis
    Houses {
        #[arg(long)]
        chart: PathBuf,
    },
    /// Full per-graha analysis table
    Chart {
        #[arg(long)]
        chart: PathBuf,
    },
    /// Bhava drishti strengths per graha
    Aspects {
        #[arg(long)]
        chart: PathBuf,
    },
    /// One-sided (controlling) aspects between grahas
    Controls {
        #[arg(long)]
        chart: PathBuf,
    },
    /// Bhavas activated by one graha, with reasons
    Activation {
        #[arg(long)]
        chart: PathBuf,
        /// Graha name (English or Sanskrit)
        #[arg(long)]
        graha: String,
        /// Keep only aspect-based activations
        #[arg(long)]
        aspects_only: bool,
        /// Order by bhava only, ignoring tier
        #[arg(long)]
        no_priority: bool,
    },
    /// Bhavas common to a maha/antar/pratyantar period
    Dasha {
        #[arg(long)]
        chart: PathBuf,
        #[arg(long)]
        maha: Option<String>,
        #[arg(long)]
        antar: Option<String>,
        #[arg(long)]
        pratyantar: Option<String>,
        /// Whole period as "Maha/Antar/Pratyantar"
        #[arg(long, conflicts_with_all = ["maha", "antar", "pratyantar"])]
        period: Option<String>,
        /// Keep only aspect-based activations
        #[arg(long)]
        aspects_only: bool,
        /// Order by bhava only, ignoring tier
        #[arg(long)]
        no_priority: bool,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

fn load_chart(path: &Path) -> ChartFile {
    ChartFile::load(path).unwrap_or_else(|e| {
        eprintln!("Failed to load chart {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn load_context(file: &ChartFile) -> ChartContext {
    file.context().unwrap_or_else(|e| {
        eprintln!("Failed to build chart: {e}");
        std::process::exit(1);
    })
}

fn parse_graha(name: &str) -> Graha {
    name.parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to encode JSON: {e}");
            std::process::exit(1);
        }
    }
}

/// Command-line flags can only narrow the chart file's activation defaults.
fn activation_config(file: &ChartFile, aspects_only: bool, no_priority: bool) -> ActivationConfig {
    ActivationConfig {
        aspects_only: aspects_only || file.analysis.activation.aspects_only,
        priority_order: !no_priority && file.analysis.activation.priority_order,
    }
}

fn resolve_period(
    file: &ChartFile,
    maha: Option<String>,
    antar: Option<String>,
    pratyantar: Option<String>,
    period: Option<String>,
) -> DashaQuery {
    if let Some(p) = period {
        return p.parse().unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        });
    }
    match (maha, antar, pratyantar) {
        (Some(m), Some(a), Some(p)) => {
            DashaQuery::new(parse_graha(&m), parse_graha(&a), parse_graha(&p))
        }
        (None, None, None) => file.analysis.period.unwrap_or_else(|| {
            eprintln!("No period given and the chart file has no [analysis] period");
            std::process::exit(1);
        }),
        _ => {
            eprintln!("--maha, --antar and --pratyantar must be given together");
            std::process::exit(1);
        }
    }
}

fn fmt_bhava(bhava: Option<u8>) -> String {
    bhava.map_or_else(|| "-".to_string(), |b| format!("H{b}"))
}

fn fmt_grahas(grahas: &[Graha]) -> String {
    if grahas.is_empty() {
        return "-".to_string();
    }
    grahas.iter().map(|g| g.english_name()).collect::<Vec<_>>().join(", ")
}

fn fmt_bhavas(bhavas: &[u8]) -> String {
    if bhavas.is_empty() {
        return "-".to_string();
    }
    bhavas.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(", ")
}

#[derive(Serialize)]
struct PlacementReport {
    longitude_deg: f64,
    rashi: sambandh_base::RashiInfo,
    nakshatra: sambandh_base::NakshatraInfo,
    navamsa: sambandh_base::NavamsaInfo,
}

#[derive(Serialize)]
struct AyanamshaReport {
    year: i32,
    month: u32,
    day: u32,
    ayanamsha_deg: f64,
}

#[derive(Serialize)]
struct ChartReport<'a> {
    summary: sambandh_base::ChartSummary,
    placements: &'a [sambandh_base::GrahaPlacement; 9],
    analysis: Vec<sambandh_base::GrahaAnalysis>,
}

#[derive(Serialize)]
struct AspectRow {
    graha: Graha,
    bhava: Option<u8>,
    aspects: Vec<sambandh_base::AspectStrength>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json = cli.json;

    match cli.command {
        Commands::Placement { lon } => {
            if !lon.is_finite() {
                eprintln!("Longitude must be finite, got {lon}");
                std::process::exit(1);
            }
            let report = PlacementReport {
                longitude_deg: sambandh_base::normalize_360(lon),
                rashi: rashi_from_longitude(lon),
                nakshatra: nakshatra_from_longitude(lon),
                navamsa: navamsa_from_longitude(lon),
            };
            if json {
                print_json(&report);
                return;
            }
            let r = &report.rashi;
            println!(
                "Rashi:     {} ({}) {} ({:.4} deg in rashi)",
                r.rashi.name(),
                r.rashi,
                r.dms,
                r.degrees_in_rashi
            );
            let n = &report.nakshatra;
            println!(
                "Nakshatra: {} (index {}), pada {} ({:.4} deg in nakshatra)",
                n.nakshatra, n.nakshatra_index, n.pada, n.degrees_in_nakshatra
            );
            println!(
                "Navamsa:   {} ({}), division {}",
                report.navamsa.rashi.name(),
                report.navamsa.rashi,
                report.navamsa.division
            );
        }

        Commands::Ayanamsha {
            year,
            month,
            day,
            reference,
            rate,
        } => {
            if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
                eprintln!("Invalid date {year}-{month:02}-{day:02}");
                std::process::exit(1);
            }
            let defaults = LinearAyanamsha::default();
            let model = match (reference, rate) {
                (None, None) => defaults,
                (reference, rate) => LinearAyanamsha::with_rate_arcsec(
                    reference.unwrap_or(defaults.reference_deg),
                    rate.unwrap_or(defaults.rate_deg_per_year * 3600.0),
                ),
            };
            let aya = model.deg_for_date(year, month, day);
            debug!(year, month, day, aya, "ayanamsha evaluated");
            if json {
                print_json(&AyanamshaReport {
                    year,
                    month,
                    day,
                    ayanamsha_deg: aya,
                });
                return;
            }
            println!(
                "Ayanamsha {year}-{month:02}-{day:02}: {aya:.6} deg ({})",
                deg_to_dms(aya)
            );
        }

        Commands::Houses { chart } => {
            let file = load_chart(&chart);
            let ctx = load_context(&file);
            let bhavas = ctx.bhavas();
            if json {
                print_json(bhavas);
                return;
            }
            println!("Lagna rashi: {}", bhavas.lagna_rashi);
            println!(
                "{:<6} {:>10} {:>10} {:>10} {:>8}  Rashi",
                "Bhava", "Cusp", "Start", "End", "Span"
            );
            for b in &bhavas.bhavas {
                println!(
                    "H{:<5} {:>10.4} {:>10.4} {:>10.4} {:>8.4}  {} ({})",
                    b.number,
                    b.cusp_deg,
                    b.start_deg,
                    b.end_deg,
                    b.span_deg(),
                    b.rashi.name(),
                    b.rashi
                );
            }
        }

        Commands::Chart { chart } => {
            let file = load_chart(&chart);
            let ctx = load_context(&file);
            let summary = ctx.summary();
            let analysis = ctx.analysis();
            if json {
                print_json(&ChartReport {
                    summary,
                    placements: ctx.placements(),
                    analysis,
                });
                return;
            }
            println!(
                "Ayanamsha: {:.6} deg   Lagna: {:.4} deg ({})",
                summary.ayanamsha_deg, summary.lagna_deg, summary.lagna_rashi
            );
            println!();
            println!(
                "{:<8} {:>9} {:<12} {:<18} {:<5} {:<8} {:<10} Controls",
                "Graha", "Lon", "Rashi", "Nakshatra", "Pada", "Bhava", "Rules"
            );
            for (p, a) in ctx.placements().iter().zip(&analysis) {
                println!(
                    "{:<8} {:>9.4} {:<12} {:<18} {:<5} {:<8} {:<10} {}",
                    p.graha.english_name(),
                    p.longitude_deg,
                    p.rashi.rashi.name(),
                    p.nakshatra.nakshatra.name(),
                    p.nakshatra.pada,
                    fmt_bhava(p.bhava),
                    fmt_bhavas(&a.ruled_bhavas),
                    fmt_grahas(&a.controlling)
                );
            }
            println!();
            for a in &analysis {
                println!("{}:", a.graha);
                println!("  in its rashis:      {}", fmt_grahas(&a.grahas_in_rashis));
                println!("  in its nakshatras:  {}", fmt_grahas(&a.grahas_in_nakshatras));
                println!("  in its navamsa:     {}", fmt_grahas(&a.grahas_in_navamsa));
            }
        }

        Commands::Aspects { chart } => {
            let file = load_chart(&chart);
            let ctx = load_context(&file);
            let rows: Vec<AspectRow> = ctx
                .analysis()
                .into_iter()
                .map(|a| AspectRow {
                    graha: a.graha,
                    bhava: a.bhava,
                    aspects: a.aspects,
                })
                .collect();
            if json {
                print_json(&rows);
                return;
            }
            for row in &rows {
                let cells: Vec<String> = row
                    .aspects
                    .iter()
                    .map(|s| format!("H{} {:.1}", s.bhava, s.strength))
                    .collect();
                let cells = if cells.is_empty() {
                    "-".to_string()
                } else {
                    cells.join("  ")
                };
                println!(
                    "{:<8} ({:<3}) {cells}",
                    row.graha.english_name(),
                    fmt_bhava(row.bhava)
                );
            }
        }

        Commands::Controls { chart } => {
            let file = load_chart(&chart);
            let ctx = load_context(&file);
            let relations = ctx.control().relations();
            if json {
                print_json(&relations);
                return;
            }
            if relations.is_empty() {
                println!("No controlling aspects");
                return;
            }
            for r in &relations {
                println!("{} controls {}", r.controller, r.controlled);
            }
        }

        Commands::Activation {
            chart,
            graha,
            aspects_only,
            no_priority,
        } => {
            let file = load_chart(&chart);
            let ctx = load_context(&file);
            let graha = parse_graha(&graha);
            let cfg = activation_config(&file, aspects_only, no_priority);
            let acts = house_activations(&ctx, graha, &cfg);
            info!(graha = %graha, entries = acts.entries.len(), "activations computed");
            if json {
                print_json(&acts);
                return;
            }
            if acts.is_empty() {
                println!("{graha} activates no bhavas");
                return;
            }
            let bhavas: Vec<u8> = acts.bhava_set().into_iter().collect();
            println!("{graha} activates: {}", fmt_bhavas(&bhavas));
            for e in &acts.entries {
                println!("  H{:<3} tier {:<3} {}", e.bhava, e.tier, e.reason);
            }
        }

        Commands::Dasha {
            chart,
            maha,
            antar,
            pratyantar,
            period,
            aspects_only,
            no_priority,
        } => {
            let file = load_chart(&chart);
            let ctx = load_context(&file);
            let query = resolve_period(&file, maha, antar, pratyantar, period);
            let cfg = activation_config(&file, aspects_only, no_priority);
            let analysis = compose_dasha(&ctx, &query, &cfg);
            if json {
                print_json(&analysis);
                return;
            }
            println!("{query}");
            match &analysis.overlap {
                DashaOverlap::Common(common) => {
                    println!("Common bhavas: {}", fmt_bhavas(&analysis.common_bhavas()));
                    for cb in common {
                        println!();
                        println!("H{}:", cb.bhava);
                        for level in &cb.levels {
                            let reasons: Vec<String> =
                                level.reasons.iter().map(|r| r.to_string()).collect();
                            println!(
                                "  {:<15} {:<8} {}",
                                level.level.name(),
                                level.graha.english_name(),
                                reasons.join("; ")
                            );
                        }
                    }
                }
                DashaOverlap::Disjoint(levels) => {
                    println!("No common bhavas");
                    for level in levels {
                        println!(
                            "  {:<15} {:<8} {}",
                            level.level.name(),
                            level.graha.english_name(),
                            fmt_bhavas(&level.bhavas)
                        );
                    }
                }
            }
        }
    }
}
