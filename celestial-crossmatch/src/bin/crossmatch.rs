use anyhow::Context;
use celestial_crossmatch::catalog::{load_candidates, read_candidates, CatalogSummary};
use celestial_crossmatch::cone::suggested_radius_deg;
use celestial_crossmatch::{
    cone_search, CandidateMatcher, ConeSearchParams, GalaxyRecord, MatchConfig, MatchRecord,
    SkyPoint,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "crossmatch")]
#[command(about = "Match a sky position against galaxy ellipses")]
#[command(version)]
struct Cli {
    /// Candidate list as a JSON array of records ('-' reads stdin)
    #[arg(long)]
    candidates: PathBuf,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print candidate list information
    Info,
    /// Find the galaxies whose ellipse contains a position
    Match {
        /// Right ascension in degrees
        ra: String,
        /// Declination in degrees
        #[arg(allow_hyphen_values = true)]
        dec: String,
        /// Halo margin applied to each semi-major axis (overrides --config)
        #[arg(long)]
        margin: Option<f64>,
        /// JSON matching configuration
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pre-filter candidates to this cone radius in degrees
        #[arg(long, conflicts_with = "auto_cone")]
        cone_radius: Option<f64>,
        /// Pre-filter candidates to the smallest cone that can hold a match
        #[arg(long)]
        auto_cone: bool,
        /// Evaluate candidates in parallel
        #[arg(long)]
        parallel: bool,
        /// Print match timing
        #[arg(long)]
        timing: bool,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let candidates = read_input(&cli.candidates)?;

    match cli.command {
        Commands::Info => {
            println!("{}", CatalogSummary::of(&candidates));
        }
        Commands::Match {
            ra,
            dec,
            margin,
            config,
            cone_radius,
            auto_cone,
            parallel,
            timing,
            format,
        } => {
            let point = parse_position(&ra, &dec)?;

            let mut match_config = match config {
                Some(path) => MatchConfig::from_json_file(&path)
                    .with_context(|| format!("Failed to load config: {:?}", path))?,
                None => MatchConfig::default(),
            };
            if let Some(margin) = margin {
                match_config.size_margin = margin;
            }
            match_config.parallel |= parallel;
            let matcher = CandidateMatcher::new(match_config)?;

            let radius = if auto_cone {
                let max_a = CatalogSummary::of(&candidates).max_a_deg.unwrap_or(0.0);
                Some(suggested_radius_deg(
                    match_config.size_margin,
                    &match_config.defaults,
                    max_a,
                ))
            } else {
                cone_radius
            };

            let start = if timing { Some(Instant::now()) } else { None };

            let matches = match radius {
                Some(radius_deg) => {
                    let params = ConeSearchParams {
                        ra_deg: point.ra_deg,
                        dec_deg: point.dec_deg,
                        radius_deg,
                        max_results: None,
                    };
                    // Matches come back in cone order: nearest center first.
                    let narrowed: Vec<GalaxyRecord> = cone_search(&candidates, &params)
                        .into_iter()
                        .map(|r| r.galaxy.clone())
                        .collect();
                    eprintln!(
                        "Cone of {:.4}° kept {} of {} candidates",
                        radius_deg,
                        narrowed.len(),
                        candidates.len()
                    );
                    matcher.match_galaxies(&point, &narrowed)
                }
                None => matcher.match_galaxies(&point, &candidates),
            };

            if let Some(start_time) = start {
                let elapsed = start_time.elapsed();
                eprintln!(
                    "Match completed in {:.3} ms",
                    elapsed.as_secs_f64() * 1000.0
                );
            }

            match format {
                OutputFormat::Table => print_table(&matches),
                OutputFormat::Json => print_json(&matches)?,
                OutputFormat::Csv => print_csv(&matches),
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: &Path) -> anyhow::Result<Vec<GalaxyRecord>> {
    if path == Path::new("-") {
        read_candidates(std::io::stdin().lock()).context("Failed to read candidates from stdin")
    } else {
        load_candidates(path).with_context(|| format!("Failed to read candidates: {:?}", path))
    }
}

fn parse_position(ra: &str, dec: &str) -> anyhow::Result<SkyPoint> {
    let ra_deg: f64 = ra
        .trim()
        .parse()
        .with_context(|| format!("Cannot parse RA '{}'", ra))?;
    let dec_deg: f64 = dec
        .trim()
        .parse()
        .with_context(|| format!("Cannot parse Dec '{}'", dec))?;
    Ok(SkyPoint::checked(ra_deg, dec_deg)?)
}

fn fmt_shape(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{}", v))
}

fn print_table(matches: &[MatchRecord]) {
    for (i, m) in matches.iter().enumerate() {
        let g = &m.galaxy;
        println!(
            "{:4}: {:>24} RA={:.6}° Dec={:+.6}° a={} b/a={} PA={} Dist={:.2}\"",
            i + 1,
            g.id,
            g.ra,
            g.dec,
            fmt_shape(g.a),
            fmt_shape(g.b2a),
            fmt_shape(g.pa),
            m.distance_arcsec
        );
    }

    if matches.is_empty() {
        println!("No galaxy ellipse contains the position.");
    } else {
        println!("\nTotal matches: {}", matches.len());
    }
}

fn print_json(matches: &[MatchRecord]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(matches)?);
    Ok(())
}

fn print_csv(matches: &[MatchRecord]) {
    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    println!("id,ra,dec,a,b2a,pa,distance_arcsec");
    for m in matches {
        let g = &m.galaxy;
        println!(
            "{},{},{},{},{},{},{}",
            csv_field(&g.id),
            g.ra,
            g.dec,
            opt(g.a),
            opt(g.b2a),
            opt(g.pa),
            m.distance_arcsec
        );
    }
}

fn csv_field(s: &str) -> String {
    if s.contains(|c: char| matches!(c, ',' | '"' | '\n')) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
