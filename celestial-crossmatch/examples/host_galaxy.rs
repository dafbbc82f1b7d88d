use celestial_crossmatch::catalog::load_candidates;
use celestial_crossmatch::{CandidateMatcher, MatchConfig, SkyPoint};

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("Usage: host_galaxy <candidates.json> [ra dec]"))?;
    let ra: f64 = std::env::args().nth(2).map_or(Ok(106.996905), |s| s.parse())?;
    let dec: f64 = std::env::args().nth(3).map_or(Ok(31.665367), |s| s.parse())?;

    let candidates = load_candidates(&path)?;
    let transient = SkyPoint::checked(ra, dec)?;
    let matcher = CandidateMatcher::new(MatchConfig::default())?;

    let matches = matcher.match_galaxies(&transient, &candidates);
    println!(
        "\n{} of {} candidates contain ({:.6}, {:+.6}) within a {:.1}x halo:\n",
        matches.len(),
        candidates.len(),
        transient.ra_deg,
        transient.dec_deg,
        matcher.config().size_margin,
    );

    for m in &matches {
        println!("  {:>24}  dist {:>8.2}\"", m.galaxy.id, m.distance_arcsec);
    }

    Ok(())
}
