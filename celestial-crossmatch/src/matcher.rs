//! Candidate filtering: the exact ellipse test applied to a cone-search result.
//!
//! For each candidate, in input order:
//!
//! 1. missing shape parameters are replaced by [`ShapeDefaults`]
//! 2. the semi-major axis is scaled by the halo margin
//! 3. the query point is tested against the resulting ellipse
//! 4. survivors are annotated with their great-circle distance to the
//!    query point, in arc-seconds rounded to two decimals
//!
//! Output order always follows input order, including in parallel mode.
//! Duplicate catalog entries (e.g. deblended components listed twice) are
//! kept as separate matches.

use celestial_core::constants::ARCSEC_PER_DEG;
use celestial_core::math::round_to;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::catalog::{parse_candidates, GalaxyRecord, ShapeDefaults};
use crate::config::MatchConfig;
use crate::error::Result;
use crate::geometry::{contains, SkyPoint};

/// Decimal places kept in [`MatchRecord::distance_arcsec`].
pub const DISTANCE_DECIMALS: i32 = 2;

/// A candidate that passed the ellipse test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    /// The candidate exactly as supplied (missing shape fields stay `None`).
    #[serde(flatten)]
    pub galaxy: GalaxyRecord,
    /// Distance from the query point to the galaxy center, in arc-seconds.
    pub distance_arcsec: f64,
}

/// Filters candidate galaxies down to those whose (margin-scaled) ellipse
/// contains a query point.
#[derive(Debug, Clone, Default)]
pub struct CandidateMatcher {
    config: MatchConfig,
}

impl CandidateMatcher {
    /// Creates a matcher after validating `config`.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Tests a single candidate; `Some` if it matches.
    pub fn evaluate(&self, point: &SkyPoint, galaxy: &GalaxyRecord) -> Option<MatchRecord> {
        let shape = self.config.defaults.resolve(galaxy);

        if !contains(point, &shape, self.config.size_margin) {
            debug!(id = %galaxy.id, "rejected");
            return None;
        }

        let distance_deg = point.separation_deg(&shape.center());
        let distance_arcsec = round_to(distance_deg * ARCSEC_PER_DEG, DISTANCE_DECIMALS);
        debug!(id = %galaxy.id, distance_arcsec, "matched");

        Some(MatchRecord {
            galaxy: galaxy.clone(),
            distance_arcsec,
        })
    }

    /// Matches typed candidates. Never fails: every record is either kept
    /// or dropped by the ellipse test.
    pub fn match_galaxies(&self, point: &SkyPoint, candidates: &[GalaxyRecord]) -> Vec<MatchRecord> {
        let matches: Vec<MatchRecord> = if self.config.parallel {
            candidates
                .par_iter()
                .filter_map(|galaxy| self.evaluate(point, galaxy))
                .collect()
        } else {
            candidates
                .iter()
                .filter_map(|galaxy| self.evaluate(point, galaxy))
                .collect()
        };

        info!(
            ra = point.ra_deg,
            dec = point.dec_deg,
            candidates = candidates.len(),
            matches = matches.len(),
            "crossmatch complete"
        );
        matches
    }

    /// Parses a raw JSON candidate array and matches it.
    ///
    /// # Errors
    /// Any malformed record fails the whole call; no partial result is
    /// returned.
    pub fn match_json(&self, point: &SkyPoint, candidates: &Value) -> Result<Vec<MatchRecord>> {
        let candidates = parse_candidates(candidates)?;
        Ok(self.match_galaxies(point, &candidates))
    }
}

/// Matches `candidates` against `point` with the median shape defaults.
///
/// `size_margin` is used as given, without validation.
pub fn match_candidates(
    point: &SkyPoint,
    candidates: &[GalaxyRecord],
    size_margin: f64,
) -> Vec<MatchRecord> {
    let matcher = CandidateMatcher {
        config: MatchConfig {
            size_margin,
            defaults: ShapeDefaults::default(),
            parallel: false,
        },
    };
    matcher.match_galaxies(point, candidates)
}
