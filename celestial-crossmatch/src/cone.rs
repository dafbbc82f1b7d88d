//! Coarse cone search over an in-memory candidate list.
//!
//! The crossmatch pipeline normally receives candidates already narrowed by
//! a spatial index. When the whole catalog slice is in memory instead,
//! [`cone_search`] does the same narrowing with a linear scan, and
//! [`suggested_radius_deg`] gives the smallest radius that cannot drop a
//! galaxy the ellipse test would accept.

use crate::catalog::{GalaxyRecord, ShapeDefaults};
use crate::geometry::angular_separation_deg;

/// Parameters for a cone search query.
#[derive(Debug, Clone)]
pub struct ConeSearchParams {
    /// Cone center right ascension, in degrees.
    pub ra_deg: f64,
    /// Cone center declination, in degrees.
    pub dec_deg: f64,
    /// Search radius, in degrees.
    pub radius_deg: f64,
    /// If set, return at most this many results (closest first).
    pub max_results: Option<usize>,
}

/// A single galaxy returned from a cone search.
#[derive(Debug, Clone)]
pub struct ConeSearchResult<'a> {
    pub galaxy: &'a GalaxyRecord,
    /// Angular distance from the search center, in degrees.
    pub distance_deg: f64,
}

/// Selects galaxies whose centers lie within the cone, sorted by distance.
pub fn cone_search<'a>(
    candidates: &'a [GalaxyRecord],
    params: &ConeSearchParams,
) -> Vec<ConeSearchResult<'a>> {
    let mut results: Vec<ConeSearchResult<'a>> = candidates
        .iter()
        .filter_map(|galaxy| {
            let distance_deg =
                angular_separation_deg(params.ra_deg, params.dec_deg, galaxy.ra, galaxy.dec);
            (distance_deg <= params.radius_deg).then_some(ConeSearchResult {
                galaxy,
                distance_deg,
            })
        })
        .collect();

    // Stable sort: equidistant galaxies keep their catalog order.
    results.sort_by(|a, b| {
        a.distance_deg
            .partial_cmp(&b.distance_deg)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(max_results) = params.max_results {
        results.truncate(max_results);
    }

    results
}

/// Cone radius, in degrees, large enough to hold every galaxy whose
/// margin-scaled ellipse could contain the cone center.
///
/// `max_a_deg` is the largest catalogued semi-major axis in the source;
/// galaxies without one are tested with the default.
pub fn suggested_radius_deg(size_margin: f64, defaults: &ShapeDefaults, max_a_deg: f64) -> f64 {
    size_margin * max_a_deg.max(defaults.a_deg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SkyPoint;
    use crate::matcher::match_candidates;

    fn ring() -> Vec<GalaxyRecord> {
        vec![
            GalaxyRecord::from_raw("far", 10.0, 5.0, 0.02, 0.5, 0.0),
            GalaxyRecord::from_raw("mid", 10.0, 0.5, 0.02, 0.5, 0.0),
            GalaxyRecord::from_raw("near", 10.1, 0.0, 0.02, 0.5, 0.0),
            GalaxyRecord::from_raw("antipode", 190.0, 0.0, 0.02, 0.5, 0.0),
        ]
    }

    #[test]
    fn test_cone_search_filters_and_sorts() {
        let candidates = ring();
        let params = ConeSearchParams {
            ra_deg: 10.0,
            dec_deg: 0.0,
            radius_deg: 1.0,
            max_results: None,
        };
        let results = cone_search(&candidates, &params);
        let ids: Vec<&str> = results.iter().map(|r| r.galaxy.id.as_str()).collect();
        assert_eq!(ids, ["near", "mid"]);
        assert!((results[0].distance_deg - 0.1).abs() < 1e-10);
        assert!((results[1].distance_deg - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_cone_search_max_results() {
        let candidates = ring();
        let params = ConeSearchParams {
            ra_deg: 10.0,
            dec_deg: 0.0,
            radius_deg: 180.0,
            max_results: Some(3),
        };
        let results = cone_search(&candidates, &params);
        let ids: Vec<&str> = results.iter().map(|r| r.galaxy.id.as_str()).collect();
        assert_eq!(ids, ["near", "mid", "far"]);
    }

    #[test]
    fn test_suggested_radius() {
        let defaults = ShapeDefaults::default();
        assert_eq!(suggested_radius_deg(3.0, &defaults, 0.5), 1.5);
        assert_eq!(suggested_radius_deg(2.0, &defaults, 0.0), 2.0 * defaults.a_deg);
    }

    #[test]
    fn test_suggested_radius_never_drops_a_match() {
        let query = SkyPoint::new(106.996905, 31.665367);
        let mut candidates = Vec::new();
        for i in 0..200 {
            let ra = 106.9 + 0.001 * i as f64;
            let dec = 31.6 + 0.0007 * i as f64;
            let a = if i % 4 == 0 { -999.0 } else { 0.005 * (i % 9) as f64 };
            candidates.push(GalaxyRecord::from_raw(format!("g{}", i), ra, dec, a, 0.8, 30.0));
        }
        let max_a = candidates.iter().filter_map(|g| g.a).fold(0.0, f64::max);
        let radius = suggested_radius_deg(3.0, &ShapeDefaults::default(), max_a);

        let params = ConeSearchParams {
            ra_deg: query.ra_deg,
            dec_deg: query.dec_deg,
            radius_deg: radius,
            max_results: None,
        };
        let narrowed: Vec<GalaxyRecord> = cone_search(&candidates, &params)
            .into_iter()
            .map(|r| r.galaxy.clone())
            .collect();

        let direct = match_candidates(&query, &candidates, 3.0);
        let via_cone = match_candidates(&query, &narrowed, 3.0);
        assert!(!direct.is_empty());
        assert_eq!(direct.len(), via_cone.len());
    }
}
