//! Candidate galaxy lists as delivered by a coarse cone search.
//!
//! - [`record`]: [`GalaxyRecord`], sentinel decoding, per-record JSON parsing
//! - [`shape`]: [`ShapeDefaults`] and default substitution
//!
//! A candidate list is a JSON array of record objects. Parsing is
//! all-or-nothing: the first malformed record fails the whole list.

pub mod record;
pub mod shape;

pub use record::{shape_value, GalaxyRecord, MISSING_SENTINEL};
pub use shape::{ShapeDefaults, MEDIAN_A_DEG, MEDIAN_B2A, MEDIAN_PA_DEG};

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{CrossmatchError, Result};

/// Parses a JSON array of raw candidate records.
///
/// # Errors
/// [`CrossmatchError::InvalidInput`] if `value` is not an array, or the
/// first [`CrossmatchError::InvalidRecord`] encountered.
pub fn parse_candidates(value: &Value) -> Result<Vec<GalaxyRecord>> {
    let records = value.as_array().ok_or_else(|| {
        CrossmatchError::invalid_input("expected a JSON array of candidate records")
    })?;

    records
        .iter()
        .enumerate()
        .map(|(index, raw)| GalaxyRecord::from_json(index, raw))
        .collect()
}

/// Reads and parses a candidate list from any JSON source.
pub fn read_candidates<R: Read>(reader: R) -> Result<Vec<GalaxyRecord>> {
    let value: Value = serde_json::from_reader(reader)?;
    parse_candidates(&value)
}

/// Reads and parses a candidate list from a JSON file.
pub fn load_candidates(path: impl AsRef<Path>) -> Result<Vec<GalaxyRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let candidates = read_candidates(BufReader::new(file))?;
    debug!(path = %path.display(), count = candidates.len(), "loaded candidates");
    Ok(candidates)
}

/// Shape-field coverage of a candidate list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSummary {
    pub total: usize,
    pub with_a: usize,
    pub with_b2a: usize,
    pub with_pa: usize,
    /// Records with every shape parameter catalogued.
    pub complete: usize,
    /// Largest catalogued semi-major axis, in degrees.
    pub max_a_deg: Option<f64>,
}

impl CatalogSummary {
    pub fn of(candidates: &[GalaxyRecord]) -> Self {
        let mut summary = Self {
            total: candidates.len(),
            ..Default::default()
        };
        for g in candidates {
            summary.with_a += g.a.is_some() as usize;
            summary.with_b2a += g.b2a.is_some() as usize;
            summary.with_pa += g.pa.is_some() as usize;
            summary.complete += (g.a.is_some() && g.b2a.is_some() && g.pa.is_some()) as usize;
            if let Some(a) = g.a {
                summary.max_a_deg = Some(summary.max_a_deg.map_or(a, |m| m.max(a)));
            }
        }
        summary
    }
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |n: usize| {
            if self.total == 0 {
                0.0
            } else {
                100.0 * n as f64 / self.total as f64
            }
        };
        writeln!(f, "Candidates: {}", self.total)?;
        writeln!(f, "With a: {} ({:.1}%)", self.with_a, pct(self.with_a))?;
        writeln!(f, "With b2a: {} ({:.1}%)", self.with_b2a, pct(self.with_b2a))?;
        writeln!(f, "With pa: {} ({:.1}%)", self.with_pa, pct(self.with_pa))?;
        writeln!(f, "Complete shapes: {} ({:.1}%)", self.complete, pct(self.complete))?;
        match self.max_a_deg {
            Some(a) => write!(f, "Largest a: {:.6}° ({:.1}\")", a, a * 3600.0),
            None => write!(f, "Largest a: n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> Value {
        json!([
            {"id": "a", "ra": 10.0, "dec": 1.0, "a": 0.02, "b2a": 0.5, "pa": 10.0},
            {"id": "b", "ra": 10.1, "dec": 1.1, "a": null, "b2a": 0.9, "pa": -999},
            {"id": "c", "ra": 10.2, "dec": 1.2, "a": 0.05, "b2a": null, "pa": 45.0}
        ])
    }

    #[test]
    fn test_parse_candidates_keeps_order() {
        let candidates = parse_candidates(&sample()).unwrap();
        let ids: Vec<&str> = candidates.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_parse_candidates_fails_whole_list() {
        let raw = json!([
            {"id": "a", "ra": 10.0, "dec": 1.0, "a": 0.02, "b2a": 0.5, "pa": 10.0},
            {"id": "b", "ra": 10.1, "a": 0.02, "b2a": 0.5, "pa": 10.0}
        ]);
        let err = parse_candidates(&raw).unwrap_err();
        assert!(matches!(
            err,
            CrossmatchError::InvalidRecord { index: 1, ref field, .. } if field == "dec"
        ));
    }

    #[test]
    fn test_parse_candidates_requires_array() {
        let err = parse_candidates(&json!({"id": "a"})).unwrap_err();
        assert!(matches!(err, CrossmatchError::InvalidInput { .. }));
    }

    #[test]
    fn test_load_candidates_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(sample().to_string().as_bytes()).unwrap();
        file.flush().unwrap();

        let candidates = load_candidates(file.path()).unwrap();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[1].a, None);
    }

    #[test]
    fn test_load_candidates_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[{\"id\": ").unwrap();
        file.flush().unwrap();
        assert!(matches!(
            load_candidates(file.path()),
            Err(CrossmatchError::Json(_))
        ));
    }

    #[test]
    fn test_load_candidates_missing_file() {
        assert!(matches!(
            load_candidates("/nonexistent/candidates.json"),
            Err(CrossmatchError::Io(_))
        ));
    }

    #[test]
    fn test_summary() {
        let candidates = parse_candidates(&sample()).unwrap();
        let summary = CatalogSummary::of(&candidates);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.with_a, 2);
        assert_eq!(summary.with_b2a, 2);
        assert_eq!(summary.with_pa, 2);
        assert_eq!(summary.complete, 1);
        assert_eq!(summary.max_a_deg, Some(0.05));
        assert!(summary.to_string().contains("Candidates: 3"));
    }

    #[test]
    fn test_summary_empty() {
        let summary = CatalogSummary::of(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.to_string().contains("Largest a: n/a"));
    }
}
