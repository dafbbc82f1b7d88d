//! Default substitution for missing shape parameters.
//!
//! A galaxy with no catalogued size or orientation is still tested, using
//! the catalog-wide medians in place of each missing value. Substitution is
//! per field: a record with a known axis ratio but no semi-major axis keeps
//! its own ratio.

use serde::{Deserialize, Serialize};

use super::record::GalaxyRecord;
use crate::error::{CrossmatchError, Result};
use crate::geometry::EllipseShape;

/// Median semi-major axis, in degrees.
pub const MEDIAN_A_DEG: f64 = 0.0265889;
/// Median minor-to-major axis ratio.
pub const MEDIAN_B2A: f64 = 0.61;
/// Median position angle, in degrees.
pub const MEDIAN_PA_DEG: f64 = 86.0;

/// Values substituted for missing shape parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    pub a_deg: f64,
    pub b2a: f64,
    pub pa_deg: f64,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            a_deg: MEDIAN_A_DEG,
            b2a: MEDIAN_B2A,
            pa_deg: MEDIAN_PA_DEG,
        }
    }
}

impl ShapeDefaults {
    /// The ellipse to test for `galaxy`, with every missing parameter
    /// replaced by its default.
    pub fn resolve(&self, galaxy: &GalaxyRecord) -> EllipseShape {
        EllipseShape {
            ra_deg: galaxy.ra,
            dec_deg: galaxy.dec,
            a_deg: galaxy.a.unwrap_or(self.a_deg),
            b2a: galaxy.b2a.unwrap_or(self.b2a),
            pa_deg: galaxy.pa.unwrap_or(self.pa_deg),
        }
    }

    /// Checks the defaults are usable by the ellipse test: `a ≥ 0`,
    /// `b2a ∈ (0, 1]`, finite position angle.
    pub fn validate(&self) -> Result<()> {
        if !(self.a_deg.is_finite() && self.a_deg >= 0.0) {
            return Err(CrossmatchError::invalid_config(format!(
                "default a_deg must be finite and >= 0, got {}",
                self.a_deg
            )));
        }
        if !(self.b2a > 0.0 && self.b2a <= 1.0) {
            return Err(CrossmatchError::invalid_config(format!(
                "default b2a must be in (0, 1], got {}",
                self.b2a
            )));
        }
        if !self.pa_deg.is_finite() {
            return Err(CrossmatchError::invalid_config(format!(
                "default pa_deg must be finite, got {}",
                self.pa_deg
            )));
        }
        Ok(())
    }
}
