//! Sky positions, galaxy ellipses and the two spherical primitives.
//!
//! - [`ellipse`]: exact point-in-ellipse test on the sphere
//! - [`separation`]: great-circle distance between two positions
//!
//! All angles are decimal degrees at this boundary; conversion to radians
//! happens inside each primitive.

pub mod ellipse;
pub mod separation;

use celestial_core::utils::normalize_ra_deg;
use serde::{Deserialize, Serialize};

use crate::error::{CrossmatchError, Result};

pub use ellipse::{contains, ellipse_discriminant, in_ellipse};
pub use separation::{angular_separation_arcsec, angular_separation_deg};

/// A position on the celestial sphere, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyPoint {
    /// Right ascension, nominally in [0°, 360°).
    pub ra_deg: f64,
    /// Declination in [-90°, 90°].
    pub dec_deg: f64,
}

impl SkyPoint {
    pub const fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self { ra_deg, dec_deg }
    }

    /// Builds a validated position: both coordinates finite, declination
    /// within the poles. Right ascension is wrapped into [0°, 360°).
    pub fn checked(ra_deg: f64, dec_deg: f64) -> Result<Self> {
        if !ra_deg.is_finite() || !dec_deg.is_finite() {
            return Err(CrossmatchError::invalid_position(format!(
                "coordinates must be finite, got ({}, {})",
                ra_deg, dec_deg
            )));
        }
        if !(-90.0..=90.0).contains(&dec_deg) {
            return Err(CrossmatchError::invalid_position(format!(
                "Dec {:.6}° out of range [-90°, +90°]",
                dec_deg
            )));
        }
        Ok(Self::new(normalize_ra_deg(ra_deg), dec_deg))
    }

    /// Great-circle distance to `other`, in degrees.
    pub fn separation_deg(&self, other: &SkyPoint) -> f64 {
        angular_separation_deg(self.ra_deg, self.dec_deg, other.ra_deg, other.dec_deg)
    }
}

/// Projected shape of a galaxy: an ellipse centred on the sky.
///
/// `pa_deg` is the position angle of the major axis, measured from north
/// through east. Any real value is accepted; only its trigonometric
/// functions are used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseShape {
    /// Center right ascension, in degrees.
    pub ra_deg: f64,
    /// Center declination, in degrees.
    pub dec_deg: f64,
    /// Semi-major axis, in degrees.
    pub a_deg: f64,
    /// Minor-to-major axis ratio in (0, 1].
    pub b2a: f64,
    /// Position angle of the major axis, in degrees.
    pub pa_deg: f64,
}

impl EllipseShape {
    pub fn center(&self) -> SkyPoint {
        SkyPoint::new(self.ra_deg, self.dec_deg)
    }

    /// Whether `point` lies inside this ellipse with its semi-major axis
    /// scaled by `size_margin`. See [`ellipse::contains`].
    pub fn contains(&self, point: &SkyPoint, size_margin: f64) -> bool {
        contains(point, self, size_margin)
    }
}
