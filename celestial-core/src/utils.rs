//! Angle normalization helpers.

use crate::constants::DEGREES_PER_CIRCLE;
use crate::math::fmod;

/// Wraps a right ascension in degrees into [0°, 360°).
///
/// # Example
///
/// ```
/// use celestial_core::utils::normalize_ra_deg;
///
/// assert_eq!(normalize_ra_deg(370.0), 10.0);
/// assert_eq!(normalize_ra_deg(-90.0), 270.0);
/// ```
#[inline]
pub fn normalize_ra_deg(ra: f64) -> f64 {
    let mut a = fmod(ra, DEGREES_PER_CIRCLE);
    if a < 0.0 {
        a += DEGREES_PER_CIRCLE;
    }
    // -1e-17 + 360.0 rounds to 360.0
    if a >= DEGREES_PER_CIRCLE {
        a -= DEGREES_PER_CIRCLE;
    }
    a
}
