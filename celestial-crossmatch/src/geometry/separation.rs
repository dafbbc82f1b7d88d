//! Great-circle distance between two sky positions.

use celestial_core::constants::{ARCSEC_PER_DEG, DEG_TO_RAD, RAD_TO_DEG};
use celestial_core::math::vincenty_angular_separation;

/// Angular distance between two points on the sphere, in degrees.
///
/// Uses the two-argument arctangent (Vincenty) form, accurate at all
/// separations. The result lies in [0°, 180°] and is symmetric in its two
/// points.
///
/// # Arguments
/// * `ra1_deg`, `dec1_deg` - First point in degrees
/// * `ra2_deg`, `dec2_deg` - Second point in degrees
pub fn angular_separation_deg(ra1_deg: f64, dec1_deg: f64, ra2_deg: f64, dec2_deg: f64) -> f64 {
    let (d1_sin, d1_cos) = libm::sincos(dec1_deg * DEG_TO_RAD);
    let (d2_sin, d2_cos) = libm::sincos(dec2_deg * DEG_TO_RAD);
    let delta_ra = libm::fabs(ra2_deg - ra1_deg) * DEG_TO_RAD;

    let sep_rad = vincenty_angular_separation(d1_sin, d1_cos, d2_sin, d2_cos, delta_ra);
    sep_rad * RAD_TO_DEG
}

/// [`angular_separation_deg`] expressed in arc-seconds.
pub fn angular_separation_arcsec(
    ra1_deg: f64,
    dec1_deg: f64,
    ra2_deg: f64,
    dec2_deg: f64,
) -> f64 {
    angular_separation_deg(ra1_deg, dec1_deg, ra2_deg, dec2_deg) * ARCSEC_PER_DEG
}
