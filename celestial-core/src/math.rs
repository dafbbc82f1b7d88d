#[inline]
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// Great-circle separation in radians from pre-computed latitude terms.
///
/// Two-argument arctangent form of the Vincenty formula: well conditioned
/// for coincident, small and near-antipodal separations alike, unlike the
/// spherical law of cosines.
#[inline]
pub fn vincenty_angular_separation(
    sin_lat1: f64,
    cos_lat1: f64,
    sin_lat2: f64,
    cos_lat2: f64,
    delta_lon: f64,
) -> f64 {
    let (sin_delta_lon, cos_delta_lon) = libm::sincos(delta_lon);

    let num = libm::sqrt(
        (cos_lat2 * sin_delta_lon).powi(2)
            + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_delta_lon).powi(2),
    );
    let den = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_delta_lon;

    libm::atan2(num, den)
}

/// Rounds `value` to `decimals` places after the decimal point.
///
/// Halfway cases round away from zero. Non-finite input is returned as-is.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = libm::pow(10.0, decimals as f64);
    libm::round(value * scale) / scale
}
