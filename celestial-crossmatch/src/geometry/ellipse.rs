//! Exact point-in-ellipse test on the celestial sphere.
//!
//! A galaxy's projected shape is an ellipse given by its center, semi-major
//! axis `d`, axis ratio `b/a` and position angle. Projecting that ellipse onto
//! the tangent plane at its center and writing the general conic equation in
//! spherical-trigonometric terms yields a closed-form polynomial in the sines
//! and cosines of `Δα`, `δ₁`, `δ`, `d` and `PA`. The point is inside when the
//! polynomial is strictly positive.
//!
//! The expression is valid for arbitrarily large axes (it is not a
//! small-angle approximation), but its terms cancel to leave a value of
//! order `sin²(d)·(b/a)²`. The evaluation order below is therefore kept
//! exactly as derived: regrouping the sums shifts rounding and changes
//! results for points near the boundary.
//!
//! Before the polynomial, a hemisphere check rejects points more than 90°
//! from the ellipse center (negative dot product of the two unit vectors).
//!
//! # Example
//!
//! ```
//! use celestial_crossmatch::geometry::{contains, EllipseShape, SkyPoint};
//!
//! let galaxy = EllipseShape {
//!     ra_deg: 107.00420833333,
//!     dec_deg: 31.66327777778,
//!     a_deg: 0.0245556,
//!     b2a: 0.5,
//!     pa_deg: 80.0,
//! };
//! let transient = SkyPoint::new(106.996905, 31.665367);
//!
//! assert!(contains(&transient, &galaxy, 3.0));
//! ```

use celestial_core::constants::DEG_TO_RAD;

use super::{EllipseShape, SkyPoint};

/// Whether `point` lies strictly inside `ellipse` after scaling its
/// semi-major axis by `size_margin`.
///
/// All finite inputs are accepted. Non-finite inputs give an unspecified
/// result; shape parameters must be sanitized before they get here (see
/// [`crate::catalog::ShapeDefaults`]).
#[inline]
pub fn contains(point: &SkyPoint, ellipse: &EllipseShape, size_margin: f64) -> bool {
    in_ellipse(
        point.ra_deg,
        point.dec_deg,
        ellipse.ra_deg,
        ellipse.dec_deg,
        size_margin * ellipse.a_deg,
        ellipse.b2a,
        ellipse.pa_deg,
    )
}

/// Raw form of [`contains`]: `d_deg` is the already-scaled semi-major axis.
///
/// A point exactly on the boundary (discriminant `== 0`) is outside.
#[inline]
pub fn in_ellipse(
    ra_deg: f64,
    dec_deg: f64,
    ra1_deg: f64,
    dec1_deg: f64,
    d_deg: f64,
    b2a: f64,
    pa_deg: f64,
) -> bool {
    matches!(
        ellipse_discriminant(ra_deg, dec_deg, ra1_deg, dec1_deg, d_deg, b2a, pa_deg),
        Some(t63) if t63 > 0.0
    )
}

/// Signed membership value of the point `(ra_deg, dec_deg)` for the ellipse
/// centred at `(ra1_deg, dec1_deg)` with semi-major axis `d_deg`.
///
/// Returns `None` when the point is on the far hemisphere from the center
/// and the polynomial is not evaluated. Otherwise the value is positive
/// inside the ellipse, negative outside and zero on the boundary.
#[allow(clippy::too_many_arguments)]
pub fn ellipse_discriminant(
    ra_deg: f64,
    dec_deg: f64,
    ra1_deg: f64,
    dec1_deg: f64,
    d_deg: f64,
    b2a: f64,
    pa_deg: f64,
) -> Option<f64> {
    let d_alpha = (ra1_deg - ra_deg) * DEG_TO_RAD;
    let delta1 = dec1_deg * DEG_TO_RAD;
    let delta = dec_deg * DEG_TO_RAD;
    let pa = pa_deg * DEG_TO_RAD;
    let d = d_deg * DEG_TO_RAD;
    let e = libm::sqrt(1.0 - b2a * b2a);

    let t1 = libm::cos(d_alpha);
    let t22 = libm::sin(d_alpha);
    let t3 = libm::cos(delta1);
    let t32 = libm::sin(delta1);
    let t6 = libm::cos(delta);
    let t26 = libm::sin(delta);
    let t9 = libm::cos(d);
    let t55 = libm::sin(d);

    if t3 * t6 * t1 + t32 * t26 < 0.0 {
        return None;
    }

    let t2 = t1 * t1;
    let t4 = t3 * t3;
    let t5 = t2 * t4;
    let t7 = t6 * t6;
    let t8 = t5 * t7;
    let t10 = t9 * t9;
    let t11 = t7 * t10;
    let t13 = libm::cos(pa);
    let t14 = t13 * t13;
    let t15 = t14 * t10;
    let t18 = t7 * t14;
    let t19 = t18 * t10;
    let t24 = libm::sin(pa);
    let t31 = t1 * t3;
    let t36 = 2.0 * t31 * t32 * t26 * t6;
    let t37 = t31 * t32;
    let t38 = t26 * t6;
    let t45 = t4 * t10;
    let t56 = t55 * t55;
    let t57 = t4 * t7;

    let t60 = -t8 + t5 * t11 + 2.0 * t5 * t15
        - t5 * t19
        - 2.0 * t1 * t4 * t22 * t10 * t24 * t13 * t26
        - t36
        + 2.0 * t37 * t38 * t10
        - 2.0 * t37 * t38 * t15
        - t45 * t14
        - t45 * t2
        + 2.0 * t22 * t3 * t32 * t6 * t24 * t10 * t13
        - t56
        + t7
        - t11
        + t4
        - t57
        + t57 * t10
        + t19
        - t18 * t45;
    let t61 = e * e;
    let t63 = t60 * t61 + t8 + t57 - t4 - t7 + t56 + t36;

    Some(t63)
}
