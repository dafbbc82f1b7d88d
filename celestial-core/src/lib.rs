//! Numeric building blocks shared by the celestial crates.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Angle conversion factors (degrees, radians, arc-seconds) |
//! | [`math`] | Vincenty angular-separation kernel, decimal rounding, `fmod` |
//! | [`utils`] | Right-ascension wrapping |
//!
//! Everything here is pure `f64` arithmetic on top of `libm`, so results do
//! not depend on the platform's C math library.

pub mod constants;
pub mod math;
pub mod utils;
