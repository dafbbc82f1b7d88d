//! Exact cross-matching of sky positions against galaxy catalogs.
//!
//! Given a transient's position and the galaxies a coarse cone search
//! returned around it, decides which galaxies' projected ellipses (enlarged
//! by a halo margin) contain the transient, and how far each host candidate's
//! center lies from it.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`geometry`] | [`SkyPoint`], [`EllipseShape`], spherical point-in-ellipse test, great-circle distance |
//! | [`catalog`] | [`GalaxyRecord`] ingestion, sentinel decoding, [`ShapeDefaults`] |
//! | [`matcher`] | [`CandidateMatcher`], [`MatchRecord`], [`match_candidates`] |
//! | [`cone`] | In-memory [`cone_search`] prefilter and radius sizing |
//! | [`config`] | [`MatchConfig`] (halo margin, defaults, parallelism) |
//!
//! # Quick Start
//!
//! ```
//! use celestial_crossmatch::{match_candidates, GalaxyRecord, SkyPoint};
//!
//! let transient = SkyPoint::new(106.996905, 31.665367);
//! let candidates = vec![
//!     GalaxyRecord::from_raw("NED01", 106.99741666666999, 31.663861111110002, f64::NAN, f64::NAN, -999.0),
//!     GalaxyRecord::from_raw("NED02", 107.00420833333, 31.66327777778, 0.0245556, 0.5, 80.0),
//! ];
//!
//! let matches = match_candidates(&transient, &candidates, 3.0);
//! assert_eq!(matches.len(), 2);
//! assert_eq!(matches[0].distance_arcsec, 5.64);
//! ```
//!
//! # Logging
//!
//! Library code emits `tracing` events (`debug` per candidate, `info` per
//! batch) and never installs a subscriber.
//!
//! # Features
//!
//! - **`cli`**: enables the `crossmatch` binary.

pub mod catalog;
pub mod cone;
pub mod config;
pub mod error;
pub mod geometry;
pub mod matcher;

pub use catalog::{GalaxyRecord, ShapeDefaults};
pub use cone::{cone_search, ConeSearchParams, ConeSearchResult};
pub use config::MatchConfig;
pub use error::{CrossmatchError, Result};
pub use geometry::{angular_separation_deg, contains, EllipseShape, SkyPoint};
pub use matcher::{match_candidates, CandidateMatcher, MatchRecord};
