//! Matching configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! {"size_margin": 2.5, "defaults": {"b2a": 0.7}, "parallel": true}
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::ShapeDefaults;
use crate::error::{CrossmatchError, Result};

/// Halo margin applied when none is configured.
pub const DEFAULT_SIZE_MARGIN: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Multiplier on each galaxy's semi-major axis before the ellipse test.
    pub size_margin: f64,
    /// Substitutes for missing shape parameters.
    pub defaults: ShapeDefaults,
    /// Evaluate candidates on the rayon thread pool.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            size_margin: DEFAULT_SIZE_MARGIN,
            defaults: ShapeDefaults::default(),
            parallel: false,
        }
    }
}

impl MatchConfig {
    pub fn with_size_margin(mut self, size_margin: f64) -> Self {
        self.size_margin = size_margin;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Loads and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// [`CrossmatchError::InvalidConfig`] if the margin is not a positive
    /// finite number or the shape defaults are out of domain.
    pub fn validate(&self) -> Result<()> {
        if !(self.size_margin.is_finite() && self.size_margin > 0.0) {
            return Err(CrossmatchError::invalid_config(format!(
                "size_margin must be finite and > 0, got {}",
                self.size_margin
            )));
        }
        self.defaults.validate()
    }
}
