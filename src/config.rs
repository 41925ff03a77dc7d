//! Configuration for the sanity check
//!
//! This module provides the settings for a synthetic gradient check: batch
//! size, layer sizes, RNG seed, finite-difference step and tolerance.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{NetworkError, Result};
use crate::gradcheck::{GradientCheck, DEFAULT_EPSILON, DEFAULT_TOLERANCE};
use crate::params::Dimensions;

/// Settings for a synthetic gradient check.
///
/// Parsed from JSON; every field is optional and falls back to the default
/// (20 examples, dimensions `[10, 5, 10]`, step `1e-4`, tolerance `1e-5`,
/// no fixed seed).
///
/// # Example
///
/// ```json
/// {
///   "num_examples": 20,
///   "dimensions": [10, 5, 10],
///   "seed": 42,
///   "epsilon": 1e-4,
///   "tolerance": 1e-5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanityConfig {
    /// Number of synthetic examples (rows of the data matrix)
    pub num_examples: usize,

    /// Input, hidden and output sizes
    pub dimensions: [usize; 3],

    /// RNG seed; a fresh entropy seed is used when absent
    pub seed: Option<u64>,

    /// Finite-difference step
    pub epsilon: f64,

    /// Relative error tolerance
    pub tolerance: f64,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            num_examples: 20,
            dimensions: [10, 5, 10],
            seed: None,
            epsilon: DEFAULT_EPSILON,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl SanityConfig {
    /// Validated dimension triple.
    pub fn dims(&self) -> Result<Dimensions> {
        Dimensions::try_from(self.dimensions)
    }

    /// Validated checker settings.
    pub fn gradient_check(&self) -> Result<GradientCheck> {
        GradientCheck::new(self.epsilon, self.tolerance)
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.num_examples == 0 {
            return Err(NetworkError::Config(
                "num_examples must be positive".to_string(),
            ));
        }
        self.dims()?;
        self.gradient_check()?;
        Ok(())
    }
}

/// Loads a sanity check configuration from a JSON file.
///
/// Reads the file at `path`, deserializes it into a `SanityConfig` and
/// validates it.
///
/// # Examples
///
/// ```no_run
/// use two_layer_gradcheck::config::load_config;
///
/// let cfg = load_config("config/sanity.json").unwrap();
/// assert!(cfg.num_examples > 0);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SanityConfig> {
    let contents = fs::read_to_string(path)?;
    let config: SanityConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
