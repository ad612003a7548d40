//! Runtime configuration for network generation.
//!
//! The pipeline has exactly two tunables: the silence threshold used by
//! interlocutor estimation and the sigmoid steepness used by narrative
//! smoothing. Both can be loaded from a TOML file and overridden per
//! invocation from the CLI.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::utils::paths::expand_tilde;
use crate::ConversoError;

/// Maximum silence (seconds) between two turns still counted as interaction.
pub const DEFAULT_SILENCE_THRESHOLD: f64 = 5.0;

/// Steepness of the sigmoid bounding interpolated weights into [0, 1].
pub const DEFAULT_MU: f64 = 0.01;

/// Tunable parameters of the network generation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Maximum silence in seconds between verbal interactions.
    pub silence_threshold: f64,
    /// Sigmoid steepness for bounding smoothed weights.
    pub mu: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            silence_threshold: DEFAULT_SILENCE_THRESHOLD,
            mu: DEFAULT_MU,
        }
    }
}

impl NetworkConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConversoError> {
        let path = expand_tilde(path);
        let raw = fs::read_to_string(&path)
            .map_err(|e| ConversoError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Ok(toml::from_str(&raw)?)
    }

    /// Load from an optional file path, falling back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConversoError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::default()),
        }
    }

    /// Apply CLI flag overrides on top of file or default values.
    pub fn with_overrides(mut self, silence_threshold: Option<f64>, mu: Option<f64>) -> Self {
        if let Some(t) = silence_threshold {
            self.silence_threshold = t;
        }
        if let Some(m) = mu {
            self.mu = m;
        }
        self
    }
}
