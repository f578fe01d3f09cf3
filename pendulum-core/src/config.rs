//! Simulation presets.
//!
//! Loads parameter sets, stepping and display options from YAML files so
//! different pendulums can be tried without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! presets/
//! ├── default.yaml
//! ├── damped.yaml
//! └── heavy_lower.yaml
//! ```
//!
//! Every section is optional; missing fields fall back to the defaults in
//! [`crate::types::constants`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::simulation::Stepping;
use crate::types::{constants, PendulumParams};

/// Error type for preset loading operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Preset not found: {0}")]
    NotFound(String),
}

/// Result type for preset operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Display options applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_trail: bool,
    /// Pivot X as a fraction of the surface width
    pub pivot_x: f64,
    /// Pivot Y as a fraction of the surface height
    pub pivot_y: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_trail: true,
            pivot_x: constants::PIVOT_X_FRACTION,
            pivot_y: constants::PIVOT_Y_FRACTION,
        }
    }
}

/// Complete simulation setup as stored in a preset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub name: String,
    pub params: PendulumParams,
    pub stepping: Stepping,
    pub display: DisplayConfig,
}

impl SimulationConfig {
    /// Parse a preset from YAML text.
    ///
    /// Out-of-range physical parameters are logged, not rejected.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: SimulationConfig = serde_yaml::from_str(contents)?;
        let suspicious = config.params.out_of_range();
        if !suspicious.is_empty() {
            warn!(
                preset = %config.name,
                fields = ?suspicious,
                "preset parameters outside expected range"
            );
        }
        if !config.stepping.is_usable() {
            warn!(
                preset = %config.name,
                stepping = ?config.stepping,
                "preset stepping cannot advance the state"
            );
        }
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            params: PendulumParams::default(),
            stepping: Stepping::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Preset loader with configurable base directory.
pub struct PresetLoader {
    base_path: PathBuf,
}

impl PresetLoader {
    /// Create a new loader reading `<base_path>/<name>.yaml` files.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a preset by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = PresetLoader::new("presets");
    /// let damped = loader.load("damped")?;
    /// ```
    pub fn load(&self, name: &str) -> Result<SimulationConfig> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(ConfigError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let config = SimulationConfig::from_yaml_str(&contents)?;
        debug!(preset = name, path = %path.display(), "loaded preset");
        Ok(config)
    }

    /// List all available presets, sorted by name.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
