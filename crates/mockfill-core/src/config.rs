//! Plugin configuration
//!
//! Every field has a default, so an empty TOML file is a valid config.

use crate::document::ScaleMode;
use crate::error::{PluginError, PluginResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Seed for candidate picking; random when unset
    pub seed: Option<u64>,
    /// Recent-use window for picked fields; the full candidate set when unset
    pub recent_window: Option<usize>,
    /// Descend into frames while looking for placeholders
    pub traverse_frames: bool,
    /// Scale mode for image fills
    pub image_scale_mode: ScaleMode,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            seed: None,
            recent_window: None,
            traverse_frames: false,
            image_scale_mode: ScaleMode::Fill,
        }
    }
}

impl PluginConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a fixed seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// With a recent-use window capacity
    #[inline]
    #[must_use]
    pub fn with_recent_window(mut self, window: usize) -> Self {
        self.recent_window = Some(window);
        self
    }

    /// With frame traversal on or off
    #[inline]
    #[must_use]
    pub fn with_traverse_frames(mut self, enabled: bool) -> Self {
        self.traverse_frames = enabled;
        self
    }

    /// With image scale mode
    #[inline]
    #[must_use]
    pub fn with_image_scale_mode(mut self, mode: ScaleMode) -> Self {
        self.image_scale_mode = mode;
        self
    }

    /// Parse TOML
    ///
    /// # Errors
    /// Returns [`PluginError::Config`] on invalid TOML or unknown values
    pub fn from_toml_str(raw: &str) -> PluginResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// Returns [`PluginError::Io`] if the file cannot be read, or
    /// [`PluginError::Config`] if it does not parse
    pub fn load(path: impl AsRef<Path>) -> PluginResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| PluginError::io_error(path, e))?;
        Self::from_toml_str(&raw)
    }

    /// Random source for this configuration
    #[must_use]
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
