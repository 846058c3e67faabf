//! Editor configuration
//!
//! Tunables shared by the generators, the interaction engine, and the
//! cutter. Loadable from a TOML file; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReelcutError, ReelcutResult};
use crate::interact::InteractionConfig;

/// How eagerly automated cutting treats gaps as removable pauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggressiveness {
    Gentle,
    Normal,
    Aggressive,
}

impl Aggressiveness {
    /// Pause threshold in seconds for this level.
    pub fn pause_threshold(&self) -> f64 {
        match self {
            Aggressiveness::Gentle => 0.6,
            Aggressiveness::Normal => 0.3,
            Aggressiveness::Aggressive => 0.15,
        }
    }
}

/// Crate-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Minimum gap between words that becomes a pause item, in seconds.
    pub pause_threshold: f64,
    /// Aggressiveness preset; overrides `pause_threshold` when set.
    pub aggressiveness: Option<Aggressiveness>,
    /// Editing grid in seconds.
    pub snap_step: f64,
    /// Floor on item duration during resize.
    pub min_item_duration: f64,
    /// Per-track lane height in pixels.
    pub track_height_px: f64,
    /// Zoom bounds.
    pub min_scale: f64,
    pub max_scale: f64,
    /// Allowed deviation between expected and probed export duration.
    pub duration_tolerance: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pause_threshold: 0.3,
            aggressiveness: None,
            snap_step: 0.1,
            min_item_duration: 0.1,
            track_height_px: 56.0,
            min_scale: 1.0,
            max_scale: 10.0,
            duration_tolerance: 0.2,
        }
    }
}

impl EditorConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ReelcutResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ReelcutError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Effective pause threshold, honoring the aggressiveness preset.
    pub fn effective_pause_threshold(&self) -> f64 {
        self.aggressiveness
            .map(|a| a.pause_threshold())
            .unwrap_or(self.pause_threshold)
    }

    /// The slice of this configuration the drag engine consumes.
    pub fn interaction(&self) -> InteractionConfig {
        InteractionConfig {
            snap_step: self.snap_step,
            min_item_duration: self.min_item_duration,
            track_height_px: self.track_height_px,
            ..InteractionConfig::default()
        }
    }
}
