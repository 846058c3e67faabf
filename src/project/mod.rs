//! Project persistence
//!
//! The project file is the opaque serialization target the editor loads and
//! saves; deletion sets live as plain arrays on disk and as sets in memory.
//! Older files missing fields (overlays, config, legacy segments) load with
//! defaults.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::EditorConfig;
use crate::error::{ReelcutError, ReelcutResult};
use crate::timeline::TimelineTrack;
use crate::transcript::{Clip, DeletionSets};

/// A persisted editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub clips: Vec<Clip>,
    #[serde(default)]
    pub deletions: DeletionSets,
    /// Text and sticker overlay tracks.
    #[serde(default)]
    pub overlays: Vec<TimelineTrack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EditorConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn new(clips: Vec<Clip>) -> Self {
        Self {
            clips,
            ..Self::default()
        }
    }

    /// Load a project from a JSON file.
    pub fn load(path: &Path) -> ReelcutResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ReelcutError::ProjectError {
            message: format!("{}: {e}", path.display()),
        })?;
        let project: Project = serde_json::from_str(&raw)?;
        project.validate()?;
        info!(path = %path.display(), clips = project.clips.len(), "Project loaded");
        Ok(project)
    }

    /// Save the project as pretty-printed JSON, stamping `saved_at`.
    pub fn save(&mut self, path: &Path) -> ReelcutResult<()> {
        self.saved_at = Some(Utc::now());
        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        info!(path = %path.display(), "Project saved");
        Ok(())
    }

    fn validate(&self) -> ReelcutResult<()> {
        for (index, clip) in self.clips.iter().enumerate() {
            if clip.duration <= 0.0 {
                return Err(ReelcutError::ProjectError {
                    message: format!(
                        "clip {index} ({}) has non-positive duration {}",
                        clip.path.display(),
                        clip.duration
                    ),
                });
            }
        }
        Ok(())
    }
}
