//! Media probing via ffprobe
//!
//! Clip durations come from decoded media headers; the editor never trusts a
//! project file that disagrees with the media on disk.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::debug;

use crate::error::{ReelcutError, ReelcutResult};

/// Summary of a probed media file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    pub duration: f64,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// ffprobe-backed media inspector.
pub struct MediaProbe {
    ffprobe: String,
}

impl MediaProbe {
    pub fn new() -> Self {
        Self {
            ffprobe: "ffprobe".to_string(),
        }
    }

    /// Use a specific ffprobe binary instead of the one on PATH.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.ffprobe = binary.into();
        self
    }

    /// Duration of a media file in seconds, from the container header.
    pub async fn duration(&self, path: &Path) -> ReelcutResult<f64> {
        if !path.exists() {
            return Err(ReelcutError::InputFileNotFound {
                path: path.display().to_string(),
            });
        }

        let output = Command::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|e| ReelcutError::ProbeError {
                message: format!("failed to run {}: {e}", self.ffprobe),
            })?;

        if !output.status.success() {
            return Err(ReelcutError::ProbeError {
                message: format!(
                    "{}: {}",
                    path.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let duration: f64 = raw.trim().parse().map_err(|_| ReelcutError::ProbeError {
            message: format!("unparseable duration {raw:?} for {}", path.display()),
        })?;

        debug!(path = %path.display(), duration, "Probed media duration");
        Ok(duration)
    }

    /// Full probe: duration plus the primary video stream's dimensions.
    pub async fn inspect(&self, path: &Path) -> ReelcutResult<MediaInfo> {
        let duration = self.duration(path).await?;

        let output = Command::new(&self.ffprobe)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height",
                "-of",
                "csv=p=0:s=x",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|e| ReelcutError::ProbeError {
                message: format!("failed to run {}: {e}", self.ffprobe),
            })?;

        let dims = String::from_utf8_lossy(&output.stdout);
        let (width, height) = dims
            .lines()
            .next()
            .and_then(|line| line.trim().split_once('x'))
            .and_then(|(w, h)| Some((w.parse().ok()?, h.parse().ok()?)))
            .map(|(w, h)| (Some(w), Some(h)))
            .unwrap_or((None, None));

        Ok(MediaInfo {
            duration,
            width,
            height,
        })
    }
}

impl Default for MediaProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let probe = MediaProbe::new();
        let err = probe.duration(Path::new("/nonexistent/input.mp4")).await;
        assert!(matches!(err, Err(ReelcutError::InputFileNotFound { .. })));
    }
}
