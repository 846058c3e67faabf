//! Lossless segment extraction and concatenation
//!
//! Realizes the keep-ranges as an actual media file: every segment is
//! extracted with a stream copy (no re-encode) and zeroed timestamps, then
//! the segments are joined with the concat demuxer, again without
//! re-encoding. One scratch directory exists per invocation and is removed
//! when it drops, whether the export succeeded or not. Any single failure is
//! fatal for the whole export; no partial output is ever returned.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{ReelcutError, ReelcutResult};
use crate::probe::MediaProbe;
use crate::ranges::TimeRange;

mod export;

pub use export::{plan_export, ClipCut};

/// Progress events in the shape the polled export endpoint exposes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportEvent {
    Progress(f32),
    Done(PathBuf),
    Error(String),
}

/// Callback receiving [`ExportEvent`]s during an export.
pub type ProgressFn = dyn Fn(ExportEvent) + Send + Sync;

/// Result summary of a completed export.
#[derive(Debug, Clone, PartialEq)]
pub struct CutReport {
    pub output: PathBuf,
    pub segments: usize,
    pub expected_duration: f64,
    pub actual_duration: Option<f64>,
}

/// ffmpeg-backed stream-copy cutter.
pub struct SegmentCutter {
    ffmpeg: String,
    probe: MediaProbe,
    duration_tolerance: f64,
}

impl SegmentCutter {
    pub fn new() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            probe: MediaProbe::new(),
            duration_tolerance: 0.2,
        }
    }

    /// Use a specific ffmpeg binary instead of the one on PATH.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.ffmpeg = binary.into();
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.duration_tolerance = tolerance;
        self
    }

    /// Cut a single input file down to its keep-ranges.
    pub async fn cut(
        &self,
        input: &Path,
        keep_ranges: &[TimeRange],
        output: &Path,
        progress: Option<&ProgressFn>,
    ) -> ReelcutResult<CutReport> {
        let cuts: Vec<ClipCut> = keep_ranges
            .iter()
            .map(|range| ClipCut {
                clip_index: 0,
                path: input.to_path_buf(),
                range: *range,
            })
            .collect();
        self.export(&cuts, output, progress).await
    }

    /// Extract every planned cut in order and concatenate into `output`.
    pub async fn export(
        &self,
        cuts: &[ClipCut],
        output: &Path,
        progress: Option<&ProgressFn>,
    ) -> ReelcutResult<CutReport> {
        let result = self.export_inner(cuts, output, progress).await;
        match &result {
            Ok(report) => emit(progress, ExportEvent::Done(report.output.clone())),
            Err(e) => emit(progress, ExportEvent::Error(e.to_string())),
        }
        result
    }

    async fn export_inner(
        &self,
        cuts: &[ClipCut],
        output: &Path,
        progress: Option<&ProgressFn>,
    ) -> ReelcutResult<CutReport> {
        if cuts.is_empty() {
            return Err(ReelcutError::CutError {
                message: "nothing to export: no keep-ranges".to_string(),
            });
        }
        for cut in cuts {
            if !cut.path.exists() {
                return Err(ReelcutError::InputFileNotFound {
                    path: cut.path.display().to_string(),
                });
            }
        }

        let expected_duration: f64 = cuts.iter().map(ClipCut::duration).sum();
        info!(
            segments = cuts.len(),
            expected_duration, output = %output.display(),
            "Starting export"
        );
        emit(progress, ExportEvent::Progress(0.0));

        // Scratch space lives exactly as long as this call; dropping the
        // TempDir removes partial artifacts on success and failure alike.
        let scratch = TempDir::new()?;

        if let [only] = cuts {
            // A single segment is the output.
            self.extract_segment(only, output).await?;
        } else {
            let extension = output
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("mp4")
                .to_string();
            let mut segment_paths = Vec::with_capacity(cuts.len());
            for (index, cut) in cuts.iter().enumerate() {
                let segment_path = scratch.path().join(format!("segment_{index:03}.{extension}"));
                self.extract_segment(cut, &segment_path).await?;
                segment_paths.push(segment_path);
                let fraction = (index + 1) as f32 / cuts.len() as f32;
                emit(progress, ExportEvent::Progress(fraction * 0.9));
            }
            self.concat_segments(&segment_paths, scratch.path(), output)
                .await?;
        }

        let actual_duration = self.verify_duration(output, expected_duration).await?;

        info!(output = %output.display(), "Export finished");
        Ok(CutReport {
            output: output.to_path_buf(),
            segments: cuts.len(),
            expected_duration,
            actual_duration,
        })
    }

    /// Stream-copy one segment with precise seek and zeroed timestamps.
    async fn extract_segment(&self, cut: &ClipCut, out: &Path) -> ReelcutResult<()> {
        let args = [
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-ss".to_string(),
            format!("{:.6}", cut.range.start),
            "-i".to_string(),
            cut.path.display().to_string(),
            "-t".to_string(),
            format!("{:.6}", cut.range.duration()),
            "-c".to_string(),
            "copy".to_string(),
            "-avoid_negative_ts".to_string(),
            "make_zero".to_string(),
            "-y".to_string(),
            out.display().to_string(),
        ];
        self.run_ffmpeg(&args, "segment extraction").await
    }

    /// Join extracted segments with the concat demuxer, no re-encode.
    async fn concat_segments(
        &self,
        segments: &[PathBuf],
        scratch: &Path,
        output: &Path,
    ) -> ReelcutResult<()> {
        let list_path = scratch.join("concat.txt");
        let mut list = String::new();
        for segment in segments {
            let escaped = segment.display().to_string().replace('\'', "'\\''");
            list.push_str(&format!("file '{escaped}'\n"));
        }
        tokio::fs::write(&list_path, list).await?;

        let args = [
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            list_path.display().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            "-y".to_string(),
            output.display().to_string(),
        ];
        self.run_ffmpeg(&args, "concat").await
    }

    async fn run_ffmpeg(&self, args: &[String], operation: &str) -> ReelcutResult<()> {
        debug!(?args, "Running ffmpeg");
        let output = Command::new(&self.ffmpeg)
            .args(args)
            .output()
            .await
            .map_err(|e| ReelcutError::CutError {
                message: format!("failed to start {}: {e}", self.ffmpeg),
            })?;

        if !output.status.success() {
            return Err(ReelcutError::CutError {
                message: format!(
                    "{operation} failed (status {}): {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }
        Ok(())
    }

    /// Probe the output and compare against the expected duration.
    async fn verify_duration(
        &self,
        output: &Path,
        expected: f64,
    ) -> ReelcutResult<Option<f64>> {
        let actual = self.probe.duration(output).await?;
        let difference = (actual - expected).abs();
        if difference > self.duration_tolerance {
            return Err(ReelcutError::VerificationError {
                message: format!(
                    "output duration {actual:.3}s deviates from expected {expected:.3}s by {difference:.3}s"
                ),
            });
        }
        Ok(Some(actual))
    }
}

impl Default for SegmentCutter {
    fn default() -> Self {
        Self::new()
    }
}

fn emit(progress: Option<&ProgressFn>, event: ExportEvent) {
    if let Some(callback) = progress {
        callback(event);
    }
}
