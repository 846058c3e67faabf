//! Ports to external collaborators
//!
//! The engine consumes transcripts from a provider it does not own. Network
//! retries, auth, and upload plumbing all live behind this seam; the core
//! only sees word lists and silence segments per clip.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{ReelcutError, ReelcutResult};
use crate::transcript::{Clip, LocalWord, SilenceSegment};

/// What the transcript provider returns for one clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptPayload {
    pub transcript: String,
    pub words: Vec<LocalWord>,
    pub silence_segments: Vec<SilenceSegment>,
}

/// Per-clip transcription service.
#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Transcribe one clip. Retrying is the caller's concern, not the
    /// engine's.
    async fn transcribe(&self, clip: &Clip, clip_index: usize) -> ReelcutResult<TranscriptPayload>;
}

/// Transcribe clips one at a time so progress attributes to a specific clip.
///
/// A failing clip is reported and skipped; the remaining clips still run.
/// Returns the per-clip failures.
pub async fn transcribe_clips(
    provider: &dyn TranscriptProvider,
    clips: &mut [Clip],
) -> Vec<ReelcutError> {
    let mut failures = Vec::new();
    for (clip_index, clip) in clips.iter_mut().enumerate() {
        if clip.has_transcript() {
            continue;
        }
        let result = provider.transcribe(clip, clip_index).await;
        match result {
            Ok(payload) => {
                info!(
                    clip_index,
                    words = payload.words.len(),
                    silences = payload.silence_segments.len(),
                    "Clip transcribed"
                );
                clip.attach_transcript(payload.words, payload.silence_segments);
            }
            Err(e) => {
                warn!(clip_index, error = %e, "Transcription failed; clip skipped");
                failures.push(e);
            }
        }
    }
    failures
}
