//! Error handling module for Reelcut

use thiserror::Error;

/// Main error type for Reelcut operations
#[derive(Error, Debug)]
pub enum ReelcutError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Invalid time format
    #[error("Invalid time format: {time}. Expected HH:MM:SS.ms, MM:SS.ms, or seconds")]
    InvalidTimeFormat { time: String },

    /// Time range validation error
    #[error("Invalid time range: start ({start}) must be less than end ({end})")]
    InvalidTimeRange { start: f64, end: f64 },

    /// Track index out of range or unknown track id
    #[error("Unknown track: {track}")]
    UnknownTrack { track: String },

    /// Timeline item lookup failure
    #[error("Unknown timeline item: {id}")]
    UnknownItem { id: String },

    /// Drag gesture rejected (read-only item or stale session)
    #[error("Drag rejected: {message}")]
    DragRejected { message: String },

    /// Media probe error
    #[error("Failed to probe media file: {message}")]
    ProbeError { message: String },

    /// Transcription error for a single clip
    #[error("Transcription failed for clip {clip_index}: {message}")]
    TranscriptionError { clip_index: usize, message: String },

    /// Segment extraction or concat error
    #[error("Cutting operation failed: {message}")]
    CutError { message: String },

    /// Export produced no output or an output outside tolerance
    #[error("Export verification failed: {message}")]
    VerificationError { message: String },

    /// Project file error
    #[error("Project file error: {message}")]
    ProjectError { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for Reelcut operations
pub type ReelcutResult<T> = std::result::Result<T, ReelcutError>;
