//! Reelcut timeline editing engine
//!
//! A non-destructive editor core for transcript-driven video cutting: words
//! and silences are deleted by id, the deletions reconcile into merged time
//! ranges, and both the gapless preview timeline and the lossless ffmpeg
//! export are pure projections of the same range set.

pub mod cli;
pub mod collapse;
pub mod config;
pub mod cutter;
pub mod error;
pub mod interact;
pub mod ports;
pub mod probe;
pub mod project;
pub mod ranges;
pub mod script;
pub mod session;
pub mod timeline;
pub mod transcript;
pub mod utils;
pub mod viewport;

// Re-export commonly used types
pub use collapse::{collapse_timeline, CollapsedTimeline};
pub use config::EditorConfig;
pub use error::{ReelcutError, ReelcutResult};
pub use ranges::{adjusted_time, invert_ranges, merge_ranges, TimeRange};
pub use session::EditorSession;
pub use transcript::{Clip, DeletionSets, Word};
