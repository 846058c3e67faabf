//! Transcript data model: clips, words, silences, and deletion sets
//!
//! Words and silence segments come from the transcript provider and are never
//! mutated afterwards; editing only toggles membership in the deletion sets.
//! The sets are the single source of truth for "what is cut": every derived
//! view (script track, collapsed preview, export plan) is a pure function of
//! them plus the clip data.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ranges::TimeRange;

pub mod ids;


/// Where a synthesized pause sits relative to its clip's words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseKind {
    /// Between the clip start and its first word.
    Leading,
    /// Between two adjacent words.
    Between,
    /// Between the clip's last word and the clip end.
    Trailing,
}

/// A transcript word in clip-local time, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalWord {
    pub id: String,
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// A transcript word projected onto the original global timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: String,
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub clip_index: usize,
}

impl Word {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }
}

/// A detected stretch of silence, in clip-local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SilenceSegment {
    pub id: String,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

/// One uploaded media file contributing a contiguous span of global time.
///
/// Immutable once transcribed, except for the transcript append itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub path: PathBuf,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<LocalWord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silence_segments: Option<Vec<SilenceSegment>>,
}

impl Clip {
    pub fn new(path: impl Into<PathBuf>, duration: f64) -> Self {
        Self {
            path: path.into(),
            duration,
            words: None,
            silence_segments: None,
        }
    }

    pub fn has_transcript(&self) -> bool {
        self.words.as_ref().is_some_and(|w| !w.is_empty())
    }

    /// Attach transcript data once; later calls are ignored.
    pub fn attach_transcript(
        &mut self,
        words: Vec<LocalWord>,
        silence_segments: Vec<SilenceSegment>,
    ) {
        if self.words.is_none() {
            self.words = Some(words);
        }
        if self.silence_segments.is_none() {
            self.silence_segments = Some(silence_segments);
        }
    }
}

/// Global start time of each clip: the running sum of preceding durations.
pub fn clip_offsets(clips: &[Clip]) -> Vec<f64> {
    let mut offsets = Vec::with_capacity(clips.len());
    let mut acc = 0.0;
    for clip in clips {
        offsets.push(acc);
        acc += clip.duration;
    }
    offsets
}

/// Total original duration of the clip sequence.
pub fn total_duration(clips: &[Clip]) -> f64 {
    clips.iter().map(|c| c.duration).sum()
}

/// Index of the clip whose span contains `t`, if any.
pub fn clip_index_at(clips: &[Clip], t: f64) -> Option<usize> {
    let offsets = clip_offsets(clips);
    for (index, clip) in clips.iter().enumerate() {
        let start = offsets[index];
        if t >= start && t < start + clip.duration {
            return Some(index);
        }
    }
    // The exact end of the last clip still belongs to it.
    if let Some(last) = clips.len().checked_sub(1) {
        if (t - (offsets[last] + clips[last].duration)).abs() < 1e-9 {
            return Some(last);
        }
    }
    None
}

/// Flatten per-clip local words into global-time words, clip order first,
/// word order within each clip preserved.
pub fn flatten_words(clips: &[Clip]) -> Vec<Word> {
    let offsets = clip_offsets(clips);
    let mut flat = Vec::new();
    for (clip_index, clip) in clips.iter().enumerate() {
        let Some(words) = &clip.words else {
            continue;
        };
        let offset = offsets[clip_index];
        for word in words {
            flat.push(Word {
                id: word.id.clone(),
                text: word.text.clone(),
                start: offset + word.start,
                end: offset + word.end,
                clip_index,
            });
        }
    }
    flat
}

/// The persisted record of everything the user has cut.
///
/// Sets serialize as plain arrays. `segments` is the legacy raw-range
/// representation carried by older project files; it merges directly into
/// the deleted-range set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletionSets {
    #[serde(default)]
    pub words: HashSet<String>,
    #[serde(default)]
    pub pauses: HashSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub segments: Vec<TimeRange>,
}

impl DeletionSets {
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.pauses.is_empty() && self.segments.is_empty()
    }

    pub fn is_word_deleted(&self, word_id: &str) -> bool {
        self.words.contains(word_id)
    }

    /// A pause or silence is deleted when any of its accepted ids is in the
    /// pause set.
    pub fn is_pause_deleted<S: AsRef<str>>(&self, accepted_ids: &[S]) -> bool {
        accepted_ids.iter().any(|id| self.pauses.contains(id.as_ref()))
    }

    pub fn apply(&mut self, reason: &DeletionRef) {
        match reason {
            DeletionRef::Word { word_id } => {
                self.words.insert(word_id.clone());
            }
            DeletionRef::Pause { primary_id, .. } => {
                self.pauses.insert(primary_id.clone());
            }
            DeletionRef::Silence {
                clip_index,
                segment_id,
            } => {
                self.pauses.insert(ids::silence_id(*clip_index, segment_id));
            }
        }
    }

    /// Undo a deletion. Removes every accepted id so a restore works no
    /// matter which generation of project file recorded the cut.
    pub fn restore(&mut self, reason: &DeletionRef) {
        match reason {
            DeletionRef::Word { word_id } => {
                self.words.remove(word_id);
            }
            DeletionRef::Pause { accepted_ids, .. } => {
                for id in accepted_ids {
                    self.pauses.remove(id);
                }
            }
            DeletionRef::Silence {
                clip_index,
                segment_id,
            } => {
                self.pauses.remove(&ids::silence_id(*clip_index, segment_id));
            }
        }
    }
}

/// Why a stretch of footage is deleted.
///
/// The internal shape behind the string-id schemes; the string formats stay
/// accepted at every boundary for persisted-project compatibility.
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionRef {
    Word {
        word_id: String,
    },
    Pause {
        primary_id: String,
        accepted_ids: Vec<String>,
    },
    Silence {
        clip_index: usize,
        segment_id: String,
    },
}
