//! Timeline track and item model
//!
//! Tracks are independent lanes of non-overlapping items. Overlap is only
//! tolerated mid-drag; the interaction engine validates placements before
//! they are committed back into a track.

use serde::{Deserialize, Serialize};

use crate::ranges::TimeRange;
use crate::transcript::PauseKind;

/// Default preview frame rate used for frame/time conversion.
pub const DEFAULT_FRAME_RATE: f64 = 30.0;

/// What a timeline item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Video,
    Script,
    Pause,
    Text,
    Sticker,
}

impl ItemKind {
    /// Script and pause items are selectable and deletable but never dragged
    /// or resized.
    pub fn rejects_drag(&self) -> bool {
        matches!(self, ItemKind::Script | ItemKind::Pause)
    }
}

/// Kind-specific data carried by a timeline item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemPayload {
    /// No extra data (text/sticker overlays).
    Plain,
    /// A collapsed video segment pointing back at its source footage.
    Source {
        original_start: f64,
        original_end: f64,
        clip_index: usize,
    },
    /// A transcript word.
    Word {
        word_id: String,
        clip_index: usize,
        deleted: bool,
    },
    /// A synthesized pause between words or at a clip boundary.
    Pause {
        pause_kind: PauseKind,
        clip_index: usize,
        /// Every id format under which this pause may appear in a persisted
        /// deletion set.
        accepted_ids: Vec<String>,
        deleted: bool,
    },
}

/// One item on a timeline track, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    pub track_id: String,
    pub start: f64,
    pub end: f64,
    pub kind: ItemKind,
    pub label: String,
    pub payload: ItemPayload,
}

impl TimelineItem {
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    /// Deleted flag for script/pause items; overlays are never "deleted".
    pub fn is_deleted(&self) -> bool {
        match &self.payload {
            ItemPayload::Word { deleted, .. } => *deleted,
            ItemPayload::Pause { deleted, .. } => *deleted,
            _ => false,
        }
    }
}

/// An independent lane of timeline items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineTrack {
    pub id: String,
    pub name: String,
    pub items: Vec<TimelineItem>,
}

impl TimelineTrack {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Timeline position where the track's content ends.
    pub fn end_time(&self) -> f64 {
        self.items.iter().map(|i| i.end).fold(0.0, f64::max)
    }

    pub fn item(&self, id: &str) -> Option<&TimelineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: &str) -> Option<&mut TimelineItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    /// True when `candidate` overlaps any item other than `exclude_id`.
    pub fn has_overlap(&self, candidate: &TimeRange, exclude_id: &str) -> bool {
        self.items
            .iter()
            .filter(|i| i.id != exclude_id)
            .any(|i| i.range().overlaps(candidate))
    }

    /// Open intervals of at least `min_len` seconds between items, up to
    /// `span`. Items are considered in time order regardless of storage
    /// order.
    pub fn find_gaps(&self, span: f64, min_len: f64) -> Vec<TimeRange> {
        let mut sorted: Vec<&TimelineItem> = self.items.iter().collect();
        sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut gaps = Vec::new();
        let mut cursor = 0.0;
        for item in sorted {
            if item.start - cursor >= min_len {
                gaps.push(TimeRange::new(cursor, item.start));
            }
            cursor = cursor.max(item.end);
        }
        if span - cursor >= min_len {
            gaps.push(TimeRange::new(cursor, span));
        }
        gaps
    }

    /// Remove items by id, returning how many were dropped.
    pub fn remove_items(&mut self, ids: &[&str]) -> usize {
        let before = self.items.len();
        self.items.retain(|i| !ids.contains(&i.id.as_str()));
        before - self.items.len()
    }
}

/// Snap a time to the editing grid.
pub fn snap_to_grid(t: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return t;
    }
    (t / step).round() * step
}

/// Convert a time in seconds to a frame number.
pub fn time_to_frame(t: f64, frame_rate: f64) -> u64 {
    (t.max(0.0) * frame_rate).round() as u64
}

/// Convert a frame number to time in seconds.
pub fn frame_to_time(frame: u64, frame_rate: f64) -> f64 {
    frame as f64 / frame_rate
}
