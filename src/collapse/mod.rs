//! Collapsed (preview) timeline generation
//!
//! Projects the deletion sets onto a gapless timeline: every deleted word,
//! pause, and silence range is merged, inverted into keep-ranges, and the
//! video and script tracks are rebuilt at their collapsed positions. This is
//! a pure projection of the deletion sets and never writes back into them.
//! The export planner consumes the same merged ranges, so the preview and
//! the exported file agree by construction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ranges::{adjusted_time, invert_ranges, merge_ranges, TimeRange};
use crate::script::{generate_script_track, SCRIPT_TRACK_ID};
use crate::timeline::{ItemKind, ItemPayload, TimelineItem, TimelineTrack};
use crate::transcript::{
    clip_index_at, clip_offsets, flatten_words, ids, total_duration, Clip, DeletionSets,
};

/// Track id of the collapsed video track.
pub const VIDEO_TRACK_ID: &str = "video";

/// The gapless reconstruction of the timeline after all deletions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollapsedTimeline {
    pub video_track: TimelineTrack,
    pub script_track: TimelineTrack,
    pub total_duration: f64,
    pub deleted_ranges: Vec<TimeRange>,
}

/// Compute the merged set of deleted ranges in original global time.
///
/// Three classes resolve membership independently: deleted words, deleted
/// silence-detector segments (`silence-{clip}-{segment}` ids in the pause
/// set), and deleted synthesized pauses under any accepted id generation.
/// Legacy raw segment ranges join directly. Stale ids simply match nothing.
pub fn deleted_ranges(
    clips: &[Clip],
    deletions: &DeletionSets,
    pause_threshold: f64,
) -> Vec<TimeRange> {
    let mut ranges: Vec<TimeRange> = Vec::new();

    // Deleted words and pauses fall out of the script track, which already
    // resolves every accepted id format.
    let script = generate_script_track(clips, deletions, pause_threshold);
    ranges.extend(
        script
            .items
            .iter()
            .filter(|item| item.is_deleted())
            .map(TimelineItem::range),
    );

    let offsets = clip_offsets(clips);
    for (clip_index, clip) in clips.iter().enumerate() {
        let Some(segments) = &clip.silence_segments else {
            continue;
        };
        let offset = offsets[clip_index];
        for segment in segments {
            if deletions.is_pause_deleted(&[ids::silence_id(clip_index, &segment.id)]) {
                ranges.push(TimeRange::new(offset + segment.start, offset + segment.end));
            }
        }
    }

    ranges.extend(deletions.segments.iter().copied());

    merge_ranges(&ranges)
}

/// Build the collapsed preview timeline.
pub fn collapse_timeline(
    clips: &[Clip],
    deletions: &DeletionSets,
    pause_threshold: f64,
) -> CollapsedTimeline {
    let original_total = total_duration(clips);
    let deleted = deleted_ranges(clips, deletions, pause_threshold);
    let keep = invert_ranges(&deleted, original_total);

    let mut video_track = TimelineTrack::new(VIDEO_TRACK_ID, "Video");
    let mut position = 0.0;
    for (index, range) in keep.iter().enumerate() {
        let clip_index = clip_index_at(clips, range.start).unwrap_or(0);
        let duration = range.duration();
        video_track.items.push(TimelineItem {
            id: format!("video-{index}"),
            track_id: VIDEO_TRACK_ID.into(),
            start: position,
            end: position + duration,
            kind: ItemKind::Video,
            label: clips
                .get(clip_index)
                .and_then(|c| c.path.file_stem())
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("Clip {clip_index}")),
            payload: ItemPayload::Source {
                original_start: range.start,
                original_end: range.end,
                clip_index,
            },
        });
        position += duration;
    }

    let mut script_track = TimelineTrack::new(SCRIPT_TRACK_ID, "Script");
    for word in flatten_words(clips) {
        if deletions.is_word_deleted(&word.id) {
            continue;
        }
        let start = adjusted_time(word.start, &deleted);
        let end = adjusted_time(word.end, &deleted);
        script_track.items.push(TimelineItem {
            id: word.id.clone(),
            track_id: SCRIPT_TRACK_ID.into(),
            start,
            end,
            kind: ItemKind::Script,
            label: word.text.clone(),
            payload: ItemPayload::Word {
                word_id: word.id,
                clip_index: word.clip_index,
                deleted: false,
            },
        });
    }

    debug!(
        keep_ranges = keep.len(),
        collapsed_duration = position,
        original_duration = original_total,
        "Collapsed timeline"
    );

    CollapsedTimeline {
        video_track,
        script_track,
        total_duration: position,
        deleted_ranges: deleted,
    }
}

#[cfg(test)]
mod tests;
