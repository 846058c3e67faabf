//! Script-track generation
//!
//! Turns the per-clip transcript into a single editable track of word items
//! interleaved with synthesized pause items. Pauses are not persisted; they
//! exist only as derived items whose deletion ids address the gap. The
//! generator is a pure function of its inputs, which is what keeps the
//! preview and the export in agreement.

use tracing::debug;

use crate::timeline::{ItemKind, ItemPayload, TimelineItem, TimelineTrack};
use crate::transcript::{clip_offsets, ids, Clip, DeletionSets, PauseKind};

/// Track id of the generated script track.
pub const SCRIPT_TRACK_ID: &str = "script";

/// Generate the script track for a clip sequence.
///
/// Items appear in original-timestamp order: an optional leading pause per
/// clip, each word (flagged deleted by membership in the word set), an
/// inter-word pause for every gap at or above `pause_threshold`, and an
/// optional trailing pause per clip. Clips without transcript data are
/// skipped. Boundary pauses are tagged distinctly from inter-word pauses so
/// delete/restore can target them independently.
pub fn generate_script_track(
    clips: &[Clip],
    deletions: &DeletionSets,
    pause_threshold: f64,
) -> TimelineTrack {
    let mut track = TimelineTrack::new(SCRIPT_TRACK_ID, "Script");
    let offsets = clip_offsets(clips);

    for (clip_index, clip) in clips.iter().enumerate() {
        let Some(words) = clip.words.as_ref().filter(|w| !w.is_empty()) else {
            continue;
        };
        let offset = offsets[clip_index];
        let clip_end = offset + clip.duration;

        let first_start = offset + words[0].start;
        if first_start - offset >= pause_threshold {
            track.items.push(pause_item(
                PauseKind::Leading,
                clip_index,
                offset,
                first_start,
                ids::leading_pause_ids(clip_index),
                deletions,
            ));
        }

        for (i, word) in words.iter().enumerate() {
            let start = offset + word.start;
            let end = offset + word.end;
            track.items.push(TimelineItem {
                id: word.id.clone(),
                track_id: SCRIPT_TRACK_ID.into(),
                start,
                end,
                kind: ItemKind::Script,
                label: word.text.clone(),
                payload: ItemPayload::Word {
                    word_id: word.id.clone(),
                    clip_index,
                    deleted: deletions.is_word_deleted(&word.id),
                },
            });

            if let Some(next) = words.get(i + 1) {
                let gap_start = end;
                let gap_end = offset + next.start;
                if gap_end - gap_start >= pause_threshold {
                    track.items.push(pause_item(
                        PauseKind::Between,
                        clip_index,
                        gap_start,
                        gap_end,
                        ids::between_pause_ids(clip_index, &word.id, &next.id),
                        deletions,
                    ));
                }
            }
        }

        let last_end = offset + words[words.len() - 1].end;
        if clip_end - last_end >= pause_threshold {
            track.items.push(pause_item(
                PauseKind::Trailing,
                clip_index,
                last_end,
                clip_end,
                ids::trailing_pause_ids(&words[words.len() - 1].id),
                deletions,
            ));
        }
    }

    debug!(
        items = track.items.len(),
        threshold = pause_threshold,
        "Generated script track"
    );
    track
}

fn pause_item(
    pause_kind: PauseKind,
    clip_index: usize,
    start: f64,
    end: f64,
    accepted_ids: Vec<String>,
    deletions: &DeletionSets,
) -> TimelineItem {
    let deleted = deletions.is_pause_deleted(&accepted_ids);
    TimelineItem {
        id: accepted_ids[0].clone(),
        track_id: SCRIPT_TRACK_ID.into(),
        start,
        end,
        kind: ItemKind::Pause,
        label: format!("{:.1}s", end - start),
        payload: ItemPayload::Pause {
            pause_kind,
            clip_index,
            accepted_ids,
            deleted,
        },
    }
}
