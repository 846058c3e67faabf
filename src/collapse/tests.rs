// Unit tests for the collapsed-track generator

use super::*;
use crate::ranges::total_duration as ranges_total;
use crate::transcript::{LocalWord, SilenceSegment};

fn word(id: &str, start: f64, end: f64) -> LocalWord {
    LocalWord {
        id: id.into(),
        text: id.into(),
        start,
        end,
    }
}

fn two_clip_project() -> Vec<Clip> {
    let mut a = Clip::new("intro.mp4", 10.0);
    a.words = Some(vec![word("w1", 0.0, 1.0), word("w2", 3.0, 4.0)]);
    let b = Clip::new("outro.mp4", 8.0);
    vec![a, b]
}

#[test]
fn test_no_deletions_keeps_everything() {
    let clips = two_clip_project();
    let collapsed = collapse_timeline(&clips, &DeletionSets::default(), 0.3);

    assert!(collapsed.deleted_ranges.is_empty());
    assert_eq!(collapsed.total_duration, 18.0);
    assert_eq!(collapsed.video_track.items.len(), 1);
    assert_eq!(collapsed.script_track.items.len(), 2);
}

#[test]
fn test_deleting_the_pause_between_words() {
    // Two clips of 10s and 8s; deleting the 2s gap between w1 and w2 via the
    // current-generation id leaves 16s, and w2 lands right after w1.
    let clips = two_clip_project();
    let mut deletions = DeletionSets::default();
    deletions.pauses.insert("pause-after-w1".into());

    let collapsed = collapse_timeline(&clips, &deletions, 0.3);

    assert_eq!(collapsed.deleted_ranges, vec![TimeRange::new(1.0, 3.0)]);
    assert!((collapsed.total_duration - 16.0).abs() < 1e-9);

    let w2 = collapsed.script_track.item("w2").unwrap();
    assert!((w2.start - 1.0).abs() < 1e-9);
    assert!((w2.end - 2.0).abs() < 1e-9);
}

#[test]
fn test_legacy_pause_id_resolves_identically() {
    let clips = two_clip_project();
    let mut deletions = DeletionSets::default();
    deletions.pauses.insert("pause-clip-0-w1-w2".into());

    let collapsed = collapse_timeline(&clips, &deletions, 0.3);
    assert_eq!(collapsed.deleted_ranges, vec![TimeRange::new(1.0, 3.0)]);
}

#[test]
fn test_deleting_a_word() {
    let clips = two_clip_project();
    let mut deletions = DeletionSets::default();
    deletions.words.insert("w1".into());

    let collapsed = collapse_timeline(&clips, &deletions, 0.3);
    assert_eq!(collapsed.deleted_ranges, vec![TimeRange::new(0.0, 1.0)]);
    assert!((collapsed.total_duration - 17.0).abs() < 1e-9);
    assert!(collapsed.script_track.item("w1").is_none());
    // w2 shifts left by the deleted second.
    assert!((collapsed.script_track.item("w2").unwrap().start - 2.0).abs() < 1e-9);
}

#[test]
fn test_deleted_silence_segment_resolves_through_the_pause_set() {
    let mut clips = two_clip_project();
    clips[1].silence_segments = Some(vec![SilenceSegment {
        id: "s0".into(),
        start: 2.0,
        end: 5.0,
        duration: 3.0,
    }]);
    let mut deletions = DeletionSets::default();
    deletions.pauses.insert("silence-1-s0".into());

    let collapsed = collapse_timeline(&clips, &deletions, 0.3);
    // Clip 1 starts at 10.0, so the segment lands at [12, 15).
    assert_eq!(collapsed.deleted_ranges, vec![TimeRange::new(12.0, 15.0)]);
    assert!((collapsed.total_duration - 15.0).abs() < 1e-9);
}

#[test]
fn test_overlapping_deletions_do_not_double_subtract() {
    let mut clips = two_clip_project();
    clips[0].silence_segments = Some(vec![SilenceSegment {
        id: "s0".into(),
        start: 0.5,
        end: 3.5,
        duration: 3.0,
    }]);
    let mut deletions = DeletionSets::default();
    deletions.words.insert("w1".into()); // [0, 1)
    deletions.pauses.insert("pause-after-w1".into()); // [1, 3)
    deletions.pauses.insert("silence-0-s0".into()); // [0.5, 3.5)

    let collapsed = collapse_timeline(&clips, &deletions, 0.3);
    assert_eq!(collapsed.deleted_ranges, vec![TimeRange::new(0.0, 3.5)]);
    assert!((collapsed.total_duration - 14.5).abs() < 1e-9);
}

#[test]
fn test_stale_ids_are_no_ops() {
    let clips = two_clip_project();
    let mut deletions = DeletionSets::default();
    deletions.words.insert("w99".into());
    deletions.pauses.insert("pause-after-w99".into());
    deletions.pauses.insert("silence-7-s9".into());

    let collapsed = collapse_timeline(&clips, &deletions, 0.3);
    assert!(collapsed.deleted_ranges.is_empty());
    assert_eq!(collapsed.total_duration, 18.0);
}

#[test]
fn test_legacy_raw_segments_join_the_deleted_set() {
    let clips = two_clip_project();
    let deletions = DeletionSets {
        segments: vec![TimeRange::new(14.0, 16.0)],
        ..DeletionSets::default()
    };

    let collapsed = collapse_timeline(&clips, &deletions, 0.3);
    assert_eq!(collapsed.deleted_ranges, vec![TimeRange::new(14.0, 16.0)]);
    assert!((collapsed.total_duration - 16.0).abs() < 1e-9);
}

#[test]
fn test_video_items_record_source_positions() {
    let clips = two_clip_project();
    let mut deletions = DeletionSets::default();
    deletions.pauses.insert("pause-after-w1".into());

    let collapsed = collapse_timeline(&clips, &deletions, 0.3);
    let items = &collapsed.video_track.items;
    assert_eq!(items.len(), 2);

    // Collapsed positions are gapless and cumulative.
    assert_eq!(items[0].start, 0.0);
    assert!((items[0].end - items[1].start).abs() < 1e-9);

    match &items[1].payload {
        ItemPayload::Source {
            original_start,
            original_end,
            clip_index,
        } => {
            assert!((original_start - 3.0).abs() < 1e-9);
            assert!((original_end - 18.0).abs() < 1e-9);
            assert_eq!(*clip_index, 0);
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn test_collapsed_total_matches_original_minus_deleted() {
    let clips = two_clip_project();
    let mut deletions = DeletionSets::default();
    deletions.words.insert("w2".into());
    deletions.pauses.insert("pause-before-clip-0-first-word".into()); // stale: no leading gap
    deletions.pauses.insert("pause-after-w2".into()); // trailing gap [4, 10)

    let collapsed = collapse_timeline(&clips, &deletions, 0.3);
    let deleted_total = ranges_total(&collapsed.deleted_ranges);
    assert!((collapsed.total_duration - (18.0 - deleted_total)).abs() < 1e-9);
}
