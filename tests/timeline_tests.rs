//! Integration tests for the editing engine's end-to-end properties

use reelcut::collapse::collapse_timeline;
use reelcut::config::EditorConfig;
use reelcut::interact::{
    DragContext, DragSession, GestureKind, InteractionConfig, PointerInput, PointerPhase,
};
use reelcut::ranges::{adjusted_time, invert_ranges, merge_ranges, total_duration, TimeRange};
use reelcut::session::EditorSession;
use reelcut::timeline::{ItemKind, ItemPayload, TimelineItem, TimelineTrack};
use reelcut::transcript::{Clip, DeletionSets, LocalWord};
use reelcut::viewport::Viewport;

fn word(id: &str, start: f64, end: f64) -> LocalWord {
    LocalWord {
        id: id.into(),
        text: id.into(),
        start,
        end,
    }
}

/// Two clips of 10s and 8s; words w1 [0,1] and w2 [3,4] in clip 0.
fn spec_scenario_clips() -> Vec<Clip> {
    let mut a = Clip::new("intro.mp4", 10.0);
    a.words = Some(vec![word("w1", 0.0, 1.0), word("w2", 3.0, 4.0)]);
    let b = Clip::new("outro.mp4", 8.0);
    vec![a, b]
}

// Range algebra properties over a spread of inputs

#[test]
fn merge_is_idempotent_over_varied_inputs() {
    let cases: Vec<Vec<TimeRange>> = vec![
        vec![],
        vec![TimeRange::new(0.0, 0.0)],
        vec![TimeRange::new(3.0, 4.0), TimeRange::new(1.0, 2.0)],
        vec![
            TimeRange::new(0.0, 5.0),
            TimeRange::new(2.0, 3.0),
            TimeRange::new(5.0, 6.0),
            TimeRange::new(8.0, 8.5),
        ],
    ];
    for input in cases {
        let once = merge_ranges(&input);
        assert_eq!(merge_ranges(&once), once, "input: {input:?}");
    }
}

#[test]
fn invert_merge_duality_partitions_the_span() {
    let cases: Vec<(Vec<TimeRange>, f64)> = vec![
        (vec![], 10.0),
        (vec![TimeRange::new(0.0, 10.0)], 10.0),
        (
            vec![TimeRange::new(1.0, 2.0), TimeRange::new(1.5, 4.0)],
            12.0,
        ),
        (
            vec![
                TimeRange::new(0.0, 1.0),
                TimeRange::new(5.0, 5.0),
                TimeRange::new(9.0, 11.0),
            ],
            10.0,
        ),
    ];
    for (input, total) in cases {
        let merged = merge_ranges(&input);
        let keep = invert_ranges(&merged, total);

        for pair in keep.windows(2) {
            assert!(pair[0].end <= pair[1].start, "keep not disjoint/sorted");
        }
        let sum = total_duration(&keep) + total_duration(&merged);
        assert!((sum - total).abs() < 1e-9, "partition broken for {input:?}");
    }
}

#[test]
fn adjusted_time_is_strictly_increasing_outside_deletions() {
    let deleted = merge_ranges(&[TimeRange::new(2.0, 4.0), TimeRange::new(7.0, 8.0)]);
    let keep = invert_ranges(&deleted, 10.0);

    let mut samples: Vec<f64> = Vec::new();
    for range in &keep {
        let mut t = range.start;
        while t < range.end {
            samples.push(t);
            t += 0.25;
        }
    }
    for pair in samples.windows(2) {
        if pair[1] > pair[0] + 1e-12 {
            assert!(adjusted_time(pair[1], &deleted) >= adjusted_time(pair[0], &deleted));
        }
    }

    // Points flanking a deletion are contiguous in collapsed time.
    assert!(
        (adjusted_time(2.0, &deleted) - adjusted_time(4.0, &deleted)).abs() < 1e-12
    );
}

// Spec scenarios through the public API

#[test]
fn deleting_the_inter_word_pause_collapses_to_sixteen_seconds() {
    let mut deletions = DeletionSets::default();
    deletions.pauses.insert("pause-after-w1".into());

    let collapsed = collapse_timeline(&spec_scenario_clips(), &deletions, 0.3);
    assert!((collapsed.total_duration - 16.0).abs() < 1e-9);

    let w2 = collapsed.script_track.item("w2").unwrap();
    assert!((w2.start - 1.0).abs() < 1e-9, "w2 follows w1 immediately");
}

#[test]
fn collapsed_duration_always_equals_original_minus_deleted() {
    let mut session = EditorSession::new(spec_scenario_clips(), EditorConfig::default());
    session.delete_selection(&["w1", "pause-after-w2", "silence-0-missing"]);

    let collapsed = session.collapsed();
    let deleted = total_duration(&collapsed.deleted_ranges);
    assert!((collapsed.total_duration - (18.0 - deleted)).abs() < 1e-9);
}

#[test]
fn preview_and_export_plan_agree_on_duration() {
    let mut session = EditorSession::new(spec_scenario_clips(), EditorConfig::default());
    session.delete_selection(&["pause-after-w1", "w2"]);

    let collapsed = session.collapsed();
    let planned: f64 = session.export_plan().iter().map(|c| c.duration()).sum();
    assert!((planned - collapsed.total_duration).abs() < 1e-9);
}

#[test]
fn zooming_at_the_pointer_keeps_that_time_fixed() {
    let mut viewport = Viewport::new(18.0, 1000.0);
    let pointer_x = 500.0; // 50% of the container

    let before = viewport.time_at(pointer_x);
    viewport.set_scale(2.0, Some(pointer_x));
    let after = viewport.time_at(pointer_x);

    assert!((before - after).abs() < 1e-9);
}

// Drag overlap rejection leaves tracks untouched

#[test]
fn rejected_drop_leaves_the_track_unchanged() {
    let mut text = TimelineTrack::new("text", "Text");
    for (id, start, end) in [("t1", 0.0, 2.0), ("t2", 5.0, 6.0)] {
        text.items.push(TimelineItem {
            id: id.into(),
            track_id: "text".into(),
            start,
            end,
            kind: ItemKind::Text,
            label: id.into(),
            payload: ItemPayload::Plain,
        });
    }
    let tracks = vec![text];
    let snapshot = tracks.clone();

    let mut session = DragSession::new(InteractionConfig {
        frame_interval_ms: 0,
        ..InteractionConfig::default()
    });
    let ctx = DragContext {
        tracks: &tracks,
        visible_width: 1000.0,
        visible_duration: 10.0,
    };

    session
        .begin(
            &tracks[0].items[0],
            0,
            GestureKind::Move,
            PointerInput::from_mouse(0.0, 0.0, PointerPhase::Start),
        )
        .unwrap();
    // Drop t1 (0..2) straight onto t2 (5..6).
    session
        .update(&ctx, PointerInput::from_mouse(450.0, 0.0, PointerPhase::Move))
        .unwrap();

    assert_eq!(session.commit(&ctx), None);
    assert_eq!(tracks, snapshot);
    assert!(!session.is_active());
}

#[test]
fn pause_threshold_scales_with_aggressiveness() {
    let mut clips = spec_scenario_clips();
    // A 0.2s gap: below the normal threshold, above the aggressive one.
    clips[0].words = Some(vec![word("w1", 0.0, 1.0), word("w2", 1.2, 2.0)]);

    let normal = collapse_timeline(&clips, &DeletionSets::default(), 0.3);
    assert!(normal.video_track.items.len() == 1);

    let mut deletions = DeletionSets::default();
    deletions.pauses.insert("pause-after-w1".into());
    let aggressive = collapse_timeline(&clips, &deletions, 0.15);
    assert!((aggressive.total_duration - 17.8).abs() < 1e-9);
}
