//! End-to-end export tests
//!
//! These tests drive the real ffmpeg binary and are ignored by default; run
//! them with `cargo test -- --ignored` on a machine with ffmpeg installed.

use std::path::Path;

use tempfile::TempDir;

use reelcut::cutter::{plan_export, ExportEvent, SegmentCutter};
use reelcut::probe::MediaProbe;
use reelcut::ranges::TimeRange;
use reelcut::transcript::Clip;

/// Synthesize a ten-second test clip with ffmpeg's testsrc generator.
async fn generate_test_video(path: &Path) -> bool {
    let status = tokio::process::Command::new("ffmpeg")
        .args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=duration=10:size=320x240:rate=30",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-y",
        ])
        .arg(path)
        .status()
        .await;
    matches!(status, Ok(s) if s.success())
}

#[tokio::test]
#[ignore] // Requires ffmpeg on PATH
async fn cutting_two_keep_ranges_yields_their_summed_duration() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.mp4");
    let output = dir.path().join("output.mp4");

    if !generate_test_video(&input).await {
        return; // No usable ffmpeg; nothing to assert against.
    }

    let keep = vec![TimeRange::new(0.0, 2.0), TimeRange::new(5.0, 7.0)];
    let cutter = SegmentCutter::new().with_tolerance(0.5);
    let report = cutter.cut(&input, &keep, &output, None).await.unwrap();

    assert_eq!(report.segments, 2);
    assert!((report.expected_duration - 4.0).abs() < 1e-9);

    let probed = MediaProbe::new().duration(&output).await.unwrap();
    assert!(
        (probed - 4.0).abs() < 0.5,
        "output duration {probed} outside tolerance"
    );
}

#[tokio::test]
#[ignore] // Requires ffmpeg on PATH
async fn a_single_keep_range_exports_without_concat() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.mp4");
    let output = dir.path().join("single.mp4");

    if !generate_test_video(&input).await {
        return;
    }

    let keep = vec![TimeRange::new(1.0, 4.0)];
    let cutter = SegmentCutter::new().with_tolerance(0.5);
    let report = cutter.cut(&input, &keep, &output, None).await.unwrap();

    assert_eq!(report.segments, 1);
    assert!(output.exists());
    assert!(report.actual_duration.is_some());
}

#[tokio::test]
#[ignore] // Requires ffmpeg on PATH
async fn multi_clip_export_plan_concatenates_in_order() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.mp4");
    let second = dir.path().join("second.mp4");
    let output = dir.path().join("joined.mp4");

    if !generate_test_video(&first).await || !generate_test_video(&second).await {
        return;
    }

    let clips = vec![
        Clip::new(&first, 10.0),
        Clip::new(&second, 10.0),
    ];
    // Keep 8..12 of the global timeline: the last 2s of the first clip and
    // the first 2s of the second.
    let plan = plan_export(&clips, &[TimeRange::new(8.0, 12.0)]);
    assert_eq!(plan.len(), 2);

    let events = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink = {
        let events = std::sync::Arc::clone(&events);
        move |event: ExportEvent| events.lock().unwrap().push(event)
    };

    let cutter = SegmentCutter::new().with_tolerance(0.5);
    let report = cutter.export(&plan, &output, Some(&sink)).await.unwrap();

    assert!((report.expected_duration - 4.0).abs() < 1e-9);
    assert!(matches!(
        events.lock().unwrap().last(),
        Some(ExportEvent::Done(_))
    ));
    let probed = MediaProbe::new().duration(&output).await.unwrap();
    assert!((probed - 4.0).abs() < 0.5);
}
