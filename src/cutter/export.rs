//! Export planning: global keep-ranges onto the clip sequence
//!
//! The collapsed preview and the physical cutter consume the same merged
//! deleted-range set; this module projects the resulting keep-ranges onto the
//! individual clip files so a multi-clip project exports as one ordered
//! concat of per-clip lossless segments.

use std::path::PathBuf;

use crate::ranges::TimeRange;
use crate::transcript::{clip_offsets, Clip};

/// One lossless extraction from one clip file, in clip-local time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipCut {
    pub clip_index: usize,
    pub path: PathBuf,
    pub range: TimeRange,
}

impl ClipCut {
    pub fn duration(&self) -> f64 {
        self.range.duration()
    }
}

/// Project global keep-ranges onto clip files, preserving order.
///
/// A keep-range spanning a clip boundary splits into one cut per clip it
/// intersects. The total planned duration equals the total keep duration.
pub fn plan_export(clips: &[Clip], keep_ranges: &[TimeRange]) -> Vec<ClipCut> {
    let offsets = clip_offsets(clips);
    let mut cuts = Vec::new();

    for range in keep_ranges {
        for (clip_index, clip) in clips.iter().enumerate() {
            let clip_start = offsets[clip_index];
            let clip_end = clip_start + clip.duration;

            let start = range.start.max(clip_start);
            let end = range.end.min(clip_end);
            if end <= start {
                continue;
            }
            cuts.push(ClipCut {
                clip_index,
                path: clip.path.clone(),
                range: TimeRange::new(start - clip_start, end - clip_start),
            });
        }
    }
    cuts
}
