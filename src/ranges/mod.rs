//! Time-range algebra shared by the preview and export paths
//!
//! Ranges use the half-open convention `[start, end)`. A range whose start
//! equals (or exceeds) its end carries no duration and is dropped by
//! `merge_ranges`.

use serde::{Deserialize, Serialize};

/// A half-open interval on the original timeline, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Duration in seconds; zero for empty or inverted ranges.
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    /// True when the range carries no duration.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Half-open containment check.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end
    }

    /// True when two ranges share any sub-interval.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Total duration covered by a set of ranges.
pub fn total_duration(ranges: &[TimeRange]) -> f64 {
    ranges.iter().map(TimeRange::duration).sum()
}

/// Merge a set of ranges into a minimal, sorted, non-overlapping set.
///
/// Touching ranges (`next.start == current.end`) merge as well, so the output
/// never contains zero-length gaps. Empty ranges are dropped. Idempotent.
pub fn merge_ranges(ranges: &[TimeRange]) -> Vec<TimeRange> {
    let mut sorted: Vec<TimeRange> = ranges.iter().copied().filter(|r| !r.is_empty()).collect();
    if sorted.is_empty() {
        return Vec::new();
    }
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut merged: Vec<TimeRange> = Vec::with_capacity(sorted.len());
    let mut current = sorted[0];
    for range in sorted.iter().skip(1) {
        if range.start <= current.end {
            current.end = current.end.max(range.end);
        } else {
            merged.push(current);
            current = *range;
        }
    }
    merged.push(current);
    merged
}

/// Invert merged, sorted deleted ranges against `[0, total]`.
///
/// Returns the keep-ranges: every sub-interval of the span not covered by a
/// deleted range, clipped to the span. An empty input keeps the whole span.
pub fn invert_ranges(deleted: &[TimeRange], total: f64) -> Vec<TimeRange> {
    if total <= 0.0 {
        return Vec::new();
    }
    if deleted.is_empty() {
        return vec![TimeRange::new(0.0, total)];
    }

    let mut keep = Vec::new();
    let mut cursor = 0.0;
    for range in deleted {
        let start = range.start.max(0.0);
        let end = range.end.min(total);
        if start > cursor {
            keep.push(TimeRange::new(cursor, start.min(total)));
        }
        cursor = cursor.max(end);
        if cursor >= total {
            break;
        }
    }
    if cursor < total {
        keep.push(TimeRange::new(cursor, total));
    }
    keep
}

/// Map a timestamp on the original timeline to its collapsed position.
///
/// Subtracts the deleted duration that falls before `t`. `deleted` must be
/// merged and sorted (the output of [`merge_ranges`]). Monotonic
/// non-decreasing; points flanking a deleted range map to the same collapsed
/// instant, which is exactly the boundary the collapsed video track uses.
pub fn adjusted_time(t: f64, deleted: &[TimeRange]) -> f64 {
    let mut removed = 0.0;
    for range in deleted {
        if range.start >= t {
            break;
        }
        removed += range.end.min(t) - range.start;
    }
    t - removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: f64, end: f64) -> TimeRange {
        TimeRange::new(start, end)
    }

    #[test]
    fn test_merge_empty_input() {
        assert!(merge_ranges(&[]).is_empty());
    }

    #[test]
    fn test_merge_drops_zero_length() {
        let merged = merge_ranges(&[r(1.0, 1.0), r(2.0, 3.0)]);
        assert_eq!(merged, vec![r(2.0, 3.0)]);
    }

    #[test]
    fn test_merge_overlapping_and_touching() {
        let merged = merge_ranges(&[r(0.0, 2.0), r(1.5, 3.0), r(3.0, 4.0), r(6.0, 7.0)]);
        assert_eq!(merged, vec![r(0.0, 4.0), r(6.0, 7.0)]);
    }

    #[test]
    fn test_merge_unsorted_input() {
        let merged = merge_ranges(&[r(5.0, 6.0), r(0.0, 1.0), r(0.5, 2.0)]);
        assert_eq!(merged, vec![r(0.0, 2.0), r(5.0, 6.0)]);
    }

    #[test]
    fn test_merge_idempotent() {
        let input = vec![r(0.0, 2.0), r(1.0, 4.0), r(8.0, 9.0), r(4.0, 5.0)];
        let once = merge_ranges(&input);
        let twice = merge_ranges(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_invert_empty_keeps_span() {
        assert_eq!(invert_ranges(&[], 10.0), vec![r(0.0, 10.0)]);
    }

    #[test]
    fn test_invert_interior_ranges() {
        let deleted = merge_ranges(&[r(2.0, 3.0), r(5.0, 7.0)]);
        let keep = invert_ranges(&deleted, 10.0);
        assert_eq!(keep, vec![r(0.0, 2.0), r(3.0, 5.0), r(7.0, 10.0)]);
    }

    #[test]
    fn test_invert_boundary_ranges() {
        let deleted = merge_ranges(&[r(0.0, 1.0), r(9.0, 10.0)]);
        let keep = invert_ranges(&deleted, 10.0);
        assert_eq!(keep, vec![r(1.0, 9.0)]);
    }

    #[test]
    fn test_invert_clips_to_span() {
        let deleted = merge_ranges(&[r(-2.0, 1.0), r(9.0, 14.0)]);
        let keep = invert_ranges(&deleted, 10.0);
        assert_eq!(keep, vec![r(1.0, 9.0)]);
    }

    #[test]
    fn test_invert_merge_duality() {
        let input = vec![r(1.0, 2.5), r(2.0, 4.0), r(6.0, 6.5), r(8.0, 9.0)];
        let total = 12.0;
        let merged = merge_ranges(&input);
        let keep = invert_ranges(&merged, total);

        for pair in keep.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        let covered = total_duration(&keep) + total_duration(&merged);
        assert!((covered - total).abs() < 1e-9);
    }

    #[test]
    fn test_adjusted_time_before_any_deletion() {
        let deleted = merge_ranges(&[r(5.0, 7.0)]);
        assert_eq!(adjusted_time(3.0, &deleted), 3.0);
    }

    #[test]
    fn test_adjusted_time_after_deletion() {
        let deleted = merge_ranges(&[r(2.0, 4.0), r(6.0, 7.0)]);
        assert_eq!(adjusted_time(5.0, &deleted), 3.0);
        assert_eq!(adjusted_time(9.0, &deleted), 6.0);
    }

    #[test]
    fn test_adjusted_time_contiguous_across_deletion() {
        let deleted = merge_ranges(&[r(2.0, 4.0)]);
        // The instant before the cut and the instant after it land on the
        // same collapsed position: no gap, no overlap.
        assert_eq!(adjusted_time(2.0, &deleted), adjusted_time(4.0, &deleted));
    }

    #[test]
    fn test_adjusted_time_monotonic() {
        let deleted = merge_ranges(&[r(1.0, 2.0), r(4.0, 4.5), r(6.0, 9.0)]);
        let mut last = f64::NEG_INFINITY;
        let mut t = 0.0;
        while t <= 12.0 {
            let adjusted = adjusted_time(t, &deleted);
            assert!(adjusted >= last - 1e-12);
            last = adjusted;
            t += 0.125;
        }
    }
}
