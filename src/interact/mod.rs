//! Pointer-driven drag/resize state machine
//!
//! One drag session exists at a time. A gesture starts with a snapshot of the
//! dragged item, produces a ghost placement on every (frame-throttled) pointer
//! update, and either commits a track mutation on release or discards the
//! gesture. The session is cleared unconditionally on release, so there are
//! no stuck states.
//!
//! Mouse, touch, and Safari gesture events are normalized by the
//! [`PointerInput`] adapters into a single `{client_x, client_y, phase}`
//! update shape before they reach the state machine.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReelcutError, ReelcutResult};
use crate::ranges::TimeRange;
use crate::timeline::{snap_to_grid, ItemKind, TimelineItem, TimelineTrack};

pub mod autoscroll;


/// Which edge (or the body) of an item a gesture manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureKind {
    Move,
    ResizeStart,
    ResizeEnd,
}

/// Lifecycle phase of a normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A normalized pointer sample in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub client_x: f64,
    pub client_y: f64,
    pub phase: PointerPhase,
}

impl PointerInput {
    /// Mouse events map through directly.
    pub fn from_mouse(client_x: f64, client_y: f64, phase: PointerPhase) -> Self {
        Self {
            client_x,
            client_y,
            phase,
        }
    }

    /// Touch events contribute their primary touch point. An empty touch
    /// list (fingers lifted) becomes a cancel at the last known spot.
    pub fn from_touch(touches: &[(f64, f64)], phase: PointerPhase) -> Option<Self> {
        touches.first().map(|&(client_x, client_y)| Self {
            client_x,
            client_y,
            phase,
        })
    }

    /// Safari gesture events expose a center point.
    pub fn from_gesture(center_x: f64, center_y: f64, phase: PointerPhase) -> Self {
        Self {
            client_x: center_x,
            client_y: center_y,
            phase,
        }
    }
}

/// Geometry and rules the state machine needs on each update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InteractionConfig {
    /// Editing grid in seconds; every candidate position snaps to it.
    pub snap_step: f64,
    /// Floor on item duration during resize.
    pub min_item_duration: f64,
    /// Fixed per-track lane height in pixels.
    pub track_height_px: f64,
    /// Minimum milliseconds between ghost updates (animation-frame cadence).
    pub frame_interval_ms: u64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            snap_step: 0.1,
            min_item_duration: 0.1,
            track_height_px: 56.0,
            frame_interval_ms: 16,
        }
    }
}

/// Per-update view of the timeline the drag runs against.
#[derive(Debug, Clone, Copy)]
pub struct DragContext<'a> {
    pub tracks: &'a [TimelineTrack],
    /// Visible timeline width in pixels.
    pub visible_width: f64,
    /// Seconds spanned by the visible width at the current zoom.
    pub visible_duration: f64,
}

impl<'a> DragContext<'a> {
    fn time_per_pixel(&self) -> f64 {
        if self.visible_width <= 0.0 {
            0.0
        } else {
            self.visible_duration / self.visible_width
        }
    }
}

/// Immutable snapshot captured at drag start.
#[derive(Debug, Clone, PartialEq)]
struct DragSnapshot {
    item_id: String,
    item_kind: ItemKind,
    gesture: GestureKind,
    origin_start: f64,
    origin_duration: f64,
    origin_track_index: usize,
    pointer_x: f64,
    pointer_y: f64,
}

/// Candidate drop position shown while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostPlacement {
    pub start: f64,
    pub end: f64,
    pub track_index: usize,
    pub valid: bool,
}

/// The track mutation produced by a committed gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DragCommit {
    Move {
        item_id: String,
        new_start: f64,
        new_end: f64,
        track_id: String,
        track_index: usize,
    },
    Resize {
        item_id: String,
        new_start: f64,
        new_end: f64,
    },
}

/// Drops pointer samples that arrive faster than the frame cadence.
#[derive(Debug, Clone)]
struct FrameThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl FrameThrottle {
    fn new(interval_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            last: None,
        }
    }

    fn ready(&mut self) -> bool {
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// The ephemeral, single-writer drag state.
///
/// Exists only between drag start and end/cancel; `reset` is idempotent and
/// safe to call from any exit path.
#[derive(Debug, Clone)]
pub struct DragSession {
    config: InteractionConfig,
    snapshot: Option<DragSnapshot>,
    ghost: Option<GhostPlacement>,
    throttle: FrameThrottle,
}

impl DragSession {
    pub fn new(config: InteractionConfig) -> Self {
        let throttle = FrameThrottle::new(config.frame_interval_ms);
        Self {
            config,
            snapshot: None,
            ghost: None,
            throttle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn ghost(&self) -> Option<GhostPlacement> {
        self.ghost
    }

    /// Clear all session state. Idempotent.
    pub fn reset(&mut self) {
        self.snapshot = None;
        self.ghost = None;
        self.throttle.last = None;
    }

    /// Start a gesture on `item`. Script and pause items are selectable
    /// only and reject the drag outright. Any stale session is discarded.
    pub fn begin(
        &mut self,
        item: &TimelineItem,
        track_index: usize,
        gesture: GestureKind,
        input: PointerInput,
    ) -> ReelcutResult<()> {
        if item.kind.rejects_drag() {
            return Err(ReelcutError::DragRejected {
                message: format!("{} items are selectable only", item.id),
            });
        }
        self.reset();

        self.snapshot = Some(DragSnapshot {
            item_id: item.id.clone(),
            item_kind: item.kind,
            gesture,
            origin_start: item.start,
            origin_duration: item.duration(),
            origin_track_index: track_index,
            pointer_x: input.client_x,
            pointer_y: input.client_y,
        });
        // The ghost renders immediately at the item's current position.
        self.ghost = Some(GhostPlacement {
            start: item.start,
            end: item.end,
            track_index,
            valid: true,
        });
        debug!(item = %item.id, gesture = ?gesture, "Drag started");
        Ok(())
    }

    /// Feed a pointer sample. Samples arriving faster than the frame cadence
    /// are dropped, not queued; the returned ghost is the latest placement.
    pub fn update(&mut self, ctx: &DragContext<'_>, input: PointerInput) -> Option<GhostPlacement> {
        let snapshot = self.snapshot.as_ref()?;
        if matches!(input.phase, PointerPhase::End | PointerPhase::Cancel) {
            return self.ghost;
        }
        if !self.throttle.ready() {
            return self.ghost;
        }

        let dt = (input.client_x - snapshot.pointer_x) * ctx.time_per_pixel();
        let track_delta = ((input.client_y - snapshot.pointer_y) / self.config.track_height_px)
            .round() as isize;

        let (start, end, track_index) = match snapshot.gesture {
            GestureKind::Move => {
                let start = snap_to_grid(snapshot.origin_start + dt, self.config.snap_step);
                let track_index = clamp_track_index(
                    snapshot.origin_track_index as isize + track_delta,
                    ctx.tracks.len(),
                );
                (start, start + snapshot.origin_duration, track_index)
            }
            GestureKind::ResizeStart => {
                let fixed_end = snapshot.origin_start + snapshot.origin_duration;
                let snapped = snap_to_grid(snapshot.origin_start + dt, self.config.snap_step);
                let duration = (fixed_end - snapped).max(self.config.min_item_duration);
                (fixed_end - duration, fixed_end, snapshot.origin_track_index)
            }
            GestureKind::ResizeEnd => {
                let duration = snap_to_grid(snapshot.origin_duration + dt, self.config.snap_step)
                    .max(self.config.min_item_duration);
                (
                    snapshot.origin_start,
                    snapshot.origin_start + duration,
                    snapshot.origin_track_index,
                )
            }
        };

        let valid = self.validate(ctx, snapshot, start, end, track_index);
        let ghost = GhostPlacement {
            start,
            end,
            track_index,
            valid,
        };
        self.ghost = Some(ghost);
        Some(ghost)
    }

    /// Release the pointer. Returns the mutation to apply when the last
    /// placement was valid; the session is cleared either way.
    pub fn commit(&mut self, ctx: &DragContext<'_>) -> Option<DragCommit> {
        let result = match (self.snapshot.take(), self.ghost.take()) {
            (Some(snapshot), Some(ghost)) if ghost.valid => {
                let action = match snapshot.gesture {
                    GestureKind::Move => DragCommit::Move {
                        item_id: snapshot.item_id,
                        new_start: ghost.start,
                        new_end: ghost.end,
                        track_id: ctx
                            .tracks
                            .get(ghost.track_index)
                            .map(|t| t.id.clone())
                            .unwrap_or_default(),
                        track_index: ghost.track_index,
                    },
                    GestureKind::ResizeStart | GestureKind::ResizeEnd => DragCommit::Resize {
                        item_id: snapshot.item_id,
                        new_start: ghost.start,
                        new_end: ghost.end,
                    },
                };
                Some(action)
            }
            _ => None,
        };
        self.reset();
        result
    }

    /// Abort the gesture without committing.
    pub fn cancel(&mut self) {
        if self.is_active() {
            debug!("Drag cancelled");
        }
        self.reset();
    }

    fn validate(
        &self,
        ctx: &DragContext<'_>,
        snapshot: &DragSnapshot,
        start: f64,
        end: f64,
        track_index: usize,
    ) -> bool {
        if start < 0.0 {
            return false;
        }
        let Some(track) = ctx.tracks.get(track_index) else {
            return false;
        };
        // Video items are reorder-only; their drop position is resolved
        // against clip midpoints, not against track overlap.
        if snapshot.item_kind == ItemKind::Video {
            return true;
        }
        !track.has_overlap(&TimeRange::new(start, end), &snapshot.item_id)
    }
}

fn clamp_track_index(index: isize, track_count: usize) -> usize {
    if track_count == 0 {
        return 0;
    }
    index.clamp(0, track_count as isize - 1) as usize
}

/// Resolve where a dragged clip lands in the clip order.
///
/// The drop time is compared against the midpoint of every other clip's
/// span; counting over the sequence without the dragged clip is what corrects
/// for moving an item past its own original slot. The result indexes into
/// the array after the dragged clip has been removed.
pub fn reorder_insertion_index(durations: &[f64], from_index: usize, drop_time: f64) -> usize {
    let mut offset = 0.0;
    let mut insert = 0;
    for (index, duration) in durations.iter().enumerate() {
        let midpoint = offset + duration / 2.0;
        offset += duration;
        if index == from_index {
            continue;
        }
        if drop_time > midpoint {
            insert += 1;
        }
    }
    insert
}

/// Splice an element from `from` to `to` (index into the array without the
/// moved element, as produced by [`reorder_insertion_index`]).
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() {
        return;
    }
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}
