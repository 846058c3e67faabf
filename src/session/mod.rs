//! Editing session façade
//!
//! Owns the clip sequence, the deletion sets, the overlay tracks, and the
//! ephemeral drag/viewport state, and exposes the derived views the UI shell
//! renders: the script track, the collapsed preview, and the export plan.
//! All cutting flows through the deletion sets; the derived views never
//! mutate them.

use tracing::debug;

use crate::collapse::{collapse_timeline, CollapsedTimeline, VIDEO_TRACK_ID};
use crate::config::EditorConfig;
use crate::cutter::{plan_export, ClipCut};
use crate::error::{ReelcutError, ReelcutResult};
use crate::interact::{reorder, reorder_insertion_index, DragCommit, DragSession};
use crate::project::Project;
use crate::ranges::{invert_ranges, TimeRange};
use crate::script::generate_script_track;
use crate::timeline::{ItemPayload, TimelineItem, TimelineTrack};
use crate::transcript::{total_duration, Clip, DeletionRef, DeletionSets};
use crate::viewport::Viewport;


/// One user's editing state for one project.
pub struct EditorSession {
    config: EditorConfig,
    clips: Vec<Clip>,
    deletions: DeletionSets,
    overlays: Vec<TimelineTrack>,
    pub drag: DragSession,
    pub viewport: Viewport,
}

impl EditorSession {
    pub fn new(clips: Vec<Clip>, config: EditorConfig) -> Self {
        let total = total_duration(&clips);
        let drag = DragSession::new(config.interaction());
        let mut viewport = Viewport::new(total, 1000.0);
        viewport.min_scale = config.min_scale;
        viewport.max_scale = config.max_scale;
        Self {
            config,
            clips,
            deletions: DeletionSets::default(),
            overlays: vec![
                TimelineTrack::new("text", "Text"),
                TimelineTrack::new("stickers", "Stickers"),
            ],
            drag,
            viewport,
        }
    }

    pub fn from_project(project: Project) -> Self {
        let config = project.config.clone().unwrap_or_default();
        let mut session = Self::new(project.clips, config);
        session.deletions = project.deletions;
        if !project.overlays.is_empty() {
            session.overlays = project.overlays;
        }
        session
    }

    pub fn to_project(&self) -> Project {
        Project {
            clips: self.clips.clone(),
            deletions: self.deletions.clone(),
            overlays: self.overlays.clone(),
            config: Some(self.config.clone()),
            saved_at: None,
        }
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn clips_mut(&mut self) -> &mut [Clip] {
        &mut self.clips
    }

    pub fn deletions(&self) -> &DeletionSets {
        &self.deletions
    }

    pub fn overlay_tracks(&self) -> &[TimelineTrack] {
        &self.overlays
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn original_duration(&self) -> f64 {
        total_duration(&self.clips)
    }

    /// The editable script track at original timestamps.
    pub fn script_track(&self) -> TimelineTrack {
        generate_script_track(
            &self.clips,
            &self.deletions,
            self.config.effective_pause_threshold(),
        )
    }

    /// The gapless preview reflecting every deletion.
    pub fn collapsed(&self) -> CollapsedTimeline {
        collapse_timeline(
            &self.clips,
            &self.deletions,
            self.config.effective_pause_threshold(),
        )
    }

    /// Keep-ranges on the original timeline; what the export will contain.
    pub fn keep_ranges(&self) -> Vec<TimeRange> {
        let collapsed = self.collapsed();
        invert_ranges(&collapsed.deleted_ranges, self.original_duration())
    }

    /// Per-clip lossless cuts realizing the keep-ranges.
    pub fn export_plan(&self) -> Vec<ClipCut> {
        plan_export(&self.clips, &self.keep_ranges())
    }

    /// Delete selected script-track items (words, pauses, silences) by id.
    ///
    /// Ids that resolve to nothing are tolerated as no-ops, so a stale
    /// selection or an outdated persisted id never faults the session.
    pub fn delete_selection<S: AsRef<str>>(&mut self, item_ids: &[S]) {
        for id in item_ids {
            if let Some(reason) = self.resolve_deletion(id.as_ref()) {
                self.deletions.apply(&reason);
            } else {
                debug!(id = id.as_ref(), "Ignoring unresolvable deletion id");
            }
        }
    }

    /// Restore previously deleted items by id.
    pub fn restore_selection<S: AsRef<str>>(&mut self, item_ids: &[S]) {
        for id in item_ids {
            if let Some(reason) = self.resolve_deletion(id.as_ref()) {
                self.deletions.restore(&reason);
            }
        }
    }

    fn resolve_deletion(&self, id: &str) -> Option<DeletionRef> {
        // Silence ids resolve by scheme alone; the segment need not exist
        // anymore for a restore to clear the set.
        if let Some(rest) = id.strip_prefix("silence-") {
            let (clip_index, segment_id) = rest.split_once('-')?;
            return Some(DeletionRef::Silence {
                clip_index: clip_index.parse().ok()?,
                segment_id: segment_id.to_string(),
            });
        }

        let script = self.script_track();
        let item = script.item(id)?;
        match &item.payload {
            ItemPayload::Word { word_id, .. } => Some(DeletionRef::Word {
                word_id: word_id.clone(),
            }),
            ItemPayload::Pause { accepted_ids, .. } => Some(DeletionRef::Pause {
                primary_id: accepted_ids.first()?.clone(),
                accepted_ids: accepted_ids.clone(),
            }),
            _ => None,
        }
    }

    /// Add an overlay item to its track.
    pub fn add_overlay(&mut self, item: TimelineItem) -> ReelcutResult<()> {
        let track = self
            .overlays
            .iter_mut()
            .find(|t| t.id == item.track_id)
            .ok_or_else(|| ReelcutError::UnknownTrack {
                track: item.track_id.clone(),
            })?;
        track.items.push(item);
        Ok(())
    }

    /// Remove overlay items by id.
    pub fn remove_overlays(&mut self, ids: &[&str]) -> usize {
        self.overlays.iter_mut().map(|t| t.remove_items(ids)).sum()
    }

    /// Apply a committed drag gesture to the overlay tracks.
    ///
    /// Video items are reorder-only and never arrive here; clip reordering
    /// goes through [`EditorSession::move_clip`].
    pub fn apply_commit(&mut self, commit: DragCommit) -> ReelcutResult<()> {
        match commit {
            DragCommit::Move {
                item_id,
                new_start,
                new_end,
                track_id,
                ..
            } => {
                if track_id == VIDEO_TRACK_ID {
                    return Err(ReelcutError::DragRejected {
                        message: "video items reorder clips instead of moving freely".to_string(),
                    });
                }
                let source = self
                    .overlays
                    .iter_mut()
                    .find(|t| t.item(&item_id).is_some())
                    .ok_or_else(|| ReelcutError::UnknownItem {
                        id: item_id.clone(),
                    })?;
                let index = source.items.iter().position(|i| i.id == item_id).unwrap();
                let mut item = source.items.remove(index);
                item.start = new_start;
                item.end = new_end;
                item.track_id = track_id.clone();

                let destination = self
                    .overlays
                    .iter_mut()
                    .find(|t| t.id == track_id)
                    .ok_or(ReelcutError::UnknownTrack { track: track_id })?;
                destination.items.push(item);
                Ok(())
            }
            DragCommit::Resize {
                item_id,
                new_start,
                new_end,
            } => {
                let item = self
                    .overlays
                    .iter_mut()
                    .find_map(|t| t.item_mut(&item_id))
                    .ok_or(ReelcutError::UnknownItem { id: item_id })?;
                item.start = new_start;
                item.end = new_end;
                Ok(())
            }
        }
    }

    /// Reorder the clip sequence by dropping clip `from_index` at an
    /// original-timeline drop time. Index-based splice, not a time
    /// overwrite.
    pub fn move_clip(&mut self, from_index: usize, drop_time: f64) -> ReelcutResult<()> {
        if from_index >= self.clips.len() {
            return Err(ReelcutError::UnknownItem {
                id: format!("clip {from_index}"),
            });
        }
        let durations: Vec<f64> = self.clips.iter().map(|c| c.duration).collect();
        let to = reorder_insertion_index(&durations, from_index, drop_time);
        reorder(&mut self.clips, from_index, to);
        debug!(from_index, to, "Clip reordered");
        Ok(())
    }
}
