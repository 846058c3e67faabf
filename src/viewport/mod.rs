//! Zoom and scroll state for the timeline viewport
//!
//! The viewport holds a zoom scale and a horizontal scroll offset in pixels.
//! Every zoom recomputes the scroll so that the content under the focal point
//! (the pointer, or the playhead when no pointer is given) stays visually
//! stationary. Wheel zoom requires a modifier key; a plain wheel pans.

use serde::{Deserialize, Serialize};

/// Fixed multiplier applied to raw pinch-distance ratios so small finger
/// movements stay perceptible.
const PINCH_SENSITIVITY: f64 = 2.0;

/// Viewport zoom/scroll state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    /// Horizontal scroll offset in pixels of content space.
    pub scroll: f64,
    /// Total collapsed timeline duration in seconds.
    pub total_duration: f64,
    /// Visible width of the timeline container in pixels.
    pub container_width: f64,
    /// Left edge of the container in client coordinates.
    pub container_left: f64,
    /// Playhead position in seconds; zoom focal fallback.
    pub playhead: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Viewport {
    pub fn new(total_duration: f64, container_width: f64) -> Self {
        Self {
            scale: 1.0,
            scroll: 0.0,
            total_duration,
            container_width,
            container_left: 0.0,
            playhead: 0.0,
            min_scale: 1.0,
            max_scale: 10.0,
        }
    }

    /// Effective scale used for geometry; zooming out never shows more than
    /// the whole timeline.
    fn effective_scale(&self) -> f64 {
        self.scale.max(1.0)
    }

    /// Width of the full timeline content at the current scale, in pixels.
    pub fn content_width(&self) -> f64 {
        self.container_width * self.effective_scale()
    }

    /// The span of time visible in the container at the current scale.
    pub fn visible_duration(&self) -> f64 {
        self.total_duration / self.effective_scale()
    }

    /// Convert a client x coordinate to a timeline time.
    pub fn time_at(&self, client_x: f64) -> f64 {
        if self.total_duration <= 0.0 || self.content_width() <= 0.0 {
            return 0.0;
        }
        let content_x = self.scroll + (client_x - self.container_left);
        (content_x / self.content_width() * self.total_duration).clamp(0.0, self.total_duration)
    }

    /// Convert a timeline time to a client x coordinate.
    pub fn client_x_at(&self, t: f64) -> f64 {
        if self.total_duration <= 0.0 {
            return self.container_left;
        }
        t / self.total_duration * self.content_width() - self.scroll + self.container_left
    }

    /// Zoom step for the current scale; coarser at high zoom so the
    /// perceived zoom speed stays constant.
    pub fn zoom_step(&self) -> f64 {
        if self.scale >= 5.0 {
            1.0
        } else if self.scale >= 2.0 {
            0.5
        } else {
            0.25
        }
    }

    /// Wheel input. Zooms only while the modifier key is held; a plain wheel
    /// pans horizontally instead.
    pub fn wheel(&mut self, delta_y: f64, modifier: bool, pointer_x: Option<f64>) {
        if modifier {
            let step = self.zoom_step();
            let target = if delta_y < 0.0 {
                self.scale + step
            } else {
                self.scale - step
            };
            self.set_scale(target, pointer_x);
        } else {
            self.pan_by(delta_y);
        }
    }

    /// Pinch input with the raw distance ratio between the last two samples.
    pub fn pinch(&mut self, ratio: f64, focal_x: Option<f64>) {
        let factor = 1.0 + (ratio - 1.0) * PINCH_SENSITIVITY;
        if factor > 0.0 {
            self.set_scale(self.scale * factor, focal_x);
        }
    }

    /// Set the scale, recomputing scroll so the focal point stays put:
    /// `new_scroll = relative_x * (new / old) - (focal_x - container_left)`.
    pub fn set_scale(&mut self, new_scale: f64, focal_x: Option<f64>) {
        let old_effective = self.effective_scale();
        let focal_x = focal_x.unwrap_or_else(|| self.client_x_at(self.playhead));

        self.scale = new_scale.clamp(self.min_scale, self.max_scale);
        let new_effective = self.effective_scale();

        let focal_offset = focal_x - self.container_left;
        let relative_x = self.scroll + focal_offset;
        self.scroll = relative_x * (new_effective / old_effective) - focal_offset;
        self.clamp_scroll();
    }

    /// Pan by an accumulated pixel delta, independent of any zoom in flight.
    pub fn pan_by(&mut self, delta_x: f64) {
        self.scroll += delta_x;
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max_scroll = (self.content_width() - self.container_width).max(0.0);
        self.scroll = self.scroll.clamp(0.0, max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(20.0, 1000.0)
    }

    #[test]
    fn test_visible_duration_by_scale() {
        let mut vp = viewport();
        assert_eq!(vp.visible_duration(), 20.0);
        vp.scale = 2.0;
        assert_eq!(vp.visible_duration(), 10.0);
        // Below 1.0 the whole timeline is already visible.
        vp.scale = 0.5;
        assert_eq!(vp.visible_duration(), 20.0);
    }

    #[test]
    fn test_zoom_keeps_focal_time_stationary() {
        let mut vp = viewport();
        let focal_x = 500.0; // 50% of the container
        let before = vp.time_at(focal_x);

        vp.set_scale(2.0, Some(focal_x));

        let after = vp.time_at(focal_x);
        assert!((before - after).abs() < 1e-9);
        assert!((vp.scroll - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_without_pointer_centers_on_playhead() {
        let mut vp = viewport();
        vp.playhead = 10.0;
        let playhead_x = vp.client_x_at(vp.playhead);

        vp.set_scale(2.0, None);

        assert!((vp.time_at(playhead_x) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_scale_clamped_to_bounds() {
        let mut vp = viewport();
        vp.set_scale(100.0, None);
        assert_eq!(vp.scale, vp.max_scale);
        vp.set_scale(0.0, None);
        assert_eq!(vp.scale, vp.min_scale);
    }

    #[test]
    fn test_zoom_step_coarsens_with_scale() {
        let mut vp = viewport();
        let low = vp.zoom_step();
        vp.scale = 3.0;
        let mid = vp.zoom_step();
        vp.scale = 7.0;
        let high = vp.zoom_step();
        assert!(low < mid && mid < high);
    }

    #[test]
    fn test_wheel_requires_modifier_to_zoom() {
        let mut vp = viewport();
        vp.wheel(-120.0, false, Some(500.0));
        assert_eq!(vp.scale, 1.0);

        vp.wheel(-120.0, true, Some(500.0));
        assert!(vp.scale > 1.0);
    }

    #[test]
    fn test_plain_wheel_pans_and_clamps() {
        let mut vp = viewport();
        vp.scale = 2.0;
        vp.pan_by(300.0);
        assert_eq!(vp.scroll, 300.0);
        vp.pan_by(10_000.0);
        assert_eq!(vp.scroll, vp.content_width() - vp.container_width);
        vp.pan_by(-1e9);
        assert_eq!(vp.scroll, 0.0);
    }

    #[test]
    fn test_pinch_applies_sensitivity() {
        let mut vp = viewport();
        vp.pinch(1.1, Some(0.0));
        // ratio 1.1 with 2x sensitivity => factor 1.2
        assert!((vp.scale - 1.2).abs() < 1e-9);
    }
}
