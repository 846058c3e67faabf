//! Edge-proximity auto-scroll during drags
//!
//! Runs on its own animation-frame loop, independent of the drag state
//! machine, and must stop as soon as the pointer leaves the edge zone or the
//! drag ends.

use crate::viewport::Viewport;

/// Auto-scroll loop state.
#[derive(Debug, Clone)]
pub struct EdgeAutoScroll {
    /// Width of the scroll-trigger zone at each container edge, in pixels.
    pub edge_zone_px: f64,
    /// Scroll speed at the very edge, in pixels per tick.
    pub max_speed_px: f64,
    active: bool,
}

impl EdgeAutoScroll {
    pub fn new(edge_zone_px: f64, max_speed_px: f64) -> Self {
        Self {
            edge_zone_px,
            max_speed_px,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cancel the loop. Safe to call at any time.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Scroll velocity for a pointer position, scaled by how deep into the
    /// edge zone the pointer sits. `None` outside both zones.
    pub fn velocity(&self, pointer_x: f64, container_left: f64, container_width: f64) -> Option<f64> {
        if self.edge_zone_px <= 0.0 {
            return None;
        }
        let offset = pointer_x - container_left;
        if offset < self.edge_zone_px {
            let depth = (self.edge_zone_px - offset.max(0.0)) / self.edge_zone_px;
            Some(-self.max_speed_px * depth.min(1.0))
        } else if offset > container_width - self.edge_zone_px {
            let over = offset - (container_width - self.edge_zone_px);
            let depth = (over / self.edge_zone_px).min(1.0);
            Some(self.max_speed_px * depth)
        } else {
            None
        }
    }

    /// One animation-frame tick. Pans the viewport while the pointer stays in
    /// an edge zone; stops the loop and returns false otherwise.
    pub fn tick(&mut self, viewport: &mut Viewport, pointer_x: f64) -> bool {
        match self.velocity(pointer_x, viewport.container_left, viewport.container_width) {
            Some(velocity) => {
                self.active = true;
                viewport.pan_by(velocity);
                true
            }
            None => {
                self.stop();
                false
            }
        }
    }
}
