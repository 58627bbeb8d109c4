// Map-wide zoom/pan transform shared by every country shape.
use serde::{Deserialize, Serialize};

/// Movement (px) after which a pressed pointer counts as a pan instead of a click.
pub const CLICK_SLOP_PX: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomExtent {
    fn default() -> Self {
        Self { min: 1.0, max: 8.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub panning: bool,
    pub last_x: f64,
    pub last_y: f64,
    /// Displacement from the press origin once it exceeds the click slop, else 0.
    pub drag_distance: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            panning: false,
            last_x: 0.0,
            last_y: 0.0,
            drag_distance: 0.0,
        }
    }
}

impl Camera {
    /// Projected map coordinates to canvas pixels.
    pub fn apply(&self, (x, y): (f64, f64)) -> (f64, f64) {
        (x * self.zoom + self.offset_x, y * self.zoom + self.offset_y)
    }

    pub fn invert(&self, (x, y): (f64, f64)) -> (f64, f64) {
        ((x - self.offset_x) / self.zoom, (y - self.offset_y) / self.zoom)
    }

    /// Scale by `factor` keeping the point under (`cx`, `cy`) fixed.
    pub fn zoom_at(&mut self, cx: f64, cy: f64, factor: f64, extent: ZoomExtent) {
        let (wx, wy) = self.invert((cx, cy));
        self.zoom = (self.zoom * factor).clamp(extent.min, extent.max);
        self.offset_x = cx - wx * self.zoom;
        self.offset_y = cy - wy * self.zoom;
    }

    /// Wheel delta to zoom factor; one notch (100) is roughly 1.5x.
    pub fn wheel_factor(delta_y: f64) -> f64 {
        2f64.powf(-delta_y * 0.006)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.panning = true;
        self.last_x = x;
        self.last_y = y;
        self.drag_distance = 0.0;
    }

    /// Returns true if the camera moved.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        if !self.panning {
            return false;
        }
        // Until the slop is crossed `last_*` stays at the press origin.
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        if self.drag_distance <= CLICK_SLOP_PX {
            let from_origin = (dx * dx + dy * dy).sqrt();
            if from_origin <= CLICK_SLOP_PX {
                return false;
            }
            self.drag_distance = from_origin;
        }
        self.last_x = x;
        self.last_y = y;
        self.offset_x += dx;
        self.offset_y += dy;
        true
    }

    /// Ends the gesture; true when it was short enough to be a click.
    pub fn end_drag(&mut self) -> bool {
        let was_click = self.panning && self.drag_distance <= CLICK_SLOP_PX;
        self.panning = false;
        was_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_stays_within_extent() {
        let mut cam = Camera::default();
        let extent = ZoomExtent::default();
        for _ in 0..20 {
            cam.zoom_at(100.0, 100.0, 2.0, extent);
        }
        assert_eq!(cam.zoom, 8.0);
        for _ in 0..20 {
            cam.zoom_at(100.0, 100.0, 0.5, extent);
        }
        assert_eq!(cam.zoom, 1.0);
    }

    #[test]
    fn zoom_keeps_pointer_anchored() {
        let mut cam = Camera::default();
        let before = cam.invert((250.0, 120.0));
        cam.zoom_at(250.0, 120.0, 3.0, ZoomExtent::default());
        let after = cam.invert((250.0, 120.0));
        assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);
        let p = cam.apply((10.0, 20.0));
        assert_eq!(cam.invert(p), (10.0, 20.0));
    }

    #[test]
    fn short_drag_is_a_click() {
        let mut cam = Camera::default();
        cam.begin_drag(10.0, 10.0);
        assert!(!cam.drag_to(11.0, 11.0));
        assert!(cam.end_drag());
        assert_eq!(cam.offset_x, 0.0);

        cam.begin_drag(10.0, 10.0);
        assert!(cam.drag_to(30.0, 10.0));
        assert!(!cam.end_drag());
        assert_eq!(cam.offset_x, 20.0);
        assert!(!cam.end_drag());
    }

    #[test]
    fn pan_catches_up_with_pointer_after_slop() {
        let mut cam = Camera::default();
        cam.begin_drag(10.0, 10.0);
        assert!(!cam.drag_to(12.0, 10.0));
        assert!(cam.drag_to(14.0, 10.0));
        assert_eq!((cam.offset_x, cam.offset_y), (4.0, 0.0));
        assert!(cam.drag_to(15.0, 12.0));
        assert_eq!((cam.offset_x, cam.offset_y), (5.0, 2.0));
        assert!(!cam.end_drag());
    }
}
