//! Equirectangular projection fitted to the page, plus its inverse for hit-testing.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::model::LonLat;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 15.0,
            right: 10.0,
            bottom: 50.0,
            left: 10.0,
        }
    }
}

impl Margins {
    /// Drawable area for a window of the given size.
    pub fn inner_size(&self, window_w: f64, window_h: f64) -> (f64, f64) {
        (
            (window_w - self.left - self.right).max(0.0),
            (window_h - self.top - self.bottom).max(0.0),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Projection {
    /// Centre the world and size it so 2.5π radians of longitude span the width.
    pub fn fit(width: f64, height: f64) -> Self {
        Self {
            scale: ((width - 1.0) / 2.5 / PI).max(f64::EPSILON),
            translate_x: width / 2.0,
            translate_y: height / 2.0,
        }
    }

    pub fn project(&self, (lon, lat): LonLat) -> (f64, f64) {
        (
            self.translate_x + self.scale * lon.to_radians(),
            self.translate_y - self.scale * lat.to_radians(),
        )
    }

    pub fn invert(&self, (x, y): (f64, f64)) -> LonLat {
        (
            ((x - self.translate_x) / self.scale).to_degrees(),
            ((self.translate_y - y) / self.scale).to_degrees(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_centre() {
        let p = Projection::fit(800.0, 400.0);
        assert_eq!(p.project((0.0, 0.0)), (400.0, 200.0));
        let (x, y) = p.project((180.0, 90.0));
        assert!((x - (400.0 + 799.0 / 2.5)).abs() < 1e-9);
        assert!((y - (200.0 - 799.0 / 5.0)).abs() < 1e-9);
    }

    #[test]
    fn invert_undoes_project() {
        let p = Projection::fit(1270.0, 700.0);
        for ll in [(2.35, 48.85), (139.69, 35.68), (-74.0, -40.7)] {
            let back = p.invert(p.project(ll));
            assert!((back.0 - ll.0).abs() < 1e-9 && (back.1 - ll.1).abs() < 1e-9);
        }
    }

    #[test]
    fn margins_shrink_window() {
        assert_eq!(Margins::default().inner_size(1000.0, 800.0), (980.0, 735.0));
        assert_eq!(Margins::default().inner_size(5.0, 5.0), (0.0, 0.0));
    }
}
