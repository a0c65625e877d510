//! Canvas dimensions and size utilities

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference resolution of the drawing coordinate space (CSS pixels per inch)
pub const BASE_DPI: f64 = 96.0;

/// Canvas dimensions structure
///
/// Represents the width and height of the poster drawing surface in
/// unscaled pixels. Export at higher DPI scales these by [`CanvasSize::dpi_scale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl CanvasSize {
    /// Create a new CanvasSize
    pub fn from_width_height(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Length of the shorter side
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height) as f64
    }

    /// Center point of the canvas
    pub fn center(&self) -> (f64, f64) {
        (self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// True when either side is zero
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Scale factor from the drawing coordinate space to an output DPI
    pub fn dpi_scale(dpi: f64) -> f64 {
        if dpi.is_finite() && dpi > 0.0 {
            dpi / BASE_DPI
        } else {
            1.0
        }
    }

    /// Pixel dimensions after applying a scale factor (at least 1x1)
    pub fn scaled(&self, scale: f64) -> CanvasSize {
        let scale_side = |side: u32| ((side as f64 * scale).round() as u32).max(1);
        CanvasSize {
            width: scale_side(self.width),
            height: scale_side(self.height),
        }
    }

    /// Convert to tuple (width, height)
    pub fn to_tuple(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl From<(u32, u32)> for CanvasSize {
    fn from(dimensions: (u32, u32)) -> Self {
        Self::from_width_height(dimensions.0, dimensions.1)
    }
}

impl From<CanvasSize> for (u32, u32) {
    fn from(size: CanvasSize) -> Self {
        size.to_tuple()
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpi_scaling() {
        let size = CanvasSize::from_width_height(800, 1000);
        assert_eq!(CanvasSize::dpi_scale(96.0), 1.0);
        assert_eq!(CanvasSize::dpi_scale(300.0), 3.125);
        assert_eq!(CanvasSize::dpi_scale(0.0), 1.0);
        assert_eq!(size.scaled(3.125).to_tuple(), (2500, 3125));
        assert_eq!(size.to_string(), "800x1000");
    }
}
