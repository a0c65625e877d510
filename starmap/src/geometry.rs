//! Circle, cover-fit and combined-layout geometry.
//!
//! The poster circle is specified as a percentage of the canvas' shorter
//! side. On a non-square canvas the radii are stretched along the longer
//! axis so that `radius_x / radius_y` equals `width / height`; when the
//! canvas is presented in a square preview frame the clip reads as a true
//! circle.

use crate::canvas_size::CanvasSize;
use crate::scene::Shape;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn to_shape(&self) -> Shape {
        Shape::Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Elliptical clip region that renders visually circular
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
}

impl Circle {
    /// Circle centered on a canvas, sized as a percentage of its shorter side
    pub fn from_canvas(size: CanvasSize, radius_percent: f64) -> Self {
        let (center_x, center_y) = size.center();
        Self::in_region(
            center_x,
            center_y,
            size.width as f64,
            size.height as f64,
            radius_percent,
        )
    }

    /// Circle centered at a point, sized from a `width`x`height` region.
    ///
    /// `visual = min(w, h) * pct / 100 / 2`; the radius along the longer axis
    /// is stretched by the region's aspect ratio.
    pub fn in_region(center_x: f64, center_y: f64, width: f64, height: f64, radius_percent: f64) -> Self {
        let visual_radius = width.min(height) * radius_percent.max(0.0) / 100.0 / 2.0;
        let aspect = width / height;

        let (radius_x, radius_y) = if width > height {
            (visual_radius * aspect, visual_radius)
        } else if height > width {
            (visual_radius, visual_radius / aspect)
        } else {
            (visual_radius, visual_radius)
        };

        Self {
            center_x,
            center_y,
            radius_x,
            radius_y,
        }
    }

    pub fn top(&self) -> f64 {
        self.center_y - self.radius_y
    }

    pub fn bottom(&self) -> f64 {
        self.center_y + self.radius_y
    }

    /// Bounding box of the ellipse
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center_x - self.radius_x,
            self.center_y - self.radius_y,
            self.radius_x * 2.0,
            self.radius_y * 2.0,
        )
    }

    pub fn to_shape(&self) -> Shape {
        Shape::Ellipse {
            cx: self.center_x,
            cy: self.center_y,
            rx: self.radius_x,
            ry: self.radius_y,
        }
    }

    /// Same radii, moved to a new center
    pub fn moved_to(&self, center_x: f64, center_y: f64) -> Circle {
        Circle {
            center_x,
            center_y,
            ..*self
        }
    }
}

/// Placement of a scaled source image inside a target box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverFit {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale: f64,
}

/// Scale a `src_width`x`src_height` image uniformly so it covers `target`
/// entirely, centered. The image may be cropped but never letterboxed.
pub fn cover_fit(src_width: f64, src_height: f64, target: Rect) -> CoverFit {
    let scale = (target.width / src_width).max(target.height / src_height);
    let width = src_width * scale;
    let height = src_height * scale;
    let (cx, cy) = target.center();
    CoverFit {
        x: cx - width / 2.0,
        y: cy - height / 2.0,
        width,
        height,
        scale,
    }
}

/// Axis along which combined layouts place their two circles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Side by side
    Landscape,
    /// Stacked
    Portrait,
}

/// Two circles for a combined layout, in draw order.
///
/// Each circle is sized from its half of the canvas, then the pair is
/// centered with a center distance of `2r * (1 - overlap/100)` along the
/// layout axis, so 0% overlap makes the circles touch.
pub fn combined_circles(
    size: CanvasSize,
    radius_percent: f64,
    orientation: Orientation,
    overlap_percent: f64,
) -> [Circle; 2] {
    let (cx, cy) = size.center();
    let width = size.width as f64;
    let height = size.height as f64;
    let overlap = overlap_percent.clamp(0.0, 100.0) / 100.0;

    match orientation {
        Orientation::Landscape => {
            let base = Circle::in_region(cx, cy, width / 2.0, height, radius_percent);
            let offset = base.radius_x * (1.0 - overlap);
            [base.moved_to(cx - offset, cy), base.moved_to(cx + offset, cy)]
        }
        Orientation::Portrait => {
            let base = Circle::in_region(cx, cy, width, height / 2.0, radius_percent);
            let offset = base.radius_y * (1.0 - overlap);
            [base.moved_to(cx, cy - offset), base.moved_to(cx, cy + offset)]
        }
    }
}
