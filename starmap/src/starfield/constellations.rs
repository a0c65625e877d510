//! Fixed constellation catalog and its overlay drawing

use crate::color::Color;
use crate::geometry::Rect;
use crate::scene::{Font, Layer, PathData, Shape, Stroke, TextAnchor, TextNode};

/// A named stick figure. Points are normalized to the star-field region,
/// `(0, 0)` top-left and `(1, 1)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constellation {
    pub name: &'static str,
    pub points: &'static [(f64, f64)],
    /// Index pairs into `points`
    pub segments: &'static [(usize, usize)],
}

impl Constellation {
    /// Vertex positions mapped into `region`
    pub fn project(&self, region: Rect) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|&(u, v)| (region.x + u * region.width, region.y + v * region.height))
            .collect()
    }

    /// Average of the mapped vertices, used as the label anchor
    pub fn centroid(&self, region: Rect) -> (f64, f64) {
        let points = self.project(region);
        let n = points.len().max(1) as f64;
        let (sx, sy) = points
            .iter()
            .fold((0.0, 0.0), |(ax, ay), &(x, y)| (ax + x, ay + y));
        (sx / n, sy / n)
    }
}

pub const CATALOG: [Constellation; 4] = [
    Constellation {
        name: "Ursa Major",
        points: &[
            (0.12, 0.22),
            (0.20, 0.19),
            (0.27, 0.21),
            (0.33, 0.25),
            (0.34, 0.33),
            (0.43, 0.34),
            (0.44, 0.26),
        ],
        segments: &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 3)],
    },
    Constellation {
        name: "Orion",
        points: &[
            (0.60, 0.55),
            (0.76, 0.57),
            (0.66, 0.66),
            (0.68, 0.67),
            (0.70, 0.68),
            (0.61, 0.80),
            (0.77, 0.78),
        ],
        segments: &[(0, 2), (1, 4), (2, 3), (3, 4), (2, 5), (4, 6)],
    },
    Constellation {
        name: "Cassiopeia",
        points: &[
            (0.58, 0.14),
            (0.64, 0.22),
            (0.70, 0.16),
            (0.77, 0.23),
            (0.84, 0.15),
        ],
        segments: &[(0, 1), (1, 2), (2, 3), (3, 4)],
    },
    Constellation {
        name: "Cygnus",
        points: &[
            (0.25, 0.55),
            (0.25, 0.64),
            (0.25, 0.76),
            (0.15, 0.62),
            (0.35, 0.67),
        ],
        segments: &[(0, 1), (1, 2), (3, 1), (1, 4)],
    },
];

/// Styling of the constellation overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub line_color: Color,
    pub line_width: f64,
    pub marker_color: Color,
    pub labels: bool,
    pub label_font: Font,
}

/// Draw every catalog constellation as segments plus vertex markers
pub fn draw_constellations(layer: &mut Layer, region: Rect, style: &OverlayStyle) {
    let line_width = style.line_width.max(0.0);
    let marker_radius = line_width * 1.5 + 1.0;

    for constellation in CATALOG.iter() {
        let points = constellation.project(region);

        if line_width > 0.0 {
            let mut path = PathData::new();
            for &(a, b) in constellation.segments {
                let (ax, ay) = points[a];
                let (bx, by) = points[b];
                path = path.move_to(ax, ay).line_to(bx, by);
            }
            layer.stroke(
                Shape::Path(path),
                Stroke {
                    color: style.line_color,
                    width: line_width,
                },
                1.0,
            );
        }

        for &(x, y) in &points {
            layer.fill_circle(x, y, marker_radius, style.marker_color, 1.0);
        }

        if style.labels {
            let (x, y) = constellation.centroid(region);
            layer.text(TextNode {
                x,
                y: y - marker_radius - style.label_font.size_px * 0.6,
                content: constellation.name.to_string(),
                font: style.label_font.clone(),
                color: style.line_color,
                anchor: TextAnchor::Middle,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Node;

    fn overlay(labels: bool, line_width: f64) -> OverlayStyle {
        OverlayStyle {
            line_color: Color::rgba(255, 255, 255, 160),
            line_width,
            marker_color: Color::WHITE,
            labels,
            label_font: Font {
                family: "sans-serif".to_string(),
                size_px: 12.0,
                bold: false,
                italic: false,
            },
        }
    }

    #[test]
    fn test_catalog_segments_reference_valid_points() {
        for constellation in CATALOG.iter() {
            for &(a, b) in constellation.segments {
                assert!(a < constellation.points.len(), "{}", constellation.name);
                assert!(b < constellation.points.len(), "{}", constellation.name);
            }
            for &(u, v) in constellation.points {
                assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_overlay_draws_markers_and_labels() {
        let region = Rect::new(0.0, 0.0, 500.0, 500.0);
        let mut layer = Layer::new();
        draw_constellations(&mut layer, region, &overlay(true, 1.0));

        let vertices: usize = CATALOG.iter().map(|c| c.points.len()).sum();
        assert_eq!(
            layer.count(|n| matches!(n, Node::Shape { shape: Shape::Circle { .. }, .. })),
            vertices
        );
        assert_eq!(layer.count(|n| matches!(n, Node::Shape { shape: Shape::Path(_), .. })), 4);

        let mut labels = Vec::new();
        layer.visit(&mut |node| {
            if let Node::Text(text) = node {
                labels.push(text.content.clone());
            }
        });
        assert_eq!(labels, ["Ursa Major", "Orion", "Cassiopeia", "Cygnus"]);
    }

    #[test]
    fn test_zero_line_width_skips_segments() {
        let mut layer = Layer::new();
        draw_constellations(&mut layer, Rect::new(0.0, 0.0, 100.0, 100.0), &overlay(false, 0.0));
        assert_eq!(layer.count(|n| matches!(n, Node::Shape { shape: Shape::Path(_), .. })), 0);
        assert_eq!(layer.count(|n| matches!(n, Node::Text(_))), 0);
    }

    #[test]
    fn test_centroid_is_point_average() {
        let region = Rect::new(0.0, 0.0, 100.0, 100.0);
        let (x, y) = CATALOG[2].centroid(region);
        approx::assert_relative_eq!(x, 70.6, epsilon = 1e-9);
        approx::assert_relative_eq!(y, 18.0, epsilon = 1e-9);
    }
}
