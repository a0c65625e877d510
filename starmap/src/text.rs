//! Text layers stacked above and below the poster circle(s)
//!
//! "Below" layers walk down from `bottom + margin` in ascending `order`;
//! "above" layers walk up from `top - margin` in descending `order`, so the
//! highest-order layer ends up closest to the circle. Each layer advances
//! the cursor by `font_size * 1.2` whether or not it fits. Layers whose
//! baseline falls outside the canvas are skipped and reported, never fatal.

use crate::canvas_size::CanvasSize;
use crate::color::Color;
use crate::scene::{Font, Layer, TextAnchor, TextNode};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Baseline advance per layer, as a multiple of the font size
pub const LINE_SPACING: f64 = 1.2;

/// Which side of the circle a text layer stacks on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Above,
    #[default]
    Below,
}

/// One user-configured line of poster text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextLayer {
    pub text: String,
    pub font_family: String,
    pub font_size_px: f64,
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
    pub order: i32,
    pub position: TextPosition,
}

impl Default for TextLayer {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_family: "Georgia".to_string(),
            font_size_px: 24.0,
            color: Color::WHITE,
            bold: false,
            italic: false,
            order: 0,
            position: TextPosition::Below,
        }
    }
}

impl TextLayer {
    pub fn new(text: impl Into<String>, position: TextPosition, order: i32) -> Self {
        Self {
            text: text.into(),
            position,
            order,
            ..Default::default()
        }
    }

    pub fn with_font(mut self, family: impl Into<String>, size_px: f64) -> Self {
        self.font_family = family.into();
        self.font_size_px = size_px;
        self
    }

    pub fn font(&self) -> Font {
        Font {
            family: self.font_family.clone(),
            size_px: self.font_size_px,
            bold: self.bold,
            italic: self.italic,
        }
    }

    fn advance(&self) -> f64 {
        self.font_size_px.max(0.0) * LINE_SPACING
    }
}

/// A layer that fits on the canvas, by index into the input slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedText {
    pub index: usize,
    pub baseline: f64,
}

/// A layer dropped because its baseline fell outside the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedText {
    pub text: String,
    pub baseline: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    pub placed: Vec<PlacedText>,
    pub skipped: Vec<SkippedText>,
}

/// Compute baselines for every non-empty layer.
///
/// `top` and `bottom` are the vertical extent of the circle(s); for
/// combined layouts they span both circles.
pub fn layout_text_layers(
    layers: &[TextLayer],
    top: f64,
    bottom: f64,
    margin: f64,
    canvas_height: f64,
) -> TextLayout {
    let mut layout = TextLayout::default();

    let mut below: Vec<(usize, &TextLayer)> = layers
        .iter()
        .enumerate()
        .filter(|(_, l)| l.position == TextPosition::Below && !l.text.trim().is_empty())
        .collect();
    below.sort_by_key(|(_, l)| l.order);

    let mut above: Vec<(usize, &TextLayer)> = layers
        .iter()
        .enumerate()
        .filter(|(_, l)| l.position == TextPosition::Above && !l.text.trim().is_empty())
        .collect();
    above.sort_by_key(|(_, l)| Reverse(l.order));

    let mut place = |index: usize, layer: &TextLayer, baseline: f64| {
        if (0.0..=canvas_height).contains(&baseline) {
            layout.placed.push(PlacedText { index, baseline });
        } else {
            log::warn!(
                "Skipping text layer {:?}: baseline {:.1} is outside the canvas (height {:.0})",
                layer.text,
                baseline,
                canvas_height
            );
            layout.skipped.push(SkippedText {
                text: layer.text.clone(),
                baseline,
            });
        }
    };

    let mut cursor = bottom + margin;
    for (index, layer) in below {
        place(index, layer, cursor);
        cursor += layer.advance();
    }

    let mut cursor = top - margin;
    for (index, layer) in above {
        place(index, layer, cursor);
        cursor -= layer.advance();
    }

    layout
}

/// Lay out and draw text layers centered horizontally on the canvas.
///
/// Returns the layers that were skipped.
pub fn draw_text_layers(
    target: &mut Layer,
    layers: &[TextLayer],
    top: f64,
    bottom: f64,
    margin: f64,
    canvas: CanvasSize,
) -> Vec<SkippedText> {
    let layout = layout_text_layers(layers, top, bottom, margin, canvas.height as f64);
    let (center_x, _) = canvas.center();

    for placed in &layout.placed {
        let layer = &layers[placed.index];
        target.text(TextNode {
            x: center_x,
            y: placed.baseline,
            content: layer.text.clone(),
            font: layer.font(),
            color: layer.color,
            anchor: TextAnchor::Middle,
        });
    }

    layout.skipped
}
