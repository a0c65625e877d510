//! Immutable description of a single poster render

use crate::canvas_size::CanvasSize;
use crate::color::Color;
use crate::geometry::Orientation;
use crate::scene::Font;
use crate::starfield::{StarFieldOptions, StarStyle};
use crate::text::TextLayer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default distance between the circle edge and the first text baseline
pub const DEFAULT_TEXT_MARGIN: f64 = 30.0;

/// What fills a poster circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CompositeSource {
    /// Procedurally generated star field
    StarField,
    /// Photograph or map image loaded from disk, cover-fitted to the circle
    Photo { path: PathBuf },
}

/// Arrangement of circles on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Layout {
    Single {
        source: CompositeSource,
    },
    /// Two circles along one axis; `first` is drawn underneath `second`
    Combined {
        orientation: Orientation,
        overlap_percent: f64,
        first: CompositeSource,
        second: CompositeSource,
    },
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Single {
            source: CompositeSource::StarField,
        }
    }
}

/// Everything needed to draw one poster.
///
/// Built fresh for each render (usually by
/// [`PosterSettings::to_render_request`](crate::settings::PosterSettings::to_render_request))
/// and never mutated while drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub canvas: CanvasSize,
    pub background_color: Color,
    pub star_field_color: Color,
    pub style: StarStyle,
    pub star_options: StarFieldOptions,
    /// Circle diameter as a percentage of the canvas' shorter side
    pub circle_radius_percent: f64,
    pub border_width: f64,
    pub border_color: Color,
    pub text_layers: Vec<TextLayer>,
    /// Long-form date caption, drawn after the user text layers
    pub date_text: String,
    /// DMM coordinate caption, drawn after the date caption
    pub coords_text: String,
    pub caption_font: Font,
    pub caption_color: Color,
    pub text_margin: f64,
    pub layout: Layout,
    /// Fill used when a photo source cannot be loaded
    pub fallback_color: Color,
    /// Fixed seed for reproducible star fields; `None` reseeds every render
    pub seed: Option<u64>,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::from_width_height(800, 1000),
            background_color: Color::rgb(11, 16, 38),
            star_field_color: Color::rgb(5, 8, 22),
            style: StarStyle::Standard,
            star_options: StarFieldOptions::default(),
            circle_radius_percent: 80.0,
            border_width: 2.0,
            border_color: Color::WHITE,
            text_layers: Vec::new(),
            date_text: String::new(),
            coords_text: String::new(),
            caption_font: Font {
                family: "Georgia".to_string(),
                size_px: 18.0,
                bold: false,
                italic: false,
            },
            caption_color: Color::WHITE,
            text_margin: DEFAULT_TEXT_MARGIN,
            layout: Layout::default(),
            fallback_color: Color::rgb(40, 44, 60),
            seed: None,
        }
    }
}

impl RenderRequest {
    /// User text layers followed by the date and coordinate captions.
    ///
    /// Captions stack below the circle after every user "below" layer.
    pub fn all_text_layers(&self) -> Vec<TextLayer> {
        let mut layers = self.text_layers.clone();
        let mut next_order = layers
            .iter()
            .map(|l| l.order)
            .max()
            .map_or(0, |max| max.saturating_add(1));

        for caption in [&self.date_text, &self.coords_text] {
            if caption.trim().is_empty() {
                continue;
            }
            layers.push(TextLayer {
                text: caption.clone(),
                font_family: self.caption_font.family.clone(),
                font_size_px: self.caption_font.size_px,
                color: self.caption_color,
                bold: self.caption_font.bold,
                italic: self.caption_font.italic,
                order: next_order,
                position: crate::text::TextPosition::Below,
            });
            next_order = next_order.saturating_add(1);
        }
        layers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::TextPosition;

    #[test]
    fn test_captions_follow_user_layers() {
        let request = RenderRequest {
            text_layers: vec![
                TextLayer::new("Title", TextPosition::Above, 3),
                TextLayer::new("Sub", TextPosition::Below, 7),
            ],
            date_text: "Thursday, 25th December, 2025".to_string(),
            coords_text: "N40° 42.76800′ W74° 00.36000′".to_string(),
            ..Default::default()
        };
        let layers = request.all_text_layers();
        assert_eq!(layers.len(), 4);
        assert_eq!(layers[2].order, 8);
        assert_eq!(layers[3].order, 9);
        assert_eq!(layers[3].position, TextPosition::Below);
        assert_eq!(layers[3].font_family, "Georgia");
    }

    #[test]
    fn test_layout_json_shape() {
        let layout = Layout::Combined {
            orientation: Orientation::Landscape,
            overlap_percent: 20.0,
            first: CompositeSource::Photo {
                path: PathBuf::from("map.png"),
            },
            second: CompositeSource::StarField,
        };
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mode": "combined",
                "orientation": "landscape",
                "overlapPercent": 20.0,
                "first": {"type": "photo", "path": "map.png"},
                "second": {"type": "star-field"}
            })
        );
        let back: Layout = serde_json::from_value(json).unwrap();
        assert_eq!(back, layout);
    }

    #[test]
    fn test_empty_captions_are_omitted() {
        let request = RenderRequest::default();
        assert!(request.all_text_layers().is_empty());
    }
}
