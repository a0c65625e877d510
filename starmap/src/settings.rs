//! Persisted form values and their validation into a [`RenderRequest`]
//!
//! `PosterSettings` is the JSON view model of every poster option. Missing
//! keys fall back to defaults field by field, so settings saved by an older
//! build still load.

use crate::canvas_size::{CanvasSize, BASE_DPI};
use crate::color::Color;
use crate::error::{PosterError, Result};
use crate::export::{download_filename, ExportFormat, ExportOptions};
use crate::request::{Layout, RenderRequest, DEFAULT_TEXT_MARGIN};
use crate::scene::Font;
use crate::starfield::{StarFieldOptions, StarStyle};
use crate::text::TextLayer;
use ephemeris::{format_date, format_dmm, parse_iso_date, Axis};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PosterSettings {
    pub title: String,
    /// ISO date (`YYYY-MM-DD` or an RFC 3339 timestamp)
    pub date: String,
    /// Decimal degrees or DMM, e.g. `N40° 42.768′`
    pub latitude: String,
    pub longitude: String,
    pub text_layers: Vec<TextLayer>,
    pub show_date: bool,
    pub show_coordinates: bool,
    pub caption_font_family: String,
    pub caption_font_size: f64,
    pub caption_color: Color,
    pub background_color: Color,
    pub star_field_color: Color,
    pub border_color: Color,
    pub border_width: f64,
    pub circle_radius_percent: f64,
    pub text_margin: f64,
    pub fallback_color: Color,
    pub width: u32,
    pub height: u32,
    pub dpi: f64,
    pub format: ExportFormat,
    /// Flatten PNG exports over the background color
    pub opaque_png: bool,
    pub style: StarStyle,
    pub star_options: StarFieldOptions,
    pub layout: Layout,
    pub seed: Option<u64>,
}

impl Default for PosterSettings {
    fn default() -> Self {
        let request = RenderRequest::default();
        Self {
            title: "Our Night Sky".to_string(),
            date: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            text_layers: Vec::new(),
            show_date: true,
            show_coordinates: true,
            caption_font_family: request.caption_font.family,
            caption_font_size: request.caption_font.size_px,
            caption_color: request.caption_color,
            background_color: request.background_color,
            star_field_color: request.star_field_color,
            border_color: request.border_color,
            border_width: request.border_width,
            circle_radius_percent: request.circle_radius_percent,
            text_margin: DEFAULT_TEXT_MARGIN,
            fallback_color: request.fallback_color,
            width: request.canvas.width,
            height: request.canvas.height,
            dpi: BASE_DPI,
            format: ExportFormat::Png,
            opaque_png: false,
            style: StarStyle::Standard,
            star_options: StarFieldOptions::default(),
            layout: Layout::default(),
            seed: None,
        }
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PosterError::InvalidInput(format!("{field} is required")));
    }
    Ok(value)
}

impl PosterSettings {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Parsed `(latitude, longitude)` in decimal degrees
    pub fn coordinates(&self) -> Result<(f64, f64)> {
        let parse = |raw: &str, axis: Axis| -> Result<f64> {
            let raw = required(raw, &axis.to_string())?;
            axis.parse(raw)
                .map_err(|e| PosterError::InvalidInput(format!("invalid {axis}: {e}")))
        };
        Ok((
            parse(&self.latitude, Axis::Latitude)?,
            parse(&self.longitude, Axis::Longitude)?,
        ))
    }

    /// `Thursday, 25th December, 2025` style caption for the settings date
    pub fn date_caption(&self) -> Result<String> {
        let date = required(&self.date, "date")?;
        format_date(date).map_err(|e| PosterError::InvalidInput(format!("invalid date: {e}")))
    }

    /// `N40° 42.76800′ W74° 00.36000′` style caption
    pub fn coordinates_caption(&self) -> Result<String> {
        let (latitude, longitude) = self.coordinates()?;
        Ok(format!(
            "{} {}",
            format_dmm(latitude, Axis::Latitude),
            format_dmm(longitude, Axis::Longitude)
        ))
    }

    /// Validate every field and build the immutable request for one render.
    ///
    /// Date and coordinates are always validated, even when their captions
    /// are hidden.
    pub fn to_render_request(&self) -> Result<RenderRequest> {
        let date_caption = self.date_caption()?;
        let coords_caption = self.coordinates_caption()?;

        if self.width == 0 || self.height == 0 {
            return Err(PosterError::InvalidInput(format!(
                "output size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        Ok(RenderRequest {
            canvas: CanvasSize::from_width_height(self.width, self.height),
            background_color: self.background_color,
            star_field_color: self.star_field_color,
            style: self.style,
            star_options: self.star_options.clone(),
            circle_radius_percent: self.circle_radius_percent,
            border_width: self.border_width,
            border_color: self.border_color,
            text_layers: self.text_layers.clone(),
            date_text: if self.show_date {
                date_caption
            } else {
                String::new()
            },
            coords_text: if self.show_coordinates {
                coords_caption
            } else {
                String::new()
            },
            caption_font: Font {
                family: self.caption_font_family.clone(),
                size_px: self.caption_font_size,
                bold: false,
                italic: false,
            },
            caption_color: self.caption_color,
            text_margin: self.text_margin,
            layout: self.layout.clone(),
            fallback_color: self.fallback_color,
            seed: self.seed,
        })
    }

    pub fn export_options(&self) -> ExportOptions {
        let options = ExportOptions::new(self.format).with_dpi(self.dpi);
        if self.format == ExportFormat::Jpeg || self.opaque_png {
            options.with_flatten(self.background_color)
        } else {
            options
        }
    }

    /// Suggested download name, `{title}_{yyyy-mm-dd}.{ext}`
    pub fn download_filename(&self) -> Result<String> {
        let date = parse_iso_date(required(&self.date, "date")?)
            .map_err(|e| PosterError::InvalidInput(format!("invalid date: {e}")))?;
        Ok(download_filename(&self.title, date, self.format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_york() -> PosterSettings {
        PosterSettings {
            date: "2025-12-25".to_string(),
            latitude: "40.7128".to_string(),
            longitude: "W74° 00.36000′".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_request_carries_captions() {
        let request = new_york().to_render_request().unwrap();
        assert_eq!(request.date_text, "Thursday, 25th December, 2025");
        assert_eq!(request.coords_text, "N40° 42.76800′ W74° 00.36000′");
        assert_eq!(request.canvas, CanvasSize::from_width_height(800, 1000));
    }

    #[test]
    fn test_hidden_captions_are_still_validated() {
        let settings = PosterSettings {
            show_date: false,
            show_coordinates: false,
            ..new_york()
        };
        let request = settings.to_render_request().unwrap();
        assert!(request.date_text.is_empty());
        assert!(request.coords_text.is_empty());

        let broken = PosterSettings {
            date: "2025-13-45".to_string(),
            show_date: false,
            ..new_york()
        };
        assert!(matches!(
            broken.to_render_request(),
            Err(PosterError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        for settings in [
            PosterSettings {
                date: " ".to_string(),
                ..new_york()
            },
            PosterSettings {
                latitude: String::new(),
                ..new_york()
            },
            PosterSettings {
                longitude: "E200".to_string(),
                ..new_york()
            },
            PosterSettings {
                latitude: "E10".to_string(),
                ..new_york()
            },
            PosterSettings {
                width: 0,
                ..new_york()
            },
        ] {
            let result = settings.to_render_request();
            assert!(matches!(result, Err(PosterError::InvalidInput(_))), "{result:?}");
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r##"{"title": "Anniversary", "starOptions": {"starCount": 50}, "style": "milky-way"}"##;
        let settings: PosterSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.title, "Anniversary");
        assert_eq!(settings.star_options.star_count, 50);
        assert_eq!(settings.star_options.size_multiplier, 1.0);
        assert_eq!(settings.style, StarStyle::MilkyWay);
        assert_eq!(settings.width, 800);
        assert!(settings.show_date);
    }

    #[test]
    fn test_export_options_flatten_jpeg_over_background() {
        let settings = PosterSettings {
            format: ExportFormat::Jpeg,
            dpi: 300.0,
            ..new_york()
        };
        let options = settings.export_options();
        assert_eq!(options.flatten, Some(settings.background_color));
        assert_eq!(options.dpi, 300.0);
        assert_eq!(
            settings.download_filename().unwrap(),
            "Our_Night_Sky_2025-12-25.jpg"
        );
    }
}
