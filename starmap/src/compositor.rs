//! Circular composites: a source clipped to a poster circle plus its border

use crate::color::Color;
use crate::error::{PosterError, Result};
use crate::geometry::{cover_fit, Circle};
use crate::request::{CompositeSource, RenderRequest};
use crate::scene::{ImageNode, Layer, Paint, Stroke};
use crate::starfield::draw_star_field;
use image::{DynamicImage, ImageFormat};
use rand::Rng;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Decoded source image, re-encoded as PNG for embedding
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Arc<Vec<u8>>,
}

impl SourceImage {
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(Self {
            width: image.width(),
            height: image.height(),
            png_data: Arc::new(png),
        })
    }

    /// Load and decode any format the `image` crate understands
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|e| PosterError::ImageLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        if image.width() == 0 || image.height() == 0 {
            return Err(PosterError::ImageLoad {
                path: path.display().to_string(),
                reason: "image has no pixels".to_string(),
            });
        }
        Self::from_image(&image)
    }
}

/// A composite source after any image decoding has happened
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedSource {
    StarField,
    Image(SourceImage),
    /// The photo failed to load; draw a flat fallback shape instead
    Fallback,
}

/// Decode a source up front. Load failures are logged and become
/// [`ResolvedSource::Fallback`] so the circle is never left blank.
pub fn resolve_source(source: &CompositeSource) -> ResolvedSource {
    match source {
        CompositeSource::StarField => ResolvedSource::StarField,
        CompositeSource::Photo { path } => match SourceImage::load(path) {
            Ok(image) => {
                log::debug!(
                    "Loaded photo {} ({}x{})",
                    path.display(),
                    image.width,
                    image.height
                );
                ResolvedSource::Image(image)
            }
            Err(e) => {
                log::warn!("{e}; drawing fallback fill instead");
                ResolvedSource::Fallback
            }
        },
    }
}

/// Draw `source` clipped to `circle`, then the border on top.
///
/// The border is drawn outside the clip group so its outer half is not cut
/// off.
pub fn draw_circle_composite(
    layer: &mut Layer,
    circle: &Circle,
    source: &ResolvedSource,
    request: &RenderRequest,
    rng: &mut impl Rng,
) {
    let bounds = circle.bounds();

    layer.clipped(circle.to_shape(), |inner| match source {
        ResolvedSource::StarField => {
            draw_star_field(
                inner,
                bounds,
                request.style,
                &request.star_options,
                request.star_field_color,
                rng,
            );
        }
        ResolvedSource::Image(image) => {
            let fit = cover_fit(image.width as f64, image.height as f64, bounds);
            inner.image(ImageNode {
                x: fit.x,
                y: fit.y,
                width: fit.width,
                height: fit.height,
                png_data: Arc::clone(&image.png_data),
            });
        }
        ResolvedSource::Fallback => {
            inner.fill(circle.to_shape(), Paint::Solid(request.fallback_color), 1.0);
        }
    });

    draw_border(layer, circle, request.border_width, request.border_color);
}

/// Stroke the circle outline. A zero or negative width draws nothing.
pub fn draw_border(layer: &mut Layer, circle: &Circle, width: f64, color: Color) {
    if !(width.is_finite() && width > 0.0) {
        return;
    }
    layer.stroke(circle.to_shape(), Stroke { color, width }, 1.0);
}
