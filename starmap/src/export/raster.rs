//! Raster export: SVG document -> resvg pixmap -> PNG/JPEG bytes

use crate::canvas_size::CanvasSize;
use crate::color::Color;
use crate::error::{PosterError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use once_cell::sync::Lazy;
use std::io::Cursor;
use std::sync::Arc;
use tiny_skia::{Pixmap, PixmapPaint, Transform};
use usvg::{fontdb, Options, Tree};

/// JPEG quality used for every JPEG export
pub const JPEG_QUALITY: u8 = 90;

/// System fonts, loaded once on first raster export
static FONT_DATABASE: Lazy<Arc<fontdb::Database>> = Lazy::new(|| {
    let mut fontdb = fontdb::Database::new();
    fontdb.load_system_fonts();
    log::debug!("Loaded {} font faces", fontdb.len());
    Arc::new(fontdb)
});

fn svg_options() -> Options<'static> {
    Options {
        fontdb: Arc::clone(&FONT_DATABASE),
        ..Options::default()
    }
}

/// Render an SVG document drawn at `size` into a pixmap scaled by `scale`
pub fn rasterize(svg: &str, size: CanvasSize, scale: f64) -> Result<Pixmap> {
    let tree = Tree::from_str(svg, &svg_options())?;

    let target = size.scaled(scale);
    let mut pixmap = Pixmap::new(target.width, target.height).ok_or(
        PosterError::SurfaceAllocation {
            width: target.width,
            height: target.height,
        },
    )?;

    let sx = target.width as f32 / size.width.max(1) as f32;
    let sy = target.height as f32 / size.height.max(1) as f32;
    resvg::render(&tree, Transform::from_scale(sx, sy), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Composite a solid color underneath every pixel (destination-over)
pub fn flatten(pixmap: &Pixmap, background: Color) -> Result<Pixmap> {
    let mut flattened = Pixmap::new(pixmap.width(), pixmap.height()).ok_or(
        PosterError::SurfaceAllocation {
            width: pixmap.width(),
            height: pixmap.height(),
        },
    )?;
    flattened.fill(tiny_skia::Color::from_rgba8(
        background.r,
        background.g,
        background.b,
        255,
    ));
    flattened.draw_pixmap(
        0,
        0,
        pixmap.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    Ok(flattened)
}

/// Convert premultiplied pixmap pixels to a straight-alpha RGBA image
pub fn to_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).ok_or(
        PosterError::SurfaceAllocation {
            width: pixmap.width(),
            height: pixmap.height(),
        },
    )
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// JPEG has no alpha channel; callers flatten first
pub fn encode_jpeg(image: &RgbaImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY).encode_image(&rgb)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect x="0" y="0" width="5" height="10" fill="#ff0000"/></svg>"##;

    #[test]
    fn test_rasterize_scales_output() {
        let size = CanvasSize::from_width_height(10, 10);
        let pixmap = rasterize(SQUARE, size, 3.0).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (30, 30));

        let image = to_rgba_image(&pixmap).unwrap();
        assert_eq!(image.get_pixel(2, 15).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(27, 15).0[3], 0);
    }

    #[test]
    fn test_flatten_fills_transparent_pixels_only() {
        let size = CanvasSize::from_width_height(10, 10);
        let pixmap = rasterize(SQUARE, size, 1.0).unwrap();
        let flat = to_rgba_image(&flatten(&pixmap, Color::rgb(0, 0, 255)).unwrap()).unwrap();
        assert_eq!(flat.get_pixel(1, 5).0, [255, 0, 0, 255]);
        assert_eq!(flat.get_pixel(8, 5).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_invalid_svg_is_an_error() {
        let result = rasterize("<svg", CanvasSize::from_width_height(10, 10), 1.0);
        assert!(matches!(result, Err(PosterError::Svg(_))));
    }

    #[test]
    fn test_encoders_emit_magic_bytes() {
        let image = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
        assert!(encode_png(&image).unwrap().starts_with(&[0x89, b'P', b'N', b'G']));
        assert!(encode_jpeg(&image).unwrap().starts_with(&[0xFF, 0xD8]));
    }
}
