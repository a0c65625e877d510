//! Backdrop treatments painted under the stars

use super::noise::{gaussian, ValueNoise};
use super::placement::uniform_point;
use super::theme::Backdrop;
use crate::color::Color;
use crate::geometry::Rect;
use crate::scene::{GradientStop, Layer, Paint, PathData, Shape};
use rand::Rng;
use std::f64::consts::PI;

const BAND_BLOBS: usize = 24;
const AURORA_SAMPLES: usize = 48;

/// Fill `region` with the flat base color, then apply the style's treatment
pub fn draw_backdrop(
    layer: &mut Layer,
    region: Rect,
    backdrop: Backdrop,
    base: Color,
    rng: &mut impl Rng,
) {
    layer.fill(region.to_shape(), Paint::Solid(base), 1.0);

    match backdrop {
        Backdrop::Flat => {}
        Backdrop::Toned { tint } => toned(layer, region, tint),
        Backdrop::CoreGlow { tint, extent } => core_glow(layer, region, tint, extent),
        Backdrop::Clouds { colors, count } => clouds(layer, region, colors, count, rng),
        Backdrop::Band { color } => band(layer, region, color, rng),
        Backdrop::Aurora { colors } => aurora(layer, region, colors, rng),
    }
}

fn fade(color: Color, peak: f64) -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, color.with_opacity(peak)),
        GradientStop::new(1.0, color.with_opacity(0.0)),
    ]
}

fn toned(layer: &mut Layer, region: Rect, tint: Color) {
    let (cx, _) = region.center();
    layer.fill(
        region.to_shape(),
        Paint::LinearGradient {
            x1: cx,
            y1: region.y,
            x2: cx,
            y2: region.y + region.height,
            stops: vec![
                GradientStop::new(0.0, tint.with_opacity(0.1)),
                GradientStop::new(1.0, tint.with_opacity(0.45)),
            ],
        },
        1.0,
    );
}

fn core_glow(layer: &mut Layer, region: Rect, tint: Color, extent: f64) {
    let (cx, cy) = region.center();
    let r = region.min_side() * extent;
    if r <= 0.0 {
        return;
    }
    layer.fill(
        Shape::Circle { cx, cy, r },
        Paint::RadialGradient {
            cx,
            cy,
            r,
            stops: fade(tint, 0.55),
        },
        1.0,
    );
}

fn soft_blob(layer: &mut Layer, cx: f64, cy: f64, r: f64, color: Color, peak: f64) {
    if r <= 0.0 || peak <= 0.0 {
        return;
    }
    layer.fill(
        Shape::Circle { cx, cy, r },
        Paint::RadialGradient {
            cx,
            cy,
            r,
            stops: fade(color, peak),
        },
        1.0,
    );
}

fn clouds(layer: &mut Layer, region: Rect, colors: &[Color], count: usize, rng: &mut impl Rng) {
    if colors.is_empty() {
        return;
    }
    let noise = ValueNoise::new(5, rng);
    let min_side = region.min_side();

    for i in 0..count {
        let (x, y) = uniform_point(region, rng);
        let u = (x - region.x) / region.width.max(f64::EPSILON);
        let v = (y - region.y) / region.height.max(f64::EPSILON);
        let strength = noise.sample(u, v);
        let r = min_side * (0.12 + 0.2 * rng.random::<f64>());
        soft_blob(layer, x, y, r, colors[i % colors.len()], 0.35 * strength);
    }
}

fn band(layer: &mut Layer, region: Rect, color: Color, rng: &mut impl Rng) {
    let noise = ValueNoise::new(6, rng);
    let min_side = region.min_side();

    for i in 0..BAND_BLOBS {
        let t = (i as f64 + 0.5) / BAND_BLOBS as f64;
        let x = region.x + t * region.width + gaussian(rng, min_side * 0.03);
        let y = region.y + t * region.height + gaussian(rng, min_side * 0.03);
        let r = min_side * (0.08 + 0.06 * rng.random::<f64>());
        let strength = noise.sample(t, rng.random());
        soft_blob(layer, x, y, r, color, 0.1 + 0.2 * strength);
    }
}

fn aurora(layer: &mut Layer, region: Rect, colors: &[Color], rng: &mut impl Rng) {
    let (cx, _) = region.center();
    let amplitude = region.height * 0.05;
    let curtain = region.height * 0.22;

    for (i, &color) in colors.iter().enumerate() {
        let baseline = region.y + region.height * (0.18 + 0.12 * i as f64);
        let phase = rng.random::<f64>() * 2.0 * PI;
        let frequency = 1.5 + rng.random::<f64>();

        let top: Vec<(f64, f64)> = (0..=AURORA_SAMPLES)
            .map(|s| {
                let t = s as f64 / AURORA_SAMPLES as f64;
                let x = region.x + t * region.width;
                (x, baseline + amplitude * (phase + frequency * 2.0 * PI * t).sin())
            })
            .collect();

        let mut path = PathData::polyline(&top, false);
        for &(x, y) in top.iter().rev() {
            path = path.line_to(x, y + curtain);
        }
        path = path.close();

        layer.fill(
            Shape::Path(path),
            Paint::LinearGradient {
                x1: cx,
                y1: baseline - amplitude,
                x2: cx,
                y2: baseline + amplitude + curtain,
                stops: fade(color, 0.5),
            },
            1.0,
        );
    }
}
