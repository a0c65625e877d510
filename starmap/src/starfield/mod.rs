//! Procedural star fields.
//!
//! A star field fills a rectangular region (the bounding box of a poster
//! circle) with a backdrop, randomly placed stars and an optional
//! constellation overlay. Each [`StarStyle`] picks a [`theme::Theme`]:
//! palette, backdrop treatment, placement rule and count/size profile.
//!
//! Generation never fails. Negative star counts draw nothing, counts above
//! [`MAX_STAR_COUNT`] are clamped to it and a negative
//! size multiplier collapses every radius to zero, which is skipped.
//!
//! All randomness comes from the caller's random source, so a seeded
//! [`ChaCha8Rng`] reproduces a field exactly:
//!
//! ```
//! use starmap::geometry::Rect;
//! use starmap::starfield::{generate_stars, random_source, StarFieldOptions, StarStyle};
//!
//! let region = Rect::new(0.0, 0.0, 400.0, 400.0);
//! let options = StarFieldOptions::default();
//! let a = generate_stars(region, StarStyle::Galaxy, &options, &mut random_source(Some(9)));
//! let b = generate_stars(region, StarStyle::Galaxy, &options, &mut random_source(Some(9)));
//! assert_eq!(a, b);
//! ```

mod backdrop;
pub mod constellations;
pub mod noise;
pub mod placement;
pub mod theme;

use crate::color::Color;
use crate::geometry::Rect;
use crate::scene::{Filter, Font, Layer};
use constellations::{draw_constellations, OverlayStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use theme::Theme;

/// Blur radius of the star glow filter, in canvas pixels
const GLOW_STD_DEVIATION: f64 = 1.5;

/// Opacity of bright stars
const BRIGHT_STAR_OPACITY: f64 = 0.95;

/// Largest requested star count honoured; larger requests are clamped
pub const MAX_STAR_COUNT: i32 = 20_000;

/// Named star-field looks
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum StarStyle {
    #[default]
    Standard,
    Realistic,
    Constellation,
    Nebula,
    Galaxy,
    MilkyWay,
    NorthernLights,
    DeepSpace,
    Vintage,
    Minimalist,
}

impl StarStyle {
    pub const ALL: [StarStyle; 10] = [
        StarStyle::Standard,
        StarStyle::Realistic,
        StarStyle::Constellation,
        StarStyle::Nebula,
        StarStyle::Galaxy,
        StarStyle::MilkyWay,
        StarStyle::NorthernLights,
        StarStyle::DeepSpace,
        StarStyle::Vintage,
        StarStyle::Minimalist,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StarStyle::Standard => "standard",
            StarStyle::Realistic => "realistic",
            StarStyle::Constellation => "constellation",
            StarStyle::Nebula => "nebula",
            StarStyle::Galaxy => "galaxy",
            StarStyle::MilkyWay => "milky-way",
            StarStyle::NorthernLights => "northern-lights",
            StarStyle::DeepSpace => "deep-space",
            StarStyle::Vintage => "vintage",
            StarStyle::Minimalist => "minimalist",
        }
    }
}

impl fmt::Display for StarStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Style options bag shared by every star style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StarFieldOptions {
    /// Requested number of regular stars before the style's count factor
    pub star_count: i32,
    pub size_multiplier: f64,
    pub glow_enabled: bool,
    pub constellations_enabled: bool,
    pub constellation_labels: bool,
    /// Stroke width of constellation segments
    pub line_width: f64,
}

impl Default for StarFieldOptions {
    fn default() -> Self {
        Self {
            star_count: 200,
            size_multiplier: 1.0,
            glow_enabled: true,
            constellations_enabled: false,
            constellation_labels: true,
            line_width: 1.0,
        }
    }
}

/// One generated star. `color_index` indexes the style's palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
    pub color_index: usize,
}

/// Random source for a render: seeded and reproducible, or fresh from the
/// thread RNG when no seed is given
pub fn random_source(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}

fn sanitized_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_finite() {
        multiplier.max(0.0)
    } else {
        0.0
    }
}

/// Number of regular stars a style draws for the requested count.
///
/// The request is clamped to `[0, MAX_STAR_COUNT]` before the style's count
/// factor is applied.
pub fn regular_star_count(style: StarStyle, options: &StarFieldOptions) -> usize {
    let factor = Theme::for_style(style).count_factor;
    let requested = options.star_count.clamp(0, MAX_STAR_COUNT);
    if requested < options.star_count {
        log::warn!(
            "Star count {} exceeds the maximum of {MAX_STAR_COUNT}; clamping",
            options.star_count
        );
    }
    (requested as f64 * factor).round() as usize
}

/// Generate the stars for one region. Stars with zero radius are dropped.
pub fn generate_stars(
    region: Rect,
    style: StarStyle,
    options: &StarFieldOptions,
    rng: &mut impl Rng,
) -> Vec<Star> {
    let theme = Theme::for_style(style);
    let multiplier = sanitized_multiplier(options.size_multiplier);
    let count = regular_star_count(style, options);
    let bright = if theme.bright_stars { count / 20 } else { 0 };

    let mut stars = Vec::with_capacity(count + bright);

    for _ in 0..count {
        let (x, y) = theme.placement.sample(region, rng);
        let radius = theme.radius_profile.radius(rng.random()) * multiplier;
        let opacity = 0.3 + 0.7 * rng.random::<f64>();
        let color_index = rng.random_range(0..theme.palette.len());
        if radius > 0.0 {
            stars.push(Star {
                x,
                y,
                radius,
                opacity,
                color_index,
            });
        }
    }

    for _ in 0..bright {
        let (x, y) = theme.placement.sample(region, rng);
        let radius = (1.5 + rng.random::<f64>() * 1.5) * multiplier;
        let color_index = rng.random_range(0..theme.palette.len());
        if radius > 0.0 {
            stars.push(Star {
                x,
                y,
                radius,
                opacity: BRIGHT_STAR_OPACITY,
                color_index,
            });
        }
    }

    stars
}

/// Draw a complete star field into `layer`: backdrop, stars (inside a glow
/// group when enabled) and the constellation overlay.
///
/// Returns the number of stars drawn.
pub fn draw_star_field(
    layer: &mut Layer,
    region: Rect,
    style: StarStyle,
    options: &StarFieldOptions,
    base_color: Color,
    rng: &mut impl Rng,
) -> usize {
    let theme = Theme::for_style(style);
    backdrop::draw_backdrop(layer, region, theme.backdrop, base_color, rng);

    let stars = generate_stars(region, style, options, rng);
    let glow = (options.glow_enabled && theme.glow).then_some(Filter::Glow {
        std_deviation: GLOW_STD_DEVIATION,
    });

    layer.group(None, glow, 1.0, |group| {
        for star in &stars {
            group.fill_circle(
                star.x,
                star.y,
                star.radius,
                theme.palette[star.color_index],
                star.opacity,
            );
        }
    });

    if options.constellations_enabled || theme.force_constellations {
        let ink = theme.palette[0];
        let overlay = OverlayStyle {
            line_color: ink.with_opacity(0.6),
            line_width: options.line_width,
            marker_color: ink,
            labels: options.constellation_labels,
            label_font: Font {
                family: "sans-serif".to_string(),
                size_px: (region.min_side() * 0.03).max(9.0).round(),
                bold: false,
                italic: false,
            },
        };
        draw_constellations(layer, region, &overlay);
    }

    log::debug!(
        "Drew {} star field with {} stars in {:.0}x{:.0} region",
        style,
        stars.len(),
        region.width,
        region.height
    );

    stars.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, Shape};

    fn region() -> Rect {
        Rect::new(0.0, 0.0, 300.0, 200.0)
    }

    #[test]
    fn test_standard_counts_include_bright_stars() {
        let options = StarFieldOptions {
            star_count: 100,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let stars = generate_stars(region(), StarStyle::Standard, &options, &mut rng);

        let bright = stars.iter().filter(|s| s.opacity == BRIGHT_STAR_OPACITY).count();
        assert_eq!(bright, 5);
        // Regular radii are U(0, 1.5), so at most a zero-radius draw goes missing
        assert!(stars.len() >= 104 && stars.len() <= 105);
        for star in &stars {
            assert!(star.radius > 0.0 && star.radius < 3.0);
            assert!(star.x >= 0.0 && star.x <= 300.0);
            assert!(star.y >= 0.0 && star.y <= 200.0);
        }
    }

    #[test]
    fn test_negative_inputs_draw_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let negative_count = StarFieldOptions {
            star_count: -50,
            ..Default::default()
        };
        assert!(generate_stars(region(), StarStyle::Standard, &negative_count, &mut rng).is_empty());

        let negative_size = StarFieldOptions {
            size_multiplier: -2.0,
            ..Default::default()
        };
        assert!(generate_stars(region(), StarStyle::Nebula, &negative_size, &mut rng).is_empty());
    }

    #[test]
    fn test_huge_star_count_is_clamped() {
        let options = StarFieldOptions {
            star_count: i32::MAX,
            ..Default::default()
        };
        let expected = regular_star_count(
            StarStyle::DeepSpace,
            &StarFieldOptions {
                star_count: MAX_STAR_COUNT,
                ..Default::default()
            },
        );
        assert_eq!(regular_star_count(StarStyle::DeepSpace, &options), expected);

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let stars = generate_stars(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            StarStyle::DeepSpace,
            &options,
            &mut rng,
        );
        assert!(stars.len() <= expected + expected / 20);
    }

    #[test]
    fn test_seeded_fields_are_reproducible() {
        let options = StarFieldOptions::default();
        for style in StarStyle::ALL {
            let mut a = Layer::new();
            let mut b = Layer::new();
            draw_star_field(&mut a, region(), style, &options, Color::BLACK, &mut random_source(Some(77)));
            draw_star_field(&mut b, region(), style, &options, Color::BLACK, &mut random_source(Some(77)));
            assert_eq!(a, b, "{style} is not reproducible");
        }
    }

    #[test]
    fn test_glow_wraps_stars_in_filtered_group() {
        let options = StarFieldOptions::default();
        let mut layer = Layer::new();
        let mut rng = random_source(Some(3));
        draw_star_field(&mut layer, region(), StarStyle::Standard, &options, Color::BLACK, &mut rng);
        assert_eq!(
            layer.count(|n| matches!(n, Node::Group(g) if g.filter.is_some())),
            1
        );

        let mut flat = Layer::new();
        draw_star_field(&mut flat, region(), StarStyle::Minimalist, &options, Color::BLACK, &mut rng);
        assert_eq!(flat.count(|n| matches!(n, Node::Group(g) if g.filter.is_some())), 0);
    }

    #[test]
    fn test_constellation_style_forces_overlay() {
        let options = StarFieldOptions {
            star_count: 0,
            constellations_enabled: false,
            ..Default::default()
        };
        let mut layer = Layer::new();
        let mut rng = random_source(Some(4));
        draw_star_field(&mut layer, region(), StarStyle::Constellation, &options, Color::BLACK, &mut rng);
        assert_eq!(layer.count(|n| matches!(n, Node::Shape { shape: Shape::Path(_), .. })), 4);

        let mut plain = Layer::new();
        draw_star_field(&mut plain, region(), StarStyle::Standard, &options, Color::BLACK, &mut rng);
        assert_eq!(plain.count(|n| matches!(n, Node::Shape { shape: Shape::Path(_), .. })), 0);
    }

    #[test]
    fn test_style_names_round_trip_through_serde() {
        for style in StarStyle::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.name()));
            assert_eq!(serde_json::from_str::<StarStyle>(&json).unwrap(), style);
        }
    }
}
