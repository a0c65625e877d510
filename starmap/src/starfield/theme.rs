//! Per-style palettes, backdrops and placement rules

use super::placement::Placement;
use super::StarStyle;
use crate::color::Color;

const STANDARD: &[Color] = &[
    Color::WHITE,
    Color::rgb(255, 251, 230),
    Color::rgb(230, 240, 255),
];

/// Spectral classes O through M
const SPECTRAL: &[Color] = &[
    Color::rgb(155, 176, 255),
    Color::rgb(170, 191, 255),
    Color::rgb(202, 215, 255),
    Color::rgb(248, 247, 255),
    Color::rgb(255, 244, 234),
    Color::rgb(255, 210, 161),
    Color::rgb(255, 204, 111),
];

const COOL: &[Color] = &[Color::WHITE, Color::rgb(223, 232, 255)];

const NEBULA: &[Color] = &[
    Color::WHITE,
    Color::rgb(255, 214, 245),
    Color::rgb(201, 215, 255),
];

const GALAXY: &[Color] = &[
    Color::WHITE,
    Color::rgb(255, 241, 208),
    Color::rgb(208, 224, 255),
];

const MILKY_WAY: &[Color] = &[
    Color::WHITE,
    Color::rgb(245, 240, 230),
    Color::rgb(224, 232, 255),
];

const AURORA: &[Color] = &[Color::WHITE, Color::rgb(224, 255, 232)];

const DEEP_SPACE: &[Color] = &[
    Color::rgb(223, 230, 255),
    Color::WHITE,
    Color::rgb(184, 196, 255),
];

const SEPIA: &[Color] = &[
    Color::rgb(243, 226, 192),
    Color::rgb(232, 210, 166),
    Color::rgb(255, 243, 218),
];

const MONO: &[Color] = &[Color::WHITE];

const NEBULA_CLOUDS: &[Color] = &[
    Color::rgb(255, 79, 163),
    Color::rgb(122, 92, 255),
    Color::rgb(47, 212, 255),
];

const AURORA_CURTAINS: &[Color] = &[Color::rgb(61, 255, 154), Color::rgb(123, 92, 255)];

/// Treatment painted over the flat star-field color before the stars
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backdrop {
    Flat,
    /// Vertical linear gradient fading to `tint` at the bottom
    Toned { tint: Color },
    /// Radial glow around the region center, `extent` a fraction of the
    /// shorter side
    CoreGlow { tint: Color, extent: f64 },
    /// Soft noise-modulated clouds in the given colors
    Clouds { colors: &'static [Color], count: usize },
    /// Noise-modulated haze along the diagonal star band
    Band { color: Color },
    /// Wavy vertical-gradient curtains across the upper half
    Aurora { colors: &'static [Color] },
}

/// Distribution of star radii before the size multiplier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusProfile {
    /// `U(0, 1.5)`
    Uniform,
    /// `1.5 * U^3`: mostly faint points with a few large stars
    PowerLaw,
    /// `U(0, 1.5)` scaled down for dense faint fields
    Faint,
}

impl RadiusProfile {
    pub fn radius(&self, u: f64) -> f64 {
        match self {
            RadiusProfile::Uniform => u * 1.5,
            RadiusProfile::PowerLaw => 1.5 * u.powi(3),
            RadiusProfile::Faint => u * 1.5 * 0.6,
        }
    }
}

/// Everything that distinguishes one star style from another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub palette: &'static [Color],
    pub backdrop: Backdrop,
    pub placement: Placement,
    pub radius_profile: RadiusProfile,
    /// Multiplier applied to the requested star count
    pub count_factor: f64,
    pub bright_stars: bool,
    pub glow: bool,
    /// Draw the constellation overlay even when the options disable it
    pub force_constellations: bool,
}

const BASE: Theme = Theme {
    palette: STANDARD,
    backdrop: Backdrop::Flat,
    placement: Placement::Uniform,
    radius_profile: RadiusProfile::Uniform,
    count_factor: 1.0,
    bright_stars: true,
    glow: true,
    force_constellations: false,
};

impl Theme {
    pub fn for_style(style: StarStyle) -> Theme {
        match style {
            StarStyle::Standard => BASE,
            StarStyle::Realistic => Theme {
                palette: SPECTRAL,
                radius_profile: RadiusProfile::PowerLaw,
                count_factor: 1.5,
                ..BASE
            },
            StarStyle::Constellation => Theme {
                palette: COOL,
                count_factor: 0.7,
                force_constellations: true,
                ..BASE
            },
            StarStyle::Nebula => Theme {
                palette: NEBULA,
                backdrop: Backdrop::Clouds {
                    colors: NEBULA_CLOUDS,
                    count: 14,
                },
                ..BASE
            },
            StarStyle::Galaxy => Theme {
                palette: GALAXY,
                backdrop: Backdrop::CoreGlow {
                    tint: Color::rgb(255, 233, 176),
                    extent: 0.3,
                },
                placement: Placement::Spiral { spread: 0.25 },
                count_factor: 1.5,
                ..BASE
            },
            StarStyle::MilkyWay => Theme {
                palette: MILKY_WAY,
                backdrop: Backdrop::Band {
                    color: Color::rgb(240, 232, 255),
                },
                placement: Placement::DiagonalBand {
                    width: 0.12,
                    spread: 0.35,
                },
                count_factor: 2.0,
                radius_profile: RadiusProfile::Faint,
                ..BASE
            },
            StarStyle::NorthernLights => Theme {
                palette: AURORA,
                backdrop: Backdrop::Aurora {
                    colors: AURORA_CURTAINS,
                },
                count_factor: 0.8,
                ..BASE
            },
            StarStyle::DeepSpace => Theme {
                palette: DEEP_SPACE,
                backdrop: Backdrop::CoreGlow {
                    tint: Color::rgb(27, 31, 74),
                    extent: 0.6,
                },
                radius_profile: RadiusProfile::Faint,
                count_factor: 2.5,
                ..BASE
            },
            StarStyle::Vintage => Theme {
                palette: SEPIA,
                backdrop: Backdrop::Toned {
                    tint: Color::rgb(112, 66, 20),
                },
                glow: false,
                ..BASE
            },
            StarStyle::Minimalist => Theme {
                palette: MONO,
                count_factor: 0.4,
                bright_stars: false,
                glow: false,
                ..BASE
            },
        }
    }
}
