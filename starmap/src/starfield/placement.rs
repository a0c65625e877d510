//! Star position sampling rules

use super::noise::gaussian;
use crate::geometry::Rect;
use rand::Rng;
use std::f64::consts::PI;

/// Number of arms in the galaxy spiral
const SPIRAL_ARMS: usize = 2;

/// Total winding of each arm, in radians
const SPIRAL_WINDING: f64 = 3.0 * PI;

/// Growth rate `b` of the logarithmic spiral `r = a * e^(b * theta)`
const SPIRAL_GROWTH: f64 = 0.3;

/// How star positions are distributed within a region
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Uniform,
    /// Logarithmic spiral arms around the region center. `spread` is the
    /// fraction of stars placed uniformly as a background population.
    Spiral { spread: f64 },
    /// Gaussian band along the top-left to bottom-right diagonal, `width`
    /// as a fraction of the region's shorter side
    DiagonalBand { width: f64, spread: f64 },
}

impl Placement {
    /// Sample one position. Always returns a point inside `region`.
    pub fn sample(&self, region: Rect, rng: &mut impl Rng) -> (f64, f64) {
        let point = match *self {
            Placement::Uniform => None,
            Placement::Spiral { spread } => {
                if rng.random::<f64>() < spread {
                    None
                } else {
                    Some(spiral_point(region, rng))
                }
            }
            Placement::DiagonalBand { width, spread } => {
                if rng.random::<f64>() < spread {
                    None
                } else {
                    Some(band_point(region, width, rng))
                }
            }
        };

        match point {
            Some((x, y)) if contains(region, x, y) => (x, y),
            _ => uniform_point(region, rng),
        }
    }
}

fn contains(region: Rect, x: f64, y: f64) -> bool {
    x >= region.x && x <= region.x + region.width && y >= region.y && y <= region.y + region.height
}

pub fn uniform_point(region: Rect, rng: &mut impl Rng) -> (f64, f64) {
    (
        region.x + rng.random::<f64>() * region.width,
        region.y + rng.random::<f64>() * region.height,
    )
}

fn spiral_point(region: Rect, rng: &mut impl Rng) -> (f64, f64) {
    let (cx, cy) = region.center();
    let outer_radius = region.min_side() / 2.0;

    let arm = rng.random_range(0..SPIRAL_ARMS);
    let theta = rng.random::<f64>() * SPIRAL_WINDING;
    // Normalized so the arm ends at the region's inscribed radius
    let r = outer_radius * (SPIRAL_GROWTH * (theta - SPIRAL_WINDING)).exp();
    let angle = theta + arm as f64 * 2.0 * PI / SPIRAL_ARMS as f64;

    // Arms thicken toward the rim
    let scatter = outer_radius * 0.04 + r * 0.12;
    (
        cx + r * angle.cos() + gaussian(rng, scatter),
        cy + r * angle.sin() + gaussian(rng, scatter),
    )
}

fn band_point(region: Rect, width: f64, rng: &mut impl Rng) -> (f64, f64) {
    let (cx, cy) = region.center();
    let diagonal = region.width.hypot(region.height);
    let (ux, uy) = (region.width / diagonal, region.height / diagonal);

    let along = (rng.random::<f64>() - 0.5) * diagonal;
    let across = gaussian(rng, width * region.min_side());
    (
        cx + ux * along - uy * across,
        cy + uy * along + ux * across,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_all_placements_stay_in_region() {
        let region = Rect::new(50.0, 80.0, 300.0, 200.0);
        let placements = [
            Placement::Uniform,
            Placement::Spiral { spread: 0.2 },
            Placement::DiagonalBand {
                width: 0.12,
                spread: 0.3,
            },
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for placement in placements {
            for _ in 0..2000 {
                let (x, y) = placement.sample(region, &mut rng);
                assert!(contains(region, x, y), "{placement:?} produced ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_band_concentrates_near_diagonal() {
        let region = Rect::new(0.0, 0.0, 400.0, 400.0);
        let placement = Placement::DiagonalBand {
            width: 0.05,
            spread: 0.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let near = (0..1000)
            .map(|_| placement.sample(region, &mut rng))
            .filter(|&(x, y)| (x - y).abs() / 2f64.sqrt() < 60.0)
            .count();
        assert!(near > 900, "only {near} of 1000 stars near the band");
    }
}
