//! Poster rendering: request in, display list out
//!
//! Draw order is fixed: canvas background, then each circle composite with
//! its border (the first combined source underneath the second), then text
//! layers and captions.

use crate::compositor::{draw_circle_composite, resolve_source, ResolvedSource};
use crate::error::{PosterError, Result};
use crate::geometry::{combined_circles, Circle};
use crate::request::{Layout, RenderRequest};
use crate::scene::Scene;
use crate::starfield::random_source;
use crate::text::{draw_text_layers, SkippedText};
use rand::Rng;

/// A drawn poster plus the layout facts callers may want to report
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPoster {
    pub scene: Scene,
    /// Circles in draw order
    pub circles: Vec<Circle>,
    /// Text layers that did not fit on the canvas
    pub skipped_text: Vec<SkippedText>,
}

/// Render a poster using the request's seed, or a fresh random source when
/// it has none
pub fn render_poster(request: &RenderRequest) -> Result<RenderedPoster> {
    let mut rng = random_source(request.seed);
    render_poster_with_rng(request, &mut rng)
}

/// Render a poster drawing all randomness from `rng`
pub fn render_poster_with_rng(
    request: &RenderRequest,
    rng: &mut impl Rng,
) -> Result<RenderedPoster> {
    let canvas = request.canvas;
    if canvas.is_empty() {
        return Err(PosterError::InvalidInput(format!(
            "canvas must be non-empty, got {canvas}"
        )));
    }
    if !request.circle_radius_percent.is_finite() || request.circle_radius_percent < 0.0 {
        return Err(PosterError::InvalidInput(format!(
            "circle radius percent must be a non-negative number, got {}",
            request.circle_radius_percent
        )));
    }

    let mut scene = Scene::new(canvas);
    scene.root.fill_rect(
        0.0,
        0.0,
        canvas.width as f64,
        canvas.height as f64,
        request.background_color,
    );

    let placements: Vec<(Circle, ResolvedSource)> = match &request.layout {
        Layout::Single { source } => vec![(
            Circle::from_canvas(canvas, request.circle_radius_percent),
            resolve_source(source),
        )],
        Layout::Combined {
            orientation,
            overlap_percent,
            first,
            second,
        } => {
            let [a, b] = combined_circles(
                canvas,
                request.circle_radius_percent,
                *orientation,
                *overlap_percent,
            );
            vec![(a, resolve_source(first)), (b, resolve_source(second))]
        }
    };

    for (circle, source) in &placements {
        draw_circle_composite(&mut scene.root, circle, source, request, rng);
    }

    let circles: Vec<Circle> = placements.into_iter().map(|(circle, _)| circle).collect();
    let top = circles.iter().map(Circle::top).fold(f64::INFINITY, f64::min);
    let bottom = circles
        .iter()
        .map(Circle::bottom)
        .fold(f64::NEG_INFINITY, f64::max);

    let skipped_text = draw_text_layers(
        &mut scene.root,
        &request.all_text_layers(),
        top,
        bottom,
        request.text_margin,
        canvas,
    );

    log::debug!(
        "Rendered {} poster with {} circle(s), {} text layer(s) skipped",
        canvas,
        circles.len(),
        skipped_text.len()
    );

    Ok(RenderedPoster {
        scene,
        circles,
        skipped_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas_size::CanvasSize;
    use crate::geometry::Orientation;
    use crate::request::CompositeSource;
    use crate::scene::{Node, Shape};
    use crate::text::{TextLayer, TextPosition};
    use approx::assert_relative_eq;

    #[test]
    fn test_single_layout_scenario() {
        let request = RenderRequest {
            canvas: CanvasSize::from_width_height(800, 1000),
            circle_radius_percent: 60.0,
            seed: Some(1),
            ..Default::default()
        };
        let poster = render_poster(&request).unwrap();
        assert_eq!(poster.circles.len(), 1);
        assert_relative_eq!(poster.circles[0].radius_x, 240.0);
        assert_relative_eq!(poster.circles[0].radius_y, 300.0);
    }

    #[test]
    fn test_combined_text_anchors_span_both_circles() {
        let request = RenderRequest {
            canvas: CanvasSize::from_width_height(800, 1600),
            circle_radius_percent: 80.0,
            layout: Layout::Combined {
                orientation: Orientation::Portrait,
                overlap_percent: 0.0,
                first: CompositeSource::StarField,
                second: CompositeSource::StarField,
            },
            text_layers: vec![TextLayer::new("Below", TextPosition::Below, 0)],
            text_margin: 10.0,
            seed: Some(2),
            ..Default::default()
        };
        let poster = render_poster(&request).unwrap();
        let bottom = poster.circles[1].bottom();
        assert!(bottom > poster.circles[0].bottom());

        let mut baseline = None;
        poster.scene.root.visit(&mut |node| {
            if let Node::Text(text) = node {
                baseline = Some(text.y);
            }
        });
        assert_relative_eq!(baseline.unwrap(), bottom + 10.0);
    }

    #[test]
    fn test_background_is_first_node() {
        let request = RenderRequest {
            seed: Some(3),
            ..Default::default()
        };
        let poster = render_poster(&request).unwrap();
        assert!(matches!(
            &poster.scene.root.nodes()[0],
            Node::Shape { shape: Shape::Rect { .. }, .. }
        ));
    }

    #[test]
    fn test_empty_canvas_is_rejected() {
        let request = RenderRequest {
            canvas: CanvasSize::from_width_height(0, 100),
            ..Default::default()
        };
        assert!(matches!(
            render_poster(&request),
            Err(PosterError::InvalidInput(_))
        ));
    }
}
