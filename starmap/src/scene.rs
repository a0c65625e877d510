//! Display list shared by the SVG and raster export paths
//!
//! Every drawing step of a poster (background, star fields, clipped photos,
//! borders, text) appends [`Node`]s to a [`Layer`]. The finished [`Scene`] is
//! serialized once to SVG; the raster path renders that same document, so
//! the two export formats cannot drift apart.
//!
//! Clipping is lexically scoped: a clip region only exists on a [`Group`] and
//! applies to that group's children. There is no separate save/restore call
//! that could be left unbalanced.

use crate::canvas_size::CanvasSize;
use crate::color::Color;
use std::sync::Arc;

/// One segment command of a [`PathData`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// Sequence of path commands, serialized to an SVG `d` attribute
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(x, y));
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Open or closed polyline through `points`
    pub fn polyline(points: &[(f64, f64)], closed: bool) -> Self {
        let mut path = PathData::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            path = if i == 0 {
                path.move_to(x, y)
            } else {
                path.line_to(x, y)
            };
        }
        if closed && !points.is_empty() {
            path = path.close();
        }
        path
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Geometric primitive used for fills, strokes and clip regions
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Path(PathData),
}

/// Color stop of a gradient, `offset` in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Fill paint. Gradient coordinates are in canvas space.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        cx: f64,
        cy: f64,
        r: f64,
        stops: Vec<GradientStop>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

/// Horizontal alignment of text relative to its x coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Font selection for a text node
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size_px: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    /// CSS font shorthand: `{italic }{bold }{size}px {family}`
    pub fn css_shorthand(&self) -> String {
        let mut font = String::new();
        if self.italic {
            font.push_str("italic ");
        }
        if self.bold {
            font.push_str("bold ");
        }
        font.push_str(&format!("{}px {}", self.size_px, quote_font_family(&self.family)));
        font
    }
}

/// Quote a font family name when it contains whitespace.
///
/// Double quotes and backslashes are removed first; they cannot appear
/// unescaped inside a quoted CSS family name.
pub fn quote_font_family(family: &str) -> String {
    let family: String = family.chars().filter(|c| !matches!(c, '"' | '\\')).collect();
    let family = family.trim();
    if family.chars().any(char::is_whitespace) {
        format!("\"{family}\"")
    } else {
        family.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub x: f64,
    /// Baseline y coordinate
    pub y: f64,
    pub content: String,
    pub font: Font,
    pub color: Color,
    pub anchor: TextAnchor,
}

/// Raster image placed at canvas coordinates, stretched to `width`x`height`
#[derive(Debug, Clone, PartialEq)]
pub struct ImageNode {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// PNG-encoded pixels, shared when the same image is placed twice
    pub png_data: Arc<Vec<u8>>,
}

/// Post-processing effect applied to a whole group
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Filter {
    /// Gaussian-blurred copy merged under the sharp source
    Glow { std_deviation: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub clip: Option<Shape>,
    pub filter: Option<Filter>,
    pub opacity: f64,
    pub children: Layer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Shape {
        shape: Shape,
        fill: Option<Paint>,
        stroke: Option<Stroke>,
        opacity: f64,
    },
    Text(TextNode),
    Image(ImageNode),
    Group(Group),
}

/// Ordered list of nodes; later nodes paint over earlier ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layer {
    nodes: Vec<Node>,
}

impl Layer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Fill a shape with a paint at the given opacity
    pub fn fill(&mut self, shape: Shape, paint: Paint, opacity: f64) {
        self.push(Node::Shape {
            shape,
            fill: Some(paint),
            stroke: None,
            opacity,
        });
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.fill(
            Shape::Rect {
                x,
                y,
                width,
                height,
            },
            Paint::Solid(color),
            1.0,
        );
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Color, opacity: f64) {
        self.fill(Shape::Circle { cx, cy, r }, Paint::Solid(color), opacity);
    }

    /// Outline a shape without filling it
    pub fn stroke(&mut self, shape: Shape, stroke: Stroke, opacity: f64) {
        self.push(Node::Shape {
            shape,
            fill: None,
            stroke: Some(stroke),
            opacity,
        });
    }

    pub fn text(&mut self, text: TextNode) {
        self.push(Node::Text(text));
    }

    pub fn image(&mut self, image: ImageNode) {
        self.push(Node::Image(image));
    }

    /// Draw into a child group. Empty groups are dropped.
    pub fn group(
        &mut self,
        clip: Option<Shape>,
        filter: Option<Filter>,
        opacity: f64,
        draw: impl FnOnce(&mut Layer),
    ) {
        let mut children = Layer::new();
        draw(&mut children);
        if children.is_empty() {
            return;
        }
        self.push(Node::Group(Group {
            clip,
            filter,
            opacity,
            children,
        }));
    }

    /// Draw into a child group clipped to `clip`
    pub fn clipped(&mut self, clip: Shape, draw: impl FnOnce(&mut Layer)) {
        self.group(Some(clip), None, 1.0, draw);
    }

    /// Depth-first visit of every node, groups before their children
    pub fn visit(&self, visitor: &mut impl FnMut(&Node)) {
        for node in &self.nodes {
            visitor(node);
            if let Node::Group(group) = node {
                group.children.visit(visitor);
            }
        }
    }

    /// Count nodes (at any depth) matching a predicate
    pub fn count(&self, predicate: impl Fn(&Node) -> bool) -> usize {
        let mut count = 0;
        self.visit(&mut |node| {
            if predicate(node) {
                count += 1;
            }
        });
        count
    }
}

/// A complete poster drawing: canvas size plus root layer
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: CanvasSize,
    pub root: Layer,
}

impl Scene {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            root: Layer::new(),
        }
    }
}
