//! SVG serialization of a [`Scene`]
//!
//! Gradients, clip paths and filters are collected into `<defs>` with
//! generated ids; everything else is written in draw order. All
//! user-supplied text goes through [`escape_xml`].

use crate::color::Color;
use crate::scene::{
    quote_font_family, Filter, Group, ImageNode, Layer, Node, Paint, PathCommand, PathData, Scene,
    Shape, Stroke, TextAnchor, TextNode,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::fmt::Write;

/// Escape text for use in XML content and attribute values.
///
/// Control characters that XML 1.0 forbids are dropped.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

/// Format a coordinate with at most 3 decimals and no trailing zeros
fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn path_d(path: &PathData) -> String {
    let mut d = String::new();
    for command in &path.commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match *command {
            PathCommand::MoveTo(x, y) => {
                let _ = write!(d, "M{} {}", num(x), num(y));
            }
            PathCommand::LineTo(x, y) => {
                let _ = write!(d, "L{} {}", num(x), num(y));
            }
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

/// Opening of a shape element, without attributes for paint
fn shape_element(shape: &Shape) -> String {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
        } => format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
            num(*x),
            num(*y),
            num(width.max(0.0)),
            num(height.max(0.0))
        ),
        Shape::Circle { cx, cy, r } => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
            num(*cx),
            num(*cy),
            num(r.max(0.0))
        ),
        Shape::Ellipse { cx, cy, rx, ry } => format!(
            "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\"",
            num(*cx),
            num(*cy),
            num(rx.max(0.0)),
            num(ry.max(0.0))
        ),
        Shape::Path(path) => format!("<path d=\"{}\"", path_d(path)),
    }
}

fn color_attrs(prefix: &str, color: Color) -> String {
    if color.is_opaque() {
        format!(" {prefix}=\"{}\"", color.hex_rgb())
    } else {
        format!(
            " {prefix}=\"{}\" {prefix}-opacity=\"{}\"",
            color.hex_rgb(),
            num(color.opacity())
        )
    }
}

fn opacity_attr(opacity: f64) -> String {
    if opacity < 1.0 {
        format!(" opacity=\"{}\"", num(opacity.max(0.0)))
    } else {
        String::new()
    }
}

struct SvgWriter {
    defs: String,
    body: String,
    next_id: usize,
}

impl SvgWriter {
    fn new() -> Self {
        Self {
            defs: String::new(),
            body: String::new(),
            next_id: 0,
        }
    }

    fn id(&mut self, kind: &str) -> String {
        self.next_id += 1;
        format!("{kind}-{}", self.next_id)
    }

    fn gradient_stops(&mut self, stops: &[crate::scene::GradientStop]) {
        for stop in stops {
            let _ = write!(
                self.defs,
                "<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
                num(stop.offset.clamp(0.0, 1.0)),
                stop.color.hex_rgb(),
                num(stop.color.opacity())
            );
        }
    }

    /// Fill attribute(s) for a paint, registering gradients in `<defs>`
    fn fill_attrs(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::Solid(color) => color_attrs("fill", *color),
            Paint::LinearGradient {
                x1,
                y1,
                x2,
                y2,
                stops,
            } => {
                let id = self.id("gradient");
                let _ = write!(
                    self.defs,
                    "<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
                    num(*x1),
                    num(*y1),
                    num(*x2),
                    num(*y2)
                );
                self.gradient_stops(stops);
                self.defs.push_str("</linearGradient>");
                format!(" fill=\"url(#{id})\"")
            }
            Paint::RadialGradient { cx, cy, r, stops } => {
                let id = self.id("gradient");
                let _ = write!(
                    self.defs,
                    "<radialGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" cx=\"{}\" cy=\"{}\" r=\"{}\">",
                    num(*cx),
                    num(*cy),
                    num(r.max(0.0))
                );
                self.gradient_stops(stops);
                self.defs.push_str("</radialGradient>");
                format!(" fill=\"url(#{id})\"")
            }
        }
    }

    fn write_shape(&mut self, shape: &Shape, fill: Option<&Paint>, stroke: Option<&Stroke>, opacity: f64) {
        let mut element = shape_element(shape);
        match fill {
            Some(paint) => element.push_str(&self.fill_attrs(paint)),
            None => element.push_str(" fill=\"none\""),
        }
        if let Some(stroke) = stroke {
            element.push_str(&color_attrs("stroke", stroke.color));
            let _ = write!(element, " stroke-width=\"{}\"", num(stroke.width));
        }
        element.push_str(&opacity_attr(opacity));
        element.push_str("/>");
        self.body.push_str(&element);
    }

    fn write_text(&mut self, text: &TextNode) {
        let anchor = match text.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let family = format!("{}, sans-serif", quote_font_family(&text.font.family));
        let _ = write!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\"",
            num(text.x),
            num(text.y),
            escape_xml(&family),
            num(text.font.size_px)
        );
        if text.font.bold {
            self.body.push_str(" font-weight=\"bold\"");
        }
        if text.font.italic {
            self.body.push_str(" font-style=\"italic\"");
        }
        let _ = write!(self.body, " text-anchor=\"{anchor}\"");
        self.body.push_str(&color_attrs("fill", text.color));
        let _ = write!(self.body, ">{}</text>", escape_xml(&text.content));
    }

    fn write_image(&mut self, image: &ImageNode) {
        let _ = write!(
            self.body,
            "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" xlink:href=\"data:image/png;base64,{}\"/>",
            num(image.x),
            num(image.y),
            num(image.width),
            num(image.height),
            BASE64.encode(image.png_data.as_slice())
        );
    }

    fn write_group(&mut self, group: &Group) {
        if group.children.is_empty() {
            return;
        }
        self.body.push_str("<g");

        if let Some(clip) = &group.clip {
            let id = self.id("clip");
            let mut element = shape_element(clip);
            element.push_str("/>");
            let _ = write!(self.defs, "<clipPath id=\"{id}\">{element}</clipPath>");
            let _ = write!(self.body, " clip-path=\"url(#{id})\"");
        }

        if let Some(Filter::Glow { std_deviation }) = group.filter {
            let id = self.id("glow");
            let _ = write!(
                self.defs,
                "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
                 <feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"{}\" result=\"blur\"/>\
                 <feMerge><feMergeNode in=\"blur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge>\
                 </filter>",
                num(std_deviation.max(0.0))
            );
            let _ = write!(self.body, " filter=\"url(#{id})\"");
        }

        self.body.push_str(&opacity_attr(group.opacity));
        self.body.push('>');
        self.write_layer(&group.children);
        self.body.push_str("</g>");
    }

    fn write_layer(&mut self, layer: &Layer) {
        for node in layer.nodes() {
            match node {
                Node::Shape {
                    shape,
                    fill,
                    stroke,
                    opacity,
                } => self.write_shape(shape, fill.as_ref(), stroke.as_ref(), *opacity),
                Node::Text(text) => self.write_text(text),
                Node::Image(image) => self.write_image(image),
                Node::Group(group) => self.write_group(group),
            }
        }
    }
}

/// Serialize a scene to a standalone SVG document
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut writer = SvgWriter::new();
    writer.write_layer(&scene.root);

    let (width, height) = scene.size.to_tuple();
    let mut svg = String::with_capacity(writer.body.len() + writer.defs.len() + 256);
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    if !writer.defs.is_empty() {
        let _ = write!(svg, "<defs>{}</defs>", writer.defs);
    }
    svg.push_str(&writer.body);
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas_size::CanvasSize;
    use crate::scene::Font;

    #[test]
    fn test_escape_xml_covers_markup_characters() {
        assert_eq!(
            escape_xml(r#"Tom & Jerry's <"best"> day"#),
            "Tom &amp; Jerry&apos;s &lt;&quot;best&quot;&gt; day"
        );
        assert_eq!(escape_xml("bell\u{7}"), "bell");
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(num(240.0), "240");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(f64::NAN), "0");
    }

    #[test]
    fn test_clip_and_gradient_go_to_defs() {
        let mut scene = Scene::new(CanvasSize::from_width_height(100, 100));
        scene.root.clipped(
            Shape::Ellipse {
                cx: 50.0,
                cy: 50.0,
                rx: 40.0,
                ry: 30.0,
            },
            |inner| {
                inner.fill(
                    Shape::Rect {
                        x: 0.0,
                        y: 0.0,
                        width: 100.0,
                        height: 100.0,
                    },
                    Paint::RadialGradient {
                        cx: 50.0,
                        cy: 50.0,
                        r: 50.0,
                        stops: vec![],
                    },
                    1.0,
                );
            },
        );
        let svg = scene_to_svg(&scene);
        assert!(svg.contains("<defs><clipPath id=\"clip-1\"><ellipse cx=\"50\" cy=\"50\" rx=\"40\" ry=\"30\"/></clipPath>"));
        assert!(svg.contains("<radialGradient id=\"gradient-2\""));
        assert!(svg.contains("<g clip-path=\"url(#clip-1)\"><rect x=\"0\" y=\"0\" width=\"100\" height=\"100\" fill=\"url(#gradient-2)\"/></g>"));
    }

    #[test]
    fn test_text_attributes() {
        let mut scene = Scene::new(CanvasSize::from_width_height(100, 100));
        scene.root.text(TextNode {
            x: 50.0,
            y: 80.0,
            content: "A & B".to_string(),
            font: Font {
                family: "Playfair Display".to_string(),
                size_px: 20.0,
                bold: true,
                italic: false,
            },
            color: Color::rgba(255, 0, 0, 128),
            anchor: TextAnchor::Middle,
        });
        let svg = scene_to_svg(&scene);
        assert!(svg.contains(
            "<text x=\"50\" y=\"80\" font-family=\"&quot;Playfair Display&quot;, sans-serif\" font-size=\"20\" font-weight=\"bold\" text-anchor=\"middle\" fill=\"#ff0000\" fill-opacity=\"0.502\">A &amp; B</text>"
        ));
        assert!(!svg.contains("<defs>"));
    }
}
