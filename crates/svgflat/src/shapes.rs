//! Basic shapes → path data.

use std::fmt::Write as _;

use svgtypes::PointsParser;

use crate::document::{ElementKind, Node};

/// Converts a basic shape element into equivalent SVG path data.
pub trait ShapeToPath {
    /// Returns `None` when the node is not a basic shape or its geometry is degenerate
    /// (zero size, missing points, ...).
    fn shape_to_path(&self, node: &Node) -> Option<String>;
}

/// Attributes that only describe a shape's geometry; they are dropped once the shape is a path.
pub fn geometry_attributes(kind: &ElementKind) -> &'static [&'static str] {
    match kind {
        ElementKind::Rect => &["x", "y", "width", "height", "rx", "ry"],
        ElementKind::Circle => &["cx", "cy", "r"],
        ElementKind::Ellipse => &["cx", "cy", "rx", "ry"],
        ElementKind::Line => &["x1", "y1", "x2", "y2"],
        ElementKind::Polygon | ElementKind::Polyline => &["points"],
        _ => &[],
    }
}

/// Built-in conversions following the SVG basic-shape equivalences.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicShapes;

impl ShapeToPath for BasicShapes {
    fn shape_to_path(&self, node: &Node) -> Option<String> {
        match node.kind {
            ElementKind::Rect => rect_to_path(node),
            ElementKind::Circle => {
                let r = number(node, "r")?;
                ellipse_path(number_or_zero(node, "cx"), number_or_zero(node, "cy"), r, r)
            }
            ElementKind::Ellipse => ellipse_path(
                number_or_zero(node, "cx"),
                number_or_zero(node, "cy"),
                number(node, "rx")?,
                number(node, "ry")?,
            ),
            ElementKind::Line => Some(format!(
                "M{} {} L{} {}",
                number_or_zero(node, "x1"),
                number_or_zero(node, "y1"),
                number_or_zero(node, "x2"),
                number_or_zero(node, "y2"),
            )),
            ElementKind::Polyline => points_path(node.attr("points")?, false),
            ElementKind::Polygon => points_path(node.attr("points")?, true),
            _ => None,
        }
    }
}

fn number(node: &Node, name: &str) -> Option<f64> {
    let value = node.attr(name)?.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn number_or_zero(node: &Node, name: &str) -> f64 {
    number(node, name).unwrap_or(0.0)
}

fn rect_to_path(node: &Node) -> Option<String> {
    let x = number_or_zero(node, "x");
    let y = number_or_zero(node, "y");
    let w = number(node, "width").filter(|w| *w > 0.0)?;
    let h = number(node, "height").filter(|h| *h > 0.0)?;

    // A missing radius takes the other one; both are clamped to half the side.
    let rx = number(node, "rx").filter(|r| *r >= 0.0);
    let ry = number(node, "ry").filter(|r| *r >= 0.0);
    let (rx, ry) = match (rx, ry) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.min(w / 2.0);
    let ry = ry.min(h / 2.0);

    if rx == 0.0 || ry == 0.0 {
        return Some(format!(
            "M{x} {y} H{} V{} H{x} Z",
            x + w,
            y + h
        ));
    }

    let mut d = String::new();
    let _ = write!(&mut d, "M{} {y} H{}", x + rx, x + w - rx);
    let _ = write!(&mut d, " A{rx} {ry} 0 0 1 {} {}", x + w, y + ry);
    let _ = write!(&mut d, " V{}", y + h - ry);
    let _ = write!(&mut d, " A{rx} {ry} 0 0 1 {} {}", x + w - rx, y + h);
    let _ = write!(&mut d, " H{}", x + rx);
    let _ = write!(&mut d, " A{rx} {ry} 0 0 1 {x} {}", y + h - ry);
    let _ = write!(&mut d, " V{}", y + ry);
    let _ = write!(&mut d, " A{rx} {ry} 0 0 1 {} {y} Z", x + rx);
    Some(d)
}

fn ellipse_path(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<String> {
    if !(rx > 0.0 && ry > 0.0) {
        return None;
    }
    Some(format!(
        "M{} {cy} A{rx} {ry} 0 1 0 {} {cy} A{rx} {ry} 0 1 0 {} {cy} Z",
        cx - rx,
        cx + rx,
        cx - rx,
    ))
}

fn points_path(points: &str, close: bool) -> Option<String> {
    let mut d = String::new();
    for (i, (x, y)) in PointsParser::from(points).enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i != 0 {
            d.push(' ');
        }
        let _ = write!(&mut d, "{cmd}{x} {y}");
    }
    if d.is_empty() {
        return None;
    }
    if close {
        d.push_str(" Z");
    }
    Some(d)
}
