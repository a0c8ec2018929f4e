//! Per-element conversion into [`PathElement`]s.

use std::str::FromStr;

use indexmap::IndexMap;
use svgtypes::{Length, LengthUnit};

use crate::ConvertOptions;
use crate::context::{Context, STROKE_OPACITY, STROKE_WIDTH};
use crate::document::{ElementKind, Node};
use crate::error::{Diagnostics, Warning};
use crate::model::{PathData, PathElement, Style};
use crate::shapes::geometry_attributes;

/// Outcome of normalizing one node.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Normalized {
    Element(PathElement),
    /// `title`/`desc`: skipped silently, does not count as a sibling.
    Structural,
    /// Unknown element kind; a warning was recorded.
    Unsupported,
    /// Drawable kind without usable geometry; a warning was recorded.
    Discarded,
}

/// Converts a leaf node into a path element. `path` is the node's dotted naming path, used in
/// warnings only. The returned element has an empty id until ids are assigned.
pub(crate) fn normalize(
    node: &Node,
    context: &Context,
    path: &str,
    options: &ConvertOptions,
    diagnostics: &mut Diagnostics,
) -> Normalized {
    match &node.kind {
        ElementKind::Title | ElementKind::Desc => Normalized::Structural,
        ElementKind::Path => {
            let d = node.attr("d").unwrap_or_default();
            if d.trim().is_empty() {
                diagnostics.warn(Warning::DegenerateShape {
                    path: path.to_string(),
                    element: node.kind.to_string(),
                });
                return Normalized::Discarded;
            }
            path_element(d, &node.attributes, context, path, options, diagnostics)
        }
        kind @ (ElementKind::Rect
        | ElementKind::Circle
        | ElementKind::Ellipse
        | ElementKind::Line
        | ElementKind::Polygon
        | ElementKind::Polyline) => {
            let Some(d) = options.shape_converter.shape_to_path(node) else {
                diagnostics.warn(Warning::DegenerateShape {
                    path: path.to_string(),
                    element: kind.to_string(),
                });
                return Normalized::Discarded;
            };
            let geometry = geometry_attributes(kind);
            let rest = node
                .attributes
                .iter()
                .filter(|(name, _)| !geometry.contains(&name.as_str()))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect::<IndexMap<_, _>>();
            path_element(&d, &rest, context, path, options, diagnostics)
        }
        ElementKind::Svg | ElementKind::G | ElementKind::Unknown(_) => {
            diagnostics.warn(Warning::UnsupportedElement {
                path: path.to_string(),
                element: node.kind.to_string(),
            });
            Normalized::Unsupported
        }
    }
}

fn path_element(
    d: &str,
    attributes: &IndexMap<String, String>,
    context: &Context,
    path: &str,
    options: &ConvertOptions,
    diagnostics: &mut Diagnostics,
) -> Normalized {
    let resolved = context.resolve(attributes);
    let transform = resolved.transform.as_deref().unwrap_or_default();

    let commands = match options.path_converter.convert(d, transform) {
        Ok(commands) if !commands.is_empty() => commands,
        Ok(_) => {
            diagnostics.warn(Warning::InvalidPathData {
                path: path.to_string(),
                message: "path data produced no commands".to_string(),
            });
            return Normalized::Discarded;
        }
        Err(err) => {
            diagnostics.warn(Warning::InvalidPathData {
                path: path.to_string(),
                message: err.to_string(),
            });
            return Normalized::Discarded;
        }
    };

    let stroke_width = resolved.stroke_width.as_deref().and_then(|value| {
        let parsed = parse_stroke_width(value);
        if parsed.is_none() {
            diagnostics.warn(invalid_number(path, STROKE_WIDTH, value));
        }
        parsed
    });
    let stroke_opacity = match resolved.stroke_opacity.as_deref() {
        None => 1.0,
        Some(value) => match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v.clamp(0.0, 1.0),
            _ => {
                diagnostics.warn(invalid_number(path, STROKE_OPACITY, value));
                1.0
            }
        },
    };

    Normalized::Element(PathElement {
        id: String::new(),
        style: Style {
            fill: resolved.fill,
            stroke: resolved.stroke,
            stroke_width,
            stroke_linecap: resolved.stroke_linecap,
            stroke_opacity,
        },
        data: PathData { d: commands },
    })
}

/// Unit-less or `px` lengths only; other units need a viewport to resolve.
///
/// Unlike a plain `parseFloat`, which reads `2mm` as 2, lengths in other units are rejected
/// (the caller leaves the width unset and records a warning).
fn parse_stroke_width(value: &str) -> Option<f64> {
    let length = Length::from_str(value.trim()).ok()?;
    match length.unit {
        LengthUnit::None | LengthUnit::Px if length.number.is_finite() => Some(length.number),
        _ => None,
    }
}

fn invalid_number(path: &str, property: &str, value: &str) -> Warning {
    Warning::InvalidNumber {
        path: path.to_string(),
        property: property.to_string(),
        value: value.to_string(),
    }
}
