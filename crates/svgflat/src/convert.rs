//! Document tree → flat [`Scene`].

use std::sync::Arc;

use crate::context::{Context, TRANSFORM};
use crate::document::{ElementKind, Node, parse_document};
use crate::error::{Diagnostics, Error, Result};
use crate::geometry::{PathConverter, SvgTypesPathConverter};
use crate::model::{Conversion, Rect, Scene};
use crate::naming::{Flattened, assign_ids, segment_name};
use crate::normalize::{Normalized, normalize};
use crate::shapes::{BasicShapes, ShapeToPath};

/// Collaborators used while converting. The defaults cover standard SVG.
#[derive(Clone)]
pub struct ConvertOptions {
    pub path_converter: Arc<dyn PathConverter + Send + Sync>,
    pub shape_converter: Arc<dyn ShapeToPath + Send + Sync>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            path_converter: Arc::new(SvgTypesPathConverter),
            shape_converter: Arc::new(BasicShapes),
        }
    }
}

impl ConvertOptions {
    pub fn with_path_converter(mut self, converter: Arc<dyn PathConverter + Send + Sync>) -> Self {
        self.path_converter = converter;
        self
    }

    pub fn with_shape_converter(mut self, converter: Arc<dyn ShapeToPath + Send + Sync>) -> Self {
        self.shape_converter = converter;
        self
    }
}

impl std::fmt::Debug for ConvertOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertOptions").finish_non_exhaustive()
    }
}

/// Parses SVG text and converts it. See [`convert`].
pub fn convert_str(text: &str, options: &ConvertOptions) -> Result<Conversion> {
    let root = parse_document(text)?;
    convert(&root, options)
}

/// Converts a document tree into a flat scene.
///
/// The root's `viewBox` becomes the scene rect and is required. Groups are flattened away,
/// `title`/`desc` are ignored, unknown elements are dropped with a warning. Elements keep
/// document order.
pub fn convert(root: &Node, options: &ConvertOptions) -> Result<Conversion> {
    let view_box = root
        .attr("viewBox")
        .ok_or_else(|| Error::malformed("root element has no viewBox"))?;
    let rect = parse_view_box(view_box)?;

    // Paint set on the root applies to everything; its transform does not.
    let mut root_attributes = root.attributes.clone();
    root_attributes.shift_remove(TRANSFORM);
    let context = Context::default().resolve(&root_attributes);

    let mut walker = Walker {
        options,
        diagnostics: Diagnostics::default(),
        out: Vec::new(),
    };
    walker.walk(&root.children, &[], &context);

    let Walker {
        diagnostics,
        mut out,
        ..
    } = walker;
    assign_ids(&mut out);

    let warnings = diagnostics.into_warnings();
    tracing::debug!(
        elements = out.len(),
        warnings = warnings.len(),
        "converted svg document"
    );

    let mut scene = Scene::new(rect);
    scene.data.children = out.into_iter().map(|f| f.element).collect();
    Ok(Conversion { scene, warnings })
}

/// `min-x min-y width height`, separated by whitespace and/or commas.
pub fn parse_view_box(value: &str) -> Result<Rect> {
    let parts = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| Error::malformed(format!("viewBox is not numeric: {value:?}")))?;
    let [x, y, width, height] = parts[..] else {
        return Err(Error::malformed(format!(
            "viewBox needs exactly four numbers, got {}: {value:?}",
            parts.len()
        )));
    };
    Ok(Rect::new(x, y, width, height))
}

struct Walker<'a> {
    options: &'a ConvertOptions,
    diagnostics: Diagnostics,
    out: Vec<Flattened>,
}

impl Walker<'_> {
    fn walk(&mut self, nodes: &[Node], parent_path: &[String], context: &Context) {
        // Counts processed siblings only; `title`/`desc` never take an index.
        let mut index = 0usize;
        for node in nodes {
            let mut path = parent_path.to_vec();
            path.push(segment_name(&node.attributes, node.kind.name(), index));

            if node.kind == ElementKind::G {
                index += 1;
                let group_context = context.resolve(&node.attributes);
                self.walk(&node.children, &path, &group_context);
                continue;
            }

            let dotted = path.join(".");
            match normalize(node, context, &dotted, self.options, &mut self.diagnostics) {
                Normalized::Structural => {}
                Normalized::Element(element) => {
                    index += 1;
                    self.out.push(Flattened { element, path });
                }
                Normalized::Unsupported | Normalized::Discarded => index += 1,
            }
        }
    }
}
