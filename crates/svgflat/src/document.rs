//! In-memory SVG document tree.
//!
//! The converter never touches XML directly: [`parse_document`] turns SVG text into a tree of
//! [`Node`]s (element children only) and everything downstream reads that tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Element kinds the converter knows about. Everything else is [`ElementKind::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Svg,
    G,
    Path,
    Rect,
    Circle,
    Ellipse,
    Line,
    Polygon,
    Polyline,
    Title,
    Desc,
    Unknown(String),
}

impl ElementKind {
    pub fn from_tag_name(name: &str) -> Self {
        match name {
            "svg" => Self::Svg,
            "g" => Self::G,
            "path" => Self::Path,
            "rect" => Self::Rect,
            "circle" => Self::Circle,
            "ellipse" => Self::Ellipse,
            "line" => Self::Line,
            "polygon" => Self::Polygon,
            "polyline" => Self::Polyline,
            "title" => Self::Title,
            "desc" => Self::Desc,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The element's tag name; also the prefix of generated segment names (`rect0`).
    pub fn name(&self) -> &str {
        match self {
            Self::Svg => "svg",
            Self::G => "g",
            Self::Path => "path",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Polygon => "polygon",
            Self::Polyline => "polyline",
            Self::Title => "title",
            Self::Desc => "desc",
            Self::Unknown(name) => name,
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub kind: ElementKind,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Parses SVG text into a [`Node`] tree rooted at the document element.
///
/// Attribute names keep only their local part for the default namespace; namespaced attributes
/// (`xlink:href`) keep their prefix so they can't shadow presentation attributes.
pub fn parse_document(text: &str) -> Result<Node> {
    let doc = roxmltree::Document::parse(text)?;
    Ok(build_node(doc.root_element()))
}

fn build_node(node: roxmltree::Node<'_, '_>) -> Node {
    let mut out = Node::new(ElementKind::from_tag_name(node.tag_name().name()));
    for attr in node.attributes() {
        let name = match attr.namespace() {
            None => attr.name().to_string(),
            Some(ns) => match node.lookup_prefix(ns) {
                Some(prefix) if !prefix.is_empty() => format!("{prefix}:{}", attr.name()),
                _ => attr.name().to_string(),
            },
        };
        out.attributes.insert(name, attr.value().to_string());
    }
    out.children = node
        .children()
        .filter(|c| c.is_element())
        .map(build_node)
        .collect();
    out
}
