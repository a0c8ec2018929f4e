use serde::{Deserialize, Serialize};

use crate::error::Warning;

/// Id given to the synthesized scene root.
pub const ROOT_ID: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Absolute path command in scene coordinates (transforms already applied).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    QuadTo {
        x1: f64,
        y1: f64,
        x: f64,
        y: f64,
    },
    Close,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_linecap: Option<String>,
    #[serde(default = "default_opacity")]
    pub stroke_opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: None,
            stroke_linecap: None,
            stroke_opacity: default_opacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    pub d: Vec<PathCommand>,
}

/// One flattened drawable. Serialized as `{"type": "path", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "path")]
pub struct PathElement {
    pub id: String,
    pub style: Style,
    pub data: PathData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneData {
    /// The document's `viewBox`.
    pub rect: Rect,
    pub children: Vec<PathElement>,
}

/// Root of the converted model. Serialized as `{"type": "svg", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "svg")]
pub struct Scene {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    pub data: SceneData,
}

impl Scene {
    pub fn new(rect: Rect) -> Self {
        Self {
            id: ROOT_ID.to_string(),
            style: None,
            data: SceneData {
                rect,
                children: Vec::new(),
            },
        }
    }

    pub fn children(&self) -> &[PathElement] {
        &self.data.children
    }

    pub fn find(&self, id: &str) -> Option<&PathElement> {
        self.data.children.iter().find(|e| e.id == id)
    }
}

/// Result of one conversion: the scene plus every non-fatal warning raised while building it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub scene: Scene,
    #[serde(default)]
    pub warnings: Vec<Warning>,
}
