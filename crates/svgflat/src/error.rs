use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a whole conversion. No partial scene is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SVG parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Malformed SVG document: {message}")]
    MalformedDocument { message: String },
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }
}

/// Reported by a [`crate::PathConverter`] when path data or a transform list cannot be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("invalid path data: {0}")]
    PathData(String),

    #[error("invalid transform `{transform}`: {message}")]
    Transform { transform: String, message: String },

    #[error("transformed coordinates are not finite")]
    NonFinite,
}

/// Non-fatal diagnostics collected during a conversion.
///
/// `path` is the dotted naming path of the node the warning concerns (e.g. `Layer1.rect0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Warning {
    /// The element kind is not converted; the node and its subtree were dropped.
    UnsupportedElement { path: String, element: String },
    /// A drawable shape whose geometry is empty or invalid (e.g. `r="0"`, missing `points`).
    DegenerateShape { path: String, element: String },
    /// Path data or transform could not be converted into any path command.
    InvalidPathData { path: String, message: String },
    /// A numeric style property could not be parsed; its default was used instead.
    InvalidNumber {
        path: String,
        property: String,
        value: String,
    },
}

impl Warning {
    pub fn path(&self) -> &str {
        match self {
            Warning::UnsupportedElement { path, .. }
            | Warning::DegenerateShape { path, .. }
            | Warning::InvalidPathData { path, .. }
            | Warning::InvalidNumber { path, .. } => path,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnsupportedElement { path, element } => {
                write!(f, "unsupported element <{element}> at {path}")
            }
            Warning::DegenerateShape { path, element } => {
                write!(f, "<{element}> at {path} has no drawable geometry")
            }
            Warning::InvalidPathData { path, message } => write!(f, "{path}: {message}"),
            Warning::InvalidNumber {
                path,
                property,
                value,
            } => write!(f, "{path}: invalid number for {property}: {value:?}"),
        }
    }
}

/// Collects warnings for one conversion and mirrors them to `tracing`.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub(crate) fn warn(&mut self, warning: Warning) {
        tracing::warn!(path = warning.path(), "{warning}");
        self.warnings.push(warning);
    }

    pub(crate) fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
