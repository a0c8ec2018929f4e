#![forbid(unsafe_code)]

//! `svgflat` turns an SVG document into a flat, renderer-agnostic scene model.
//!
//! Every drawable (`path`, `rect`, `circle`, `ellipse`, `line`, `polygon`, `polyline`) becomes a
//! path element with absolute, transformed commands and a resolved style (fill, stroke,
//! stroke-width, stroke-linecap, stroke-opacity). Groups are flattened away after their paint
//! and transforms have been pushed down to their descendants. Each element gets a stable,
//! scene-unique id derived from its `id` attribute or its position in the tree.
//!
//! ```
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">
//!   <rect id="box" width="5" height="5" fill="red"/>
//! </svg>"#;
//! let out = svgflat::convert_str(svg, &svgflat::ConvertOptions::default()).unwrap();
//! assert_eq!(out.scene.children()[0].id, "box");
//! ```

pub mod context;
mod convert;
pub mod document;
pub mod error;
pub mod geometry;
pub mod model;
pub mod naming;
mod normalize;
pub mod shapes;

pub use context::Context;
pub use convert::{ConvertOptions, convert, convert_str, parse_view_box};
pub use document::{ElementKind, Node, parse_document};
pub use error::{Error, GeometryError, Result, Warning};
pub use geometry::{PathConverter, SvgTypesPathConverter};
pub use model::{Conversion, PathCommand, PathData, PathElement, Rect, Scene, SceneData, Style};
pub use shapes::{BasicShapes, ShapeToPath};
