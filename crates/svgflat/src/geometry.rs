//! Path data → absolute [`PathCommand`]s.

use std::str::FromStr;

use svgtypes::{SimplePathSegment, SimplifyingPathParser, Transform};

use crate::error::GeometryError;
use crate::model::PathCommand;

/// Converts SVG path data plus a transform list into scene-space path commands.
pub trait PathConverter {
    /// `transform` is a (possibly empty) SVG transform list, outermost transform first.
    fn convert(&self, d: &str, transform: &str) -> Result<Vec<PathCommand>, GeometryError>;
}

/// Default converter backed by `svgtypes`.
///
/// Relative, horizontal/vertical, smooth and arc segments are simplified into absolute
/// move/line/cubic/quadratic commands, then the transform is applied to every point. Like SVG
/// renderers, path data is used up to the first error; an error before any segment fails the
/// whole conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgTypesPathConverter;

impl PathConverter for SvgTypesPathConverter {
    fn convert(&self, d: &str, transform: &str) -> Result<Vec<PathCommand>, GeometryError> {
        let ts = parse_transform(transform)?;
        let map = |x: f64, y: f64| (ts.a * x + ts.c * y + ts.e, ts.b * x + ts.d * y + ts.f);

        let mut out = Vec::new();
        for segment in SimplifyingPathParser::from(d) {
            let segment = match segment {
                Ok(segment) => segment,
                Err(err) if out.is_empty() => return Err(GeometryError::PathData(err.to_string())),
                Err(err) => {
                    tracing::debug!(%err, "path data truncated at first error");
                    break;
                }
            };
            let command = match segment {
                SimplePathSegment::MoveTo { x, y } => {
                    let (x, y) = map(x, y);
                    PathCommand::MoveTo { x, y }
                }
                SimplePathSegment::LineTo { x, y } => {
                    let (x, y) = map(x, y);
                    PathCommand::LineTo { x, y }
                }
                SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    let (x1, y1) = map(x1, y1);
                    let (x2, y2) = map(x2, y2);
                    let (x, y) = map(x, y);
                    PathCommand::CubicTo {
                        x1,
                        y1,
                        x2,
                        y2,
                        x,
                        y,
                    }
                }
                SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    let (x1, y1) = map(x1, y1);
                    let (x, y) = map(x, y);
                    PathCommand::QuadTo { x1, y1, x, y }
                }
                SimplePathSegment::ClosePath => PathCommand::Close,
            };
            if !is_finite(&command) {
                return Err(GeometryError::NonFinite);
            }
            out.push(command);
        }
        Ok(out)
    }
}

fn is_finite(command: &PathCommand) -> bool {
    match *command {
        PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => {
            x.is_finite() && y.is_finite()
        }
        PathCommand::CubicTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        } => [x1, y1, x2, y2, x, y].iter().all(|v| v.is_finite()),
        PathCommand::QuadTo { x1, y1, x, y } => [x1, y1, x, y].iter().all(|v| v.is_finite()),
        PathCommand::Close => true,
    }
}

fn parse_transform(transform: &str) -> Result<Transform, GeometryError> {
    let transform = transform.trim();
    if transform.is_empty() {
        return Ok(Transform::default());
    }
    Transform::from_str(transform).map_err(|err| GeometryError::Transform {
        transform: transform.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(d: &str, transform: &str) -> Vec<PathCommand> {
        SvgTypesPathConverter.convert(d, transform).unwrap()
    }

    #[test]
    fn relative_and_axis_segments_become_absolute_lines() {
        assert_eq!(
            convert("m1 2 h3 v4 z", ""),
            vec![
                PathCommand::MoveTo { x: 1.0, y: 2.0 },
                PathCommand::LineTo { x: 4.0, y: 2.0 },
                PathCommand::LineTo { x: 4.0, y: 6.0 },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn transform_list_is_applied_outermost_first() {
        // translate(1,1) scale(2): p → 2p + (1,1)
        assert_eq!(
            convert("M1 1 L2 3", "translate(1,1) scale(2)"),
            vec![
                PathCommand::MoveTo { x: 3.0, y: 3.0 },
                PathCommand::LineTo { x: 5.0, y: 7.0 },
            ]
        );
    }

    #[test]
    fn arcs_are_simplified_to_curves() {
        let cmds = convert("M0 0 A5 5 0 0 1 10 0", "");
        assert!(matches!(cmds[0], PathCommand::MoveTo { .. }));
        assert!(cmds[1..].iter().all(|c| matches!(c, PathCommand::CubicTo { .. })));
        let Some(PathCommand::CubicTo { x, y, .. }) = cmds.last() else {
            panic!("expected a trailing curve");
        };
        assert!((x - 10.0).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn data_after_an_error_is_ignored() {
        assert_eq!(
            convert("M0 0 L1 1 L2 #", ""),
            vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::LineTo { x: 1.0, y: 1.0 },
            ]
        );
    }

    #[test]
    fn overflowing_transform_is_an_error() {
        let err = SvgTypesPathConverter
            .convert("M1e308 1e308", "scale(10)")
            .unwrap_err();
        assert_eq!(err, GeometryError::NonFinite);
    }

    #[test]
    fn invalid_transform_is_an_error() {
        let err = SvgTypesPathConverter
            .convert("M0 0 L1 1", "wobble(3)")
            .unwrap_err();
        assert!(matches!(err, GeometryError::Transform { .. }));
    }
}
