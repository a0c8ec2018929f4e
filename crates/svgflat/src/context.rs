//! Inherited paint and transform state.

use indexmap::IndexMap;

pub(crate) const FILL: &str = "fill";
pub(crate) const STROKE: &str = "stroke";
pub(crate) const STROKE_WIDTH: &str = "stroke-width";
pub(crate) const STROKE_OPACITY: &str = "stroke-opacity";
pub(crate) const STROKE_LINECAP: &str = "stroke-linecap";
pub(crate) const TRANSFORM: &str = "transform";

/// Paint and transform state inherited from ancestor groups.
///
/// Values are kept as the raw attribute strings; numeric parsing happens once, when a path
/// element's [`crate::Style`] is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<String>,
    pub stroke_opacity: Option<String>,
    pub stroke_linecap: Option<String>,
    /// Composed transform list, outermost first.
    pub transform: Option<String>,
}

impl Context {
    /// Returns the context seen by a node with `attributes` nested under `self`.
    ///
    /// Paint properties are overridden field by field; `transform` is appended after the
    /// parent's. Declarations in an inline `style` attribute win over presentation attributes.
    pub fn resolve(&self, attributes: &IndexMap<String, String>) -> Context {
        let declarations = attributes
            .get("style")
            .map(|s| parse_style_declarations(s))
            .unwrap_or_default();
        let own = |name: &str| -> Option<String> {
            declarations
                .iter()
                .rev()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .or_else(|| attributes.get(name).cloned())
        };

        Context {
            fill: own(FILL).or_else(|| self.fill.clone()),
            stroke: own(STROKE).or_else(|| self.stroke.clone()),
            stroke_width: own(STROKE_WIDTH).or_else(|| self.stroke_width.clone()),
            stroke_opacity: own(STROKE_OPACITY).or_else(|| self.stroke_opacity.clone()),
            stroke_linecap: own(STROKE_LINECAP).or_else(|| self.stroke_linecap.clone()),
            transform: join_transforms(
                self.transform.as_deref(),
                attributes.get(TRANSFORM).map(String::as_str),
            ),
        }
    }
}

/// Joins two transform lists with a single space, dropping absent or blank sides.
pub fn join_transforms(parent: Option<&str>, child: Option<&str>) -> Option<String> {
    let parts = [parent, child]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Splits `prop: value; prop2: value2` into `(prop, value)` pairs. Malformed entries are skipped.
fn parse_style_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim().trim_end_matches("!important").trim_end();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name.to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn child_overrides_parent_field_by_field() {
        let parent = Context::default().resolve(&attrs(&[("fill", "red"), ("stroke", "black")]));
        let child = parent.resolve(&attrs(&[("fill", "blue")]));
        assert_eq!(child.fill.as_deref(), Some("blue"));
        assert_eq!(child.stroke.as_deref(), Some("black"));
        assert_eq!(parent.fill.as_deref(), Some("red"));
    }

    #[test]
    fn transforms_concatenate_parent_first() {
        let parent = Context::default().resolve(&attrs(&[("transform", "translate(1,1)")]));
        let child = parent.resolve(&attrs(&[("transform", "scale(2)")]));
        assert_eq!(child.transform.as_deref(), Some("translate(1,1) scale(2)"));

        let untouched = parent.resolve(&attrs(&[]));
        assert_eq!(untouched.transform.as_deref(), Some("translate(1,1)"));
    }

    #[test]
    fn join_transforms_skips_blank_sides() {
        assert_eq!(join_transforms(None, None), None);
        assert_eq!(join_transforms(Some(""), Some("  ")), None);
        assert_eq!(
            join_transforms(Some(""), Some("rotate(45)")).as_deref(),
            Some("rotate(45)")
        );
    }

    #[test]
    fn inline_style_beats_presentation_attribute() {
        let ctx = Context::default().resolve(&attrs(&[
            ("fill", "red"),
            ("style", "fill: green; stroke-width:3 ;bogus"),
        ]));
        assert_eq!(ctx.fill.as_deref(), Some("green"));
        assert_eq!(ctx.stroke_width.as_deref(), Some("3"));
    }
}
