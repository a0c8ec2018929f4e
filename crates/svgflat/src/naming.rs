//! Element naming and id assignment.
//!
//! Naming runs in two phases. During the tree walk every retained element gets a naming path:
//! one segment per ancestor group plus its own segment (see [`segment_name`]). Once the full
//! element list is known, [`assign_ids`] picks the final ids: the camel-cased last segment when
//! that is unique across the scene, the dotted naming path otherwise.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::PathElement;

/// A converted element together with its naming path, before ids are assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct Flattened {
    pub element: PathElement,
    pub path: Vec<String>,
}

/// Name of one level of the naming path.
///
/// A non-empty `id` attribute becomes PascalCase (`main-button` → `MainButton`); otherwise the
/// name is the element kind followed by its index among processed siblings (`rect0`).
pub fn segment_name(attributes: &IndexMap<String, String>, kind: &str, index: usize) -> String {
    attributes
        .get("id")
        .map(|id| upper_first(&camel_case(id)))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("{kind}{index}"))
}

/// Resolves a unique `id` for every element.
pub fn assign_ids(nodes: &mut [Flattened]) {
    let short_ids = nodes.iter().map(|n| short_id(&n.path)).collect::<Vec<_>>();
    let mut short_counts: FxHashMap<&str, usize> = FxHashMap::default();
    for id in &short_ids {
        *short_counts.entry(id.as_str()).or_default() += 1;
    }

    let candidates = nodes
        .iter()
        .zip(&short_ids)
        .map(|(node, short)| {
            if short_counts.get(short.as_str()) == Some(&1) {
                short.clone()
            } else {
                node.path.join(".")
            }
        })
        .collect::<Vec<_>>();

    let mut candidate_counts: FxHashMap<&str, usize> = FxHashMap::default();
    for id in &candidates {
        *candidate_counts.entry(id.as_str()).or_default() += 1;
    }

    // Unique candidates are reserved up front so suffixed duplicates never steal them.
    let mut taken: FxHashSet<String> = candidates
        .iter()
        .filter(|id| candidate_counts.get(id.as_str()) == Some(&1))
        .cloned()
        .collect();

    for (node, candidate) in nodes.iter_mut().zip(&candidates) {
        if candidate_counts.get(candidate.as_str()) == Some(&1) {
            node.element.id = candidate.clone();
            continue;
        }

        // Only reachable when siblings share an `id` attribute.
        let mut id = candidate.clone();
        let mut n = 2usize;
        while !taken.insert(id.clone()) {
            id = format!("{candidate}_{n}");
            n += 1;
        }
        node.element.id = id;
    }
}

fn short_id(path: &[String]) -> String {
    path.last().map(|s| camel_case(s)).unwrap_or_default()
}

/// `foo-bar_baz` → `fooBarBaz`, `XMLHttpRequest` → `xmlHttpRequest`, `Layer 1` → `layer1`.
pub fn camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, word) in split_words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            out.push_str(&upper_first(&lower));
        }
    }
    out
}

pub fn upper_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Splits on non-alphanumerics, lower→upper transitions, acronym ends and letter/digit changes.
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in input
        .split(|c: char| !c.is_alphanumeric())
        .filter(|c| !c.is_empty())
    {
        let chars = chunk.chars().collect::<Vec<_>>();
        let mut start = 0usize;
        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let cur = chars[i];
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && cur.is_uppercase())
                || (prev.is_alphabetic() && cur.is_numeric())
                || (prev.is_numeric() && cur.is_alphabetic())
                || (prev.is_uppercase()
                    && cur.is_uppercase()
                    && next.is_some_and(|n| n.is_lowercase()));
            if boundary {
                words.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        words.push(chars[start..].iter().collect());
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PathCommand, PathData, Style};

    fn flat(path: &[&str]) -> Flattened {
        Flattened {
            element: PathElement {
                id: String::new(),
                style: Style::default(),
                data: PathData {
                    d: vec![PathCommand::MoveTo { x: 0.0, y: 0.0 }],
                },
            },
            path: path.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn ids(nodes: &[Flattened]) -> Vec<&str> {
        nodes.iter().map(|n| n.element.id.as_str()).collect()
    }

    #[test]
    fn camel_case_splits_words() {
        assert_eq!(camel_case("foo-bar_baz"), "fooBarBaz");
        assert_eq!(camel_case("XMLHttpRequest"), "xmlHttpRequest");
        assert_eq!(camel_case("Layer 1"), "layer1");
        assert_eq!(camel_case("rect0"), "rect0");
        assert_eq!(camel_case("MainButton"), "mainButton");
        assert_eq!(camel_case("--"), "");
    }

    #[test]
    fn segment_name_prefers_id_attribute() {
        let mut attrs = IndexMap::new();
        assert_eq!(segment_name(&attrs, "rect", 3), "rect3");

        attrs.insert("id".to_string(), "main-button".to_string());
        assert_eq!(segment_name(&attrs, "rect", 3), "MainButton");

        attrs.insert("id".to_string(), "***".to_string());
        assert_eq!(segment_name(&attrs, "circle", 0), "circle0");
    }

    #[test]
    fn unique_short_ids_are_used() {
        let mut nodes = vec![flat(&["Layer1", "Box"]), flat(&["rect1"])];
        assign_ids(&mut nodes);
        assert_eq!(ids(&nodes), ["box", "rect1"]);
    }

    #[test]
    fn colliding_short_ids_fall_back_to_full_paths() {
        let mut nodes = vec![
            flat(&["Left", "Handle"]),
            flat(&["Right", "Handle"]),
            flat(&["Knob"]),
        ];
        assign_ids(&mut nodes);
        assert_eq!(ids(&nodes), ["Left.Handle", "Right.Handle", "knob"]);
    }

    #[test]
    fn duplicate_paths_still_get_distinct_ids() {
        let mut nodes = vec![flat(&["A"]), flat(&["A"]), flat(&["A_2"])];
        assign_ids(&mut nodes);
        let got = ids(&nodes);
        assert_eq!(got[2], "a2");
        assert_eq!(got[0], "A");
        assert_ne!(got[1], got[0]);
        assert_ne!(got[1], got[2]);
    }
}
