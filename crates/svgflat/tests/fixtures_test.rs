use std::path::PathBuf;

use svgflat::{ConvertOptions, PathCommand, Rect, Warning, convert_str};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn convert_fixture(name: &str) -> svgflat::Conversion {
    let path = workspace_root().join("fixtures").join(name);
    let text = std::fs::read_to_string(&path).expect("fixture");
    convert_str(&text, &ConvertOptions::default()).expect("convert ok")
}

#[test]
fn basic_fixture_converts_single_rect() {
    let out = convert_fixture("basic.svg");
    assert_eq!(out.scene.data.rect, Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(out.scene.children().len(), 1);

    let rect = &out.scene.children()[0];
    assert_eq!(rect.id, "box");
    assert_eq!(rect.style.fill.as_deref(), Some("red"));
    assert_eq!(rect.data.d.first(), Some(&PathCommand::MoveTo { x: 0.0, y: 0.0 }));
}

#[test]
fn toggle_fixture_flattens_groups_in_document_order() {
    let out = convert_fixture("toggle.svg");
    let ids = out
        .scene
        .children()
        .iter()
        .map(|e| e.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        ids,
        [
            "trackBody",
            "Track.Left.Handle",
            "path1",
            "Track.Right.Handle",
            "polyline1",
            "ellipse3",
            "line4",
            "polygon5",
        ]
    );

    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), ids.len());

    for element in out.scene.children() {
        assert!(!element.data.d.is_empty(), "{} has no geometry", element.id);
    }
}

#[test]
fn toggle_fixture_resolves_inherited_styles() {
    let out = convert_fixture("toggle.svg");
    let scene = &out.scene;

    let left = scene.find("Track.Left.Handle").unwrap();
    assert_eq!(left.style.fill.as_deref(), Some("#ffffff"));
    assert_eq!(left.style.stroke.as_deref(), Some("#808080"));
    assert_eq!(left.style.stroke_width, Some(2.0));
    assert_eq!(left.data.d[0], PathCommand::MoveTo { x: 10.0, y: 30.0 });

    let right = scene.find("Track.Right.Handle").unwrap();
    assert_eq!(right.style.fill.as_deref(), Some("#3a7bd5"));
    assert_eq!(right.data.d[0], PathCommand::MoveTo { x: 70.0, y: 30.0 });

    let stroke = scene.find("path1").unwrap();
    assert_eq!(stroke.style.stroke_linecap.as_deref(), Some("round"));
    assert_eq!(stroke.style.stroke_opacity, 0.5);
    assert_eq!(stroke.style.fill.as_deref(), Some("#d0d0d0"));

    let check = scene.find("polyline1").unwrap();
    assert_eq!(check.style.fill.as_deref(), Some("none"));
    assert_eq!(check.style.stroke_width, Some(3.0));

    let polygon = scene.find("polygon5").unwrap();
    assert_eq!(polygon.style.fill, None);
    assert_eq!(polygon.data.d.last(), Some(&PathCommand::Close));
}

#[test]
fn toggle_fixture_reports_skipped_elements() {
    let out = convert_fixture("toggle.svg");
    assert_eq!(
        out.warnings,
        vec![
            Warning::UnsupportedElement {
                path: "defs0".to_string(),
                element: "defs".to_string(),
            },
            Warning::UnsupportedElement {
                path: "text2".to_string(),
                element: "text".to_string(),
            },
        ]
    );
}

#[test]
fn fixtures_convert_identically_twice() {
    for name in ["basic.svg", "toggle.svg"] {
        let a = serde_json::to_string(&convert_fixture(name)).unwrap();
        let b = serde_json::to_string(&convert_fixture(name)).unwrap();
        assert_eq!(a, b, "{name}");
    }
}
