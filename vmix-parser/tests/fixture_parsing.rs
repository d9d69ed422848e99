//! Fixture-based tests for vMix status documents
//!
//! The fixtures mirror documents captured from vMix installations of
//! different editions and input mixes.

use std::fs;
use std::path::PathBuf;

use rstest::rstest;
use vmix_parser::{parse, VmixStatus};

fn load_fixture(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(filename);

    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e))
}

#[test]
fn test_production_document() {
    let xml = load_fixture("vmix_production.xml");
    let status = VmixStatus::from_xml(&xml).expect("Failed to parse production fixture");

    assert_eq!(status.active, Some(1));
    assert_eq!(status.preview, Some(3));

    let names: Vec<&str> = status.inputs.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Camera 1", "Announcements.pptx", "Intro.mp4", "Lower Third.gtzip", "Black"]
    );

    let camera = &status.inputs[0];
    assert!(camera.selected);
    assert!(!camera.preview);
    assert_eq!(camera.kind, "Capture");
    assert_eq!(camera.state, "Running");

    let clip = &status.inputs[2];
    assert!(clip.preview);
    assert!(!clip.selected);
    assert_eq!(clip.position, 12480);
    assert_eq!(clip.duration, 300000);
    assert!(clip.looping);

    let title = &status.inputs[3];
    assert_eq!(title.text_content, "Lower Third.gtzip");

    let colour = &status.inputs[4];
    assert_eq!(colour.short_title, "");
    assert!(!colour.looping);
}

#[test]
fn test_production_document_has_single_active_and_preview() {
    let result = parse(&load_fixture("vmix_production.xml")).unwrap();

    assert_eq!(result.inputs.iter().filter(|i| i.selected).count(), 1);
    assert_eq!(result.inputs.iter().filter(|i| i.preview).count(), 1);
    assert_eq!(result.active().map(|i| i.number), Some(1));
    assert_eq!(result.previewed().map(|i| i.number), Some(3));
}

#[test]
fn test_sparse_document_defaults() {
    let result = parse(&load_fixture("vmix_sparse.xml")).unwrap();

    assert_eq!(result.inputs.len(), 2);

    let blank = &result.inputs[0];
    assert_eq!(blank.name, "Untitled");
    assert_eq!(blank.kind, "Blank");
    assert_eq!(blank.text_content, "Blank");

    let key = &result.inputs[1];
    assert_eq!(key.name, "Stream Key");
    assert_eq!(key.kind, "Unknown");
    assert!(!key.looping);
    assert_eq!(key.position, 0);
    assert!(result.inputs.iter().all(|i| !i.selected && !i.preview));
}

#[rstest]
#[case("vmix_production.xml", 5)]
#[case("vmix_empty.xml", 0)]
#[case("vmix_sparse.xml", 2)]
fn test_fixture_input_counts(#[case] fixture: &str, #[case] expected: usize) {
    let xml = load_fixture(fixture);
    let result = parse(&xml).unwrap_or_else(|e| panic!("Failed to parse {}: {}", fixture, e));

    assert_eq!(result.inputs.len(), expected);
    assert_eq!(result.raw_payload, xml);
}

#[test]
fn test_serialized_inputs_match_api_shape() {
    let result = parse(&load_fixture("vmix_production.xml")).unwrap();
    let json = serde_json::to_value(&result.inputs).unwrap();

    let first = &json[0];
    for field in [
        "key",
        "number",
        "name",
        "shortTitle",
        "type",
        "state",
        "position",
        "duration",
        "loop",
        "textContent",
        "selected",
        "preview",
    ] {
        assert!(first.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(first["selected"], true);
}
