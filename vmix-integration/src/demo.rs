//! Fixed inputs shown while no physical device is targeted.

use serde::Serialize;
use vmix_parser::{InputRecord, PollResult};

fn demo_input(
    key: &str,
    number: u32,
    name: &str,
    short_title: &str,
    kind: &str,
    state: &str,
) -> InputRecord {
    InputRecord {
        key: key.to_string(),
        number,
        name: name.to_string(),
        short_title: short_title.to_string(),
        kind: kind.to_string(),
        state: state.to_string(),
        text_content: name.to_string(),
        ..InputRecord::new(number)
    }
}

/// The demo input list: a live camera, a slide deck in preview and a looping clip.
///
/// Deterministic; every call returns the same records in the same order.
pub fn demo_inputs() -> Vec<InputRecord> {
    let camera = InputRecord {
        selected: true,
        ..demo_input(
            "5f5639f7-58ac-42f3-bf4f-44e20e6150fe",
            1,
            "Camera 1",
            "CAM1",
            "Camera",
            "Live",
        )
    };

    let slides = InputRecord {
        looping: true,
        preview: true,
        ..demo_input(
            "7a8b9c0d-1e2f-4a3b-8c5d-6e7f8a9b0c1d",
            2,
            "PowerPoint Presentation",
            "PPT",
            "PowerPoint",
            "Stopped",
        )
    };

    let clip = InputRecord {
        duration: 300,
        looping: true,
        ..demo_input(
            "3a4b5c6d-7e8f-4901-a2b3-c4d5e6f7a8b9",
            3,
            "Video Clip",
            "VID",
            "Video",
            "Paused",
        )
    };

    vec![camera, slides, clip]
}

#[derive(Serialize)]
struct DemoPayload<'a> {
    demo: bool,
    inputs: &'a [InputRecord],
}

/// Pretty-printed JSON document describing the demo inputs.
pub fn demo_payload(inputs: &[InputRecord]) -> String {
    let payload = DemoPayload { demo: true, inputs };
    // Serializing plain strings, numbers and bools cannot fail
    serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{\"demo\": true}".to_string())
}

/// Demo inputs together with their JSON serialization as the raw payload.
pub fn demo_poll() -> PollResult {
    let inputs = demo_inputs();
    let raw_payload = demo_payload(&inputs);
    PollResult {
        inputs,
        raw_payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_inputs_are_deterministic() {
        assert_eq!(demo_inputs(), demo_inputs());
        assert_eq!(demo_poll(), demo_poll());
    }

    #[test]
    fn test_demo_inputs_cover_common_categories() {
        let inputs = demo_inputs();
        let kinds: Vec<&str> = inputs.iter().map(|i| i.kind.as_str()).collect();

        assert!(inputs.len() >= 2);
        assert_eq!(kinds, vec!["Camera", "PowerPoint", "Video"]);
    }

    #[test]
    fn test_demo_flags_are_consistent() {
        let inputs = demo_inputs();
        assert_eq!(inputs.iter().filter(|i| i.selected).count(), 1);
        assert_eq!(inputs.iter().filter(|i| i.preview).count(), 1);
        assert!(inputs[0].selected);
        assert!(inputs[1].preview);
        assert_eq!(inputs[2].duration, 300);
    }

    #[test]
    fn test_demo_payload_is_json() {
        let poll = demo_poll();
        let value: serde_json::Value = serde_json::from_str(&poll.raw_payload).unwrap();

        assert_eq!(value["demo"], true);
        assert_eq!(value["inputs"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["inputs"][1]["name"], "PowerPoint Presentation");
    }
}
