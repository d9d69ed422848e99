//! Normalized representation of vMix inputs.

use serde::{Deserialize, Serialize};

/// Display name used when an input carries no title.
pub const DEFAULT_NAME: &str = "Untitled";

/// Category label used when an input carries no type.
pub const DEFAULT_TYPE: &str = "Unknown";

/// One source managed by the device (camera, slide deck, clip, ...).
///
/// Field names serialize exactly as the dashboard API exposes them
/// (`shortTitle`, `type`, `loop`, `textContent`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    /// Opaque identifier assigned by vMix, may be empty
    pub key: String,
    /// Position of the input in the device's input list
    pub number: u32,
    /// Display title
    pub name: String,
    pub short_title: String,
    /// Category label such as `Capture`, `Video` or `PowerPoint`
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form playback state (`Running`, `Paused`, ...)
    pub state: String,
    /// Playback position in milliseconds
    pub position: u64,
    /// Duration in milliseconds
    pub duration: u64,
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Element text of the input
    pub text_content: String,
    /// True when this input is on air
    pub selected: bool,
    /// True when this input is staged in preview
    pub preview: bool,
}

impl InputRecord {
    /// Create a record with every optional field at its documented default.
    pub fn new(number: u32) -> Self {
        Self {
            key: String::new(),
            number,
            name: DEFAULT_NAME.to_string(),
            short_title: String::new(),
            kind: DEFAULT_TYPE.to_string(),
            state: String::new(),
            position: 0,
            duration: 0,
            looping: false,
            text_content: String::new(),
            selected: false,
            preview: false,
        }
    }
}

/// Outcome of one poll: inputs in device order plus the payload they came from.
///
/// Inputs are never deduplicated; if the device reports the same number twice
/// both records are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PollResult {
    pub inputs: Vec<InputRecord>,
    /// Raw source payload, kept for diagnostic passthrough
    pub raw_payload: String,
}

impl PollResult {
    /// A result with no inputs, carrying only a diagnostic payload.
    pub fn empty(raw_payload: impl Into<String>) -> Self {
        Self {
            inputs: Vec::new(),
            raw_payload: raw_payload.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// The input currently on air, if any.
    pub fn active(&self) -> Option<&InputRecord> {
        self.inputs.iter().find(|input| input.selected)
    }

    /// The input currently in preview, if any.
    pub fn previewed(&self) -> Option<&InputRecord> {
        self.inputs.iter().find(|input| input.preview)
    }
}
