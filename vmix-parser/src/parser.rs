//! vMix status document parser
//!
//! The document served at `/api` looks like:
//!
//! ```xml
//! <vmix>
//!   <version>27.0.0.49</version>
//!   <inputs>
//!     <input key="26cae087-..." number="1" type="Capture" title="Camera 1"
//!            shortTitle="CAM1" state="Running" position="0" duration="0"
//!            loop="False">Camera 1</input>
//!   </inputs>
//!   <active>1</active>
//!   <preview>2</preview>
//! </vmix>
//! ```
//!
//! Devices omit attributes depending on the input type, so every attribute
//! except `number` falls back to a named default instead of failing.

use std::collections::HashMap;

use tracing::debug;
use xmltree::{Element, XMLNode};

use crate::error::{ParseError, ParseResult};
use crate::model::{InputRecord, PollResult, DEFAULT_NAME, DEFAULT_TYPE};

/// Structured view of a vMix status document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VmixStatus {
    /// Number of the input currently on air
    pub active: Option<u32>,
    /// Number of the input currently in preview
    pub preview: Option<u32>,
    /// Inputs in document order, with selected/preview already derived
    pub inputs: Vec<InputRecord>,
}

impl VmixStatus {
    /// Parse a status document.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MalformedDocument` if the body is not well-formed
    /// XML and `ParseError::InvalidInputNumber` if an `input` lacks a usable
    /// `number`.
    pub fn from_xml(xml: &str) -> ParseResult<Self> {
        let root = parse_document(xml)?;

        let active = child_number(&root, "active");
        let preview = child_number(&root, "preview");

        let inputs = match root.get_child("inputs") {
            Some(inputs) => inputs
                .children
                .iter()
                .filter_map(XMLNode::as_element)
                .filter(|element| element.name == "input")
                .enumerate()
                .map(|(index, element)| map_input(index, element, active, preview))
                .collect::<ParseResult<Vec<_>>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            active,
            preview,
            inputs,
        })
    }

    /// Attach the source payload, producing a poll result.
    pub fn into_poll_result(self, raw_payload: impl Into<String>) -> PollResult {
        PollResult {
            inputs: self.inputs,
            raw_payload: raw_payload.into(),
        }
    }
}

/// Parse a raw status document into a poll result that keeps `raw` as its payload.
pub fn parse(raw: &str) -> ParseResult<PollResult> {
    let status = VmixStatus::from_xml(raw)?;
    debug!(
        inputs = status.inputs.len(),
        active = ?status.active,
        preview = ?status.preview,
        "Parsed vMix status document"
    );
    Ok(status.into_poll_result(raw))
}

/// Check that `raw` is well-formed XML without interpreting it.
pub fn ensure_well_formed(raw: &str) -> ParseResult<()> {
    parse_document(raw).map(|_| ())
}

fn parse_document(raw: &str) -> ParseResult<Element> {
    Element::parse(raw.as_bytes()).map_err(|e| ParseError::MalformedDocument(e.to_string()))
}

fn child_number(root: &Element, name: &str) -> Option<u32> {
    root.get_child(name)
        .and_then(|element| element.get_text())
        .and_then(|text| text.trim().parse::<u32>().ok())
}

fn map_input(
    index: usize,
    element: &Element,
    active: Option<u32>,
    preview: Option<u32>,
) -> ParseResult<InputRecord> {
    let attrs = &element.attributes;

    let raw_number = attrs.get("number");
    let number = raw_number
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|number| *number > 0)
        .ok_or_else(|| ParseError::InvalidInputNumber {
            index,
            value: raw_number.cloned(),
        })?;

    Ok(InputRecord {
        key: text_attr(attrs, "key", ""),
        number,
        name: text_attr(attrs, "title", DEFAULT_NAME),
        short_title: text_attr(attrs, "shortTitle", ""),
        kind: text_attr(attrs, "type", DEFAULT_TYPE),
        state: text_attr(attrs, "state", ""),
        position: numeric_attr(attrs, "position"),
        duration: numeric_attr(attrs, "duration"),
        looping: attrs.get("loop").map(String::as_str) == Some("True"),
        text_content: element
            .get_text()
            .map(|text| text.trim().to_string())
            .unwrap_or_default(),
        selected: active == Some(number),
        preview: preview == Some(number),
    })
}

fn text_attr(attrs: &HashMap<String, String>, name: &str, default: &str) -> String {
    match attrs.get(name) {
        Some(value) if !value.is_empty() => value.clone(),
        _ => default.to_string(),
    }
}

fn numeric_attr(attrs: &HashMap<String, String>, name: &str) -> u64 {
    attrs
        .get(name)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}
