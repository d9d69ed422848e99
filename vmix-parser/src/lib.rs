//! # vmix-parser
//!
//! Normalizes the XML document served by vMix at `http://{host}:{port}/api`
//! into a stable model of inputs with active/preview flags.
//!
//! ```rust
//! let xml = r#"<vmix><active>1</active><preview>2</preview><inputs>
//!   <input key="a" number="1" title="Camera 1" type="Capture">Camera 1</input>
//!   <input key="b" number="2" type="Video" loop="True"/>
//! </inputs></vmix>"#;
//!
//! let result = vmix_parser::parse(xml).unwrap();
//! assert!(result.inputs[0].selected);
//! assert_eq!(result.inputs[1].name, "Untitled");
//! assert!(result.inputs[1].looping);
//! ```

pub mod error;
pub mod model;
pub mod parser;

pub use error::{ParseError, ParseResult};
pub use model::{InputRecord, PollResult};
pub use parser::{ensure_well_formed, parse, VmixStatus};
