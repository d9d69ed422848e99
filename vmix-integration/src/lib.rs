//! Device-integration layer for the vMix dashboard
//!
//! [`IntegrationService`] is the single entry point for the web layer. It
//! holds the session state (demo or live mode, committed endpoint, last raw
//! payload) and either answers from fixed demo data or polls the device
//! through [`vmix_client::DeviceClient`] and normalizes the answer with
//! [`vmix_parser`].
//!
//! ```no_run
//! use vmix_integration::{IntegrationConfig, IntegrationService, Mode};
//!
//! # async fn run() -> vmix_integration::Result<()> {
//! let service = IntegrationService::new(IntegrationConfig::default())?;
//!
//! service.toggle_mode(Some(Mode::Live));
//! let outcome = service.connect("192.168.1.20").await?;
//! println!("{}", outcome.message);
//!
//! for input in service.inputs().await.inputs {
//!     println!("{} {}", input.number, input.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod demo;
pub mod error;
pub mod logging;
mod service;
mod session;

pub use error::{IntegrationError, Result};
pub use service::{
    ConnectOutcome, ConnectionStatus, IntegrationConfig, IntegrationService, ModeChange,
    NOT_CONNECTED_PAYLOAD, NO_PAYLOAD_YET,
};
pub use session::Mode;

pub use vmix_client::{EndpointConfig, EndpointError};
pub use vmix_parser::{InputRecord, PollResult};
