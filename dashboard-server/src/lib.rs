//! HTTP front end for the vMix dashboard.
//!
//! This crate is a thin layer over [`vmix_integration::IntegrationService`]:
//!
//! - [`router`]: warp route table translating HTTP requests into service calls
//! - [`page`]: the HTML index page
//! - [`clock`]: current time and Dutch weekday
//! - [`config`]: environment-driven settings
//! - [`DashboardServer`]: binding with port retry and graceful shutdown
//!
//! No device logic lives here; every answer comes from the service.

pub mod clock;
pub mod config;
pub mod page;
pub mod router;
mod server;

pub use config::{ConfigError, DashboardConfig};
pub use server::{DashboardServer, ServerError};
