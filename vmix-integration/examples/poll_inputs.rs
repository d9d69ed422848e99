//! Poll a vMix instance once and print its inputs.
//!
//! ```text
//! cargo run -p vmix-dashboard-integration --example poll_inputs -- 192.168.1.20:8088
//! ```
//!
//! Without an argument the demo inputs are printed.

use vmix_integration::{logging, IntegrationConfig, IntegrationService, Mode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging_from_env()?;

    let service = IntegrationService::new(IntegrationConfig::default())?;

    if let Some(endpoint) = std::env::args().nth(1) {
        service.toggle_mode(Some(Mode::Live));
        let outcome = service.connect(&endpoint).await?;
        println!("{}", outcome.message);
    }

    let status = service.status().await;
    println!(
        "mode: {}  connected: {}  endpoint: {}",
        status.mode, status.connected, status.endpoint
    );

    let poll = service.inputs().await;
    for input in &poll.inputs {
        let marker = match (input.selected, input.preview) {
            (true, _) => "ACTIVE ",
            (false, true) => "PREVIEW",
            _ => "       ",
        };
        println!(
            "{} {:>3}  {:<30} {:<12} {}",
            marker, input.number, input.name, input.kind, input.state
        );
    }

    if poll.is_empty() {
        println!("{}", poll.raw_payload);
    }

    Ok(())
}
