//! HTTP server for the statutory payroll engine.
//!
//! Environment:
//! - `PAYROLL_RATES`: rate table YAML (default `./config/rates.yaml`)
//! - `PORT`: listen port (default 8080)
//! - `RUST_LOG`: log filter (default `info`)

use std::net::SocketAddr;

use statutory_payroll::api::{AppState, create_router};
use statutory_payroll::config::ConfigLoader;
use tracing_subscriber::EnvFilter;

const DEFAULT_RATES_PATH: &str = "./config/rates.yaml";
const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let rates_path =
        std::env::var("PAYROLL_RATES").unwrap_or_else(|_| DEFAULT_RATES_PATH.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let loader = ConfigLoader::load(&rates_path)?;
    let app = create_router(AppState::from_loader(loader));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("statutory-payroll listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
