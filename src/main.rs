//! Home IR API Server
//!
//! REST API for switching lights and the air conditioner over infrared.
//!
//! Usage:
//!   cargo run --bin home_ir_api
//!
//! Environment:
//!   IR_CODE_DIR, IR_LIGHT_RESOURCES_PATH, IR_AC_RESOURCES_PATH,
//!   TRANSMITTER_DEVICE     - required
//!   IR_CTL_BIN             - transmission tool (default: ir-ctl)
//!   IR_TRANSMIT_TIMEOUT_SECS - per-transmission timeout (default: 10)
//!   HOME_IR_HOST           - Server host (default: 0.0.0.0)
//!   PORT / HOME_IR_PORT    - Server port (default: 8000)
//!   RUST_LOG               - Log filter (default: info)
//!
//! Variables not exported in the environment are read from `./.env`.

use home_ir::{create_router, AppState, Config, Device};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!(code = e.code().as_str(), "Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    report_dir("IR code", &config.ir_code_dir);
    report_dir("Light resources", config.resources_dir(Device::Light));
    report_dir("AC resources", config.resources_dir(Device::Ac));
    info!(
        program = %config.transmitter.program,
        device = %config.transmitter.device,
        timeout_ms = config.transmitter.timeout.as_millis() as u64,
        "Transmitter configured"
    );

    let addr = config.bind_addr()?;
    let state = Arc::new(AppState::new(config));
    let stats_state = state.clone();
    let app = create_router(state);

    info!("Home IR API starting on http://{}", addr);
    info!("Endpoints:");
    info!("  GET       /light/modes        - Available light modes");
    info!("  GET|POST  /light/<mode>       - on, off, bright, dark, all-bright");
    info!("  GET       /ac/status          - Available AC commands");
    info!("  GET|POST  /ac/...             - AC mode, temperature and timer");
    info!("  GET       /stats              - Transmission statistics");
    info!("  GET       /health             - Health check");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Shutdown signal received");
    let stats = stats_state.stats.get_stats();
    info!(
        total = stats.total_commands,
        sent = stats.total_sent,
        resource_missing = stats.total_resource_missing,
        failed = stats.total_failed,
        "Final transmission stats"
    );
    info!("Home IR API shutdown complete");

    Ok(())
}

/// Directories are checked once for the startup log; a missing one is not fatal
fn report_dir(label: &str, dir: &Path) {
    if dir.is_dir() {
        info!("{} directory: {}", label, dir.display());
    } else {
        warn!("{} directory does not exist: {}", label, dir.display());
    }
}
