//! dnsserv
//!
//! Answers TXT queries over UDP with a configured payload.

use log::info;
use tokio::signal;

use dnsserv::{config::ServerConfig, errors::DnsError, handlers::run_udp_server, metrics};

#[tokio::main]
async fn main() -> Result<(), DnsError> {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    // Load configuration from environment variables
    let config = ServerConfig::from_env()?;

    if let Some(addr) = config.metrics_addr {
        metrics::start_prometheus_exporter(addr)?;
    }

    let shutdown_signal = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    // Wait for either a shutdown signal or server error
    tokio::select! {
        _ = shutdown_signal => Ok(()),
        res = run_udp_server(config) => res,
    }
}
