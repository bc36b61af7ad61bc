//! Metrics instrumentation.
//!
//! All metrics are prefixed with `dns.udp.`

use std::net::SocketAddr;

use log::info;
use metrics::increment_counter;
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::errors::DnsError;

/// Record a received datagram.
pub fn record_request() {
    increment_counter!("dns.udp.requests");
}

/// Record a response handed to the writer, labelled by RCODE.
pub fn record_response(rcode: u8) {
    let rcode = match rcode {
        0 => "noerror",
        3 => "nxdomain",
        _ => "other",
    };
    increment_counter!("dns.udp.responses", "rcode" => rcode);
}

/// Record a datagram dropped without a response.
pub fn record_dropped(err: &DnsError) {
    increment_counter!("dns.udp.dropped", "reason" => err.kind());
}

/// Record a failed outbound write.
pub fn record_send_error() {
    increment_counter!("dns.udp.send_errors");
}

/// Start the Prometheus HTTP exporter. Must run inside a tokio runtime.
pub fn start_prometheus_exporter(addr: SocketAddr) -> Result<(), DnsError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| DnsError::Config(format!("Prometheus exporter: {}", e)))?;

    info!("Prometheus metrics exporter listening on {}", addr);
    Ok(())
}
