//! Configuration for the DNS server.
//!
//! This module defines the configuration structure and methods to load
//! configuration from environment variables.

use std::{env, net::SocketAddr};

use crate::errors::DnsError;

/// Default listen address.
pub const DEFAULT_BIND: &str = "0.0.0.0:53";

/// Default RDATA for TXT answers.
pub const DEFAULT_TXT_PAYLOAD: &str = "ZXC22";

/// Default bound on concurrently handled datagrams.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 1024;

/// Default capacity of the outbound datagram queue.
pub const DEFAULT_WRITE_QUEUE: usize = 1024;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the UDP socket to.
    pub bind_addr: SocketAddr,

    /// RDATA returned for TXT questions.
    pub txt_payload: String,

    /// Maximum number of handling units in flight.
    pub max_in_flight: usize,

    /// Capacity of the queue feeding the socket writer.
    pub write_queue: usize,

    /// Prometheus exporter address, if metrics are exported.
    pub metrics_addr: Option<SocketAddr>,
}

impl ServerConfig {
    /// Configuration with defaults for everything but the bind address.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            txt_payload: DEFAULT_TXT_PAYLOAD.into(),
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            write_queue: DEFAULT_WRITE_QUEUE,
            metrics_addr: None,
        }
    }

    /// Load server configuration from environment variables.
    ///
    /// # Returns
    /// A `Result` containing either the loaded `ServerConfig` or a `DnsError`.
    pub fn from_env() -> Result<Self, DnsError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DnsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("DNS_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.into())
            .parse()
            .map_err(|_| DnsError::Config("Invalid DNS_BIND address".into()))?;

        let metrics_addr = match lookup("DNS_METRICS_ADDR") {
            Some(v) if !v.trim().is_empty() => Some(
                v.trim()
                    .parse::<SocketAddr>()
                    .map_err(|_| DnsError::Config("Invalid DNS_METRICS_ADDR address".into()))?,
            ),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            txt_payload: lookup("DNS_TXT_PAYLOAD").unwrap_or_else(|| DEFAULT_TXT_PAYLOAD.into()),
            max_in_flight: positive(&lookup, "DNS_MAX_IN_FLIGHT", DEFAULT_MAX_IN_FLIGHT)?,
            write_queue: positive(&lookup, "DNS_WRITE_QUEUE", DEFAULT_WRITE_QUEUE)?,
            metrics_addr,
        })
    }
}

fn positive<F>(lookup: &F, key: &str, default: usize) -> Result<usize, DnsError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(v) => match v.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(DnsError::Config(format!("{} must be a positive integer", key))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, DnsError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:53".parse().unwrap());
        assert_eq!(config.txt_payload, "ZXC22");
        assert_eq!(config.max_in_flight, DEFAULT_MAX_IN_FLIGHT);
        assert_eq!(config.write_queue, DEFAULT_WRITE_QUEUE);
        assert!(config.metrics_addr.is_none());
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("DNS_BIND", "127.0.0.1:5353"),
            ("DNS_TXT_PAYLOAD", "hello"),
            ("DNS_MAX_IN_FLIGHT", "8"),
            ("DNS_WRITE_QUEUE", " 16 "),
            ("DNS_METRICS_ADDR", "127.0.0.1:9100"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 5353);
        assert_eq!(config.txt_payload, "hello");
        assert_eq!(config.max_in_flight, 8);
        assert_eq!(config.write_queue, 16);
        assert_eq!(config.metrics_addr, Some("127.0.0.1:9100".parse().unwrap()));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        for vars in [
            [("DNS_BIND", "nowhere")],
            [("DNS_MAX_IN_FLIGHT", "0")],
            [("DNS_WRITE_QUEUE", "lots")],
            [("DNS_METRICS_ADDR", "9100")],
        ] {
            assert!(matches!(load(&vars), Err(DnsError::Config(_))));
        }
    }
}
