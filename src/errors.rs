//! Error types for the DNS server.
//!
//! This module defines the error types used throughout the DNS server implementation.

use thiserror::Error;

/// Represents errors that can occur in the DNS server.
#[derive(Error, Debug)]
pub enum DnsError {
    /// Socket bind, read or write failures.
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    /// The message is too short to contain the named field.
    #[error("Malformed message: {0} needs {1} bytes, {2} available")]
    MalformedMessage(&'static str, usize, usize),

    /// A read ran past the end of the buffer, or a label length is invalid.
    #[error("Truncated message while reading {0}")]
    TruncatedMessage(&'static str),

    /// A label exceeds 63 bytes or a name exceeds 255 bytes when encoded.
    #[error("Label too long: {0}")]
    LabelTooLong(String),

    /// An interior label of a name is empty.
    #[error("Empty label in domain name {0:?}")]
    EmptyLabel(String),

    /// The wire format uses a feature this server does not implement.
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(&'static str),

    /// RDATA does not fit the 16-bit length field.
    #[error("RDATA too long: {0} bytes")]
    RdataTooLong(usize),

    /// The encoded response does not fit a UDP datagram even without answers.
    #[error("Message too large: {0} bytes")]
    MessageTooLarge(usize),

    /// A header count disagrees with the length of its record list.
    #[error("Count mismatch in {section}: header says {declared}, message has {actual}")]
    CountMismatch {
        section: &'static str,
        declared: u16,
        actual: usize,
    },

    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DnsError {
    /// Short stable name of the error, used as a log field and metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            DnsError::Network(_) => "network",
            DnsError::MalformedMessage(..) => "malformed_message",
            DnsError::TruncatedMessage(_) => "truncated_message",
            DnsError::LabelTooLong(_) => "label_too_long",
            DnsError::EmptyLabel(_) => "empty_label",
            DnsError::UnsupportedFeature(_) => "unsupported_feature",
            DnsError::RdataTooLong(_) => "rdata_too_long",
            DnsError::MessageTooLarge(_) => "message_too_large",
            DnsError::CountMismatch { .. } => "count_mismatch",
            DnsError::Config(_) => "config",
        }
    }
}
