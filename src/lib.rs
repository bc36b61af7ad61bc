//! dnsserv library
//!
//! A small DNS server that answers TXT questions over UDP with a configured
//! payload. It decodes RFC1035 queries, synthesizes answers from an
//! in-memory policy and encodes exactly one response datagram per query.

pub mod answer;
pub mod codec;
pub mod config;
pub mod dns;
pub mod errors;
pub mod handlers;
pub mod message;
pub mod metrics;
pub mod utils;

// Re-export commonly used items
pub use answer::AnswerPolicy;
pub use config::ServerConfig;
pub use errors::DnsError;
pub use message::{Header, Message, Question, ResourceRecord};
