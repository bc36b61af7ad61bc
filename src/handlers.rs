//! Request handlers for the DNS server.
//!
//! This module provides the UDP dispatcher: one read loop, one task per
//! received datagram, and a single writer task that owns outbound sends.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::{
    net::UdpSocket,
    sync::{mpsc, Semaphore},
    task,
};

use crate::answer::AnswerPolicy;
use crate::config::ServerConfig;
use crate::dns::generate_dns_response;
use crate::errors::DnsError;
use crate::message::UDP_MAX_MESSAGE_SIZE;
use crate::metrics;

/// A response datagram waiting to be sent.
#[derive(Debug)]
pub struct Outbound {
    pub bytes: Vec<u8>,
    pub dest: SocketAddr,
}

/// Run the UDP DNS server.
///
/// Binding failure is returned to the caller; once bound the server runs
/// until the process stops.
pub async fn run_udp_server(config: ServerConfig) -> Result<(), DnsError> {
    let socket = UdpSocket::bind(config.bind_addr).await?;
    info!("UDP DNS server listening on {}", config.bind_addr);
    serve_udp(socket, config).await
}

/// Serve queries on an already bound socket.
pub async fn serve_udp(socket: UdpSocket, config: ServerConfig) -> Result<(), DnsError> {
    let socket = Arc::new(socket);
    let (outbound, queue) = mpsc::channel(config.write_queue);
    task::spawn(run_writer(socket.clone(), queue));

    let dispatcher = Dispatcher::new(
        AnswerPolicy::new(config.txt_payload.clone()),
        Arc::new(Semaphore::new(config.max_in_flight)),
        outbound,
    );
    dispatcher.run(&socket).await
}

/// Reads datagrams and spawns one handling unit per datagram, at most
/// as many at once as the limiter has permits.
pub struct Dispatcher {
    policy: Arc<AnswerPolicy>,
    limiter: Arc<Semaphore>,
    outbound: mpsc::Sender<Outbound>,
}

impl Dispatcher {
    pub fn new(
        policy: AnswerPolicy,
        limiter: Arc<Semaphore>,
        outbound: mpsc::Sender<Outbound>,
    ) -> Self {
        Self {
            policy: Arc::new(policy),
            limiter,
            outbound,
        }
    }

    /// Run the read loop. Returns only if the limiter is closed.
    pub async fn run(&self, socket: &UdpSocket) -> Result<(), DnsError> {
        let mut buf = [0u8; UDP_MAX_MESSAGE_SIZE];
        loop {
            let (amt, src) = match socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    error!("UDP receive error: {}", e);
                    continue;
                }
            };
            info!("Received request from {}", src);
            metrics::record_request();

            // Waits here while max_in_flight units are running.
            let permit = self
                .limiter
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "admission limiter closed"))?;

            let query = buf[..amt].to_vec();
            let policy = self.policy.clone();
            let outbound = self.outbound.clone();
            task::spawn(async move {
                if let Err(e) = handle_udp_query(&query, src, &policy, &outbound).await {
                    metrics::record_dropped(&e);
                    warn!("Dropped query from {}: [{}] {}", src, e.kind(), e);
                }
                drop(permit);
            });
        }
    }
}

/// Handle one UDP DNS query: build the response and queue it for sending.
///
/// # Arguments
/// * `query` - The received datagram.
/// * `src` - The client address the response goes back to.
/// * `policy` - The answer policy.
/// * `outbound` - The writer queue.
pub async fn handle_udp_query(
    query: &[u8],
    src: SocketAddr,
    policy: &AnswerPolicy,
    outbound: &mpsc::Sender<Outbound>,
) -> Result<(), DnsError> {
    let response = generate_dns_response(query, policy)?;
    if let Some(flags_lo) = response.get(3) {
        metrics::record_response(flags_lo & 0x0f);
    }
    debug!("Queueing {} byte response for {}", response.len(), src);

    outbound
        .send(Outbound {
            bytes: response,
            dest: src,
        })
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "UDP writer stopped"))?;
    Ok(())
}

/// Send queued responses one datagram at a time until every sender is gone.
async fn run_writer(socket: Arc<UdpSocket>, mut queue: mpsc::Receiver<Outbound>) {
    while let Some(Outbound { bytes, dest }) = queue.recv().await {
        if let Err(e) = socket.send_to(&bytes, dest).await {
            metrics::record_send_error();
            warn!("UDP send to {} failed: [{:?}] {}", dest, e.kind(), e);
        }
    }
    debug!("UDP writer stopped");
}
