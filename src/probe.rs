//! Probe client: one TCP exchange with the target
//!
//! The probe connects, sends `stats`, half-closes its side and waits for
//! the first chunk of the reply. That first chunk is the only success
//! signal; any transport failure before it is the only failure signal.
//! Exactly one of the two decides the outcome.

use crate::check::ProbeTarget;
use crate::config::ProbeConfig;
use crate::protocol::{STATS_COMMAND, is_complete};
use crate::{ProbeError, Result};
use bytes::BytesMut;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Raw `stats` reply and how long the first chunk took
#[derive(Debug, Clone)]
pub struct StatusResponse {
    /// Time from connection start to first received data
    pub elapsed: Duration,
    /// Unparsed reply bytes
    pub payload: BytesMut,
}

impl StatusResponse {
    /// Payload as text, invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }

    /// Elapsed time in whole milliseconds, the unit results are reported in
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

/// Outcome of a probe
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The server answered
    Up(StatusResponse),
    /// The server could not be reached; carries the transport failure
    Down(ProbeError),
}

/// Single-shot `stats` probe
pub struct Prober {
    config: ProbeConfig,
}

impl Prober {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    /// Probe the target once
    ///
    /// Never retries. The socket is owned by this call and closed before it
    /// returns, whatever the outcome.
    pub async fn probe(&self, target: &ProbeTarget) -> ProbeOutcome {
        let start = Instant::now();
        let deadline = self
            .config
            .timeout()
            .and_then(|limit| start.checked_add(limit));

        match self.exchange(target, start, deadline).await {
            Ok(response) => ProbeOutcome::Up(response),
            Err(e) => ProbeOutcome::Down(e),
        }
    }

    /// Await `fut`, bounded by `deadline` when one is set
    async fn within<F: Future>(&self, deadline: Option<Instant>, fut: F) -> Result<F::Output> {
        match deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| ProbeError::Timeout(self.config.timeout().unwrap_or_default())),
            None => Ok(fut.await),
        }
    }

    async fn exchange(
        &self,
        target: &ProbeTarget,
        start: Instant,
        deadline: Option<Instant>,
    ) -> Result<StatusResponse> {
        let addrs = self.within(deadline, resolve(target)).await??;
        let mut stream = self.within(deadline, connect(target, &addrs)).await??;

        if self.config.nodelay {
            if let Err(e) = stream.set_nodelay(true) {
                warn!("Failed to set TCP_NODELAY: {}", e);
            }
        }

        let connection_error = |source: std::io::Error| ProbeError::Connection {
            addr: target.addr(),
            source,
        };

        stream
            .write_all(STATS_COMMAND)
            .await
            .map_err(connection_error)?;
        // Half-close: no more requests from this side
        stream.shutdown().await.map_err(connection_error)?;

        let mut payload = BytesMut::with_capacity(self.config.read_buffer_size);
        let n = self
            .within(deadline, stream.read_buf(&mut payload))
            .await?
            .map_err(connection_error)?;
        if n == 0 {
            return Err(ProbeError::ConnectionClosed);
        }
        let elapsed = start.elapsed();
        debug!("First {} bytes from {} after {:?}", n, target.addr(), elapsed);

        self.drain(&mut stream, &mut payload, deadline).await;

        Ok(StatusResponse { elapsed, payload })
    }

    /// Keep reading the rest of the reply
    ///
    /// The outcome is already decided, so every stop condition (terminator,
    /// EOF, read error, deadline, size cap) just ends collection.
    async fn drain(
        &self,
        stream: &mut TcpStream,
        payload: &mut BytesMut,
        deadline: Option<Instant>,
    ) {
        while !is_complete(payload) && payload.len() < self.config.max_response_bytes {
            match self.within(deadline, stream.read_buf(payload)).await {
                Ok(Ok(0)) => break,
                Ok(Ok(_)) => {}
                Ok(Err(e)) => {
                    debug!("Read error after first response chunk: {}", e);
                    break;
                }
                Err(_) => {
                    debug!("Deadline hit while collecting the stats reply");
                    break;
                }
            }
        }
    }
}

async fn resolve(target: &ProbeTarget) -> Result<Vec<SocketAddr>> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((target.host.as_str(), target.port))
        .await
        .map_err(|e| {
            debug!("Resolving {} failed: {}", target.host, e);
            ProbeError::UnknownHost(target.host.clone())
        })?
        .collect();

    if addrs.is_empty() {
        return Err(ProbeError::UnknownHost(target.host.clone()));
    }
    Ok(addrs)
}

async fn connect(target: &ProbeTarget, addrs: &[SocketAddr]) -> Result<TcpStream> {
    TcpStream::connect(addrs)
        .await
        .map_err(|source| ProbeError::Connection {
            addr: target.addr(),
            source,
        })
}
