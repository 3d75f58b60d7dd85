//! Connection Driver
//!
//! Runs one request/response exchange with spamd.
//!
//! ```text
//! Idle ─► Connecting ─► Connected ─► Receiving ─► Closed
//!              │             │            │
//!              └─────────────┴────────────┴──► TimedOut / Errored
//! ```
//!
//! The reply has no length prefix or terminator: it is complete when
//! spamd closes its side of the socket.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;

use crate::config::Config;
use crate::error::{Result, SpamcError};
use crate::protocol::LineBuffer;

/// Size of each socket read
const READ_CHUNK_SIZE: usize = 8192;

/// A single-use exchange with spamd
///
/// Every call to [`Connection::exchange`] opens its own socket and
/// closes it before returning.
#[derive(Debug, Clone)]
pub struct Connection {
    /// `host:port` of the daemon
    addr: String,

    /// Deadline for connect + write + read-until-close
    timeout: Duration,
}

impl Connection {
    /// Create a driver for the daemon named in `config`
    pub fn new(config: &Config) -> Self {
        Self {
            addr: config.addr(),
            timeout: config.timeout(),
        }
    }

    /// Send `request` and collect the non-empty reply lines
    ///
    /// Resolves exactly once: with the lines once spamd closes the
    /// connection, or with an error on a socket failure or timeout.
    /// On timeout the in-flight exchange is dropped, so nothing that
    /// arrives later is observed.
    pub async fn exchange(&self, request: &[u8]) -> Result<Vec<String>> {
        match time::timeout(self.timeout, self.run(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    "Connection to spamd at {} timed out after {:?}",
                    self.addr,
                    self.timeout
                );
                Err(SpamcError::Timeout {
                    addr: self.addr.clone(),
                    after: self.timeout,
                })
            }
        }
    }

    async fn run(&self, request: &[u8]) -> Result<Vec<String>> {
        tracing::debug!("Connecting to spamd at {}", self.addr);

        let mut stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| self.transport(e))?;

        // Disable Nagle's algorithm, the request goes out in one write
        stream.set_nodelay(true).map_err(|e| self.transport(e))?;

        tracing::trace!("Connected to {}, sending {} bytes", self.addr, request.len());

        let (mut reader, mut writer) = stream.split();

        // Reading starts alongside the write, spamd may answer early
        let write = async move {
            writer.write_all(request).await?;
            writer.flush().await
        };
        let read = async move {
            let mut lines = LineBuffer::new();
            let mut chunk = vec![0u8; READ_CHUNK_SIZE];
            loop {
                let n = reader.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                tracing::trace!("Received {} bytes from spamd", n);
                lines.feed(&chunk[..n]);
            }
            Ok::<_, io::Error>(lines.finish())
        };

        let (written, received) = tokio::join!(write, read);
        let lines = received.map_err(|e| self.transport(e))?;

        if let Err(e) = written {
            // A reply that arrived anyway still counts
            if lines.is_empty() {
                return Err(self.transport(e));
            }
            tracing::debug!("Write to {} failed after spamd replied: {}", self.addr, e);
        }

        tracing::debug!(
            "spamd at {} closed the connection after {} lines",
            self.addr,
            lines.len()
        );
        Ok(lines)
    }

    fn transport(&self, source: io::Error) -> SpamcError {
        tracing::warn!("spamd at {} failed: {}", self.addr, source);
        SpamcError::Transport {
            addr: self.addr.clone(),
            source,
        }
    }

    /// Get the daemon address string
    pub fn addr(&self) -> &str {
        &self.addr
    }
}
