//! Error types for spamc
//!
//! Provides a unified error type for all client operations.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using SpamcError
pub type Result<T> = std::result::Result<T, SpamcError>;

/// Unified error type for spamc operations
#[derive(Debug, Error)]
pub enum SpamcError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("spamd returned a error ({addr}): {source}")]
    Transport {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection to spamd at {addr} timed out after {}s", .after.as_secs())]
    Timeout { addr: String, after: Duration },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Daemon-side Rejections
    // -------------------------------------------------------------------------
    #[error("TELL commands are not enabled, set the --allow-tell switch.")]
    TellDisabled,

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Learn type not found: {0}")]
    InvalidLearnType(String),
}

impl SpamcError {
    /// True when the failure happened on the wire (connect, I/O or timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, SpamcError::Transport { .. } | SpamcError::Timeout { .. })
    }
}
