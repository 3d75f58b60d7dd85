//! Network Module
//!
//! TCP handling for talking to spamd.
//!
//! ## Architecture
//! - One connection per command, never pooled or reused
//! - Async I/O on the tokio reactor
//! - Whole exchange bounded by the configured timeout

mod connection;

pub use connection::Connection;
