//! # spamc
//!
//! An async client for the SPAMC protocol spoken by SpamAssassin's
//! `spamd`:
//! - Spam verdicts, scores, matched symbols and rule reports
//! - Rewritten messages and headers
//! - Bayes training through TELL (learn, forget, report, revoke)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! │        (ping, check, symbols, report, ..., revoke)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ Request
//!                       ▼
//!               ┌───────────────┐
//!               │     Codec     │  encode_request
//!               └───────┬───────┘
//!                       │ bytes
//!                       ▼
//!               ┌───────────────┐
//!               │  Connection   │  connect, write, read until close
//!               └───────┬───────┘
//!                       │ lines
//!                       ▼
//!               ┌───────────────┐
//!               │    Parser     │  status, verdict, symbols, report
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! # async fn run() -> spamc::Result<()> {
//! let client = spamc::Client::new(spamc::Config::builder().host("10.0.0.5").build());
//! let verdict = client.check("Subject: hi\r\n\r\nHello").await?;
//! println!("spam: {:?}, score: {:?}", verdict.is_spam, verdict.spam_score);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod network;
pub mod protocol;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{SpamcError, Result};
pub use config::Config;
pub use client::Client;
pub use protocol::{LearnType, ReportEntry, SpamdResponse, TellResult};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of spamc
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
