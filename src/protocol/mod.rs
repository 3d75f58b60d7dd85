//! Protocol Module
//!
//! The SPAMC text protocol spoken with spamd.
//!
//! ## Request Format
//! ```text
//! CHECK SPAMC/1.5\r\n
//! Content-length: 7\r\n
//! \r\n
//! Hello\r\n
//! \r\n
//! ```
//!
//! ## Response Format
//! ```text
//! SPAMD/1.5 0 EX_OK\r\n
//! Content-length: 24\r\n
//! Spam: True ; 15.0 / 5.0\r\n
//! \r\n
//! <verb-specific body>
//! ```
//!
//! ### Verbs
//! - PING, CHECK, SYMBOLS, REPORT, REPORT_IFSPAM, PROCESS, HEADERS
//! - TELL: learn/forget/report, intent carried in extra headers
//!
//! ### Status Codes
//! - 0: EX_OK
//! - 69: EX_UNAVAILABLE, returned for TELL when spamd runs without `--allow-tell`

mod command;
mod response;
mod codec;
mod parser;

pub use command::{Header, LearnType, Request, Verb};
pub use response::{ReportEntry, SpamdResponse, TellResult, EX_UNAVAILABLE};
pub use codec::{encode_request, LineBuffer, CRLF};
pub use parser::{
    fold_headers, parse_report, parse_response, parse_status_line, parse_symbols, parse_verdict,
    reassemble_message, StatusLine, Verdict, BODY_START,
};
