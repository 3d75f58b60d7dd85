//! Protocol codec
//!
//! Request encoding and response line framing.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! <VERB> SPAMC/<version>\r\n
//! Content-length: <len(message) + 2>\r\n      (only with a message)
//! <Name>: <value>\r\n                         (zero or more)
//! \r\n
//! <message>\r\n
//! \r\n
//! ```
//!
//! ### Response
//! A status line followed by free-form `\r\n`-terminated lines. There is
//! no length prefix or end marker; the reply ends when spamd closes the
//! connection.

use bytes::{Bytes, BytesMut};

use super::Request;

/// Line terminator used in both directions
pub const CRLF: &[u8] = b"\r\n";

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request to bytes, including the final terminator
pub fn encode_request(request: &Request, protocol_version: &str) -> Bytes {
    let body_len = request.message.as_ref().map(|m| m.len()).unwrap_or(0);
    let mut buf = BytesMut::with_capacity(64 + body_len);

    buf.extend_from_slice(request.verb.as_str().as_bytes());
    buf.extend_from_slice(b" SPAMC/");
    buf.extend_from_slice(protocol_version.as_bytes());
    buf.extend_from_slice(CRLF);

    if let Some(message) = &request.message {
        let content_length = message.len() + CRLF.len();
        buf.extend_from_slice(format!("Content-length: {}", content_length).as_bytes());
        buf.extend_from_slice(CRLF);

        for header in &request.headers {
            buf.extend_from_slice(header.name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(header.value.as_bytes());
            buf.extend_from_slice(CRLF);
        }

        buf.extend_from_slice(CRLF);
        buf.extend_from_slice(message.as_bytes());
        buf.extend_from_slice(CRLF);
    }

    buf.extend_from_slice(CRLF);
    buf.freeze()
}

// =============================================================================
// Response Line Framing
// =============================================================================

/// Accumulates inbound chunks and splits them into non-empty lines
///
/// Bytes are held until their `\r\n` arrives, so a line split across
/// reads comes out whole.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: BytesMut,
    lines: Vec<String>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk and move every completed line to the output
    pub fn feed(&mut self, chunk: &[u8]) {
        // Pending bytes hold no CRLF, only a trailing '\r' can pair with the chunk
        let mut from = self.pending.len().saturating_sub(CRLF.len() - 1);
        self.pending.extend_from_slice(chunk);

        while let Some(pos) = find_crlf(&self.pending[from..]).map(|pos| pos + from) {
            let line = self.pending.split_to(pos + CRLF.len());
            self.push(&line[..pos]);
            from = 0;
        }
    }

    /// Lines completed so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Flush any unterminated tail and return all lines
    pub fn finish(mut self) -> Vec<String> {
        let tail = self.pending.split();
        self.push(&tail);
        self.lines
    }

    fn push(&mut self, raw: &[u8]) {
        // Blank lines are framing only
        if !raw.is_empty() {
            self.lines.push(String::from_utf8_lossy(raw).into_owned());
        }
    }
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(CRLF.len()).position(|w| w == CRLF)
}
