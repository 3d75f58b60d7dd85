//! Command definitions
//!
//! Represents requests sent to spamd.

use std::fmt;
use std::str::FromStr;

use crate::error::SpamcError;

/// Request verbs understood by spamd
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Ping,
    Check,
    Symbols,
    Report,
    ReportIfSpam,
    Process,
    Headers,
    Tell,
}

impl Verb {
    /// Verb as it appears on the request line
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Ping => "PING",
            Verb::Check => "CHECK",
            Verb::Symbols => "SYMBOLS",
            Verb::Report => "REPORT",
            Verb::ReportIfSpam => "REPORT_IFSPAM",
            Verb::Process => "PROCESS",
            Verb::Headers => "HEADERS",
            Verb::Tell => "TELL",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `Name: value` request header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A request ready to be encoded
#[derive(Debug, Clone)]
pub struct Request {
    /// Command verb
    pub verb: Verb,

    /// Message body; `None` for PING
    pub message: Option<String>,

    /// Extra headers, written in order after Content-length
    pub headers: Vec<Header>,
}

impl Request {
    /// Request without a body
    pub fn bare(verb: Verb) -> Self {
        Self {
            verb,
            message: None,
            headers: Vec::new(),
        }
    }

    /// Request carrying a message
    pub fn with_message(verb: Verb, message: impl Into<String>) -> Self {
        Self {
            verb,
            message: Some(message.into()),
            headers: Vec::new(),
        }
    }

    /// Append a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }
}

/// Training intent for `learn`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnType {
    Spam,
    Ham,
    Forget,
}

impl LearnType {
    /// TELL headers announcing this intent to spamd
    pub fn headers(&self) -> Vec<Header> {
        match self {
            LearnType::Spam => vec![
                Header::new("Message-class", "spam"),
                Header::new("Set", "local"),
            ],
            LearnType::Ham => vec![
                Header::new("Message-class", "ham"),
                Header::new("Set", "local"),
            ],
            LearnType::Forget => vec![Header::new("Remove", "local")],
        }
    }
}

impl FromStr for LearnType {
    type Err = SpamcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SPAM" => Ok(LearnType::Spam),
            "HAM" | "NOTSPAM" | "NOT_SPAM" => Ok(LearnType::Ham),
            "FORGET" => Ok(LearnType::Forget),
            _ => Err(SpamcError::InvalidLearnType(s.to_string())),
        }
    }
}
