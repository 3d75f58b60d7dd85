//! Response definitions
//!
//! Typed results built from spamd replies.

use serde::Serialize;

/// sysexits code spamd answers TELL with when it is not allowed
pub const EX_UNAVAILABLE: i32 = 69;

/// One scored rule from a REPORT-style reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Score exactly as printed, sign included
    pub score: String,

    /// Rule symbol, e.g. `MISSING_DATE`
    pub name: String,

    /// Text before the first colon, whitespace-normalized
    pub description: String,

    /// First token after the colon
    #[serde(rename = "type")]
    pub kind: String,
}

/// Parsed spamd reply
///
/// Fields other than the status are only populated when the reply
/// carried the matching section.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpamdResponse {
    pub response_code: i32,
    pub response_message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_spam: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spam_score: Option<f64>,
    /// Required score (threshold)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_spam_score: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Vec<ReportEntry>>,

    /// Rewritten message (PROCESS)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Rewritten headers (HEADERS)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,

    pub did_set: bool,
    pub did_remove: bool,
}

impl SpamdResponse {
    /// True for `EX_OK`
    pub fn is_ok(&self) -> bool {
        self.response_code == 0
    }
}

/// Acknowledgement of a TELL-family command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TellResult {
    pub response_code: i32,
    pub response_message: String,
    pub did_set: bool,
    pub did_remove: bool,
}

impl From<SpamdResponse> for TellResult {
    fn from(response: SpamdResponse) -> Self {
        Self {
            response_code: response.response_code,
            response_message: response.response_message,
            did_set: response.did_set,
            did_remove: response.did_remove,
        }
    }
}
