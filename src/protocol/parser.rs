//! Response parser
//!
//! Turns the lines of a spamd reply into a [`SpamdResponse`].
//!
//! Each sub-grammar lives in its own function. [`parse_response`]
//! applies them per line in a fixed precedence: verdict, then symbol
//! list, then report block. A line consumed by an earlier grammar is
//! never offered to a later one.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SpamcError};
use super::{ReportEntry, SpamdResponse, Verb};

/// Index of the first body line in PROCESS and HEADERS replies
///
/// Lines 0-2 are the status line, Content-length and the verdict.
pub const BODY_START: usize = 3;

static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*SPAMD/([0-9.]+)\s+([0-9]+)\s+(.*?)\s*$").expect("status grammar compiles")
});

static VERDICT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Spam:\s*(True|False|Yes|No)\s*;\s*(-?[0-9.]+)\s*/\s*(-?[0-9.]+)")
        .expect("verdict grammar compiles")
});

static SYMBOL_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9_]+(?:,[A-Z0-9_]*)+$").expect("symbol list grammar compiles")
});

static SINGLE_SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_]+$").expect("symbol grammar compiles"));

// score, rule name, description (may wrap onto indented lines), first token after the colon
static REPORT_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?:^|\s)(-?[0-9.]+)[ \t]+([A-Z0-9_]+)[ \t]+([^:\n]+(?:\n[ \t]+[^\s0-9.:\-][^:\n]*)*):[ \t]+(\S+)[^\n]*",
    )
    .expect("report grammar compiles")
});

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\n\s*").expect("line break pattern compiles"));

// =============================================================================
// Sub-grammars
// =============================================================================

/// `SPAMD/<version> <code> <message>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub version: String,
    pub code: i32,
    pub message: String,
}

/// The `Spam: <bool> ; <score> / <threshold>` line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub is_spam: bool,
    pub score: f64,
    pub threshold: f64,
}

/// Parse the status line that opens every reply
pub fn parse_status_line(line: &str) -> Result<StatusLine> {
    let caps = STATUS_LINE
        .captures(line)
        .ok_or_else(|| SpamcError::Protocol(format!("spamd unrecognized response: {}", line)))?;

    Ok(StatusLine {
        version: caps[1].to_string(),
        code: parse_number(&caps[2], "response code")?,
        message: caps[3].to_string(),
    })
}

/// Parse a verdict line; `Ok(None)` when the line is something else
pub fn parse_verdict(line: &str) -> Result<Option<Verdict>> {
    let Some(caps) = VERDICT_LINE.captures(line) else {
        return Ok(None);
    };

    Ok(Some(Verdict {
        is_spam: matches!(&caps[1], "True" | "Yes"),
        score: parse_number(&caps[2], "spam score")?,
        threshold: parse_number(&caps[3], "spam threshold")?,
    }))
}

/// Parse a comma-separated symbol list such as `BAYES_00,HTML_MESSAGE,`
///
/// With `allow_single`, a lone symbol without any comma is accepted too.
pub fn parse_symbols(line: &str, allow_single: bool) -> Option<Vec<String>> {
    let line = line.trim();
    if !SYMBOL_LIST.is_match(line) && !(allow_single && SINGLE_SYMBOL.is_match(line)) {
        return None;
    }

    Some(
        line.split(',')
            .filter(|symbol| !symbol.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Extract every scored rule from a block of report text
pub fn parse_report(text: &str) -> Vec<ReportEntry> {
    REPORT_ENTRY
        .captures_iter(text)
        .map(|caps| ReportEntry {
            score: caps[1].to_string(),
            name: caps[2].to_string(),
            description: LINE_BREAK.replace_all(&caps[3], " ").trim().to_string(),
            kind: caps[4].to_string(),
        })
        .collect()
}

/// Rebuild header lines, folding tab-continued lines into their predecessor
pub fn fold_headers<L: AsRef<str>>(lines: &[L]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref();
        if line.contains('\t') {
            if let Some(previous) = headers.last_mut() {
                previous.push_str(line);
                continue;
            }
        }
        headers.push(line.to_string());
    }

    headers
}

/// Rejoin body lines, each terminated by `\r\n`
pub fn reassemble_message<L: AsRef<str>>(lines: &[L]) -> String {
    let mut message = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 2).sum());
    for line in lines {
        message.push_str(line.as_ref());
        message.push_str("\r\n");
    }
    message
}

// =============================================================================
// Full Reply
// =============================================================================

/// Parse a complete reply for `verb`
///
/// Fails without a partial result when the status line is missing or
/// malformed, or when a numeric field does not parse.
pub fn parse_response<L: AsRef<str>>(verb: Verb, lines: &[L]) -> Result<SpamdResponse> {
    let first = lines
        .first()
        .ok_or_else(|| SpamcError::Protocol("spamd unrecognized response: empty reply".to_string()))?;
    let status = parse_status_line(first.as_ref())?;

    let mut response = SpamdResponse {
        response_code: status.code,
        response_message: status.message,
        ..SpamdResponse::default()
    };

    let mut report_text = String::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        if let Some(verdict) = parse_verdict(line)? {
            response.is_spam = Some(verdict.is_spam);
            response.spam_score = Some(verdict.score);
            response.base_spam_score = Some(verdict.threshold);
        } else if let Some(symbols) = parse_symbols(line, verb == Verb::Symbols) {
            response.matches.get_or_insert_with(Vec::new).extend(symbols);
        } else if verb != Verb::Process && index > 0 {
            report_text.push_str(line);
            report_text.push('\n');
        }

        if line.contains("DidSet:") {
            response.did_set = true;
        }
        if line.contains("DidRemove:") {
            response.did_remove = true;
        }
    }

    if !report_text.is_empty() {
        let entries = parse_report(&report_text);
        if !entries.is_empty() {
            response.report = Some(entries);
        }
    }

    let body = lines.get(BODY_START..).unwrap_or(&[]);
    match verb {
        Verb::Process => response.message = Some(reassemble_message(body)),
        Verb::Headers => response.headers = Some(fold_headers(body)),
        _ => {}
    }

    Ok(response)
}

fn parse_number<T: std::str::FromStr>(token: &str, field: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| SpamcError::Protocol(format!("malformed {}: {:?}", field, token)))
}
