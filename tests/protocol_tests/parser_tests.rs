//! Parser Tests
//!
//! These tests verify:
//! - Status line handling and wholesale failure on bad replies
//! - Verdict, symbol list and report grammars and their precedence
//! - PROCESS body reassembly and HEADERS folding
//! - TELL acknowledgement flags

use spamc::protocol::{
    fold_headers, parse_report, parse_response, parse_status_line, parse_symbols, parse_verdict,
    ReportEntry, Verb,
};
use spamc::SpamcError;

// =============================================================================
// Helper Functions
// =============================================================================

fn entry(score: &str, name: &str, description: &str, kind: &str) -> ReportEntry {
    ReportEntry {
        score: score.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        kind: kind.to_string(),
    }
}

fn report_reply() -> Vec<&'static str> {
    vec![
        "SPAMD/1.5 0 EX_OK",
        "Content-length: 812",
        "Spam: True ; 6.2 / 5.0",
        "Spam detection software, running on the system \"mail.example.com\",",
        "has identified this incoming email as possible spam.",
        "Content analysis details:   (6.2 points, 5.0 required)",
        " pts rule name              description",
        "---- ---------------------- --------------------------------------------------",
        " 0.0 MISSING_DATE           Missing Date: header",
        " 1.2 MISSING_HEADERS        Missing To: header",
        "-1.9 BAYES_00               BODY: Bayes spam probability is 0 to 1%",
        "                            [score: 0.0000]",
        " 2.5 URIBL_BLACK            Contains an URL listed in the URIBL blacklist",
        "                            [URIs: example.com]",
    ]
}

// =============================================================================
// Status Line Tests
// =============================================================================

#[test]
fn test_status_line() {
    let status = parse_status_line("SPAMD/1.5 0 EX_OK").unwrap();

    assert_eq!(status.version, "1.5");
    assert_eq!(status.code, 0);
    assert_eq!(status.message, "EX_OK");
}

#[test]
fn test_status_line_keeps_full_message() {
    let status = parse_status_line("SPAMD/1.0 76 Bad header line: (Content-Length)").unwrap();

    assert_eq!(status.code, 76);
    assert_eq!(status.message, "Bad header line: (Content-Length)");
}

#[test]
fn test_response_is_ok() {
    let ok = parse_response(Verb::Check, &["SPAMD/1.5 0 EX_OK"]).unwrap();
    assert!(ok.is_ok());

    let failed = parse_response(Verb::Check, &["SPAMD/1.5 76 Bad header line: (Content-Length)"])
        .unwrap();
    assert!(!failed.is_ok());
    assert_eq!(failed.response_message, "Bad header line: (Content-Length)");
}

#[test]
fn test_unrecognized_status_line() {
    let err = parse_response(Verb::Check, &["HTTP/1.1 400 Bad Request"]).unwrap_err();

    assert!(matches!(err, SpamcError::Protocol(_)));
    assert!(err.to_string().contains("unrecognized response"));
}

#[test]
fn test_empty_reply() {
    let lines: Vec<String> = Vec::new();
    let err = parse_response(Verb::Check, &lines).unwrap_err();

    assert!(matches!(err, SpamcError::Protocol(_)));
}

#[test]
fn test_response_code_overflow_is_error() {
    let err = parse_response(Verb::Check, &["SPAMD/1.5 99999999999 EX_OK"]).unwrap_err();

    assert!(err.to_string().contains("malformed response code"));
}

// =============================================================================
// Verdict Tests
// =============================================================================

#[test]
fn test_check_verdict() {
    let response =
        parse_response(Verb::Check, &["SPAMD/1.5 0 EX_OK", "Spam: True ; 15.0 / 5.0"]).unwrap();

    assert_eq!(response.response_code, 0);
    assert_eq!(response.response_message, "EX_OK");
    assert_eq!(response.is_spam, Some(true));
    assert_eq!(response.spam_score, Some(15.0));
    assert_eq!(response.base_spam_score, Some(5.0));
    assert!(response.matches.is_none());
    assert!(response.report.is_none());
    assert!(response.message.is_none());
    assert!(response.headers.is_none());
}

#[test]
fn test_verdict_words() {
    let cases = [("True", true), ("Yes", true), ("False", false), ("No", false)];

    for (word, expected) in cases {
        let line = format!("Spam: {} ; 1.0 / 5.0", word);
        let verdict = parse_verdict(&line).unwrap().unwrap();
        assert_eq!(verdict.is_spam, expected, "verdict word {}", word);
    }
}

#[test]
fn test_verdict_negative_score() {
    let verdict = parse_verdict("Spam: False ; -2.1 / 5.0").unwrap().unwrap();

    assert!(!verdict.is_spam);
    assert_eq!(verdict.score, -2.1);
    assert_eq!(verdict.threshold, 5.0);
}

#[test]
fn test_verdict_absent() {
    assert!(parse_verdict("Content-length: 12").unwrap().is_none());
}

#[test]
fn test_malformed_score_is_error() {
    let err = parse_response(Verb::Check, &["SPAMD/1.5 0 EX_OK", "Spam: True ; 1.2.3 / 5.0"])
        .unwrap_err();

    assert!(matches!(err, SpamcError::Protocol(_)));
    assert!(err.to_string().contains("spam score"));
}

#[test]
fn test_check_without_verdict() {
    let response = parse_response(Verb::Check, &["SPAMD/1.5 0 EX_OK"]).unwrap();

    assert_eq!(response.response_code, 0);
    assert!(response.is_spam.is_none());
    assert!(response.spam_score.is_none());
}

// =============================================================================
// Symbol List Tests
// =============================================================================

#[test]
fn test_symbols_reply() {
    let response = parse_response(
        Verb::Symbols,
        &[
            "SPAMD/1.5 0 EX_OK",
            "Content-length: 34",
            "Spam: True ; 7.3 / 5.0",
            "BAYES_99,HTML_MESSAGE,MISSING_DATE",
        ],
    )
    .unwrap();

    assert_eq!(response.is_spam, Some(true));
    assert_eq!(
        response.matches,
        Some(vec![
            "BAYES_99".to_string(),
            "HTML_MESSAGE".to_string(),
            "MISSING_DATE".to_string(),
        ])
    );
    assert!(response.report.is_none());
}

#[test]
fn test_symbols_trailing_comma() {
    assert_eq!(
        parse_symbols("BAYES_00,NO_RELAYS,", false),
        Some(vec!["BAYES_00".to_string(), "NO_RELAYS".to_string()])
    );
}

#[test]
fn test_single_symbol_only_for_symbols_verb() {
    assert_eq!(parse_symbols("ALL_TRUSTED", true), Some(vec!["ALL_TRUSTED".to_string()]));
    assert_eq!(parse_symbols("ALL_TRUSTED", false), None);

    let lines = ["SPAMD/1.5 0 EX_OK", "Spam: False ; -1.0 / 5.0", "ALL_TRUSTED"];
    assert_eq!(
        parse_response(Verb::Symbols, &lines).unwrap().matches,
        Some(vec!["ALL_TRUSTED".to_string()])
    );
    assert!(parse_response(Verb::Check, &lines).unwrap().matches.is_none());
}

#[test]
fn test_symbols_rejects_prose() {
    assert!(parse_symbols("Hello, world", false).is_none());
    assert!(parse_symbols("Subject: A,B", false).is_none());
}

// =============================================================================
// Report Tests
// =============================================================================

#[test]
fn test_report_reply() {
    let response = parse_response(Verb::Report, &report_reply()).unwrap();

    assert_eq!(response.is_spam, Some(true));
    assert_eq!(response.spam_score, Some(6.2));
    assert!(response.matches.is_none());
    assert_eq!(
        response.report,
        Some(vec![
            entry("0.0", "MISSING_DATE", "Missing Date", "header"),
            entry("1.2", "MISSING_HEADERS", "Missing To", "header"),
            entry("-1.9", "BAYES_00", "BODY", "Bayes"),
            entry(
                "2.5",
                "URIBL_BLACK",
                "Contains an URL listed in the URIBL blacklist [URIs",
                "example.com]"
            ),
        ])
    );
}

#[test]
fn test_report_if_spam_uses_report_grammar() {
    let response = parse_response(Verb::ReportIfSpam, &report_reply()).unwrap();
    assert_eq!(response.report.map(|r| r.len()), Some(4));
}

#[test]
fn test_report_wrapped_description() {
    let entries = parse_report(
        " 1.0 LONG_RULE              This description is long\n                            and wraps: header\n",
    );

    assert_eq!(
        entries,
        vec![entry("1.0", "LONG_RULE", "This description is long and wraps", "header")]
    );
}

#[test]
fn test_report_description_ending_in_colon_keeps_next_rule() {
    let response = parse_response(
        Verb::Report,
        &[
            "SPAMD/1.5 0 EX_OK",
            "Spam: True ; 6.2 / 5.0",
            " 0.0 MISSING_DATE           Missing Date: header",
            " 0.5 RULE_A               Something odd:",
            "-1.9 BAYES_00               BODY: Bayes spam probability is 0 to 1%",
        ],
    )
    .unwrap();

    // RULE_A has no token after its colon and is not a report entry
    assert_eq!(
        response.report,
        Some(vec![
            entry("0.0", "MISSING_DATE", "Missing Date", "header"),
            entry("-1.9", "BAYES_00", "BODY", "Bayes"),
        ])
    );
}

#[test]
fn test_report_without_rules() {
    assert!(parse_report("Content analysis details:   (0.0 points, 5.0 required)\n").is_empty());
}

#[test]
fn test_verdict_line_never_reaches_report_grammar() {
    // Looks like a rule line but is consumed as a verdict first
    let response = parse_response(
        Verb::Report,
        &["SPAMD/1.5 0 EX_OK", "Spam: True ; 5.0 / 5.0 RULE desc: x"],
    )
    .unwrap();

    assert_eq!(response.is_spam, Some(true));
    assert!(response.report.is_none());
}

// =============================================================================
// PROCESS Tests
// =============================================================================

#[test]
fn test_process_reassembles_message() {
    let response = parse_response(
        Verb::Process,
        &[
            "SPAMD/1.5 0 EX_OK",
            "Content-length: 49",
            "Spam: True ; 15.0 / 5.0",
            "X-Spam-Flag: YES",
            "Subject: hi",
            "Body",
        ],
    )
    .unwrap();

    assert_eq!(
        response.message.as_deref(),
        Some("X-Spam-Flag: YES\r\nSubject: hi\r\nBody\r\n")
    );
    assert!(response.report.is_none());
    assert!(response.headers.is_none());
}

#[test]
fn test_process_skips_report_grammar() {
    let response = parse_response(Verb::Process, &report_reply()).unwrap();

    assert!(response.report.is_none());
    assert!(response.message.unwrap().contains("MISSING_DATE"));
}

#[test]
fn test_process_short_reply() {
    let response = parse_response(Verb::Process, &["SPAMD/1.5 0 EX_OK"]).unwrap();
    assert_eq!(response.message.as_deref(), Some(""));
}

// =============================================================================
// HEADERS Tests
// =============================================================================

#[test]
fn test_headers_fold_continuations() {
    let response = parse_response(
        Verb::Headers,
        &[
            "SPAMD/1.5 0 EX_OK",
            "Content-length: 30",
            "Spam: False ; 0.1 / 5.0",
            "X-A: 1",
            "\tcontinued",
            "X-B: 2",
        ],
    )
    .unwrap();

    assert_eq!(
        response.headers,
        Some(vec!["X-A: 1\tcontinued".to_string(), "X-B: 2".to_string()])
    );
    assert!(response.message.is_none());
}

#[test]
fn test_fold_headers_leading_continuation() {
    assert_eq!(
        fold_headers(&["\torphan", "X-A: 1", "\tmore", "\tand more"]),
        vec!["\torphan".to_string(), "X-A: 1\tmore\tand more".to_string()]
    );
}

// =============================================================================
// TELL Tests
// =============================================================================

#[test]
fn test_tell_flags() {
    let response = parse_response(
        Verb::Headers,
        &["SPAMD/1.1 0 EX_OK", "DidSet: local", "DidRemove: remote"],
    )
    .unwrap();

    assert!(response.did_set);
    assert!(response.did_remove);
    assert_eq!(response.headers, Some(vec![]));
}

#[test]
fn test_tell_flags_default_false() {
    let response = parse_response(Verb::Tell, &["SPAMD/1.1 0 EX_OK"]).unwrap();

    assert!(!response.did_set);
    assert!(!response.did_remove);
}
