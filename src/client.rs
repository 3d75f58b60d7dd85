//! Client Module
//!
//! The public command API. Each operation builds a request, runs one
//! exchange through [`Connection`] and shapes the parsed reply.
//!
//! ## Responsibilities
//! - Map each command to its verb and headers
//! - Add the configured `User` header
//! - Turn status 69 on TELL into [`SpamcError::TellDisabled`]

use std::str::FromStr;

use crate::config::Config;
use crate::error::{Result, SpamcError};
use crate::network::Connection;
use crate::protocol::{
    encode_request, parse_response, Header, LearnType, Request, SpamdResponse, TellResult, Verb,
    EX_UNAVAILABLE,
};

/// Async spamd client
///
/// Holds only the immutable configuration. Commands may run
/// concurrently on one client, each on its own connection.
#[derive(Debug, Clone, Default)]
pub struct Client {
    config: Config,
}

impl Client {
    /// Create a client for the daemon described by `config`
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Client configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Check that spamd is alive
    ///
    /// True when `PONG` appears after the start of the first reply line.
    pub async fn ping(&self) -> Result<bool> {
        let lines = self.send(Request::bare(Verb::Ping)).await?;
        Ok(is_pong(lines.first().map(String::as_str)))
    }

    /// Spam verdict and score
    pub async fn check(&self, message: &str) -> Result<SpamdResponse> {
        self.execute(Verb::Check, message).await
    }

    /// Verdict plus the names of matched rules
    pub async fn symbols(&self, message: &str) -> Result<SpamdResponse> {
        self.execute(Verb::Symbols, message).await
    }

    /// Verdict plus the scored rule report
    pub async fn report(&self, message: &str) -> Result<SpamdResponse> {
        self.execute(Verb::Report, message).await
    }

    /// Like [`Client::report`], but spamd only sends the report for spam
    pub async fn report_if_spam(&self, message: &str) -> Result<SpamdResponse> {
        self.execute(Verb::ReportIfSpam, message).await
    }

    /// Verdict plus the full rewritten message
    pub async fn process(&self, message: &str) -> Result<SpamdResponse> {
        self.execute(Verb::Process, message).await
    }

    /// Verdict plus the rewritten headers only
    pub async fn headers(&self, message: &str) -> Result<SpamdResponse> {
        self.execute(Verb::Headers, message).await
    }

    /// Train spamd with `message`
    ///
    /// `learn_type` is `spam`, `ham` (also `notspam`, `not_spam`) or
    /// `forget`, in any case. Anything else fails before connecting.
    pub async fn learn(&self, message: &str, learn_type: &str) -> Result<TellResult> {
        let learn_type = LearnType::from_str(learn_type)?;
        self.learn_as(message, learn_type).await
    }

    /// [`Client::learn`] with an already-parsed type
    pub async fn learn_as(&self, message: &str, learn_type: LearnType) -> Result<TellResult> {
        self.tell_with(message, learn_type.headers()).await
    }

    /// Report `message` as spam locally and to remote databases
    pub async fn tell(&self, message: &str) -> Result<TellResult> {
        self.tell_with(
            message,
            vec![
                Header::new("Message-class", "spam"),
                Header::new("Set", "local,remote"),
            ],
        )
        .await
    }

    /// Retract an earlier spam report for `message`
    pub async fn revoke(&self, message: &str) -> Result<TellResult> {
        self.tell_with(
            message,
            vec![
                Header::new("Message-class", "ham"),
                Header::new("Set", "local,remote"),
            ],
        )
        .await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn execute(&self, verb: Verb, message: &str) -> Result<SpamdResponse> {
        let lines = self.send(Request::with_message(verb, message)).await?;
        parse_response(verb, &lines)
    }

    async fn tell_with(&self, message: &str, headers: Vec<Header>) -> Result<TellResult> {
        let mut request = Request::with_message(Verb::Tell, message);
        request.headers = headers;

        let lines = self.send(request).await?;
        // TELL acknowledgements share the HEADERS reply layout
        let response = parse_response(Verb::Headers, &lines)?;

        if response.response_code == EX_UNAVAILABLE {
            tracing::warn!(
                "spamd refused TELL ({} {})",
                response.response_code,
                response.response_message
            );
            return Err(SpamcError::TellDisabled);
        }

        Ok(TellResult::from(response))
    }

    async fn send(&self, mut request: Request) -> Result<Vec<String>> {
        if let (Some(user), Some(_)) = (&self.config.user, &request.message) {
            request.headers.insert(0, Header::new("User", user.clone()));
        }

        tracing::debug!("Sending {} to spamd", request.verb);
        let bytes = encode_request(&request, &self.config.protocol_version);
        Connection::new(&self.config).exchange(&bytes).await
    }
}

/// `PONG` must appear past index 0 of the status line
fn is_pong(first_line: Option<&str>) -> bool {
    first_line
        .and_then(|line| line.find("PONG"))
        .is_some_and(|index| index > 0)
}
