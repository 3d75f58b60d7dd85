//! spamc CLI
//!
//! Command-line interface for querying and training spamd.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use spamc::{Client, Config, SpamdResponse, TellResult};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{fmt, EnvFilter};

/// spamc CLI
#[derive(Parser, Debug)]
#[command(name = "spamc")]
#[command(about = "Client for SpamAssassin's spamd")]
#[command(version)]
struct Args {
    /// spamd host
    #[arg(short = 'd', long, default_value = "127.0.0.1")]
    host: String,

    /// spamd port
    #[arg(short, long, default_value_t = spamc::config::DEFAULT_PORT)]
    port: u16,

    /// Exchange timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    /// User whose preferences spamd should apply
    #[arg(short, long)]
    user: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that spamd is alive
    Ping,

    /// Print the spam verdict and score
    Check {
        /// Message file (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Print the verdict and matched rule names
    Symbols { file: Option<PathBuf> },

    /// Print the verdict and rule report
    Report { file: Option<PathBuf> },

    /// Print the rule report only for spam
    ReportIfSpam { file: Option<PathBuf> },

    /// Print the rewritten message
    Process { file: Option<PathBuf> },

    /// Print the rewritten headers
    Headers { file: Option<PathBuf> },

    /// Train as spam, ham or forget the message
    Learn {
        /// spam, ham, notspam, not_spam or forget
        learn_type: String,
        file: Option<PathBuf>,
    },

    /// Report the message as spam, locally and remotely
    Tell { file: Option<PathBuf> },

    /// Revoke an earlier spam report
    Revoke { file: Option<PathBuf> },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing/logging on stderr, stdout carries results
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,spamc=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .timeout_secs(args.timeout);
    if let Some(user) = &args.user {
        config = config.user(user);
    }
    let client = Client::new(config.build());

    tracing::debug!("spamc v{} talking to {}", spamc::VERSION, client.config().addr());

    let json = args.json;
    match args.command {
        Commands::Ping => {
            let alive = client.ping().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&alive)?);
            } else {
                println!("{}", if alive { "PONG" } else { "no PONG from spamd" });
            }
        }
        Commands::Check { file } => {
            let response = client.check(&read_message(file).await?).await?;
            print_response(&response, json)?;
        }
        Commands::Symbols { file } => {
            let response = client.symbols(&read_message(file).await?).await?;
            print_response(&response, json)?;
        }
        Commands::Report { file } => {
            let response = client.report(&read_message(file).await?).await?;
            print_response(&response, json)?;
        }
        Commands::ReportIfSpam { file } => {
            let response = client.report_if_spam(&read_message(file).await?).await?;
            print_response(&response, json)?;
        }
        Commands::Process { file } => {
            let response = client.process(&read_message(file).await?).await?;
            print_response(&response, json)?;
        }
        Commands::Headers { file } => {
            let response = client.headers(&read_message(file).await?).await?;
            print_response(&response, json)?;
        }
        Commands::Learn { learn_type, file } => {
            let result = client.learn(&read_message(file).await?, &learn_type).await?;
            print_tell(&result, json)?;
        }
        Commands::Tell { file } => {
            let result = client.tell(&read_message(file).await?).await?;
            print_tell(&result, json)?;
        }
        Commands::Revoke { file } => {
            let result = client.revoke(&read_message(file).await?).await?;
            print_tell(&result, json)?;
        }
    }

    Ok(())
}

/// Read the message from `file`, or from stdin
async fn read_message(file: Option<PathBuf>) -> std::io::Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut message = String::new();
            tokio::io::stdin().read_to_string(&mut message).await?;
            Ok(message)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_response(response: &SpamdResponse, json: bool) -> serde_json::Result<()> {
    if json {
        return print_json(response);
    }

    println!("{} {}", response.response_code, response.response_message);
    if !response.is_ok() {
        tracing::warn!(
            "spamd answered {} {}",
            response.response_code,
            response.response_message
        );
    }
    if let (Some(is_spam), Some(score), Some(threshold)) =
        (response.is_spam, response.spam_score, response.base_spam_score)
    {
        println!("Spam: {} ; {} / {}", is_spam, score, threshold);
    }
    if let Some(matches) = &response.matches {
        println!("Symbols: {}", matches.join(","));
    }
    if let Some(report) = &response.report {
        for entry in report {
            println!("{:>5} {:<24} {}: {}", entry.score, entry.name, entry.description, entry.kind);
        }
    }
    if let Some(headers) = &response.headers {
        for header in headers {
            println!("{}", header);
        }
    }
    if let Some(message) = &response.message {
        print!("{}", message);
    }
    Ok(())
}

fn print_tell(result: &TellResult, json: bool) -> serde_json::Result<()> {
    if json {
        return print_json(result);
    }

    println!("{} {}", result.response_code, result.response_message);
    println!("DidSet: {}", result.did_set);
    println!("DidRemove: {}", result.did_remove);
    Ok(())
}
