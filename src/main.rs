//! CLI entry point for the GPA rater.
//!
//! Logs in to the course-history portal (or reads a saved copy of the page)
//! and prints the credit-weighted average on the 12-point and 4.0 scales.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gpa_rater::analyzers::scale::GradeScale;
use gpa_rater::config::PortalConfig;
use gpa_rater::credentials::CredentialPair;
use gpa_rater::fetch::BasicClient;
use gpa_rater::output::{print_json, print_pretty, print_scale};
use gpa_rater::parser::parse_document;
use gpa_rater::pipeline::{compute_from_document, fetch_and_compute};
use gpa_rater::portal::{Portal, ensure_logged_in};
use std::ffi::OsStr;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gpa_rater")]
#[command(about = "Compute your weighted grade average from the course-history portal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in to the portal and compute the average
    Fetch {
        /// Portal user id (prompted for if absent)
        #[arg(short, long, env = "GPA_USERID")]
        userid: Option<String>,

        /// JSON file with an alternate grade scale
        #[arg(short, long)]
        scale: Option<String>,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Compute the average from a saved course-history page
    Compute {
        /// Path to the saved HTML page
        #[arg(value_name = "FILE")]
        source: String,

        /// JSON file with an alternate grade scale
        #[arg(short, long)]
        scale: Option<String>,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Show the grade conversion table
    Scale {
        /// JSON file with an alternate grade scale
        #[arg(short, long)]
        scale: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gpa_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gpa_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            userid,
            scale,
            json,
        } => {
            let config = PortalConfig::from_env()?;
            let scale = load_scale(scale.as_deref())?;
            let credentials = read_credentials(userid)?;

            let client = BasicClient::with_timeouts(config.timeout, config.connect_timeout)
                .context("Failed to build HTTP client")?;
            let portal = Portal::new(client, config)?;

            let result = fetch_and_compute(&portal, &credentials, &scale).await?;
            report(&result, json)?;
        }
        Commands::Compute {
            source,
            scale,
            json,
        } => {
            let config = PortalConfig::from_env()?;
            let scale = load_scale(scale.as_deref())?;

            let bytes =
                std::fs::read(&source).with_context(|| format!("Failed to read {source}"))?;
            let doc = parse_document(&bytes);
            ensure_logged_in(&doc, &config.login_error_id)?;

            let result = compute_from_document(&doc, &config.layout, &scale)?;
            report(&result, json)?;
        }
        Commands::Scale { scale } => {
            let scale = load_scale(scale.as_deref())?;
            print_scale(&scale);
        }
    }

    Ok(())
}

fn load_scale(path: Option<&str>) -> Result<GradeScale> {
    match path {
        Some(path) => {
            info!(path, "Loading grade scale");
            Ok(GradeScale::load(path)?)
        }
        None => Ok(GradeScale::mcmaster()),
    }
}

fn report(result: &gpa_rater::analyzers::types::AverageResult, json: bool) -> Result<()> {
    if json {
        print_json(result)
    } else {
        print_pretty(result);
        Ok(())
    }
}

/// Takes the user id from the flag or `GPA_USERID` and the password from
/// `GPA_PASSWORD`, prompting for whichever is missing. The password prompt
/// does not echo.
fn read_credentials(userid: Option<String>) -> Result<CredentialPair> {
    let userid = match userid {
        Some(id) => id,
        None => prompt("User id: ")?,
    };
    let password = resolve_password(std::env::var("GPA_PASSWORD").ok(), || {
        rpassword::prompt_password("Password: ")
    })?;
    Ok(CredentialPair::new(userid, password))
}

fn resolve_password<F>(from_env: Option<String>, ask: F) -> Result<String>
where
    F: FnOnce() -> std::io::Result<String>,
{
    match from_env {
        Some(pw) => Ok(pw),
        None => ask().context("Failed to read password"),
    }
}

fn prompt(label: &str) -> Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{label}")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
