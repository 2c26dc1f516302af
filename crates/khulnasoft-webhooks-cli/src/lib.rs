//! # KhulnaSoft Webhooks CLI
//!
//! Command-line interface around the `khulnasoft-webhooks` library.
//!
//! This module provides CLI commands for:
//! - Signing a payload the way the platform does
//! - Verifying and decoding a captured delivery
//! - Listing the event types this build understands
//! - Validating and showing the resolved configuration
//!
//! Logs go to stderr; command output goes to stdout.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use khulnasoft_webhooks::{sign_payload, EventKind, EventParser, ParserConfig, WebhookError};
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Prefix for configuration environment variables, e.g. `KHULNASOFT_WEBHOOKS__SECRET`.
pub const ENV_PREFIX: &str = "KHULNASOFT_WEBHOOKS";

// ============================================================================
// CLI Structure
// ============================================================================

/// KhulnaSoft webhooks CLI - sign, verify and decode webhook deliveries
#[derive(Parser, Debug)]
#[command(name = "khulnasoft-webhooks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sign, verify and decode KhulnaSoft webhook deliveries")]
pub struct Cli {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "KHULNASOFT_WEBHOOKS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Webhook signing secret; overrides the configuration file
    #[arg(long, env = "KHULNASOFT_WEBHOOK_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Logging level; overrides the configuration file
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a signature header for a payload
    Sign {
        /// Payload file, or `-` for stdin
        #[arg(short, long)]
        payload: PathBuf,

        /// Unix timestamp to sign with (defaults to now)
        #[arg(short, long)]
        timestamp: Option<i64>,
    },

    /// Verify a delivery and print the decoded event
    Verify {
        /// Payload file, or `-` for stdin
        #[arg(short, long)]
        payload: PathBuf,

        /// Value of the KhulnaSoft-Signature header
        #[arg(short, long)]
        signature: String,

        /// Check freshness as of this Unix timestamp instead of now
        #[arg(long)]
        at: Option<i64>,
    },

    /// List the event types that can be decoded
    Types {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Validate configuration
    Config {
        /// Show resolved configuration (secret redacted)
        #[arg(short, long)]
        show: bool,
    },
}

/// Output format options
#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON output
    Json,
}

// ============================================================================
// CLI Error Types
// ============================================================================

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Webhook rejected: {0}")]
    Webhook(#[from] WebhookError),

    #[error("Invalid argument: {arg} - {message}")]
    InvalidArgument { arg: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Output encoding failed: {0}")]
    Output(#[from] serde_json::Error),

    #[error("Logging initialization failed: {message}")]
    Logging { message: String },
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) => 1,
            Self::Webhook(_) => 2,
            Self::InvalidArgument { .. } => 3,
            Self::Io(_) => 4,
            Self::Output(_) => 5,
            Self::Logging { .. } => 6,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    InvalidFormat(#[from] config::ConfigError),

    #[error("Configuration could not be rendered: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },
}

// ============================================================================
// Configuration Types
// ============================================================================

/// CLI configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Webhook signing secret
    pub secret: Option<String>,

    /// Signature verification settings
    pub verification: ParserConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Copy of the configuration safe to display
    pub fn redacted(&self) -> Self {
        Self {
            secret: self.secret.as_ref().map(|_| "[REDACTED]".to_string()),
            ..self.clone()
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log format options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum LogFormat {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "json")]
    Json,
}

/// Load configuration from defaults, an optional TOML file, then the
/// environment.
pub fn load_configuration(config_path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = config_path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?.try_deserialize()?;
    Ok(config)
}

// ============================================================================
// Main Entry Point
// ============================================================================

/// Main CLI entry point
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = load_configuration(cli.config.as_deref())?;

    initialize_logging(&cli, &config)?;
    debug!(config_file = ?cli.config, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli, &config, &mut out)
}

/// Execute a parsed command line against resolved configuration, writing
/// command output to `out`.
pub fn execute(cli: Cli, config: &CliConfig, out: &mut impl Write) -> Result<(), CliError> {
    let mut config = config.clone();
    if cli.secret.is_some() {
        config.secret = cli.secret.clone();
    }
    let secret = config.secret.clone();

    match cli.command {
        Commands::Sign { payload, timestamp } => {
            execute_sign_command(&payload, timestamp, required_secret(secret)?, out)
        }
        Commands::Verify {
            payload,
            signature,
            at,
        } => execute_verify_command(
            &payload,
            &signature,
            at,
            required_secret(secret)?,
            &config,
            out,
        ),
        Commands::Types { format } => execute_types_command(format, out),
        Commands::Config { show } => execute_config_command(show, &config, out),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// Initialize logging based on CLI arguments and configuration
fn initialize_logging(cli: &Cli, config: &CliConfig) -> Result<(), CliError> {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let json = cli.json_logs || config.logging.format == LogFormat::Json;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| CliError::Logging {
        message: e.to_string(),
    })
}

fn required_secret(secret: Option<String>) -> Result<String, CliError> {
    match secret {
        Some(secret) if !secret.is_empty() => Ok(secret),
        _ => Err(ConfigError::MissingRequired {
            key: "secret".to_string(),
        }
        .into()),
    }
}

fn read_payload(path: &Path) -> Result<Vec<u8>, CliError> {
    if path == Path::new("-") {
        let mut payload = Vec::new();
        io::stdin().read_to_end(&mut payload)?;
        return Ok(payload);
    }
    Ok(std::fs::read(path)?)
}

fn timestamp_arg(arg: &str, seconds: i64) -> Result<DateTime<Utc>, CliError> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| CliError::InvalidArgument {
        arg: arg.to_string(),
        message: format!("{} is not a representable Unix timestamp", seconds),
    })
}

/// Execute sign command
fn execute_sign_command(
    payload_path: &Path,
    timestamp: Option<i64>,
    secret: String,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let payload = read_payload(payload_path)?;
    let timestamp = match timestamp {
        Some(seconds) => timestamp_arg("timestamp", seconds)?,
        None => Utc::now(),
    };

    info!(
        payload_len = payload.len(),
        timestamp = timestamp.timestamp(),
        "Signing payload"
    );

    writeln!(out, "{}", sign_payload(timestamp, &payload, &secret))?;
    Ok(())
}

/// Execute verify command
fn execute_verify_command(
    payload_path: &Path,
    signature: &str,
    at: Option<i64>,
    secret: String,
    config: &CliConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let payload = read_payload(payload_path)?;
    let parser = EventParser::with_config(secret, config.verification.clone());

    let event = match at {
        Some(seconds) => parser.parse_at(&payload, signature, timestamp_arg("at", seconds)?)?,
        None => parser.parse(&payload, signature)?,
    };

    info!(
        event_id = %event.id,
        event_type = %event.event_type,
        sequence_id = event.sequence_id,
        "Webhook verified"
    );

    serde_json::to_writer_pretty(&mut *out, &event)?;
    writeln!(out)?;
    Ok(())
}

/// Execute types command
fn execute_types_command(format: OutputFormat, out: &mut impl Write) -> Result<(), CliError> {
    let tags: Vec<&str> = EventKind::ALL.iter().map(EventKind::as_str).collect();

    match format {
        OutputFormat::Text => {
            for tag in tags {
                writeln!(out, "{}", tag)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &tags)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Execute config command
fn execute_config_command(
    show: bool,
    config: &CliConfig,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if show {
        let rendered = toml::to_string_pretty(&config.redacted()).map_err(ConfigError::from)?;
        write!(out, "{}", rendered)?;
    } else {
        writeln!(out, "Configuration is valid")?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
