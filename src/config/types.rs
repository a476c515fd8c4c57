//! Configuration types and CLI options.

use clap::{Parser, ValueEnum};

use crate::config::constants::DEFAULT_PORT;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Application configuration, parsed from the command line.
///
/// All analysis inputs (cookie blob, filters) arrive per-request through the
/// JSON API; the configuration only covers how the process itself runs.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ivas_sms_analyzer",
    about = "Cookie-authenticated scraper and statistics API for the iVAS live SMS portal"
)]
pub struct Config {
    /// Port for the JSON API server
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}
