//! ivas_sms_analyzer library: cookie-authenticated SMS portal analysis
//!
//! This library decodes exported browser cookies in several common encodings,
//! establishes a cookie-authenticated session against the iVAS SMS portal,
//! extracts SMS delivery records from the live page and aggregates them into
//! statistics. A thin `axum` HTTP adapter exposes the operations as a JSON
//! API; the library is usable without it.
//!
//! # Example
//!
//! ```no_run
//! use ivas_sms_analyzer::ops;
//! use ivas_sms_analyzer::portal::ReqwestFetcher;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = ReqwestFetcher::new()?;
//! let summary = ops::fetch_data("cf_clearance=...; XSRF-TOKEN=...; ivas_sms_session=...", fetcher).await?;
//! println!("{} records, {} recent", summary.total, summary.recent);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! The portal-facing operations require a Tokio runtime. Use `#[tokio::main]`
//! in your application or call them within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod cookies;
mod envelope;
mod error_handling;
pub mod extract;
pub mod initialization;
mod models;
pub mod ops;
pub mod portal;
pub mod server;
pub mod stats;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{AnalyzerError, InitializationError, TransportError};
pub use models::{Service, SmsRecord};
pub use server::start_server;
