//! `TermPipe` Telemetry - logging setup for the editing tools and CLI.
//!
//! Tool output goes to stdout, so logs default to stderr.
//!
//! # Example
//!
//! ```rust,no_run
//! use termpipe_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), termpipe_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("termpipe_llm=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileLogConfig, FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging,
    setup_logging,
};
