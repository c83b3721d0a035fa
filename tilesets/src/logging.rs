//! Logging initialization using `tracing` and `tracing-subscriber`.
//!
//! Static (non-reloadable) configuration controlled by:
//! - `RUST_LOG`: log level filtering (standard tracing-subscriber behavior)
//! - `TILESETS_FORMAT`: output format (compact, full, pretty, json)

use std::str::FromStr;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Log output format options.
///
/// Controlled by the `TILESETS_FORMAT` environment variable.
#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    /// Human-readable, single-line logs.
    Full,
    /// A variant of the full format, optimized for short line lengths (default).
    Compact,
    /// Multi-line logs for local development and debugging.
    Pretty,
    /// Newline-delimited (structured) JSON logs.
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Compact
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            "pretty" | "verbose" => Ok(Self::Pretty),
            "json" | "jsonl" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid log format '{s}'. Valid options: full, compact, pretty, json"
            )),
        }
    }
}

/// Initialize the global tracing subscriber for the given filter and format.
///
/// Also bridges `log` records into `tracing` events, since the client
/// library emits through both facades.
pub fn init_tracing(filter: &str, format: Option<String>) {
    // Ignore a failure: the bridge may already be installed (e.g. in tests).
    let _ = tracing_log::LogTracer::builder()
        .with_interest_cache(tracing_log::InterestCacheConfig::default())
        .init();

    let env_filter = EnvFilter::from_str(filter).unwrap_or_else(|_| {
        eprintln!("Warning: Invalid filter string '{filter}' passed, falling back to 'info'");
        EnvFilter::new("info")
    });

    let format = format
        .and_then(|s| {
            s.parse::<LogFormat>()
                .map_err(|e| {
                    eprintln!("Warning: {e}");
                    eprintln!("Falling back to the default format");
                })
                .ok()
        })
        .unwrap_or_default();
    match format {
        LogFormat::Full => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::NONE)
                .with_filter(env_filter);

            Registry::default().with(fmt_layer).init();
        }
        LogFormat::Compact => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_span_events(FmtSpan::NONE)
                .with_filter(env_filter);

            Registry::default().with(fmt_layer).init();
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_filter(env_filter);

            Registry::default().with(fmt_layer).init();
        }
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_filter(env_filter);

            Registry::default().with(fmt_layer).init();
        }
    }
}
