//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! - `error`: export failures (empty input, row mapping, encoding)
//! - `warn`: overwritten or renamed output files, sanitized names
//! - `info`: export summary
//! - `debug`: pipeline and workbook detail

use tracing::level_filters::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// Single-line output.
    Compact,
    /// JSON lines for machine parsing.
    Json,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level applied to the workspace crates unless `RUST_LOG` is set.
    pub level_filter: LevelFilter,
    /// Output format.
    pub format: LogFormat,
    /// Whether to use ANSI colors.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::INFO,
            format: LogFormat::default(),
            with_ansi: true,
        }
    }
}

/// Install the global subscriber writing to stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = build_env_filter(config.level_filter);
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .without_time()
                    .with_target(false)
                    .with_ansi(config.with_ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_ansi(config.with_ansi)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
}

/// `RUST_LOG` wins; otherwise our crates log at `level`, others at warn.
fn build_env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,betcode_cli={level},betcode_export={level},betcode_io_xlsx={level}"
        ))
    })
}
