use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Output shape of the record server logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON lines; anything else, or unset, is compact.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// `RUST_LOG` wins; otherwise info, with the request trace spans of tower_http.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"))
}

/// Install the global subscriber writing to stdout. A second call is a no-op.
pub fn init_logging(format: LogFormat) {
    let builder = fmt().with_env_filter(env_filter()).with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.with_target(false).compact().try_init(),
        LogFormat::Json => builder.with_target(true).json().try_init(),
    };
}

pub fn init_logging_from_env() {
    let raw = std::env::var("LOG_FORMAT").ok();
    init_logging(LogFormat::from_env_value(raw.as_deref()));
}
