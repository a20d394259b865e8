//! Logging setup

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "hosted_search=info";

/// Install the global subscriber.
///
/// # Environment Variables
///
/// - `RUST_LOG`: filter directives (default: `hosted_search=info`)
/// - `SEARCH_LOG_FORMAT`: `json` for structured output, anything else for pretty
///
/// Logs go to stderr so command output stays pipeable.
pub fn init_logging(verbose: bool) -> Result<()> {
    let log_format = std::env::var("SEARCH_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let default_filter = if verbose {
        "hosted_search=debug"
    } else {
        DEFAULT_LOG_FILTER
    };

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_filter))?;

    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
    }
    Ok(())
}
