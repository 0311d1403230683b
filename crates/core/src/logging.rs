//! Logging and observability
//!
//! Structured logging via `tracing`, with text or JSON output selected at
//! runtime. All log output goes to stderr so stdout stays reserved for
//! user-facing results (the catalog table, saved paths).

use anyhow::Result;
use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the logging system with an optional format specification
///
/// Safe to call more than once; only the first call installs a subscriber.
///
/// ## Arguments
///
/// * `format` - `None` or `"text"` for human-readable output, `"json"` for
///   structured output. Unknown values fall back to text.
///
/// ## Environment Variables
///
/// * `DEVCM_LOG_FORMAT` - Used when `format` is `None`
/// * `DEVCM_LOG` - Filter directives (takes precedence over `RUST_LOG`)
/// * `RUST_LOG` - Standard fallback filter
///
/// ## Example
///
/// ```rust
/// use devcm_core::logging;
///
/// logging::init(None).expect("Failed to initialize logging");
/// ```
pub fn init(format: Option<&str>) -> Result<()> {
    INIT.call_once(|| {
        let filter = create_env_filter();

        let env_format = std::env::var("DEVCM_LOG_FORMAT").ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_span_events(fmt::format::FmtSpan::CLOSE)
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(fmt::layer().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!("Logging initialized with format: {}", effective_format);
    });

    Ok(())
}

/// Create an EnvFilter based on environment variables
fn create_env_filter() -> EnvFilter {
    if let Ok(devcm_log) = std::env::var("DEVCM_LOG") {
        EnvFilter::try_new(&devcm_log).unwrap_or_else(|_| {
            eprintln!(
                "Invalid DEVCM_LOG specification '{}', using default 'info'",
                devcm_log
            );
            EnvFilter::new("info")
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Check if logging has been initialized
pub fn is_initialized() -> bool {
    INIT.is_completed()
}
