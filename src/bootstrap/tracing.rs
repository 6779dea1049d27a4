//! Tracing configuration for the tVNS-R tools
//!
//! Diagnostic logging only. The session audit trail is a separate, domain-level
//! log written through `AuditLogPort`.
//!
//! ## Behavior / 行为
//!
//! - **Development**: debug level for our crates
//! - **Production**: info level
//! - **Environment filter**: `RUST_LOG` overrides the defaults

use std::io;

use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    vec![
        if is_dev { "debug" } else { "info" }.to_string(),
        "hyper=info".to_string(), // Connection-level chatter from warp/reqwest
        "reqwest=info".to_string(),
        "warp=info".to_string(),
        "mockito=warn".to_string(),
    ]
}

/// Initialize the tracing subscriber.
///
/// Output format: `2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message`
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    // stderr keeps stdout free for the session runner's results
    let writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let fmt_layer = fmt::layer()
        .with_timer(fmt::time::ChronoLocal::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(writer);

    registry().with(env_filter).with(fmt_layer).try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"debug".to_string()));
        assert!(dev_directives.contains(&"hyper=info".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"info".to_string()));
        assert!(!prod_directives.contains(&"debug".to_string()));
    }

    #[test]
    fn test_directives_parse_as_env_filter() {
        let joined = build_filter_directives(true).join(",");
        assert!(tracing_subscriber::EnvFilter::try_new(joined).is_ok());
    }
}
