//! Newsletter signup: a relay that forwards subscription requests to a Mailchimp list,
//! plus the form controller that talks to it.

pub mod app;
pub mod config;
mod error;
pub mod form;
pub mod mailing_list;
pub mod web;

// re-export
pub use app::{serve, App, AppState};
pub use error::{Error, Result};
pub use mailing_list::MailingListClient;

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Compact, human readable logging for local development.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(EnvFilter::new("debug"))
        .compact()
        .init();
}

/// Warnings only on stderr, so they don't mix with the terminal form. `RUST_LOG` overrides.
pub fn init_cli_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .compact()
        .init();
}

/// JSON logging for production, `RUST_LOG` takes precedence over the default `info` level.
pub fn init_production_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(env_filter)
        .init();
}
