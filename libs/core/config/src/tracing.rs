//! Subscriber and error-report setup for the service binaries.

use crate::Environment;
use tracing_subscriber::{EnvFilter, Layer, prelude::*};

/// Directives used when `RUST_LOG` is unset.
///
/// The service crates log one level below their dependencies in development.
pub fn default_directives(environment: &Environment) -> &'static str {
    if environment.is_production() {
        "info,tower_http=info,sea_orm=warn,sqlx=warn"
    } else {
        "info,users_api=debug,domain_users=debug,database=debug,tower_http=debug,sea_orm=info,sqlx=warn"
    }
}

/// `RUST_LOG` when it is set and parses, otherwise [`default_directives`].
pub fn env_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)))
}

/// Install color-eyre: error locations on, environment section off.
/// Repeat calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Install the global subscriber.
///
/// Production writes flattened JSON lines without targets; development
/// writes pretty output with targets. Both carry `tracing_error::ErrorLayer`
/// so eyre reports include span traces.
///
/// Returns `false` when a subscriber was already installed, which happens
/// when several tests initialise tracing in one process.
pub fn init_tracing(environment: &Environment) -> bool {
    let output = if environment.is_production() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .pretty()
            .boxed()
    };

    let installed = tracing_subscriber::registry()
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .with(env_filter(environment))
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(?environment, "Tracing initialized");
    }
    installed
}
