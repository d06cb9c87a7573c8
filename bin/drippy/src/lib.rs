//! Drippy CLI Library
//!
//! Command implementations for the `drippy` binary, exposed as a library so
//! they can be driven from tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, new)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use drippy::cmd;
//!
//! cmd::new::run(Path::new("my-site")).unwrap();
//! cmd::build::run(Path::new("my-site"), false).unwrap();
//! ```

pub mod cmd;

pub use drippy_core::BuildConfig;
pub use drippy_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
