//! cli
//!
//! Command-line interface layer for gitbridge.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Install the log subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers open the repository, merge config with
//! flags into a request, and hand it to the sync or diff layer.

pub mod args;
pub mod commands;

pub use args::Cli;

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ui::output::Verbosity;

/// Environment variable holding a log filter (`EnvFilter` syntax).
pub const LOG_ENV: &str = "GITBRIDGE_LOG";

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            verbosity: Verbosity::Normal,
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);
    init_logging(verbosity);

    let ctx = Context {
        cwd: cli.cwd.clone(),
        verbosity,
    };

    commands::dispatch(cli.command, &ctx)
}

/// Install a stderr log subscriber.
///
/// `GITBRIDGE_LOG` wins over the verbosity flags when set.
fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
