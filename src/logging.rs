//! `tracing` subscriber setup.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Standard error; used by the one-shot CLI.
    Stderr,
    /// Appended to a file; used while the terminal UI owns the screen.
    File(&'a Path),
    /// Nothing is recorded.
    Off,
}

/// Level directive for a `-v` count.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn make_filter(verbose: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pv_estimator={}", level_for_verbosity(verbose)))
    })
}

/// Initializes logging. Call once at startup.
///
/// `RUST_LOG` overrides the level derived from `verbose`. A second call is
/// a no-op.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(verbose: u8, target: LogTarget<'_>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(make_filter(verbose))
        .with_target(false);

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    if let Err(e) = installed {
        // A subscriber is already installed; it keeps receiving events.
        tracing::debug!(error = %e, "logging already initialized");
    }
    Ok(())
}
