//! Yearly PV production, self-consumption, autarky and electricity-cost estimator.

pub mod cli;
pub mod config;
/// Input state, field normalization and recomputation.
pub mod controller;
pub mod estimator;
pub mod io;
pub mod logging;
pub mod report;
#[cfg(feature = "tui")]
pub mod tui;
pub mod view;
