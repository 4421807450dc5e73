//! Closed-form yearly PV estimate.
//!
//! Everything in here is pure: [`calculate`] maps an [`EstimatorInput`] and a
//! set of [`Heuristics`] to an [`EstimatorOutput`] with no I/O and no state.

mod calc;
/// Heuristic coefficients and the two named policies.
pub mod heuristics;
/// Panel orientation and its fixed yield multipliers.
pub mod orientation;
pub mod types;

pub use calc::calculate;
pub use heuristics::{Heuristics, Policy};
pub use orientation::Orientation;
pub use types::{EstimatorInput, EstimatorOutput};
