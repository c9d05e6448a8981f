//! Closed-form steady-state models for Markovian queues.
//!
//! Each model is built once from its rates and structural parameters and is
//! immutable afterwards. All of them implement [`QueueModel`]; the ones with
//! an unbounded waiting line also implement [`WaitTimeTail`].
//!
//! | Model | Kendall notation |
//! |-------|------------------|
//! | [`UnboundedSingleServer`] | M/M/1 |
//! | [`BoundedCapacitySingleServer`] | M/M/1/M |
//! | [`FinitePopulationSingleServer`] | M/M/1//m |
//! | [`MultiServerUnbounded`] | M/M/s |
//!
//! # Example
//!
//! ```
//! use queuekit_models::{QueueModel, UnboundedSingleServer};
//!
//! let queue = UnboundedSingleServer::new(10.0, 15.0)?;
//! assert!((queue.probability_zero_units() - 1.0 / 3.0).abs() < 1e-12);
//! # Ok::<(), queuekit_models::ModelError>(())
//! ```

pub mod multi_server;
pub mod single_server;

pub use multi_server::MultiServerUnbounded;
pub use queuekit_core::{ModelError, QueueModel, Summary, WaitTimeTail};
pub use single_server::{
    BoundedCapacitySingleServer, FinitePopulationSingleServer, PnStrategy, UnboundedSingleServer,
};

use queuekit_core::constraint::{NonNegative, StrictlyPositive};

/// Validate a waiting-time threshold.
fn time_threshold(t: f64) -> Result<f64, ModelError> {
    NonNegative::new(t)
        .map(|t| t.into_inner())
        .map_err(|source| ModelError::invalid_parameter("t", source))
}

/// Validate a structural count such as a server count or capacity.
fn structural_count(parameter: &'static str, value: usize) -> Result<usize, ModelError> {
    StrictlyPositive::new(value)
        .map(|value| value.into_inner())
        .map_err(|source| ModelError::invalid_parameter(parameter, source))
}
