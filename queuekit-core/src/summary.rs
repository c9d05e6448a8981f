#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

/// A snapshot of the steady-state means of a queueing model.
///
/// Times are in the unit the model's rates were given in.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct Summary {
    /// Mean arrivals per unit time (λ).
    pub arrival_rate: f64,
    /// Mean completions per unit time for one busy server (μ).
    pub service_rate: f64,
    /// The model's utilization figure.
    pub utilization: f64,
    pub mean_units_in_system: f64,
    pub mean_units_in_queue: f64,
    pub mean_idle_servers: f64,
    pub mean_time_in_queue: f64,
    pub mean_time_in_system: f64,
    pub mean_service_time: f64,
    /// Steady-state probability that the system is empty.
    pub probability_zero_units: f64,
}
