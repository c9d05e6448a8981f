use crate::{ModelError, Summary};

/// The metric surface shared by every steady-state queueing model.
///
/// Implementors are immutable after construction, so every method is a pure
/// function of the model's parameters and repeated calls return identical
/// results.
pub trait QueueModel {
    /// Mean arrivals per unit time (λ).
    fn arrival_rate(&self) -> f64;

    /// Mean completions per unit time for one busy server (μ).
    fn service_rate(&self) -> f64;

    /// The offered load λ/μ.
    fn utilization(&self) -> f64 {
        self.arrival_rate() / self.service_rate()
    }

    /// Mean number of units present, waiting or in service (L).
    fn mean_units_in_system(&self) -> f64;

    /// Mean number of units waiting for service to begin (Lq).
    fn mean_units_in_queue(&self) -> f64;

    /// Mean number of servers with nothing to do.
    fn mean_idle_servers(&self) -> f64;

    /// Mean time a unit waits before service begins (Wq).
    fn mean_time_in_queue(&self) -> f64;

    /// Mean time a unit spends in the system (W).
    fn mean_time_in_system(&self) -> f64;

    /// Mean duration of one service, `1/μ`.
    fn mean_service_time(&self) -> f64 {
        1.0 / self.service_rate()
    }

    /// Steady-state probability that the system is empty (P₀).
    fn probability_zero_units(&self) -> f64;

    /// Steady-state probability that exactly `n` units are present (Pₙ).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::StateOutOfRange`] if the model has a hard
    /// ceiling and `n` is above it.
    fn probability_n_units(&self, n: usize) -> Result<f64, ModelError>;

    /// The largest number of units the system can hold, if bounded.
    fn state_ceiling(&self) -> Option<usize> {
        None
    }

    /// Collect every mean into a [`Summary`].
    fn summary(&self) -> Summary {
        Summary {
            arrival_rate: self.arrival_rate(),
            service_rate: self.service_rate(),
            utilization: self.utilization(),
            mean_units_in_system: self.mean_units_in_system(),
            mean_units_in_queue: self.mean_units_in_queue(),
            mean_idle_servers: self.mean_idle_servers(),
            mean_time_in_queue: self.mean_time_in_queue(),
            mean_time_in_system: self.mean_time_in_system(),
            mean_service_time: self.mean_service_time(),
            probability_zero_units: self.probability_zero_units(),
        }
    }
}

/// Models that expose the tail of the waiting-time distribution.
pub trait WaitTimeTail {
    /// Probability that a unit waits longer than `t`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] if `t` is negative or NaN.
    fn probability_wait_over(&self, t: f64) -> Result<f64, ModelError>;
}
