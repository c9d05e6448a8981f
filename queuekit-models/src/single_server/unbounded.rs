use queuekit_core::{ModelError, QueueModel, Rates, WaitTimeTail, combinatorics::powu};

use super::exponential_wait_tail;
use crate::time_threshold;

/// An M/M/1 queue: one server, unlimited room, unlimited arrivals.
///
/// With ψ = λ/μ the occupancy is geometric, `Pₙ = (1 − ψ)·ψⁿ`, and every
/// mean follows in closed form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnboundedSingleServer {
    rates: Rates,
}

impl UnboundedSingleServer {
    /// Build the model from its arrival and service rates.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if either rate is not strictly positive or if
    /// `arrival_rate >= service_rate`.
    pub fn new(arrival_rate: f64, service_rate: f64) -> Result<Self, ModelError> {
        let rates = Rates::new(arrival_rate, service_rate)?.stable_for(1)?;
        Ok(Self { rates })
    }

    fn psi(&self) -> f64 {
        self.rates.offered_load()
    }
}

impl QueueModel for UnboundedSingleServer {
    fn arrival_rate(&self) -> f64 {
        self.rates.arrival()
    }

    fn service_rate(&self) -> f64 {
        self.rates.service()
    }

    fn mean_units_in_system(&self) -> f64 {
        let psi = self.psi();
        psi / (1.0 - psi)
    }

    fn mean_units_in_queue(&self) -> f64 {
        let psi = self.psi();
        psi * psi / (1.0 - psi)
    }

    fn mean_idle_servers(&self) -> f64 {
        1.0 - self.psi()
    }

    fn mean_time_in_queue(&self) -> f64 {
        self.mean_units_in_queue() / self.rates.arrival()
    }

    fn mean_time_in_system(&self) -> f64 {
        self.mean_units_in_system() / self.rates.arrival()
    }

    fn probability_zero_units(&self) -> f64 {
        1.0 - self.psi()
    }

    fn probability_n_units(&self, n: usize) -> Result<f64, ModelError> {
        Ok(self.probability_zero_units() * powu(self.psi(), n))
    }
}

impl WaitTimeTail for UnboundedSingleServer {
    /// At `t = 0` this is ψ, the probability of waiting at all.
    fn probability_wait_over(&self, t: f64) -> Result<f64, ModelError> {
        let t = time_threshold(t)?;
        Ok(exponential_wait_tail(self.psi(), self.rates.service(), t))
    }
}
