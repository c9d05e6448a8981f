use queuekit_core::{ModelError, QueueModel, Rates, combinatorics::powu};

use crate::structural_count;

/// An M/M/1/M queue: one server and room for at most `M` units in total.
///
/// Units that arrive while the system already holds `M` units are turned
/// away and never return, so the rate at which units actually enter is below
/// the nominal arrival rate. See [`effective_arrival_rate`].
///
/// [`effective_arrival_rate`]: BoundedCapacitySingleServer::effective_arrival_rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedCapacitySingleServer {
    rates: Rates,
    capacity: usize,
    p0: f64,
}

impl BoundedCapacitySingleServer {
    /// Build the model from its rates and the system capacity `M`.
    ///
    /// The arrival rate must be below the service rate even though a bounded
    /// system always settles.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if either rate is not strictly positive, if
    /// `capacity` is zero, or if `arrival_rate >= service_rate`.
    pub fn new(arrival_rate: f64, service_rate: f64, capacity: usize) -> Result<Self, ModelError> {
        let rates = Rates::new(arrival_rate, service_rate)?.stable_for(1)?;
        let capacity = structural_count("capacity", capacity)?;
        let p0 = truncated_geometric_p0(rates.offered_load(), capacity);

        Ok(Self {
            rates,
            capacity,
            p0,
        })
    }

    /// The most units the system can hold, `M`.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The rate at which units are admitted, `λ·(1 − P_M)`.
    #[must_use]
    pub fn effective_arrival_rate(&self) -> f64 {
        self.rates.arrival() * (1.0 - self.blocking_probability())
    }

    /// Probability that an arriving unit finds the system full, `P_M`.
    #[must_use]
    pub fn blocking_probability(&self) -> f64 {
        self.probability_at(self.capacity)
    }

    fn psi(&self) -> f64 {
        self.rates.offered_load()
    }

    fn probability_at(&self, n: usize) -> f64 {
        self.p0 * powu(self.psi(), n)
    }
}

/// `P₀ = (1 − ψ) / (1 − ψ^(M+1))`, or its limit `1/(M+1)` as ψ → 1.
fn truncated_geometric_p0(psi: f64, capacity: usize) -> f64 {
    if (1.0 - psi).abs() < f64::EPSILON {
        #[allow(clippy::cast_precision_loss)]
        let states = (capacity + 1) as f64;
        return 1.0 / states;
    }

    (1.0 - psi) / (1.0 - powu(psi, capacity + 1))
}

impl QueueModel for BoundedCapacitySingleServer {
    fn arrival_rate(&self) -> f64 {
        self.rates.arrival()
    }

    fn service_rate(&self) -> f64 {
        self.rates.service()
    }

    fn mean_units_in_system(&self) -> f64 {
        let psi = self.psi();
        let m = self.capacity + 1;

        #[allow(clippy::cast_precision_loss)]
        let truncation = m as f64 * powu(psi, m) / (1.0 - powu(psi, m));

        psi / (1.0 - psi) - truncation
    }

    /// Units present minus the unit in service whenever the server is busy.
    fn mean_units_in_queue(&self) -> f64 {
        self.mean_units_in_system() - (1.0 - self.p0)
    }

    /// `1 − ψ`, the M/M/1 idle fraction, uncorrected for blocked arrivals.
    ///
    /// Published figures for this calculator use this value rather than
    /// P₀, so it is kept as-is.
    fn mean_idle_servers(&self) -> f64 {
        1.0 - self.psi()
    }

    /// Divides by `λ·(P₀ + P₁)`, the arrival flow into states 0 and 1.
    fn mean_time_in_queue(&self) -> f64 {
        let entering = self.rates.arrival() * (self.p0 + self.probability_at(1));
        self.mean_units_in_queue() / entering
    }

    /// Little's law over admitted units only.
    fn mean_time_in_system(&self) -> f64 {
        self.mean_units_in_system() / self.effective_arrival_rate()
    }

    fn probability_zero_units(&self) -> f64 {
        self.p0
    }

    fn probability_n_units(&self, n: usize) -> Result<f64, ModelError> {
        ModelError::check_state(n, self.capacity)?;
        Ok(self.probability_at(n))
    }

    fn state_ceiling(&self) -> Option<usize> {
        Some(self.capacity)
    }
}
