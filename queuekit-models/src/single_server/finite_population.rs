use queuekit_core::{
    ModelError, QueueModel, Rates, WaitTimeTail,
    combinatorics::{ln_falling_factorial, ln_sum_exp},
};
#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use super::exponential_wait_tail;
use crate::{structural_count, time_threshold};

/// How [`FinitePopulationSingleServer::probability_n_units_with`] evaluates Pₙ.
///
/// Both strategies produce the same distribution up to rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-derive",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PnStrategy {
    /// `Pₙ = P₀ · m!/(m − n)! · ψⁿ`.
    #[default]
    ClosedForm,
    /// `Pₙ = (m − n + 1) · ψ · Pₙ₋₁`, starting from P₀.
    ///
    /// The recurrence is carried on logarithms so that intermediate values
    /// below the smallest `f64` do not collapse to zero.
    Recursive,
}

/// An M/M/1//m queue: one server fed by a finite population of `m` sources.
///
/// Each source outside the system generates arrivals at rate λ, so the total
/// arrival rate falls as units pile up. Once served, a unit rejoins the
/// population. This is the classic machine-repair model: `m` machines, one
/// repair crew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinitePopulationSingleServer {
    rates: Rates,
    population_size: usize,
    p0: f64,
    ln_p0: f64,
}

impl FinitePopulationSingleServer {
    /// Build the model from the per-source arrival rate, the service rate,
    /// and the population size `m`.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if either rate is not strictly positive, if
    /// `population_size` is zero, or if `arrival_rate >= service_rate`.
    pub fn new(
        arrival_rate: f64,
        service_rate: f64,
        population_size: usize,
    ) -> Result<Self, ModelError> {
        let rates = Rates::new(arrival_rate, service_rate)?.stable_for(1)?;
        let population_size = structural_count("population_size", population_size)?;

        // ln of 1 + Σ m!/(m − k)!·ψᵏ, each term built from the previous one.
        let ln_psi = rates.offered_load().ln();
        #[allow(clippy::cast_precision_loss)]
        let ln_terms = (1..=population_size).scan(0.0, |ln_term, k| {
            *ln_term += ((population_size - k + 1) as f64).ln() + ln_psi;
            Some(*ln_term)
        });
        let ln_p0 = -ln_sum_exp(std::iter::once(0.0).chain(ln_terms));

        Ok(Self {
            rates,
            population_size,
            p0: ln_p0.exp(),
            ln_p0,
        })
    }

    /// The number of sources, `m`.
    #[must_use]
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Probability that exactly `n` units are present, using `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::StateOutOfRange`] if `n` exceeds the population size.
    pub fn probability_n_units_with(
        &self,
        n: usize,
        strategy: PnStrategy,
    ) -> Result<f64, ModelError> {
        ModelError::check_state(n, self.population_size)?;

        if n == 0 {
            return Ok(self.p0);
        }

        Ok(match strategy {
            PnStrategy::ClosedForm => self.closed_form_pn(n),
            PnStrategy::Recursive => self.recursive_pn(n),
        })
    }

    /// Mean number of sources currently outside the system.
    #[must_use]
    pub fn mean_units_outside_system(&self) -> f64 {
        (1.0 - self.p0) / self.psi()
    }

    /// The mean arrival rate actually seen, `λ` times the sources outside.
    #[must_use]
    pub fn effective_arrival_rate(&self) -> f64 {
        self.rates.arrival() * self.mean_units_outside_system()
    }

    /// Probability that an arriving unit has to wait at all, `1 − P₀`.
    #[must_use]
    pub fn probability_of_waiting(&self) -> f64 {
        1.0 - self.p0
    }

    fn psi(&self) -> f64 {
        self.rates.offered_load()
    }

    /// `P₀ · m!/(m − n)! · ψⁿ`, multiplied out as a sum of logarithms.
    #[allow(clippy::cast_precision_loss)]
    fn closed_form_pn(&self, n: usize) -> f64 {
        let ln_falling = ln_falling_factorial(self.population_size, n);
        (self.ln_p0 + ln_falling + n as f64 * self.psi().ln()).exp()
    }

    #[allow(clippy::cast_precision_loss)]
    fn recursive_pn(&self, n: usize) -> f64 {
        let m = self.population_size;
        let ln_psi = self.psi().ln();

        (1..=n)
            .fold(self.ln_p0, |ln_previous, k| {
                ((m - k + 1) as f64).ln() + ln_psi + ln_previous
            })
            .exp()
    }
}

impl QueueModel for FinitePopulationSingleServer {
    fn arrival_rate(&self) -> f64 {
        self.rates.arrival()
    }

    fn service_rate(&self) -> f64 {
        self.rates.service()
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_units_in_system(&self) -> f64 {
        self.population_size as f64 - (1.0 - self.p0) / self.psi()
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_units_in_queue(&self) -> f64 {
        let psi = self.psi();
        self.population_size as f64 - ((1.0 + psi) / psi) * (1.0 - self.p0)
    }

    /// Only the empty state leaves the single server idle.
    fn mean_idle_servers(&self) -> f64 {
        self.p0
    }

    fn mean_time_in_queue(&self) -> f64 {
        self.mean_units_in_queue() / self.effective_arrival_rate()
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean_time_in_system(&self) -> f64 {
        let m = self.population_size as f64;
        (m / (1.0 - self.p0) - 1.0 / self.psi()) / self.rates.service()
    }

    fn probability_zero_units(&self) -> f64 {
        self.p0
    }

    fn probability_n_units(&self, n: usize) -> Result<f64, ModelError> {
        self.probability_n_units_with(n, PnStrategy::default())
    }

    fn state_ceiling(&self) -> Option<usize> {
        Some(self.population_size)
    }
}

impl WaitTimeTail for FinitePopulationSingleServer {
    /// At `t = 0` this is `1 − P₀`. For `t > 0` it reuses the M/M/1 tail
    /// `ψ·exp(μ·t·(ψ − 1))`, which ignores the finite population.
    fn probability_wait_over(&self, t: f64) -> Result<f64, ModelError> {
        let t = time_threshold(t)?;

        if t == 0.0 {
            return Ok(self.probability_of_waiting());
        }

        Ok(exponential_wait_tail(self.psi(), self.rates.service(), t))
    }
}
