//! Models with one server.

mod bounded_capacity;
mod finite_population;
mod unbounded;

pub use bounded_capacity::BoundedCapacitySingleServer;
pub use finite_population::{FinitePopulationSingleServer, PnStrategy};
pub use unbounded::UnboundedSingleServer;

/// Probability that a unit waits longer than `t` in an M/M/1 queue.
///
/// `psi` is the offered load λ/μ and `mu` the service rate.
fn exponential_wait_tail(psi: f64, mu: f64, t: f64) -> f64 {
    psi * (mu * t * (psi - 1.0)).exp()
}
