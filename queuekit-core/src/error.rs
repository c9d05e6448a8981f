use thiserror::Error;

use crate::constraint::ConstraintError;

/// Errors raised when building or querying a queueing model.
///
/// Every variant describes an invalid argument supplied by the caller.
/// Models never fail for any other reason, so there is nothing to retry.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A rate, structural count, or time threshold violates its constraint.
    #[error("invalid {parameter}: {source}")]
    InvalidParameter {
        parameter: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The arrival rate meets or exceeds the total service capacity.
    #[error(
        "this system won't stop growing (arrival_rate={arrival_rate}, service_capacity={service_capacity})"
    )]
    Unstable {
        arrival_rate: f64,
        service_capacity: f64,
    },

    /// An occupancy index lies above the model's hard ceiling.
    #[error("state {n} is above the ceiling of {ceiling} units")]
    StateOutOfRange { n: usize, ceiling: usize },
}

impl ModelError {
    /// Wrap a constraint violation for the named parameter.
    #[must_use]
    pub fn invalid_parameter(parameter: &'static str, source: ConstraintError) -> Self {
        Self::InvalidParameter { parameter, source }
    }

    /// Reject `n` if it is above `ceiling`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::StateOutOfRange`] if `n > ceiling`.
    pub fn check_state(n: usize, ceiling: usize) -> Result<(), Self> {
        if n > ceiling {
            Err(Self::StateOutOfRange { n, ceiling })
        } else {
            Ok(())
        }
    }
}
