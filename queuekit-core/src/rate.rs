use std::ops::Deref;

use crate::{
    ModelError,
    constraint::{
        Constrained, ConstraintError, ConstraintResult, StrictlyPositive, UnitIntervalRightOpen,
    },
};

/// A mean event rate, in events per unit time.
///
/// The time unit is whatever the caller measures in; every model output that
/// carries a time dimension is expressed in the same unit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Rate(Constrained<f64, StrictlyPositive>);

impl Rate {
    /// Create a [`Rate`] from a value.
    ///
    /// # Errors
    ///
    /// This function will return an error if the value is not strictly
    /// positive, or [`ConstraintError::Infinite`] if it is positive infinity.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        let rate = StrictlyPositive::new(value)?;
        if value.is_infinite() {
            return Err(ConstraintError::Infinite);
        }
        Ok(Self(rate))
    }
}

impl Deref for Rate {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// The arrival and service rates of a queueing station.
///
/// Once built through [`Rates::new`] and [`Rates::stable_for`], both rates
/// are strictly positive and the arrival rate is strictly below the combined
/// service capacity of the station's servers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    arrival: Rate,
    service: Rate,
}

impl Rates {
    /// Validate a pair of raw rates.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] naming `arrival_rate` or
    /// `service_rate` if either value is not a strictly positive, finite number.
    pub fn new(arrival_rate: f64, service_rate: f64) -> Result<Self, ModelError> {
        let arrival = Rate::new(arrival_rate)
            .map_err(|source| ModelError::invalid_parameter("arrival_rate", source))?;
        let service = Rate::new(service_rate)
            .map_err(|source| ModelError::invalid_parameter("service_rate", source))?;

        Ok(Self { arrival, service })
    }

    /// Require that `servers` parallel servers can keep up with arrivals.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Unstable`] if `arrival_rate >= servers * service_rate`.
    pub fn stable_for(self, servers: usize) -> Result<Self, ModelError> {
        #[allow(clippy::cast_precision_loss)]
        let service_capacity = servers as f64 * *self.service;

        match UnitIntervalRightOpen::new(*self.arrival / service_capacity) {
            Ok(_) => Ok(self),
            Err(ConstraintError::AboveMaximum | ConstraintError::NotANumber) => {
                Err(ModelError::Unstable {
                    arrival_rate: *self.arrival,
                    service_capacity,
                })
            }
            Err(source) => Err(ModelError::invalid_parameter("arrival_rate", source)),
        }
    }

    /// Mean arrivals per unit time (λ).
    #[must_use]
    pub fn arrival(&self) -> f64 {
        *self.arrival
    }

    /// Mean completions per unit time for one busy server (μ).
    #[must_use]
    pub fn service(&self) -> f64 {
        *self.service
    }

    /// The offered load λ/μ, in erlangs.
    #[must_use]
    pub fn offered_load(&self) -> f64 {
        *self.arrival / *self.service
    }
}
