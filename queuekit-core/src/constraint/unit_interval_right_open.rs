use std::cmp::Ordering;

use num_traits::{One, Zero};

use crate::constraint::{Constrained, Constraint, ConstraintError};

/// Types with a zero and a one to bound the unit interval.
///
/// Implemented for `f32` and `f64`.
pub trait UnitBounds: PartialOrd + Zero + One {}

impl UnitBounds for f32 {}
impl UnitBounds for f64 {}

/// Marker type enforcing that a value lies in the right-open unit interval: `0 ≤ x < 1`.
///
/// A queue whose per-server utilization falls outside this interval never
/// reaches a steady state, so models check their load against it when built.
///
/// # Examples
///
/// ```
/// use queuekit_core::constraint::{Constrained, UnitIntervalRightOpen};
///
/// let a = Constrained::<_, UnitIntervalRightOpen>::new(0.25).unwrap();
/// assert_eq!(a.into_inner(), 0.25);
///
/// assert!(UnitIntervalRightOpen::new(1.0).is_err());
/// assert!(UnitIntervalRightOpen::new(1.5).is_err());
/// assert!(UnitIntervalRightOpen::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitIntervalRightOpen;

impl UnitIntervalRightOpen {
    /// Constructs `Constrained<T, UnitIntervalRightOpen>` if 0 ≤ value < 1.
    ///
    /// # Errors
    ///
    /// Fails if the value is outside the right-open unit interval:
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than or equal to one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn new<T: UnitBounds>(
        value: T,
    ) -> Result<Constrained<T, UnitIntervalRightOpen>, ConstraintError> {
        Constrained::<T, UnitIntervalRightOpen>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitIntervalRightOpen {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater | Ordering::Equal)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_valid() {
        assert!(Constrained::<f64, UnitIntervalRightOpen>::new(0.0).is_ok());
        assert!(Constrained::<f64, UnitIntervalRightOpen>::new(0.9).is_ok());
        assert!(UnitIntervalRightOpen::new(0.5_f32).is_ok());
    }

    #[test]
    fn floats_out_of_range() {
        assert!(matches!(
            UnitIntervalRightOpen::new(-1.0),
            Err(ConstraintError::BelowMinimum)
        ));
        assert!(matches!(
            UnitIntervalRightOpen::new(1.0),
            Err(ConstraintError::AboveMaximum)
        ));
        assert!(matches!(
            UnitIntervalRightOpen::new(2.0),
            Err(ConstraintError::AboveMaximum)
        ));
    }

    #[test]
    fn floats_nan_is_not_a_number() {
        assert!(matches!(
            UnitIntervalRightOpen::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        ));
    }
}
