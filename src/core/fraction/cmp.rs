use std::cmp::Ordering;

use super::{Fraction, FractionError};
use crate::core::operand::Operand;

impl Fraction {
    /// Compares `self` with an integer, decimal or fraction for equality.
    ///
    /// Canonical form makes this a plain comparison of parts after coercion.
    ///
    /// # Errors
    ///
    /// [`FractionError::IncompatibleOperand`] if `other` is not a number. Equality against
    /// arbitrary values is not silently `false`.
    pub fn try_eq(&self, other: impl Into<Operand>) -> Result<bool, FractionError> {
        let other = other.into().into_rhs()?;
        Ok(*self == other)
    }

    /// Orders `self` against an integer, decimal or fraction. Fails like [`Fraction::try_eq`].
    pub fn try_cmp(&self, other: impl Into<Operand>) -> Result<Ordering, FractionError> {
        let other = other.into().into_rhs()?;
        Ok(self.cmp(&other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }
        // Denominators are positive, so cross-multiplying keeps the order.
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
