use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use thiserror::Error;

use crate::core::operand::{Operand, OperandKind};
use crate::math::gcd;

mod cmp;
mod fmt;
mod ops;
#[cfg(feature = "serde")]
mod serde_impl;

pub use fmt::{DisplayMode, FractionDisplay, MixedNumber};

/// Significant bits kept in the integer quotient when converting to `f64`.
const F64_QUOTIENT_BITS: i64 = 64;

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum FractionError {
    #[error("denominator cannot be zero")]
    InvalidDenominator,
    #[error("numerator and denominator must be integers, got {found}")]
    InvalidOperand { found: OperandKind },
    #[error("cannot combine a fraction with {found}")]
    IncompatibleOperand { found: OperandKind },
    #[error("cannot convert {found} to a fraction")]
    UnsupportedConversion { found: OperandKind },
    #[error("exponent must be an integer or a decimal, got {found}")]
    InvalidExponent { found: OperandKind },
    #[error("integer exponent does not fit in 32 bits")]
    ExponentOutOfRange,
}

/// An exact rational number.
///
/// Always stored in lowest terms with a strictly positive denominator, so two fractions are
/// equal iff their parts are equal. Zero is `0/1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: BigInt,
    denominator: BigInt,
}

impl Fraction {
    /// Creates the reduced fraction `numerator / denominator`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidDenominator`] if `denominator` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use exact_fraction::Fraction;
    ///
    /// let f = Fraction::new(4, -6).unwrap();
    /// assert_eq!(f.to_string(), "-2/3");
    /// ```
    pub fn new(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
    ) -> Result<Self, FractionError> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(FractionError::InvalidDenominator);
        }
        Ok(Self::reduced(numerator.into(), denominator))
    }

    /// Like [`Fraction::new`], for loosely typed parts.
    ///
    /// Both parts must be integers; booleans are not accepted as `0`/`1`.
    pub fn from_operands(
        numerator: impl Into<Operand>,
        denominator: impl Into<Operand>,
    ) -> Result<Self, FractionError> {
        let numerator = integer_part(numerator.into())?;
        let denominator = integer_part(denominator.into())?;
        Self::new(numerator, denominator)
    }

    /// Converts an integer, decimal or fraction into a fraction.
    ///
    /// Decimals are read through their shortest decimal text, so `0.6` is exactly `3/5`.
    pub fn from_numeric(value: impl Into<Operand>) -> Result<Self, FractionError> {
        value.into().into_fraction()
    }

    /// Returns `n/1`.
    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Self {
            numerator: n.into(),
            denominator: BigInt::one(),
        }
    }

    /// Reduces `numerator / denominator` to canonical form.
    ///
    /// `denominator` must be nonzero.
    pub(crate) fn reduced(numerator: BigInt, denominator: BigInt) -> Self {
        let (numerator, denominator) = reduce(numerator, denominator);
        Self {
            numerator,
            denominator,
        }
    }

    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Returns `(numerator, denominator)`.
    pub fn into_parts(self) -> (BigInt, BigInt) {
        (self.numerator, self.denominator)
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Whether `|self| < 1`.
    pub fn is_proper(&self) -> bool {
        self.numerator.abs() < self.denominator
    }

    /// Whether the numerator is `1` or `-1`.
    pub fn is_unit(&self) -> bool {
        self.numerator.abs().is_one()
    }

    pub fn is_positive(&self) -> bool {
        self.numerator.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    /// Whether `self` and `other` differ by a unit fraction.
    ///
    /// Symmetric, and never true for equal values since their difference is zero.
    pub fn is_adjacent_to(&self, other: impl Into<Operand>) -> Result<bool, FractionError> {
        Ok(self.try_sub(other)?.is_unit())
    }

    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    /// Returns `-1`, `0` or `1`.
    pub fn signum(&self) -> Self {
        Self::from_integer(self.numerator.signum())
    }

    /// Returns `1 / self`.
    ///
    /// # Errors
    ///
    /// Returns [`FractionError::InvalidDenominator`] if `self` is zero.
    pub fn recip(&self) -> Result<Self, FractionError> {
        if self.is_zero() {
            return Err(FractionError::InvalidDenominator);
        }
        Ok(Self::reduced(
            self.denominator.clone(),
            self.numerator.clone(),
        ))
    }

    /// Integer part, rounded toward zero.
    pub fn trunc(&self) -> Self {
        Self::from_integer(&self.numerator / &self.denominator)
    }

    /// `self - self.trunc()`. Carries the sign of `self`.
    pub fn fract(&self) -> Self {
        Self {
            numerator: &self.numerator % &self.denominator,
            denominator: self.denominator.clone(),
        }
        .normalized_zero()
    }

    /// Nearest `f64`. Values past the `f64` range become infinite or zero.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let numerator = self.numerator.magnitude();
        let denominator = self.denominator.magnitude();
        // Scale so the integer quotient keeps `F64_QUOTIENT_BITS` significant bits.
        let shift = F64_QUOTIENT_BITS - (numerator.bits() as i64 - denominator.bits() as i64);
        let quotient = if shift >= 0 {
            (numerator << shift as u64) / denominator
        } else {
            numerator / (denominator << shift.unsigned_abs())
        };
        let magnitude = scale_by_pow2(quotient.to_f64().unwrap_or(f64::INFINITY), -shift);
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    fn normalized_zero(self) -> Self {
        if self.numerator.is_zero() {
            Self::default()
        } else {
            self
        }
    }
}

/// Divides out the common factor and moves the sign to the numerator.
fn reduce(numerator: BigInt, denominator: BigInt) -> (BigInt, BigInt) {
    debug_assert!(!denominator.is_zero());
    if numerator.is_zero() {
        return (BigInt::zero(), BigInt::one());
    }

    let divisor = gcd(numerator.clone(), denominator.clone());
    let numerator = numerator / &divisor;
    let denominator = denominator / &divisor;
    if denominator.is_negative() {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    }
}

/// `value * 2^exp`, stepping so no intermediate power of two leaves the `f64` range.
fn scale_by_pow2(mut value: f64, mut exp: i64) -> f64 {
    const STEP: i32 = 1000;
    while exp > i64::from(STEP) && value.is_finite() {
        value *= 2f64.powi(STEP);
        exp -= i64::from(STEP);
    }
    while exp < -i64::from(STEP) && value != 0.0 {
        value *= 2f64.powi(-STEP);
        exp += i64::from(STEP);
    }
    value * 2f64.powi(exp.clamp(-1100, 1100) as i32)
}

fn integer_part(operand: Operand) -> Result<BigInt, FractionError> {
    match operand {
        Operand::Integer(n) => Ok(n),
        other => Err(FractionError::InvalidOperand {
            found: other.kind(),
        }),
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::from_integer(0)
    }
}

impl From<BigInt> for Fraction {
    fn from(n: BigInt) -> Self {
        Self::from_integer(n)
    }
}

macro_rules! impl_from_integer {
    ($($int:ty),*) => {$(
        impl From<$int> for Fraction {
            fn from(n: $int) -> Self {
                Self::from_integer(n)
            }
        }
    )*};
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl TryFrom<f64> for Fraction {
    type Error = FractionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_numeric(value)
    }
}

impl TryFrom<f32> for Fraction {
    type Error = FractionError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::from_numeric(value)
    }
}

impl TryFrom<Operand> for Fraction {
    type Error = FractionError;

    fn try_from(operand: Operand) -> Result<Self, Self::Error> {
        operand.into_fraction()
    }
}

impl ToPrimitive for Fraction {
    fn to_i64(&self) -> Option<i64> {
        (&self.numerator / &self.denominator).to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        (&self.numerator / &self.denominator).to_u64()
    }

    fn to_i128(&self) -> Option<i128> {
        (&self.numerator / &self.denominator).to_i128()
    }

    fn to_u128(&self) -> Option<u128> {
        (&self.numerator / &self.denominator).to_u128()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(Fraction::to_f64(self))
    }
}

#[cfg(test)]
#[macro_export]
macro_rules! frac {
    ($n:expr, $d:expr) => {
        $crate::core::fraction::Fraction::new($n, $d).unwrap()
    };
}
