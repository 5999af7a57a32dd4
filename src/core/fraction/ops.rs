use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_bigint::BigInt;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use tracing::debug;

use super::{Fraction, FractionError};
use crate::core::operand::Operand;

impl Fraction {
    /// `self + rhs`, accepting fractions, integers and decimals.
    ///
    /// # Errors
    ///
    /// [`FractionError::IncompatibleOperand`] for non-numeric `rhs`,
    /// [`FractionError::UnsupportedConversion`] for booleans and non-finite decimals.
    pub fn try_add(&self, rhs: impl Into<Operand>) -> Result<Fraction, FractionError> {
        let rhs = rhs.into().into_rhs()?;
        Ok(self + &rhs)
    }

    /// `self - rhs`. Fails like [`Fraction::try_add`].
    pub fn try_sub(&self, rhs: impl Into<Operand>) -> Result<Fraction, FractionError> {
        let rhs = rhs.into().into_rhs()?;
        Ok(self - &rhs)
    }

    /// `self * rhs`. Fails like [`Fraction::try_add`].
    pub fn try_mul(&self, rhs: impl Into<Operand>) -> Result<Fraction, FractionError> {
        let rhs = rhs.into().into_rhs()?;
        Ok(self * &rhs)
    }

    /// `self / rhs`.
    ///
    /// # Errors
    ///
    /// Fails like [`Fraction::try_add`], and with [`FractionError::InvalidDenominator`] when
    /// `rhs` is zero.
    pub fn try_div(&self, rhs: impl Into<Operand>) -> Result<Fraction, FractionError> {
        let rhs = rhs.into().into_rhs()?;
        self.div_fraction(&rhs)
    }

    /// Raises `self` to an integer or decimal power.
    ///
    /// Integer exponents are exact; a negative exponent inverts the result. A non-integral
    /// decimal exponent is evaluated in `f64` and the result converted back, so it is only
    /// as exact as the float.
    ///
    /// # Errors
    ///
    /// - [`FractionError::InvalidExponent`] if `exp` is not an integer or decimal.
    /// - [`FractionError::ExponentOutOfRange`] if `|exp|` does not fit in `u32`.
    /// - [`FractionError::InvalidDenominator`] for a negative power of zero, integer or decimal.
    /// - [`FractionError::UnsupportedConversion`] if the float result is not finite, e.g. a
    ///   fractional power of a negative number.
    pub fn try_pow(&self, exp: impl Into<Operand>) -> Result<Fraction, FractionError> {
        match exp.into() {
            Operand::Integer(exp) => self.pow_integer(&exp),
            Operand::Decimal(exp) if exp.fract() == 0.0 && exp.abs() <= f64::from(u32::MAX) => {
                self.pow_integer(&BigInt::from(exp as i64))
            }
            Operand::Decimal(exp) => self.pow_decimal(exp),
            other => Err(FractionError::InvalidExponent {
                found: other.kind(),
            }),
        }
    }

    fn div_fraction(&self, rhs: &Fraction) -> Result<Fraction, FractionError> {
        if rhs.is_zero() {
            return Err(FractionError::InvalidDenominator);
        }
        Ok(Fraction::reduced(
            &self.numerator * &rhs.denominator,
            &self.denominator * &rhs.numerator,
        ))
    }

    fn pow_integer(&self, exp: &BigInt) -> Result<Fraction, FractionError> {
        let magnitude = exp
            .magnitude()
            .to_u32()
            .ok_or(FractionError::ExponentOutOfRange)?;
        // Powers of coprime integers are coprime, and the denominator stays positive.
        let power = Fraction {
            numerator: Pow::pow(&self.numerator, magnitude),
            denominator: Pow::pow(&self.denominator, magnitude),
        };
        if exp.is_negative() {
            power.recip()
        } else {
            Ok(power)
        }
    }

    fn pow_decimal(&self, exp: f64) -> Result<Fraction, FractionError> {
        if self.is_zero() && exp < 0.0 {
            return Err(FractionError::InvalidDenominator);
        }
        let base = self.to_f64();
        let value = base.powf(exp);
        debug!(base, exp, value, "fractional exponent evaluated in floating point");
        Fraction::from_numeric(value)
    }
}

impl Add<&Fraction> for &Fraction {
    type Output = Fraction;

    fn add(self, rhs: &Fraction) -> Fraction {
        Fraction::reduced(
            &self.numerator * &rhs.denominator + &rhs.numerator * &self.denominator,
            &self.denominator * &rhs.denominator,
        )
    }
}

impl Sub<&Fraction> for &Fraction {
    type Output = Fraction;

    fn sub(self, rhs: &Fraction) -> Fraction {
        Fraction::reduced(
            &self.numerator * &rhs.denominator - &rhs.numerator * &self.denominator,
            &self.denominator * &rhs.denominator,
        )
    }
}

impl Mul<&Fraction> for &Fraction {
    type Output = Fraction;

    fn mul(self, rhs: &Fraction) -> Fraction {
        Fraction::reduced(
            &self.numerator * &rhs.numerator,
            &self.denominator * &rhs.denominator,
        )
    }
}

impl Div<&Fraction> for &Fraction {
    type Output = Fraction;

    /// # Panics
    ///
    /// Panics if `rhs` is zero. Use [`Fraction::try_div`] to get an error instead.
    fn div(self, rhs: &Fraction) -> Fraction {
        match self.div_fraction(rhs) {
            Ok(quotient) => quotient,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Forwards the owned operand combinations to the `&Fraction op &Fraction` impl.
macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: Fraction) -> Fraction {
                (&self).$method(&rhs)
            }
        }

        impl $trait<&Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &Fraction) -> Fraction {
                (&self).$method(rhs)
            }
        }

        impl $trait<Fraction> for &Fraction {
            type Output = Fraction;

            fn $method(self, rhs: Fraction) -> Fraction {
                self.$method(&rhs)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

/// `Fraction op integer`, for every primitive integer type and `BigInt`.
macro_rules! impl_integer_binop {
    ($trait:ident, $method:ident, $($int:ty),*) => {$(
        impl $trait<$int> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: $int) -> Fraction {
                (&self).$method(&Fraction::from(rhs))
            }
        }

        impl $trait<$int> for &Fraction {
            type Output = Fraction;

            fn $method(self, rhs: $int) -> Fraction {
                self.$method(&Fraction::from(rhs))
            }
        }
    )*};
}

macro_rules! impl_integer_ops {
    ($($int:ty),*) => {
        impl_integer_binop!(Add, add, $($int),*);
        impl_integer_binop!(Sub, sub, $($int),*);
        impl_integer_binop!(Mul, mul, $($int),*);
        impl_integer_binop!(Div, div, $($int),*);
    };
}

impl_integer_ops!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, BigInt);

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $op:ident) => {
        impl $trait<Fraction> for Fraction {
            fn $method(&mut self, rhs: Fraction) {
                *self = (&*self).$op(&rhs);
            }
        }

        impl $trait<&Fraction> for Fraction {
            fn $method(&mut self, rhs: &Fraction) {
                *self = (&*self).$op(rhs);
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, add);
impl_assign_op!(SubAssign, sub_assign, sub);
impl_assign_op!(MulAssign, mul_assign, mul);
impl_assign_op!(DivAssign, div_assign, div);

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        -self.clone()
    }
}

macro_rules! impl_pow {
    ($($exp:ty),*) => {$(
        impl Pow<$exp> for &Fraction {
            type Output = Fraction;

            /// # Panics
            ///
            /// Panics on a negative power of zero. Use [`Fraction::try_pow`] to get an error
            /// instead.
            fn pow(self, exp: $exp) -> Fraction {
                match self.pow_integer(&BigInt::from(exp)) {
                    Ok(power) => power,
                    Err(err) => panic!("{err}"),
                }
            }
        }

        impl Pow<$exp> for Fraction {
            type Output = Fraction;

            fn pow(self, exp: $exp) -> Fraction {
                (&self).pow(exp)
            }
        }
    )*};
}

impl_pow!(i32, u32);

impl Zero for Fraction {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl One for Fraction {
    fn one() -> Self {
        Self::from_integer(1)
    }
}

impl Sum for Fraction {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Fraction> for Fraction {
    fn sum<I: Iterator<Item = &'a Fraction>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl Product for Fraction {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

impl<'a> Product<&'a Fraction> for Fraction {
    fn product<I: Iterator<Item = &'a Fraction>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use num_traits::{One, Pow, Zero};
    use rand::Rng;

    use crate::core::fraction::{Fraction, FractionError};
    use crate::core::operand::OperandKind;
    use crate::frac;

    fn random_fraction(rng: &mut impl Rng) -> Fraction {
        let n: i64 = rng.gen_range(-10_000..10_000);
        let d: i64 = rng.gen_range(1..10_000);
        frac!(n, d)
    }

    #[test]
    fn test_addition() {
        assert_eq!(frac!(1, 2).try_add(frac!(1, 3)), Ok(frac!(5, 6)));
        assert_eq!(frac!(1, 2).try_add(1), Ok(frac!(3, 2)));
        assert_eq!(frac!(1, 2).try_add(0.5), Ok(frac!(1, 1)));
        assert_eq!(frac!(1, 2).try_add(frac!(-1, 3)), Ok(frac!(1, 6)));
        assert_eq!(frac!(1, 2).try_add(-0.25), Ok(frac!(1, 4)));
        assert_eq!(frac!(1, 2).try_add(0), Ok(frac!(1, 2)));
        assert_eq!(frac!(1, 4).try_add(frac!(2, 4)), Ok(frac!(3, 4)));
        assert_eq!(frac!(-1, 2).try_add(frac!(-1, 3)), Ok(frac!(-5, 6)));
        assert_eq!(
            frac!(1_000_000, 3).try_add(frac!(2_000_000, 3)),
            Ok(frac!(1_000_000, 1))
        );
    }

    #[test]
    fn test_decimal_coercion_is_exact() {
        assert_eq!(frac!(1, 3).try_add(0.6), Ok(frac!(14, 15)));
        assert_eq!(frac!(3, 4).try_mul(0.5), Ok(frac!(3, 8)));
    }

    #[test]
    fn test_subtraction() {
        assert_eq!(frac!(3, 4).try_sub(frac!(1, 4)), Ok(frac!(1, 2)));
        assert_eq!(frac!(3, 4).try_sub(1), Ok(frac!(-1, 4)));
        assert_eq!(frac!(3, 4).try_sub(0.25), Ok(frac!(1, 2)));
        assert_eq!(frac!(1, 4).try_sub(frac!(3, 4)), Ok(frac!(-1, 2)));
        assert_eq!(frac!(-1, 2).try_sub(frac!(-1, 3)), Ok(frac!(-1, 6)));
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(frac!(2, 3).try_mul(frac!(3, 4)), Ok(frac!(1, 2)));
        assert_eq!(frac!(2, 3).try_mul(3), Ok(frac!(2, 1)));
        assert_eq!(frac!(2, 3).try_mul(-3), Ok(frac!(-2, 1)));
        assert_eq!(frac!(2, 3).try_mul(0), Ok(frac!(0, 1)));
        assert_eq!(frac!(2, 3).try_mul(frac!(3, 2)), Ok(frac!(1, 1)));
        assert_eq!(frac!(-2, 3).try_mul(frac!(3, 4)), Ok(frac!(-1, 2)));
    }

    #[test]
    fn test_division() {
        assert_eq!(frac!(1, 2).try_div(frac!(1, 4)), Ok(frac!(2, 1)));
        assert_eq!(frac!(1, 2).try_div(2), Ok(frac!(1, 4)));
        assert_eq!(frac!(1, 2).try_div(0.5), Ok(frac!(1, 1)));
        assert_eq!(frac!(1, 2).try_div(frac!(-1, 4)), Ok(frac!(-2, 1)));
        assert_eq!(frac!(1, 2).try_div(-2), Ok(frac!(-1, 4)));
        assert_eq!(frac!(-1, 2).try_div(frac!(1, 4)), Ok(frac!(-2, 1)));
        assert_eq!(frac!(3, 4).try_div(frac!(3, 4)), Ok(frac!(1, 1)));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            frac!(1, 2).try_div(frac!(0, 1)),
            Err(FractionError::InvalidDenominator)
        );
        assert_eq!(frac!(1, 2).try_div(0), Err(FractionError::InvalidDenominator));
        assert_eq!(frac!(1, 2).try_div(0.0), Err(FractionError::InvalidDenominator));
    }

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn test_division_operator_by_zero_panics() {
        let _ = frac!(1, 2) / Fraction::zero();
    }

    #[test]
    fn test_invalid_operands() {
        let f = frac!(1, 2);
        let text = FractionError::IncompatibleOperand {
            found: OperandKind::Text,
        };
        assert_eq!(f.try_add("invalid"), Err(text));
        assert_eq!(f.try_sub("invalid"), Err(text));
        assert_eq!(f.try_mul("invalid"), Err(text));
        assert_eq!(f.try_div("invalid"), Err(text));
        assert_eq!(
            f.try_add(vec![1, 2]),
            Err(FractionError::IncompatibleOperand {
                found: OperandKind::Sequence
            })
        );
        assert_eq!(
            f.try_add(None::<Fraction>),
            Err(FractionError::IncompatibleOperand {
                found: OperandKind::Nil
            })
        );
        assert_eq!(
            f.try_add(true),
            Err(FractionError::UnsupportedConversion {
                found: OperandKind::Boolean
            })
        );
        assert_eq!(
            f.try_mul(f64::INFINITY),
            Err(FractionError::UnsupportedConversion {
                found: OperandKind::NonFiniteDecimal
            })
        );
    }

    #[test]
    fn test_power() {
        assert_eq!(frac!(1, 2).try_pow(5), Ok(frac!(1, 32)));
        assert_eq!(frac!(1, 2).try_pow(0), Ok(frac!(1, 1)));
        assert_eq!(frac!(1, 2).try_pow(-2), Ok(frac!(4, 1)));
        assert_eq!(frac!(5, 2).try_pow(-1), Ok(frac!(2, 5)));
        assert_eq!(frac!(5, 2).try_pow(2), Ok(frac!(25, 4)));
        assert_eq!(frac!(-1, 2).try_pow(2), Ok(frac!(1, 4)));
        assert_eq!(frac!(-1, 2).try_pow(3), Ok(frac!(-1, 8)));
        assert_eq!(frac!(-2, 3).try_pow(-3), Ok(frac!(-27, 8)));
        assert_eq!(frac!(0, 1).try_pow(0), Ok(frac!(1, 1)));
        assert_eq!(frac!(1, 2).try_pow(2.0), Ok(frac!(1, 4)));
    }

    #[test]
    fn test_power_decimal_exponent() {
        assert_eq!(frac!(9, 16).try_pow(0.5), Ok(frac!(3, 4)));

        let root = frac!(1, 3).try_pow(0.5).unwrap();
        assert!((root.to_f64() - (1.0f64 / 3.0).sqrt()).abs() < 1e-12);

        assert_eq!(
            frac!(-1, 2).try_pow(0.5),
            Err(FractionError::UnsupportedConversion {
                found: OperandKind::NonFiniteDecimal
            })
        );
    }

    #[test]
    fn test_power_errors() {
        assert_eq!(
            frac!(1, 2).try_pow("invalid"),
            Err(FractionError::InvalidExponent {
                found: OperandKind::Text
            })
        );
        assert_eq!(
            frac!(1, 2).try_pow(frac!(1, 2)),
            Err(FractionError::InvalidExponent {
                found: OperandKind::Fraction
            })
        );
        assert_eq!(
            frac!(1, 2).try_pow(true),
            Err(FractionError::InvalidExponent {
                found: OperandKind::Boolean
            })
        );
        assert_eq!(
            frac!(0, 1).try_pow(-1),
            Err(FractionError::InvalidDenominator)
        );
        assert_eq!(
            frac!(0, 1).try_pow(-0.5),
            Err(FractionError::InvalidDenominator)
        );
        assert_eq!(
            frac!(0, 1).try_pow(-2.0),
            Err(FractionError::InvalidDenominator)
        );
        assert_eq!(frac!(0, 1).try_pow(0.5), Ok(Fraction::zero()));
        assert_eq!(
            frac!(1, 2).try_pow(BigInt::from(u64::MAX)),
            Err(FractionError::ExponentOutOfRange)
        );
    }

    #[test]
    fn test_operators() {
        let a = frac!(3, 4);
        let b = frac!(1, 2);
        assert_eq!(&a + &b, frac!(5, 4));
        assert_eq!(&a - &b, frac!(1, 4));
        assert_eq!(&a * &b, frac!(3, 8));
        assert_eq!(&a / &b, frac!(3, 2));
        assert_eq!(a.clone() + b.clone(), frac!(5, 4));
        assert_eq!(a.clone() - &b, frac!(1, 4));
        assert_eq!(&a * b.clone(), frac!(3, 8));
        assert_eq!(-&a, frac!(-3, 4));
        assert_eq!(-a.clone(), frac!(-3, 4));

        assert_eq!(&a + 1, frac!(7, 4));
        assert_eq!(&a - 1u8, frac!(-1, 4));
        assert_eq!(a.clone() * 4i64, frac!(3, 1));
        assert_eq!(a.clone() / BigInt::from(3), frac!(1, 4));

        assert_eq!((&b).pow(3i32), frac!(1, 8));
        assert_eq!(b.clone().pow(-3i32), frac!(8, 1));
        assert_eq!(b.pow(0u32), Fraction::one());
    }

    #[test]
    fn test_assign_operators() {
        let mut f = frac!(1, 2);
        f += frac!(1, 3);
        assert_eq!(f, frac!(5, 6));
        f -= &frac!(1, 6);
        assert_eq!(f, frac!(2, 3));
        f *= frac!(3, 4);
        assert_eq!(f, frac!(1, 2));
        f /= frac!(1, 4);
        assert_eq!(f, frac!(2, 1));
    }

    #[test]
    fn test_sum_and_product() {
        let terms = vec![frac!(1, 2), frac!(1, 3), frac!(1, 6)];
        assert_eq!(terms.iter().sum::<Fraction>(), Fraction::one());
        assert_eq!(terms.iter().product::<Fraction>(), frac!(1, 36));
        assert_eq!(terms.into_iter().sum::<Fraction>(), Fraction::one());
        assert_eq!(Vec::<Fraction>::new().into_iter().sum::<Fraction>(), Fraction::zero());
        assert_eq!(Vec::<Fraction>::new().into_iter().product::<Fraction>(), Fraction::one());
    }

    #[test]
    fn test_algebraic_laws() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let a = random_fraction(&mut rng);
            let b = random_fraction(&mut rng);
            let c = random_fraction(&mut rng);

            assert_eq!(&a + &b, &b + &a);
            assert_eq!(&a * &b, &b * &a);
            assert_eq!(&a + &Fraction::zero(), a);
            assert_eq!(&a * &Fraction::one(), a);
            assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
            assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
            assert_eq!(&(&a - &b) + &b, a);
            if !a.is_zero() {
                assert_eq!(&a / &a, Fraction::one());
                assert_eq!(&(&b / &a) * &a, b);
            }
        }
    }

    #[test]
    fn test_results_stay_canonical() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let a = random_fraction(&mut rng);
            let b = random_fraction(&mut rng);
            for result in [&a + &b, &a - &b, &a * &b, a.try_pow(-3).unwrap_or_default()] {
                let expected = Fraction::new(result.numerator().clone(), result.denominator().clone());
                assert_eq!(expected.as_ref(), Ok(&result));
                assert!(result.denominator() > &BigInt::zero());
            }
        }
    }

    #[test]
    fn test_end_to_end() {
        let f1 = frac!(3, 4);
        let f2 = frac!(1, 2);

        assert_eq!(&f1 + &f2, frac!(5, 4));
        assert_eq!(&f1 - &f2, frac!(1, 4));
        assert_eq!(&f1 * &f2, frac!(3, 8));
        assert_eq!(&f1 / &f2, frac!(3, 2));
        assert_eq!(f1.to_string(), "3/4");
        assert_eq!(f1.try_add(1), Ok(frac!(7, 4)));
        assert_eq!(f1.try_mul(0.5), Ok(frac!(3, 8)));
        assert_eq!(f1.try_pow(2), Ok(frac!(9, 16)));
        assert_eq!(f1.is_adjacent_to(&f2), Ok(true));
        assert_eq!(f1.as_mixed_number(), "0 + 3/4");
    }
}
