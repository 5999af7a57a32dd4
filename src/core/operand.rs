use std::fmt::{self, Display};

use num_bigint::BigInt;
use tracing::trace;

use crate::core::fraction::{Fraction, FractionError};
use crate::math::pow10;

/// A value on the other side of a fraction operation.
///
/// Every binary operation on [`Fraction`] accepts `impl Into<Operand>`, so fractions, integers
/// and decimals can be mixed freely. The non-numeric variants exist so that callers holding
/// loosely typed data (e.g. values decoded from a config file or a scripting layer) get a
/// precise [`FractionError`] instead of a silent conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Fraction(Fraction),
    Integer(BigInt),
    Decimal(f64),
    Boolean(bool),
    Text(String),
    Sequence(Vec<Operand>),
    Nil,
}

/// What kind of value an [`Operand`] holds. Used in error reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Fraction,
    Integer,
    Decimal,
    NonFiniteDecimal,
    Boolean,
    Text,
    Sequence,
    Nil,
}

impl Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperandKind::Fraction => "fraction",
            OperandKind::Integer => "integer",
            OperandKind::Decimal => "decimal",
            OperandKind::NonFiniteDecimal => "non-finite decimal",
            OperandKind::Boolean => "boolean",
            OperandKind::Text => "text",
            OperandKind::Sequence => "sequence",
            OperandKind::Nil => "nil",
        };
        write!(f, "{name}")
    }
}

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Fraction(_) => OperandKind::Fraction,
            Operand::Integer(_) => OperandKind::Integer,
            Operand::Decimal(value) if !value.is_finite() => OperandKind::NonFiniteDecimal,
            Operand::Decimal(_) => OperandKind::Decimal,
            Operand::Boolean(_) => OperandKind::Boolean,
            Operand::Text(_) => OperandKind::Text,
            Operand::Sequence(_) => OperandKind::Sequence,
            Operand::Nil => OperandKind::Nil,
        }
    }

    /// Converts a numeric operand into the equivalent fraction.
    ///
    /// Booleans are rejected even though they look like `0`/`1`.
    pub fn into_fraction(self) -> Result<Fraction, FractionError> {
        match self {
            Operand::Fraction(fraction) => Ok(fraction),
            Operand::Integer(n) => Ok(Fraction::from_integer(n)),
            Operand::Decimal(value) => decimal_to_fraction(value),
            other => Err(FractionError::UnsupportedConversion {
                found: other.kind(),
            }),
        }
    }

    /// Coerces the right-hand side of an arithmetic or comparison operation.
    ///
    /// Values that are not numbers at all fail as incompatible before any conversion is
    /// attempted; everything else goes through [`Operand::into_fraction`].
    pub(crate) fn into_rhs(self) -> Result<Fraction, FractionError> {
        match self {
            Operand::Text(_) | Operand::Sequence(_) | Operand::Nil => {
                Err(FractionError::IncompatibleOperand { found: self.kind() })
            }
            numeric => numeric.into_fraction(),
        }
    }
}

/// Exact value of the shortest decimal text that round-trips to `value`.
///
/// `0.6` becomes `3/5`, not the binary expansion of the nearest `f64`.
fn decimal_to_fraction(value: f64) -> Result<Fraction, FractionError> {
    if !value.is_finite() {
        return Err(FractionError::UnsupportedConversion {
            found: OperandKind::NonFiniteDecimal,
        });
    }

    // `Display` for f64 never switches to exponent notation.
    let text = value.to_string();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let (integer, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let magnitude = format!("{integer}{frac}")
        .parse::<BigInt>()
        .map_err(|_| FractionError::UnsupportedConversion {
            found: OperandKind::Decimal,
        })?;
    let numerator = if negative { -magnitude } else { magnitude };

    let fraction = Fraction::new(numerator, pow10(frac.len() as u32))?;
    trace!(value, %fraction, "coerced decimal");
    Ok(fraction)
}

impl From<Fraction> for Operand {
    fn from(fraction: Fraction) -> Self {
        Operand::Fraction(fraction)
    }
}

impl From<&Fraction> for Operand {
    fn from(fraction: &Fraction) -> Self {
        Operand::Fraction(fraction.clone())
    }
}

impl From<BigInt> for Operand {
    fn from(n: BigInt) -> Self {
        Operand::Integer(n)
    }
}

impl From<&BigInt> for Operand {
    fn from(n: &BigInt) -> Self {
        Operand::Integer(n.clone())
    }
}

macro_rules! impl_from_integer {
    ($($int:ty),*) => {$(
        impl From<$int> for Operand {
            fn from(n: $int) -> Self {
                Operand::Integer(BigInt::from(n))
            }
        }
    )*};
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Decimal(value)
    }
}

impl From<f32> for Operand {
    /// Widens through the shortest decimal text, so `0.1f32` stays `0.1`.
    fn from(value: f32) -> Self {
        let widened = value.to_string().parse().unwrap_or(f64::from(value));
        Operand::Decimal(widened)
    }
}

impl From<bool> for Operand {
    fn from(flag: bool) -> Self {
        Operand::Boolean(flag)
    }
}

impl From<&str> for Operand {
    fn from(text: &str) -> Self {
        Operand::Text(text.to_owned())
    }
}

impl From<String> for Operand {
    fn from(text: String) -> Self {
        Operand::Text(text)
    }
}

impl<T: Into<Operand>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        value.map_or(Operand::Nil, Into::into)
    }
}
