use std::fmt::{self, Display, Formatter};

use num_traits::{Signed, Zero};

use super::Fraction;

/// How [`Fraction`] renders integer values.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// `5/1` renders as `5`.
    #[default]
    Compact,
    /// Always `numerator/denominator`.
    Explicit,
}

/// Display adapter returned by [`Fraction::display`].
#[derive(Copy, Clone, Debug)]
pub struct FractionDisplay<'a> {
    fraction: &'a Fraction,
    mode: DisplayMode,
}

/// Mixed-number display adapter returned by [`Fraction::mixed`].
///
/// The whole part is truncated toward zero and the remainder keeps the sign of the value:
/// `7/3` is `2 + 1/3`, `-7/3` is `-2 - 1/3`, and `-1/3` is `0 - 1/3`.
#[derive(Copy, Clone, Debug)]
pub struct MixedNumber<'a>(&'a Fraction);

impl Fraction {
    pub fn display(&self, mode: DisplayMode) -> FractionDisplay<'_> {
        FractionDisplay {
            fraction: self,
            mode,
        }
    }

    pub fn mixed(&self) -> MixedNumber<'_> {
        MixedNumber(self)
    }

    /// Renders the value as an integer plus a proper fraction, see [`MixedNumber`].
    pub fn as_mixed_number(&self) -> String {
        self.mixed().to_string()
    }
}

impl Display for FractionDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Fraction {
            numerator,
            denominator,
        } = self.fraction;
        match self.mode {
            DisplayMode::Compact if self.fraction.is_integer() => write!(f, "{numerator}"),
            _ => write!(f, "{numerator}/{denominator}"),
        }
    }
}

impl Display for Fraction {
    /// `{}` uses [`DisplayMode::Compact`], `{:#}` uses [`DisplayMode::Explicit`].
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mode = if f.alternate() {
            DisplayMode::Explicit
        } else {
            DisplayMode::Compact
        };
        Display::fmt(&self.display(mode), f)
    }
}

impl Display for MixedNumber<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Fraction {
            numerator,
            denominator,
        } = self.0;
        let whole = numerator / denominator;
        let rest = numerator.abs() % denominator;
        if rest.is_zero() {
            return write!(f, "{whole}");
        }
        let sign = if numerator.is_negative() { '-' } else { '+' };
        write!(f, "{whole} {sign} {rest}/{denominator}")
    }
}
