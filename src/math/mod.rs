use num_bigint::BigInt;
use num_traits::{Pow, Signed};

/// Greatest common divisor by the Euclidean algorithm.
///
/// `gcd(a, 0) = |a|`, and the result is never negative.
pub fn gcd<T: Signed + Clone>(a: T, b: T) -> T {
    let mut a = a;
    let mut b = b;
    while !b.is_zero() {
        let r = a.clone() % b.clone();
        a = b;
        b = r;
    }
    a.abs()
}

/// Returns `10^exp`.
pub fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}
