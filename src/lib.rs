//! Exact rational numbers kept in lowest terms.
//!
//! ```
//! use exact_fraction::Fraction;
//!
//! let f1 = Fraction::new(3, 4).unwrap();
//! let f2 = Fraction::new(1, 2).unwrap();
//! assert_eq!((&f1 + &f2).to_string(), "5/4");
//! assert_eq!(f1.try_add(0.25).unwrap(), Fraction::from(1));
//! assert!(f1.try_add("invalid").is_err());
//! ```
pub mod core;
pub mod math;

pub use crate::core::fraction::{DisplayMode, Fraction, FractionError};
pub use crate::core::operand::{Operand, OperandKind};
