use num_bigint::BigInt;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::Fraction;

/// Wire form: both parts as decimal strings, so any size survives JSON.
#[derive(Serialize, Deserialize)]
struct FractionRepr {
    numerator: String,
    denominator: String,
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FractionRepr {
            numerator: self.numerator.to_string(),
            denominator: self.denominator.to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Fraction {
    /// Re-runs reduction, so unreduced input is normalized and a zero denominator rejected.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = FractionRepr::deserialize(deserializer)?;
        let numerator = repr.numerator.parse::<BigInt>().map_err(de::Error::custom)?;
        let denominator = repr.denominator.parse::<BigInt>().map_err(de::Error::custom)?;
        Fraction::new(numerator, denominator).map_err(de::Error::custom)
    }
}
