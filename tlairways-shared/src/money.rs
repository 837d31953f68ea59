use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

const MINOR_PER_MAJOR: i64 = 100;

/// A money amount held in minor units (paise for INR).
///
/// Inputs and outputs are in major units: `499.5` decodes to 49950 minor
/// units and serializes back as `499.5`; whole amounts serialize as integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    minor: i64,
}

impl Amount {
    pub const ZERO: Amount = Amount { minor: 0 };

    pub const fn from_minor(minor: i64) -> Self {
        Self { minor }
    }

    pub const fn from_major(major: i64) -> Self {
        Self { minor: major.saturating_mul(MINOR_PER_MAJOR) }
    }

    /// Rounds to the nearest minor unit; `None` for NaN and infinities.
    pub fn from_major_f64(major: f64) -> Option<Self> {
        // `as` saturates at the i64 bounds
        major
            .is_finite()
            .then(|| Self { minor: (major * MINOR_PER_MAJOR as f64).round() as i64 })
    }

    /// Integers, floats and numeric text such as `"1,250.50"`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Self::from_major)
                .or_else(|| n.as_f64().and_then(Self::from_major_f64)),
            Value::String(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                cleaned.parse::<f64>().ok().and_then(Self::from_major_f64)
            }
            _ => None,
        }
    }

    pub fn is_negative(self) -> bool {
        self.minor < 0
    }

    pub fn non_negative(self) -> Self {
        Self { minor: self.minor.max(0) }
    }

    pub fn saturating_add(self, other: Amount) -> Self {
        Self { minor: self.minor.saturating_add(other.minor) }
    }

    pub fn saturating_mul(self, quantity: u32) -> Self {
        Self { minor: self.minor.saturating_mul(i64::from(quantity)) }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor < 0 { "-" } else { "" };
        let abs = self.minor.unsigned_abs();
        let per = MINOR_PER_MAJOR as u64;
        write!(f, "{}{}.{:02}", sign, abs / per, abs % per)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.minor % MINOR_PER_MAJOR == 0 {
            serializer.serialize_i64(self.minor / MINOR_PER_MAJOR)
        } else {
            serializer.serialize_f64(self.minor as f64 / MINOR_PER_MAJOR as f64)
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", value)))
    }
}
