//! [`MinorUnits`] represents a monetary amount as the API expects it on the wire.
//!
//! This module holds its type definition and the major-to-minor conversion.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A monetary amount in minor units (e.g. cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    /// Convert an amount in major units (e.g. euros) to minor units.
    ///
    /// Rounds half-up, so `0.125` becomes `13` and `-0.125` becomes `-12`.
    pub fn from_major(value: f64) -> Self {
        MinorUnits((value * 100.0 + 0.5).floor() as i64)
    }

    /// Like [`MinorUnits::from_major`], but `None` when the value is not
    /// finite or its minor-unit count does not fit in an `i64`.
    pub fn try_from_major(value: f64) -> Option<Self> {
        let minor = (value * 100.0 + 0.5).floor();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        (minor.is_finite() && minor >= i64::MIN as f64 && minor < i64::MAX as f64)
            .then(|| MinorUnits(minor as i64))
    }

    /// The amount in major units.
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl From<i64> for MinorUnits {
    fn from(value: i64) -> Self {
        MinorUnits(value)
    }
}

impl From<u32> for MinorUnits {
    fn from(value: u32) -> Self {
        MinorUnits(value as i64)
    }
}

impl Display for MinorUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for MinorUnits {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

/// The API is not consistent about amounts in responses: they arrive either
/// as JSON numbers or as numeric strings.
impl<'de> Deserialize<'de> for MinorUnits {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(MinorUnits(v)),
            Repr::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(MinorUnits)
                .map_err(serde::de::Error::custom),
        }
    }
}
