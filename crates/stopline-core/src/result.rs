//! Output of the estimator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{CRITICAL_DISTANCE_M, EXTREME_DISTANCE_M};
use crate::enums::{Factor, SnowCertification, StopSeverity};

/// Named multipliers behind one estimate, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorBreakdown(BTreeMap<Factor, f64>);

impl FactorBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, factor: Factor, value: f64) {
        self.0.insert(factor, value);
    }

    pub fn get(&self, factor: Factor) -> Option<f64> {
        self.0.get(&factor).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.0.iter().map(|(factor, value)| (*factor, *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Product of every friction multiplier present.
    pub fn friction_product(&self) -> f64 {
        self.iter()
            .filter(|(factor, _)| factor.is_friction_multiplier())
            .map(|(_, value)| value)
            .product()
    }
}

/// One closed-form braking estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrakingResult {
    /// Surface friction before any multiplier.
    pub base_friction: f64,
    /// Friction after every multiplier.
    pub effective_friction: f64,
    /// `g(mu cos + sin)` on the slope (m/s²). Zero or negative cannot stop.
    pub deceleration_mps2: f64,
    /// Constant deceleration that covers `distance_m` from the request speed,
    /// after wind, trailer and terrain corrections (m/s²).
    pub effective_deceleration_mps2: f64,
    /// Stopping distance (m). Infinite when the vehicle cannot stop.
    #[serde(with = "infinite_as_null")]
    pub distance_m: f64,
    pub can_stop: bool,
    pub factors: FactorBreakdown,
    pub snow_certification: SnowCertification,
}

impl BrakingResult {
    pub fn severity(&self) -> StopSeverity {
        StopSeverity::from_distance(self.distance_m)
    }
}

impl StopSeverity {
    /// Classify a stopping distance. Non-finite means no stop.
    pub fn from_distance(distance_m: f64) -> Self {
        if !distance_m.is_finite() {
            Self::CannotStop
        } else if distance_m > CRITICAL_DISTANCE_M {
            Self::Critical
        } else if distance_m > EXTREME_DISTANCE_M {
            Self::Extreme
        } else {
            Self::Normal
        }
    }
}

/// Infinite distances go over the wire as `null`.
pub mod infinite_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_some(value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<f64> = Deserialize::deserialize(deserializer)?;
        Ok(value.unwrap_or(f64::INFINITY))
    }
}
