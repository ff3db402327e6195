use derive_more::{Add, Neg, Sub, Sum};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// one component of a resource consumption vector. resource values are
/// plain accumulators and, unlike [`super::Cost`], only require a partial
/// order for componentwise dominance comparisons.
#[derive(
    Copy, Clone, PartialEq, PartialOrd, Add, Sub, Sum, Neg, Debug, Deserialize, Serialize,
)]
pub struct ResourceValue(pub f64);

impl ResourceValue {
    pub const ZERO: ResourceValue = ResourceValue(0.0);

    pub fn as_f64(&self) -> f64 {
        self.0
    }
}

impl Display for ResourceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for ResourceValue {
    fn from(val: f64) -> Self {
        ResourceValue(val)
    }
}

impl From<ResourceValue> for f64 {
    fn from(val: ResourceValue) -> Self {
        val.0
    }
}
