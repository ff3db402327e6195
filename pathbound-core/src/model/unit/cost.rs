use derive_more::{Add, Neg, Sum};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Represents the accumulated weight of a partial path.
/// A cost does not carry any units; it is whatever the caller assigned
/// to the arcs of the graph, and may be negative.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Add, Sum, Neg, Serialize, Deserialize,
)]
pub struct Cost(OrderedFloat<f64>);

impl Cost {
    /// represents zero cost, unit of addition operation
    pub const ZERO: Cost = Cost(OrderedFloat(0.0));

    /// represents the maximum possible cost
    pub const INFINITY: Cost = Cost(OrderedFloat(f64::MAX));

    /// helper to construct a Cost from an f64
    pub fn new(value: f64) -> Cost {
        Cost(OrderedFloat(value))
    }

    pub fn as_f64(&self) -> f64 {
        self.0 .0
    }
}

impl From<f64> for Cost {
    fn from(f: f64) -> Self {
        Cost(OrderedFloat(f))
    }
}

impl From<Cost> for f64 {
    fn from(val: Cost) -> Self {
        val.0.into_inner()
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
