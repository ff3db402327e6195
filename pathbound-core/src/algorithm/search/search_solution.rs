use std::fmt::Display;

use serde::Serialize;

use crate::model::unit::{Cost, ResourceValue};

/// the answer to a query: a minimum-cost resource-feasible path from
/// Source to Sink, its total cost, and the resources it consumed.
#[derive(Clone, Debug, Serialize)]
pub struct SearchSolution {
    /// visited vertex names in order, Source first
    pub path: Vec<String>,
    pub total_cost: Cost,
    pub resources: Vec<ResourceValue>,
    /// number of serial loop iterations the coordinator performed
    pub iterations: u64,
}

impl Display for SearchSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let res: Vec<f64> = self.resources.iter().map(|r| r.as_f64()).collect();
        write!(
            f,
            "path {} cost:{} resources:{:?}",
            self.path.join(" -> "),
            self.total_cost,
            res
        )
    }
}
