use crate::model::network::{EdgeId, VertexId};
use crate::model::unit::{Cost, ResourceValue};
use serde::{Deserialize, Serialize};

/// represents a single arc in a Graph, carrying a scalar cost and a
/// resource consumption vector whose length matches the graph's
/// resource count.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Edge {
    pub edge_id: EdgeId,
    pub src_vertex_id: VertexId,
    pub dst_vertex_id: VertexId,
    pub cost: Cost,
    pub res_cost: Vec<ResourceValue>,
}

impl Edge {
    pub fn new(
        edge_id: usize,
        src_vertex_id: usize,
        dst_vertex_id: usize,
        cost: f64,
        res_cost: &[f64],
    ) -> Self {
        Self {
            edge_id: EdgeId(edge_id),
            src_vertex_id: VertexId(src_vertex_id),
            dst_vertex_id: VertexId(dst_vertex_id),
            cost: Cost::new(cost),
            res_cost: res_cost.iter().map(|r| ResourceValue(*r)).collect(),
        }
    }
}
