//! graph-building helpers shared by unit and scenario tests.

use crate::model::network::{EdgeConfig, Graph, GraphConfig};

/// build a graph from `(tail, head, cost, res_cost)` arcs with the
/// conventional "Source" and "Sink" endpoint names
pub fn graph_from_arcs(n_res: usize, arcs: &[(&str, &str, f64, &[f64])]) -> Graph {
    let config = GraphConfig {
        n_res,
        source: String::from("Source"),
        sink: String::from("Sink"),
        edges: arcs
            .iter()
            .map(|(src, dst, cost, res_cost)| EdgeConfig {
                src: String::from(*src),
                dst: String::from(*dst),
                cost: *cost,
                res_cost: res_cost.to_vec(),
            })
            .collect(),
    };
    Graph::try_from(&config).expect("failure building test graph")
}
