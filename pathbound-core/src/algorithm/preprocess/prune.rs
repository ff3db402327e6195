use crate::algorithm::search::{Direction, SearchError};
use crate::model::network::{EdgeConfig, Graph, GraphConfig, VertexId};
use crate::model::resource::ResourceBounds;

/// Static reachability pruning: for each resource dimension, compute
/// the least possible consumption from Source to every vertex and from
/// every vertex to Sink. A vertex whose combined least consumption
/// exceeds the upper bound cannot lie on any feasible path and is
/// removed along with its arcs.
///
/// Only valid for the additive resource extension functions; callers
/// with custom models skip pruning.
///
/// # Returns
///
/// The pruned graph, or an `InvalidInput` error when Sink itself is
/// unreachable within some resource bound.
pub fn prune_graph(graph: &Graph, bounds: &ResourceBounds) -> Result<Graph, SearchError> {
    let n_vertices = graph.n_vertices();
    let mut removed = vec![false; n_vertices];
    for resource in 0..graph.n_res {
        let from_source = least_consumption(graph, resource, graph.source_id, &Direction::Forward);
        let to_sink = least_consumption(graph, resource, graph.sink_id, &Direction::Backward);
        let (from_source, to_sink) = match (from_source, to_sink) {
            (Some(s), Some(t)) => (s, t),
            _ => {
                log::warn!(
                    "skipping pruning for resource {}: negative-consumption cycle",
                    resource
                );
                continue;
            }
        };
        let max = bounds.max_res[resource].as_f64();
        if from_source[graph.sink_id.0] > max {
            return Err(SearchError::InvalidInput(format!(
                "Sink is not reachable within the bounds of resource {}",
                resource
            )));
        }
        for vertex in 0..n_vertices {
            if vertex == graph.source_id.0 || vertex == graph.sink_id.0 {
                continue;
            }
            if from_source[vertex] + to_sink[vertex] > max {
                removed[vertex] = true;
            }
        }
    }

    let n_removed = removed.iter().filter(|r| **r).count();
    if n_removed == 0 {
        return Ok(graph.clone());
    }
    log::info!("pruning removed {}/{} vertices", n_removed, n_vertices);

    let edges: Vec<EdgeConfig> = graph
        .edges
        .iter()
        .filter(|edge| !removed[edge.src_vertex_id.0] && !removed[edge.dst_vertex_id.0])
        .map(|edge| EdgeConfig {
            src: String::from(&graph.vertices[edge.src_vertex_id.0].name),
            dst: String::from(&graph.vertices[edge.dst_vertex_id.0].name),
            cost: edge.cost.as_f64(),
            res_cost: edge.res_cost.iter().map(|r| r.as_f64()).collect(),
        })
        .collect();
    let config = GraphConfig {
        n_res: graph.n_res,
        source: String::from(&graph.vertices[graph.source_id.0].name),
        sink: String::from(&graph.vertices[graph.sink_id.0].name),
        edges,
    };
    let pruned = Graph::try_from(&config)?;
    Ok(pruned)
}

/// Bellman-Ford over one resource dimension, oriented by `direction`.
/// Returns None when a negative-consumption cycle makes the least
/// consumption unbounded.
fn least_consumption(
    graph: &Graph,
    resource: usize,
    origin: VertexId,
    direction: &Direction,
) -> Option<Vec<f64>> {
    let n_vertices = graph.n_vertices();
    let mut dist = vec![f64::INFINITY; n_vertices];
    dist[origin.0] = 0.0;
    for _ in 1..n_vertices {
        let mut changed = false;
        for edge in graph.edges.iter() {
            let (tail, head) = match direction {
                Direction::Forward => (edge.src_vertex_id.0, edge.dst_vertex_id.0),
                Direction::Backward => (edge.dst_vertex_id.0, edge.src_vertex_id.0),
            };
            let consumption = edge.res_cost[resource].as_f64();
            if dist[tail].is_finite() && dist[tail] + consumption < dist[head] {
                dist[head] = dist[tail] + consumption;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    for edge in graph.edges.iter() {
        let (tail, head) = match direction {
            Direction::Forward => (edge.src_vertex_id.0, edge.dst_vertex_id.0),
            Direction::Backward => (edge.dst_vertex_id.0, edge.src_vertex_id.0),
        };
        let consumption = edge.res_cost[resource].as_f64();
        if dist[tail].is_finite() && dist[tail] + consumption < dist[head] {
            return None;
        }
    }
    Some(dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_prune_removes_unaffordable_detour() {
        let graph = testing::graph_from_arcs(
            2,
            &[
                ("Source", "A", 0.0, &[1.0, 1.0]),
                ("A", "Sink", 0.0, &[1.0, 1.0]),
                ("Source", "B", 0.0, &[10.0, 0.0]),
                ("B", "Sink", 0.0, &[10.0, 0.0]),
            ],
        );
        let bounds = ResourceBounds::new(&[4.0, 20.0], &[0.0, 0.0]);
        let pruned = prune_graph(&graph, &bounds).unwrap();
        assert!(pruned.vertex_id_of("A").is_some());
        assert!(pruned.vertex_id_of("B").is_none());
        assert_eq!(pruned.n_edges(), 2);
    }

    #[test]
    fn test_prune_keeps_reachable_graph_intact() {
        let graph = testing::graph_from_arcs(
            1,
            &[("Source", "A", 0.0, &[1.0]), ("A", "Sink", 0.0, &[1.0])],
        );
        let bounds = ResourceBounds::new(&[4.0], &[0.0]);
        let pruned = prune_graph(&graph, &bounds).unwrap();
        assert_eq!(pruned.n_vertices(), graph.n_vertices());
        assert_eq!(pruned.n_edges(), graph.n_edges());
    }

    #[test]
    fn test_prune_rejects_unreachable_sink() {
        let graph = testing::graph_from_arcs(
            1,
            &[("Source", "A", 0.0, &[50.0]), ("A", "Sink", 0.0, &[50.0])],
        );
        let bounds = ResourceBounds::new(&[5.0], &[0.0]);
        let result = prune_graph(&graph, &bounds);
        assert!(matches!(result, Err(SearchError::InvalidInput(_))));
    }
}
