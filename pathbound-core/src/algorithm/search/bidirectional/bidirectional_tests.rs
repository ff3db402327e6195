use std::sync::Arc;

use approx::assert_relative_eq;

use super::{run_search, run_search_parallel};
use crate::algorithm::search::{
    SearchConfig, SearchError, SearchInstance, SearchOrientation, SearchSolution, SelectionMethod,
};
use crate::model::network::{Edge, Graph, Vertex};
use crate::model::resource::{ResourceBounds, ResourceModel, ResourceModelError};
use crate::model::unit::{Cost, ResourceValue};
use crate::testing;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn instance(
    graph: Graph,
    max_res: &[f64],
    min_res: &[f64],
    config: SearchConfig,
    resource_model: Option<Arc<dyn ResourceModel>>,
) -> SearchInstance {
    SearchInstance::new(
        Arc::new(graph),
        ResourceBounds::new(max_res, min_res),
        config,
        resource_model,
    )
    .unwrap()
}

fn assert_solution(solution: &SearchSolution, path: &[&str], cost: f64, resources: &[f64]) {
    let expected_path: Vec<String> = path.iter().map(|n| String::from(*n)).collect();
    assert_eq!(solution.path, expected_path);
    assert_eq!(solution.total_cost, Cost::new(cost));
    assert_eq!(solution.resources.len(), resources.len());
    for (found, expected) in solution.resources.iter().zip(resources.iter()) {
        assert_relative_eq!(found.as_f64(), *expected);
    }
}

/// the five-vertex diamond where the cheapest route takes the long way
/// around through a negative-cost arc
fn diamond() -> Graph {
    testing::graph_from_arcs(
        2,
        &[
            ("Source", "A", -1.0, &[1.0, 2.0]),
            ("A", "B", -1.0, &[1.0, 0.3]),
            ("B", "C", -10.0, &[1.0, 3.0]),
            ("B", "Sink", 10.0, &[1.0, 2.0]),
            ("C", "Sink", -1.0, &[1.0, 10.0]),
        ],
    )
}

fn diamond_instance(config: SearchConfig) -> SearchInstance {
    instance(diamond(), &[4.0, 20.0], &[0.0, 0.0], config, None)
}

/// a three-vertex negative cycle worth traversing once before exiting
fn cycle_graph() -> Graph {
    testing::graph_from_arcs(
        2,
        &[
            ("Source", "A", 0.0, &[1.0, 1.0]),
            ("A", "B", -10.0, &[1.0, 1.0]),
            ("B", "C", -10.0, &[1.0, 1.0]),
            ("C", "A", -10.0, &[1.0, 1.0]),
            ("A", "Sink", 0.0, &[1.0, 1.0]),
        ],
    )
}

#[test]
fn test_diamond_random_is_seed_independent() {
    init_logging();
    for seed in 0..25 {
        let si = diamond_instance(SearchConfig {
            seed: Some(seed),
            ..Default::default()
        });
        let solution = run_search(&si).unwrap();
        assert_solution(
            &solution,
            &["Source", "A", "B", "C", "Sink"],
            -13.0,
            &[4.0, 15.3],
        );
    }
}

#[test]
fn test_diamond_counter_methods() {
    for method in [
        SelectionMethod::Generated,
        SelectionMethod::Processed,
        SelectionMethod::Unprocessed,
    ] {
        let si = diamond_instance(SearchConfig {
            method,
            ..Default::default()
        });
        let solution = run_search(&si).unwrap();
        assert_solution(
            &solution,
            &["Source", "A", "B", "C", "Sink"],
            -13.0,
            &[4.0, 15.3],
        );
    }
}

#[test]
fn test_diamond_monodirectional() {
    for direction in [SearchOrientation::Forward, SearchOrientation::Backward] {
        let si = diamond_instance(SearchConfig {
            direction,
            ..Default::default()
        });
        let solution = run_search(&si).unwrap();
        assert_solution(
            &solution,
            &["Source", "A", "B", "C", "Sink"],
            -13.0,
            &[4.0, 15.3],
        );
    }
}

#[test]
fn test_join_symmetry_with_forward_only() {
    let bidirectional = run_search(&diamond_instance(SearchConfig {
        seed: Some(7),
        ..Default::default()
    }))
    .unwrap();
    let forward = run_search(&diamond_instance(SearchConfig {
        direction: SearchOrientation::Forward,
        ..Default::default()
    }))
    .unwrap();
    assert_eq!(bidirectional.total_cost, forward.total_cost);
    assert_eq!(bidirectional.path, forward.path);
}

#[test]
fn test_same_seed_is_deterministic() {
    let config = SearchConfig {
        seed: Some(96),
        ..Default::default()
    };
    let first = run_search(&diamond_instance(config.clone())).unwrap();
    let second = run_search(&diamond_instance(config)).unwrap();
    assert_eq!(first.path, second.path);
    assert_eq!(first.total_cost, second.total_cost);
    assert_eq!(first.resources, second.resources);
}

#[test]
fn test_diamond_within_time_limit() {
    let si = diamond_instance(SearchConfig {
        method: SelectionMethod::Unprocessed,
        time_limit: Some(10.0),
        ..Default::default()
    });
    let solution = run_search(&si).unwrap();
    assert_solution(
        &solution,
        &["Source", "A", "B", "C", "Sink"],
        -13.0,
        &[4.0, 15.3],
    );
}

#[test]
fn test_zero_time_limit_raises() {
    let si = diamond_instance(SearchConfig {
        time_limit: Some(0.0),
        ..Default::default()
    });
    let result = run_search(&si);
    assert!(matches!(result, Err(SearchError::TimeLimitExceeded)));
}

#[test]
fn test_threshold_stops_early_with_the_threshold_path() {
    let si = diamond_instance(SearchConfig {
        method: SelectionMethod::Unprocessed,
        threshold: Some(0.0),
        ..Default::default()
    });
    let solution = run_search(&si).unwrap();
    // the only Source-Sink path at or under the threshold is the optimum
    assert_solution(
        &solution,
        &["Source", "A", "B", "C", "Sink"],
        -13.0,
        &[4.0, 15.3],
    );
}

#[test]
fn test_diamond_parallel() {
    let si = diamond_instance(SearchConfig {
        seed: Some(96),
        ..Default::default()
    });
    let solution = run_search_parallel(&si).unwrap();
    assert_solution(
        &solution,
        &["Source", "A", "B", "C", "Sink"],
        -13.0,
        &[4.0, 15.3],
    );
}

#[test]
fn test_parallel_threshold() {
    let si = diamond_instance(SearchConfig {
        threshold: Some(0.0),
        ..Default::default()
    });
    let solution = run_search_parallel(&si).unwrap();
    assert_eq!(solution.total_cost, Cost::new(-13.0));
}

#[test]
fn test_parallel_zero_time_limit_raises() {
    let si = diamond_instance(SearchConfig {
        time_limit: Some(0.0),
        ..Default::default()
    });
    let result = run_search_parallel(&si);
    assert!(matches!(result, Err(SearchError::TimeLimitExceeded)));
}

#[test]
fn test_cycle_exploitation() {
    // with revisits allowed the negative cycle is worth one full lap
    for seed in [1, 42] {
        let si = instance(
            cycle_graph(),
            &[5.0, 5.0],
            &[0.0, 0.0],
            SearchConfig {
                seed: Some(seed),
                ..Default::default()
            },
            None,
        );
        let solution = run_search(&si).unwrap();
        assert_solution(
            &solution,
            &["Source", "A", "B", "C", "A", "Sink"],
            -30.0,
            &[5.0, 5.0],
        );
    }
}

#[test]
fn test_cycle_exploitation_monodirectional() {
    for direction in [SearchOrientation::Forward, SearchOrientation::Backward] {
        let si = instance(
            cycle_graph(),
            &[5.0, 5.0],
            &[0.0, 0.0],
            SearchConfig {
                direction,
                ..Default::default()
            },
            None,
        );
        let solution = run_search(&si).unwrap();
        assert_solution(
            &solution,
            &["Source", "A", "B", "C", "A", "Sink"],
            -30.0,
            &[5.0, 5.0],
        );
    }
}

#[test]
fn test_elementary_forbids_the_cycle() {
    let si = instance(
        cycle_graph(),
        &[5.0, 5.0],
        &[0.0, 0.0],
        SearchConfig {
            elementary: true,
            seed: Some(1),
            ..Default::default()
        },
        None,
    );
    let solution = run_search(&si).unwrap();
    assert_solution(&solution, &["Source", "A", "Sink"], 0.0, &[2.0, 2.0]);
}

#[test]
fn test_halfway_meets_in_the_middle() {
    let graph = || {
        testing::graph_from_arcs(
            2,
            &[
                ("Source", "1", 3.0, &[7.0, 13.0]),
                ("1", "0", 4.0, &[8.0, 10.0]),
                ("1", "6", 7.0, &[8.0, 3.0]),
                ("1", "Sink", 1.0, &[15.0, 12.0]),
                ("0", "Sink", 7.0, &[6.0, 3.0]),
                ("6", "Sink", 8.0, &[3.0, 8.0]),
            ],
        )
    };
    let configs = [
        SearchConfig {
            method: SelectionMethod::Unprocessed,
            ..Default::default()
        },
        SearchConfig {
            direction: SearchOrientation::Forward,
            ..Default::default()
        },
        SearchConfig {
            direction: SearchOrientation::Backward,
            ..Default::default()
        },
    ];
    for config in configs {
        let si = instance(graph(), &[20.0, 30.0], &[1.0, 0.0], config, None);
        let solution = run_search(&si).unwrap();
        assert_solution(&solution, &["Source", "1", "6", "Sink"], 18.0, &[18.0, 24.0]);
    }
}

/// mirrors a user-supplied extension with three coupled resources: a
/// unit hop counter, a component accumulating the square of each
/// non-Sink head id, and a component fed by the arc's second resource
/// entry
struct SquaredHeadModel;

impl SquaredHeadModel {
    fn head_square(dst: &Vertex) -> f64 {
        match dst.name.parse::<f64>() {
            Ok(id) => id * id,
            Err(_) => 0.0,
        }
    }
}

impl ResourceModel for SquaredHeadModel {
    fn extend_forward(
        &self,
        _src: &Vertex,
        edge: &Edge,
        dst: &Vertex,
        resources: &[ResourceValue],
    ) -> Result<Vec<ResourceValue>, ResourceModelError> {
        let mut next: Vec<ResourceValue> = resources.to_vec();
        next[0] = next[0] + ResourceValue(1.0);
        next[1] = next[1] + ResourceValue(Self::head_square(dst));
        next[2] = next[2] + edge.res_cost[1];
        Ok(next)
    }

    fn extend_backward(
        &self,
        _src: &Vertex,
        edge: &Edge,
        dst: &Vertex,
        resources: &[ResourceValue],
    ) -> Result<Vec<ResourceValue>, ResourceModelError> {
        let mut next: Vec<ResourceValue> = resources.to_vec();
        next[0] = next[0] - ResourceValue(1.0);
        next[1] = next[1] + ResourceValue(Self::head_square(dst));
        next[2] = next[2] + edge.res_cost[1];
        Ok(next)
    }

    fn join(
        &self,
        _src: &Vertex,
        _edge: &Edge,
        dst: &Vertex,
        fwd_resources: &[ResourceValue],
        bwd_resources: &[ResourceValue],
        _bounds: &ResourceBounds,
    ) -> Result<Vec<ResourceValue>, ResourceModelError> {
        Ok(vec![
            fwd_resources[0] + bwd_resources[0],
            fwd_resources[1] + bwd_resources[1] + ResourceValue(Self::head_square(dst)),
            fwd_resources[2] + bwd_resources[2],
        ])
    }
}

fn squared_head_graph() -> Graph {
    testing::graph_from_arcs(
        3,
        &[
            ("Source", "1", -1.0, &[0.0, 0.0, 0.0]),
            ("1", "2", -1.0, &[0.0, 0.0, 0.0]),
            ("2", "3", -10.0, &[0.0, 0.0, 0.0]),
            ("2", "4", -10.0, &[0.0, 1.0, 0.0]),
            ("3", "4", -10.0, &[0.0, 1.0, 0.0]),
            ("4", "Sink", -1.0, &[0.0, 0.0, 0.0]),
        ],
    )
}

#[test]
fn test_custom_resource_model_forward() {
    let si = instance(
        squared_head_graph(),
        &[5.0, 10e5, 1.0],
        &[0.0, 0.0, 0.0],
        SearchConfig {
            direction: SearchOrientation::Forward,
            ..Default::default()
        },
        Some(Arc::new(SquaredHeadModel)),
    );
    let solution = run_search(&si).unwrap();
    assert_solution(
        &solution,
        &["Source", "1", "2", "3", "4", "Sink"],
        -23.0,
        &[5.0, 30.0, 1.0],
    );
}

#[test]
fn test_custom_resource_model_bidirectional() {
    let si = instance(
        squared_head_graph(),
        &[5.0, 10e5, 1.0],
        &[0.0, 0.0, 0.0],
        SearchConfig {
            method: SelectionMethod::Unprocessed,
            ..Default::default()
        },
        Some(Arc::new(SquaredHeadModel)),
    );
    let solution = run_search(&si).unwrap();
    // the user join reports resources relative to its own split, so the
    // path and cost are the stable observables here
    assert_eq!(
        solution.path,
        vec!["Source", "1", "2", "3", "4", "Sink"]
    );
    assert_eq!(solution.total_cost, Cost::new(-23.0));
}

#[test]
fn test_infeasible_graph_is_reported() {
    let si = instance(
        testing::graph_from_arcs(
            1,
            &[("Source", "A", 1.0, &[100.0]), ("A", "Sink", 1.0, &[0.0])],
        ),
        &[5.0],
        &[0.0],
        SearchConfig::default(),
        None,
    );
    let result = run_search(&si);
    assert!(matches!(result, Err(SearchError::NoFeasiblePath)));
}

#[test]
fn test_preprocessing_preserves_the_answer() {
    let mut arcs: Vec<(&str, &str, f64, &[f64])> = vec![
        ("Source", "A", -1.0, &[1.0, 2.0]),
        ("A", "B", -1.0, &[1.0, 0.3]),
        ("B", "C", -10.0, &[1.0, 3.0]),
        ("B", "Sink", 10.0, &[1.0, 2.0]),
        ("C", "Sink", -1.0, &[1.0, 10.0]),
    ];
    // a detour no feasible path can afford
    arcs.push(("Source", "D", 0.0, &[10.0, 0.0]));
    arcs.push(("D", "Sink", 0.0, &[10.0, 0.0]));
    let graph = testing::graph_from_arcs(2, &arcs);
    let si = instance(
        graph,
        &[4.0, 20.0],
        &[0.0, 0.0],
        SearchConfig {
            preprocess: true,
            seed: Some(3),
            ..Default::default()
        },
        None,
    );
    assert!(si.graph.vertex_id_of("D").is_none());
    let solution = run_search(&si).unwrap();
    assert_solution(
        &solution,
        &["Source", "A", "B", "C", "Sink"],
        -13.0,
        &[4.0, 15.3],
    );
}
