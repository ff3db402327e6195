use std::sync::Arc;
use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::halfway::HalfwayPoint;
use super::join::join_halves;
use super::search::Search;
use crate::algorithm::search::{
    Direction, SearchError, SearchInstance, SearchOrientation, SearchSolution, SelectionMethod,
};
use crate::model::label::Label;
use crate::model::resource::mirror_backward;
use crate::model::unit::Cost;

/// run the bidirectional labeling algorithm with dynamic half-way point
/// as a single cooperative loop, alternating between the two
/// directional searches by the configured selection method.
pub fn run_search(si: &SearchInstance) -> Result<SearchSolution, SearchError> {
    let start_time = Instant::now();
    let halfway = Arc::new(HalfwayPoint::new(&si.bounds));
    let mut fwd = Search::new(si, Direction::Forward, halfway.clone());
    let mut bwd = Search::new(si, Direction::Backward, halfway);
    let mut rng = build_rng(si.config.seed);
    let threshold = si.config.threshold.map(Cost::new);
    let mut iterations: u64 = 0;

    loop {
        let direction = match choose_direction(si, &fwd, &bwd, &mut rng) {
            Some(direction) => direction,
            None => break,
        };
        if si
            .termination_model
            .terminate_search(&start_time, iterations)?
        {
            if terminal_final(si, &fwd, &bwd).is_some() {
                break;
            }
            if si.termination_model.is_runtime_limited(&start_time) {
                return Err(SearchError::TimeLimitExceeded);
            }
            let explanation = si
                .termination_model
                .explain_termination(&start_time, iterations)
                .unwrap_or_else(|| String::from("unknown"));
            return Err(SearchError::QueryTerminated(explanation));
        }
        if let Some(t) = threshold {
            if terminal_final(si, &fwd, &bwd)
                .map(|label| label.weight <= t)
                .unwrap_or(false)
            {
                break;
            }
        }
        match direction {
            Direction::Forward => fwd.step()?,
            Direction::Backward => bwd.step()?,
        }
        iterations += 1;
    }
    log::debug!(
        "search iterations: {}, labels generated: {} forward / {} backward",
        iterations,
        fwd.generated_count(),
        bwd.generated_count()
    );

    finalize(si, &fwd, &bwd, iterations)
}

/// run the two directional searches on independent worker threads. each
/// owns its label structures exclusively; only the half-way words are
/// shared, and the join phase runs single-threaded after both workers
/// return.
pub fn run_search_parallel(si: &SearchInstance) -> Result<SearchSolution, SearchError> {
    let start_time = Instant::now();
    let halfway = Arc::new(HalfwayPoint::new(&si.bounds));
    let mut fwd = Search::new(si, Direction::Forward, halfway.clone());
    let mut bwd = Search::new(si, Direction::Backward, halfway);
    let threshold = si.config.threshold.map(Cost::new);
    let run_fwd = matches!(
        si.config.direction,
        SearchOrientation::Both | SearchOrientation::Forward
    );
    let run_bwd = matches!(
        si.config.direction,
        SearchOrientation::Both | SearchOrientation::Backward
    );
    let fwd_termination = si.termination_model.clone();
    let bwd_termination = si.termination_model.clone();

    let (fwd_result, bwd_result) = rayon::join(
        move || {
            if run_fwd {
                fwd.run(&start_time, &fwd_termination, threshold)?;
            }
            Ok::<Search, SearchError>(fwd)
        },
        move || {
            if run_bwd {
                bwd.run(&start_time, &bwd_termination, threshold)?;
            }
            Ok::<Search, SearchError>(bwd)
        },
    );
    let fwd = fwd_result?;
    let bwd = bwd_result?;

    if si.termination_model.is_runtime_limited(&start_time)
        && terminal_final(si, &fwd, &bwd).is_none()
    {
        return Err(SearchError::TimeLimitExceeded);
    }
    let iterations = fwd.processed_count() + bwd.processed_count();
    finalize(si, &fwd, &bwd, iterations)
}

fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// direction selection: when only one side has a live current label,
/// advance that side; when both do, break the tie by the configured
/// method. None means neither side can move.
fn choose_direction(
    si: &SearchInstance,
    fwd: &Search,
    bwd: &Search,
    rng: &mut StdRng,
) -> Option<Direction> {
    match si.config.direction {
        SearchOrientation::Forward => fwd.has_current().then_some(Direction::Forward),
        SearchOrientation::Backward => bwd.has_current().then_some(Direction::Backward),
        SearchOrientation::Both => match (fwd.has_current(), bwd.has_current()) {
            (false, false) => None,
            (true, false) => Some(Direction::Forward),
            (false, true) => Some(Direction::Backward),
            (true, true) => {
                let direction = match si.config.method {
                    SelectionMethod::Random => {
                        if rng.random_bool(0.5) {
                            Direction::Forward
                        } else {
                            Direction::Backward
                        }
                    }
                    SelectionMethod::Generated => {
                        if fwd.generated_count() < bwd.generated_count() {
                            Direction::Forward
                        } else {
                            Direction::Backward
                        }
                    }
                    SelectionMethod::Processed => {
                        if fwd.processed_count() < bwd.processed_count() {
                            Direction::Forward
                        } else {
                            Direction::Backward
                        }
                    }
                    SelectionMethod::Unprocessed => {
                        if fwd.unprocessed_count() < bwd.unprocessed_count() {
                            Direction::Forward
                        } else {
                            Direction::Backward
                        }
                    }
                };
                Some(direction)
            }
        },
    }
}

/// the best Source to Sink label registered by a directional search
/// alone, normalized to forward orientation: backward paths are
/// reversed and their monotone resource mirrored about its upper bound.
fn terminal_final(si: &SearchInstance, fwd: &Search, bwd: &Search) -> Option<Label> {
    let forward_candidate = || {
        fwd.final_label()
            .filter(|label| fwd.is_terminal(label))
            .cloned()
    };
    let backward_candidate = || {
        bwd.final_label()
            .filter(|label| bwd.is_terminal(label))
            .map(|label| {
                let mut normalized = label.clone();
                normalized.path.reverse();
                normalized.resources = mirror_backward(&normalized.resources, &si.bounds);
                normalized
            })
    };
    let candidate = match si.config.direction {
        SearchOrientation::Forward => forward_candidate(),
        SearchOrientation::Backward => backward_candidate(),
        SearchOrientation::Both => forward_candidate().or_else(backward_candidate),
    };
    candidate.filter(|label| label.feasible(&si.bounds))
}

/// select the overall answer: the fused label from the join procedure
/// when both halves explored, otherwise the surviving side's final
/// label; when both exist the lower-weight label wins.
fn finalize(
    si: &SearchInstance,
    fwd: &Search,
    bwd: &Search,
    iterations: u64,
) -> Result<SearchSolution, SearchError> {
    let joined = if fwd.best_ids().len() > 1 && bwd.best_ids().len() > 1 {
        join_halves(si, fwd, bwd)?
    } else {
        None
    };
    let fallback = terminal_final(si, fwd, bwd);
    let best = match (joined, fallback) {
        (Some(joined), Some(fallback)) => {
            if fallback.weight < joined.weight {
                Some(fallback)
            } else {
                Some(joined)
            }
        }
        (Some(joined), None) => Some(joined),
        (None, Some(fallback)) => Some(fallback),
        (None, None) => None,
    };
    match best {
        Some(label) => to_solution(si, label, iterations),
        None => Err(SearchError::NoFeasiblePath),
    }
}

fn to_solution(
    si: &SearchInstance,
    label: Label,
    iterations: u64,
) -> Result<SearchSolution, SearchError> {
    let path = label
        .path
        .iter()
        .map(|vertex_id| si.graph.vertex_name(vertex_id).map(String::from))
        .collect::<Result<Vec<String>, _>>()?;
    Ok(SearchSolution {
        path,
        total_cost: label.weight,
        resources: label.resources,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::search::SearchConfig;
    use crate::model::resource::ResourceBounds;
    use crate::testing;

    fn instance(method: SelectionMethod) -> SearchInstance {
        let graph = testing::graph_from_arcs(
            2,
            &[
                ("Source", "A", -1.0, &[1.0, 2.0]),
                ("A", "B", -1.0, &[1.0, 0.3]),
                ("B", "C", -10.0, &[1.0, 3.0]),
                ("B", "Sink", 10.0, &[1.0, 2.0]),
                ("C", "Sink", -1.0, &[1.0, 10.0]),
            ],
        );
        SearchInstance::new(
            std::sync::Arc::new(graph),
            ResourceBounds::new(&[4.0, 20.0], &[0.0, 0.0]),
            SearchConfig {
                method,
                ..Default::default()
            },
            None,
        )
        .unwrap()
    }

    /// the counter-guided methods must never advance the side that is
    /// ahead of the other at selection time
    #[test]
    fn test_counter_methods_choose_the_lagging_side() {
        for method in [
            SelectionMethod::Generated,
            SelectionMethod::Processed,
            SelectionMethod::Unprocessed,
        ] {
            let si = instance(method);
            let halfway = Arc::new(HalfwayPoint::new(&si.bounds));
            let mut fwd = Search::new(&si, Direction::Forward, halfway.clone());
            let mut bwd = Search::new(&si, Direction::Backward, halfway);
            let mut rng = build_rng(Some(0));
            while fwd.has_current() || bwd.has_current() {
                let direction = match choose_direction(&si, &fwd, &bwd, &mut rng) {
                    Some(direction) => direction,
                    None => break,
                };
                if fwd.has_current() && bwd.has_current() {
                    let (fwd_count, bwd_count) = match method {
                        SelectionMethod::Generated => {
                            (fwd.generated_count(), bwd.generated_count())
                        }
                        SelectionMethod::Processed => {
                            (fwd.processed_count(), bwd.processed_count())
                        }
                        SelectionMethod::Unprocessed => (
                            fwd.unprocessed_count() as u64,
                            bwd.unprocessed_count() as u64,
                        ),
                        SelectionMethod::Random => unreachable!(),
                    };
                    match direction {
                        Direction::Forward => assert!(fwd_count <= bwd_count),
                        Direction::Backward => assert!(bwd_count <= fwd_count),
                    }
                }
                match direction {
                    Direction::Forward => fwd.step().unwrap(),
                    Direction::Backward => bwd.step().unwrap(),
                }
            }
        }
    }
}
