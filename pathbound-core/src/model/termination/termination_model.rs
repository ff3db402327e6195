use super::TerminationModelError;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// the termination model is evaluated at the top of each iteration of
/// the search loop. if it returns true, the coordinator stops advancing
/// and either reports the best label found so far or raises an error
/// built from the explain method.
#[derive(Debug, Deserialize)]
pub enum TerminationModel {
    /// terminates a query if the runtime exceeds some limit.
    /// only checks at some provided iteration frequency, since the computation is expensive.
    #[serde(rename = "query_runtime")]
    QueryRuntimeLimit { limit: Duration, frequency: u64 },
    /// terminates if the number of iterations exceeds (greater than) some limit
    /// iterations begin at 0, so we add 1 to the iteration to make this comparison
    #[serde(rename = "iterations")]
    IterationsLimit { limit: u64 },
    #[serde(rename = "combined")]
    Combined { models: Vec<TerminationModel> },
}

impl TerminationModel {
    /// a model that never terminates the search on its own; frontier
    /// exhaustion remains the only stop condition
    pub fn unbounded() -> TerminationModel {
        TerminationModel::Combined { models: vec![] }
    }

    /// how frequently runtime limits re-read the clock, in iterations
    pub const DEFAULT_FREQUENCY: u64 = 64;

    /// predicate to test whether a query should terminate based on
    /// caller-level configurations
    pub fn terminate_search(
        &self,
        start_time: &Instant,
        iteration: u64,
    ) -> Result<bool, TerminationModelError> {
        use TerminationModel as T;
        match self {
            T::QueryRuntimeLimit { limit, frequency } => {
                if iteration % frequency == 0 {
                    let dur = Instant::now().duration_since(*start_time);
                    Ok(dur > *limit)
                } else {
                    Ok(false)
                }
            }
            T::IterationsLimit { limit } => Ok(iteration + 1 > *limit),
            T::Combined { models } => models.iter().try_fold(false, |acc, m| {
                m.terminate_search(start_time, iteration).map(|r| acc || r)
            }),
        }
    }

    /// true when some runtime-limit member of this model caused the
    /// termination, which maps to the time-limit error taxon
    pub fn is_runtime_limited(&self, start_time: &Instant) -> bool {
        use TerminationModel as T;
        match self {
            T::QueryRuntimeLimit { limit, .. } => {
                Instant::now().duration_since(*start_time) > *limit
            }
            T::IterationsLimit { .. } => false,
            T::Combined { models } => models.iter().any(|m| m.is_runtime_limited(start_time)),
        }
    }

    /// this method will return a string explaining why a model terminated.
    /// if the conditions do not merit termination, then the result will be None.
    pub fn explain_termination(&self, start_time: &Instant, iterations: u64) -> Option<String> {
        use TerminationModel as T;
        let caused_termination = self
            .terminate_search(start_time, iterations)
            .unwrap_or(false);
        match self {
            T::Combined { models } => {
                let combined_explanations: String = models
                    .iter()
                    .filter_map(|m| m.explain_termination(start_time, iterations))
                    .collect::<Vec<_>>()
                    .join(", ");
                if combined_explanations.is_empty() {
                    None
                } else {
                    Some(combined_explanations)
                }
            }
            T::QueryRuntimeLimit { limit, .. } => {
                if caused_termination {
                    Some(format!(
                        "exceeded runtime limit of {}",
                        format_limit(limit)
                    ))
                } else {
                    None
                }
            }
            T::IterationsLimit { limit } => {
                if caused_termination {
                    Some(format!("exceeded iteration limit of {}", limit))
                } else {
                    None
                }
            }
        }
    }
}

/// runtime limits are configured in seconds, so they are reported the
/// same way
fn format_limit(limit: &Duration) -> String {
    format!("{:.3}s", limit.as_secs_f64())
}
