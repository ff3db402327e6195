use serde::{Deserialize, Serialize};

/// which halves of the search are allowed to advance. when not `Both`,
/// the algorithm degenerates to a monodirectional labeling search and
/// the surviving side's final label is the answer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrientation {
    #[default]
    Both,
    Forward,
    Backward,
}

/// tiebreak rule used to pick the next direction to advance when both
/// halves have a live current label
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    /// uniform pick, reproducible via the seed option
    #[default]
    Random,
    /// side with fewer generated labels so far
    Generated,
    /// side with fewer processed labels so far
    Processed,
    /// side with fewer labels awaiting processing
    Unprocessed,
}

/// caller-facing solver options. deserializes from a JSON query with
/// every field optional.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub direction: SearchOrientation,
    pub method: SelectionMethod,
    /// enforce cycle-free paths
    pub elementary: bool,
    /// wall-clock cap in seconds
    pub time_limit: Option<f64>,
    /// stop early once a feasible Source to Sink path with weight at or
    /// under this value has been registered
    pub threshold: Option<f64>,
    /// seeds the direction RNG for the `random` selection method
    pub seed: Option<u64>,
    /// enable static reachability pruning before the search
    pub preprocess: bool,
    /// tolerance of the half-way compatibility test used by the join
    /// procedure. the literature offers no justification for a
    /// particular value; 2.0 matches the reference implementations.
    pub halfway_slack: f64,
}

impl SearchConfig {
    pub const DEFAULT_HALFWAY_SLACK: f64 = 2.0;
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            direction: SearchOrientation::default(),
            method: SelectionMethod::default(),
            elementary: false,
            time_limit: None,
            threshold: None,
            seed: None,
            preprocess: false,
            halfway_slack: SearchConfig::DEFAULT_HALFWAY_SLACK,
        }
    }
}
