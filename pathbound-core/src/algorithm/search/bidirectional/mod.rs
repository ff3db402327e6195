mod bidirectional_algorithm;
mod halfway;
mod join;
mod search;

pub use bidirectional_algorithm::{run_search, run_search_parallel};
pub use halfway::HalfwayPoint;
pub use search::Search;

#[cfg(test)]
mod bidirectional_tests;
