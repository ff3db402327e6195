mod prune;

pub use prune::prune_graph;
