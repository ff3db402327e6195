use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::model::network::{Edge, VertexId};

/// orientation of one half of the labeling search. forward labels grow
/// from the Source along outgoing arcs; backward labels grow from the
/// Sink along incoming arcs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// the vertex a label lands on after traversing `edge` in this
    /// direction: the head when forward, the tail when backward
    pub fn terminal_vertex_id(&self, edge: &Edge) -> VertexId {
        match self {
            Direction::Forward => edge.dst_vertex_id,
            Direction::Backward => edge.src_vertex_id,
        }
    }

    pub fn flip(&self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}
