use std::fmt::Display;

use crate::model::network::VertexId;
use serde::{Deserialize, Serialize};

/// represents a vertex in a Graph. vertex names are opaque strings
/// chosen by the caller and interned to dense ids at graph build time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Vertex {
    pub vertex_id: VertexId,
    pub name: String,
}

impl Vertex {
    pub fn new(vertex_id: usize, name: &str) -> Self {
        Self {
            vertex_id: VertexId(vertex_id),
            name: String::from(name),
        }
    }
}

impl Display for Vertex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vertex {} ({})", self.vertex_id, self.name)
    }
}
