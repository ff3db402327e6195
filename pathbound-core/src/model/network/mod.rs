mod edge;
mod edge_id;
mod graph;
mod graph_config;
mod network_error;
mod vertex;
mod vertex_id;

pub use edge::Edge;
pub use edge_id::EdgeId;
pub use graph::{DenseAdjacencyList, Graph};
pub use graph_config::{EdgeConfig, GraphConfig};
pub use network_error::NetworkError;
pub use vertex::Vertex;
pub use vertex_id::VertexId;
