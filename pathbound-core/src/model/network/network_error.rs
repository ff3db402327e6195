use crate::model::network::{EdgeId, VertexId};

#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("edge attribute not found for edge {0}")]
    EdgeNotFound(EdgeId),
    #[error("vertex attribute not found for vertex {0}")]
    VertexNotFound(VertexId),
    #[error("graph does not contain required vertex '{0}'")]
    MissingEndpoint(String),
    #[error("edge ({src})-[{edge_id}]->({dst}) has {found} resource entries, expected {expected}")]
    ResourceArity {
        edge_id: EdgeId,
        src: String,
        dst: String,
        expected: usize,
        found: usize,
    },
    #[error("error with provided dataset: {0}")]
    DatasetError(String),
    #[error("failure reading graph data from file: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure decoding graph data from JSON: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("{0}")]
    InternalError(String),
}
