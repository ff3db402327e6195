use crate::model::network::VertexId;
use crate::model::resource::ResourceModelError;

#[derive(thiserror::Error, Debug)]
pub enum LabelError {
    #[error("labels at vertices {0} and {1} are not comparable")]
    NotComparable(VertexId, VertexId),
    #[error("failure extending label: {source}")]
    ResourceFailure {
        #[from]
        source: ResourceModelError,
    },
}
