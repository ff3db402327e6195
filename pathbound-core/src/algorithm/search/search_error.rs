use crate::model::{
    label::LabelError, network::NetworkError, resource::ResourceModelError,
    termination::TerminationModelError,
};

#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("the search failed due to a road network error: {source}")]
    NetworkFailure {
        #[from]
        source: NetworkError,
    },
    #[error("the supplied resource extension functions are inconsistent: {source}")]
    InvalidResourceModel {
        #[from]
        source: ResourceModelError,
    },
    #[error("the search failed due to a label error: {source}")]
    LabelFailure {
        #[from]
        source: LabelError,
    },
    #[error("the search failed due to a termination model error: {source}")]
    TerminationModelFailure {
        #[from]
        source: TerminationModelError,
    },
    #[error("no resource feasible path exists between Source and Sink")]
    NoFeasiblePath,
    #[error("time limit reached before a feasible path was registered")]
    TimeLimitExceeded,
    #[error("query terminated due to {0}")]
    QueryTerminated(String),
    #[error("internal error due to search logic: {0}")]
    InternalError(String),
}
