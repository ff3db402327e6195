#[derive(thiserror::Error, Debug, Clone)]
pub enum ResourceModelError {
    #[error("failure building resource model: {0}")]
    BuildError(String),
    #[error("resource extension produced a vector of length {found}, expected {expected}")]
    WrongArity { expected: usize, found: usize },
    #[error("{0}")]
    ResourceModelFailure(String),
}
