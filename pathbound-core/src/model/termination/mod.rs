mod termination_model;
mod termination_model_error;

pub use termination_model::TerminationModel;
pub use termination_model_error::TerminationModelError;
