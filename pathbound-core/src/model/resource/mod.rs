pub mod default;
mod resource_bounds;
mod resource_model;
mod resource_model_error;

pub use resource_bounds::ResourceBounds;
pub use resource_model::{mirror_backward, ResourceModel};
pub use resource_model_error::ResourceModelError;
