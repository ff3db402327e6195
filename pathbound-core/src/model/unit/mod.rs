mod cost;
mod resource_value;

pub use cost::Cost;
pub use resource_value::ResourceValue;
