mod additive;

pub use additive::AdditiveResourceModel;
