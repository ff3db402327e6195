mod label;
mod label_arena;
mod label_error;
mod label_id;

pub use label::Label;
pub use label_arena::LabelArena;
pub use label_error::LabelError;
pub use label_id::LabelId;
