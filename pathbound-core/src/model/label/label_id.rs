use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// index of a label in its search's arena. labels reference their
/// relatives by arena index rather than by pointer, which keeps
/// destructive dominance removal an index operation.
#[derive(
    Copy, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default,
)]
pub struct LabelId(pub usize);

impl Display for LabelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
