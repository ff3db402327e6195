use std::ops::Index;

use super::{Label, LabelId};

struct LabelEntry {
    label: Label,
    seen: bool,
}

/// append-only storage for every label a directional search creates.
/// ids are stable for the lifetime of the search, so the unprocessed
/// and best-label structures hold plain indices.
#[derive(Default)]
pub struct LabelArena {
    entries: Vec<LabelEntry>,
}

impl LabelArena {
    pub fn new() -> LabelArena {
        LabelArena { entries: vec![] }
    }

    pub fn alloc(&mut self, label: Label) -> LabelId {
        let id = LabelId(self.entries.len());
        self.entries.push(LabelEntry { label, seen: false });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// a label is seen once it has been expanded as the current label;
    /// seen labels are skipped by the global selection tiers
    pub fn mark_seen(&mut self, id: LabelId) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.seen = true;
        }
    }

    pub fn is_seen(&self, id: LabelId) -> bool {
        self.entries.get(id.0).map(|e| e.seen).unwrap_or(false)
    }
}

impl Index<LabelId> for LabelArena {
    type Output = Label;

    fn index(&self, id: LabelId) -> &Label {
        &self.entries[id.0].label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::network::VertexId;
    use crate::model::unit::ResourceValue;

    #[test]
    fn test_alloc_and_seen_marks() {
        let mut arena = LabelArena::new();
        let id = arena.alloc(Label::origin(
            VertexId(0),
            vec![ResourceValue::ZERO],
            4,
            false,
        ));
        assert_eq!(arena.len(), 1);
        assert!(!arena.is_seen(id));
        arena.mark_seen(id);
        assert!(arena.is_seen(id));
        assert_eq!(arena[id].vertex_id, VertexId(0));
    }
}
