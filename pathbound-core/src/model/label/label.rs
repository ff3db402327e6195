use std::fmt::Display;

use fixedbitset::FixedBitSet;

use super::LabelError;
use crate::algorithm::search::Direction;
use crate::model::network::{Edge, Vertex, VertexId};
use crate::model::resource::{ResourceBounds, ResourceModel};
use crate::model::unit::{Cost, ResourceValue};

/// state of a partial path: accumulated weight, current endpoint,
/// cumulative resources, and the ordered sequence of visited vertices.
/// conceptually immutable; every extension produces a new label.
///
/// forward labels grow from the Source; backward labels grow from the
/// Sink and store their path in reverse (Sink first).
#[derive(Clone, Debug)]
pub struct Label {
    pub weight: Cost,
    pub vertex_id: VertexId,
    pub resources: Vec<ResourceValue>,
    pub path: Vec<VertexId>,
    /// packed membership view of `path`, present only in elementary
    /// mode where subset queries drive destructive dominance.
    visited: Option<FixedBitSet>,
}

impl Label {
    /// the initial label of a directional search, positioned at the
    /// Source (forward) or Sink (backward) with the given starting
    /// resource vector.
    pub fn origin(
        vertex_id: VertexId,
        resources: Vec<ResourceValue>,
        n_vertices: usize,
        elementary: bool,
    ) -> Label {
        let visited = elementary.then(|| {
            let mut bits = FixedBitSet::with_capacity(n_vertices);
            bits.insert(vertex_id.0);
            bits
        });
        Label {
            weight: Cost::ZERO,
            vertex_id,
            resources,
            path: vec![vertex_id],
            visited,
        }
    }

    /// a Source-to-Sink label produced by the join procedure
    pub fn merged(
        weight: Cost,
        vertex_id: VertexId,
        resources: Vec<ResourceValue>,
        path: Vec<VertexId>,
    ) -> Label {
        Label {
            weight,
            vertex_id,
            resources,
            path,
            visited: None,
        }
    }

    /// value of the monotone resource (index 0)
    pub fn monotone(&self) -> ResourceValue {
        self.resources[0]
    }

    /// Produces the label reached by traversing `edge` from this label's
    /// endpoint. The new endpoint is the arc's head (forward) or tail
    /// (backward) and the resource vector is updated by the resource
    /// model for the matching direction.
    ///
    /// # Returns
    ///
    /// `None` when the extension revisits a vertex in elementary mode or
    /// makes no progress (a zero-cost, zero-consumption self transition);
    /// otherwise the extended label.
    pub fn extend(
        &self,
        src: &Vertex,
        edge: &Edge,
        dst: &Vertex,
        direction: &Direction,
        resource_model: &dyn ResourceModel,
    ) -> Result<Option<Label>, LabelError> {
        let next_vertex = direction.terminal_vertex_id(edge);
        if let Some(visited) = &self.visited {
            if visited.contains(next_vertex.0) {
                return Ok(None);
            }
        }
        let resources = match direction {
            Direction::Forward => resource_model.extend_forward(src, edge, dst, &self.resources)?,
            Direction::Backward => {
                resource_model.extend_backward(src, edge, dst, &self.resources)?
            }
        };
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(next_vertex);
        let visited = self.visited.as_ref().map(|bits| {
            let mut next_bits = bits.clone();
            next_bits.insert(next_vertex.0);
            next_bits
        });
        let next = Label {
            weight: self.weight + edge.cost,
            vertex_id: next_vertex,
            resources,
            path,
            visited,
        };
        if next.same_state(self) {
            return Ok(None);
        }
        Ok(Some(next))
    }

    /// true iff the cumulative resources lie within the given bounds
    pub fn feasible(&self, bounds: &ResourceBounds) -> bool {
        bounds.contains(&self.resources)
    }

    /// two labels represent the same search state when they agree on
    /// weight, endpoint, and resources, regardless of the path taken
    pub fn same_state(&self, other: &Label) -> bool {
        self.weight == other.weight
            && self.vertex_id == other.vertex_id
            && self.resources == other.resources
    }

    /// Componentwise dominance at a shared vertex.
    ///
    /// Forward: `self` dominates `other` iff its weight and every
    /// resource are no worse and at least one comparison is strict.
    /// Backward: identical with the resource comparisons reversed.
    /// In elementary mode the comparison is only permitted when `self`'s
    /// visited set is a subset of `other`'s; otherwise neither label can
    /// stand in for the other's extensions and the result is false.
    ///
    /// # Returns
    ///
    /// An error when the labels sit at different vertices; the caller
    /// must pick a path-end comparison strategy instead (see
    /// [`Label::full_dominance`] usage in the search).
    pub fn dominates(&self, other: &Label, direction: &Direction) -> Result<bool, LabelError> {
        if self.vertex_id != other.vertex_id {
            return Err(LabelError::NotComparable(self.vertex_id, other.vertex_id));
        }
        if let (Some(mine), Some(theirs)) = (&self.visited, &other.visited) {
            if !mine.is_subset(theirs) {
                return Ok(false);
            }
        }
        let (no_worse, strictly_better) = match direction {
            Direction::Forward => (
                res_all_le(&self.resources, &other.resources),
                res_any_lt(&self.resources, &other.resources),
            ),
            Direction::Backward => (
                res_all_le(&other.resources, &self.resources),
                res_any_lt(&other.resources, &self.resources),
            ),
        };
        let result = (self.weight < other.weight && no_worse)
            || (self.weight <= other.weight && no_worse && strictly_better);
        Ok(result)
    }

    /// Total preference order used when electing a single best label.
    /// Falls back to the flipped direction and then to a strict weight
    /// comparison when the pair is mutually non-dominated.
    pub fn full_dominance(&self, other: &Label, direction: &Direction) -> Result<bool, LabelError> {
        if self.dominates(other, direction)? {
            return Ok(true);
        }
        if !other.dominates(self, direction)? {
            if self.dominates(other, &direction.flip())? {
                return Ok(true);
            }
            if self.weight < other.weight {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// true iff every vertex visited by `self` is also visited by
    /// `other`. decides whether a dominated label and all of its pending
    /// extensions can be destroyed in elementary mode.
    pub fn is_path_subset(&self, other: &Label) -> bool {
        match (&self.visited, &other.visited) {
            (Some(mine), Some(theirs)) => mine.is_subset(theirs),
            _ => false,
        }
    }

    /// true iff the two labels share no vertex, the elementary-mode
    /// admissibility condition for joining half-paths
    pub fn is_path_disjoint(&self, other: &Label) -> bool {
        match (&self.visited, &other.visited) {
            (Some(mine), Some(theirs)) => mine.is_disjoint(theirs),
            _ => false,
        }
    }
}

fn res_all_le(a: &[ResourceValue], b: &[ResourceValue]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x <= y)
}

fn res_any_lt(a: &[ResourceValue], b: &[ResourceValue]) -> bool {
    a.iter().zip(b.iter()).any(|(x, y)| x < y)
}

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let res: Vec<f64> = self.resources.iter().map(|r| r.as_f64()).collect();
        write!(f, "Label({},{},{:?})", self.weight, self.vertex_id, res)
    }
}
