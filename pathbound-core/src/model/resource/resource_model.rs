use super::{ResourceBounds, ResourceModelError};
use crate::model::network::{Edge, Vertex};
use crate::model::unit::ResourceValue;

/// Dictates how the resource vector of a partial path is updated when
/// an arc is traversed in either direction, and how the two halves of a
/// bidirectional search are combined at a bridge arc.
///
/// See the [`super::default`] module for the implementation bundled with
/// the solver:
///   - [AdditiveResourceModel]: componentwise accumulation of each arc's
///     resource cost, the classical resource extension function.
///
/// Custom implementations must be deterministic and keep resource 0
/// non-decreasing along forward extensions (non-increasing backward);
/// when that contract is violated the search still terminates and
/// returns a feasible path if one exists, but optimality is no longer
/// guaranteed.
///
/// [AdditiveResourceModel]: super::default::AdditiveResourceModel
pub trait ResourceModel: Send + Sync {
    /// Updates cumulative resources across an arc traversed away from
    /// the Source.
    ///
    /// # Arguments
    ///
    /// * `src` - tail vertex of the arc
    /// * `edge` - arc being traversed
    /// * `dst` - head vertex of the arc
    /// * `resources` - cumulative resources before the traversal
    ///
    /// # Returns
    ///
    /// The updated resource vector, or an error.
    fn extend_forward(
        &self,
        src: &Vertex,
        edge: &Edge,
        dst: &Vertex,
        resources: &[ResourceValue],
    ) -> Result<Vec<ResourceValue>, ResourceModelError>;

    /// Updates cumulative resources across an arc traversed toward the
    /// Source. Resource 0 starts at its upper bound and decreases; all
    /// other components accumulate equivalently in either direction.
    fn extend_backward(
        &self,
        src: &Vertex,
        edge: &Edge,
        dst: &Vertex,
        resources: &[ResourceValue],
    ) -> Result<Vec<ResourceValue>, ResourceModelError>;

    /// Combines a forward half-path and a backward half-path across the
    /// bridge arc `(src)-[edge]->(dst)`.
    ///
    /// This default implementation extends the forward half across the
    /// bridge arc and then adds the backward half after mirroring its
    /// resource 0 about the upper bound. Implementations with coupled or
    /// resetting resources should override it.
    ///
    /// # Arguments
    ///
    /// * `src` - tail vertex of the bridge arc (end of the forward half)
    /// * `edge` - the bridge arc
    /// * `dst` - head vertex of the bridge arc (end of the backward half)
    /// * `fwd_resources` - cumulative resources of the forward half
    /// * `bwd_resources` - cumulative resources of the backward half
    /// * `bounds` - the global resource bounds
    ///
    /// # Returns
    ///
    /// The resource vector of the fused Source to Sink path, or an error.
    fn join(
        &self,
        src: &Vertex,
        edge: &Edge,
        dst: &Vertex,
        fwd_resources: &[ResourceValue],
        bwd_resources: &[ResourceValue],
        bounds: &ResourceBounds,
    ) -> Result<Vec<ResourceValue>, ResourceModelError> {
        let extended = self.extend_forward(src, edge, dst, fwd_resources)?;
        let mirrored = mirror_backward(bwd_resources, bounds);
        if extended.len() != mirrored.len() {
            return Err(ResourceModelError::WrongArity {
                expected: mirrored.len(),
                found: extended.len(),
            });
        }
        Ok(extended
            .iter()
            .zip(mirrored.iter())
            .map(|(a, b)| *a + *b)
            .collect())
    }
}

/// Mirrors a backward resource vector so it reads as cumulative
/// consumption: resource 0 is reflected about its upper bound and all
/// other components are kept as accumulated.
pub fn mirror_backward(resources: &[ResourceValue], bounds: &ResourceBounds) -> Vec<ResourceValue> {
    let mut mirrored = resources.to_vec();
    if let Some(first) = mirrored.first_mut() {
        *first = bounds.monotone_upper() - *first;
    }
    mirrored
}
