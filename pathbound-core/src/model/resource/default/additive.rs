use crate::model::network::{Edge, Vertex};
use crate::model::resource::{ResourceModel, ResourceModelError};
use crate::model::unit::ResourceValue;

/// the classical resource extension function: every component of the
/// arc's resource cost is accumulated. in the backward direction the
/// monotone resource is drawn down from its upper-bound start while the
/// remaining components still accumulate.
pub struct AdditiveResourceModel;

impl AdditiveResourceModel {
    fn check_arity(edge: &Edge, resources: &[ResourceValue]) -> Result<(), ResourceModelError> {
        if edge.res_cost.len() != resources.len() {
            return Err(ResourceModelError::WrongArity {
                expected: resources.len(),
                found: edge.res_cost.len(),
            });
        }
        Ok(())
    }
}

impl ResourceModel for AdditiveResourceModel {
    fn extend_forward(
        &self,
        _src: &Vertex,
        edge: &Edge,
        _dst: &Vertex,
        resources: &[ResourceValue],
    ) -> Result<Vec<ResourceValue>, ResourceModelError> {
        Self::check_arity(edge, resources)?;
        Ok(resources
            .iter()
            .zip(edge.res_cost.iter())
            .map(|(r, c)| *r + *c)
            .collect())
    }

    fn extend_backward(
        &self,
        _src: &Vertex,
        edge: &Edge,
        _dst: &Vertex,
        resources: &[ResourceValue],
    ) -> Result<Vec<ResourceValue>, ResourceModelError> {
        Self::check_arity(edge, resources)?;
        Ok(resources
            .iter()
            .zip(edge.res_cost.iter())
            .enumerate()
            .map(|(i, (r, c))| if i == 0 { *r - *c } else { *r + *c })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resource::{mirror_backward, ResourceBounds};

    fn fixture() -> (Vertex, Edge, Vertex) {
        let src = Vertex::new(0, "A");
        let dst = Vertex::new(1, "B");
        let edge = Edge::new(0, 0, 1, -1.0, &[1.0, 3.0]);
        (src, edge, dst)
    }

    #[test]
    fn test_forward_accumulates_all_components() {
        let (src, edge, dst) = fixture();
        let model = AdditiveResourceModel;
        let result = model
            .extend_forward(&src, &edge, &dst, &[ResourceValue(2.0), ResourceValue(0.5)])
            .unwrap();
        assert_eq!(result, vec![ResourceValue(3.0), ResourceValue(3.5)]);
    }

    #[test]
    fn test_backward_draws_down_monotone_resource() {
        let (src, edge, dst) = fixture();
        let model = AdditiveResourceModel;
        let result = model
            .extend_backward(&src, &edge, &dst, &[ResourceValue(4.0), ResourceValue(0.5)])
            .unwrap();
        assert_eq!(result, vec![ResourceValue(3.0), ResourceValue(3.5)]);
    }

    #[test]
    fn test_default_join_mirrors_monotone_resource() {
        let (src, edge, dst) = fixture();
        let model = AdditiveResourceModel;
        let bounds = ResourceBounds::new(&[4.0, 20.0], &[0.0, 0.0]);
        // forward half at A with [1,2], backward half at B with [3,10]:
        // the backward half consumed 4-3=1 of resource 0.
        let result = model
            .join(
                &src,
                &edge,
                &dst,
                &[ResourceValue(1.0), ResourceValue(2.0)],
                &[ResourceValue(3.0), ResourceValue(10.0)],
                &bounds,
            )
            .unwrap();
        assert_eq!(result, vec![ResourceValue(3.0), ResourceValue(15.0)]);
        let mirrored = mirror_backward(&[ResourceValue(3.0), ResourceValue(10.0)], &bounds);
        assert_eq!(mirrored, vec![ResourceValue(1.0), ResourceValue(10.0)]);
    }

    #[test]
    fn test_arity_mismatch_is_rejected() {
        let (src, edge, dst) = fixture();
        let model = AdditiveResourceModel;
        let result = model.extend_forward(&src, &edge, &dst, &[ResourceValue(0.0)]);
        assert!(matches!(
            result,
            Err(ResourceModelError::WrongArity { .. })
        ));
    }
}
