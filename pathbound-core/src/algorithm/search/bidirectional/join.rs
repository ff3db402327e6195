use super::search::Search;
use crate::algorithm::search::{Direction, SearchError, SearchInstance};
use crate::model::label::Label;
use crate::model::network::Edge;
use crate::model::resource::ResourceBounds;
use crate::model::unit::Cost;

/// The two-sided join: fuse each forward half-path with every admissible
/// backward half-path across a bridging arc and keep the best fused
/// Source to Sink label.
///
/// A backward label is admissible for a forward label when an arc
/// connects their endpoints, the two halves are vertex-disjoint in
/// elementary mode, and the pair sits close enough to the half-way
/// point (see [`halfway_compatible`]).
///
/// Returns early once a fused label meets the caller's threshold.
pub fn join_halves(
    si: &SearchInstance,
    fwd: &Search,
    bwd: &Search,
) -> Result<Option<Label>, SearchError> {
    log::debug!(
        "joining {} forward and {} backward labels",
        fwd.best_ids().len(),
        bwd.best_ids().len()
    );
    let threshold = si.config.threshold.map(Cost::new);
    let mut best: Option<Label> = None;
    for fwd_id in fwd.best_ids() {
        let fwd_label = fwd.label(*fwd_id);
        for bwd_id in bwd.best_ids() {
            let bwd_label = bwd.label(*bwd_id);
            if si.config.elementary && !fwd_label.is_path_disjoint(bwd_label) {
                continue;
            }
            if !halfway_compatible(fwd_label, bwd_label, &si.bounds, si.config.halfway_slack) {
                continue;
            }
            for bridge in si
                .graph
                .edges_between(&fwd_label.vertex_id, bwd_label.vertex_id)
            {
                let merged = merge_labels(si, fwd_label, bwd_label, bridge)?;
                if !merged.feasible(&si.bounds) {
                    continue;
                }
                let replace = match &best {
                    None => true,
                    Some(incumbent) => merged.full_dominance(incumbent, &Direction::Forward)?,
                };
                if replace {
                    log::debug!("saving merged label {} as best", merged);
                    best = Some(merged);
                }
                if let (Some(t), Some(incumbent)) = (threshold, best.as_ref()) {
                    if incumbent.weight <= t {
                        return Ok(best);
                    }
                }
            }
        }
    }
    Ok(best)
}

/// The half-way compatibility condition: with `phi` the distance between
/// the forward label's monotone resource and the mirrored monotone
/// resource of the backward label, admit the pair when `0 <= phi <=
/// slack`. The slack accommodates the discrete nature of the cut.
fn halfway_compatible(
    fwd_label: &Label,
    bwd_label: &Label,
    bounds: &ResourceBounds,
    slack: f64,
) -> bool {
    let mirrored = bounds.monotone_upper().as_f64() - bwd_label.monotone().as_f64();
    let phi = (fwd_label.monotone().as_f64() - mirrored).abs();
    (0.0..=slack).contains(&phi)
}

/// fuse one forward and one backward label across `bridge`, delegating
/// resource combination to the resource model's join
fn merge_labels(
    si: &SearchInstance,
    fwd_label: &Label,
    bwd_label: &Label,
    bridge: &Edge,
) -> Result<Label, SearchError> {
    let src = si.graph.get_vertex(&bridge.src_vertex_id)?;
    let dst = si.graph.get_vertex(&bridge.dst_vertex_id)?;
    let resources = si.resource_model.join(
        src,
        bridge,
        dst,
        &fwd_label.resources,
        &bwd_label.resources,
        &si.bounds,
    )?;
    let weight = fwd_label.weight + bridge.cost + bwd_label.weight;
    // the backward path is stored Sink first; reverse it onto the
    // forward half to read Source -> ... -> Sink
    let mut path = fwd_label.path.clone();
    path.extend(bwd_label.path.iter().rev().copied());
    Ok(Label::merged(weight, si.graph.sink_id, resources, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::unit::ResourceValue;

    #[test]
    fn test_halfway_compatibility_window() {
        let bounds = ResourceBounds::new(&[5.0, 5.0], &[0.0, 0.0]);
        let fwd = Label::merged(
            Cost::ZERO,
            crate::model::network::VertexId(1),
            vec![ResourceValue(3.0), ResourceValue(0.0)],
            vec![],
        );
        let near = Label::merged(
            Cost::ZERO,
            crate::model::network::VertexId(2),
            vec![ResourceValue(4.0), ResourceValue(0.0)],
            vec![],
        );
        let far = Label::merged(
            Cost::ZERO,
            crate::model::network::VertexId(2),
            vec![ResourceValue(5.0), ResourceValue(0.0)],
            vec![],
        );
        // mirrored monotone of `near` is 1.0: phi = 2.0, inside the slack
        assert!(halfway_compatible(&fwd, &near, &bounds, 2.0));
        // mirrored monotone of `far` is 0.0: phi = 3.0, outside
        assert!(!halfway_compatible(&fwd, &far, &bounds, 2.0));
        assert!(halfway_compatible(&fwd, &far, &bounds, 3.0));
    }
}
