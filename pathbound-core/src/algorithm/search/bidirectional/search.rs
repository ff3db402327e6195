use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use itertools::Itertools;

use super::halfway::HalfwayPoint;
use crate::algorithm::search::{Direction, SearchError, SearchInstance};
use crate::model::label::{Label, LabelArena, LabelError, LabelId};
use crate::model::network::{EdgeId, Graph};
use crate::model::resource::{ResourceBounds, ResourceModel};
use crate::model::termination::TerminationModel;
use crate::model::unit::{Cost, ResourceValue};

/// one half of the bidirectional labeling algorithm. owns every label
/// it creates (in an arena), the two-level unprocessed structure, the
/// bag of non-dominated labels per vertex, and the bookkeeping that the
/// coordinator's direction-selection methods read.
pub struct Search {
    direction: Direction,
    elementary: bool,
    graph: Arc<Graph>,
    resource_model: Arc<dyn ResourceModel>,
    /// the caller's input bounds, used for final-label and destroy checks
    bounds: ResourceBounds,
    /// lower bounds applied to partial paths (see ResourceBounds::relaxed_min_res)
    prefix_min_res: Vec<ResourceValue>,
    halfway: Arc<HalfwayPoint>,
    arena: LabelArena,
    current: Option<LabelId>,
    /// parent label -> its children awaiting processing. insertion
    /// order is load-bearing: selection tiers scan it in order.
    unprocessed: IndexMap<LabelId, Vec<LabelId>>,
    best: Vec<LabelId>,
    final_label: Option<LabelId>,
    generated_count: u64,
    processed_count: u64,
    unprocessed_count: usize,
}

impl Search {
    pub fn new(si: &SearchInstance, direction: Direction, halfway: Arc<HalfwayPoint>) -> Search {
        let n_vertices = si.graph.n_vertices();
        let n_res = si.bounds.n_res();
        let origin = match direction {
            Direction::Forward => Label::origin(
                si.graph.source_id,
                vec![ResourceValue::ZERO; n_res],
                n_vertices,
                si.config.elementary,
            ),
            Direction::Backward => {
                let mut resources = vec![ResourceValue::ZERO; n_res];
                resources[0] = si.bounds.monotone_upper();
                Label::origin(
                    si.graph.sink_id,
                    resources,
                    n_vertices,
                    si.config.elementary,
                )
            }
        };
        let mut arena = LabelArena::new();
        let origin_id = arena.alloc(origin);
        Search {
            direction,
            elementary: si.config.elementary,
            graph: si.graph.clone(),
            resource_model: si.resource_model.clone(),
            bounds: si.bounds.clone(),
            prefix_min_res: si.bounds.relaxed_min_res(),
            halfway,
            arena,
            current: Some(origin_id),
            unprocessed: IndexMap::new(),
            best: vec![origin_id],
            final_label: None,
            generated_count: 0,
            processed_count: 0,
            unprocessed_count: 0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    pub fn label(&self, id: LabelId) -> &Label {
        &self.arena[id]
    }

    pub fn best_ids(&self) -> &[LabelId] {
        &self.best
    }

    pub fn final_label(&self) -> Option<&Label> {
        self.final_label.map(|id| &self.arena[id])
    }

    pub fn generated_count(&self) -> u64 {
        self.generated_count
    }

    pub fn processed_count(&self) -> u64 {
        self.processed_count
    }

    pub fn unprocessed_count(&self) -> usize {
        self.unprocessed_count
    }

    /// true iff `label` completes a Source to Sink path when read in
    /// this search's direction
    pub fn is_terminal(&self, label: &Label) -> bool {
        match self.direction {
            Direction::Forward => label.vertex_id == self.graph.sink_id,
            Direction::Backward => label.vertex_id == self.graph.source_id,
        }
    }

    /// true when the registered final label is a Source to Sink path at
    /// or under the given weight
    pub fn final_meets_threshold(&self, threshold: Cost) -> bool {
        match self.final_label {
            Some(id) => {
                let label = &self.arena[id];
                self.is_terminal(label) && label.weight <= threshold
            }
            None => false,
        }
    }

    /// drive this half to exhaustion, used by the parallel scheduler.
    /// the termination model and threshold are checked cooperatively at
    /// the top of every step.
    pub fn run(
        &mut self,
        start_time: &Instant,
        termination_model: &TerminationModel,
        threshold: Option<Cost>,
    ) -> Result<(), SearchError> {
        let mut iteration: u64 = 0;
        while self.current.is_some() {
            if termination_model.terminate_search(start_time, iteration)? {
                log::debug!("{} search stopped by termination model", self.direction);
                break;
            }
            if let Some(t) = threshold {
                if self.final_meets_threshold(t) {
                    break;
                }
            }
            self.step()?;
            iteration += 1;
        }
        Ok(())
    }

    /// One iteration of the labeling algorithm:
    /// update the shared half-way point from the current label, extend
    /// it along every incident arc, retire it from the pending bags,
    /// select the next label by the min-weight discipline, and run the
    /// dominance checks at the new label's vertex.
    pub fn step(&mut self) -> Result<(), SearchError> {
        let current_id = match self.current {
            Some(id) => id,
            None => return Ok(()),
        };

        let monotone = self.arena[current_id].monotone().as_f64();
        match self.direction {
            Direction::Forward => self.halfway.raise_backward(monotone),
            Direction::Backward => self.halfway.lower_forward(monotone),
        }
        log::debug!(
            "{}: halfway window [{}, {}]",
            self.direction,
            self.halfway.backward_cutoff(),
            self.halfway.forward_cutoff()
        );

        if !self.unprocessed.contains_key(&current_id) {
            self.unprocessed.insert(current_id, vec![]);
        }

        let mut extensions: Vec<Label> = vec![];
        {
            let current = &self.arena[current_id];
            let vertex_id = current.vertex_id;
            let edge_ids: Vec<EdgeId> = self
                .graph
                .incident_edges_iter(&vertex_id, &self.direction)
                .copied()
                .collect_vec();
            for edge_id in edge_ids.iter() {
                let (src, edge, dst) = self.graph.edge_triplet(edge_id)?;
                let child = current
                    .extend(src, edge, dst, &self.direction, self.resource_model.as_ref())
                    .map_err(SearchError::from)?;
                if let Some(child) = child {
                    if self.extension_feasible(&child) {
                        extensions.push(child);
                    }
                }
            }
        }
        for child in extensions {
            let duplicate = match self.unprocessed.get(&current_id) {
                Some(bag) => bag.iter().any(|id| self.arena[*id].same_state(&child)),
                None => false,
            };
            if !duplicate {
                let child_id = self.arena.alloc(child);
                if let Some(bag) = self.unprocessed.get_mut(&current_id) {
                    bag.push(child_id);
                    self.generated_count += 1;
                    self.unprocessed_count += 1;
                }
            }
        }

        // the current label has been dispatched: retire it from any
        // pending bag, then drop parents with nothing left to process
        self.remove_from_bags(current_id);
        self.unprocessed.retain(|_, bag| !bag.is_empty());

        let next = self.next_label(current_id);
        self.arena.mark_seen(current_id);
        self.current = next;

        if let Some(next_id) = next {
            self.apply_dominance(next_id)?;
        }
        Ok(())
    }

    /// prefix feasibility of a candidate extension: the monotone
    /// resource must not cross the cutoff owned by the opposite
    /// direction (forward labels stay at or under `HF`, backward labels
    /// at or over `HB`) and every other component must lie inside the
    /// prefix bounds
    fn extension_feasible(&self, label: &Label) -> bool {
        let monotone = label.monotone().as_f64();
        let within_cutoff = match self.direction {
            Direction::Forward => monotone <= self.halfway.forward_cutoff(),
            Direction::Backward => monotone >= self.halfway.backward_cutoff(),
        };
        if !within_cutoff {
            return false;
        }
        label
            .resources
            .iter()
            .zip(self.bounds.max_res.iter())
            .skip(1)
            .all(|(r, max)| r <= max)
            && label
                .resources
                .iter()
                .zip(self.prefix_min_res.iter())
                .skip(1)
                .all(|(r, min)| r >= min)
    }

    /// Selection discipline: the minimum-weight label among
    /// (a) pending children of the current label, else
    /// (b) parents that have not been expanded, else
    /// (c) any remaining pending child across all parents.
    fn next_label(&mut self, current_id: LabelId) -> Option<LabelId> {
        self.processed_count += 1;
        if let Some(bag) = self.unprocessed.get(&current_id) {
            if !bag.is_empty() {
                return self.min_weight(bag.iter().copied());
            }
        }
        let unseen_parents = self
            .unprocessed
            .keys()
            .copied()
            .filter(|id| !self.arena.is_seen(*id))
            .collect_vec();
        if !unseen_parents.is_empty() {
            return self.min_weight(unseen_parents.into_iter());
        }
        let pending = self
            .unprocessed
            .values()
            .flatten()
            .copied()
            .filter(|id| !self.arena.is_seen(*id))
            .collect_vec();
        self.min_weight(pending.into_iter())
    }

    fn min_weight(&self, ids: impl Iterator<Item = LabelId>) -> Option<LabelId> {
        ids.min_by_key(|id| self.arena[*id].weight)
    }

    /// Dominance checks between a newly current label and every other
    /// label at its vertex. Dominated labels are unlinked; in
    /// elementary mode a removal is destructive (pending children are
    /// discarded too) only when the dominator's path is a subset of the
    /// dominated label's. An undominated label joins the best bag.
    fn apply_dominance(&mut self, subject: LabelId) -> Result<(), SearchError> {
        let subject_vertex = self.arena[subject].vertex_id;
        let others = self
            .unprocessed
            .keys()
            .copied()
            .chain(self.unprocessed.values().flatten().copied())
            .filter(|id| *id != subject && self.arena[*id].vertex_id == subject_vertex)
            .collect_vec();

        let mut to_remove: Vec<(LabelId, bool)> = vec![];
        let mut subject_dominated = false;
        let mut destroy_subject = false;
        for other in others {
            if self.arena[subject].dominates(&self.arena[other], &self.direction)? {
                let destroy = self.check_destroy(subject, other);
                to_remove.push((other, destroy));
            }
            if self.arena[other].dominates(&self.arena[subject], &self.direction)? {
                subject_dominated = true;
                if self.check_destroy(other, subject) {
                    destroy_subject = true;
                }
            }
        }
        if subject_dominated {
            to_remove.push((subject, destroy_subject));
        } else {
            self.save_current_best(subject)?;
        }
        self.remove_labels(&to_remove);
        Ok(())
    }

    /// whether a dominated label and all of its pending extensions can
    /// be discarded outright
    fn check_destroy(&self, dominator: LabelId, dominated: LabelId) -> bool {
        let dominated_label = &self.arena[dominated];
        if self.elementary {
            self.arena[dominator].is_path_subset(dominated_label)
                && dominated_label.feasible(&self.bounds)
        } else {
            dominated_label.feasible(&self.bounds)
        }
    }

    fn remove_labels(&mut self, to_remove: &[(LabelId, bool)]) {
        for (id, destroy) in to_remove {
            log::debug!("{}: removing dominated label {}", self.direction, id);
            if *destroy {
                if let Some(bag) = self.unprocessed.shift_remove(id) {
                    self.unprocessed_count -= bag.len();
                }
            }
            self.remove_from_bags(*id);
            if let Some(pos) = self.best.iter().position(|b| b == id) {
                self.best.remove(pos);
            }
        }
    }

    fn remove_from_bags(&mut self, id: LabelId) {
        for (_, bag) in self.unprocessed.iter_mut() {
            if let Some(pos) = bag.iter().position(|pending| *pending == id) {
                bag.remove(pos);
                self.unprocessed_count -= 1;
            }
        }
    }

    /// the undominated label joins the best bag. it becomes the final
    /// label when it is the first one registered, when it fully
    /// dominates the incumbent, or at the terminal boundary cases where
    /// the two are not comparable.
    fn save_current_best(&mut self, subject: LabelId) -> Result<(), SearchError> {
        self.best.push(subject);
        let final_id = match self.final_label {
            None => {
                self.final_label = Some(subject);
                log::debug!(
                    "{}: saved {} as initial final label",
                    self.direction,
                    self.arena[subject]
                );
                return Ok(());
            }
            Some(id) => id,
        };
        if !self.arena[subject].feasible(&self.bounds) {
            return Ok(());
        }
        let subject_label = &self.arena[subject];
        let final_label = &self.arena[final_id];
        match subject_label.full_dominance(final_label, &self.direction) {
            Ok(true) => {
                log::debug!("{}: saved {} as final label", self.direction, subject_label);
                self.final_label = Some(subject);
            }
            Ok(false) => {}
            Err(LabelError::NotComparable(_, _)) => {
                let replace = match self.direction {
                    Direction::Forward => {
                        subject_label.vertex_id == self.graph.sink_id
                            || final_label.vertex_id == self.graph.source_id
                    }
                    Direction::Backward => {
                        subject_label.vertex_id == self.graph.source_id
                            || final_label.vertex_id == self.graph.sink_id
                    }
                };
                if replace {
                    log::debug!("{}: saved {} as final label", self.direction, subject_label);
                    self.final_label = Some(subject);
                }
            }
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
