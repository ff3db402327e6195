use std::sync::Arc;
use std::time::Duration;

use super::{SearchConfig, SearchError};
use crate::algorithm::preprocess;
use crate::model::network::Graph;
use crate::model::resource::{default::AdditiveResourceModel, ResourceBounds, ResourceModel};
use crate::model::termination::TerminationModel;

/// instances of read-only objects used for a search that have been
/// validated and prepared for a specific query.
pub struct SearchInstance {
    pub graph: Arc<Graph>,
    pub bounds: ResourceBounds,
    pub resource_model: Arc<dyn ResourceModel>,
    pub termination_model: Arc<TerminationModel>,
    pub config: SearchConfig,
}

impl SearchInstance {
    /// Validates the query inputs and assembles the models the search
    /// reads. When `resource_model` is None the additive default is
    /// used; custom models disable static pruning since the
    /// shortest-path reductions only hold for additive extensions.
    ///
    /// # Arguments
    ///
    /// * `graph` - the caller's graph
    /// * `bounds` - global resource bounds, arity matching the graph
    /// * `config` - solver options
    /// * `resource_model` - optional custom resource extension functions
    pub fn new(
        graph: Arc<Graph>,
        bounds: ResourceBounds,
        config: SearchConfig,
        resource_model: Option<Arc<dyn ResourceModel>>,
    ) -> Result<SearchInstance, SearchError> {
        if bounds.max_res.len() != bounds.min_res.len() {
            return Err(SearchError::InvalidInput(format!(
                "max_res and min_res must have equal length, found {} and {}",
                bounds.max_res.len(),
                bounds.min_res.len()
            )));
        }
        if bounds.n_res() != graph.n_res {
            return Err(SearchError::InvalidInput(format!(
                "resource bounds cover {} resources but the graph carries {}",
                bounds.n_res(),
                graph.n_res
            )));
        }
        if graph.source_id == graph.sink_id {
            return Err(SearchError::InvalidInput(String::from(
                "Source and Sink must be distinct vertices",
            )));
        }
        if !graph.reachable(graph.source_id, graph.sink_id) {
            return Err(SearchError::InvalidInput(String::from(
                "no path exists between Source and Sink",
            )));
        }

        let custom_model = resource_model.is_some();
        let graph = if config.preprocess && !custom_model {
            Arc::new(preprocess::prune_graph(&graph, &bounds)?)
        } else {
            if config.preprocess && custom_model {
                log::info!("skipping static pruning: custom resource model supplied");
            }
            graph
        };

        let resource_model =
            resource_model.unwrap_or_else(|| Arc::new(AdditiveResourceModel) as Arc<dyn ResourceModel>);

        let termination_model = match config.time_limit {
            Some(seconds) => TerminationModel::QueryRuntimeLimit {
                limit: Duration::from_secs_f64(seconds),
                frequency: TerminationModel::DEFAULT_FREQUENCY,
            },
            None => TerminationModel::unbounded(),
        };

        Ok(SearchInstance {
            graph,
            bounds,
            resource_model,
            termination_model: Arc::new(termination_model),
            config,
        })
    }
}
