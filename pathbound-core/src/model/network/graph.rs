use std::collections::VecDeque;

use indexmap::IndexMap;

use super::{Edge, EdgeId, GraphConfig, NetworkError, Vertex, VertexId};
use crate::algorithm::search::Direction;

/// Directed multigraph topology represented as a pair of dense
/// adjacency lists. The `EdgeId` and `VertexId` values correspond to
/// edge and vertex indices in the `edges` and `vertices` slices.
///
/// # Arguments
///
/// * `vertices` - for each `VertexId`, the corresponding `Vertex` record
/// * `edges` - for each `EdgeId`, the corresponding `Edge` record
/// * `adj` - the forward-oriented adjacency list
/// * `rev` - the reverse-oriented adjacency list
/// * `source_id` - the distinguished origin vertex
/// * `sink_id` - the distinguished destination vertex
/// * `n_res` - length of every edge's resource vector
///
/// # Performance
///
/// Operations on a single entity are _O(1)_. Methods returning
/// collections prefer chained iterators over the adjacency rows.
#[derive(Clone, Debug)]
pub struct Graph {
    pub vertices: Box<[Vertex]>,
    pub edges: Box<[Edge]>,
    pub adj: DenseAdjacencyList,
    pub rev: DenseAdjacencyList,
    pub source_id: VertexId,
    pub sink_id: VertexId,
    pub n_res: usize,
}

/// a graph adjacency list with an entry (possibly empty) for each VertexId in the Graph.
pub type DenseAdjacencyList = Box<[Vec<EdgeId>]>;

impl TryFrom<&GraphConfig> for Graph {
    type Error = NetworkError;

    /// build the adjacency structure from an edge-list configuration,
    /// interning vertex names in first-appearance order so that ids are
    /// deterministic for a given input.
    fn try_from(config: &GraphConfig) -> Result<Self, Self::Error> {
        if config.n_res == 0 {
            return Err(NetworkError::DatasetError(String::from(
                "number of resources must be at least 1",
            )));
        }
        if config.edges.is_empty() {
            return Err(NetworkError::DatasetError(String::from(
                "graph has no edges",
            )));
        }

        let mut names: IndexMap<String, VertexId> = IndexMap::new();
        fn intern(name: &str, names: &mut IndexMap<String, VertexId>) -> VertexId {
            match names.get(name) {
                Some(id) => *id,
                None => {
                    let id = VertexId(names.len());
                    names.insert(String::from(name), id);
                    id
                }
            }
        }

        let mut edges: Vec<Edge> = Vec::with_capacity(config.edges.len());
        for (idx, row) in config.edges.iter().enumerate() {
            let edge_id = EdgeId(idx);
            if row.res_cost.len() != config.n_res {
                return Err(NetworkError::ResourceArity {
                    edge_id,
                    src: row.src.clone(),
                    dst: row.dst.clone(),
                    expected: config.n_res,
                    found: row.res_cost.len(),
                });
            }
            let src = intern(&row.src, &mut names);
            let dst = intern(&row.dst, &mut names);
            edges.push(Edge::new(idx, src.0, dst.0, row.cost, &row.res_cost));
        }

        let source_id = *names
            .get(&config.source)
            .ok_or_else(|| NetworkError::MissingEndpoint(config.source.clone()))?;
        let sink_id = *names
            .get(&config.sink)
            .ok_or_else(|| NetworkError::MissingEndpoint(config.sink.clone()))?;

        let vertices: Vec<Vertex> = names
            .iter()
            .map(|(name, id)| Vertex::new(id.0, name))
            .collect();

        let mut adj: Vec<Vec<EdgeId>> = vec![vec![]; vertices.len()];
        let mut rev: Vec<Vec<EdgeId>> = vec![vec![]; vertices.len()];
        for edge in edges.iter() {
            adj[edge.src_vertex_id.0].push(edge.edge_id);
            rev[edge.dst_vertex_id.0].push(edge.edge_id);
        }

        Ok(Graph {
            vertices: vertices.into_boxed_slice(),
            edges: edges.into_boxed_slice(),
            adj: adj.into_boxed_slice(),
            rev: rev.into_boxed_slice(),
            source_id,
            sink_id,
            n_res: config.n_res,
        })
    }
}

impl Graph {
    /// number of edges in the Graph
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// number of vertices in the Graph
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// retrieve an `Edge` record from the graph
    ///
    /// # Arguments
    ///
    /// * `edge_id` - the `EdgeId` for the `Edge` that we want to retrieve
    ///
    /// # Returns
    ///
    /// The associated `Edge` or an error if the id is missing
    pub fn get_edge(&self, edge_id: &EdgeId) -> Result<&Edge, NetworkError> {
        match self.edges.get(edge_id.0) {
            None => Err(NetworkError::EdgeNotFound(*edge_id)),
            Some(edge) => Ok(edge),
        }
    }

    /// retrieve a `Vertex` record from the graph
    ///
    /// # Arguments
    ///
    /// * `vertex_id` - the `VertexId` for the `Vertex` that we want to retrieve
    ///
    /// # Returns
    ///
    /// The associated `Vertex` or an error if the id is missing
    pub fn get_vertex(&self, vertex_id: &VertexId) -> Result<&Vertex, NetworkError> {
        match self.vertices.get(vertex_id.0) {
            None => Err(NetworkError::VertexNotFound(*vertex_id)),
            Some(vertex) => Ok(vertex),
        }
    }

    /// the interned name of a vertex
    pub fn vertex_name(&self, vertex_id: &VertexId) -> Result<&str, NetworkError> {
        self.get_vertex(vertex_id).map(|v| v.name.as_str())
    }

    /// lookup a vertex id by its caller-assigned name. linear in the
    /// number of vertices; intended for construction and test code, not
    /// the search hot path.
    pub fn vertex_id_of(&self, name: &str) -> Option<VertexId> {
        self.vertices
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.vertex_id)
    }

    pub fn out_edges_iter<'a>(
        &'a self,
        src: &VertexId,
    ) -> Box<dyn Iterator<Item = &'a EdgeId> + 'a> {
        match self.adj.get(src.0) {
            Some(out_list) => Box::new(out_list.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    pub fn in_edges_iter<'a>(
        &'a self,
        dst: &VertexId,
    ) -> Box<dyn Iterator<Item = &'a EdgeId> + 'a> {
        match self.rev.get(dst.0) {
            Some(in_list) => Box::new(in_list.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// helper function to give incident edges to a vertex based on a
    /// traversal direction.
    ///
    /// # Arguments
    ///
    /// * `vertex_id` - vertex to find edges which connect to it
    /// * `direction` - whether to find out edges (Forward) or in edges (Backward)
    pub fn incident_edges_iter<'a>(
        &'a self,
        vertex_id: &VertexId,
        direction: &Direction,
    ) -> Box<dyn Iterator<Item = &'a EdgeId> + 'a> {
        match direction {
            Direction::Forward => self.out_edges_iter(vertex_id),
            Direction::Backward => self.in_edges_iter(vertex_id),
        }
    }

    /// retrieve the triplet of `Vertex` -> `Edge` -> `Vertex` for some `EdgeId`
    ///
    /// # Arguments
    ///
    /// * `edge_id` - the id of the edge to collect attributes for
    ///
    /// # Returns
    ///
    /// The triplet of attributes surrounding one `Edge` or an error if
    /// any id is invalid.
    pub fn edge_triplet(&self, edge_id: &EdgeId) -> Result<(&Vertex, &Edge, &Vertex), NetworkError> {
        let edge = self.get_edge(edge_id)?;
        let src = self.get_vertex(&edge.src_vertex_id)?;
        let dst = self.get_vertex(&edge.dst_vertex_id)?;
        Ok((src, edge, dst))
    }

    /// all arcs from `src` to `dst`. the graph is a multigraph, so the
    /// join procedure must consider every parallel bridge arc.
    pub fn edges_between<'a>(
        &'a self,
        src: &VertexId,
        dst: VertexId,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.out_edges_iter(src)
            .filter_map(|edge_id| self.edges.get(edge_id.0))
            .filter(move |edge| edge.dst_vertex_id == dst)
    }

    /// breadth-first reachability along forward adjacency, used to
    /// validate that a Source to Sink path exists before searching.
    pub fn reachable(&self, from: VertexId, to: VertexId) -> bool {
        if from == to {
            return true;
        }
        let mut visited = vec![false; self.n_vertices()];
        let mut queue: VecDeque<VertexId> = VecDeque::from([from]);
        visited[from.0] = true;
        while let Some(vertex_id) = queue.pop_front() {
            for edge_id in self.out_edges_iter(&vertex_id) {
                if let Some(edge) = self.edges.get(edge_id.0) {
                    let next = edge.dst_vertex_id;
                    if next == to {
                        return true;
                    }
                    if !visited[next.0] {
                        visited[next.0] = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        false
    }
}
