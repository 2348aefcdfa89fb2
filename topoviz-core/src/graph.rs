// Directed topology graph assembled from route paths

use crate::model::{Route, RouteDocument};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

/// Sorted, serializable view of a built graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
}

/// Directed graph over node names.
///
/// Vertices are unique by name and edges are unique by (source, target);
/// inserting either a second time is a no-op.
#[derive(Debug, Clone, Default)]
pub struct TopologyGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl TopologyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_routes(document: &RouteDocument) -> Self {
        let mut graph = Self::new();
        for (key, route) in document.routes() {
            let added = graph.add_route(route);
            debug!("Route '{}' contributed {} new edges", key, added);
        }
        info!(
            "Built topology with {} nodes and {} edges from {} routes",
            graph.node_count(),
            graph.edge_count(),
            document.len()
        );
        graph
    }

    /// Add every hop of a route, returning how many edges were new
    pub fn add_route(&mut self, route: &Route) -> usize {
        // A lone hop still becomes a vertex
        if let [only] = route.path.as_slice() {
            self.insert_node(&only.name);
        }
        let mut added = 0;
        for (source, target) in route.hops() {
            if self.insert_edge(source, target) {
                added += 1;
            }
        }
        added
    }

    pub fn insert_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// Returns false when the edge was already present
    pub fn insert_edge(&mut self, source: &str, target: &str) -> bool {
        let src = self.insert_node(source);
        let dst = self.insert_node(target);
        if self.graph.contains_edge(src, dst) {
            return false;
        }
        self.graph.add_edge(src, dst, ());
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&src), Some(&dst)) => self.graph.contains_edge(src, dst),
            _ => false,
        }
    }

    /// Node names in insertion order
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
            )
        })
    }

    pub fn snapshot(&self) -> GraphSnapshot {
        let mut nodes: Vec<String> = self.node_names().map(str::to_string).collect();
        nodes.sort();
        let mut edges: Vec<(String, String)> = self
            .edges()
            .map(|(src, dst)| (src.to_string(), dst.to_string()))
            .collect();
        edges.sort();
        GraphSnapshot { nodes, edges }
    }

    pub fn inner(&self) -> &DiGraph<String, ()> {
        &self.graph
    }
}
