use super::catalog::Catalog;
use super::reference::Reference;
use super::resource::ResourceId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Adjacency direction relative to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Edges whose source is the node
    Outbound,
    /// Edges whose target is the node
    Inbound,
}

/// Structural form of the graph for export and diffing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<ResourceId>,
    pub edges: Vec<Reference>,
}

/// DependencyGraph aggregate built once from a catalog and resolved references
///
/// Immutable after `build`. Both adjacency directions are precomputed as
/// lists of indices into `edges`, so neighbor lookups never rescan.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<ResourceId>,
    node_set: HashSet<ResourceId>,
    edges: Vec<Reference>,
    outbound: HashMap<ResourceId, Vec<usize>>,
    inbound: HashMap<ResourceId, Vec<usize>>,
    dropped_dangling: usize,
}

impl DependencyGraph {
    /// Builds the graph.
    ///
    /// Duplicate `(source, target, kind)` triples collapse to one. An edge
    /// with an endpoint outside the catalog is dropped and counted.
    pub fn build(catalog: &Catalog, references: impl IntoIterator<Item = Reference>) -> Self {
        let nodes: Vec<ResourceId> = catalog.ids().cloned().collect();
        let node_set: HashSet<ResourceId> = nodes.iter().cloned().collect();

        let mut dropped_dangling = 0;
        let mut unique = BTreeSet::new();
        for reference in references {
            if node_set.contains(reference.source().as_str())
                && node_set.contains(reference.target().as_str())
            {
                unique.insert(reference);
            } else {
                dropped_dangling += 1;
            }
        }
        let edges: Vec<Reference> = unique.into_iter().collect();

        let mut outbound: HashMap<ResourceId, Vec<usize>> = HashMap::new();
        let mut inbound: HashMap<ResourceId, Vec<usize>> = HashMap::new();
        for (index, edge) in edges.iter().enumerate() {
            outbound
                .entry(edge.source().clone())
                .or_default()
                .push(index);
            inbound.entry(edge.target().clone()).or_default().push(index);
        }

        if dropped_dangling > 0 {
            tracing::debug!(dropped_dangling, "dropped edges with unknown endpoints");
        }

        Self {
            nodes,
            node_set,
            edges,
            outbound,
            inbound,
            dropped_dangling,
        }
    }

    /// Edges touching `id` in the given direction, in edge order
    pub fn edges_from<'a>(
        &'a self,
        id: &str,
        direction: Direction,
    ) -> impl Iterator<Item = &'a Reference> + 'a {
        let adjacency = match direction {
            Direction::Outbound => &self.outbound,
            Direction::Inbound => &self.inbound,
        };
        adjacency
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&index| &self.edges[index])
    }

    /// One-hop neighbor ids of `id`, each listed once
    pub fn neighbors(&self, id: &str, direction: Direction) -> Vec<&ResourceId> {
        let mut seen = HashSet::new();
        self.edges_from(id, direction)
            .map(|edge| match direction {
                Direction::Outbound => edge.target(),
                Direction::Inbound => edge.source(),
            })
            .filter(|neighbor| seen.insert(neighbor.as_str()))
            .collect()
    }

    /// Edges directed from `source` to `target` (one per distinct kind)
    pub fn edges_between(&self, source: &str, target: &str) -> Vec<&Reference> {
        self.edges_from(source, Direction::Outbound)
            .filter(|edge| edge.target().as_str() == target)
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[ResourceId] {
        &self.nodes
    }

    /// All edges, sorted by `(source, target, kind)`
    pub fn edges(&self) -> &[Reference] {
        &self.edges
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_set.contains(id)
    }

    /// Number of edges dropped at build time because an endpoint was unknown
    pub fn dropped_dangling_count(&self) -> usize {
        self.dropped_dangling
    }

    pub fn to_export(&self) -> GraphExport {
        GraphExport {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }
}
