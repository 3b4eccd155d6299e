//! Topology view: visible nodes and the edges between them

use crate::inventory::domain::Reference;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub category: String,
    pub icon: String,
    pub group: String,
    /// Address space of network nodes, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Only edges with both endpoints visible are kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyView {
    pub nodes: Vec<TopologyNode>,
    pub edges: Vec<Reference>,
}

impl TopologyView {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
