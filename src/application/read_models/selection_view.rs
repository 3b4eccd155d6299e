//! Selection detail: one resource with its one-hop neighborhood

use crate::inventory::domain::{EdgeKind, Resource};
use serde::Serialize;

/// A directly connected resource and the relation that connects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeighborView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDetail {
    /// The full record, properties included
    pub resource: Resource,
    /// Resources this one points at
    pub outbound: Vec<NeighborView>,
    /// Resources pointing at this one
    pub inbound: Vec<NeighborView>,
}
