//! Inventory read model handed to formatters
//!
//! Aggregates the controller state and every view model of one pipeline
//! pass in a serializable, presentation-neutral shape.

use super::explorer_view::ExplorerRow;
use super::security_view::SecurityGroupView;
use super::selection_view::SelectionDetail;
use super::summary_view::SummaryView;
use super::topology_view::TopologyView;
use crate::inventory::domain::{FilterState, GraphExport, SnapshotMetadata};
use crate::inventory::services::ResolutionDiagnostics;
use serde::Serialize;

/// Output of one projection pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedViews {
    pub summary: SummaryView,
    pub explorer: Vec<ExplorerRow>,
    pub topology: TopologyView,
    pub security: Vec<SecurityGroupView>,
}

/// Where the snapshot came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_total: Option<usize>,
    pub loaded_resources: usize,
}

impl SnapshotView {
    pub fn from_metadata(metadata: &SnapshotMetadata, loaded_resources: usize) -> Self {
        Self {
            subscription_id: metadata.subscription_id().map(str::to_string),
            exported_at: metadata.exported_at().map(|at| at.to_rfc3339()),
            declared_total: metadata.declared_total(),
            loaded_resources,
        }
    }
}

/// Data-quality counters of the load and resolution stages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsView {
    pub skipped_records: usize,
    #[serde(flatten)]
    pub resolution: ResolutionDiagnostics,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Everything a renderer needs after a pipeline pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReadModel {
    pub snapshot: SnapshotView,
    pub filters: FilterState,
    pub visible_count: usize,
    pub views: ProjectedViews,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionDetail>,
    /// The whole resolved graph, independent of filters
    pub graph: GraphExport,
    pub diagnostics: DiagnosticsView,
}
