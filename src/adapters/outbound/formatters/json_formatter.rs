use crate::application::dto::ViewKind;
use crate::application::read_models::{
    DiagnosticsView, ExplorerRow, InventoryReadModel, SecurityGroupView, SelectionDetail,
    SnapshotView, SummaryView, TopologyView,
};
use crate::inventory::domain::{FilterState, GraphExport};
use crate::ports::outbound::ViewFormatter;
use crate::shared::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

const TOOL: ToolInfo = ToolInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
};

/// Serialized document; only the requested sections are present
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    tool: ToolInfo,
    generated_at: String,
    view: String,
    snapshot: &'a SnapshotView,
    filters: &'a FilterState,
    visible_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a SummaryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resources: Option<&'a [ExplorerRow]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    topology: Option<&'a TopologyView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    security: Option<&'a [SecurityGroupView]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    graph: Option<&'a GraphExport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selection: Option<&'a SelectionDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostics: Option<&'a DiagnosticsView>,
}

/// JsonFormatter adapter rendering view models as pretty-printed JSON
///
/// Field names are camelCase. The `edges` view carries the full graph as
/// `{source, target, kind}` triples, independent of filters.
pub struct JsonFormatter {
    generated_at: Option<DateTime<Utc>>,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { generated_at: None }
    }

    /// Pins the `generatedAt` timestamp instead of using the current time
    pub fn with_generated_at(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: Some(generated_at),
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewFormatter for JsonFormatter {
    fn format(&self, model: &InventoryReadModel, view: ViewKind) -> Result<String> {
        let views = &model.views;
        let document = JsonDocument {
            tool: TOOL,
            generated_at: self.generated_at.unwrap_or_else(Utc::now).to_rfc3339(),
            view: view.to_string(),
            snapshot: &model.snapshot,
            filters: &model.filters,
            visible_count: model.visible_count,
            summary: view.includes(ViewKind::Summary).then_some(&views.summary),
            resources: view
                .includes(ViewKind::Explorer)
                .then_some(views.explorer.as_slice()),
            topology: view.includes(ViewKind::Topology).then_some(&views.topology),
            security: view
                .includes(ViewKind::Security)
                .then_some(views.security.as_slice()),
            graph: view.includes(ViewKind::Edges).then_some(&model.graph),
            selection: model.selection.as_ref(),
            diagnostics: view.includes(ViewKind::Edges).then_some(&model.diagnostics),
        };

        serde_json::to_string_pretty(&document).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::read_models::{GroupCount, ProjectedViews};
    use crate::inventory::domain::{EdgeKind, Reference, ResourceId};
    use chrono::TimeZone;
    use serde_json::Value;

    fn id(raw: &str) -> ResourceId {
        ResourceId::new(raw.to_string()).unwrap()
    }

    fn model() -> InventoryReadModel {
        InventoryReadModel {
            snapshot: SnapshotView {
                subscription_id: Some("sub-1".to_string()),
                exported_at: None,
                declared_total: None,
                loaded_resources: 2,
            },
            filters: FilterState::new(),
            visible_count: 2,
            views: ProjectedViews {
                summary: SummaryView {
                    total_resources: 2,
                    resource_group_count: 1,
                    location_count: 1,
                    by_type: vec![GroupCount {
                        key: "Microsoft.Network/virtualNetworks".to_string(),
                        count: 2,
                    }],
                    ..Default::default()
                },
                explorer: vec![ExplorerRow {
                    id: "vnet-1".to_string(),
                    name: "vnet-1".to_string(),
                    resource_type: "Microsoft.Network/virtualNetworks".to_string(),
                    resource_group: "rg".to_string(),
                    location: "eastus".to_string(),
                    category: "Network".to_string(),
                }],
                ..Default::default()
            },
            selection: None,
            graph: GraphExport {
                nodes: vec![id("vnet-1"), id("vnet-1/subnets/a")],
                edges: vec![Reference::new(
                    id("vnet-1"),
                    id("vnet-1/subnets/a"),
                    EdgeKind::ParentOf,
                )],
            },
            diagnostics: DiagnosticsView::default(),
        }
    }

    fn render(view: ViewKind) -> Value {
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let output = JsonFormatter::with_generated_at(generated_at)
            .format(&model(), view)
            .unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn test_summary_view_only_has_summary() {
        let json = render(ViewKind::Summary);

        assert_eq!(json["tool"]["name"], "resgraph");
        assert_eq!(json["generatedAt"], "2024-05-01T00:00:00+00:00");
        assert_eq!(json["view"], "summary");
        assert_eq!(json["summary"]["totalResources"], 2);
        assert_eq!(json["snapshot"]["subscriptionId"], "sub-1");
        assert!(json.get("resources").is_none());
        assert!(json.get("graph").is_none());
    }

    #[test]
    fn test_explorer_rows_use_type_field() {
        let json = render(ViewKind::Explorer);
        assert_eq!(
            json["resources"][0]["type"],
            "Microsoft.Network/virtualNetworks"
        );
        assert_eq!(json["resources"][0]["resourceGroup"], "rg");
    }

    #[test]
    fn test_edges_view_exports_triples() {
        let json = render(ViewKind::Edges);
        let edge = &json["graph"]["edges"][0];

        assert_eq!(edge["source"], "vnet-1");
        assert_eq!(edge["target"], "vnet-1/subnets/a");
        assert_eq!(edge["kind"], "parent-of");
        assert_eq!(json["graph"]["nodes"].as_array().unwrap().len(), 2);
        assert!(json.get("diagnostics").is_some());
    }

    #[test]
    fn test_all_view_has_every_section() {
        let json = render(ViewKind::All);
        for section in ["summary", "resources", "topology", "security", "graph", "diagnostics"] {
            assert!(json.get(section).is_some(), "missing section {}", section);
        }
        assert!(json.get("selection").is_none());
    }
}
