use crate::application::dto::ViewKind;
use crate::application::read_models::{
    DiagnosticsView, ExplorerRow, GroupCount, InventoryReadModel, NeighborView,
    SecurityGroupView, SelectionDetail, SummaryView, TopologyView,
};
use crate::inventory::domain::{FilterDimension, FilterState, GraphExport};
use crate::ports::outbound::ViewFormatter;
use crate::shared::Result;
use std::collections::HashMap;

/// Markdown table header for the resource explorer
const RESOURCE_TABLE_HEADER: &str = "| Name | Type | Resource Group | Location | Category |\n";

/// Markdown table separator line for the resource explorer
const RESOURCE_TABLE_SEPARATOR: &str =
    "|------|------|----------------|----------|----------|\n";

/// Markdown table header for security rules
const RULE_TABLE_HEADER: &str =
    "| Priority | Name | Direction | Action | Protocol | Source | Source Port | Destination | Destination Port |\n";

/// Markdown table separator line for security rules
const RULE_TABLE_SEPARATOR: &str =
    "|----------|------|-----------|--------|----------|--------|-------------|-------------|------------------|\n";

/// Markdown table header for edges
const EDGE_TABLE_HEADER: &str = "| Source | Relation | Target |\n";

/// Markdown table separator line for edges
const EDGE_TABLE_SEPARATOR: &str = "|--------|----------|--------|\n";

/// Shown instead of the views when the filters match nothing
const NO_MATCH_MESSAGE: &str = "*No matching resources. Adjust or reset the filters.*\n\n";

/// MarkdownFormatter adapter for a human-readable inventory report
///
/// Renders each requested view as its own section. An empty filter result
/// is rendered as an explicit "no matching resources" notice rather than
/// empty tables.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn plural(count: usize, singular: &str, plural: &str) -> String {
        if count == 1 {
            format!("{} {}", count, singular)
        } else {
            format!("{} {}", count, plural)
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, model: &InventoryReadModel) {
        output.push_str("# Resource Inventory Report\n\n");

        let snapshot = &model.snapshot;
        if let Some(subscription) = &snapshot.subscription_id {
            output.push_str(&format!("- **Subscription:** {}\n", subscription));
        }
        if let Some(exported_at) = &snapshot.exported_at {
            output.push_str(&format!("- **Exported:** {}\n", exported_at));
        }
        output.push_str(&format!(
            "- **Visible:** {} of {}\n",
            model.visible_count,
            Self::plural(snapshot.loaded_resources, "resource", "resources")
        ));
        output.push_str(&format!(
            "- **Filters:** {}\n\n",
            Self::describe_filters(&model.filters)
        ));
    }

    fn describe_filters(filters: &FilterState) -> String {
        if filters.is_empty() {
            return "none".to_string();
        }
        filters
            .active_dimensions()
            .into_iter()
            .map(|dimension| {
                let values = filters.values(dimension);
                match dimension {
                    FilterDimension::Name => format!("name matches `{}`", values.join("")),
                    _ => format!("{} = {}", dimension, values.join(", ")),
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn render_summary(&self, output: &mut String, summary: &SummaryView) {
        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**{}** across **{}** in **{}**.\n\n",
            Self::plural(summary.total_resources, "resource", "resources"),
            Self::plural(summary.resource_group_count, "resource group", "resource groups"),
            Self::plural(summary.location_count, "location", "locations"),
        ));

        self.render_counts(output, "By Category", "Category", &summary.by_category);
        self.render_counts(output, "By Type", "Type", &summary.by_type);
        self.render_counts(output, "By Location", "Location", &summary.by_location);
        self.render_counts(
            output,
            "By Resource Group",
            "Resource Group",
            &summary.by_resource_group,
        );
    }

    fn render_counts(&self, output: &mut String, title: &str, column: &str, counts: &[GroupCount]) {
        if counts.is_empty() {
            return;
        }
        output.push_str(&format!("### {}\n\n", title));
        output.push_str(&format!("| {} | Count |\n|---|---|\n", column));
        for group in counts {
            output.push_str(&format!(
                "| {} | {} |\n",
                Self::escape_markdown_table_cell(&group.key),
                group.count
            ));
        }
        output.push('\n');
    }

    fn render_resources(&self, output: &mut String, rows: &[ExplorerRow]) {
        output.push_str("## Resources\n\n");
        output.push_str(RESOURCE_TABLE_HEADER);
        output.push_str(RESOURCE_TABLE_SEPARATOR);
        for row in rows {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&row.name),
                Self::escape_markdown_table_cell(&row.resource_type),
                Self::escape_markdown_table_cell(&row.resource_group),
                Self::escape_markdown_table_cell(&row.location),
                Self::escape_markdown_table_cell(&row.category),
            ));
        }
        output.push('\n');
    }

    fn render_topology(&self, output: &mut String, topology: &TopologyView) {
        output.push_str("## Topology\n\n");
        output.push_str(&format!(
            "{} and {} between visible resources.\n\n",
            Self::plural(topology.nodes.len(), "node", "nodes"),
            Self::plural(topology.edges.len(), "edge", "edges"),
        ));

        let labels: HashMap<&str, String> = topology
            .nodes
            .iter()
            .map(|node| {
                let label = match &node.detail {
                    Some(detail) => format!("{} {} ({})", node.icon, node.label, detail),
                    None => format!("{} {}", node.icon, node.label),
                };
                (node.id.as_str(), label)
            })
            .collect();

        if topology.edges.is_empty() {
            output.push_str("*No edges between visible resources*\n\n");
            return;
        }

        output.push_str(EDGE_TABLE_HEADER);
        output.push_str(EDGE_TABLE_SEPARATOR);
        for edge in &topology.edges {
            let source = labels
                .get(edge.source().as_str())
                .cloned()
                .unwrap_or_else(|| edge.source().to_string());
            let target = labels
                .get(edge.target().as_str())
                .cloned()
                .unwrap_or_else(|| edge.target().to_string());
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&source),
                edge.kind(),
                Self::escape_markdown_table_cell(&target),
            ));
        }
        output.push('\n');
    }

    fn render_security(&self, output: &mut String, groups: &[SecurityGroupView]) {
        output.push_str("## Network Security\n\n");
        if groups.is_empty() {
            output.push_str("*No network security groups among visible resources*\n\n");
            return;
        }

        for group in groups {
            output.push_str(&format!(
                "### {} ({})\n\n",
                Self::escape_markdown_table_cell(&group.nsg_name),
                Self::escape_markdown_table_cell(&group.resource_group)
            ));

            for finding in &group.findings {
                output.push_str(&format!("> ⚠️ {}\n", finding.message));
            }
            if !group.findings.is_empty() {
                output.push('\n');
            }

            if group.rules.is_empty() {
                output.push_str("*No security rules*\n\n");
                continue;
            }

            output.push_str(RULE_TABLE_HEADER);
            output.push_str(RULE_TABLE_SEPARATOR);
            for rule in &group.rules {
                let name = if rule.is_default {
                    format!("{} (default)", rule.name)
                } else {
                    rule.name.clone()
                };
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                    rule.priority,
                    Self::escape_markdown_table_cell(&name),
                    rule.direction.as_str(),
                    rule.access.as_str(),
                    Self::escape_markdown_table_cell(&rule.protocol),
                    Self::escape_markdown_table_cell(&rule.source_range),
                    Self::escape_markdown_table_cell(&rule.source_port),
                    Self::escape_markdown_table_cell(&rule.destination_range),
                    Self::escape_markdown_table_cell(&rule.destination_port),
                ));
            }
            output.push('\n');
        }
    }

    fn render_graph(&self, output: &mut String, graph: &GraphExport) {
        output.push_str("## Dependency Graph\n\n");
        output.push_str(&format!(
            "{} and {} in the whole snapshot.\n\n",
            Self::plural(graph.nodes.len(), "node", "nodes"),
            Self::plural(graph.edges.len(), "edge", "edges"),
        ));
        if graph.edges.is_empty() {
            return;
        }
        output.push_str(EDGE_TABLE_HEADER);
        output.push_str(EDGE_TABLE_SEPARATOR);
        for edge in &graph.edges {
            output.push_str(&format!(
                "| `{}` | {} | `{}` |\n",
                Self::escape_markdown_table_cell(edge.source().as_str()),
                edge.kind(),
                Self::escape_markdown_table_cell(edge.target().as_str()),
            ));
        }
        output.push('\n');
    }

    fn render_selection(&self, output: &mut String, selection: &SelectionDetail) {
        let resource = &selection.resource;
        output.push_str(&format!(
            "## Selected: {}\n\n",
            Self::escape_markdown_table_cell(resource.name())
        ));
        output.push_str(&format!("- **Id:** `{}`\n", resource.id()));
        output.push_str(&format!("- **Type:** {}\n", resource.resource_type()));
        output.push_str(&format!("- **Resource Group:** {}\n", resource.resource_group()));
        output.push_str(&format!("- **Location:** {}\n\n", resource.location()));

        self.render_neighbors(output, "Outbound", &selection.outbound);
        self.render_neighbors(output, "Inbound", &selection.inbound);
    }

    fn render_neighbors(&self, output: &mut String, title: &str, neighbors: &[NeighborView]) {
        output.push_str(&format!("### {}\n\n", title));
        if neighbors.is_empty() {
            output.push_str("*None*\n\n");
            return;
        }
        output.push_str("| Relation | Name | Type |\n|---|---|---|\n");
        for neighbor in neighbors {
            output.push_str(&format!(
                "| {} | {} | {} |\n",
                neighbor.kind,
                Self::escape_markdown_table_cell(&neighbor.name),
                Self::escape_markdown_table_cell(&neighbor.resource_type),
            ));
        }
        output.push('\n');
    }

    fn render_diagnostics(&self, output: &mut String, diagnostics: &DiagnosticsView) {
        output.push_str("---\n\n");
        output.push_str(&format!(
            "*Skipped records: {} · Dangling references: {} · Resources with unreadable properties: {}*\n",
            diagnostics.skipped_records,
            diagnostics.resolution.dangling_references,
            diagnostics.resolution.malformed_resources.len(),
        ));
    }
}

impl ViewFormatter for MarkdownFormatter {
    fn format(&self, model: &InventoryReadModel, view: ViewKind) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, model);

        let views = &model.views;
        if model.visible_count == 0 && view != ViewKind::Edges {
            output.push_str(NO_MATCH_MESSAGE);
        } else {
            if view.includes(ViewKind::Summary) {
                self.render_summary(&mut output, &views.summary);
            }
            if view.includes(ViewKind::Explorer) {
                self.render_resources(&mut output, &views.explorer);
            }
            if view.includes(ViewKind::Topology) {
                self.render_topology(&mut output, &views.topology);
            }
            if view.includes(ViewKind::Security) {
                self.render_security(&mut output, &views.security);
            }
        }

        if view.includes(ViewKind::Edges) {
            self.render_graph(&mut output, &model.graph);
        }
        if let Some(selection) = &model.selection {
            self.render_selection(&mut output, selection);
        }
        if view == ViewKind::All {
            self.render_diagnostics(&mut output, &model.diagnostics);
        }

        Ok(output)
    }
}
