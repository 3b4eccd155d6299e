//! Projection of the visible subset into view models
//!
//! Every projection is a pure function of the catalog, the graph and the
//! visible ids, and runs in O(V+E) over the visible part.

use super::explorer_view::ExplorerRow;
use super::inventory_read_model::ProjectedViews;
use super::security_view::SecurityGroupView;
use super::selection_view::{NeighborView, SelectionDetail};
use super::summary_view::{GroupCount, SummaryView};
use super::topology_view::{TopologyNode, TopologyView};
use crate::inventory::domain::{
    Catalog, DependencyGraph, Direction, Reference, Resource, ResourceId, ResourceKind,
};
use crate::inventory::policies::ExposurePolicy;
use crate::inventory::services::SecurityRuleExtractor;
use std::collections::{BTreeSet, HashMap, HashSet};

/// ViewProjector builds the four views from the current visible subset
pub struct ViewProjector;

impl ViewProjector {
    /// Runs all four projections
    ///
    /// # Arguments
    /// * `catalog` - The loaded snapshot
    /// * `graph` - Dependency graph built from the catalog
    /// * `visible` - Ids produced by the filter engine
    ///
    /// # Returns
    /// Summary, explorer, topology and security views
    pub fn project(
        catalog: &Catalog,
        graph: &DependencyGraph,
        visible: &BTreeSet<ResourceId>,
    ) -> ProjectedViews {
        let resources = Self::visible_resources(catalog, visible);
        ProjectedViews {
            summary: Self::build_summary(&resources),
            explorer: Self::build_explorer(&resources),
            topology: Self::build_topology(&resources, graph, visible),
            security: Self::build_security(&resources),
        }
    }

    pub fn summary(catalog: &Catalog, visible: &BTreeSet<ResourceId>) -> SummaryView {
        Self::build_summary(&Self::visible_resources(catalog, visible))
    }

    pub fn explorer(catalog: &Catalog, visible: &BTreeSet<ResourceId>) -> Vec<ExplorerRow> {
        Self::build_explorer(&Self::visible_resources(catalog, visible))
    }

    pub fn topology(
        catalog: &Catalog,
        graph: &DependencyGraph,
        visible: &BTreeSet<ResourceId>,
    ) -> TopologyView {
        Self::build_topology(&Self::visible_resources(catalog, visible), graph, visible)
    }

    pub fn security(catalog: &Catalog, visible: &BTreeSet<ResourceId>) -> Vec<SecurityGroupView> {
        Self::build_security(&Self::visible_resources(catalog, visible))
    }

    /// Detail of one resource with its one-hop neighbors, read from the
    /// graph adjacency. Visibility does not matter here.
    pub fn selection(
        catalog: &Catalog,
        graph: &DependencyGraph,
        id: &str,
    ) -> Option<SelectionDetail> {
        let resource = catalog.get(id)?;
        let neighbor = |edge: &Reference, other: &ResourceId| {
            catalog.get(other.as_str()).map(|found| NeighborView {
                id: found.id().to_string(),
                name: found.name().to_string(),
                resource_type: found.resource_type().to_string(),
                kind: edge.kind(),
            })
        };

        Some(SelectionDetail {
            resource: resource.clone(),
            outbound: graph
                .edges_from(id, Direction::Outbound)
                .filter_map(|edge| neighbor(edge, edge.target()))
                .collect(),
            inbound: graph
                .edges_from(id, Direction::Inbound)
                .filter_map(|edge| neighbor(edge, edge.source()))
                .collect(),
        })
    }

    /// Visible resources in id order; ids unknown to the catalog are ignored
    fn visible_resources<'a>(
        catalog: &'a Catalog,
        visible: &BTreeSet<ResourceId>,
    ) -> Vec<&'a Resource> {
        visible
            .iter()
            .filter_map(|id| catalog.get(id.as_str()))
            .collect()
    }

    fn build_summary(resources: &[&Resource]) -> SummaryView {
        let resource_groups: HashSet<&str> =
            resources.iter().map(|r| r.resource_group()).collect();
        let locations: HashSet<&str> = resources.iter().map(|r| r.location()).collect();

        SummaryView {
            total_resources: resources.len(),
            resource_group_count: resource_groups.len(),
            location_count: locations.len(),
            by_type: count_by(resources, |r| r.resource_type().to_string()),
            by_location: count_by(resources, |r| r.location().to_string()),
            by_resource_group: count_by(resources, |r| r.resource_group().to_string()),
            by_category: count_by(resources, |r| r.category().as_str().to_string()),
        }
    }

    fn build_explorer(resources: &[&Resource]) -> Vec<ExplorerRow> {
        let mut rows: Vec<ExplorerRow> = resources
            .iter()
            .map(|resource| ExplorerRow {
                id: resource.id().to_string(),
                name: resource.name().to_string(),
                resource_type: resource.resource_type().to_string(),
                resource_group: resource.resource_group().to_string(),
                location: resource.location().to_string(),
                category: resource.category().as_str().to_string(),
            })
            .collect();

        rows.sort_by_cached_key(|row| (row.name.to_lowercase(), row.id.clone()));
        rows
    }

    fn build_topology(
        resources: &[&Resource],
        graph: &DependencyGraph,
        visible: &BTreeSet<ResourceId>,
    ) -> TopologyView {
        let nodes = resources
            .iter()
            .map(|resource| {
                let category = resource.category();
                TopologyNode {
                    id: resource.id().to_string(),
                    label: resource.name().to_string(),
                    resource_type: resource.resource_type().to_string(),
                    category: category.as_str().to_string(),
                    icon: category.icon().to_string(),
                    group: resource.resource_group().to_string(),
                    detail: resource.typed_properties().address_summary(),
                }
            })
            .collect();

        let edges = resources
            .iter()
            .flat_map(|resource| graph.edges_from(resource.id().as_str(), Direction::Outbound))
            .filter(|edge| visible.contains(edge.target()))
            .cloned()
            .collect();

        TopologyView { nodes, edges }
    }

    fn build_security(resources: &[&Resource]) -> Vec<SecurityGroupView> {
        resources
            .iter()
            .filter(|resource| resource.kind() == ResourceKind::NetworkSecurityGroup)
            .map(|resource| {
                let mut rules = SecurityRuleExtractor::extract(resource);
                rules.sort_by_key(|rule| rule.priority);
                let findings = ExposurePolicy::evaluate(&rules);
                SecurityGroupView {
                    nsg_id: resource.id().to_string(),
                    nsg_name: resource.name().to_string(),
                    resource_group: resource.resource_group().to_string(),
                    rules,
                    findings,
                }
            })
            .collect()
    }
}

/// Counts per key, sorted by descending count then ascending key
fn count_by<F>(resources: &[&Resource], key: F) -> Vec<GroupCount>
where
    F: Fn(&Resource) -> String,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for resource in resources {
        *counts.entry(key(*resource)).or_insert(0) += 1;
    }

    let mut groups: Vec<GroupCount> = counts
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect();
    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::{EdgeKind, SnapshotMetadata};
    use crate::inventory::services::ReferenceResolver;
    use serde_json::{json, Value};

    fn resource(
        id: &str,
        name: &str,
        resource_type: &str,
        rg: &str,
        location: &str,
        properties: Value,
    ) -> Resource {
        Resource::new(
            ResourceId::new(id.to_string()).unwrap(),
            name.to_string(),
            resource_type.to_string(),
            rg.to_string(),
            location.to_string(),
            properties,
        )
    }

    fn fixture() -> (Catalog, DependencyGraph) {
        let catalog = Catalog::new(
            vec![
                resource(
                    "vnet-1",
                    "core-vnet",
                    "network.vnet",
                    "rg-net",
                    "westeurope",
                    json!({"addressSpace": {"addressPrefixes": ["10.0.0.0/16"]}}),
                ),
                resource(
                    "vnet-1/subnets/sub-1",
                    "app-subnet",
                    "network.subnet",
                    "rg-net",
                    "westeurope",
                    json!({"addressPrefix": "10.0.1.0/24", "networkSecurityGroup": {"id": "nsg-1"}}),
                ),
                resource(
                    "nsg-1",
                    "app-nsg",
                    "network.nsg",
                    "rg-net",
                    "westeurope",
                    json!({
                        "securityRules": [
                            {"name": "allow-ssh", "properties": {"direction": "Inbound", "access": "Allow", "priority": 300, "sourceAddressPrefix": "*", "destinationPortRange": "22"}},
                            {"name": "allow-https", "properties": {"direction": "Inbound", "access": "Allow", "priority": 100, "sourceAddressPrefix": "*", "destinationPortRange": "443"}}
                        ],
                        "defaultSecurityRules": [
                            {"name": "DenyAllInBound", "properties": {"direction": "Inbound", "access": "Deny", "priority": 65500}}
                        ]
                    }),
                ),
                resource(
                    "vm-1",
                    "web-01",
                    "compute.vm",
                    "rg-prod",
                    "northeurope",
                    json!({"subnetId": "vnet-1/subnets/sub-1"}),
                ),
                resource(
                    "vm-2",
                    "Api-01",
                    "compute.vm",
                    "rg-prod",
                    "westeurope",
                    json!({}),
                ),
            ],
            SnapshotMetadata::default(),
        )
        .unwrap();
        let references = ReferenceResolver::new().resolve(&catalog);
        let graph = DependencyGraph::build(&catalog, references);
        (catalog, graph)
    }

    fn all_ids(catalog: &Catalog) -> BTreeSet<ResourceId> {
        catalog.ids().cloned().collect()
    }

    fn ids(raw: &[&str]) -> BTreeSet<ResourceId> {
        raw.iter()
            .map(|id| ResourceId::new(id.to_string()).unwrap())
            .collect()
    }

    #[test]
    fn test_summary_counts_and_order() {
        let (catalog, _) = fixture();
        let summary = ViewProjector::summary(&catalog, &all_ids(&catalog));

        assert_eq!(summary.total_resources, 5);
        assert_eq!(summary.resource_group_count, 2);
        assert_eq!(summary.location_count, 2);
        assert_eq!(
            summary.by_location,
            vec![
                GroupCount {
                    key: "westeurope".to_string(),
                    count: 4
                },
                GroupCount {
                    key: "northeurope".to_string(),
                    count: 1
                },
            ]
        );
        // compute.vm has 2; the three singletons are ordered by key
        let type_keys: Vec<&str> = summary.by_type.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            type_keys,
            vec!["compute.vm", "network.nsg", "network.subnet", "network.vnet"]
        );
        assert_eq!(summary.by_category[0].key, "Network");
    }

    #[test]
    fn test_explorer_sorted_by_name_case_insensitive() {
        let (catalog, _) = fixture();
        let rows = ViewProjector::explorer(&catalog, &all_ids(&catalog));
        let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Api-01", "app-nsg", "app-subnet", "core-vnet", "web-01"]
        );
    }

    #[test]
    fn test_topology_keeps_only_internal_edges() {
        let (catalog, graph) = fixture();
        let visible = ids(&["vm-1", "vnet-1/subnets/sub-1"]);
        let topology = ViewProjector::topology(&catalog, &graph, &visible);

        assert_eq!(topology.nodes.len(), 2);
        assert_eq!(topology.edges.len(), 1);
        assert_eq!(topology.edges[0].kind(), EdgeKind::AttachedTo);
        for edge in &topology.edges {
            assert!(visible.contains(edge.source()));
            assert!(visible.contains(edge.target()));
        }
    }

    #[test]
    fn test_topology_node_detail() {
        let (catalog, graph) = fixture();
        let topology = ViewProjector::topology(&catalog, &graph, &ids(&["vnet-1"]));
        assert_eq!(topology.nodes[0].detail.as_deref(), Some("10.0.0.0/16"));
        assert_eq!(topology.nodes[0].icon, "🌐");
        assert!(topology.edges.is_empty());
    }

    #[test]
    fn test_security_rules_sorted_by_priority() {
        let (catalog, _) = fixture();
        let security = ViewProjector::security(&catalog, &all_ids(&catalog));

        assert_eq!(security.len(), 1);
        let group = &security[0];
        assert_eq!(group.nsg_id, "nsg-1");
        let priorities: Vec<i64> = group.rules.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![100, 300, 65500]);
        assert!(priorities.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(group.findings.len(), 1);
        assert_eq!(group.findings[0].rule_name, "allow-ssh");
    }

    #[test]
    fn test_security_only_for_visible_nsgs() {
        let (catalog, _) = fixture();
        let security = ViewProjector::security(&catalog, &ids(&["vm-1", "vnet-1"]));
        assert!(security.is_empty());
    }

    #[test]
    fn test_empty_subset_projects_empty_views() {
        let (catalog, graph) = fixture();
        let views = ViewProjector::project(&catalog, &graph, &BTreeSet::new());
        assert!(views.summary.is_empty());
        assert!(views.summary.by_type.is_empty());
        assert!(views.explorer.is_empty());
        assert!(views.topology.is_empty());
        assert!(views.topology.edges.is_empty());
        assert!(views.security.is_empty());
    }

    #[test]
    fn test_selection_neighbors_both_directions() {
        let (catalog, graph) = fixture();
        let detail = ViewProjector::selection(&catalog, &graph, "vnet-1/subnets/sub-1").unwrap();

        assert_eq!(detail.resource.name(), "app-subnet");
        assert_eq!(detail.outbound.len(), 1);
        assert_eq!(detail.outbound[0].id, "nsg-1");
        assert_eq!(detail.outbound[0].kind, EdgeKind::SecuredBy);

        let inbound: Vec<(&str, EdgeKind)> = detail
            .inbound
            .iter()
            .map(|n| (n.id.as_str(), n.kind))
            .collect();
        assert_eq!(
            inbound,
            vec![("vm-1", EdgeKind::AttachedTo), ("vnet-1", EdgeKind::ParentOf)]
        );
    }

    #[test]
    fn test_selection_of_unknown_id() {
        let (catalog, graph) = fixture();
        assert!(ViewProjector::selection(&catalog, &graph, "nope").is_none());
    }
}
