//! Summary view: counts of visible resources per grouping key

use serde::Serialize;

/// One grouping bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

/// Dashboard counters over the visible subset
///
/// Every grouping is sorted by descending count, ties by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_resources: usize,
    pub resource_group_count: usize,
    pub location_count: usize,
    pub by_type: Vec<GroupCount>,
    pub by_location: Vec<GroupCount>,
    pub by_resource_group: Vec<GroupCount>,
    pub by_category: Vec<GroupCount>,
}

impl SummaryView {
    pub fn is_empty(&self) -> bool {
        self.total_resources == 0
    }
}
