//! Explorer view: the filterable resource table

use serde::Serialize;

/// One table row per visible resource
///
/// The full properties blob is not copied here; selecting the row yields it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorerRow {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub resource_group: String,
    pub location: String,
    pub category: String,
}
