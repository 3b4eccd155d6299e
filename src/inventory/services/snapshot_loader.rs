use crate::inventory::domain::{Catalog, Resource, ResourceId, SnapshotMetadata};
use crate::shared::error::InventoryError;
use crate::shared::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Record fields as found in a snapshot, before normalization
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResource {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    resource_type: Option<String>,
    #[serde(default, alias = "resource_group")]
    resource_group: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    properties: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMetadata {
    #[serde(default, alias = "subscription_id")]
    subscription_id: Option<String>,
    #[serde(default, alias = "export_date", alias = "exportDate")]
    exported_at: Option<String>,
    #[serde(default, alias = "total_resources")]
    total_resources: Option<usize>,
}

/// A catalog plus what the loader had to leave out
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub catalog: Catalog,
    /// Records that were not objects, lacked a usable `id`, or repeated the
    /// id of an earlier record
    pub skipped_records: usize,
}

/// SnapshotLoader service turning snapshot JSON into a Catalog
///
/// Accepts a bare array of records, an object with a `resources` array, or
/// an inventory export (`resources.all`, else the flattened `resources.by_type`).
pub struct SnapshotLoader;

impl SnapshotLoader {
    pub fn from_json_str(content: &str) -> Result<LoadedSnapshot> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| InventoryError::MalformedCatalog {
                details: format!("invalid JSON: {}", e),
            })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<LoadedSnapshot> {
        let (records, metadata) = Self::split_snapshot(value)?;

        let mut skipped_records = 0;
        let mut seen = HashSet::with_capacity(records.len());
        let mut resources = Vec::with_capacity(records.len());
        for (position, record) in records.into_iter().enumerate() {
            match Self::normalize(record) {
                Ok(resource) if seen.insert(resource.id().clone()) => resources.push(resource),
                Ok(resource) => {
                    skipped_records += 1;
                    tracing::warn!(
                        position,
                        id = %resource.id(),
                        "skipping snapshot record with a repeated id"
                    );
                }
                Err(reason) => {
                    skipped_records += 1;
                    tracing::warn!(position, %reason, "skipping snapshot record");
                }
            }
        }

        if let Some(declared) = metadata.declared_total() {
            if declared != resources.len() {
                tracing::debug!(
                    declared,
                    loaded = resources.len(),
                    "snapshot metadata total differs from loaded records"
                );
            }
        }

        let catalog = Catalog::new(resources, metadata)?;
        Ok(LoadedSnapshot {
            catalog,
            skipped_records,
        })
    }

    fn split_snapshot(value: Value) -> Result<(Vec<Value>, SnapshotMetadata)> {
        match value {
            Value::Array(records) => Ok((records, SnapshotMetadata::default())),
            Value::Object(mut root) => {
                let metadata = Self::read_metadata(root.remove("metadata"));
                let records = match root.remove("resources") {
                    Some(Value::Array(records)) => records,
                    Some(Value::Object(sections)) => Self::export_records(sections)?,
                    Some(other) => {
                        return Err(InventoryError::MalformedCatalog {
                            details: format!(
                                "\"resources\" must be an array or object, found {}",
                                json_type_name(&other)
                            ),
                        }
                        .into())
                    }
                    None => {
                        return Err(InventoryError::MalformedCatalog {
                            details: "object has no \"resources\" field".to_string(),
                        }
                        .into())
                    }
                };
                Ok((records, metadata))
            }
            other => Err(InventoryError::MalformedCatalog {
                details: format!(
                    "expected an array or object, found {}",
                    json_type_name(&other)
                ),
            }
            .into()),
        }
    }

    /// Records of an export's `resources` object
    fn export_records(mut sections: Map<String, Value>) -> Result<Vec<Value>> {
        if let Some(Value::Array(all)) = sections.remove("all") {
            return Ok(all);
        }

        match sections.remove("by_type") {
            Some(Value::Object(by_type)) => Ok(by_type
                .into_iter()
                .filter_map(|(_, group)| match group {
                    Value::Array(records) => Some(records),
                    _ => None,
                })
                .flatten()
                .collect()),
            _ => Err(InventoryError::MalformedCatalog {
                details: "\"resources\" object has neither an \"all\" array nor a \"by_type\" map"
                    .to_string(),
            }
            .into()),
        }
    }

    fn read_metadata(raw: Option<Value>) -> SnapshotMetadata {
        let raw: RawMetadata = raw
            .and_then(|value| match serde_json::from_value(value) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unreadable snapshot metadata");
                    None
                }
            })
            .unwrap_or_default();

        SnapshotMetadata::new(
            raw.subscription_id,
            raw.exported_at
                .as_deref()
                .and_then(SnapshotMetadata::parse_timestamp),
            raw.total_resources,
        )
    }

    /// Applies the record defaults: name from the id, `Unknown` type and
    /// group (unless the id embeds one), `unknown` location, `{}` properties.
    fn normalize(record: Value) -> std::result::Result<Resource, String> {
        if !record.is_object() {
            return Err(format!("record is {}, not an object", json_type_name(&record)));
        }

        let raw: RawResource =
            serde_json::from_value(record).map_err(|e| format!("unreadable record: {}", e))?;
        let id = ResourceId::new(raw.id).map_err(|e| e.to_string())?;

        let name = non_empty(raw.name).unwrap_or_else(|| id.last_segment().to_string());
        let resource_type = non_empty(raw.resource_type).unwrap_or_else(|| "Unknown".to_string());
        let resource_group = non_empty(raw.resource_group)
            .or_else(|| id.embedded_resource_group().map(str::to_string))
            .unwrap_or_else(|| "Unknown".to_string());
        let location = non_empty(raw.location).unwrap_or_else(|| "unknown".to_string());
        let properties = match raw.properties {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        Ok(Resource::new(
            id,
            name,
            resource_type,
            resource_group,
            location,
            properties,
        ))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
