use super::resource::{Resource, ResourceId};
use crate::shared::error::InventoryError;
use crate::shared::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::collections::HashMap;

/// SnapshotMetadata value object describing where a snapshot came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotMetadata {
    subscription_id: Option<String>,
    exported_at: Option<DateTime<Utc>>,
    declared_total: Option<usize>,
}

impl SnapshotMetadata {
    pub fn new(
        subscription_id: Option<String>,
        exported_at: Option<DateTime<Utc>>,
        declared_total: Option<usize>,
    ) -> Self {
        Self {
            subscription_id,
            exported_at,
            declared_total,
        }
    }

    /// Parses an export timestamp, accepting RFC 3339 and offset-less
    /// ISO 8601 (interpreted as UTC).
    pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn subscription_id(&self) -> Option<&str> {
        self.subscription_id.as_deref()
    }

    pub fn exported_at(&self) -> Option<DateTime<Utc>> {
        self.exported_at
    }

    /// Resource total the exporter claimed, which may disagree with the
    /// number of records actually loaded
    pub fn declared_total(&self) -> Option<usize> {
        self.declared_total
    }
}

/// Catalog aggregate: the immutable set of resources of one snapshot
///
/// Resources keep their snapshot order. Ids are unique; construction fails
/// otherwise.
#[derive(Debug, Clone)]
pub struct Catalog {
    resources: Vec<Resource>,
    index: HashMap<ResourceId, usize>,
    metadata: SnapshotMetadata,
}

impl Catalog {
    pub fn new(resources: Vec<Resource>, metadata: SnapshotMetadata) -> Result<Self> {
        let mut index = HashMap::with_capacity(resources.len());
        for (position, resource) in resources.iter().enumerate() {
            if index.insert(resource.id().clone(), position).is_some() {
                return Err(InventoryError::DuplicateResourceId {
                    id: resource.id().to_string(),
                }
                .into());
            }
        }

        Ok(Self {
            resources,
            index,
            metadata,
        })
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.index.get(id).map(|&position| &self.resources[position])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.resources.iter().map(Resource::id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn metadata(&self) -> &SnapshotMetadata {
        &self.metadata
    }
}
