use super::category::ServiceCategory;
use super::resource_properties::ResourceProperties;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Maximum length for resource ids (provider ids are far shorter)
const MAX_RESOURCE_ID_LENGTH: usize = 2048;

/// NewType wrapper for a resource id, the node key of the graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: String) -> Result<Self> {
        if id.trim().is_empty() {
            anyhow::bail!("Resource id cannot be empty");
        }

        if id.len() > MAX_RESOURCE_ID_LENGTH {
            anyhow::bail!(
                "Resource id is too long ({} bytes). Maximum allowed: {} bytes",
                id.len(),
                MAX_RESOURCE_ID_LENGTH
            );
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Strict path prefixes of this id, longest first.
    ///
    /// `vnet-1/subnets/sub-1` yields `vnet-1/subnets` then `vnet-1`.
    /// Empty prefixes (from a leading `/`) are skipped.
    pub fn path_prefixes(&self) -> impl Iterator<Item = &str> {
        let id = self.0.as_str();
        id.rmatch_indices('/')
            .map(move |(idx, _)| &id[..idx])
            .filter(|prefix| !prefix.is_empty())
    }

    /// Last non-empty `/`-separated segment, used as a fallback display name
    pub fn last_segment(&self) -> &str {
        self.0
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.0)
    }

    /// Resource group embedded in a provider path id
    /// (`/subscriptions/<sub>/resourceGroups/<rg>/...`), if any
    pub fn embedded_resource_group(&self) -> Option<&str> {
        let mut segments = self.0.split('/');
        while let Some(segment) = segments.next() {
            if segment.eq_ignore_ascii_case("resourceGroups") {
                return segments.next().filter(|rg| !rg.is_empty());
            }
        }
        None
    }
}

impl Borrow<str> for ResourceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Classification of a resource `type` string
///
/// Accepts both provider path types (`Microsoft.Network/virtualNetworks`)
/// and dotted types (`network.vnet`), case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    VirtualNetwork,
    Subnet,
    NetworkSecurityGroup,
    NetworkInterface,
    VirtualMachine,
    Other,
}

impl ResourceKind {
    pub fn from_type(resource_type: &str) -> Self {
        match resource_type.trim().to_ascii_lowercase().as_str() {
            "microsoft.network/virtualnetworks" | "network.vnet" | "network.virtualnetwork" => {
                ResourceKind::VirtualNetwork
            }
            "microsoft.network/virtualnetworks/subnets" | "network.subnet" => ResourceKind::Subnet,
            "microsoft.network/networksecuritygroups"
            | "network.nsg"
            | "network.securitygroup"
            | "network.networksecuritygroup" => ResourceKind::NetworkSecurityGroup,
            "microsoft.network/networkinterfaces" | "network.nic" | "network.networkinterface" => {
                ResourceKind::NetworkInterface
            }
            "microsoft.compute/virtualmachines" | "compute.vm" | "compute.virtualmachine" => {
                ResourceKind::VirtualMachine
            }
            _ => ResourceKind::Other,
        }
    }
}

/// Resource entity: one record of the inventory snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    id: ResourceId,
    name: String,
    #[serde(rename = "type")]
    resource_type: String,
    resource_group: String,
    location: String,
    properties: serde_json::Value,
}

impl Resource {
    pub fn new(
        id: ResourceId,
        name: String,
        resource_type: String,
        resource_group: String,
        location: String,
        properties: serde_json::Value,
    ) -> Self {
        Self {
            id,
            name,
            resource_type,
            resource_group,
            location,
            properties,
        }
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Raw, untyped properties blob exactly as found in the snapshot
    pub fn properties(&self) -> &serde_json::Value {
        &self.properties
    }

    pub fn kind(&self) -> ResourceKind {
        ResourceKind::from_type(&self.resource_type)
    }

    pub fn category(&self) -> ServiceCategory {
        ServiceCategory::from_type(&self.resource_type)
    }

    /// Typed view of the properties blob for this resource's kind
    pub fn typed_properties(&self) -> ResourceProperties<'_> {
        ResourceProperties::classify(self.kind(), &self.properties)
    }
}
