use super::resource::ResourceKind;
use serde_json::{Map, Value};

/// Typed, borrowed view over a resource's properties blob
///
/// Known kinds expose the fields the projections need; every other kind
/// falls back to `Opaque`. A blob that is not an object (and not null) is
/// `Malformed`: the resource stays a bare node and contributes no
/// property-derived edges.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceProperties<'a> {
    /// Missing or `null` properties
    Empty,
    NetworkSecurityGroup {
        security_rules: &'a [Value],
        default_security_rules: &'a [Value],
    },
    VirtualNetwork {
        address_prefixes: Vec<&'a str>,
    },
    Subnet {
        address_prefix: Option<&'a str>,
    },
    Opaque(&'a Map<String, Value>),
    Malformed(&'a Value),
}

impl<'a> ResourceProperties<'a> {
    pub fn classify(kind: ResourceKind, value: &'a Value) -> Self {
        let map = match value {
            Value::Null => return ResourceProperties::Empty,
            Value::Object(map) => map,
            other => return ResourceProperties::Malformed(other),
        };

        match kind {
            ResourceKind::NetworkSecurityGroup => ResourceProperties::NetworkSecurityGroup {
                security_rules: array_field(map, "securityRules"),
                default_security_rules: array_field(map, "defaultSecurityRules"),
            },
            ResourceKind::VirtualNetwork => ResourceProperties::VirtualNetwork {
                address_prefixes: map
                    .get("addressSpace")
                    .and_then(|space| space.get("addressPrefixes"))
                    .and_then(Value::as_array)
                    .map(|prefixes| prefixes.iter().filter_map(Value::as_str).collect())
                    .unwrap_or_default(),
            },
            ResourceKind::Subnet => ResourceProperties::Subnet {
                address_prefix: map.get("addressPrefix").and_then(Value::as_str),
            },
            _ => ResourceProperties::Opaque(map),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ResourceProperties::Malformed(_))
    }

    /// Short address summary for network kinds (e.g. `10.0.0.0/16`)
    pub fn address_summary(&self) -> Option<String> {
        match self {
            ResourceProperties::VirtualNetwork { address_prefixes } if !address_prefixes.is_empty() => {
                Some(address_prefixes.join(", "))
            }
            ResourceProperties::Subnet {
                address_prefix: Some(prefix),
            } => Some(prefix.to_string()),
            _ => None,
        }
    }
}

fn array_field<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    map.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
