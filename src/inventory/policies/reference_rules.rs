use crate::inventory::domain::{EdgeKind, ResourceKind};

/// One `(type scope, property, edge kind)` matcher
///
/// `property` is a normalized key: lower-case with any trailing `id`/`ids`
/// removed, so `subnetId`, `subnetIds` and `subnet` share one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRule {
    pub type_scope: Option<ResourceKind>,
    pub property: &'static str,
    pub kind: EdgeKind,
}

const fn scoped(kind_scope: ResourceKind, property: &'static str, kind: EdgeKind) -> ReferenceRule {
    ReferenceRule {
        type_scope: Some(kind_scope),
        property,
        kind,
    }
}

const fn any(property: &'static str, kind: EdgeKind) -> ReferenceRule {
    ReferenceRule {
        type_scope: None,
        property,
        kind,
    }
}

/// Type-scoped rules; consulted before `GENERIC_RULES`
const SCOPED_RULES: &[ReferenceRule] = &[
    scoped(ResourceKind::VirtualNetwork, "subnets", EdgeKind::ParentOf),
    scoped(ResourceKind::NetworkSecurityGroup, "subnets", EdgeKind::Secures),
    scoped(ResourceKind::NetworkSecurityGroup, "networkinterfaces", EdgeKind::Secures),
    scoped(ResourceKind::NetworkInterface, "virtualmachine", EdgeKind::AttachedTo),
    scoped(ResourceKind::VirtualMachine, "networkinterfaces", EdgeKind::AttachedTo),
];

const GENERIC_RULES: &[ReferenceRule] = &[
    any("subnet", EdgeKind::AttachedTo),
    any("subnets", EdgeKind::AttachedTo),
    any("virtualnetworksubnet", EdgeKind::AttachedTo),
    any("networkinterface", EdgeKind::AttachedTo),
    any("networkinterfaces", EdgeKind::AttachedTo),
    any("nic", EdgeKind::AttachedTo),
    any("virtualmachine", EdgeKind::AttachedTo),
    any("networksecuritygroup", EdgeKind::SecuredBy),
    any("nsg", EdgeKind::SecuredBy),
    any("virtualnetwork", EdgeKind::MemberOf),
    any("vnet", EdgeKind::MemberOf),
    any("remotevirtualnetwork", EdgeKind::MemberOf),
    any("backendaddresspool", EdgeKind::MemberOf),
    any("backendaddresspools", EdgeKind::MemberOf),
    any("loadbalancerbackendaddresspools", EdgeKind::MemberOf),
    any("applicationgatewaybackendaddresspools", EdgeKind::MemberOf),
    any("publicipaddress", EdgeKind::ExposedBy),
    any("publicip", EdgeKind::ExposedBy),
    any("routetable", EdgeKind::RoutedBy),
    any("serverfarm", EdgeKind::HostedOn),
    any("appserviceplan", EdgeKind::HostedOn),
    any("storageaccount", EdgeKind::Uses),
    any("manageddisk", EdgeKind::Uses),
    any("keyvault", EdgeKind::Uses),
    any("diskencryptionset", EdgeKind::Uses),
    any("workspace", EdgeKind::MonitoredBy),
    any("workspaceresource", EdgeKind::MonitoredBy),
    any("loganalyticsworkspace", EdgeKind::MonitoredBy),
];

/// ReferenceRules policy: the declarative table that decides the kind of an
/// id-valued property
///
/// Property keys with no rule never produce a typed edge; the resolver may
/// still emit a generic `references` edge for an exact catalog id.
pub struct ReferenceRules;

impl ReferenceRules {
    /// Looks up the edge kind for a property key on a resource of `kind`.
    ///
    /// # Arguments
    /// * `kind` - Kind of the resource owning the property
    /// * `key` - Raw property key (e.g. `subnetId`, `networkSecurityGroup`)
    ///
    /// # Returns
    /// The matching rule's edge kind, or None when no rule applies
    pub fn lookup(kind: ResourceKind, key: &str) -> Option<EdgeKind> {
        let normalized = Self::normalize_key(key);
        SCOPED_RULES
            .iter()
            .find(|rule| rule.type_scope == Some(kind) && rule.property == normalized)
            .or_else(|| GENERIC_RULES.iter().find(|rule| rule.property == normalized))
            .map(|rule| rule.kind)
    }

    /// Lower-cases a key and strips a trailing `ids`/`id` when something
    /// remains after it.
    pub fn normalize_key(key: &str) -> String {
        let lowered = key.to_ascii_lowercase();
        for suffix in ["ids", "id"] {
            if let Some(stripped) = lowered.strip_suffix(suffix) {
                if !stripped.is_empty() {
                    return stripped.to_string();
                }
            }
        }
        lowered
    }

    /// Every rule, scoped ones first
    pub fn all() -> impl Iterator<Item = &'static ReferenceRule> {
        SCOPED_RULES.iter().chain(GENERIC_RULES.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(ReferenceRules::normalize_key("subnetId"), "subnet");
        assert_eq!(ReferenceRules::normalize_key("subnetIds"), "subnet");
        assert_eq!(ReferenceRules::normalize_key("networkSecurityGroup"), "networksecuritygroup");
        assert_eq!(ReferenceRules::normalize_key("id"), "id");
        assert_eq!(ReferenceRules::normalize_key("Ids"), "ids");
    }

    #[test]
    fn test_generic_lookup() {
        assert_eq!(
            ReferenceRules::lookup(ResourceKind::VirtualMachine, "subnetId"),
            Some(EdgeKind::AttachedTo)
        );
        assert_eq!(
            ReferenceRules::lookup(ResourceKind::Subnet, "networkSecurityGroup"),
            Some(EdgeKind::SecuredBy)
        );
        assert_eq!(
            ReferenceRules::lookup(ResourceKind::Other, "publicIPAddress"),
            Some(EdgeKind::ExposedBy)
        );
        assert_eq!(
            ReferenceRules::lookup(ResourceKind::Other, "serverFarmId"),
            Some(EdgeKind::HostedOn)
        );
    }

    #[test]
    fn test_scoped_rules_take_precedence() {
        assert_eq!(
            ReferenceRules::lookup(ResourceKind::VirtualNetwork, "subnets"),
            Some(EdgeKind::ParentOf)
        );
        assert_eq!(
            ReferenceRules::lookup(ResourceKind::NetworkSecurityGroup, "subnets"),
            Some(EdgeKind::Secures)
        );
        assert_eq!(
            ReferenceRules::lookup(ResourceKind::Other, "subnets"),
            Some(EdgeKind::AttachedTo)
        );
    }

    #[test]
    fn test_unknown_property_has_no_rule() {
        assert_eq!(ReferenceRules::lookup(ResourceKind::Other, "hardwareProfile"), None);
        assert_eq!(ReferenceRules::lookup(ResourceKind::Other, "id"), None);
    }

    #[test]
    fn test_table_keys_are_normalized() {
        for rule in ReferenceRules::all() {
            assert_eq!(
                ReferenceRules::normalize_key(rule.property),
                rule.property,
                "rule key '{}' is not in normalized form",
                rule.property
            );
        }
    }
}
