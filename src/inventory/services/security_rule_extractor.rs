use crate::inventory::domain::{Resource, ResourceProperties, SecurityRule};

/// SecurityRuleExtractor service reading the rules of a network security group
pub struct SecurityRuleExtractor;

impl SecurityRuleExtractor {
    /// Extracts custom rules followed by platform default rules.
    ///
    /// Non-NSG resources and malformed properties yield no rules. Rule
    /// records that lack a direction, access or priority are skipped.
    pub fn extract(resource: &Resource) -> Vec<SecurityRule> {
        let (custom, defaults) = match resource.typed_properties() {
            ResourceProperties::NetworkSecurityGroup {
                security_rules,
                default_security_rules,
            } => (security_rules, default_security_rules),
            _ => return Vec::new(),
        };

        let mut rules = Vec::with_capacity(custom.len() + defaults.len());
        for (records, is_default) in [(custom, false), (defaults, true)] {
            for record in records {
                match SecurityRule::from_value(resource.id(), record, is_default) {
                    Some(rule) => rules.push(rule),
                    None => tracing::debug!(
                        nsg = %resource.id(),
                        "skipping security rule without direction, access or priority"
                    ),
                }
            }
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::ResourceId;
    use serde_json::{json, Value};

    fn nsg(properties: Value) -> Resource {
        Resource::new(
            ResourceId::new("nsg-1".to_string()).unwrap(),
            "nsg-web".to_string(),
            "Microsoft.Network/networkSecurityGroups".to_string(),
            "rg".to_string(),
            "westeurope".to_string(),
            properties,
        )
    }

    #[test]
    fn test_custom_then_default_rules() {
        let resource = nsg(json!({
            "securityRules": [
                {"name": "allow-https", "properties": {"direction": "Inbound", "access": "Allow", "priority": 100}}
            ],
            "defaultSecurityRules": [
                {"name": "DenyAllInBound", "properties": {"direction": "Inbound", "access": "Deny", "priority": 65500}}
            ]
        }));

        let rules = SecurityRuleExtractor::extract(&resource);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].name, "allow-https");
        assert!(!rules[0].is_default);
        assert_eq!(rules[1].name, "DenyAllInBound");
        assert!(rules[1].is_default);
    }

    #[test]
    fn test_incomplete_rule_is_skipped() {
        let resource = nsg(json!({
            "securityRules": [
                {"name": "broken", "properties": {"direction": "Inbound"}},
                {"name": "ok", "direction": "Outbound", "access": "Deny", "priority": 4000}
            ]
        }));
        let rules = SecurityRuleExtractor::extract(&resource);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name, "ok");
    }

    #[test]
    fn test_non_nsg_yields_nothing() {
        let vm = Resource::new(
            ResourceId::new("vm-1".to_string()).unwrap(),
            "vm".to_string(),
            "compute.vm".to_string(),
            "rg".to_string(),
            "westeurope".to_string(),
            json!({"securityRules": [{"direction": "Inbound", "access": "Allow", "priority": 1}]}),
        );
        assert!(SecurityRuleExtractor::extract(&vm).is_empty());
    }

    #[test]
    fn test_malformed_nsg_yields_nothing() {
        assert!(SecurityRuleExtractor::extract(&nsg(json!(42))).is_empty());
    }
}
