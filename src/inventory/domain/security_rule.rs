use super::resource::ResourceId;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleDirection {
    Inbound,
    Outbound,
}

impl RuleDirection {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inbound" | "in" => Some(RuleDirection::Inbound),
            "outbound" | "out" => Some(RuleDirection::Outbound),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleDirection::Inbound => "inbound",
            RuleDirection::Outbound => "outbound",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAccess {
    Allow,
    Deny,
}

impl RuleAccess {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "allow" => Some(RuleAccess::Allow),
            "deny" => Some(RuleAccess::Deny),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleAccess::Allow => "allow",
            RuleAccess::Deny => "deny",
        }
    }
}

/// SecurityRule value object, derived from a network security group
///
/// Address and port fields hold the single value or the comma-joined list
/// form, defaulting to `*` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityRule {
    pub nsg_id: ResourceId,
    pub name: String,
    pub direction: RuleDirection,
    pub priority: i64,
    #[serde(rename = "action")]
    pub access: RuleAccess,
    pub protocol: String,
    pub source_range: String,
    pub destination_range: String,
    pub source_port: String,
    pub destination_port: String,
    pub is_default: bool,
}

impl SecurityRule {
    /// Reads one rule record.
    ///
    /// Fields live under `properties` in provider exports and at the top
    /// level in flattened ones; both are accepted. Returns `None` when the
    /// direction, access or priority is missing or unreadable.
    pub fn from_value(nsg_id: &ResourceId, rule: &Value, is_default: bool) -> Option<Self> {
        let body = rule
            .get("properties")
            .filter(|properties| properties.is_object())
            .unwrap_or(rule);
        if !body.is_object() {
            return None;
        }

        let direction = body
            .get("direction")
            .and_then(Value::as_str)
            .and_then(RuleDirection::parse)?;
        let access = body
            .get("access")
            .and_then(Value::as_str)
            .and_then(RuleAccess::parse)?;
        let priority = body.get("priority").and_then(read_priority)?;

        let name = rule
            .get("name")
            .or_else(|| body.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();

        Some(Self {
            nsg_id: nsg_id.clone(),
            name,
            direction,
            priority,
            access,
            protocol: body
                .get("protocol")
                .and_then(Value::as_str)
                .unwrap_or("*")
                .to_string(),
            source_range: single_or_list(body, "sourceAddressPrefix", "sourceAddressPrefixes"),
            destination_range: single_or_list(
                body,
                "destinationAddressPrefix",
                "destinationAddressPrefixes",
            ),
            source_port: single_or_list(body, "sourcePortRange", "sourcePortRanges"),
            destination_port: single_or_list(body, "destinationPortRange", "destinationPortRanges"),
            is_default,
        })
    }
}

fn read_priority(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// `single` when non-empty, else the joined `plural` list, else `*`
fn single_or_list(body: &Value, single: &str, plural: &str) -> String {
    if let Some(value) = body
        .get(single)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
    {
        return value.to_string();
    }

    let joined = body
        .get(plural)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_default();

    if joined.is_empty() {
        "*".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nsg() -> ResourceId {
        ResourceId::new("nsg-1".to_string()).unwrap()
    }

    #[test]
    fn test_from_provider_shape() {
        let rule = json!({
            "name": "allow-ssh",
            "properties": {
                "direction": "Inbound",
                "access": "Allow",
                "priority": 100,
                "protocol": "Tcp",
                "sourceAddressPrefix": "*",
                "destinationAddressPrefix": "10.0.0.0/24",
                "sourcePortRange": "*",
                "destinationPortRange": "22"
            }
        });

        let parsed = SecurityRule::from_value(&nsg(), &rule, false).unwrap();
        assert_eq!(parsed.name, "allow-ssh");
        assert_eq!(parsed.direction, RuleDirection::Inbound);
        assert_eq!(parsed.access, RuleAccess::Allow);
        assert_eq!(parsed.priority, 100);
        assert_eq!(parsed.protocol, "Tcp");
        assert_eq!(parsed.destination_range, "10.0.0.0/24");
        assert_eq!(parsed.destination_port, "22");
        assert!(!parsed.is_default);
    }

    #[test]
    fn test_from_flat_shape() {
        let rule = json!({
            "name": "deny-all",
            "direction": "outbound",
            "access": "deny",
            "priority": "4096"
        });

        let parsed = SecurityRule::from_value(&nsg(), &rule, true).unwrap();
        assert_eq!(parsed.direction, RuleDirection::Outbound);
        assert_eq!(parsed.priority, 4096);
        assert_eq!(parsed.protocol, "*");
        assert_eq!(parsed.source_range, "*");
        assert!(parsed.is_default);
    }

    #[test]
    fn test_list_fields_are_joined() {
        let rule = json!({
            "direction": "Inbound",
            "access": "Allow",
            "priority": 200,
            "sourceAddressPrefix": "",
            "sourceAddressPrefixes": ["10.0.0.0/8", "192.168.0.0/16"],
            "destinationPortRanges": ["80", "443"]
        });

        let parsed = SecurityRule::from_value(&nsg(), &rule, false).unwrap();
        assert_eq!(parsed.source_range, "10.0.0.0/8,192.168.0.0/16");
        assert_eq!(parsed.destination_port, "80,443");
    }

    #[test]
    fn test_incomplete_rules_are_skipped() {
        let missing_priority = json!({"direction": "Inbound", "access": "Allow"});
        assert!(SecurityRule::from_value(&nsg(), &missing_priority, false).is_none());

        let bad_access = json!({"direction": "Inbound", "access": "Maybe", "priority": 1});
        assert!(SecurityRule::from_value(&nsg(), &bad_access, false).is_none());

        assert!(SecurityRule::from_value(&nsg(), &json!("rule"), false).is_none());
    }

    #[test]
    fn test_serializes_access_as_action() {
        let rule = json!({"direction": "Inbound", "access": "Deny", "priority": 300});
        let parsed = SecurityRule::from_value(&nsg(), &rule, false).unwrap();
        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["action"], "deny");
        assert_eq!(value["nsgId"], "nsg-1");
        assert_eq!(value["direction"], "inbound");
    }
}
