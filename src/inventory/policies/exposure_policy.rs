use crate::inventory::domain::{ResourceId, RuleAccess, RuleDirection, SecurityRule};
use serde::Serialize;

/// Source prefixes that mean "anyone"
const OPEN_SOURCES: &[&str] = &["*", "internet", "any", "0.0.0.0/0"];

/// Destination ports whose exposure is flagged
const SENSITIVE_PORTS: &[(u16, &str)] = &[(22, "SSH"), (3389, "RDP")];

/// A permissive inbound rule worth reviewing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityFinding {
    pub nsg_id: ResourceId,
    pub rule_name: String,
    pub priority: i64,
    pub message: String,
}

/// ExposurePolicy encodes which security rules open a resource to the world
///
/// A rule is exposed when it is an inbound `allow` from any source whose
/// destination port covers every port, SSH (22) or RDP (3389).
pub struct ExposurePolicy;

impl ExposurePolicy {
    pub fn evaluate(rules: &[SecurityRule]) -> Vec<SecurityFinding> {
        rules.iter().filter_map(Self::check_rule).collect()
    }

    fn check_rule(rule: &SecurityRule) -> Option<SecurityFinding> {
        if rule.direction != RuleDirection::Inbound || rule.access != RuleAccess::Allow {
            return None;
        }
        if !Self::is_open_source(&rule.source_range) {
            return None;
        }

        let exposure = Self::exposed_port(&rule.destination_port)?;
        Some(SecurityFinding {
            nsg_id: rule.nsg_id.clone(),
            rule_name: rule.name.clone(),
            priority: rule.priority,
            message: format!(
                "Rule '{}' allows inbound {} from any source",
                rule.name, exposure
            ),
        })
    }

    fn is_open_source(source: &str) -> bool {
        source
            .split(',')
            .map(str::trim)
            .any(|part| OPEN_SOURCES.iter().any(|open| part.eq_ignore_ascii_case(open)))
    }

    /// Describes the sensitive exposure of a port expression, if any
    fn exposed_port(ports: &str) -> Option<String> {
        for part in ports.split(',').map(str::trim) {
            if part == "*" {
                return Some("traffic on all ports".to_string());
            }
            for (port, service) in SENSITIVE_PORTS {
                if Self::port_in(part, *port) {
                    return Some(format!("{} (port {})", service, port));
                }
            }
        }
        None
    }

    /// Whether `part` (a single port or an `a-b` range) contains `port`
    fn port_in(part: &str, port: u16) -> bool {
        match part.split_once('-') {
            Some((low, high)) => match (low.trim().parse::<u16>(), high.trim().parse::<u16>()) {
                (Ok(low), Ok(high)) => (low..=high).contains(&port),
                _ => false,
            },
            None => part.parse::<u16>().map(|p| p == port).unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(
        direction: RuleDirection,
        access: RuleAccess,
        source: &str,
        port: &str,
    ) -> SecurityRule {
        SecurityRule {
            nsg_id: ResourceId::new("nsg-1".to_string()).unwrap(),
            name: "rule".to_string(),
            direction,
            priority: 100,
            access,
            protocol: "Tcp".to_string(),
            source_range: source.to_string(),
            destination_range: "*".to_string(),
            source_port: "*".to_string(),
            destination_port: port.to_string(),
            is_default: false,
        }
    }

    #[test]
    fn test_open_ssh_is_flagged() {
        let findings = ExposurePolicy::evaluate(&[rule(
            RuleDirection::Inbound,
            RuleAccess::Allow,
            "*",
            "22",
        )]);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("SSH"));
    }

    #[test]
    fn test_internet_rdp_is_flagged() {
        let findings = ExposurePolicy::evaluate(&[rule(
            RuleDirection::Inbound,
            RuleAccess::Allow,
            "Internet",
            "3389",
        )]);
        assert!(findings[0].message.contains("RDP"));
    }

    #[test]
    fn test_all_ports_is_flagged() {
        let findings = ExposurePolicy::evaluate(&[rule(
            RuleDirection::Inbound,
            RuleAccess::Allow,
            "0.0.0.0/0",
            "*",
        )]);
        assert!(findings[0].message.contains("all ports"));
    }

    #[test]
    fn test_port_range_covering_ssh() {
        let findings = ExposurePolicy::evaluate(&[rule(
            RuleDirection::Inbound,
            RuleAccess::Allow,
            "*",
            "20-25",
        )]);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_port_list_with_rdp() {
        let findings = ExposurePolicy::evaluate(&[rule(
            RuleDirection::Inbound,
            RuleAccess::Allow,
            "*",
            "443,3389",
        )]);
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_https_is_not_flagged() {
        let findings = ExposurePolicy::evaluate(&[rule(
            RuleDirection::Inbound,
            RuleAccess::Allow,
            "*",
            "443",
        )]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_deny_and_outbound_are_ignored() {
        let rules = [
            rule(RuleDirection::Inbound, RuleAccess::Deny, "*", "*"),
            rule(RuleDirection::Outbound, RuleAccess::Allow, "*", "22"),
        ];
        assert!(ExposurePolicy::evaluate(&rules).is_empty());
    }

    #[test]
    fn test_restricted_source_is_not_flagged() {
        let findings = ExposurePolicy::evaluate(&[rule(
            RuleDirection::Inbound,
            RuleAccess::Allow,
            "10.0.0.0/8",
            "22",
        )]);
        assert!(findings.is_empty());
    }
}
