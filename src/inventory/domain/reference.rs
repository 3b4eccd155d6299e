use super::resource::ResourceId;
use serde::{Deserialize, Serialize};

/// Relation carried by an inferred edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Source id is a strict path prefix of the target id
    ParentOf,
    AttachedTo,
    SecuredBy,
    /// Inverse listing on a security group (its `subnets` / `networkInterfaces`)
    Secures,
    MemberOf,
    ExposedBy,
    RoutedBy,
    HostedOn,
    Uses,
    MonitoredBy,
    /// An id-valued property not covered by a more specific rule
    References,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::ParentOf => "parent-of",
            EdgeKind::AttachedTo => "attached-to",
            EdgeKind::SecuredBy => "secured-by",
            EdgeKind::Secures => "secures",
            EdgeKind::MemberOf => "member-of",
            EdgeKind::ExposedBy => "exposed-by",
            EdgeKind::RoutedBy => "routed-by",
            EdgeKind::HostedOn => "hosted-on",
            EdgeKind::Uses => "uses",
            EdgeKind::MonitoredBy => "monitored-by",
            EdgeKind::References => "references",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference value object: a directed, typed edge `source -> target`
///
/// Serializes to the `{source, target, kind}` triple used for export.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    source: ResourceId,
    target: ResourceId,
    kind: EdgeKind,
}

impl Reference {
    pub fn new(source: ResourceId, target: ResourceId, kind: EdgeKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }

    pub fn source(&self) -> &ResourceId {
        &self.source
    }

    pub fn target(&self) -> &ResourceId {
        &self.target
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }
}
