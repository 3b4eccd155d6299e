/// Which projection(s) a run renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Stat totals and per-type/location/group/category counts
    Summary,
    /// Flat table of visible resources, sorted by name
    Explorer,
    /// Visible nodes and the edges between them
    Topology,
    /// Security rules of visible network security groups
    Security,
    /// The whole resolved graph as `{source, target, kind}` triples
    Edges,
    /// Every view plus selection and diagnostics
    #[default]
    All,
}

impl ViewKind {
    /// Whether `other` should be rendered when this view is requested
    pub fn includes(self, other: ViewKind) -> bool {
        self == ViewKind::All || self == other
    }
}

impl std::str::FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(ViewKind::Summary),
            "explorer" | "resources" => Ok(ViewKind::Explorer),
            "topology" => Ok(ViewKind::Topology),
            "security" => Ok(ViewKind::Security),
            "edges" => Ok(ViewKind::Edges),
            "all" => Ok(ViewKind::All),
            _ => Err(format!(
                "Invalid view: {}. Please specify one of: summary, explorer, topology, security, edges, all",
                s
            )),
        }
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViewKind::Summary => "summary",
            ViewKind::Explorer => "explorer",
            ViewKind::Topology => "topology",
            ViewKind::Security => "security",
            ViewKind::Edges => "edges",
            ViewKind::All => "all",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_view_kind_from_str() {
        assert_eq!(ViewKind::from_str("summary").unwrap(), ViewKind::Summary);
        assert_eq!(ViewKind::from_str("Topology").unwrap(), ViewKind::Topology);
        assert_eq!(ViewKind::from_str("resources").unwrap(), ViewKind::Explorer);
        assert_eq!(ViewKind::from_str("ALL").unwrap(), ViewKind::All);
    }

    #[test]
    fn test_view_kind_from_str_invalid() {
        let error = ViewKind::from_str("graph").unwrap_err();
        assert!(error.contains("Invalid view: graph"));
        assert!(error.contains("edges"));
    }

    #[test]
    fn test_view_kind_includes() {
        assert!(ViewKind::All.includes(ViewKind::Security));
        assert!(ViewKind::Summary.includes(ViewKind::Summary));
        assert!(!ViewKind::Summary.includes(ViewKind::Explorer));
    }

    #[test]
    fn test_view_kind_display_roundtrips_through_from_str() {
        for kind in [
            ViewKind::Summary,
            ViewKind::Explorer,
            ViewKind::Topology,
            ViewKind::Security,
            ViewKind::Edges,
            ViewKind::All,
        ] {
            assert_eq!(ViewKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }

    #[test]
    fn test_view_kind_deserialize() {
        let kind: ViewKind = serde_json::from_str("\"edges\"").unwrap();
        assert_eq!(kind, ViewKind::Edges);
    }
}
