use serde::Serialize;

/// Provider namespace prefixes and the category they belong to
const PROVIDER_CATEGORIES: &[(&str, ServiceCategory)] = &[
    ("microsoft.compute", ServiceCategory::Compute),
    ("microsoft.web", ServiceCategory::Compute),
    ("microsoft.containerservice", ServiceCategory::Compute),
    ("microsoft.storage", ServiceCategory::Storage),
    ("microsoft.dbformysql", ServiceCategory::Database),
    ("microsoft.dbforpostgresql", ServiceCategory::Database),
    ("microsoft.sql", ServiceCategory::Database),
    ("microsoft.documentdb", ServiceCategory::Database),
    ("microsoft.network", ServiceCategory::Network),
    ("microsoft.security", ServiceCategory::Security),
    ("microsoft.keyvault", ServiceCategory::Security),
    ("microsoft.insights", ServiceCategory::Monitoring),
    ("microsoft.operationalinsights", ServiceCategory::Monitoring),
    ("microsoft.logic", ServiceCategory::Integration),
    ("microsoft.apimanagement", ServiceCategory::Integration),
    ("microsoft.eventgrid", ServiceCategory::Integration),
];

/// Coarse service grouping used for dashboard cards and the category filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ServiceCategory {
    Compute,
    Storage,
    Database,
    Network,
    Security,
    Monitoring,
    Integration,
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 8] = [
        ServiceCategory::Compute,
        ServiceCategory::Storage,
        ServiceCategory::Database,
        ServiceCategory::Network,
        ServiceCategory::Security,
        ServiceCategory::Monitoring,
        ServiceCategory::Integration,
        ServiceCategory::Other,
    ];

    /// Derives the category of a resource `type`.
    ///
    /// Provider path types are matched by namespace prefix; dotted types by
    /// their first segment.
    pub fn from_type(resource_type: &str) -> Self {
        let lowered = resource_type.trim().to_ascii_lowercase();

        if let Some((_, category)) = PROVIDER_CATEGORIES
            .iter()
            .find(|(prefix, _)| lowered.starts_with(prefix))
        {
            return *category;
        }

        match lowered.split('.').next().unwrap_or("") {
            "compute" | "web" | "container" => ServiceCategory::Compute,
            "storage" => ServiceCategory::Storage,
            "database" | "db" | "sql" => ServiceCategory::Database,
            "network" => ServiceCategory::Network,
            "security" | "keyvault" | "identity" => ServiceCategory::Security,
            "monitoring" | "insights" => ServiceCategory::Monitoring,
            "integration" => ServiceCategory::Integration,
            _ => ServiceCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Compute => "Compute",
            ServiceCategory::Storage => "Storage",
            ServiceCategory::Database => "Database",
            ServiceCategory::Network => "Network",
            ServiceCategory::Security => "Security",
            ServiceCategory::Monitoring => "Monitoring",
            ServiceCategory::Integration => "Integration",
            ServiceCategory::Other => "Other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ServiceCategory::Compute => "💻",
            ServiceCategory::Storage => "💾",
            ServiceCategory::Database => "🗄️",
            ServiceCategory::Network => "🌐",
            ServiceCategory::Security => "🛡️",
            ServiceCategory::Monitoring => "📈",
            ServiceCategory::Integration => "🔗",
            ServiceCategory::Other => "⚙️",
        }
    }
}

impl std::str::FromStr for ServiceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceCategory::ALL
            .iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                format!(
                    "Invalid category: {}. Please specify one of: {}",
                    s,
                    ServiceCategory::ALL
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
