use std::path::PathBuf;

/// ExploreRequest - Internal request DTO for the explore inventory use case
///
/// Filters arrive as `DIMENSION=VALUE[,VALUE...]` expressions so the CLI,
/// the config file and tests can all feed the same path.
#[derive(Debug, Clone, Default)]
pub struct ExploreRequest {
    /// Path to the snapshot JSON file
    pub snapshot_path: PathBuf,
    /// Filter expressions, applied in order
    pub filter_expressions: Vec<String>,
    /// Optional name pattern (`*` wildcards; substring match without them)
    pub name_pattern: Option<String>,
    /// Resource to select after filtering
    pub selected_id: Option<String>,
    /// Match embedded ids against the catalog ignoring ASCII case
    pub case_insensitive_ids: bool,
}

impl ExploreRequest {
    pub fn new(snapshot_path: PathBuf) -> Self {
        Self {
            snapshot_path,
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filter_expressions: Vec<String>) -> Self {
        self.filter_expressions = filter_expressions;
        self
    }

    pub fn with_name_pattern(mut self, name_pattern: Option<String>) -> Self {
        self.name_pattern = name_pattern;
        self
    }

    pub fn with_selection(mut self, selected_id: Option<String>) -> Self {
        self.selected_id = selected_id;
        self
    }

    pub fn with_case_insensitive_ids(mut self, enabled: bool) -> Self {
        self.case_insensitive_ids = enabled;
        self
    }
}
