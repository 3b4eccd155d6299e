use crate::application::dto::{ExploreRequest, ExploreResponse};
use crate::application::interaction::InteractionController;
use crate::inventory::domain::{FilterDimension, FilterState};
use crate::inventory::services::{LoadedSnapshot, ReferenceResolver, SnapshotLoader};
use crate::ports::outbound::{ProgressReporter, SnapshotReader};
use crate::shared::error::InventoryError;
use crate::shared::Result;
use std::path::Path;

/// Number of stages reported while a request runs
const STAGE_COUNT: usize = 4;

/// ExploreInventoryUseCase - Core use case for one exploration request
///
/// Loads a snapshot, resolves references into a dependency graph, applies
/// the requested filters and selection, and hands back the read model of
/// the final pipeline pass.
///
/// # Type Parameters
/// * `SR` - SnapshotReader implementation
/// * `PR` - ProgressReporter implementation
pub struct ExploreInventoryUseCase<SR, PR> {
    snapshot_reader: SR,
    progress_reporter: PR,
}

impl<SR, PR> ExploreInventoryUseCase<SR, PR>
where
    SR: SnapshotReader,
    PR: ProgressReporter,
{
    /// Creates a new ExploreInventoryUseCase with injected dependencies
    pub fn new(snapshot_reader: SR, progress_reporter: PR) -> Self {
        Self {
            snapshot_reader,
            progress_reporter,
        }
    }

    /// Executes the exploration use case
    ///
    /// # Arguments
    /// * `request` - Snapshot path plus filters and selection to apply
    ///
    /// # Returns
    /// ExploreResponse carrying the read model of the final pipeline pass
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be read or parsed, if the
    /// catalog is malformed, or if a filter or selection request is invalid.
    /// An empty filter result is not an error.
    pub fn execute(&self, request: ExploreRequest) -> Result<ExploreResponse> {
        // Validate filters before touching the file system
        let filter_state = Self::build_filter_state(&request)?;

        // Step 1: Read and parse the snapshot
        let loaded = self.load_snapshot(&request.snapshot_path)?;

        // Step 2: Resolve references and build the graph
        let mut controller = self.build_controller(loaded, request.case_insensitive_ids);

        // Step 3: Apply filters (one additional pass, only when any are set)
        self.apply_filters(&mut controller, filter_state);

        // Step 4: Resolve the selection if requested
        self.apply_selection(&mut controller, request.selected_id.as_deref())?;

        let read_model = controller.read_model();
        self.progress_reporter.report_completion(&format!(
            "✅ {} of {} resource(s) visible",
            read_model.visible_count,
            controller.catalog().len()
        ));

        Ok(ExploreResponse::new(
            read_model,
            controller.pipeline_passes(),
        ))
    }

    /// Combines filter expressions and the name pattern into one state
    ///
    /// # Errors
    /// Returns `InvalidFilterDimension` or `InvalidFilterExpression` for the
    /// first bad expression
    fn build_filter_state(request: &ExploreRequest) -> Result<FilterState> {
        let mut state = FilterState::new();
        for expression in &request.filter_expressions {
            state.apply_expression(expression)?;
        }
        if let Some(pattern) = request.name_pattern.as_deref() {
            state.add_value(FilterDimension::Name, pattern)?;
        }
        Ok(state)
    }

    /// Reads the snapshot and turns it into a catalog, reporting progress
    fn load_snapshot(&self, snapshot_path: &Path) -> Result<LoadedSnapshot> {
        self.progress_reporter.report_stage(
            1,
            STAGE_COUNT,
            &format!("📖 Loading snapshot from: {}", snapshot_path.display()),
        );

        let content = self.snapshot_reader.read_snapshot(snapshot_path)?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| InventoryError::SnapshotParseError {
                path: snapshot_path.to_path_buf(),
                details: e.to_string(),
            })?;

        let loaded = SnapshotLoader::from_value(value)?;

        self.progress_reporter.report(&format!(
            "✅ Loaded {} resource(s)",
            loaded.catalog.len()
        ));
        if loaded.skipped_records > 0 {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Skipped {} record(s) without a usable id or with a repeated id",
                loaded.skipped_records
            ));
        }
        if let Some(declared) = loaded.catalog.metadata().declared_total() {
            if declared != loaded.catalog.len() {
                self.progress_reporter.report_warning(&format!(
                    "⚠️  Snapshot declares {} resource(s) but {} were loaded",
                    declared,
                    loaded.catalog.len()
                ));
            }
        }

        Ok(loaded)
    }

    /// Resolves references, builds the graph and runs the initial pass
    fn build_controller(
        &self,
        loaded: LoadedSnapshot,
        case_insensitive_ids: bool,
    ) -> InteractionController {
        self.progress_reporter
            .report_stage(2, STAGE_COUNT, "🔗 Resolving resource references...");

        let resolver = ReferenceResolver::new().with_case_insensitive_ids(case_insensitive_ids);
        let controller = InteractionController::new(loaded.catalog, &resolver)
            .with_skipped_records(loaded.skipped_records);

        let graph = controller.graph();
        self.progress_reporter.report(&format!(
            "✅ Built graph with {} node(s) and {} edge(s)",
            graph.node_count(),
            graph.edge_count()
        ));

        let diagnostics = controller.resolution_diagnostics();
        if diagnostics.dangling_references > 0 {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Dropped {} reference(s) to resources outside the snapshot",
                diagnostics.dangling_references
            ));
        }
        if !diagnostics.malformed_resources.is_empty() {
            self.progress_reporter.report_warning(&format!(
                "⚠️  {} resource(s) have unreadable properties and contribute no edges",
                diagnostics.malformed_resources.len()
            ));
        }

        controller
    }

    fn apply_filters(&self, controller: &mut InteractionController, filter_state: FilterState) {
        if filter_state.is_empty() {
            self.progress_reporter
                .report_stage(3, STAGE_COUNT, "🔍 No filters given, showing every resource");
            return;
        }

        let dimensions = filter_state
            .active_dimensions()
            .iter()
            .map(|dimension| dimension.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.progress_reporter.report_stage(
            3,
            STAGE_COUNT,
            &format!("🔍 Applying filters on: {}", dimensions),
        );

        controller.set_filter_state(filter_state);

        if controller.visible_ids().is_empty() {
            self.progress_reporter
                .report_warning("⚠️  No resources match the current filters");
        }
    }

    fn apply_selection(
        &self,
        controller: &mut InteractionController,
        selected_id: Option<&str>,
    ) -> Result<()> {
        let Some(id) = selected_id else {
            return Ok(());
        };

        self.progress_reporter
            .report_stage(4, STAGE_COUNT, &format!("🎯 Selecting: {}", id));

        let detail = controller.select(id)?;
        self.progress_reporter.report(&format!(
            "✅ {} has {} outbound and {} inbound neighbor(s)",
            detail.resource.name(),
            detail.outbound.len(),
            detail.inbound.len()
        ));
        Ok(())
    }
}
