use crate::application::read_models::{
    DiagnosticsView, InventoryReadModel, ProjectedViews, SelectionDetail, SnapshotView,
    ViewProjector,
};
use crate::inventory::domain::{
    Catalog, DependencyGraph, FilterDimension, FilterState, ResourceId, ServiceCategory,
};
use crate::inventory::services::{FilterEngine, ReferenceResolver, ResolutionDiagnostics};
use crate::shared::error::InventoryError;
use crate::shared::Result;
use std::collections::BTreeSet;

/// InteractionController owns filter and selection state for one session
///
/// The catalog and graph are fixed at construction. A filter change runs
/// the full pipeline (filter engine, then every projection); a selection
/// change only resolves the selected resource and its one-hop neighbors.
/// Failed requests leave the state untouched.
#[derive(Debug)]
pub struct InteractionController {
    catalog: Catalog,
    graph: DependencyGraph,
    resolution: ResolutionDiagnostics,
    skipped_records: usize,
    filter_state: FilterState,
    selected_id: Option<ResourceId>,
    visible: BTreeSet<ResourceId>,
    views: ProjectedViews,
    selection: Option<SelectionDetail>,
    pipeline_passes: usize,
}

impl InteractionController {
    /// Resolves references, builds the graph and runs the initial pass
    /// (no filters, no selection).
    pub fn new(catalog: Catalog, resolver: &ReferenceResolver) -> Self {
        let resolution = resolver.resolve_with_diagnostics(&catalog);
        let graph = DependencyGraph::build(&catalog, resolution.references);

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            dangling = resolution.diagnostics.dangling_references,
            malformed = resolution.diagnostics.malformed_resources.len(),
            "dependency graph built"
        );

        let mut controller = Self {
            catalog,
            graph,
            resolution: resolution.diagnostics,
            skipped_records: 0,
            filter_state: FilterState::new(),
            selected_id: None,
            visible: BTreeSet::new(),
            views: ProjectedViews::default(),
            selection: None,
            pipeline_passes: 0,
        };
        controller.run_pipeline();
        controller
    }

    /// Records how many snapshot records the loader skipped, for diagnostics
    pub fn with_skipped_records(mut self, skipped_records: usize) -> Self {
        self.skipped_records = skipped_records;
        self
    }

    /// Replaces the whole filter state
    pub fn set_filter_state(&mut self, state: FilterState) -> &ProjectedViews {
        self.filter_state = state;
        self.run_pipeline();
        &self.views
    }

    /// Applies `dimension=value[,value...]` expressions in order.
    ///
    /// All expressions are validated before any takes effect.
    pub fn apply_filter_expressions<I, S>(&mut self, expressions: I) -> Result<&ProjectedViews>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut next = self.filter_state.clone();
        for expression in expressions {
            next.apply_expression(expression.as_ref())?;
        }
        Ok(self.set_filter_state(next))
    }

    /// Replaces the values of one dimension named by string.
    ///
    /// An unknown dimension name is rejected with `InvalidFilterDimension`.
    pub fn update_dimension<S: Into<String>>(
        &mut self,
        dimension: &str,
        values: Vec<S>,
    ) -> Result<&ProjectedViews> {
        let dimension: FilterDimension = dimension.parse()?;
        let mut next = self.filter_state.clone();
        next.set_values(dimension, values)?;
        Ok(self.set_filter_state(next))
    }

    /// Clears every filter
    pub fn reset_filters(&mut self) -> &ProjectedViews {
        self.set_filter_state(FilterState::new())
    }

    /// Adds or removes a category from the category filter
    pub fn toggle_category(&mut self, category: ServiceCategory) -> &ProjectedViews {
        let mut next = self.filter_state.clone();
        next.toggle_category(category);
        self.set_filter_state(next)
    }

    /// Selects a resource and resolves its detail.
    ///
    /// Does not recompute the visible subset. An id absent from the catalog
    /// is rejected with `UnknownResource` and the previous selection is kept.
    pub fn select(&mut self, id: &str) -> Result<&SelectionDetail> {
        let detail = ViewProjector::selection(&self.catalog, &self.graph, id).ok_or_else(|| {
            InventoryError::UnknownResource { id: id.to_string() }
        })?;

        self.selected_id = Some(detail.resource.id().clone());
        Ok(self.selection.insert(detail))
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
        self.selection = None;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    pub fn selected_id(&self) -> Option<&ResourceId> {
        self.selected_id.as_ref()
    }

    pub fn visible_ids(&self) -> &BTreeSet<ResourceId> {
        &self.visible
    }

    pub fn views(&self) -> &ProjectedViews {
        &self.views
    }

    pub fn selection(&self) -> Option<&SelectionDetail> {
        self.selection.as_ref()
    }

    pub fn resolution_diagnostics(&self) -> &ResolutionDiagnostics {
        &self.resolution
    }

    /// Number of full pipeline passes run so far (the initial one included)
    pub fn pipeline_passes(&self) -> usize {
        self.pipeline_passes
    }

    /// Snapshot of the current state and views for rendering
    pub fn read_model(&self) -> InventoryReadModel {
        InventoryReadModel {
            snapshot: SnapshotView::from_metadata(self.catalog.metadata(), self.catalog.len()),
            filters: self.filter_state.clone(),
            visible_count: self.visible.len(),
            views: self.views.clone(),
            selection: self.selection.clone(),
            graph: self.graph.to_export(),
            diagnostics: DiagnosticsView {
                skipped_records: self.skipped_records,
                resolution: self.resolution.clone(),
                node_count: self.graph.node_count(),
                edge_count: self.graph.edge_count(),
            },
        }
    }

    fn run_pipeline(&mut self) {
        self.visible = FilterEngine::apply(&self.catalog, &self.filter_state);
        self.views = ViewProjector::project(&self.catalog, &self.graph, &self.visible);
        self.pipeline_passes += 1;

        tracing::debug!(
            pass = self.pipeline_passes,
            visible = self.visible.len(),
            active_dimensions = self.filter_state.active_dimensions().len(),
            "pipeline pass"
        );
    }
}
