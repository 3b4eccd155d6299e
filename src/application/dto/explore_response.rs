use crate::application::read_models::InventoryReadModel;

/// ExploreResponse - Internal response DTO from the explore inventory use case
///
/// Carries the read model of the final pipeline pass; formatters decide
/// which parts of it to render.
#[derive(Debug, Clone)]
pub struct ExploreResponse {
    pub read_model: InventoryReadModel,
    /// Number of full pipeline passes the controller ran for this request
    pub pipeline_passes: usize,
}

impl ExploreResponse {
    pub fn new(read_model: InventoryReadModel, pipeline_passes: usize) -> Self {
        Self {
            read_model,
            pipeline_passes,
        }
    }

    /// True when the filters matched no resource
    pub fn is_empty_result(&self) -> bool {
        self.read_model.visible_count == 0
    }
}
