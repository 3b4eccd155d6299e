//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of the inventory for rendering.

pub mod explorer_view;
pub mod inventory_read_model;
pub mod security_view;
pub mod selection_view;
pub mod summary_view;
pub mod topology_view;
pub mod view_projector;

pub use explorer_view::ExplorerRow;
pub use inventory_read_model::{DiagnosticsView, InventoryReadModel, ProjectedViews, SnapshotView};
pub use security_view::SecurityGroupView;
pub use selection_view::{NeighborView, SelectionDetail};
pub use summary_view::{GroupCount, SummaryView};
pub use topology_view::{TopologyNode, TopologyView};
pub use view_projector::ViewProjector;
