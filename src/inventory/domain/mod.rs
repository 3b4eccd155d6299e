pub mod catalog;
pub mod category;
pub mod dependency_graph;
pub mod filter_state;
pub mod reference;
pub mod resource;
pub mod resource_properties;
pub mod security_rule;

pub use catalog::{Catalog, SnapshotMetadata};
pub use category::ServiceCategory;
pub use dependency_graph::{DependencyGraph, Direction, GraphExport};
pub use filter_state::{FilterDimension, FilterState};
pub use reference::{EdgeKind, Reference};
pub use resource::{Resource, ResourceId, ResourceKind};
pub use resource_properties::ResourceProperties;
pub use security_rule::{RuleAccess, RuleDirection, SecurityRule};
