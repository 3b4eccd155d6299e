//! resgraph - resource dependency graph and inventory explorer
//!
//! This library turns a structural snapshot of cloud resources into a
//! dependency graph and derives filterable views from it, following
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): Catalog, references, graph, filters and
//!   the services that resolve and filter them
//! - **Application Layer** (`application`): Use case, interaction controller
//!   and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use resgraph::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let reporter = StderrProgressReporter::new();
//! let use_case = ExploreInventoryUseCase::new(FileSystemReader::new(), &reporter);
//!
//! let request = ExploreRequest::new(PathBuf::from("inventory.json"))
//!     .with_filters(vec!["resourceGroup=rg-prod".to_string()]);
//! let response = use_case.execute(request)?;
//!
//! let output = MarkdownFormatter::new().format(&response.read_model, ViewKind::All)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```
//!
//! The core pipeline can also be driven without any I/O:
//!
//! ```
//! use resgraph::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let loaded = SnapshotLoader::from_json_str(
//!     r#"[{"id": "vnet-1", "type": "Microsoft.Network/virtualNetworks"},
//!         {"id": "vnet-1/subnets/a", "type": "Microsoft.Network/virtualNetworks/subnets"}]"#,
//! )?;
//! let mut controller = InteractionController::new(loaded.catalog, &ReferenceResolver::new());
//! assert_eq!(controller.graph().edge_count(), 1);
//!
//! controller.apply_filter_expressions(["name=a"])?;
//! assert_eq!(controller.views().explorer.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::application::dto::{ExploreRequest, ExploreResponse, OutputFormat, ViewKind};
    pub use crate::application::interaction::InteractionController;
    pub use crate::application::read_models::{InventoryReadModel, ProjectedViews, ViewProjector};
    pub use crate::application::use_cases::ExploreInventoryUseCase;
    pub use crate::inventory::domain::{
        Catalog, DependencyGraph, Direction, EdgeKind, FilterDimension, FilterState, Reference,
        Resource, ResourceId, ServiceCategory, SnapshotMetadata,
    };
    pub use crate::inventory::services::{
        FilterEngine, ReferenceResolver, SecurityRuleExtractor, SnapshotLoader,
    };
    pub use crate::ports::outbound::{
        OutputPresenter, ProgressReporter, SnapshotReader, ViewFormatter,
    };
    pub use crate::shared::error::{ExitCode, InventoryError};
    pub use crate::shared::Result;
}
