mod filter_engine;
mod reference_resolver;
mod security_rule_extractor;
mod snapshot_loader;

pub use filter_engine::FilterEngine;
pub use reference_resolver::{ReferenceResolver, Resolution, ResolutionDiagnostics};
pub use security_rule_extractor::SecurityRuleExtractor;
pub use snapshot_loader::{LoadedSnapshot, SnapshotLoader};
