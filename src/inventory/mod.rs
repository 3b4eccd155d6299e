/// Inventory domain layer
///
/// Pure logic over an immutable resource snapshot: the catalog model,
/// reference inference, the dependency graph, and filter evaluation.
/// Nothing in this layer performs I/O.
pub mod domain;
pub mod policies;
pub mod services;
