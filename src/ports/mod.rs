/// Ports module defining interfaces for hexagonal architecture
///
/// Only driven (outbound) ports exist: the application core is driven
/// directly by the CLI through its use case.
pub mod outbound;
