/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports describe every external collaborator the
/// dependency pipeline talks to: the build-evaluation engine, the
/// resolution delegate, the descriptor catalog and progress output.
pub mod outbound;
