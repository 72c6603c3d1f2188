use crate::dependency_runtime::domain::{
    DependencyCoordinate, RepositoryEndpoint, ResolvedDependency,
};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// DependencyResolver port for the resolution delegate
///
/// This port abstracts the subsystem that fetches artifacts from
/// repositories and materializes them locally.
///
/// # Async Support
/// Implementations must be `Send + Sync` so downloads can run concurrently.
#[async_trait]
pub trait DependencyResolver: Send + Sync {
    /// Fetches every coordinate from the given repositories
    ///
    /// # Arguments
    /// * `repositories` - Repositories to search, in priority order
    /// * `dependencies` - Coordinates to materialize
    ///
    /// # Returns
    /// One record per distinct coordinate
    ///
    /// # Errors
    /// Returns an error if a coordinate cannot be fetched from any repository
    /// or a repository fails
    async fn download(
        &self,
        repositories: &[RepositoryEndpoint],
        dependencies: &[DependencyCoordinate],
    ) -> Result<HashSet<ResolvedDependency>>;
}
