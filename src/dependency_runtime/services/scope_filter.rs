use crate::dependency_runtime::domain::{DependencyCoordinate, ScopeSet};

/// ScopeFilter - keeps the coordinates whose scope was requested
///
/// Order is preserved and no deduplication happens here; duplicates are
/// collapsed after resolution.
pub struct ScopeFilter;

impl ScopeFilter {
    pub fn filter(
        dependencies: Vec<DependencyCoordinate>,
        scopes: &ScopeSet,
    ) -> Vec<DependencyCoordinate> {
        dependencies
            .into_iter()
            .filter(|dependency| scopes.contains(dependency.scope()))
            .collect()
    }
}
