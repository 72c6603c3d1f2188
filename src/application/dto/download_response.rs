use crate::dependency_runtime::domain::ResolvedDependency;
use std::collections::HashSet;

#[cfg(windows)]
const CLASSPATH_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const CLASSPATH_SEPARATOR: &str = ":";

/// DownloadResponse - Internal response DTO for the download use case
#[derive(Debug, Clone, Default)]
pub struct DownloadResponse {
    /// Materialized dependencies, deduplicated across descriptors
    pub dependencies: HashSet<ResolvedDependency>,
    /// Number of descriptors evaluated
    pub descriptors_processed: usize,
}

impl DownloadResponse {
    pub fn new(dependencies: HashSet<ResolvedDependency>, descriptors_processed: usize) -> Self {
        Self {
            dependencies,
            descriptors_processed,
        }
    }

    /// Dependencies ordered by coordinate, for stable output
    pub fn sorted(&self) -> Vec<&ResolvedDependency> {
        let mut dependencies: Vec<_> = self.dependencies.iter().collect();
        dependencies.sort_by(|a, b| a.coordinate().cmp(b.coordinate()));
        dependencies
    }

    /// Artifact locations joined with the platform path separator
    pub fn classpath(&self) -> String {
        self.sorted()
            .iter()
            .map(|d| d.location().display().to_string())
            .collect::<Vec<_>>()
            .join(CLASSPATH_SEPARATOR)
    }
}
