use super::coordinate::DependencyCoordinate;
use super::repository::RepositoryEndpoint;

/// What the model extractor pulls out of an evaluated project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedModel {
    pub repositories: Vec<RepositoryEndpoint>,
    pub dependencies: Vec<DependencyCoordinate>,
}

impl ExtractedModel {
    pub fn new(
        repositories: Vec<RepositoryEndpoint>,
        dependencies: Vec<DependencyCoordinate>,
    ) -> Self {
        Self {
            repositories,
            dependencies,
        }
    }
}
