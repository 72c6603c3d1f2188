pub mod coordinate;
pub mod descriptor;
pub mod extracted_model;
pub mod repository;
pub mod resolved_dependency;
pub mod scope;

pub use coordinate::DependencyCoordinate;
pub use descriptor::{artifact_resource_path, DescriptorSource, DESCRIPTOR_FILE_NAME, MANIFEST_ROOT};
pub use extracted_model::ExtractedModel;
pub use repository::RepositoryEndpoint;
pub use resolved_dependency::ResolvedDependency;
pub use scope::{DependencyScope, ScopeSet};
