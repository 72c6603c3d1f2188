/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (build engine, repositories, workspaces, console).
pub mod dependency_resolver;
pub mod descriptor_catalog;
pub mod descriptor_fetcher;
pub mod evaluation_engine;
pub mod progress_reporter;
pub mod workspace_provider;

pub use dependency_resolver::DependencyResolver;
pub use descriptor_catalog::DescriptorCatalog;
pub use descriptor_fetcher::DescriptorFetcher;
pub use evaluation_engine::{
    ConfigurationModel, DeclaredDependency, DeclaredRepository, EvaluationEngine,
    EvaluationEngineFactory, ModelReadyHook, ProjectModel, RepositoryKind,
};
pub use progress_reporter::ProgressReporter;
pub use workspace_provider::{WorkspaceHandle, WorkspaceProvider};
