/// Mock implementations for testing
mod mock_dependency_resolver;
mod mock_descriptor_fetcher;
mod mock_progress_reporter;
mod mock_workspace_provider;

pub use mock_dependency_resolver::MockDependencyResolver;
pub use mock_descriptor_fetcher::MockDescriptorFetcher;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_workspace_provider::UnreleasableWorkspaceProvider;
